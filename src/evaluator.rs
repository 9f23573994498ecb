use crate::ast::{
    BinaryExpr, Expression, ExpressionKind, Operator, Program, Statement, StatementKind, Term,
};
use crate::environment::Scope;
use crate::object::{EvalError, Outcome, Result, Value};
use std::io::Write;

/// Executes statements strictly in order against the given scope, writing
/// `print` output to `out`. The first error aborts the run; an `exit(..)`
/// statement short-circuits with its code.
pub fn eval_program<W: Write>(program: &Program, scope: &mut Scope, out: &mut W) -> Result<Outcome> {
    for statement in program.statements.iter() {
        if let Some(outcome) = eval_statement(statement, scope, out)? {
            return Ok(outcome);
        }
    }
    Ok(Outcome::Completed)
}

fn eval_statement<W: Write>(
    statement: &Statement,
    scope: &mut Scope,
    out: &mut W,
) -> Result<Option<Outcome>> {
    match &statement.kind {
        StatementKind::Print { expr } => {
            let value = eval_expression(expr, scope)?;
            let _ = writeln!(out, "{}", value);
            Ok(None)
        }
        StatementKind::Exit { expr } => {
            let value = eval_expression(expr, scope)?;
            let code = exit_code(value, statement.line)?;
            Ok(Some(Outcome::Exit(code)))
        }
        StatementKind::Input { .. } => Err(EvalError::NotImplemented {
            feature: "input()",
            line: statement.line,
        }),
        StatementKind::VarDecl { name, expr } => {
            if scope.contains(name) {
                return Err(EvalError::Redeclaration {
                    name: name.clone(),
                    line: statement.line,
                });
            }
            let value = eval_expression(expr, scope)?;
            scope.set(name, value);
            Ok(None)
        }
        StatementKind::VarAssign { name, expr } => {
            if !scope.contains(name) {
                return Err(EvalError::AssignmentToUndeclared {
                    name: name.clone(),
                    line: statement.line,
                });
            }
            let value = eval_expression(expr, scope)?;
            scope.set(name, value);
            Ok(None)
        }
    }
}

// An INT exit code is used directly; a STRING must spell a non-negative
// integer. Other strings do not convert.
fn exit_code(value: Value, line: u32) -> Result<i64> {
    match value {
        Value::Int(code) => Ok(code),
        Value::Str(text) => {
            if is_number(&text) {
                if let Ok(code) = text.parse() {
                    return Ok(code);
                }
            }
            Err(EvalError::ExitConversion { value: text, line })
        }
    }
}

fn eval_expression(expr: &Expression, scope: &Scope) -> Result<Value> {
    match &expr.kind {
        ExpressionKind::Term(term) => eval_term(term, scope, expr.line),
        ExpressionKind::StringLiteral(text) => Ok(Value::Str(text.clone())),
        ExpressionKind::Binary(binary) => eval_binary_expression(binary, scope, expr.line),
    }
}

fn eval_term(term: &Term, scope: &Scope, line: u32) -> Result<Value> {
    match term {
        Term::IntLiteral(literal) => {
            if !is_number(literal) {
                return Err(EvalError::InvalidIntegerLiteral {
                    literal: literal.clone(),
                    line,
                });
            }
            literal
                .parse()
                .map(Value::Int)
                .map_err(|_| EvalError::InvalidIntegerLiteral {
                    literal: literal.clone(),
                    line,
                })
        }
        Term::Identifier(name) => match scope.get(name) {
            Some(value) => Ok(value.clone()),
            None => Err(EvalError::IdentifierNotFound {
                name: name.clone(),
                line,
            }),
        },
    }
}

// Arithmetic is two's-complement 64-bit with wrapping; division truncates
// and a zero divisor is a runtime error.
fn eval_binary_expression(binary: &BinaryExpr, scope: &Scope, line: u32) -> Result<Value> {
    let operator = binary.operator();
    let (lhs, rhs) = binary.operands();
    let lhs = eval_int_operand(lhs, scope, operator, line)?;
    let rhs = eval_int_operand(rhs, scope, operator, line)?;

    let result = match operator {
        Operator::Plus => lhs.wrapping_add(rhs),
        Operator::Minus => lhs.wrapping_sub(rhs),
        Operator::Asterisk => lhs.wrapping_mul(rhs),
        Operator::Slash => {
            if rhs == 0 {
                return Err(EvalError::DivisionByZero { line });
            }
            lhs.wrapping_div(rhs)
        }
    };

    Ok(Value::Int(result))
}

fn eval_int_operand(expr: &Expression, scope: &Scope, operator: Operator, line: u32) -> Result<i64> {
    match eval_expression(expr, scope)? {
        Value::Int(n) => Ok(n),
        value => Err(EvalError::TypeMismatch {
            operator,
            type_name: value.type_name(),
            line,
        }),
    }
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
