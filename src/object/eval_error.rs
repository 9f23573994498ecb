use crate::ast::Operator;
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub EvalError

    IdentifierNotFound{name: String, line: u32} = "invalid identifier {name} on line {line}",
    Redeclaration{name: String, line: u32} = "reinitialization of variable {name} is not allowed on line {line}",
    AssignmentToUndeclared{name: String, line: u32} = "cannot assign to undeclared variable {name} on line {line}",
    TypeMismatch{operator: Operator, type_name: &'static str, line: u32} = "operator {operator} expects INT operands, got {type_name} on line {line}",
    InvalidIntegerLiteral{literal: String, line: u32} = "literal {literal} is not a valid integer on line {line}",
    ExitConversion{value: String, line: u32} = "cannot convert string \"{value}\" into an exit code on line {line}",
    DivisionByZero{line: u32} = "division by zero on line {line}",
    NotImplemented{feature: &'static str, line: u32} = "{feature} is not implemented, used on line {line}",
}

impl EvalError {
    pub fn line(&self) -> u32 {
        match self {
            Self::IdentifierNotFound { line, .. }
            | Self::Redeclaration { line, .. }
            | Self::AssignmentToUndeclared { line, .. }
            | Self::TypeMismatch { line, .. }
            | Self::InvalidIntegerLiteral { line, .. }
            | Self::ExitConversion { line, .. }
            | Self::DivisionByZero { line }
            | Self::NotImplemented { line, .. } => *line,
        }
    }
}
