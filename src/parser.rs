use crate::ast::{
    BinaryExpr, Expression, ExpressionKind, Operator, Program, Statement, StatementKind, Term,
};
use crate::token::{Token, TokenKind, TokenType};
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{expected: TokenType, got: TokenType, line: u32} = "expected {expected}, got {got} on line {line}",
    UnexpectedEof{expected: TokenType} = "expected {expected}, got end of input",
    StatementParseError{line: u32} = "no statement form matches the input on line {line}",
    ExpressionParseError{last: TokenType, line: u32} = "failed to parse expression, last token: {last} on line {line}",
    ExpressionEof = "failed to parse expression: unexpected end of input",
}

impl ParseError {
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::StatementParseError { line }
            | Self::ExpressionParseError { line, .. } => Some(*line),
            Self::UnexpectedEof { .. } | Self::ExpressionEof => None,
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();

        while self.peek(0).is_some() {
            program.statements.push(self.parse_statement()?);
        }

        Ok(program)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn skip(&mut self, count: usize) {
        self.position += count;
    }

    fn expect(&mut self, expected: TokenType) -> Result<Token, ParseError> {
        match self.consume() {
            Some(token) if token.is(expected) => Ok(token),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected,
                got: TokenType::from(&token.kind),
                line: token.line,
            }),
            None => Err(ParseError::UnexpectedEof { expected }),
        }
    }

    // Dispatches on the first two tokens; the first matching form wins.
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let line = self.peek(0).map_or(0, |token| token.line);
        let first = self.peek(0).map(|token| TokenType::from(&token.kind));
        let second = self.peek(1).map(|token| TokenType::from(&token.kind));

        match (first, second) {
            (Some(TokenType::Exit), Some(TokenType::LParen)) => {
                let expr = self.parse_call()?;
                Ok(Statement {
                    kind: StatementKind::Exit { expr },
                    line,
                })
            }
            (Some(TokenType::Print), Some(TokenType::LParen)) => {
                let expr = self.parse_call()?;
                Ok(Statement {
                    kind: StatementKind::Print { expr },
                    line,
                })
            }
            (Some(TokenType::Input), Some(TokenType::LParen)) => {
                let expr = self.parse_call()?;
                Ok(Statement {
                    kind: StatementKind::Input { expr },
                    line,
                })
            }
            (Some(TokenType::Var), Some(TokenType::Ident)) => {
                self.skip(1);
                let name = self.parse_identifier()?;
                self.expect(TokenType::Assign)?;
                let expr = self.parse_expression(0)?;
                self.expect(TokenType::Semicolon)?;
                Ok(Statement {
                    kind: StatementKind::VarDecl { name, expr },
                    line,
                })
            }
            (Some(TokenType::Ident), Some(TokenType::Assign)) => {
                let name = self.parse_identifier()?;
                self.skip(1);
                let expr = self.parse_expression(0)?;
                self.expect(TokenType::Semicolon)?;
                Ok(Statement {
                    kind: StatementKind::VarAssign { name, expr },
                    line,
                })
            }
            _ => Err(ParseError::StatementParseError { line }),
        }
    }

    // Consumes `<keyword> ( <expr> ) ;` and yields the inner expression.
    fn parse_call(&mut self) -> Result<Expression, ParseError> {
        self.skip(2);
        let expr = self.parse_expression(0)?;
        self.expect(TokenType::RParen)?;
        self.expect(TokenType::Semicolon)?;
        Ok(expr)
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        match self.consume() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: TokenType::Ident,
                got: TokenType::from(&token.kind),
                line: token.line,
            }),
            None => Err(ParseError::UnexpectedEof {
                expected: TokenType::Ident,
            }),
        }
    }

    // Precedence climbing: fold operators at or above `min_prec` into the
    // accumulated left-hand side, recursing one level tighter for the
    // right-hand side so equal-precedence chains group to the left.
    fn parse_expression(&mut self, min_prec: u8) -> Result<Expression, ParseError> {
        let mut lhs = self.parse_primary()?;

        // A string literal is a complete expression on its own; it never
        // joins the arithmetic fold.
        if let ExpressionKind::StringLiteral(_) = lhs.kind {
            return Ok(lhs);
        }

        while let Some(operator) = self
            .peek(0)
            .and_then(|token| Operator::from_token(&token.kind))
        {
            if operator.precedence() < min_prec {
                break;
            }
            self.skip(1);
            let rhs = self.parse_expression(operator.precedence() + 1)?;
            let line = lhs.line;
            lhs = Expression {
                kind: ExpressionKind::Binary(BinaryExpr::new(operator, lhs, rhs)),
                line,
            };
        }

        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        match self.consume() {
            Some(Token {
                kind: TokenKind::Int(literal),
                line,
            }) => Ok(Expression {
                kind: ExpressionKind::Term(Term::IntLiteral(literal)),
                line,
            }),
            Some(Token {
                kind: TokenKind::Ident(name),
                line,
            }) => Ok(Expression {
                kind: ExpressionKind::Term(Term::Identifier(name)),
                line,
            }),
            Some(Token {
                kind: TokenKind::Str(text),
                line,
            }) => Ok(Expression {
                kind: ExpressionKind::StringLiteral(text),
                line,
            }),
            Some(token) => Err(ParseError::ExpressionParseError {
                last: TokenType::from(&token.kind),
                line: token.line,
            }),
            None => Err(ParseError::ExpressionEof),
        }
    }
}
