use crate::token::TokenKind;
use derive_more::Display;
use std::fmt::{self, Formatter};
use strum_macros;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub line: u32,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Display, Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Term(Term),
    #[display(fmt = "\"{}\"", _0)]
    StringLiteral(String),
    Binary(BinaryExpr),
}

#[derive(Display, Debug, Clone, PartialEq)]
pub enum Term {
    IntLiteral(String),
    Identifier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Operator {
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
}

impl Operator {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Plus),
            TokenKind::Minus => Some(Self::Minus),
            TokenKind::Asterisk => Some(Self::Asterisk),
            TokenKind::Slash => Some(Self::Slash),
            _ => None,
        }
    }

    // * and / bind tighter than + and -; all four are left-associative
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 0,
            Self::Asterisk | Self::Slash => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryExpr {
    Add {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Sub {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Mul {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Div {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

impl BinaryExpr {
    pub fn new(operator: Operator, lhs: Expression, rhs: Expression) -> Self {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match operator {
            Operator::Plus => Self::Add { lhs, rhs },
            Operator::Minus => Self::Sub { lhs, rhs },
            Operator::Asterisk => Self::Mul { lhs, rhs },
            Operator::Slash => Self::Div { lhs, rhs },
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            Self::Add { .. } => Operator::Plus,
            Self::Sub { .. } => Operator::Minus,
            Self::Mul { .. } => Operator::Asterisk,
            Self::Div { .. } => Operator::Slash,
        }
    }

    pub fn operands(&self) -> (&Expression, &Expression) {
        match self {
            Self::Add { lhs, rhs }
            | Self::Sub { lhs, rhs }
            | Self::Mul { lhs, rhs }
            | Self::Div { lhs, rhs } => (lhs, rhs),
        }
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (lhs, rhs) = self.operands();
        write!(f, "({} {} {})", lhs, self.operator(), rhs)
    }
}
