use crate::token::{Token, TokenKind};
use custom_error::custom_error;
use lazy_static::lazy_static;
use std::collections::HashMap;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub LexError

    UnknownCharacter{ch: char, line: u32} = "unrecognized character '{ch}' on line {line}",
    UnterminatedString{line: u32} = "unterminated string literal on line {line}",
    UnterminatedBlockComment{line: u32} = "unterminated block comment starting on line {line}",
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnknownCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::UnterminatedBlockComment { line } => *line,
        }
    }
}

lazy_static! {
    static ref PUNCTUATION: HashMap<u8, TokenKind> = {
        let mut table = HashMap::new();
        table.insert(b';', TokenKind::Semicolon);
        table.insert(b'+', TokenKind::Plus);
        table.insert(b'-', TokenKind::Minus);
        table.insert(b'*', TokenKind::Asterisk);
        table.insert(b'/', TokenKind::Slash);
        table.insert(b'=', TokenKind::Assign);
        table.insert(b'(', TokenKind::LParen);
        table.insert(b')', TokenKind::RParen);
        table.insert(b'{', TokenKind::LBrace);
        table.insert(b'}', TokenKind::RBrace);
        table.insert(b'.', TokenKind::Dot);
        table
    };
}

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    line: u32,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            self.skip_whitespace();
            if self.ch == b'/' && (self.peek_char() == b'/' || self.peek_char() == b'*') {
                self.skip_comment()?;
                continue;
            }
            break;
        }

        if self.ch == 0 {
            return Ok(None);
        }

        let line = self.line;

        if is_letter(self.ch) {
            let word = self.read_word();
            let kind = TokenKind::from(word);
            return Ok(Some(Token::new(kind, line)));
        }
        if self.ch.is_ascii_digit() {
            let number = self.read_number().to_owned();
            return Ok(Some(Token::new(TokenKind::Int(number), line)));
        }
        if self.ch == b'"' {
            let literal = self.read_string()?;
            return Ok(Some(Token::new(TokenKind::Str(literal), line)));
        }

        match PUNCTUATION.get(&self.ch) {
            Some(kind) => {
                let token = Token::new(kind.clone(), line);
                self.read_char();
                Ok(Some(token))
            }
            None => Err(LexError::UnknownCharacter {
                ch: self.ch as char,
                line,
            }),
        }
    }

    fn read_word(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_alphanumeric() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    // The opening quote has been seen; the interior text becomes the payload
    // and the closing quote is dropped. No escape processing.
    fn read_string(&mut self) -> Result<String, LexError> {
        let line = self.line;
        self.read_char();
        let start = self.position;
        while self.ch != b'"' {
            if self.ch == 0 || self.ch == b'\n' {
                return Err(LexError::UnterminatedString { line });
            }
            self.read_char();
        }
        let literal = self.input[start..self.position].to_owned();
        self.read_char();
        Ok(literal)
    }

    fn skip_comment(&mut self) -> Result<(), LexError> {
        let line = self.line;
        self.read_char();
        if self.ch == b'/' {
            while self.ch != b'\n' && self.ch != 0 {
                self.read_char();
            }
        } else {
            self.read_char();
            loop {
                if self.ch == 0 {
                    return Err(LexError::UnterminatedBlockComment { line });
                }
                if self.ch == b'*' && self.peek_char() == b'/' {
                    self.read_char();
                    self.read_char();
                    break;
                }
                if self.ch == b'\n' {
                    self.line += 1;
                }
                self.read_char();
            }
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            if self.ch == b'\n' {
                self.line += 1;
            }
            self.read_char();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::TokenType;

    #[test]
    fn test_tokenize() {
        let input = "var count = 50;
count = count + 1;
print(count * 2);
exit(0);
input(count);
{ } . -
"
        .to_owned();

        let cases = [
            (TokenType::Var, 1),
            (TokenType::Ident, 1),
            (TokenType::Assign, 1),
            (TokenType::Int, 1),
            (TokenType::Semicolon, 1),
            (TokenType::Ident, 2),
            (TokenType::Assign, 2),
            (TokenType::Ident, 2),
            (TokenType::Plus, 2),
            (TokenType::Int, 2),
            (TokenType::Semicolon, 2),
            (TokenType::Print, 3),
            (TokenType::LParen, 3),
            (TokenType::Ident, 3),
            (TokenType::Asterisk, 3),
            (TokenType::Int, 3),
            (TokenType::RParen, 3),
            (TokenType::Semicolon, 3),
            (TokenType::Exit, 4),
            (TokenType::LParen, 4),
            (TokenType::Int, 4),
            (TokenType::RParen, 4),
            (TokenType::Semicolon, 4),
            (TokenType::Input, 5),
            (TokenType::LParen, 5),
            (TokenType::Ident, 5),
            (TokenType::RParen, 5),
            (TokenType::Semicolon, 5),
            (TokenType::LBrace, 6),
            (TokenType::RBrace, 6),
            (TokenType::Dot, 6),
            (TokenType::Minus, 6),
        ];

        let tokens = Lexer::new(input).tokenize().expect("lex errors found");

        assert_eq!(tokens.len(), cases.len());
        for (token, (token_type, expected_line)) in tokens.iter().zip(cases.iter()) {
            assert!(token.is(*token_type), "token {:?}", token);
            assert_eq!(token.line, *expected_line, "token {:?}", token);
        }
    }

    #[test]
    fn test_single_tokens() {
        let cases = [
            ("exit", TokenType::Exit),
            ("var", TokenType::Var),
            ("print", TokenType::Print),
            ("input", TokenType::Input),
            ("identifier", TokenType::Ident),
            ("5", TokenType::Int),
            (";", TokenType::Semicolon),
            ("+", TokenType::Plus),
            ("-", TokenType::Minus),
            ("*", TokenType::Asterisk),
            ("/", TokenType::Slash),
            ("=", TokenType::Assign),
            ("(", TokenType::LParen),
            (")", TokenType::RParen),
            ("{", TokenType::LBrace),
            ("}", TokenType::RBrace),
            (".", TokenType::Dot),
        ];

        for (input, token_type) in cases.iter() {
            let tokens = Lexer::new((*input).to_owned())
                .tokenize()
                .expect("lex errors found");
            assert_eq!(tokens.len(), 1, "input {:?}", input);
            assert!(tokens[0].is(*token_type), "input {:?}", input);
        }
    }

    #[test]
    fn test_identifier_payload() {
        let tokens = Lexer::new("identifier".to_owned())
            .tokenize()
            .expect("lex errors found");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Ident("identifier".to_owned()));
    }

    #[test]
    fn test_string_literal() {
        let tokens = Lexer::new("\"some text\"".to_owned())
            .tokenize()
            .expect("lex errors found");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Str("some text".to_owned()));
    }

    #[test]
    fn test_comments_produce_no_tokens() {
        let cases = ["// one line comment\n", "/* first line\nsecond line */"];
        for input in cases.iter() {
            let tokens = Lexer::new((*input).to_owned())
                .tokenize()
                .expect("lex errors found");
            assert_eq!(tokens.len(), 0, "input {:?}", input);
        }
    }

    #[test]
    fn test_block_comment_tracks_lines() {
        let tokens = Lexer::new("/* first\nsecond */ var".to_owned())
            .tokenize()
            .expect("lex errors found");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            Lexer::new("\"no closing quote".to_owned()).tokenize(),
            Err(LexError::UnterminatedString { line: 1 })
        );
        assert_eq!(
            Lexer::new("var x = \"broken\nprint(x);".to_owned()).tokenize(),
            Err(LexError::UnterminatedString { line: 1 })
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(
            Lexer::new("/* never closed".to_owned()).tokenize(),
            Err(LexError::UnterminatedBlockComment { line: 1 })
        );
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(
            Lexer::new("var x = 5;\nvar y = $;".to_owned()).tokenize(),
            Err(LexError::UnknownCharacter { ch: '$', line: 2 })
        );
    }
}
