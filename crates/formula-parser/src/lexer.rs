use crate::error::ParseError;
use crate::token::Token;
use formula_model::Position;

/// Turns a formula body (the text after the leading `=`) into a stream of
/// [`Token`]s, one at a time. Whitespace between tokens is skipped; nothing
/// else in the grammar is whitespace-sensitive.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    pub fn byte_pos(&self) -> usize {
        self.pos
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        match self.peek_char() {
            None => Ok(Token::Eof),
            Some(c) if c.is_ascii_digit() => self.lex_number(),
            Some(c) if c.is_ascii_uppercase() => self.lex_cell_ref(),
            Some('+') => {
                self.bump();
                Ok(Token::Plus)
            }
            Some('-') => {
                self.bump();
                Ok(Token::Minus)
            }
            Some('*') => {
                self.bump();
                Ok(Token::Star)
            }
            Some('/') => {
                self.bump();
                Ok(Token::Slash)
            }
            Some('(') => {
                self.bump();
                Ok(Token::LParen)
            }
            Some(')') => {
                self.bump();
                Ok(Token::RParen)
            }
            Some(c) => Err(ParseError::UnexpectedChar(c, start)),
        }
    }

    fn lex_number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.consume_digits();
        if self.peek_char() == Some('.') {
            let dot = self.pos;
            self.bump();
            if !matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
                return Err(ParseError::MalformedNumber(dot));
            }
            self.consume_digits();
        }
        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ParseError::MalformedNumber(start))
    }

    fn lex_cell_ref(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        while matches!(self.peek_char(), Some(c) if c.is_ascii_uppercase()) {
            self.bump();
        }
        if !matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            return match self.peek_char() {
                Some(c) => Err(ParseError::UnexpectedChar(c, self.pos)),
                None => Err(ParseError::UnexpectedEnd),
            };
        }
        self.consume_digits();
        let text = &self.input[start..self.pos];
        Ok(Token::CellRef(Position::parse(text), text.to_string()))
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
    }
}
