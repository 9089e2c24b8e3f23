use crate::ast::{BinOp, Expr};
use crate::error::ParseError;
use crate::formula::Formula;
use crate::lexer::Lexer;
use crate::token::Token;

/// Recursive-descent parser over the grammar:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := factor (('*' | '/') factor)*
/// factor  := '-' factor | primary
/// primary := NUMBER | CELLREF | '(' expr ')'
/// ```
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.current {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_factor()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        if self.current == Token::Minus {
            self.advance()?;
            let inner = self.parse_factor()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance()? {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::CellRef(pos, text) => Ok(Expr::Ref(pos, text)),
            Token::LParen => {
                let inner = self.parse_expr()?;
                match self.current {
                    Token::RParen => {
                        self.advance()?;
                        Ok(inner)
                    }
                    _ => Err(ParseError::MissingCloseParen(self.lexer.byte_pos())),
                }
            }
            Token::Eof => Err(ParseError::UnexpectedEnd),
            other => Err(ParseError::TrailingInput(format!("{other:?}"))),
        }
    }
}

/// Parses a formula body (the text *after* the leading `=`) into a
/// [`Formula`] ready for evaluation.
pub fn parse_formula(text: &str) -> Result<Formula, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let mut parser = Parser::new(text)?;
    let expr = parser.parse_expr()?;
    if parser.current != Token::Eof {
        return Err(ParseError::TrailingInput(format!("{:?}", parser.current)));
    }
    Ok(Formula::new(expr))
}
