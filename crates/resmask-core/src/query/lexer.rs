use crate::query::error::{QuerySyntaxError, SyntaxErrorReason};

///
/// Token
///
/// One lexeme of a filter or order_by string. `position` is the byte
/// offset of its first character.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub position: usize,
    pub text: String,
}

///
/// TokenKind
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Keyword(Keyword),
    Text(String),
    Integer(i64),
    Decimal(String),
    Symbol(Symbol),
    LParen,
    RParen,
    Comma,
    End,
}

///
/// Keyword
/// Reserved words, matched case-insensitively.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Keyword {
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Match,
    Regexp,
    Is,
    Null,
    True,
    False,
    Asc,
    Desc,
    Select,
}

impl Keyword {
    fn parse(word: &str) -> Option<Self> {
        let kw = match word.to_ascii_uppercase().as_str() {
            "AND" => Self::And,
            "OR" => Self::Or,
            "NOT" => Self::Not,
            "IN" => Self::In,
            "BETWEEN" => Self::Between,
            "LIKE" => Self::Like,
            "MATCH" => Self::Match,
            "REGEXP" => Self::Regexp,
            "IS" => Self::Is,
            "NULL" => Self::Null,
            "TRUE" => Self::True,
            "FALSE" => Self::False,
            "ASC" => Self::Asc,
            "DESC" => Self::Desc,
            "SELECT" => Self::Select,
            _ => return None,
        };

        Some(kw)
    }
}

///
/// Symbol
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Symbol {
    Eq,
    EqEq,
    Ne,
    BangEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

/// Whether `word` lexes as a keyword rather than a field name.
pub(crate) fn is_keyword(word: &str) -> bool {
    Keyword::parse(word).is_some()
}

/// Split `input` into tokens, always terminated by `TokenKind::End`.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, QuerySyntaxError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, QuerySyntaxError> {
        while let Some(byte) = self.peek(0) {
            let start = self.pos;

            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'\'' => self.string(start)?,
                b'"' | b'`' => {
                    return Err(self.error(start, 1, SyntaxErrorReason::QuotedIdentifier));
                }
                b';' => {
                    return Err(self.error(start, 1, SyntaxErrorReason::StatementTerminator));
                }
                b'#' => return Err(self.error(start, 1, SyntaxErrorReason::Comment)),
                b'-' if self.peek(1) == Some(b'-') => {
                    return Err(self.error(start, 2, SyntaxErrorReason::Comment));
                }
                b'/' if self.peek(1) == Some(b'*') => {
                    return Err(self.error(start, 2, SyntaxErrorReason::Comment));
                }
                b'0'..=b'9' => self.number(start)?,
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.word(start),
                b'(' => self.single(TokenKind::LParen),
                b')' => self.single(TokenKind::RParen),
                b',' => self.single(TokenKind::Comma),
                _ => self.symbol(start)?,
            }
        }

        let end = self.input.len();
        self.tokens.push(Token {
            kind: TokenKind::End,
            position: end,
            text: String::new(),
        });

        Ok(self.tokens)
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token {
            kind,
            position: start,
            text: self.input[start..self.pos].to_string(),
        });
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.pos;
        self.pos += 1;
        self.push(kind, start);
    }

    // Single-quoted literal; a doubled quote is an escaped quote.
    fn string(&mut self, start: usize) -> Result<(), QuerySyntaxError> {
        self.pos += 1;
        let mut value = String::new();
        let mut chunk = self.pos;

        loop {
            match self.peek(0) {
                None => {
                    return Err(QuerySyntaxError::new(
                        start,
                        &self.input[start..],
                        SyntaxErrorReason::UnterminatedString,
                    ));
                }
                Some(b'\'') if self.peek(1) == Some(b'\'') => {
                    value.push_str(&self.input[chunk..self.pos]);
                    value.push('\'');
                    self.pos += 2;
                    chunk = self.pos;
                }
                Some(b'\'') => {
                    value.push_str(&self.input[chunk..self.pos]);
                    self.pos += 1;
                    self.push(TokenKind::Text(value), start);
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<(), QuerySyntaxError> {
        self.consume_digits();

        let decimal =
            self.peek(0) == Some(b'.') && self.peek(1).is_some_and(|b| b.is_ascii_digit());
        if decimal {
            self.pos += 1;
            self.consume_digits();
        }

        if self
            .peek(0)
            .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'.')
        {
            self.consume_word();
            return Err(QuerySyntaxError::new(
                start,
                &self.input[start..self.pos],
                SyntaxErrorReason::InvalidNumber,
            ));
        }

        let text = &self.input[start..self.pos];
        let kind = if decimal {
            TokenKind::Decimal(text.to_string())
        } else {
            let value = text.parse::<i64>().map_err(|_| {
                QuerySyntaxError::new(start, text, SyntaxErrorReason::IntegerOutOfRange)
            })?;
            TokenKind::Integer(value)
        };
        self.push(kind, start);

        Ok(())
    }

    fn word(&mut self, start: usize) {
        self.consume_word();
        let text = &self.input[start..self.pos];
        let kind = Keyword::parse(text)
            .map_or_else(|| TokenKind::Ident(text.to_string()), TokenKind::Keyword);
        self.push(kind, start);
    }

    fn symbol(&mut self, start: usize) -> Result<(), QuerySyntaxError> {
        let (symbol, len) = match (self.peek(0), self.peek(1)) {
            (Some(b'='), Some(b'=')) => (Symbol::EqEq, 2),
            (Some(b'='), _) => (Symbol::Eq, 1),
            (Some(b'!'), Some(b'=')) => (Symbol::BangEq, 2),
            (Some(b'<'), Some(b'>')) => (Symbol::Ne, 2),
            (Some(b'<'), Some(b'=')) => (Symbol::Lte, 2),
            (Some(b'<'), _) => (Symbol::Lt, 1),
            (Some(b'>'), Some(b'=')) => (Symbol::Gte, 2),
            (Some(b'>'), _) => (Symbol::Gt, 1),
            (Some(b'+'), _) => (Symbol::Plus, 1),
            (Some(b'-'), _) => (Symbol::Minus, 1),
            (Some(b'*'), _) => (Symbol::Star, 1),
            (Some(b'/'), _) => (Symbol::Slash, 1),
            (Some(b'%'), _) => (Symbol::Percent, 1),
            _ => {
                let len = self.input[start..].chars().next().map_or(1, char::len_utf8);
                return Err(self.error(start, len, SyntaxErrorReason::UnexpectedCharacter));
            }
        };

        self.pos += len;
        self.push(TokenKind::Symbol(symbol), start);

        Ok(())
    }

    fn consume_digits(&mut self) {
        while self.peek(0).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn consume_word(&mut self) {
        while self
            .peek(0)
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }
    }

    fn error(&self, start: usize, len: usize, reason: SyntaxErrorReason) -> QuerySyntaxError {
        let end = (start + len).min(self.input.len());
        QuerySyntaxError::new(start, &self.input[start..end], reason)
    }
}
