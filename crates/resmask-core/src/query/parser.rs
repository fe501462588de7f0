//! Recursive-descent parser for the restricted filter and order_by grammar.
//!
//! Precedence, loosest first: `OR`, `AND`, `NOT`, predicate, `+ -`,
//! `* / %`, unary `-`. A parenthesis at predicate position may open either
//! a boolean group or an arithmetic operand, so the parser tries the group
//! first and falls back to an operand.

use crate::query::{
    ast::{ArithOp, CompareOp, FilterExpr, Literal, Operand, PatternOp},
    error::{QuerySyntaxError, SyntaxErrorReason},
    lexer::{Keyword, Symbol, Token, TokenKind, tokenize},
    order::{Direction, OrderTerm},
};

/// Deepest allowed nesting of groups, `NOT` chains and unary operators.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Parse a filter string into its AST.
pub(crate) fn parse_filter(input: &str) -> Result<FilterExpr, QuerySyntaxError> {
    let mut parser = Parser::new(tokenize(input)?);
    let expr = parser.parse_or()?;
    parser.expect_end("end of filter")?;

    Ok(expr)
}

/// Parse a comma-separated `field [ASC|DESC]` list. Blank input is empty.
pub(crate) fn parse_order_by(input: &str) -> Result<Vec<OrderTerm>, QuerySyntaxError> {
    let mut parser = Parser::new(tokenize(input)?);
    let mut terms = Vec::new();

    if parser.peek_kind() == &TokenKind::End {
        return Ok(terms);
    }

    loop {
        let field = match &parser.peek().kind {
            TokenKind::Ident(name) => name.clone(),
            _ => return Err(parser.unexpected("a field name")),
        };
        parser.advance();

        let direction = match parser.peek_kind() {
            TokenKind::Keyword(Keyword::Asc) => {
                parser.advance();
                Direction::Asc
            }
            TokenKind::Keyword(Keyword::Desc) => {
                parser.advance();
                Direction::Desc
            }
            _ => Direction::Asc,
        };
        terms.push(OrderTerm { field, direction });

        match parser.peek_kind() {
            TokenKind::Comma => parser.advance(),
            TokenKind::End => return Ok(terms),
            _ => return Err(parser.unexpected("',' or end of order_by")),
        }
    }
}

///
/// Parser
///

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // Run `parse` one nesting level deeper. The depth is restored on both
    // outcomes so a backtracking caller sees it unchanged.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, QuerySyntaxError>,
    ) -> Result<T, QuerySyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let token = self.peek();
            return Err(QuerySyntaxError::new(
                token.position,
                token.text.clone(),
                SyntaxErrorReason::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                },
            ));
        }

        self.depth += 1;
        let out = parse(self);
        self.depth -= 1;

        out
    }

    // The token stream always ends with `End`, and `advance` never moves
    // past it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_next_kind(&self) -> &TokenKind {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)].kind
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.peek_kind() == &TokenKind::Keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(
        &mut self,
        keyword: Keyword,
        expected: &'static str,
    ) -> Result<(), QuerySyntaxError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect(
        &mut self,
        kind: &TokenKind,
        expected: &'static str,
    ) -> Result<(), QuerySyntaxError> {
        if self.peek_kind() == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_end(&self, expected: &'static str) -> Result<(), QuerySyntaxError> {
        if self.peek_kind() == &TokenKind::End {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> QuerySyntaxError {
        let token = self.peek();
        let reason = match token.kind {
            TokenKind::End => SyntaxErrorReason::UnexpectedEnd { expected },
            TokenKind::Keyword(Keyword::Select) => SyntaxErrorReason::SubSelect,
            _ => SyntaxErrorReason::UnexpectedToken { expected },
        };

        QuerySyntaxError::new(token.position, token.text.clone(), reason)
    }

    //
    // Boolean layer
    //

    fn parse_or(&mut self) -> Result<FilterExpr, QuerySyntaxError> {
        let mut children = vec![self.parse_and()?];
        while self.eat_keyword(Keyword::Or) {
            children.push(self.parse_and()?);
        }

        Ok(collapse(children, FilterExpr::Or))
    }

    fn parse_and(&mut self) -> Result<FilterExpr, QuerySyntaxError> {
        let mut children = vec![self.parse_not()?];
        while self.eat_keyword(Keyword::And) {
            children.push(self.parse_not()?);
        }

        Ok(collapse(children, FilterExpr::And))
    }

    fn parse_not(&mut self) -> Result<FilterExpr, QuerySyntaxError> {
        if self.eat_keyword(Keyword::Not) {
            let inner = self.nested(Self::parse_not)?;
            return Ok(FilterExpr::Not(Box::new(inner)));
        }

        self.parse_predicate()
    }

    fn parse_predicate(&mut self) -> Result<FilterExpr, QuerySyntaxError> {
        if self.peek_kind() != &TokenKind::LParen {
            return self.parse_comparison();
        }

        let start = self.pos;
        match self.parse_group() {
            Ok(expr) => Ok(expr),
            Err(group_err) => {
                self.pos = start;
                self.parse_comparison()
                    .map_err(|operand_err| furthest(group_err, operand_err))
            }
        }
    }

    fn parse_group(&mut self) -> Result<FilterExpr, QuerySyntaxError> {
        self.nested(|parser| {
            parser.advance();
            let expr = parser.parse_or()?;
            parser.expect(&TokenKind::RParen, "')'")?;

            Ok(expr)
        })
    }

    fn parse_comparison(&mut self) -> Result<FilterExpr, QuerySyntaxError> {
        let operand = self.parse_operand()?;

        if let TokenKind::Symbol(symbol) = *self.peek_kind()
            && let Some(op) = compare_op(symbol)
        {
            self.advance();
            let rhs = self.parse_operand()?;
            return Ok(FilterExpr::Compare {
                lhs: operand,
                op,
                rhs,
            });
        }

        if self.eat_keyword(Keyword::Is) {
            let negated = self.eat_keyword(Keyword::Not);
            self.expect_keyword(Keyword::Null, "NULL")?;
            return Ok(FilterExpr::IsNull { operand, negated });
        }

        let negated = self.eat_keyword(Keyword::Not);
        match *self.peek_kind() {
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                let list = self.parse_list()?;
                Ok(FilterExpr::In {
                    operand,
                    negated,
                    list,
                })
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_operand()?;
                self.expect_keyword(Keyword::And, "AND")?;
                let high = self.parse_operand()?;
                Ok(FilterExpr::Between {
                    operand,
                    negated,
                    low,
                    high,
                })
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.parse_pattern(operand, PatternOp::Like, negated)
            }
            TokenKind::Keyword(Keyword::Match) if !negated => {
                self.parse_pattern(operand, PatternOp::Match, false)
            }
            TokenKind::Keyword(Keyword::Regexp) if !negated => {
                self.parse_pattern(operand, PatternOp::Regexp, false)
            }
            _ if negated => Err(self.unexpected("IN, BETWEEN or LIKE")),
            _ => Err(self.unexpected("a comparison operator or predicate")),
        }
    }

    fn parse_pattern(
        &mut self,
        operand: Operand,
        op: PatternOp,
        negated: bool,
    ) -> Result<FilterExpr, QuerySyntaxError> {
        self.advance();
        let pattern = self.parse_operand()?;

        Ok(FilterExpr::Pattern {
            operand,
            op,
            negated,
            pattern,
        })
    }

    fn parse_list(&mut self) -> Result<Vec<Operand>, QuerySyntaxError> {
        self.expect(&TokenKind::LParen, "'('")?;

        let mut items = vec![self.parse_operand()?];
        while self.peek_kind() == &TokenKind::Comma {
            self.advance();
            items.push(self.parse_operand()?);
        }
        self.expect(&TokenKind::RParen, "',' or ')'")?;

        Ok(items)
    }

    //
    // Operand layer
    //

    fn parse_operand(&mut self) -> Result<Operand, QuerySyntaxError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Symbol(Symbol::Plus) => ArithOp::Add,
                TokenKind::Symbol(Symbol::Minus) => ArithOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = arith(op, lhs, rhs);
        }
    }

    fn parse_term(&mut self) -> Result<Operand, QuerySyntaxError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Symbol(Symbol::Star) => ArithOp::Mul,
                TokenKind::Symbol(Symbol::Slash) => ArithOp::Div,
                TokenKind::Symbol(Symbol::Percent) => ArithOp::Rem,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = arith(op, lhs, rhs);
        }
    }

    fn parse_unary(&mut self) -> Result<Operand, QuerySyntaxError> {
        if self.peek_kind() == &TokenKind::Symbol(Symbol::Minus) {
            self.advance();
            let inner = self.nested(Self::parse_unary)?;
            return Ok(Operand::Neg(Box::new(inner)));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Operand, QuerySyntaxError> {
        let token = self.peek().clone();

        let operand = match token.kind {
            TokenKind::Ident(name) => {
                if self.peek_next_kind() == &TokenKind::LParen {
                    return Err(QuerySyntaxError::new(
                        token.position,
                        name,
                        SyntaxErrorReason::FunctionCall,
                    ));
                }
                Operand::Field(name)
            }
            TokenKind::Text(value) => Operand::Literal(Literal::Text(value)),
            TokenKind::Integer(value) => Operand::Literal(Literal::Int(value)),
            TokenKind::Decimal(value) => Operand::Literal(Literal::Decimal(value)),
            TokenKind::Keyword(Keyword::True) => Operand::Literal(Literal::Bool(true)),
            TokenKind::Keyword(Keyword::False) => Operand::Literal(Literal::Bool(false)),
            TokenKind::Keyword(Keyword::Null) => Operand::Literal(Literal::Null),
            TokenKind::LParen => {
                return self.nested(|parser| {
                    parser.advance();
                    let inner = parser.parse_operand()?;
                    parser.expect(&TokenKind::RParen, "')'")?;

                    Ok(inner)
                });
            }
            _ => return Err(self.unexpected("a field or literal")),
        };
        self.advance();

        Ok(operand)
    }
}

const fn compare_op(symbol: Symbol) -> Option<CompareOp> {
    match symbol {
        Symbol::Eq | Symbol::EqEq => Some(CompareOp::Eq),
        Symbol::Ne | Symbol::BangEq => Some(CompareOp::Ne),
        Symbol::Lt => Some(CompareOp::Lt),
        Symbol::Lte => Some(CompareOp::Lte),
        Symbol::Gt => Some(CompareOp::Gt),
        Symbol::Gte => Some(CompareOp::Gte),
        Symbol::Plus | Symbol::Minus | Symbol::Star | Symbol::Slash | Symbol::Percent => None,
    }
}

fn arith(op: ArithOp, lhs: Operand, rhs: Operand) -> Operand {
    Operand::Arith {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn collapse(
    mut children: Vec<FilterExpr>,
    group: fn(Vec<FilterExpr>) -> FilterExpr,
) -> FilterExpr {
    if children.len() == 1 {
        children.remove(0)
    } else {
        group(children)
    }
}

// Of two failed parse attempts, report the one that got further.
fn furthest(a: QuerySyntaxError, b: QuerySyntaxError) -> QuerySyntaxError {
    if b.position >= a.position { b } else { a }
}
