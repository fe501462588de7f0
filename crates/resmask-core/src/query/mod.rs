//! List query translation.
//!
//! Parses and validates the restricted filter / order_by grammar and
//! packages pagination parameters into a descriptor for an external store.
//! Table-backed resources accept the full grammar; view-backed resources
//! accept `field = literal` joined by `AND` only.

pub mod ast;
mod error;
mod lexer;
pub mod order;
mod parser;
mod policy;
mod translate;
mod validate;


// re-exports
pub use ast::{ArithOp, CompareOp, FilterExpr, Literal, Operand, PatternOp};
pub use error::{
    QueryError, QuerySyntaxError, SyntaxErrorReason, UnsupportedFieldError,
    UnsupportedFieldReason, UnsupportedOperationError,
};
pub use order::{Direction, OrderTerm};
pub use policy::{ListPolicy, ListQuery};
pub use translate::{QueryDescriptor, translate};

pub(crate) use lexer::is_keyword;

/// Parse a filter string without consulting any model.
pub fn parse_filter(input: &str) -> Result<FilterExpr, QuerySyntaxError> {
    parser::parse_filter(input)
}

/// Parse an order_by string without consulting any model.
pub fn parse_order_by(input: &str) -> Result<Vec<OrderTerm>, QuerySyntaxError> {
    parser::parse_order_by(input)
}
