use crate::{cursor::CursorError, model::Backing, validate::ValidationError};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Everything that can reject a list request before it reaches the store.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error(transparent)]
    Syntax(#[from] QuerySyntaxError),

    #[error(transparent)]
    UnsupportedField(#[from] UnsupportedFieldError),

    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order_by lists field '{field}' more than once")]
    DuplicateOrderField { field: String },

    #[error("page_size {requested} exceeds the maximum of {max}")]
    PageSizeTooLarge { requested: u32, max: u32 },

    #[error("filter is {len} bytes long (max {max})")]
    FilterTooLong { len: usize, max: usize },

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

///
/// QuerySyntaxError
///
/// Grammar violation at a byte offset of the filter or order_by string.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("syntax error at position {position} near '{token}': {reason}")]
pub struct QuerySyntaxError {
    pub position: usize,
    pub token: String,
    pub reason: SyntaxErrorReason,
}

impl QuerySyntaxError {
    pub(crate) fn new(
        position: usize,
        token: impl Into<String>,
        reason: SyntaxErrorReason,
    ) -> Self {
        Self {
            position,
            token: token.into(),
            reason,
        }
    }
}

///
/// SyntaxErrorReason
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SyntaxErrorReason {
    #[error("expected {expected}")]
    UnexpectedToken { expected: &'static str },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected character")]
    UnexpectedCharacter,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("malformed number")]
    InvalidNumber,

    #[error("integer literal out of range")]
    IntegerOutOfRange,

    #[error("quoted field names are not allowed")]
    QuotedIdentifier,

    #[error("comments are not allowed")]
    Comment,

    #[error("statement terminators are not allowed")]
    StatementTerminator,

    #[error("function calls are not allowed")]
    FunctionCall,

    #[error("sub-selects are not allowed")]
    SubSelect,

    #[error("expression nests deeper than {max} levels")]
    NestingTooDeep { max: usize },
}

///
/// UnsupportedFieldError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("field '{field}' cannot be used in a query: {reason}")]
pub struct UnsupportedFieldError {
    pub field: String,
    pub reason: UnsupportedFieldReason,
}

///
/// UnsupportedFieldReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum UnsupportedFieldReason {
    #[error("the resource does not declare it")]
    Unknown,

    #[error("repeated fields cannot be filtered or ordered on")]
    Repeated,
}

///
/// UnsupportedOperationError
///
/// Syntactically valid construct outside the grammar subset of the
/// resource's backing.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{operator}' is not supported on {backing}-backed resources")]
pub struct UnsupportedOperationError {
    pub operator: String,
    pub backing: Backing,
}
