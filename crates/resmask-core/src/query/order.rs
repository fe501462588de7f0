use crate::{
    model::resource::ResourceModel,
    query::{QueryError, validate::resolve_field},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

///
/// OrderTerm
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderTerm {
    pub field: String,
    pub direction: Direction,
}

impl OrderTerm {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

impl fmt::Display for OrderTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.keyword())
    }
}

/// Check order terms against `model`: every field must be a declared,
/// non-repeated field, listed at most once.
pub(crate) fn validate_order(model: &ResourceModel, terms: &[OrderTerm]) -> Result<(), QueryError> {
    let mut seen = BTreeSet::new();
    for term in terms {
        resolve_field(model, &term.field)?;
        if !seen.insert(term.field.as_str()) {
            return Err(QueryError::DuplicateOrderField {
                field: term.field.clone(),
            });
        }
    }

    Ok(())
}
