//! Schema-aware filter validation.
//!
//! Runs after parsing. Resolves field references against the resource
//! model, checks enum literals against their domains and enforces the
//! grammar subset selected by the resource's backing.

use crate::{
    model::{Backing, FieldModel, resource::ResourceModel},
    query::{
        QueryError,
        ast::{CompareOp, FilterExpr, Literal, Operand},
        error::{UnsupportedFieldError, UnsupportedFieldReason, UnsupportedOperationError},
    },
    validate::ValidationError,
};

/// Resolve a queried field name to a filterable, orderable field.
pub(crate) fn resolve_field(
    model: &ResourceModel,
    name: &str,
) -> Result<&'static FieldModel, UnsupportedFieldError> {
    let unsupported = |reason| UnsupportedFieldError {
        field: name.to_string(),
        reason,
    };

    let field = model
        .field(name)
        .ok_or_else(|| unsupported(UnsupportedFieldReason::Unknown))?;
    if field.is_repeated() {
        return Err(unsupported(UnsupportedFieldReason::Repeated));
    }

    Ok(field)
}

/// Validate a parsed filter against `model`.
pub(crate) fn validate_filter(model: &ResourceModel, expr: &FilterExpr) -> Result<(), QueryError> {
    for operand in expr.operands() {
        let mut names = Vec::new();
        operand.visit_fields(&mut names);
        for name in names {
            resolve_field(model, name)?;
        }
    }

    check_enum_literals(model, expr)?;

    if model.backing == Backing::View {
        check_view_shape(expr)?;
    }

    match expr {
        FilterExpr::And(children) | FilterExpr::Or(children) => {
            for child in children {
                validate_filter(model, child)?;
            }
            Ok(())
        }
        FilterExpr::Not(inner) => validate_filter(model, inner),
        _ => Ok(()),
    }
}

fn check_enum_literals(model: &ResourceModel, expr: &FilterExpr) -> Result<(), ValidationError> {
    match expr {
        FilterExpr::Compare { lhs, rhs, .. } => {
            check_enum_pair(model, lhs, rhs)?;
            check_enum_pair(model, rhs, lhs)
        }
        FilterExpr::In { operand, list, .. } => {
            for item in list {
                check_enum_pair(model, operand, item)?;
            }
            Ok(())
        }
        FilterExpr::Between {
            operand, low, high, ..
        } => {
            check_enum_pair(model, operand, low)?;
            check_enum_pair(model, operand, high)
        }
        _ => Ok(()),
    }
}

// When `side` is an enum field, `other` must be a quoted member name.
fn check_enum_pair(
    model: &ResourceModel,
    side: &Operand,
    other: &Operand,
) -> Result<(), ValidationError> {
    let Some(field) = side.as_field().and_then(|name| model.field(name)) else {
        return Ok(());
    };
    let Some(variants) = field.kind.enum_variants() else {
        return Ok(());
    };

    match other {
        Operand::Field(_) => Ok(()),
        Operand::Literal(Literal::Text(member)) => {
            if variants.contains(&member.as_str()) {
                Ok(())
            } else {
                Err(ValidationError::UnknownEnumMember {
                    field: field.name.to_string(),
                    member: member.clone(),
                })
            }
        }
        _ => Err(ValidationError::InvalidEnumLiteral {
            field: field.name.to_string(),
            found: other.to_string(),
        }),
    }
}

// View-backed resources accept `field = literal` joined by AND, nothing else.
fn check_view_shape(expr: &FilterExpr) -> Result<(), UnsupportedOperationError> {
    let unsupported = |operator: String| UnsupportedOperationError {
        operator,
        backing: Backing::View,
    };

    match expr {
        FilterExpr::And(_) => Ok(()),
        FilterExpr::Compare {
            lhs,
            op: CompareOp::Eq,
            rhs,
        } => {
            if let Some(operator) = arithmetic_operator(lhs).or_else(|| arithmetic_operator(rhs)) {
                return Err(unsupported(operator.to_string()));
            }

            match (lhs, rhs) {
                (Operand::Field(_), Operand::Literal(_)) => Ok(()),
                (Operand::Field(_), _) => Err(unsupported("field-to-field =".to_string())),
                _ => Err(unsupported("literal-first =".to_string())),
            }
        }
        other => Err(unsupported(other.operator())),
    }
}

fn arithmetic_operator(operand: &Operand) -> Option<&'static str> {
    match operand {
        Operand::Arith { op, .. } => Some(op.symbol()),
        Operand::Neg(_) => Some("unary -"),
        Operand::Field(_) | Operand::Literal(_) => None,
    }
}
