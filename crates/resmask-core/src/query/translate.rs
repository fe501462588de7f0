use crate::{
    cursor::{CursorError, PageToken, QuerySignature},
    model::{Backing, resource::ResourceModel},
    obs::sink::{MetricsEvent, record},
    query::{
        QueryError,
        ast::FilterExpr,
        order::{OrderTerm, validate_order},
        parser::{parse_filter, parse_order_by},
        policy::{ListPolicy, ListQuery},
        validate::validate_filter,
    },
};

///
/// QueryDescriptor
///
/// Validated, store-ready form of a list request. The translator never
/// executes it; an external store does.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryDescriptor {
    pub resource: &'static str,
    pub backing: Backing,
    pub filter: Option<FilterExpr>,
    pub order_by: Vec<OrderTerm>,
    pub offset: u64,
    /// Effective page size after policy defaults.
    pub page_size: u32,
    /// Store continuation unwrapped from the request's page token.
    pub resume: Option<Vec<u8>>,
    signature: QuerySignature,
}

impl QueryDescriptor {
    #[must_use]
    pub const fn signature(&self) -> QuerySignature {
        self.signature
    }

    /// Canonical filter text handed to the external engine.
    #[must_use]
    pub fn filter_text(&self) -> Option<String> {
        self.filter.as_ref().map(ToString::to_string)
    }

    /// Canonical order_by text handed to the external engine.
    #[must_use]
    pub fn order_by_text(&self) -> String {
        self.order_by
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether this request continues an earlier page.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.resume.is_some()
    }

    /// Wrap the store's continuation for the next page.
    ///
    /// `None` means the store reached the end; the token is then empty.
    pub fn next_page_token(&self, resume: Option<Vec<u8>>) -> Result<String, CursorError> {
        match resume {
            None => Ok(String::new()),
            Some(resume) => PageToken::new(self.signature, self.offset, resume).encode(),
        }
    }
}

/// Translate a raw list request into a store-ready descriptor.
pub fn translate(
    model: &'static ResourceModel,
    query: &ListQuery,
    policy: &ListPolicy,
) -> Result<QueryDescriptor, QueryError> {
    match translate_inner(model, query, policy) {
        Ok(descriptor) => {
            log::debug!(
                "translated list on '{}': filter={:?} order_by='{}' page_size={} continuation={}",
                model.name,
                descriptor.filter_text(),
                descriptor.order_by_text(),
                descriptor.page_size,
                descriptor.is_continuation()
            );
            record(MetricsEvent::Translate {
                resource: model.name,
                backing: model.backing,
            });

            Ok(descriptor)
        }
        Err(err) => {
            log::debug!("list on '{}' rejected: {err}", model.name);
            record(MetricsEvent::QueryRejected {
                resource: model.name,
            });

            Err(err)
        }
    }
}

fn translate_inner(
    model: &'static ResourceModel,
    query: &ListQuery,
    policy: &ListPolicy,
) -> Result<QueryDescriptor, QueryError> {
    if query.filter.len() > policy.max_filter_len {
        return Err(QueryError::FilterTooLong {
            len: query.filter.len(),
            max: policy.max_filter_len,
        });
    }

    let filter = if query.filter.trim().is_empty() {
        None
    } else {
        let expr = parse_filter(&query.filter)?;
        validate_filter(model, &expr)?;
        Some(expr)
    };

    let order_by = parse_order_by(&query.order_by)?;
    validate_order(model, &order_by)?;

    let page_size = policy.effective_page_size(query.page_size)?;
    let signature = QuerySignature::compute(model.name, filter.as_ref(), &order_by, page_size);

    let resume = if query.page_token.trim().is_empty() {
        None
    } else {
        let token = PageToken::decode(&query.page_token)?;
        token.verify(signature, query.offset)?;
        Some(token.into_resume())
    };

    Ok(QueryDescriptor {
        resource: model.name,
        backing: model.backing,
        filter,
        order_by,
        offset: query.offset,
        page_size,
        resume,
        signature,
    })
}
