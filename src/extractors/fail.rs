//! Extract the forced-rollback flag from the `fail` header or query parameter.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Header (and query parameter) carrying the forced-rollback flag.
pub const FAIL_HEADER: &str = "fail";

/// Whether the caller asked for the write to be rolled back.
///
/// The header wins over the query parameter. Only the exact value `true` sets the flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FailFlag(pub bool);

impl FailFlag {
    pub fn parse(raw: Option<&str>) -> Self {
        FailFlag(raw == Some("true"))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for FailFlag
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(v) = parts.headers.get(FAIL_HEADER) {
            return Ok(FailFlag::parse(v.to_str().ok()));
        }
        let from_query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(params)| params.get(FAIL_HEADER).cloned());
        Ok(FailFlag::parse(from_query.as_deref()))
    }
}
