//! Extractors binding the scoring validators to axum requests.
//!
//! On failure they reject with a 400 carrying
//! `{success: false, error: "Validation failed", details: [...]}`, including
//! when the body is not JSON at all. On success the handler receives the
//! normalized, typed value.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use funlist_scoring::validation::{ValidateInput, ValidateQuery, ValidationFailure};
use serde_json::Value;

use crate::error::WebError;

/// JSON body validated with [`ValidateInput`]
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

/// Query string validated with [`ValidateQuery`]
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Validated<T>
where
    T: ValidateInput + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ValidationFailure::single("", rejection.body_text()))?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ValidationFailure::single("", format!("Malformed JSON body: {e}")))?;

        Ok(Self(T::validate_input(&value)?))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: ValidateQuery + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|rejection| ValidationFailure::single("", rejection.body_text()))?;

        Ok(Self(T::validate_query(&params)?))
    }
}
