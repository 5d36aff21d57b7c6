//! Axum extractors binding request input to a validator
//!
//! `Bound<V>` and `BoundJson<V>` gather the raw input of a request, run it
//! through [`bind`](super::bind) with the validator named by `V`, and either
//! hand the handler the cleaned parameters or short-circuit with the 400
//! rejection. The [`RequestCache`] is kept in the request extensions, so
//! several extractors naming the same validator validate only once.

use super::{BindOutcome, RequestCache, ValidatorRegistry, bind};
use crate::core::error::{ParamsError, ValidationError};
use crate::core::validation::{Params, RawInput};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

/// Names the validator of an action
///
/// ```rust,ignore
/// struct CreateFancyResource;
///
/// impl ParamsValidator for CreateFancyResource {
///     const NAME: &'static str = "create_fancy_resource";
/// }
/// ```
pub trait ParamsValidator {
    const NAME: &'static str;
}

/// Parameters from the path and query string, validated by `V`
///
/// Path parameters win over query parameters of the same name.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn list_invoices(
///     Bound(params, _): Bound<ListInvoices>,
/// ) -> Json<Vec<Invoice>> {
///     let page = params.integer("page").unwrap_or(1);
///     // ...
/// }
/// ```
pub struct Bound<V>(pub Params, pub PhantomData<V>);

/// Parameters from the JSON body, query string and path, validated by `V`
///
/// Later sources win: body, then query, then path. An empty body counts as
/// an empty object. The body is read under the router's `DefaultBodyLimit`;
/// a larger body is rejected with 413.
pub struct BoundJson<V>(pub Params, pub PhantomData<V>);

macro_rules! impl_params_wrapper {
    ($wrapper:ident) => {
        impl<V> $wrapper<V> {
            pub fn new(params: Params) -> Self {
                Self(params, PhantomData)
            }

            pub fn into_inner(self) -> Params {
                self.0
            }
        }

        impl<V> std::ops::Deref for $wrapper<V> {
            type Target = Params;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

impl_params_wrapper!(Bound);
impl_params_wrapper!(BoundJson);

impl<S, V> FromRequestParts<S> for Bound<V>
where
    S: Send + Sync,
    V: ParamsValidator + Send + Sync,
    ValidatorRegistry: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let mut raw = RawInput::new();
        merge_query(parts, &mut raw)?;
        merge_path(parts, state, &mut raw).await;

        bind_in_request(V::NAME, &raw, parts, state).map(Bound::new)
    }
}

impl<S, V> FromRequest<S> for BoundJson<V>
where
    S: Send + Sync,
    V: ParamsValidator + Send + Sync,
    ValidatorRegistry: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let mut body_req = Request::new(body);
        *body_req.extensions_mut() = parts.extensions.clone();
        let bytes = Bytes::from_request(body_req, state)
            .await
            .map_err(body_rejection)?;

        let mut raw = parse_body(&bytes)?;
        merge_query(&parts, &mut raw)?;
        merge_path(&mut parts, state, &mut raw).await;

        bind_in_request(V::NAME, &raw, &mut parts, state).map(BoundJson::new)
    }
}

/// Bind with the request's cache, turning every failure into a response
fn bind_in_request<S>(
    name: &str,
    raw: &RawInput,
    parts: &mut Parts,
    state: &S,
) -> Result<Params, Response>
where
    ValidatorRegistry: FromRef<S>,
{
    let registry = ValidatorRegistry::from_ref(state);
    let mut cache = parts.extensions.remove::<RequestCache>().unwrap_or_default();
    let outcome = bind(name, raw, &registry, &mut cache);
    parts.extensions.insert(cache);

    match outcome {
        Ok(BindOutcome::Proceed { cleaned }) => Ok(cleaned),
        Ok(reject) => {
            tracing::warn!(validator = %name, path = %parts.uri.path(), "request params rejected");
            Err(reject.into_response())
        }
        Err(e) => {
            tracing::error!(validator = %name, error = %e, "params binding misconfigured");
            Err(ParamsError::from(e).into_response())
        }
    }
}

fn parse_body(bytes: &[u8]) -> Result<RawInput, Response> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawInput::new());
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(invalid_json("expected a JSON object".to_string())),
        Err(e) => Err(invalid_json(e.to_string())),
    }
}

fn merge_query(parts: &Parts, raw: &mut RawInput) -> Result<(), Response> {
    let Query(query) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri).map_err(|e| {
        ParamsError::from(ValidationError::InvalidQuery {
            message: e.body_text(),
        })
        .into_response()
    })?;

    raw.extend(query.into_iter().map(|(k, v)| (k, Value::String(v))));
    Ok(())
}

/// Routes without captures have no path parameters to merge
async fn merge_path<S: Send + Sync>(parts: &mut Parts, state: &S, raw: &mut RawInput) {
    if let Ok(Path(params)) = Path::<HashMap<String, String>>::from_request_parts(parts, state).await
    {
        raw.extend(params.into_iter().map(|(k, v)| (k, Value::String(v))));
    }
}

fn body_rejection(rejection: BytesRejection) -> Response {
    let message = rejection.body_text();
    let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::PayloadTooLarge { message }
    } else {
        ValidationError::InvalidJson { message }
    };
    ParamsError::from(err).into_response()
}

fn invalid_json(message: String) -> Response {
    ParamsError::from(ValidationError::InvalidJson { message }).into_response()
}
