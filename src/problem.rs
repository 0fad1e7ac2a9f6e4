//! Problem details (RFC 7807) and the normalization of arbitrary errors into them.
//!
//! A [`Problem`] carries an HTTP status together with a human readable error text and an
//! optional cause. [`to_problem`] turns any error (or none) into a Problem by walking its
//! `source()` chain from the outermost error inwards and taking the first Problem found.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

const TYPE_BASE_URI: &str = "https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/";

/// Content type of every problem response.
pub const CONTENT_TYPE_PROBLEM: &str = "application/problem+json; charset=UTF-8";

type Cause = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
#[error("unknown error")]
struct UnknownError;

/// Text of a foreign error, kept as the cause of the Problem built from it.
#[derive(Error, Debug)]
#[error("{0}")]
struct ErrorText(String);

/// Structured error with an HTTP status, a type URI derived from it and an optional cause.
#[derive(Clone, Debug, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    type_uri: String,
    title: String,
    #[serde(serialize_with = "serialize_status")]
    status: StatusCode,
    #[serde(skip_serializing_if = "String::is_empty")]
    detail: String,
    #[serde(skip)]
    message: String,
    #[serde(skip)]
    cause: Option<Cause>,
}

fn serialize_status<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// Status codes outside 100..=599 are not valid problem statuses and collapse to 500.
fn checked(status: StatusCode) -> StatusCode {
    if (100..600).contains(&status.as_u16()) {
        status
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl Problem {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let status = checked(status);
        Self {
            type_uri: format!("{}{}", TYPE_BASE_URI, status.as_u16()),
            title: status.canonical_reason().unwrap_or_default().to_string(),
            status,
            detail: String::new(),
            message: message.into(),
            cause: None,
        }
    }

    /// Like [`Problem::new`], recording `cause` so its text is part of this error's text and it
    /// stays reachable through `source()`.
    pub fn wrap<E>(cause: E, status: StatusCode, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            cause: Some(Arc::new(cause)),
            ..Self::new(status, message)
        }
    }

    /// Sets the client-facing detail. Normalization keeps a non-empty detail as is.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status.as_u16())?;
        if let Some(cause) = &self.cause {
            write!(f, ", err: {}", cause)?;
        }
        Ok(())
    }
}

impl StdError for Problem {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}

/// Causes are not compared: two problems are equal when everything observable about them is.
impl PartialEq for Problem {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.type_uri == other.type_uri
            && self.title == other.title
            && self.detail == other.detail
            && self.to_string() == other.to_string()
    }
}

impl Eq for Problem {}

/// Normalizes any error into a Problem. Never fails; `None` stands for an unknown error.
///
/// When `err` is not itself a Problem, its `source()` chain is walked one level at a time and the
/// first Problem met from the outside in wins, even if a deeper one exists. Without any Problem in
/// the chain the result is a 500 whose cause carries the text of `err`. An empty detail is
/// filled with the text of `err`.
pub fn to_problem(err: Option<&(dyn StdError + 'static)>) -> Problem {
    let err: &(dyn StdError + 'static) = err.unwrap_or(&UnknownError);

    let mut problem = match err.downcast_ref::<Problem>() {
        Some(p) => p.clone(),
        None => first_wrapped(err).unwrap_or_else(|| {
            let text = err.to_string();
            Problem::wrap(ErrorText(text.clone()), StatusCode::INTERNAL_SERVER_ERROR, text)
        }),
    };

    if problem.detail.is_empty() {
        problem.detail = err.to_string();
    }
    problem
}

fn first_wrapped(err: &(dyn StdError + 'static)) -> Option<Problem> {
    let mut current = err.source();
    while let Some(e) = current {
        if let Some(p) = e.downcast_ref::<Problem>() {
            return Some(p.clone());
        }
        current = e.source();
    }
    None
}

/// Full error text of a problem response, left in the response extensions for request logging.
#[derive(Clone, Debug)]
pub struct ProblemText(pub String);

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let problem = to_problem(Some(&self));
        let mut res = (problem.status, Json(&problem)).into_response();
        res.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_PROBLEM),
        );
        res.extensions_mut().insert(ProblemText(problem.to_string()));
        res
    }
}

/// `problem!(status, "format {}", args)` builds a [`Problem`] from a format string.
#[macro_export]
macro_rules! problem {
    ($status:expr, $($arg:tt)+) => {
        $crate::problem::Problem::new($status, format!($($arg)+))
    };
}

/// `wrap_problem!(cause, status, "format {}", args)` wraps `cause` into a [`Problem`].
#[macro_export]
macro_rules! wrap_problem {
    ($cause:expr, $status:expr, $($arg:tt)+) => {
        $crate::problem::Problem::wrap($cause, $status, format!($($arg)+))
    };
}
