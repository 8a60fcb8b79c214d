//! Request parsing shared by the recipe handlers: numeric parameters, paging
//! and JSON bodies.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path,
    },
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

pub const DEFAULT_PAGE: i64 = 1;
pub const MIN_PAGE: i64 = 1;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;

/// Parse a numeric request parameter.
///
/// Accepts an optional sign, the `0x`, `0o` and `0b` prefixes, a leading `0`
/// for octal, and `_` between digits.
pub fn parse_numeric(field: &'static str, raw: &str) -> Result<i64, ApiError> {
    parse_int(raw).ok_or(ApiError::NotNumeric(field))
}

/// The `{id}` path segment. A segment axum cannot even decode counts as non-numeric.
pub fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(raw)) => parse_numeric("id", &raw),
        Err(_) => Err(ApiError::NotNumeric("id")),
    }
}

/// Decode a JSON body. The Content-Type header is not checked.
pub fn decode_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let bytes = body.map_err(|e| ApiError::Decode(e.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

fn parse_int(raw: &str) -> Option<i64> {
    let (negative, unsigned) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits, prefixed) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..], true),
        Some("0o" | "0O") => (8, &unsigned[2..], true),
        Some("0b" | "0B") => (2, &unsigned[2..], true),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..], true),
        _ => (10, unsigned, false),
    };

    if !underscores_separate_digits(digits, prefixed) {
        return None;
    }

    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = i128::from(u64::from_str_radix(&digits, radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// `_` is only allowed between two digits, where a base prefix counts as a digit.
fn underscores_separate_digits(digits: &str, prefixed: bool) -> bool {
    let mut after_digit = prefixed;
    let mut after_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
            after_underscore = true;
        } else {
            after_digit = true;
            after_underscore = false;
        }
    }
    !after_underscore
}

/// Page window for the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build from the raw `page` and `limit` query values.
    ///
    /// Empty values count as absent. A value that is not a number is an error,
    /// but a number outside the accepted range quietly falls back to the default.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, ApiError> {
        let mut pagination = Self::default();

        if let Some(raw) = page.filter(|p| !p.is_empty()) {
            let page = parse_numeric("page", raw)?;
            if page >= MIN_PAGE {
                pagination.page = page;
            }
        }

        if let Some(raw) = limit.filter(|l| !l.is_empty()) {
            let limit = parse_numeric("limit", raw)?;
            if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
                pagination.limit = limit;
            }
        }

        Ok(pagination)
    }

    pub fn offset(&self) -> i64 {
        self.limit.saturating_mul(self.page - 1)
    }
}
