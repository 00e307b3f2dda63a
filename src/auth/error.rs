// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ErrorBody;

pub(crate) const MISSING_HEADER: &str = "header does not contain authorization token";
pub(crate) const MALFORMED_HEADER: &str = "token header must have exactly two parts";
pub(crate) const UNREADABLE_HEADER: &str = "token header could not be read";
pub(crate) const WRONG_SCHEME: &str = "authorization scheme must be Bearer";
pub(crate) const MISSING_KEY_ID: &str = "token header does not declare a key id";

/// Failure of any step of the authentication pipeline.
///
/// Claim validation failures (signature, issuer, audience, expiry) are all
/// reported as [`AuthError::InvalidToken`] so callers cannot tell which
/// check rejected the token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Authorization header or token header is missing or malformed
    #[error("{0}")]
    InvalidHeader(&'static str),
    /// No key in the provider's JWKS matches the token's `kid`
    #[error("signing key could not be found")]
    KeyNotFound,
    /// Signature, issuer, audience or expiry check failed, or the key set
    /// could not be fetched
    #[error("token could not be verified")]
    InvalidToken,
    /// Claims carry no `permissions` field
    #[error("no permissions")]
    MissingPermissions,
    /// Required permission is not granted
    #[error("not permitted")]
    PermissionDenied,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidHeader(_) => "invalid_header",
            AuthError::KeyNotFound => "key_not_found",
            AuthError::InvalidToken => "invalid_token",
            AuthError::MissingPermissions => "missing_permissions",
            AuthError::PermissionDenied => "permission_denied",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidHeader(_) | AuthError::KeyNotFound | AuthError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::MissingPermissions | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorBody::new(self.status_code(), self.to_string()).into_response()
    }
}
