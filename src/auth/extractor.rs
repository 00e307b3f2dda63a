// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction and the Axum extractor for verified claims.
//!
//! Use the `Claims` extractor in handlers behind [`protect`](super::protect):
//!
//! ```rust,ignore
//! async fn create_drink(Claims(claims): Claims) -> impl IntoResponse {
//!     // claims is the verified ClaimSet
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::error::{MALFORMED_HEADER, MISSING_HEADER, UNREADABLE_HEADER, WRONG_SCHEME};
use super::middleware::authorize;
use super::permissions::permission::AUTHENTICATED;
use super::{AuthError, ClaimSet};
use crate::state::AppState;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The header value must split on a single space into exactly two parts,
/// the first being the `Bearer` scheme (case-insensitive).
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::InvalidHeader(MISSING_HEADER))?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader(UNREADABLE_HEADER))?;

    let parts: Vec<&str> = value.split(' ').collect();
    let [scheme, token] = parts.as_slice() else {
        return Err(AuthError::InvalidHeader(MALFORMED_HEADER));
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidHeader(WRONG_SCHEME));
    }
    if token.is_empty() {
        return Err(AuthError::InvalidHeader(MALFORMED_HEADER));
    }

    Ok(*token)
}

/// Extractor for verified claims.
///
/// Reads the [`ClaimSet`] stored by the permission middleware. On routes
/// without that middleware it runs the pipeline itself with no required
/// permission, so the handler still only sees verified claims.
///
/// # Example
///
/// ```rust,ignore
/// async fn drinks_detail(
///     Claims(claims): Claims,
///     State(state): State<AppState>,
/// ) -> Result<Json<DrinksResponse>, ApiError> {
///     // claims.sub identifies the caller
/// }
/// ```
pub struct Claims(pub ClaimSet);

impl FromRequestParts<AppState> for Claims {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already verified the token
        if let Some(claims) = parts.extensions.get::<ClaimSet>().cloned() {
            return Ok(Claims(claims));
        }

        let claims = authorize(&state.verifier, &parts.headers, AUTHENTICATED).await?;
        Ok(Claims(claims))
    }
}
