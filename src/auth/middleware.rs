// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The auth gate: header extraction, token verification and permission
//! check composed into one pipeline.
//!
//! Each step either advances or ends the pipeline with an [`AuthError`];
//! nothing is retried and the protected operation only runs once every step
//! has passed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = Router::new().route(
//!     "/drinks",
//!     get(list_drinks).merge(protect(
//!         post(create_drink),
//!         verifier.clone(),
//!         permission::POST_DRINKS,
//!     )),
//! );
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};

use super::extractor::bearer_token;
use super::permissions::check_permissions;
use super::verifier::TokenVerifier;
use super::{AuthError, ClaimSet};

/// Run the full pipeline for a request's headers.
pub async fn authorize(
    verifier: &TokenVerifier,
    headers: &HeaderMap,
    permission: &str,
) -> Result<ClaimSet, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verifier.verify(token).await?;
    check_permissions(permission, &claims)?;
    Ok(claims)
}

/// Run `operation` with the verified claims if the request is authorized
/// for `permission`.
///
/// `operation` is never invoked when any step of the pipeline fails.
pub async fn requires_auth<F, Fut, T>(
    verifier: &TokenVerifier,
    headers: &HeaderMap,
    permission: &str,
    operation: F,
) -> Result<T, AuthError>
where
    F: FnOnce(ClaimSet) -> Fut,
    Fut: Future<Output = T>,
{
    let claims = authorize(verifier, headers, permission).await?;
    Ok(operation(claims).await)
}

/// Middleware state: the verifier plus the permission a route requires.
#[derive(Clone)]
pub struct RequiredPermission {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl RequiredPermission {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self {
            verifier,
            permission,
        }
    }
}

/// Authentication middleware function.
///
/// On success the [`ClaimSet`] is stored in the request extensions for the
/// [`Claims`](super::Claims) extractor.
pub async fn enforce_permission(
    State(required): State<RequiredPermission>,
    mut request: Request,
    next: Next,
) -> Response {
    match authorize(&required.verifier, request.headers(), required.permission).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                permission = required.permission,
                code = e.error_code(),
                "request rejected by auth gate"
            );
            e.into_response()
        }
    }
}

/// Wrap the handlers of `route` so they only run for callers holding
/// `permission`. An empty permission requires authentication only.
pub fn protect<S>(
    route: MethodRouter<S>,
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(
        RequiredPermission::new(verifier, permission),
        enforce_permission,
    ))
}
