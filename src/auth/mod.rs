// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token authentication and permission checks for the drink API.
//!
//! ## Auth Flow
//!
//! 1. The frontend authenticates the user with the identity provider (Auth0)
//! 2. The frontend sends `Authorization: Bearer <access token>`
//! 3. The server:
//!    - Fetches the provider's JWKS via HTTPS and picks the key matching `kid`
//!    - Verifies the JWT signature, expiry, issuer and audience
//!    - Checks the route's required permission against `permissions`
//!
//! ## Security
//!
//! - Only RSA signature algorithms from configuration are accepted
//! - The JWKS is re-fetched for every verification
//! - Verification failures are reported uniformly as 401, permission
//!   failures as 403

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testutil;

pub use claims::ClaimSet;
pub use error::AuthError;
pub use extractor::{bearer_token, Claims};
pub use jwks::{JwksManager, SigningKey};
pub use middleware::{authorize, protect, requires_auth};
pub use permissions::{check_permissions, permission};
pub use verifier::TokenVerifier;
