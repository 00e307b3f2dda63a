// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token verification against the identity provider's JWKS.
//!
//! Signature and claim validation happen in a single `jsonwebtoken::decode`
//! call: a token is either accepted as a whole or rejected. Which check
//! failed is logged at `debug` and never returned to the caller.

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use super::error::{MISSING_KEY_ID, UNREADABLE_HEADER};
use super::jwks::JwksManager;
use super::{AuthError, ClaimSet};
use crate::config::{AuthConfig, ConfigError};

/// Verifies bearer tokens and produces their [`ClaimSet`].
#[derive(Clone)]
pub struct TokenVerifier {
    keys: JwksManager,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier that fetches keys from `config.jwks_url`.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        let keys = JwksManager::new(config.jwks_url.clone(), config.jwks_timeout)?;
        Ok(Self::with_keys(keys, config))
    }

    /// Build a verifier around an existing key resolver.
    pub fn with_keys(keys: JwksManager, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = config.algorithms.clone();
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = config.leeway;

        Self { keys, validation }
    }

    /// Key resolver used by this verifier.
    pub fn keys(&self) -> &JwksManager {
        &self.keys
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    /// - [`AuthError::InvalidHeader`] if the token header cannot be parsed or
    ///   has no `kid`
    /// - [`AuthError::KeyNotFound`] if the JWKS has no key for that `kid`
    /// - [`AuthError::InvalidToken`] for a disallowed algorithm (including one
    ///   that differs from the key's published `alg`), a bad
    ///   signature, wrong issuer or audience, expiry, or an unreachable JWKS
    pub async fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "token header could not be decoded");
            AuthError::InvalidHeader(UNREADABLE_HEADER)
        })?;

        let kid = header
            .kid
            .as_deref()
            .ok_or(AuthError::InvalidHeader(MISSING_KEY_ID))?;

        if !self.validation.algorithms.contains(&header.alg) {
            tracing::debug!(alg = ?header.alg, "token signed with a disallowed algorithm");
            return Err(AuthError::InvalidToken);
        }

        let signing_key = self.keys.resolve(kid).await?;
        if !signing_key.accepts(header.alg) {
            tracing::debug!(
                alg = ?header.alg,
                published = ?signing_key.algorithm,
                kid,
                "token algorithm differs from the key's published algorithm"
            );
            return Err(AuthError::InvalidToken);
        }
        let key = signing_key.decoding_key()?;

        let token_data = decode::<ClaimSet>(token, &key, &self.validation).map_err(|e| {
            tracing::debug!(kind = ?e.kind(), kid, "token rejected");
            AuthError::InvalidToken
        })?;

        Ok(token_data.claims)
    }
}
