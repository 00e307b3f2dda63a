// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and key resolution.
//!
//! ## Behavior
//!
//! - The key set is fetched on every resolution; nothing is cached between
//!   requests, so a rotated key is picked up immediately
//! - Each fetch is bounded by the configured timeout
//! - Fetch failures surface as [`AuthError::InvalidToken`], a missing `kid`
//!   as [`AuthError::KeyNotFound`]
//! - Only RSA keys published for signing are considered. A key that declares
//!   its `alg` only verifies tokens signed with that algorithm

use std::time::Duration;

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet, KeyAlgorithm, PublicKeyUse};
use jsonwebtoken::{Algorithm, DecodingKey};
use url::Url;

use super::error::AuthError;

/// A public RSA signing key as published by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    /// Key identifier, matched against the token header's `kid`
    pub kid: String,
    /// Algorithm the key is published for, if the JWK declares one
    pub algorithm: Option<Algorithm>,
    /// Base64url RSA modulus
    pub n: String,
    /// Base64url RSA public exponent
    pub e: String,
}

impl SigningKey {
    /// Read a signing key from a JWK.
    ///
    /// Returns `None` for non-RSA keys, keys published for encryption, keys
    /// without a `kid`, and keys whose `alg` is not an RSA signature algorithm.
    pub fn from_jwk(jwk: &Jwk) -> Option<Self> {
        let AlgorithmParameters::RSA(rsa) = &jwk.algorithm else {
            return None;
        };
        if !matches!(
            jwk.common.public_key_use,
            None | Some(PublicKeyUse::Signature)
        ) {
            return None;
        }
        let algorithm = match jwk.common.key_algorithm {
            None => None,
            Some(KeyAlgorithm::RS256) => Some(Algorithm::RS256),
            Some(KeyAlgorithm::RS384) => Some(Algorithm::RS384),
            Some(KeyAlgorithm::RS512) => Some(Algorithm::RS512),
            Some(KeyAlgorithm::PS256) => Some(Algorithm::PS256),
            Some(KeyAlgorithm::PS384) => Some(Algorithm::PS384),
            Some(KeyAlgorithm::PS512) => Some(Algorithm::PS512),
            Some(_) => return None,
        };

        Some(Self {
            kid: jwk.common.key_id.clone()?,
            algorithm,
            n: rsa.n.clone(),
            e: rsa.e.clone(),
        })
    }

    /// Whether a token signed with `alg` may be verified by this key.
    pub fn accepts(&self, alg: Algorithm) -> bool {
        self.algorithm.map_or(true, |published| published == alg)
    }

    /// Build the verification key for `jsonwebtoken`.
    pub fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        DecodingKey::from_rsa_components(&self.n, &self.e).map_err(|e| {
            tracing::warn!(kid = %self.kid, error = %e, "JWKS entry is not a usable RSA key");
            AuthError::InvalidToken
        })
    }
}

/// Find the RSA signing key whose identifier equals `kid`.
pub fn find_signing_key(jwks: &JwkSet, kid: &str) -> Option<SigningKey> {
    jwks.keys
        .iter()
        .filter_map(SigningKey::from_jwk)
        .find(|key| key.kid == kid)
}

/// Resolves token key identifiers against the provider's JWKS.
#[derive(Clone)]
pub struct JwksManager {
    /// JWKS URL (identity provider endpoint)
    jwks_url: Url,
    /// HTTP client
    client: reqwest::Client,
}

impl JwksManager {
    /// Create a new JWKS manager.
    ///
    /// # Arguments
    /// - `jwks_url`: The JWKS endpoint URL (e.g., `https://tenant.eu.auth0.com/.well-known/jwks.json`)
    /// - `timeout`: Upper bound for a single fetch, including reading the body
    pub fn new(jwks_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { jwks_url, client })
    }

    /// Fetch the current key set from the endpoint.
    pub async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %self.jwks_url, error = %e, "JWKS request failed");
                AuthError::InvalidToken
            })?;

        if !response.status().is_success() {
            tracing::warn!(
                url = %self.jwks_url,
                status = %response.status(),
                "JWKS endpoint returned an error status"
            );
            return Err(AuthError::InvalidToken);
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::warn!(url = %self.jwks_url, error = %e, "JWKS response could not be parsed");
            AuthError::InvalidToken
        })
    }

    /// Fetch the key set and return the key matching `kid`.
    pub async fn resolve(&self, kid: &str) -> Result<SigningKey, AuthError> {
        let jwks = self.fetch_jwks().await?;
        find_signing_key(&jwks, kid).ok_or_else(|| {
            tracing::debug!(kid, available = jwks.keys.len(), "no JWKS entry matches token kid");
            AuthError::KeyNotFound
        })
    }
}
