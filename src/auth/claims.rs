// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decoded token claims.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The `aud` claim, which providers emit either as a string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(value) => value == audience,
            Audience::Many(values) => values.iter().any(|value| value == audience),
        }
    }
}

/// Claims carried by a verified access token.
///
/// Only produced by [`TokenVerifier`](super::TokenVerifier) after the
/// signature, issuer, audience and expiry have been checked. Claims the
/// service does not interpret are kept in `extra` so protected handlers see
/// the full payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Issuer (the identity provider URL, with trailing slash)
    pub iss: String,

    /// Audience (the API identifier)
    pub aud: Audience,

    /// Expiration timestamp
    pub exp: u64,

    /// Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// RBAC permissions granted to the caller. `None` when the provider did
    /// not include the claim at all, which is distinct from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ClaimSet {
    /// Exact-match membership test on the `permissions` claim.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}
