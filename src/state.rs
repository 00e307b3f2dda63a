// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenVerifier;
use crate::config::{AuthConfig, ConfigError};
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(auth_config: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_store(InMemoryStore::new(), TokenVerifier::new(auth_config)?))
    }

    pub fn with_store(store: InMemoryStore, verifier: TokenVerifier) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            verifier: Arc::new(verifier),
        }
    }
}
