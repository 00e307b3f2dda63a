// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Coffee Shop API - Drink Catalog Service
//!
//! This crate serves a drink catalog over HTTP. Reading the public menu is
//! open; everything else requires a bearer token issued by an external
//! identity provider that carries the matching permission.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token verification and permission checks (JWKS + JWT)
//! - `config` - Environment configuration
//! - `store` - In-memory drink catalog

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
