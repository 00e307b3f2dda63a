// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission vocabulary and the permission check.

use super::{AuthError, ClaimSet};

/// Permission strings granted by the identity provider's RBAC settings.
pub mod permission {
    /// Authentication only, no specific grant.
    pub const AUTHENTICATED: &str = "";
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}

/// Check that `claims` grant `required`.
///
/// An empty `required` means the endpoint only needs a valid token. Claims
/// without a `permissions` field fail with [`AuthError::MissingPermissions`],
/// claims lacking the exact string with [`AuthError::PermissionDenied`].
pub fn check_permissions(required: &str, claims: &ClaimSet) -> Result<(), AuthError> {
    if required.is_empty() {
        return Ok(());
    }

    if claims.permissions.is_none() {
        return Err(AuthError::MissingPermissions);
    }

    if claims.has_permission(required) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}
