// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Identity Model
//!
//! The authenticated actor: who they are, their role, and the permission
//! tags they hold. Administrators implicitly hold every tag; that rule lives
//! in the guard, not here, so `has_permission` is plain set membership.

pub mod permission;
pub mod role;

pub use permission::{PermissionTag, UnknownPermission};
pub use role::{Role, UnknownRole};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An authenticated actor.
///
/// This is also the `user` payload of the authentication endpoint and the
/// value persisted by the session holder, so its serde shape is a wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email (also the login name)
    pub email: String,

    pub role: Role,

    /// Held permission tags; duplicates collapse and order is irrelevant
    #[serde(default)]
    pub permissions: BTreeSet<PermissionTag>,
}

impl Identity {
    /// Create an identity with no permission tags.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            permissions: BTreeSet::new(),
        }
    }

    /// Replace the permission set.
    pub fn with_permissions(
        mut self,
        permissions: impl IntoIterator<Item = PermissionTag>,
    ) -> Self {
        self.permissions = permissions.into_iter().collect();
        self
    }

    /// Raw membership test, without the administrator bypass.
    pub fn has_permission(&self, tag: PermissionTag) -> bool {
        self.permissions.contains(&tag)
    }

    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}
