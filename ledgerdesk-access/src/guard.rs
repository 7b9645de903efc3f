// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Authorization Guard
//!
//! Decides whether an identity may access a protected resource.
//!
//! Rules, in order:
//! - No identity: denied
//! - Public resource: granted
//! - Administrator-only resource: granted to administrators only
//! - Permission-tagged resource: granted to administrators, or to clerks
//!   holding the tag
//!
//! The guard is a pure function of its inputs. It does not log, retry or
//! touch the identity; callers decide what a denial looks like.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::identity::{Identity, PermissionTag, UnknownPermission};

// =============================================================================
// Requirement
// =============================================================================

/// Access requirement attached to a page or endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "permission", rename_all = "snake_case")]
pub enum Requirement {
    /// No requirement beyond being signed in
    Public,

    /// Administrators only
    AdminOnly,

    /// Administrators, or clerks holding the tag
    Permission(PermissionTag),
}

impl Requirement {
    pub fn permission(&self) -> Option<PermissionTag> {
        match self {
            Requirement::Permission(tag) => Some(*tag),
            _ => None,
        }
    }
}

impl From<PermissionTag> for Requirement {
    fn from(tag: PermissionTag) -> Self {
        Requirement::Permission(tag)
    }
}

impl FromStr for Requirement {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Requirement::Public),
            "admin" | "admin-only" | "admin_only" => Ok(Requirement::AdminOnly),
            _ => s.parse().map(Requirement::Permission),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Public => f.write_str("public"),
            Requirement::AdminOnly => f.write_str("admin-only"),
            Requirement::Permission(tag) => f.write_str(tag.as_str()),
        }
    }
}

// =============================================================================
// Decision
// =============================================================================

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity; the caller should route to login
    Unauthenticated,

    /// Resource is reserved for administrators
    AdminOnly,

    /// Clerk does not hold the tag
    MissingPermission(PermissionTag),
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unauthenticated => f.write_str("not signed in"),
            DenyReason::AdminOnly => f.write_str("administrator access required"),
            DenyReason::MissingPermission(tag) => write!(f, "missing permission {}", tag),
        }
    }
}

/// Outcome of a single access check. Terminal either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Access denied: {reason}")]
pub struct AccessDenied {
    pub reason: DenyReason,
}

// =============================================================================
// Guard
// =============================================================================

/// Evaluate a requirement against an optional identity.
pub fn evaluate(identity: Option<&Identity>, requirement: Requirement) -> Decision {
    let Some(identity) = identity else {
        return Decision::Denied(DenyReason::Unauthenticated);
    };

    match requirement {
        Requirement::Public => Decision::Granted,
        Requirement::AdminOnly if identity.is_administrator() => Decision::Granted,
        Requirement::AdminOnly => Decision::Denied(DenyReason::AdminOnly),
        Requirement::Permission(tag) => {
            if identity.is_administrator() || identity.has_permission(tag) {
                Decision::Granted
            } else {
                Decision::Denied(DenyReason::MissingPermission(tag))
            }
        }
    }
}

/// Boolean form of [`evaluate`].
pub fn is_authorized(identity: Option<&Identity>, requirement: Requirement) -> bool {
    evaluate(identity, requirement).is_granted()
}

/// `Result` form of [`evaluate`], for `?` at call sites.
pub fn authorize(
    identity: Option<&Identity>,
    requirement: Requirement,
) -> Result<(), AccessDenied> {
    match evaluate(identity, requirement) {
        Decision::Granted => Ok(()),
        Decision::Denied(reason) => Err(AccessDenied { reason }),
    }
}

// =============================================================================
// Tests
// =============================================================================
