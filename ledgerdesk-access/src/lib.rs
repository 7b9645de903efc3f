// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! LedgerDesk Access - roles, permissions and sessions for the ledger desk
//!
//! This crate decides who may see and act on which ledger module:
//!
//! - [`identity`]: the authenticated actor, its role and permission tags
//! - [`guard`]: the single authorization predicate
//! - [`registry`]: compiled-in module/route descriptors
//! - [`navigation`]: which modules an identity sees
//! - [`page`]: page-level gate rendering an inline "Unauthorized" notice
//! - [`session`]: client-side session holder with durable storage
//!
//! # Example
//!
//! ```rust
//! use ledgerdesk_access::guard::{is_authorized, Requirement};
//! use ledgerdesk_access::identity::{Identity, PermissionTag, Role};
//!
//! let clerk = Identity::new("u-1", "Ama", "ama@bursary.example", Role::Clerk)
//!     .with_permissions([PermissionTag::LoanLedgerManagement]);
//!
//! assert!(is_authorized(
//!     Some(&clerk),
//!     Requirement::Permission(PermissionTag::LoanLedgerManagement),
//! ));
//! assert!(!is_authorized(
//!     Some(&clerk),
//!     Requirement::Permission(PermissionTag::FuelAllowanceManagement),
//! ));
//! ```

pub mod guard;
pub mod identity;
pub mod navigation;
pub mod page;
pub mod registry;
pub mod session;

// Re-export commonly used types at the crate root
pub use guard::{is_authorized, AccessDenied, Decision, DenyReason, Requirement};
pub use identity::{Identity, PermissionTag, Role};
pub use navigation::visible_modules;
pub use page::{open_page, PageView};
pub use registry::{ModuleDescriptor, ModuleRegistry};
pub use session::{Session, SessionError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
