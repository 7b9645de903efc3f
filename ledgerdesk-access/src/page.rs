// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Page-level gate
//!
//! Resolves a route to what should be shown. A denied page always renders
//! the inline "Unauthorized" notice; there is no redirect.

use crate::guard::{self, Decision, DenyReason};
use crate::identity::Identity;
use crate::registry::{ModuleDescriptor, ModuleRegistry};

pub const UNAUTHORIZED_NOTICE: &str = "Unauthorized";
pub const LOGIN_REQUIRED_NOTICE: &str = "Login required";
pub const NOT_FOUND_NOTICE: &str = "Not found";

/// What to show for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView<'a> {
    /// Render the module page
    Render(&'a ModuleDescriptor),

    /// Signed in but not allowed; show the inline notice
    Unauthorized,

    /// No session; the caller sends the user to login
    LoginRequired,

    /// Route is not in the registry
    NotFound,
}

impl<'a> PageView<'a> {
    pub fn is_render(&self) -> bool {
        matches!(self, PageView::Render(_))
    }

    /// Plain-text notice for the non-rendering outcomes.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            PageView::Render(_) => None,
            PageView::Unauthorized => Some(UNAUTHORIZED_NOTICE),
            PageView::LoginRequired => Some(LOGIN_REQUIRED_NOTICE),
            PageView::NotFound => Some(NOT_FOUND_NOTICE),
        }
    }
}

/// Resolve `route` for `identity` against `registry`.
pub fn open_page<'a>(
    identity: Option<&Identity>,
    registry: &ModuleRegistry<'a>,
    route: &str,
) -> PageView<'a> {
    let Some(module) = registry.find_by_route(route) else {
        return PageView::NotFound;
    };

    match guard::evaluate(identity, module.requirement) {
        Decision::Granted => PageView::Render(module),
        Decision::Denied(DenyReason::Unauthenticated) => PageView::LoginRequired,
        Decision::Denied(_) => PageView::Unauthorized,
    }
}
