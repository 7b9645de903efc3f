// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Module Registry
//!
//! Compiled-in list of navigable modules. Administrator-only modules and
//! general (permission-tagged) modules are kept in separate lists; both are
//! ordered and that order is the navigation order.

use serde::Serialize;

use crate::guard::Requirement;
use crate::identity::PermissionTag;

// =============================================================================
// Module Descriptor
// =============================================================================

/// A navigable page and the requirement guarding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    pub requirement: Requirement,
    pub title: &'static str,
    pub route: &'static str,
}

impl ModuleDescriptor {
    const fn admin(title: &'static str, route: &'static str) -> Self {
        Self {
            requirement: Requirement::AdminOnly,
            title,
            route,
        }
    }

    const fn general(tag: PermissionTag, title: &'static str, route: &'static str) -> Self {
        Self {
            requirement: Requirement::Permission(tag),
            title,
            route,
        }
    }

    /// Permission tag for general modules, `None` for administrator modules.
    pub fn permission(&self) -> Option<PermissionTag> {
        self.requirement.permission()
    }

    /// Last path segment of the route, used in API paths.
    pub fn slug(&self) -> &'static str {
        self.route.rsplit('/').next().unwrap_or(self.route)
    }
}

// =============================================================================
// Static Registries
// =============================================================================

pub static ADMIN_MODULES: [ModuleDescriptor; 3] = [
    ModuleDescriptor::admin("Dashboard", "/admin/dashboard"),
    ModuleDescriptor::admin("User Management", "/admin/users"),
    ModuleDescriptor::admin("Audit Log", "/admin/audit-log"),
];

pub static GENERAL_MODULES: [ModuleDescriptor; 12] = [
    ModuleDescriptor::general(PermissionTag::PayeeManagement, "Payees", "/payees"),
    ModuleDescriptor::general(PermissionTag::BatchManagement, "Batches", "/batches"),
    ModuleDescriptor::general(PermissionTag::SubjectManagement, "Subjects", "/subjects"),
    ModuleDescriptor::general(
        PermissionTag::LoanLedgerManagement,
        "Loan Ledger",
        "/loan-ledger",
    ),
    ModuleDescriptor::general(
        PermissionTag::FuelAllowanceManagement,
        "Fuel Allowance",
        "/fuel-allowance",
    ),
    ModuleDescriptor::general(
        PermissionTag::ConstructionPaymentManagement,
        "Construction Payments",
        "/construction-payments",
    ),
    ModuleDescriptor::general(
        PermissionTag::MaintenanceManagement,
        "Maintenance",
        "/maintenance",
    ),
    ModuleDescriptor::general(PermissionTag::PettyCashManagement, "Petty Cash", "/petty-cash"),
    ModuleDescriptor::general(
        PermissionTag::SalaryAdvanceManagement,
        "Salary Advances",
        "/salary-advances",
    ),
    ModuleDescriptor::general(
        PermissionTag::UtilityBillManagement,
        "Utility Bills",
        "/utility-bills",
    ),
    ModuleDescriptor::general(
        PermissionTag::TravelAllowanceManagement,
        "Travel Allowance",
        "/travel-allowance",
    ),
    ModuleDescriptor::general(PermissionTag::StationeryManagement, "Stationery", "/stationery"),
];

// =============================================================================
// Registry View
// =============================================================================

/// Borrowed view over an administrator list and a general list.
///
/// `builtin()` is what the application uses; tests build smaller registries
/// with `new`.
#[derive(Debug, Clone, Copy)]
pub struct ModuleRegistry<'a> {
    admin: &'a [ModuleDescriptor],
    general: &'a [ModuleDescriptor],
}

impl<'a> ModuleRegistry<'a> {
    pub fn new(admin: &'a [ModuleDescriptor], general: &'a [ModuleDescriptor]) -> Self {
        Self { admin, general }
    }

    pub fn admin(&self) -> &'a [ModuleDescriptor] {
        self.admin
    }

    pub fn general(&self) -> &'a [ModuleDescriptor] {
        self.general
    }

    /// Every descriptor, administrator modules first.
    pub fn iter(&self) -> impl Iterator<Item = &'a ModuleDescriptor> {
        self.admin.iter().chain(self.general.iter())
    }

    /// Look up a descriptor by route, ignoring a trailing slash.
    pub fn find_by_route(&self, route: &str) -> Option<&'a ModuleDescriptor> {
        let route = match route.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.iter().find(|m| m.route == route)
    }

    pub fn find_by_permission(&self, tag: PermissionTag) -> Option<&'a ModuleDescriptor> {
        self.general.iter().find(|m| m.permission() == Some(tag))
    }

    /// Look up a general module by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&'a ModuleDescriptor> {
        self.general.iter().find(|m| m.slug() == slug)
    }
}

impl ModuleRegistry<'static> {
    pub fn builtin() -> Self {
        Self::new(&ADMIN_MODULES, &GENERAL_MODULES)
    }
}

impl Default for ModuleRegistry<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}
