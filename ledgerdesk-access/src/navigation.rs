// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Navigation Filter
//!
//! Which registry entries an identity sees in navigation.

use crate::guard::{self, Requirement};
use crate::identity::Identity;
use crate::registry::{ModuleDescriptor, ModuleRegistry};

/// Modules visible to `identity`, in navigation order.
///
/// Administrators see the administrator list followed by the whole general
/// list. Clerks see the general entries whose tag they hold. Nobody sees
/// anything without an identity.
pub fn visible_modules<'a>(
    identity: Option<&Identity>,
    registry: &ModuleRegistry<'a>,
) -> Vec<&'a ModuleDescriptor> {
    let Some(identity) = identity else {
        return Vec::new();
    };

    if identity.is_administrator() {
        return registry.iter().collect();
    }

    registry
        .general()
        .iter()
        .filter(|m| {
            matches!(m.requirement, Requirement::Permission(_))
                && guard::is_authorized(Some(identity), m.requirement)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{PermissionTag, Role};
    use crate::registry::{ADMIN_MODULES, GENERAL_MODULES};

    fn titles(modules: &[&ModuleDescriptor]) -> Vec<&'static str> {
        modules.iter().map(|m| m.title).collect()
    }

    #[test]
    fn test_admin_sees_admin_then_general() {
        let registry = ModuleRegistry::builtin();
        let admin = Identity::new("u-1", "Root", "root@bursary.example", Role::Administrator)
            .with_permissions([PermissionTag::PayeeManagement]);

        let visible = visible_modules(Some(&admin), &registry);

        let expected: Vec<_> = ADMIN_MODULES
            .iter()
            .chain(GENERAL_MODULES.iter())
            .map(|m| m.title)
            .collect();
        assert_eq!(titles(&visible), expected);
    }

    #[test]
    fn test_clerk_sees_held_tags_in_registry_order() {
        let registry = ModuleRegistry::builtin();
        // Insertion order deliberately differs from registry order.
        let clerk = Identity::new("u-2", "Ama", "ama@bursary.example", Role::Clerk)
            .with_permissions([
                PermissionTag::StationeryManagement,
                PermissionTag::PayeeManagement,
                PermissionTag::LoanLedgerManagement,
            ]);

        let visible = visible_modules(Some(&clerk), &registry);

        assert_eq!(titles(&visible), vec!["Payees", "Loan Ledger", "Stationery"]);
    }

    #[test]
    fn test_clerk_without_tags_sees_nothing() {
        let registry = ModuleRegistry::builtin();
        let clerk = Identity::new("u-3", "Kofi", "kofi@bursary.example", Role::Clerk);
        assert!(visible_modules(Some(&clerk), &registry).is_empty());
    }

    #[test]
    fn test_clerk_never_sees_admin_entries() {
        let registry = ModuleRegistry::builtin();
        let clerk = Identity::new("u-4", "Esi", "esi@bursary.example", Role::Clerk)
            .with_permissions(PermissionTag::ALL);

        let visible = visible_modules(Some(&clerk), &registry);

        assert_eq!(visible.len(), GENERAL_MODULES.len());
        assert!(visible.iter().all(|m| m.requirement != Requirement::AdminOnly));
    }

    #[test]
    fn test_unauthenticated_sees_nothing() {
        let registry = ModuleRegistry::builtin();
        assert!(visible_modules(None, &registry).is_empty());
    }
}
