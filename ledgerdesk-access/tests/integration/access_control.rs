use ledgerdesk_access::guard::{is_authorized, Requirement};
use ledgerdesk_access::identity::{Identity, PermissionTag, Role};
use ledgerdesk_access::navigation::visible_modules;
use ledgerdesk_access::page::{open_page, PageView};
use ledgerdesk_access::registry::{ModuleRegistry, ADMIN_MODULES, GENERAL_MODULES};
use ledgerdesk_access::session::{FileStore, Session, SessionStore, IDENTITY_KEY, TOKEN_KEY};

/// Every subset of a small tag pool, to sweep permission sets.
fn permission_sets() -> Vec<Vec<PermissionTag>> {
    let pool = [
        PermissionTag::PayeeManagement,
        PermissionTag::LoanLedgerManagement,
        PermissionTag::FuelAllowanceManagement,
        PermissionTag::PettyCashManagement,
    ];
    (0u32..(1 << pool.len()))
        .map(|mask| {
            pool.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, tag)| *tag)
                .collect()
        })
        .collect()
}

#[test]
fn test_admin_authorized_for_every_tag_regardless_of_set() {
    for set in permission_sets() {
        let admin = Identity::new("a", "Admin", "admin@bursary.example", Role::Administrator)
            .with_permissions(set);
        for tag in PermissionTag::ALL {
            assert!(is_authorized(Some(&admin), Requirement::Permission(tag)));
        }
    }
}

#[test]
fn test_clerk_authorized_iff_tag_held() {
    for set in permission_sets() {
        let clerk = Identity::new("c", "Clerk", "clerk@bursary.example", Role::Clerk)
            .with_permissions(set.clone());
        for tag in PermissionTag::ALL {
            assert_eq!(
                is_authorized(Some(&clerk), Requirement::Permission(tag)),
                set.contains(&tag)
            );
        }
    }
}

#[test]
fn test_anonymous_never_authorized() {
    let requirements = PermissionTag::ALL
        .into_iter()
        .map(Requirement::Permission)
        .chain([Requirement::Public, Requirement::AdminOnly]);
    for requirement in requirements {
        assert!(!is_authorized(None, requirement));
    }
}

#[test]
fn test_navigation_matches_registry_filter() {
    let registry = ModuleRegistry::builtin();

    for set in permission_sets() {
        let clerk = Identity::new("c", "Clerk", "clerk@bursary.example", Role::Clerk)
            .with_permissions(set.clone());
        let visible: Vec<_> = visible_modules(Some(&clerk), &registry)
            .into_iter()
            .map(|m| m.route)
            .collect();
        let expected: Vec<_> = GENERAL_MODULES
            .iter()
            .filter(|m| m.permission().map_or(false, |t| set.contains(&t)))
            .map(|m| m.route)
            .collect();
        assert_eq!(visible, expected);

        let admin = Identity::new("a", "Admin", "admin@bursary.example", Role::Administrator)
            .with_permissions(set);
        assert_eq!(
            visible_modules(Some(&admin), &registry).len(),
            ADMIN_MODULES.len() + GENERAL_MODULES.len()
        );
    }
}

#[test]
fn test_page_scenarios() {
    let registry = ModuleRegistry::builtin();
    let clerk = Identity::new("c", "Clerk", "clerk@bursary.example", Role::Clerk)
        .with_permissions([PermissionTag::LoanLedgerManagement]);
    let admin = Identity::new("a", "Admin", "admin@bursary.example", Role::Administrator);

    let denied = open_page(Some(&clerk), &registry, "/fuel-allowance");
    assert_eq!(denied, PageView::Unauthorized);
    assert_eq!(denied.notice(), Some("Unauthorized"));

    assert!(open_page(Some(&clerk), &registry, "/loan-ledger").is_render());
    assert!(open_page(Some(&admin), &registry, "/fuel-allowance").is_render());
}

#[test]
fn test_file_backed_session_survives_reload() {
    let tmp = tempfile::tempdir().unwrap();
    let identity = Identity::new("65f0", "Ama", "ama@bursary.example", Role::Clerk)
        .with_permissions([PermissionTag::PettyCashManagement]);

    // Simulate what a successful login leaves on disk.
    let mut store = FileStore::new(tmp.path());
    store.save(TOKEN_KEY, "tok").unwrap();
    store
        .save(IDENTITY_KEY, &serde_json::to_string(&identity).unwrap())
        .unwrap();

    let mut session = Session::restore(FileStore::new(tmp.path()));
    assert_eq!(session.current_identity(), Some(&identity));
    assert_eq!(session.token(), Some("tok"));

    session.logout();
    session.logout();

    let reloaded = Session::restore(FileStore::new(tmp.path()));
    assert!(reloaded.current_identity().is_none());
}
