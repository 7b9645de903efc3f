#![no_main]

use ledgerdesk_access::guard::{is_authorized, Requirement};
use ledgerdesk_access::identity::{Identity, PermissionTag};
use ledgerdesk_access::navigation::visible_modules;
use ledgerdesk_access::registry::ModuleRegistry;
use ledgerdesk_access::session::{MemoryStore, Session, SessionStore, IDENTITY_KEY, TOKEN_KEY};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary stored identities must never panic on restore.
    let mut store = MemoryStore::new();
    let _ = store.save(TOKEN_KEY, "fuzz-token");
    let _ = store.save(IDENTITY_KEY, data);
    let session = Session::restore(store);

    if let Ok(identity) = serde_json::from_str::<Identity>(data) {
        assert_eq!(session.current_identity(), Some(&identity));

        // Administrators pass every tag; clerks pass exactly the tags they hold.
        for tag in PermissionTag::ALL {
            let granted = is_authorized(Some(&identity), Requirement::Permission(tag));
            assert_eq!(
                granted,
                identity.is_administrator() || identity.has_permission(tag)
            );
        }

        let registry = ModuleRegistry::builtin();
        let visible = visible_modules(Some(&identity), &registry);
        assert!(visible.len() <= registry.iter().count());
    } else {
        assert!(session.current_identity().is_none());
    }
});
