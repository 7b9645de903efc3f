//! Client session against a live gateway on an ephemeral port.

use ledgerdesk_access::guard::Requirement;
use ledgerdesk_access::identity::{PermissionTag, Role};
use ledgerdesk_access::page::PageView;
use ledgerdesk_access::registry::ModuleRegistry;
use ledgerdesk_access::session::{
    ClientConfig, Credentials, HttpAuthenticator, MemoryStore, Session, SessionError,
    SessionStore, TOKEN_KEY,
};
use ledgerdesk_gateway::accounts::NewAccount;
use ledgerdesk_gateway::auth::TokenIssuer;
use ledgerdesk_gateway::{app, AppState};
use std::collections::BTreeSet;
use tokio::net::TcpListener;

const PASSWORD: &str = "correct horse";

async fn spawn_gateway() -> String {
    let state = AppState::new(
        TokenIssuer::new(b"integration-secret", "ledgerdesk"),
        4, // bcrypt minimum cost (bcrypt::MIN_COST is private)
    );
    state
        .accounts
        .create(NewAccount {
            name: "Ama Mensah".to_string(),
            email: "ama@bursary.example".to_string(),
            password: PASSWORD.to_string(),
            role: Role::Clerk,
            permissions: BTreeSet::from([
                PermissionTag::LoanLedgerManagement,
                PermissionTag::PettyCashManagement,
            ]),
        })
        .await
        .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn authenticator(base_url: &str) -> HttpAuthenticator {
    HttpAuthenticator::new(ClientConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_login_round_trip() {
    let base = spawn_gateway().await;
    let mut session = Session::new(MemoryStore::default());

    let identity = session
        .login(
            &authenticator(&base),
            &Credentials::new("ama@bursary.example", PASSWORD),
        )
        .await
        .unwrap()
        .clone();

    assert_eq!(identity.role, Role::Clerk);
    assert!(session.is_authorized(Requirement::Permission(PermissionTag::PettyCashManagement)));
    assert!(!session.is_authorized(Requirement::AdminOnly));

    let registry = ModuleRegistry::builtin();
    let routes: Vec<_> = session
        .visible_modules(&registry)
        .into_iter()
        .map(|m| m.route)
        .collect();
    assert_eq!(routes, vec!["/loan-ledger", "/petty-cash"]);
    assert_eq!(
        session.open_page(&registry, "/fuel-allowance"),
        PageView::Unauthorized
    );

    // The stored token is accepted by the gateway.
    let token = session.store().load(TOKEN_KEY).unwrap().unwrap();
    let me: serde_json::Value = reqwest::Client::new()
        .get(format!("{}/api/auth/me", base))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["id"], identity.id.as_str());
}

#[tokio::test]
async fn test_wrong_password_leaves_session_untouched() {
    let base = spawn_gateway().await;
    let mut session = Session::new(MemoryStore::default());

    let err = session
        .login(
            &authenticator(&base),
            &Credentials::new("ama@bursary.example", "wrong"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Authentication { .. }));
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(!session.is_authenticated());
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_foreign_module_forbidden_by_gateway() {
    let base = spawn_gateway().await;
    let mut session = Session::new(MemoryStore::default());
    session
        .login(
            &authenticator(&base),
            &Credentials::new("ama@bursary.example", PASSWORD),
        )
        .await
        .unwrap();
    let token = session.token().unwrap().to_string();
    let client = reqwest::Client::new();

    let denied = client
        .post(format!("{}/api/ledgers/fuel-allowance/entries", base))
        .bearer_auth(&token)
        .json(&serde_json::json!({"fields": {"litres": 40}}))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), reqwest::StatusCode::FORBIDDEN);
    let body: serde_json::Value = denied.json().await.unwrap();
    assert_eq!(body["message"], "Access denied");

    let allowed = client
        .post(format!("{}/api/ledgers/petty-cash/entries", base))
        .bearer_auth(&token)
        .json(&serde_json::json!({"fields": {"amount": 5}}))
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), reqwest::StatusCode::CREATED);

    session.logout();
    assert!(session.token().is_none());
}
