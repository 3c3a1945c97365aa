//! End-to-end flows through the public services and the full router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use family_ledger_backend::{
    config::AppConfig,
    create_router,
    domain::{
        commands::{
            account::{CreateAccountCommand, UpdateBalanceCommand},
            kid::CreateKidCommand,
            ledger::CreateLedgerCommand,
            ordering::ReorderCommand,
        },
        models::BalanceOperation,
    },
    storage::DbConnection,
    AppState,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

async fn test_state() -> (AppState, Arc<DbConnection>) {
    let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
    (AppState::new(db.clone()), db)
}

#[tokio::test]
async fn test_smith_family_scenario() {
    let (state, _) = test_state().await;

    let ledger = state
        .ledger_service
        .create_ledger(CreateLedgerCommand { name: "Smith".to_string() })
        .await
        .unwrap();
    let emma = state
        .kid_service
        .create_kid(CreateKidCommand {
            ledger_id: ledger.id.clone(),
            name: "Emma".to_string(),
            emoji: "👧".to_string(),
        })
        .await
        .unwrap()
        .unwrap();

    let savings = state
        .account_service
        .create_account(CreateAccountCommand {
            kid_id: emma.id,
            name: "Savings".to_string(),
            balance: Some(0.0),
        })
        .await
        .unwrap()
        .unwrap();
    let spending = state
        .account_service
        .create_account(CreateAccountCommand {
            kid_id: emma.id,
            name: "Spending".to_string(),
            balance: Some(0.0),
        })
        .await
        .unwrap()
        .unwrap();

    // after_id names the sibling that ends up to the right
    state
        .account_service
        .reorder_account(
            spending.id,
            ReorderCommand { before_id: None, after_id: Some(savings.id) },
        )
        .await
        .unwrap()
        .unwrap();

    let full = state.full_ledger_service.get_full_ledger(&ledger.id).await.unwrap().unwrap();
    assert_eq!(full.ledger.name, "Smith");
    assert_eq!(full.kids.len(), 1);
    assert_eq!(full.kids[0].kid.emoji, "👧");
    let names: Vec<&str> = full.kids[0].accounts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Spending", "Savings"]);

    // before_id names the sibling that ends up to the left
    state
        .account_service
        .reorder_account(
            spending.id,
            ReorderCommand { before_id: Some(savings.id), after_id: None },
        )
        .await
        .unwrap()
        .unwrap();

    let full = state.full_ledger_service.get_full_ledger(&ledger.id).await.unwrap().unwrap();
    let names: Vec<&str> = full.kids[0].accounts.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Savings", "Spending"]);
}

#[tokio::test]
async fn test_deleting_ledger_leaves_no_rows_behind() {
    let (state, db) = test_state().await;

    let ledger = state
        .ledger_service
        .create_ledger(CreateLedgerCommand { name: "Smith".to_string() })
        .await
        .unwrap();
    for kid_name in ["Emma", "Liam"] {
        let kid = state
            .kid_service
            .create_kid(CreateKidCommand {
                ledger_id: ledger.id.clone(),
                name: kid_name.to_string(),
                emoji: "🙂".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        for account_name in ["Savings", "Spending"] {
            state
                .account_service
                .create_account(CreateAccountCommand {
                    kid_id: kid.id,
                    name: account_name.to_string(),
                    balance: None,
                })
                .await
                .unwrap()
                .unwrap();
        }
    }

    assert!(state.ledger_service.delete_ledger(&ledger.id).await.unwrap());

    let kids: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM kids").fetch_one(db.pool()).await.unwrap();
    let accounts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts").fetch_one(db.pool()).await.unwrap();
    assert_eq!(kids, 0);
    assert_eq!(accounts, 0);
    assert!(state.full_ledger_service.get_full_ledger(&ledger.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("ledger.db").display());

    let (ledger_id, account_id) = {
        let state = AppState::new(Arc::new(DbConnection::new(&url, 2).await.unwrap()));
        let ledger = state
            .ledger_service
            .create_ledger(CreateLedgerCommand { name: "Smith".to_string() })
            .await
            .unwrap();
        let kid = state
            .kid_service
            .create_kid(CreateKidCommand {
                ledger_id: ledger.id.clone(),
                name: "Emma".to_string(),
                emoji: "👧".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        let account = state
            .account_service
            .create_account(CreateAccountCommand {
                kid_id: kid.id,
                name: "Savings".to_string(),
                balance: Some(4.0),
            })
            .await
            .unwrap()
            .unwrap();
        state
            .balance_service
            .update_balance(UpdateBalanceCommand {
                account_id: account.id,
                amount: 6.0,
                operation: BalanceOperation::Add,
            })
            .await
            .unwrap()
            .unwrap();
        (ledger.id, account.id)
    };

    // Reconnecting runs the schema setup again, which must leave the data alone
    let state = AppState::new(Arc::new(DbConnection::new(&url, 2).await.unwrap()));
    let full = state.full_ledger_service.get_full_ledger(&ledger_id).await.unwrap().unwrap();
    assert_eq!(full.kids[0].kid.name, "Emma");
    assert_eq!(full.kids[0].accounts[0].id, account_id);
    assert_eq!(full.kids[0].accounts[0].balance, 10.0);
}

#[tokio::test]
async fn test_router_serves_under_api_prefix() {
    let (state, _) = test_state().await;
    let config = AppConfig::from_lookup(|_| None).unwrap();
    let app = create_router(state, &config);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ledgers")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": "Smith" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let ledger: Value = serde_json::from_slice(&body).unwrap();
    let id = ledger["id"].as_str().unwrap();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/ledgers/{}/full", id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let full: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(full["name"], "Smith");
    assert_eq!(full["kids"], json!([]));
}
