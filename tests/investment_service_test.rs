mod common;

use std::sync::Arc;

use chrono::Utc;
use http::StatusCode;

use common::{anonymous_app, signed_in_app, spawn_mock_api, TOKEN};
use snf_portfolio::app::create_app;
use snf_portfolio::config::ClientConfig;
use snf_portfolio::errors::AppError;
use snf_portfolio::models::{InvestmentType, InvestmentUpdate, NewInvestment, User, UserUpdate};
use snf_portfolio::session::StaticIdentityProvider;

fn apple() -> NewInvestment {
    NewInvestment::new("Apple Inc.", "AAPL", InvestmentType::Stock, 150.00, 10.0, Utc::now())
}

#[tokio::test]
async fn create_returns_store_assigned_id_and_value() {
    let mock = spawn_mock_api().await;
    let (app, _) = signed_in_app(&mock);

    let created = app.investments.create(&apple()).await.unwrap();

    assert!(created.id.is_some());
    assert_eq!(created.value, 1500.00);
    assert_eq!(mock.count("POST", "/api/investments"), 1);
}

#[tokio::test]
async fn create_then_get_matches_draft() {
    let mock = spawn_mock_api().await;
    let (app, _) = signed_in_app(&mock);
    let draft = apple();

    let created = app.investments.create(&draft).await.unwrap();
    let id = created.id.clone().unwrap();
    let fetched = app.investments.get(&id).await.unwrap();

    assert_eq!(fetched.id.as_deref(), Some(id.as_str()));
    assert_eq!(fetched.name, draft.name);
    assert_eq!(fetched.symbol, draft.symbol);
    assert_eq!(fetched.kind, draft.kind);
    assert_eq!(fetched.price, draft.price);
    assert_eq!(fetched.quantity, draft.quantity);
    assert_eq!(fetched.value, draft.value);
    assert_eq!(fetched.purchase_date, Some(draft.purchase_date));
}

#[tokio::test]
async fn list_keeps_store_order() {
    let mock = spawn_mock_api().await;
    mock.seed("Microsoft", "MSFT", InvestmentType::Stock, 400.0, 1.0);
    mock.seed("Bitcoin", "BTC", InvestmentType::Crypto, 60000.0, 0.1);
    mock.seed("Apple Inc.", "AAPL", InvestmentType::Stock, 150.0, 2.0);
    let (app, _) = signed_in_app(&mock);

    let symbols: Vec<String> = app
        .investments
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|inv| inv.symbol)
        .collect();

    assert_eq!(symbols, vec!["MSFT", "BTC", "AAPL"]);
}

#[tokio::test]
async fn list_tolerates_store_normalized_dates() {
    let mock = spawn_mock_api().await;
    mock.store.lock().raw_list = Some(serde_json::json!([
        {
            "id": "inv-1", "name": "Apple Inc.", "symbol": "AAPL", "type": "stock",
            "price": 150.0, "quantity": 10.0, "value": 1500.0,
            "purchaseDate": "2024-01-15"
        },
        {
            "id": "inv-2", "name": "Bitcoin", "symbol": "BTC", "type": "crypto",
            "price": 60000.0, "quantity": 0.5, "value": 30000.0,
            "purchaseDate": "not a date"
        }
    ]));
    let (app, _) = signed_in_app(&mock);

    let investments = app.investments.list().await.unwrap();

    assert_eq!(investments.len(), 2);
    assert_eq!(
        investments[0].purchase_date,
        Some("2024-01-15T00:00:00Z".parse().unwrap())
    );
    assert_eq!(investments[1].purchase_date, None);
}

#[tokio::test]
async fn every_call_carries_a_fresh_bearer_token() {
    let mock = spawn_mock_api().await;
    let (app, identity) = signed_in_app(&mock);

    app.investments.list().await.unwrap();
    identity.rotate_token("rotated-token");
    app.investments.list().await.unwrap();

    let auth: Vec<Option<String>> = mock.requests().into_iter().map(|r| r.authorization).collect();
    assert_eq!(
        auth,
        vec![
            Some(format!("Bearer {}", TOKEN)),
            Some("Bearer rotated-token".to_string()),
        ]
    );
}

#[tokio::test]
async fn unauthenticated_call_goes_out_without_header_and_is_rejected() {
    let mock = spawn_mock_api().await;
    mock.store.lock().require_token = Some(TOKEN.to_string());
    let app = anonymous_app(&mock);

    let err = app.investments.list().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Unauthorized");
    assert_eq!(mock.requests()[0].authorization, None);
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let mock = spawn_mock_api().await;
    let id = mock.seed("Apple Inc.", "AAPL", InvestmentType::Stock, 150.0, 10.0);
    let (app, _) = signed_in_app(&mock);

    app.investments.delete(&id).await.unwrap();
    let err = app.investments.delete(&id).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Investment not found");
}

#[tokio::test]
async fn get_unknown_id_is_a_transport_error() {
    let mock = spawn_mock_api().await;
    let (app, _) = signed_in_app(&mock);

    let err = app.investments.get("missing").await.unwrap_err();

    assert!(matches!(err, AppError::Transport { .. }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn partial_update_touches_only_given_fields() {
    let mock = spawn_mock_api().await;
    let id = mock.seed("Apple", "AAPL", InvestmentType::Stock, 10.0, 5.0);
    let (app, _) = signed_in_app(&mock);

    let renamed = app
        .investments
        .update(&id, &InvestmentUpdate::default().name("Apple Inc."))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Apple Inc.");
    assert_eq!(renamed.value, 50.0);
    assert_eq!(mock.last_body().unwrap(), serde_json::json!({ "name": "Apple Inc." }));

    let repriced = app
        .investments
        .update(&id, &InvestmentUpdate::default().position(20.0, 5.0))
        .await
        .unwrap();
    assert_eq!(repriced.value, 100.0);
    assert_eq!(app.investments.get(&id).await.unwrap().value, 100.0);
}

#[tokio::test]
async fn rejected_create_surfaces_server_message() {
    let mock = spawn_mock_api().await;
    mock.seed("Apple Inc.", "AAPL", InvestmentType::Stock, 150.0, 10.0);
    let (app, _) = signed_in_app(&mock);

    let err = app.investments.create(&apple()).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    assert_eq!(err.to_string(), "Symbol already exists in portfolio");
}

#[tokio::test]
async fn network_failure_has_no_status() {
    // Grab a free port, then close it so nothing is listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::with_api_url(format!("http://127.0.0.1:{}/api", port));
    let app = create_app(&config, Arc::new(StaticIdentityProvider::anonymous())).unwrap();

    let err = app.investments.list().await.unwrap_err();

    assert!(matches!(err, AppError::Transport { status: None, .. }));
}

#[tokio::test]
async fn current_user_round_trip() {
    let mock = spawn_mock_api().await;
    mock.store.lock().user = Some(User {
        id: "user-1".into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
        profile_picture: None,
    });
    let (app, _) = signed_in_app(&mock);

    assert_eq!(app.users.current().await.unwrap().name, "Ada");

    let updated = app
        .users
        .update_current(&UserUpdate {
            name: Some("Ada Lovelace".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(updated.email, "ada@example.com");
    assert_eq!(mock.count("PUT", "/api/users/me"), 1);
}

#[test]
fn invalid_config_is_rejected_at_wiring() {
    let config = ClientConfig::with_api_url("localhost:8080");
    let result = create_app(&config, Arc::new(StaticIdentityProvider::anonymous()));
    assert!(matches!(result, Err(AppError::Config(_))));
}
