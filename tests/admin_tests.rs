// tests/admin_tests.rs

use std::sync::Arc;

use prepper::{config::Config, routes, seed::seed_database, state::AppState, store::MemoryStore};
use serde_json::{Value, json};

async fn spawn_app() -> (String, Config) {
    let config = Config::for_tests("admin_test_secret");

    let store = Arc::new(MemoryStore::new());
    seed_database(store.as_ref(), &config).await.unwrap();

    let app = routes::create_router(AppState::new(store, config.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, config)
}

async fn login(client: &reqwest::Client, address: &str, email: &str, password: &str) -> String {
    let body: Value = client
        .post(format!("{}/auth/login", address))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["token"].as_str().expect("Token not found").to_string()
}

async fn submit(client: &reqwest::Client, address: &str, token: &str) {
    let response = client
        .post(format!("{}/quiz/submit", address))
        .bearer_auth(token)
        .json(&json!({ "answers": [{ "qId": 1, "answer": "B" }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn stats_require_admin_role() {
    let (address, _) = spawn_app().await;
    let client = reqwest::Client::new();

    let no_token = client
        .get(format!("{}/admin/stats", address))
        .send()
        .await
        .unwrap();
    assert_eq!(no_token.status().as_u16(), 401);

    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let signup: Value = client
        .post(format!("{}/auth/signup", address))
        .json(&json!({ "name": "Plain", "email": email, "password": "password123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let forbidden = client
        .get(format!("{}/admin/stats", address))
        .bearer_auth(signup["token"].as_str().unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status().as_u16(), 403);
}

#[tokio::test]
async fn seeded_admin_sees_stats() {
    let (address, config) = spawn_app().await;
    let client = reqwest::Client::new();
    let token = login(&client, &address, &config.admin_email, &config.admin_password).await;

    let response = client
        .get(format!("{}/admin/stats", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let stats: Value = response.json().await.unwrap();
    assert!(stats["totalUsers"].as_u64().unwrap() >= 1);
    assert!(stats["totalAttempts"].as_u64().is_some());
    assert_eq!(stats["adminUser"]["email"], config.admin_email.as_str());
}

/// Recent attempts only ever list the calling admin's own attempts.
#[tokio::test]
async fn recent_attempts_only_include_callers_attempts() {
    let (address, config) = spawn_app().await;
    let client = reqwest::Client::new();
    let admin_token = login(&client, &address, &config.admin_email, &config.admin_password).await;

    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let signup: Value = client
        .post(format!("{}/auth/signup", address))
        .json(&json!({ "name": "Taker", "email": email, "password": "password123" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let user_token = signup["token"].as_str().unwrap();

    submit(&client, &address, user_token).await;
    submit(&client, &address, user_token).await;
    submit(&client, &address, &admin_token).await;

    let stats: Value = client
        .get(format!("{}/admin/stats", address))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["totalAttempts"], 3);
    let recent = stats["recentAttempts"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["userId"], stats["adminUser"]["id"]);
}
