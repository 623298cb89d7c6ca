use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;

use taskvault::auth::TokenService;
use taskvault::config::Config;
use taskvault::routes;

const TEST_SECRET: &str = "integration-test-secret";

fn test_config() -> Config {
    Config {
        database_url: "postgres://unused-in-tests".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        server_port: 5000,
        server_host: "127.0.0.1".to_string(),
        environment: "test".to_string(),
    }
}

// Returns None (skipping the test) when DATABASE_URL is not configured.
async fn connect() -> Option<PgPool> {
    dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping: DATABASE_URL not set");
            return None;
        }
    };
    Some(
        PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test DB"),
    )
}

async fn cleanup_user(pool: &PgPool, login: &str) {
    // Tasks cascade with the owning user.
    let _ = sqlx::query("DELETE FROM users WHERE login = $1")
        .bind(login)
        .execute(pool)
        .await;
}

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .app_data(web::Data::new(TokenService::new(TEST_SECRET)))
                .app_data(web::Data::new(test_config()))
                .wrap(Cors::permissive())
                .wrap(Logger::default())
                .configure(routes::config),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let Some(pool) = connect().await else { return };
    cleanup_user(&pool, "integration_alice").await;

    let app = test_app!(pool);

    // Register a new user
    let register_payload = json!({
        "login": "integration_alice",
        "password": "secret1"
    });
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );

    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["user"]["login"], "integration_alice");
    assert_eq!(body["user"]["role"], "USER");
    assert!(body["user"]["created_at"].is_string());
    // The hash must never appear in the projection.
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());
    let registered_id = body["user"]["id"].as_i64().expect("numeric user id");

    // Registering the same login again must conflict, leaving one row.
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE login = $1")
        .bind("integration_alice")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // Login with the registered user
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&json!({
            "login": "integration_alice",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::OK,
        "Login failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );

    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    let token = body["token"].as_str().expect("token in login response");
    assert!(!token.is_empty());
    assert_eq!(body["user"]["login"], "integration_alice");

    // The token's claims decode back to the registered identity.
    let claims = TokenService::new(TEST_SECRET)
        .verify(token)
        .expect("issued token must verify");
    assert_eq!(claims.sub as i64, registered_id);
    assert_eq!(claims.login, "integration_alice");
    assert_eq!(claims.role, "USER");

    cleanup_user(&pool, "integration_alice").await;
}

#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let Some(pool) = connect().await else { return };
    cleanup_user(&pool, "integration_carol").await;

    let app = test_app!(pool);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&json!({
            "login": "integration_carol",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

    // Wrong password for an existing login.
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&json!({
            "login": "integration_carol",
            "password": "wrong-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let wrong_password_status = resp.status();
    let wrong_password_body = test::read_body(resp).await;

    // Login that does not exist at all.
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(&json!({
            "login": "integration_nobody",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let unknown_login_status = resp.status();
    let unknown_login_body = test::read_body(resp).await;

    assert_eq!(
        wrong_password_status,
        actix_web::http::StatusCode::UNAUTHORIZED
    );
    assert_eq!(wrong_password_status, unknown_login_status);
    assert_eq!(
        wrong_password_body, unknown_login_body,
        "the two failure responses must carry no distinguishing signal"
    );

    cleanup_user(&pool, "integration_carol").await;
}

#[actix_rt::test]
async fn test_register_validation_report() {
    let Some(pool) = connect().await else { return };

    let app = test_app!(pool);

    // Both fields break their length rules.
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&json!({
            "login": "ab",
            "password": "12345"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["timestamp"].is_string());

    let field_errors = body["fieldErrors"].as_array().expect("fieldErrors array");
    assert_eq!(field_errors.len(), 2);
    assert_eq!(field_errors[0]["field"], "login");
    assert_eq!(field_errors[0]["code"], "INVALID_LENGTH");
    assert_eq!(field_errors[1]["field"], "password");
    assert_eq!(field_errors[1]["code"], "INVALID_LENGTH");

    // A bad character set reports INVALID_FORMAT.
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(&json!({
            "login": "not a login!",
            "password": "secret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let field_errors = body["fieldErrors"].as_array().expect("fieldErrors array");
    assert_eq!(field_errors.len(), 1);
    assert_eq!(field_errors[0]["field"], "login");
    assert_eq!(field_errors[0]["code"], "INVALID_FORMAT");
}
