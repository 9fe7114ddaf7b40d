// tests/api_tests.rs

use std::sync::Arc;

use quizmaster::{
    config::Config, engine::resolver::ResolveOptions, routes, seed::seed_demo, state::AppState,
    store::SqliteStore,
};
use sqlx::sqlite::SqlitePoolOptions;

const ADMIN_PASSWORD: &str = "admin123";

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. One connection, otherwise every connection gets its own in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    // 2. Run migrations and seed the demo course
    let store = SqliteStore::new(pool);
    store.migrate().await.expect("Failed to migrate database");
    seed_demo(&store).await.expect("Failed to seed demo content");

    // 3. Create test configuration and state
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        resolve: ResolveOptions::default(),
        seed_demo: true,
        bind_addr: "127.0.0.1:0".to_string(),
    };

    let state = AppState::new(Arc::new(store), config).expect("Failed to build state");

    // 4. Create the router with the app state
    let app = routes::create_router(state);

    // 5. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 6. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn admin_token(client: &reqwest::Client, address: &str) -> String {
    let resp: serde_json::Value = client
        .post(&format!("{}/api/admin/login", address))
        .json(&serde_json::json!({ "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .expect("Failed to parse login json");

    resp["token"].as_str().expect("Token not found").to_string()
}

async fn submit(
    client: &reqwest::Client,
    address: &str,
    quiz_id: &str,
    answers: serde_json::Value,
) -> reqwest::Response {
    client
        .post(&format!("{}/api/quizzes/{}/attempts", address, quiz_id))
        .json(&serde_json::json!({ "answers": answers }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn courses_are_listed() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let courses: Vec<serde_json::Value> = client
        .get(&format!("{}/api/courses", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["id"], "c1");

    let quizzes: Vec<serde_json::Value> = client
        .get(&format!("{}/api/courses/c1/quizzes", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<&str> = quizzes.iter().map(|q| q["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["q1", "q2", "q3"]);
    assert_eq!(quizzes[2]["isComposite"], true);
    assert_eq!(quizzes[2]["settings"]["timeLimit"], 30);

    let missing = client
        .get(&format!("{}/api/courses/nope", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn composite_quiz_resolves_in_order() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let details: serde_json::Value = client
        .get(&format!("{}/api/quizzes/q3/resolve", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(details["quiz"]["id"], "q3");
    assert_eq!(details["totalPoints"], 20);

    let questions = details["questions"].as_array().unwrap();
    let pairs: Vec<(&str, &str)> = questions
        .iter()
        .map(|q| {
            (
                q["id"].as_str().unwrap(),
                q["sourceQuizId"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(pairs, vec![("qq1", "q1"), ("qq2", "q2"), ("qq3", "q3")]);
}

#[tokio::test]
async fn unknown_quiz_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let resolve = client
        .get(&format!("{}/api/quizzes/nope/resolve", address))
        .send()
        .await
        .unwrap();
    assert_eq!(resolve.status().as_u16(), 404);

    let attempt = submit(&client, &address, "nope", serde_json::json!({})).await;
    assert_eq!(attempt.status().as_u16(), 404);
}

#[tokio::test]
async fn single_question_scenarios() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let right = submit(&client, &address, "q1", serde_json::json!({ "qq1": ["o2"] })).await;
    assert_eq!(right.status().as_u16(), 201);
    let right: serde_json::Value = right.json().await.unwrap();
    assert_eq!(right["totalScore"], 5);
    assert_eq!(right["maxScore"], 5);
    assert_eq!(right["percentage"], 100);

    let wrong: serde_json::Value = submit(&client, &address, "q1", serde_json::json!({ "qq1": ["o1"] }))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(wrong["totalScore"], 0);
    assert_eq!(wrong["percentage"], 0);

    let empty: serde_json::Value = submit(&client, &address, "q1", serde_json::json!({}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(empty["results"][0]["isCorrect"], false);
    assert_eq!(empty["results"][0]["score"], 0);
    assert_eq!(empty["results"][0]["maxPoints"], 5);
}

#[tokio::test]
async fn composite_all_correct_scores_full() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let attempt: serde_json::Value = submit(
        &client,
        &address,
        "q3",
        serde_json::json!({ "qq1": ["o2"], "qq2": ["o5"], "qq3": ["o9", "o7"] }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(attempt["maxScore"], 20);
    assert_eq!(attempt["totalScore"], 20);
    assert_eq!(attempt["percentage"], 100);
    assert_eq!(attempt["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn partial_multi_select_earns_nothing() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let attempt: serde_json::Value = submit(
        &client,
        &address,
        "q3",
        serde_json::json!({ "qq1": ["o2"], "qq2": ["o5"], "qq3": ["o7"] }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(attempt["totalScore"], 10);
    assert_eq!(attempt["percentage"], 50);
    assert_eq!(attempt["results"][2]["isCorrect"], false);
}

#[tokio::test]
async fn admin_routes_require_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let no_token = client
        .get(&format!("{}/api/admin/quizzes", address))
        .send()
        .await
        .unwrap();
    assert_eq!(no_token.status().as_u16(), 401);

    let bad_login = client
        .post(&format!("{}/api/admin/login", address))
        .json(&serde_json::json!({ "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_login.status().as_u16(), 401);

    let token = admin_token(&client, &address).await;
    let with_token = client
        .get(&format!("{}/api/admin/quizzes", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(with_token.status().as_u16(), 200);
}

#[tokio::test]
async fn admin_builds_composite_quiz() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &address).await;
    let auth = format!("Bearer {}", token);

    // 1. New question, allowMultiple derived from two correct options
    let question: serde_json::Value = client
        .post(&format!("{}/api/admin/questions", address))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "text": "Pick the primes",
            "points": 4,
            "options": [
                { "id": "p2", "text": "2", "isCorrect": true },
                { "id": "p3", "text": "3", "isCorrect": true },
                { "id": "p4", "text": "4" }
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(question["allowMultiple"], true);
    let question_id = question["id"].as_str().unwrap().to_string();

    // 2. New composite quiz
    let quiz_resp = client
        .post(&format!("{}/api/admin/quizzes", address))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "courseId": "c1",
            "title": "Final",
            "isComposite": true,
            "settings": { "showCorrectAnswers": true }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(quiz_resp.status().as_u16(), 201);
    let quiz: serde_json::Value = quiz_resp.json().await.unwrap();
    let quiz_id = quiz["id"].as_str().unwrap().to_string();

    // 3. Self reference is rejected
    let self_ref = client
        .put(&format!("{}/api/admin/quizzes/{}/items", address, quiz_id))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "items": [{ "type": "quiz_ref", "targetId": quiz_id }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(self_ref.status().as_u16(), 400);

    // 4. Final = own question, then the whole midterm
    let saved: Vec<serde_json::Value> = client
        .put(&format!("{}/api/admin/quizzes/{}/items", address, quiz_id))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "items": [
                { "type": "question", "targetId": question_id },
                { "type": "quiz_ref", "targetId": "q3" }
            ]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1]["position"], 1);
    assert_eq!(saved[1]["quizId"], quiz_id.as_str());

    let details: serde_json::Value = client
        .get(&format!("{}/api/quizzes/{}/resolve", address, quiz_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let order: Vec<&str> = details["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec![question_id.as_str(), "qq1", "qq2", "qq3"]);
    assert_eq!(details["totalPoints"], 24);

    // 5. Attempts are appended, never replaced
    for _ in 0..2 {
        submit(&client, &address, &quiz_id, serde_json::json!({})).await;
    }
    let attempts: Vec<serde_json::Value> = client
        .get(&format!("{}/api/admin/quizzes/{}/attempts", address, quiz_id))
        .header("Authorization", &auth)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(attempts.len(), 2);
    assert_ne!(attempts[0]["id"], attempts[1]["id"]);
}

#[tokio::test]
async fn question_without_correct_option_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &address).await;

    let response = client
        .post(&format!("{}/api/admin/questions", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "text": "No answer here",
            "options": [{ "text": "A" }, { "text": "B" }]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn question_points_above_cap_are_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &address).await;

    let response = client
        .post(&format!("{}/api/admin/questions", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "text": "Worth too much",
            "points": 4294967295u64,
            "options": [{ "text": "A", "isCorrect": true }]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
