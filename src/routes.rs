// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, course, question, quiz},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Public routes: browsing courses, resolving and taking quizzes.
/// * Admin routes: content editing behind the shared-secret gate.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let course_routes = Router::new()
        .route("/", get(course::list_courses))
        .route("/{id}", get(course::get_course))
        .route("/{id}/quizzes", get(course::list_course_quizzes));

    let quiz_routes = Router::new()
        .route("/{id}/resolve", get(quiz::get_quiz_details))
        .route("/{id}/attempts", post(quiz::submit_attempt));

    let admin_routes = Router::new()
        .route("/courses", post(course::create_course))
        .route("/courses/{id}", delete(course::delete_course))
        .route("/quizzes", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route(
            "/quizzes/{id}/items",
            get(quiz::get_quiz_items).put(quiz::save_quiz_items),
        )
        .route("/quizzes/{id}/attempts", get(quiz::list_attempts))
        .route("/questions", post(question::create_question))
        .route("/questions/{id}", get(question::get_question))
        // Auth runs first, then the admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route("/login", post(auth::login));

    Router::new()
        .nest("/api/courses", course_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
