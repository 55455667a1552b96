use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use cooking_assistant::{
    create_router,
    recipe::{Recipe, RecipeStep},
    services::SilentAlarm,
    state::{AppState, CookingSession},
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

fn app() -> Router {
    let recipe = Recipe::new(
        "Tea",
        vec![
            RecipeStep::new("boil", "Boil the kettle", None),
            RecipeStep::new("steep", "Steep the leaves", Some(180)),
            RecipeStep::new("pour", "Pour and enjoy", None),
        ],
    );
    let session = CookingSession::new(recipe, Arc::new(SilentAlarm)).unwrap();
    let state = AppState::new(session, "127.0.0.1".to_string(), 20554, Duration::from_secs(1));
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_status_reports_first_step() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["title"], "Tea");
    assert_eq!(body["session"]["step_number"], 1);
    assert_eq!(body["session"]["total_steps"], 3);
    assert_eq!(body["session"]["finished"], false);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test]
async fn test_steps_render_every_mode() {
    let app = app();
    send(&app, Method::POST, "/action").await;

    let (status, body) = send(&app, Method::GET, "/steps").await;
    assert_eq!(status, StatusCode::OK);
    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps[0]["mode"], "completed");
    assert_eq!(steps[1]["mode"], "active");
    assert_eq!(steps[1]["heading"], "Step 2 of 3");
    assert_eq!(steps[1]["primary"]["kind"], "start_timer");
    assert_eq!(steps[1]["primary"]["duration"], "03:00");
    assert_eq!(steps[2]["mode"], "upcoming");
    assert_eq!(steps[2]["duration_label"], Value::Null);
}

#[tokio::test]
async fn test_action_starts_and_pauses_timer() {
    let app = app();
    send(&app, Method::POST, "/action").await;

    let (status, body) = send(&app, Method::POST, "/action").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["result"], "timer");
    assert_eq!(body["result"]["action"], "started");
    assert_eq!(body["session"]["timer"]["phase"], "running");

    let (_, card) = send(&app, Method::GET, "/steps/active").await;
    assert_eq!(card["primary"]["kind"], "pause");
    assert_eq!(card["timer_panel"]["label"], "Timer running");

    let (_, body) = send(&app, Method::POST, "/action").await;
    assert_eq!(body["result"]["action"], "paused");
    assert_eq!(body["session"]["timer"]["remaining_seconds"], 180);
}

#[tokio::test]
async fn test_activate_validates_step_number() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/steps/3/activate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["step_number"], 3);
    assert_eq!(body["session"]["completed_steps"], 2);

    let (status, _) = send(&app, Method::POST, "/steps/0/activate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::POST, "/steps/4/activate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_finished_recipe_rejects_actions_until_restart() {
    let app = app();
    send(&app, Method::POST, "/steps/3/activate").await;

    let (status, body) = send(&app, Method::POST, "/action").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["result"], "finished");
    assert_eq!(body["session"]["finished"], true);

    let (status, _) = send(&app, Method::POST, "/action").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(&app, Method::GET, "/steps/active").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/restart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["step_number"], 1);
    assert_eq!(body["session"]["completed_steps"], 0);
}
