//! End-to-end dispatch tests
//!
//! Each test registers routes on a real router, resolves requests into a
//! buffered response and checks exactly what was written.

use ivy_http::*;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
}

async fn resolve(
    router: &Router,
    method: &str,
    url: &str,
) -> (DispatchOutcome, Arc<BufferedResponse>) {
    let sink = BufferedResponse::shared();
    let outcome = router.resolve(method, url, sink.clone()).await;
    (outcome, sink)
}

#[tokio::test]
async fn test_user_by_id_returns_json() {
    let mut router = Router::new();
    router
        .get(
            "/users/:id",
            |params: PathParams| async move {
                json!({ "id": params.get("id").unwrap_or_default() })
            },
            RouteOptions::new(),
        )
        .unwrap();

    let (outcome, sink) = resolve(&router, "GET", "/users/42").await;

    assert_eq!(outcome, DispatchOutcome::Responded);
    assert_eq!(sink.status(), StatusCode::OK);
    assert!(!sink.status_written());
    assert_eq!(sink.header("content-type").as_deref(), Some("application/json"));
    assert_eq!(sink.body(), "{\n    \"id\": \"42\"\n}");
    assert_eq!(sink.end_calls(), 1);
}

#[tokio::test]
async fn test_ping_returns_plain_text() {
    let mut router = Router::new();
    router.get("/ping", sync_handler(|_| "pong"), RouteOptions::new()).unwrap();

    let (outcome, sink) = resolve(&router, "GET", "/ping").await;

    assert_eq!(outcome, DispatchOutcome::Responded);
    assert_eq!(sink.body(), "pong");
    assert_eq!(sink.header("content-type"), None);
    assert!(sink.headers().is_empty());
}

#[tokio::test]
async fn test_unmatched_path_is_not_found() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut router = Router::new();
    router
        .get(
            "/users/:id",
            sync_handler(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                "user"
            }),
            RouteOptions::new(),
        )
        .unwrap();

    for url in ["/nonexistent", "/users", "/users/1/posts", "/"] {
        let (outcome, sink) = resolve(&router, "GET", url).await;
        assert_eq!(outcome, DispatchOutcome::NotFound, "{url}");
        assert_eq!(sink.status(), StatusCode::NOT_FOUND);
        assert_eq!(sink.body(), "Route not found");
        assert_eq!(sink.end_calls(), 1);
    }

    let (outcome, _) = resolve(&router, "POST", "/users/1").await;
    assert_eq!(outcome, DispatchOutcome::NotFound);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invalid_config_is_rejected_before_serving() {
    let result = Router::new().with_config(RouterConfig {
        json_indent: 100_000,
        ..RouterConfig::default()
    });

    let err = result.unwrap_err();
    assert!(matches!(err, HttpError::Config(_)));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unsupported_method_matches_not_found() {
    let mut router = Router::new();
    router.get("/ping", sync_handler(|_| "pong"), RouteOptions::new()).unwrap();

    for method in ["PATCH", "HEAD", "get", "BREW"] {
        let (outcome, sink) = resolve(&router, method, "/ping").await;
        assert_eq!(outcome, DispatchOutcome::NotFound, "{method}");
        assert_eq!(sink.status(), StatusCode::NOT_FOUND);
        assert_eq!(sink.body(), "Route not found");
    }
}

#[tokio::test]
async fn test_params_are_passed_verbatim() {
    let mut router = Router::new();
    router
        .put(
            "/orgs/:org/repos/:repo",
            |params: PathParams| async move { HandlerResult::json(params) },
            RouteOptions::new(),
        )
        .unwrap();
    let router = router
        .with_config(RouterConfig {
            json_indent: 0,
            ..RouterConfig::default()
        })
        .unwrap();

    let (_, sink) = resolve(&router, "PUT", "/orgs/ivy/repos/core%20lib?tab=1").await;
    let body: serde_json::Value = serde_json::from_str(&sink.body()).unwrap();

    assert_eq!(body, json!({ "org": "ivy", "repo": "core%20lib" }));
}

#[tokio::test]
async fn test_later_registration_wins() {
    let mut router = Router::new();
    router.post("/items", sync_handler(|_| "first"), RouteOptions::new()).unwrap();
    router.post("/items", sync_handler(|_| "second"), RouteOptions::new()).unwrap();

    let (_, sink) = resolve(&router, "POST", "/items").await;
    assert_eq!(sink.body(), "second");
}

#[tokio::test]
async fn test_same_shape_replaces_param_names() {
    let mut router = Router::new();
    for pattern in ["/posts/:id", "/posts/:slug"] {
        router
            .get(
                pattern,
                |p: PathParams| async move { HandlerResult::json(p) },
                RouteOptions::new(),
            )
            .unwrap();
    }

    let matched = router.find_matching_route(HttpMethod::GET, "/posts/hello").unwrap();
    assert_eq!(matched.pattern, "/posts/:slug");
    assert_eq!(matched.params.get("slug"), Some("hello"));
    assert!(!matched.params.contains("id"));
}

#[tokio::test]
async fn test_static_wins_over_param_and_splat() {
    let mut router = Router::new();
    router.get("/files/*path", sync_handler(|_| "splat"), RouteOptions::new()).unwrap();
    router.get("/files/:name", sync_handler(|_| "param"), RouteOptions::new()).unwrap();
    router.get("/files/readme", sync_handler(|_| "static"), RouteOptions::new()).unwrap();

    let (_, sink) = resolve(&router, "GET", "/files/readme").await;
    assert_eq!(sink.body(), "static");

    let (_, sink) = resolve(&router, "GET", "/files/notes.txt").await;
    assert_eq!(sink.body(), "param");

    let (_, sink) = resolve(&router, "GET", "/files/docs/notes.txt").await;
    assert_eq!(sink.body(), "splat");
}

#[tokio::test]
async fn test_encoding_precedence() {
    let mut router = Router::new();
    router
        .get("/text", sync_handler(|_| "{\"a\": 1}"), RouteOptions::new())
        .unwrap();
    router
        .get("/display", sync_handler(|_| HandlerResult::display(3.5)), RouteOptions::new())
        .unwrap();
    router
        .get(
            "/user",
            sync_handler(|_| HandlerResult::json(User { id: 1, name: "Ada".into() })),
            RouteOptions::new(),
        )
        .unwrap();

    let (_, text) = resolve(&router, "GET", "/text").await;
    assert_eq!(text.body(), "{\"a\": 1}");
    assert_eq!(text.header("content-type"), None);

    let (_, display) = resolve(&router, "GET", "/display").await;
    assert_eq!(display.body(), "3.5");
    assert_eq!(display.header("content-type"), None);

    let (_, user) = resolve(&router, "GET", "/user").await;
    assert_eq!(user.header("content-type").as_deref(), Some("application/json"));
    assert_eq!(user.body(), "{\n    \"id\": 1,\n    \"name\": \"Ada\"\n}");
}

#[tokio::test]
async fn test_unserializable_result_is_server_error() {
    let mut router = Router::new();
    router
        .delete(
            "/broken",
            sync_handler(|_| {
                let mut map = HashMap::new();
                map.insert(vec![1u8], "sequence keys are not valid");
                HandlerResult::json(map)
            }),
            RouteOptions::new(),
        )
        .unwrap();

    let (outcome, sink) = resolve(&router, "DELETE", "/broken").await;

    assert_eq!(outcome, DispatchOutcome::EncodingFailed);
    assert_eq!(sink.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(sink.body(), "Server error.");
    assert!(sink.headers().is_empty());
    assert_eq!(sink.end_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_handler_times_out() {
    let mut router = Router::new()
        .with_config(RouterConfig {
            handler_timeout_secs: 1,
            ..RouterConfig::default()
        })
        .unwrap();
    router
        .get(
            "/slow",
            |_p: PathParams| async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                "too late"
            },
            RouteOptions::new(),
        )
        .unwrap();

    let (outcome, sink) = resolve(&router, "GET", "/slow").await;

    assert_eq!(outcome, DispatchOutcome::HandlerTimedOut);
    assert_eq!(sink.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(sink.body(), "Server error.");
    assert_eq!(sink.end_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_timeout_waits_for_handler() {
    let mut router = Router::new()
        .with_config(RouterConfig::without_timeouts())
        .unwrap();
    router
        .get(
            "/slow",
            |_p: PathParams| async {
                tokio::time::sleep(Duration::from_secs(120)).await;
                "done"
            },
            RouteOptions::new(),
        )
        .unwrap();

    let (outcome, sink) = resolve(&router, "GET", "/slow").await;

    assert_eq!(outcome, DispatchOutcome::Responded);
    assert_eq!(sink.body(), "done");
}

#[tokio::test]
async fn test_shared_router_serves_concurrent_requests() {
    let mut router = Router::new();
    router
        .get(
            "/echo/:n",
            |params: PathParams| async move {
                tokio::task::yield_now().await;
                params.get("n").unwrap_or_default().to_string()
            },
            RouteOptions::new(),
        )
        .unwrap();
    let router = Arc::new(router);

    let tasks: Vec<_> = (0..16)
        .map(|n| {
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                let sink = BufferedResponse::shared();
                router.resolve("GET", &format!("/echo/{n}"), sink.clone()).await;
                (n, sink.body())
            })
        })
        .collect();

    for task in tasks {
        let (n, body) = task.await.unwrap();
        assert_eq!(body, n.to_string());
    }
}

#[tokio::test]
async fn test_buffered_response_converts_to_http_response() {
    let mut router = Router::new();
    router
        .get("/json", sync_handler(|_| json!({ "ok": true })), RouteOptions::new())
        .unwrap();

    let (_, sink) = resolve(&router, "GET", "/json").await;
    let response = sink.to_http_response().unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(response.body(), "{\n    \"ok\": true\n}");
}
