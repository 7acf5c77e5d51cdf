use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use lesson_service::config::{GeminiSettings, GithubSettings, LessonConfig};
use lesson_service::startup::Application;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_OWNER: &str = "octo";
pub const TEST_REPO: &str = "lessons";

/// Behavior of the stub upstream servers for one test.
pub struct TestStubs {
    /// Directory listing returned by the GitHub contents GET.
    pub listing: Value,
    /// Status code of the listing response.
    pub listing_status: StatusCode,
    /// Sha returned for file metadata lookups; None means 404 (new file).
    pub existing_sha: Option<String>,
    /// Full body returned by the Gemini stub.
    pub gemini_response: Value,
}

impl Default for TestStubs {
    fn default() -> Self {
        Self {
            listing: json!([]),
            listing_status: StatusCode::OK,
            existing_sha: None,
            gemini_response: gemini_reply("<h1>Generated Lesson</h1>"),
        }
    }
}

pub fn file_entry(name: &str) -> Value {
    json!({ "name": name, "type": "file", "sha": "blobsha" })
}

pub fn dir_entry(name: &str) -> Value {
    json!({ "name": name, "type": "dir" })
}

pub fn gemini_reply(fragment: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": fragment } ] } }
        ]
    })
}

#[derive(Clone)]
pub struct GithubStub {
    inner: Arc<GithubStubInner>,
}

struct GithubStubInner {
    listing: Value,
    listing_status: StatusCode,
    existing_sha: Option<String>,
    last_put: Mutex<Option<(String, Value)>>,
}

impl GithubStub {
    /// Path and body of the most recent contents PUT, if any.
    pub fn last_put(&self) -> Option<(String, Value)> {
        self.inner.last_put.lock().unwrap().clone()
    }
}

async fn github_contents_get(
    State(stub): State<GithubStub>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
) -> impl IntoResponse {
    if path.ends_with(".html") {
        // File metadata lookup for upsert.
        return match &stub.inner.existing_sha {
            Some(sha) => (StatusCode::OK, Json(json!({ "sha": sha }))),
            None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))),
        };
    }

    if stub.inner.listing_status != StatusCode::OK {
        return (
            stub.inner.listing_status,
            Json(json!({ "message": "upstream unavailable" })),
        );
    }

    (StatusCode::OK, Json(stub.inner.listing.clone()))
}

async fn github_contents_put(
    State(stub): State<GithubStub>,
    Path((owner, repo, path)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *stub.inner.last_put.lock().unwrap() = Some((path.clone(), body));

    Json(json!({
        "content": {
            "html_url": format!("https://github.test/{}/{}/blob/main/{}", owner, repo, path)
        },
        "commit": {
            "html_url": format!("https://github.test/{}/{}/commit/deadbeef", owner, repo)
        }
    }))
}

async fn gemini_generate(State(response): State<Arc<Value>>) -> impl IntoResponse {
    Json(response.as_ref().clone())
}

async fn spawn_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{}", addr)
}

pub struct TestApp {
    pub address: String,
    pub github: GithubStub,
}

impl TestApp {
    pub async fn spawn(stubs: TestStubs) -> Self {
        let github = GithubStub {
            inner: Arc::new(GithubStubInner {
                listing: stubs.listing,
                listing_status: stubs.listing_status,
                existing_sha: stubs.existing_sha,
                last_put: Mutex::new(None),
            }),
        };

        let github_router = Router::new()
            .route(
                "/repos/:owner/:repo/contents/*path",
                get(github_contents_get).put(github_contents_put),
            )
            .with_state(github.clone());
        let github_base = spawn_router(github_router).await;

        let gemini_router = Router::new()
            .route("/models/:model", post(gemini_generate))
            .with_state(Arc::new(stubs.gemini_response));
        let gemini_base = spawn_router(gemini_router).await;

        let config = LessonConfig {
            common: service_core::config::Config { port: 0 },
            github: GithubSettings {
                token: "test-token".to_string(),
                owner: TEST_OWNER.to_string(),
                repo: TEST_REPO.to_string(),
                branch: "main".to_string(),
                api_base_url: github_base,
            },
            gemini: GeminiSettings {
                api_base_url: gemini_base,
                model: "gemini-test".to_string(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            github,
        }
    }
}
