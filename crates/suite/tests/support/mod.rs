//! A local stand-in for the placeholder blog API.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::Path;
use std::time::Duration;

use postprobe_domain::FixturePayload;
use postprobe_infrastructure::{SuiteConfig, init_test_tracing};
use postprobe_suite::ApiSetup;
use serde_json::{Map, Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const POST_COUNT: u64 = 100;

/// Serves `/posts` the way the public API does.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderApi {
    delay: Option<Duration>,
}

impl PlaceholderApi {
    /// Delays every response by `delay`.
    pub fn delayed(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }

    fn post(id: u64) -> Value {
        let title = if id == 2 {
            "qui est esse".to_string()
        } else {
            format!("post {id}")
        };
        json!({
            "userId": (id - 1) / 10 + 1,
            "id": id,
            "title": title,
            "body": format!("body of post {id}"),
        })
    }

    fn comments(post_id: u64) -> Value {
        (1..=5)
            .map(|n| {
                json!({
                    "postId": post_id,
                    "id": (post_id - 1) * 5 + n,
                    "name": format!("comment {n}"),
                    "email": format!("reader{n}@example.com"),
                    "body": "nice post",
                })
            })
            .collect()
    }

    fn submitted(request: &Request) -> Map<String, Value> {
        match serde_json::from_slice(&request.body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    fn route(request: &Request) -> (u16, Value) {
        let segments: Vec<&str> = request
            .url
            .path()
            .trim_matches('/')
            .split('/')
            .collect();
        let id = segments
            .get(1)
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|id| (1..=POST_COUNT).contains(id));

        match (request.method.as_str(), segments.as_slice(), id) {
            ("POST", ["posts"], _) => {
                let mut created = Self::submitted(request);
                created.insert("id".to_string(), json!(POST_COUNT + 1));
                (201, Value::Object(created))
            }
            ("GET", ["posts", _], Some(id)) => (200, Self::post(id)),
            ("GET", ["posts", _, "comments"], Some(id)) => (200, Self::comments(id)),
            ("PUT", ["posts", _], Some(id)) => {
                let mut replaced = Self::submitted(request);
                replaced.insert("id".to_string(), json!(id));
                (200, Value::Object(replaced))
            }
            ("PATCH", ["posts", _], Some(id)) => {
                let mut patched = Self::post(id);
                if let Value::Object(fields) = &mut patched {
                    fields.extend(Self::submitted(request));
                }
                (200, patched)
            }
            ("DELETE", ["posts", _], Some(_)) => (200, json!({})),
            _ => (404, json!({})),
        }
    }
}

impl Respond for PlaceholderApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let (status, body) = Self::route(request);
        let template = ResponseTemplate::new(status).set_body_json(body);
        match self.delay {
            Some(delay) => template.set_delay(delay),
            None => template,
        }
    }
}

/// Starts a server answering every request with `responder`.
pub async fn start(responder: impl Respond + 'static) -> MockServer {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(responder).mount(&server).await;
    server
}

/// A fixture pointed at `server` that reads the bundled `test_data.json`.
pub fn setup_for(server: &MockServer) -> ApiSetup {
    let config = SuiteConfig::default()
        .with_base_url(&server.uri())
        .unwrap()
        .with_fixture_path(Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data.json"));
    ApiSetup::from_config(config)
}

/// Loads the bundled fixture through `setup`.
pub async fn fixture(setup: &ApiSetup) -> FixturePayload {
    setup.load_fixture().await.unwrap()
}
