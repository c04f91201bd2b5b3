use reqwest::Client;
use resource_framework::repository::settle;
use resource_framework::{Resource, ResourceRepository};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tutorial_app::config::{AppConfig, BackendConfig};
use tutorial_app::http::HttpSource;
use tutorial_app::lifecycle::AppSystem;
use tutorial_app::model::{Comment, Tutorial, TutorialCreate, TutorialId};

// --- Fake REST backend ---

/// Answers each connection with the next canned response and records the request line.
struct FakeBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeBackend {
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind TCP listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request_line = read_request(&mut socket).await;
                recorded.lock().unwrap().push(request_line);

                let response = format!(
                    "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Reads one request (headers plus `Content-Length` body) and returns its first line.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buffer);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buffer.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

fn tutorials(base_url: &str) -> ResourceRepository<Tutorial> {
    ResourceRepository::new(Arc::new(HttpSource::<Tutorial>::new(Client::new(), base_url)))
}

const TUTORIAL_JSON: &str =
    r#"[{"id":"42","title":"Traits","body":"Shared behaviour","author":"user_7"}]"#;

// --- Tests ---

#[tokio::test]
async fn test_list_decodes_json() {
    let backend = FakeBackend::start(vec![(200, TUTORIAL_JSON)]).await;

    let list = settle(tutorials(&backend.base_url).fetch_list(())).await;
    let items = list.into_data().expect("list should succeed");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, TutorialId::from("42"));
    assert_eq!(items[0].title, "Traits");
    assert!(!items[0].favorite);

    assert_eq!(backend.requests(), vec!["GET /api/tutorials HTTP/1.1"]);
}

#[tokio::test]
async fn test_status_codes_become_error_messages() {
    let backend = FakeBackend::start(vec![
        (404, ""),
        (500, r#"{"error":"boom"}"#),
        (409, r#"{"message":"Title already taken"}"#),
    ])
    .await;
    let repository = tutorials(&backend.base_url);

    assert_eq!(
        settle(repository.fetch("missing".into())).await,
        Resource::failure("Error 404: Not Found")
    );
    assert_eq!(
        settle(repository.fetch_list(())).await,
        Resource::failure("Error 500: Internal Server Error")
    );

    // A JSON error body carries the server's own message.
    let created = settle(repository.create(TutorialCreate {
        title: "Traits".into(),
        body: "Shared behaviour".into(),
        author: "user_7".into(),
    }))
    .await;
    assert_eq!(created, Resource::failure("Error 409: Title already taken"));
}

#[tokio::test]
async fn test_empty_body_where_one_is_required() {
    let backend = FakeBackend::start(vec![(201, "")]).await;

    let created = settle(tutorials(&backend.base_url).create(TutorialCreate {
        title: "Traits".into(),
        body: "Shared behaviour".into(),
        author: "user_7".into(),
    }))
    .await;
    assert_eq!(created, Resource::failure("Error: empty response body"));
    assert_eq!(backend.requests(), vec!["POST /api/tutorials HTTP/1.1"]);
}

#[tokio::test]
async fn test_malformed_json_is_an_exception() {
    let backend = FakeBackend::start(vec![(200, "{not json")]).await;

    let list = settle(tutorials(&backend.base_url).fetch_list(())).await;
    assert!(
        list.message().is_some_and(|m| m.starts_with("Exception: ")),
        "unexpected {list:?}"
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_an_exception() {
    // Bind and release a port so nothing is listening on it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let list = settle(tutorials(&format!("http://{addr}")).fetch_list(())).await;
    assert!(
        list.message().is_some_and(|m| m.starts_with("Exception: ")),
        "unexpected {list:?}"
    );
}

#[tokio::test]
async fn test_comment_filter_becomes_query() {
    let backend = FakeBackend::start(vec![(200, "[]")]).await;
    let repository: ResourceRepository<Comment> = ResourceRepository::new(Arc::new(
        HttpSource::<Comment>::new(Client::new(), backend.base_url.as_str()),
    ));

    let list = settle(repository.fetch_list(Some("tutorial_3".into()))).await;
    assert_eq!(list, Resource::success(vec![]));
    assert_eq!(
        backend.requests(),
        vec!["GET /api/comments?tutorial_id=tutorial_3 HTTP/1.1"]
    );
}

#[tokio::test]
async fn test_favorite_toggle_over_http() {
    let backend = FakeBackend::start(vec![(200, "false"), (204, "")]).await;
    let config = AppConfig {
        backend: BackendConfig::Http {
            base_url: backend.base_url.clone(),
            timeout_secs: 5,
        },
        eager_notifications: false,
        ..Default::default()
    };
    let system = AppSystem::new(&config).expect("Failed to start system");
    let id = TutorialId::from("42");

    system.tutorials.check_favorite(id.clone()).await;
    let mut flag = system.tutorials.watch_favorite(id.clone()).await.unwrap();
    tokio::time::timeout(
        Duration::from_secs(2),
        flag.wait_for(|f| *f == Resource::success(false)),
    )
    .await
    .expect("timed out waiting for favorite")
    .unwrap();

    system.tutorials.toggle_favorite(id).await;
    tokio::time::timeout(
        Duration::from_secs(2),
        flag.wait_for(|f| *f == Resource::success(true)),
    )
    .await
    .expect("timed out waiting for toggle")
    .unwrap();

    assert_eq!(
        backend.requests(),
        vec![
            "GET /api/tutorials/42/favorite HTTP/1.1",
            "PUT /api/tutorials/42/favorite HTTP/1.1",
        ]
    );

    system.shutdown().await.unwrap();
}
