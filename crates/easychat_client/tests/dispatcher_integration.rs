//! Integration tests for the send pipeline against real local HTTP servers
//! replying with canned chat-completions bodies. No mocks.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use easychat_client::{ChatError, Config, Dispatcher, Role};

struct CannedReply {
    /// Status line tail, e.g. `200 OK`.
    status: &'static str,
    /// Extra header lines, each terminated with `\r\n`.
    extra_headers: &'static str,
    body: &'static str,
    /// Pause before replying, for in-flight overlap tests.
    delay_ms: u64,
}

impl CannedReply {
    fn new(status: &'static str, body: &'static str) -> Self {
        Self {
            status,
            extra_headers: "",
            body,
            delay_ms: 0,
        }
    }
}

/// Bind a local listener and serve one canned reply per expected request.
fn spawn_http_server(replies: Vec<CannedReply>) -> (String, std::thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = std::thread::spawn(move || {
        for reply in replies {
            let (mut stream, _) = match listener.accept() {
                Ok(conn) => conn,
                Err(_) => return,
            };
            read_http_request(&mut stream);
            if reply.delay_ms > 0 {
                std::thread::sleep(Duration::from_millis(reply.delay_ms));
            }
            let response = format!(
                "HTTP/1.1 {}\r\n{}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.status,
                reply.extra_headers,
                reply.body.len(),
                reply.body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    (url, handle)
}

/// Drain request headers and body so the client never blocks on a write.
fn read_http_request(stream: &mut TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end();
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
        if line.is_empty() {
            break;
        }
    }
    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);
}

fn test_config(url: &str) -> Config {
    let mut cfg = Config::default();
    cfg.api.key = Some("test-key".into());
    cfg.api.url = Some(url.into());
    cfg.api.model = Some("test-model".into());
    cfg
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

const HI_BODY: &str = r#"{"choices":[{"message":{"content":"hi"}}]}"#;

#[test]
fn success_appends_user_then_assistant() {
    let (url, server) = spawn_http_server(vec![CannedReply::new("200 OK", HI_BODY)]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let reply = runtime()
        .block_on(dispatcher.send(&cfg, "hello"))
        .expect("send should succeed");
    assert_eq!(reply, "hi");

    let history = dispatcher.history_snapshot();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "hello");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, "hi");

    server.join().unwrap();
}

#[test]
fn whitespace_message_never_appends_or_sends() {
    // No server: a network call would fail loudly, not silently.
    let dispatcher = Dispatcher::new();
    let cfg = test_config("http://127.0.0.1:1");

    let result = runtime().block_on(dispatcher.send(&cfg, "   \n\t  "));
    assert!(matches!(result, Err(ChatError::EmptyMessage)));
    assert!(dispatcher.history_snapshot().is_empty());
}

#[test]
fn missing_api_key_rejected_before_any_network_call() {
    let dispatcher = Dispatcher::new();
    let mut cfg = test_config("http://127.0.0.1:1");
    cfg.api.key = None;

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    assert!(matches!(result, Err(ChatError::MissingApiKey)));
    assert!(dispatcher.history_snapshot().is_empty());
}

#[test]
fn rate_limited_reply_carries_retry_after_hint() {
    let (url, server) = spawn_http_server(vec![CannedReply {
        status: "429 Too Many Requests",
        extra_headers: "Retry-After: 42\r\n",
        body: r#"{"error":{"message":"slow down"}}"#,
        delay_ms: 0,
    }]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    match result {
        Err(ChatError::RateLimited {
            retry_after_secs,
            message,
        }) => {
            assert_eq!(retry_after_secs, 42);
            assert_eq!(message.as_deref(), Some("slow down"));
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
    // The user message stays recorded even though the send failed.
    let history = dispatcher.history_snapshot();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, Role::User);

    server.join().unwrap();
}

#[test]
fn rate_limited_without_header_defaults_to_sixty() {
    let (url, server) = spawn_http_server(vec![CannedReply::new("429 Too Many Requests", "{}")]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    match result {
        Err(ChatError::RateLimited {
            retry_after_secs, ..
        }) => assert_eq!(retry_after_secs, 60),
        other => panic!("expected RateLimited, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn status_error_includes_parsed_message() {
    let (url, server) = spawn_http_server(vec![CannedReply::new(
        "404 Not Found",
        r#"{"error":{"message":"model gone"}}"#,
    )]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    match result {
        Err(ChatError::Status { code, message }) => {
            assert_eq!(code, 404);
            assert_eq!(message.as_deref(), Some("model gone"));
        }
        other => panic!("expected Status, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn status_error_falls_back_to_bare_code_on_unparseable_body() {
    let (url, server) = spawn_http_server(vec![CannedReply::new(
        "500 Internal Server Error",
        "not json at all",
    )]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    match result {
        Err(ChatError::Status { code, message }) => {
            assert_eq!(code, 500);
            assert_eq!(message, None);
        }
        other => panic!("expected Status, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn connection_refused_classified_as_connect_error() {
    // Bind then drop so the port is free but nothing is listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&format!("http://127.0.0.1:{}", port));

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    assert!(matches!(&result, Err(ChatError::Connect)), "{:?}", result);
}

#[test]
fn malformed_success_body_is_generic_error() {
    let (url, server) = spawn_http_server(vec![CannedReply::new("200 OK", r#"{"unexpected":1}"#)]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let result = runtime().block_on(dispatcher.send(&cfg, "hello"));
    assert!(matches!(&result, Err(ChatError::Other(_))), "{:?}", result);
    server.join().unwrap();
}

#[test]
fn second_send_while_in_flight_is_rejected() {
    let (url, server) = spawn_http_server(vec![CannedReply {
        status: "200 OK",
        extra_headers: "",
        body: HI_BODY,
        delay_ms: 400,
    }]);
    let dispatcher = Arc::new(Dispatcher::new());
    let cfg = test_config(&url);

    runtime().block_on(async {
        let first_dispatcher = dispatcher.clone();
        let first_cfg = cfg.clone();
        let first =
            tokio::spawn(async move { first_dispatcher.send(&first_cfg, "first").await });

        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = dispatcher.send(&cfg, "second").await;
        assert!(
            matches!(&second, Err(ChatError::SendInFlight)),
            "{:?}",
            second
        );

        let first = first.await.unwrap();
        assert_eq!(first.unwrap(), "hi");
    });

    // Only the first message and its reply made it into the history.
    assert_eq!(dispatcher.history_snapshot().len(), 2);
    server.join().unwrap();
}

#[test]
fn clear_history_is_idempotent() {
    let (url, server) = spawn_http_server(vec![CannedReply::new("200 OK", HI_BODY)]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    runtime()
        .block_on(dispatcher.send(&cfg, "hello"))
        .expect("send should succeed");
    assert_eq!(dispatcher.history_snapshot().len(), 2);

    dispatcher.clear_history();
    assert!(dispatcher.history_snapshot().is_empty());
    dispatcher.clear_history();
    assert!(dispatcher.history_snapshot().is_empty());

    server.join().unwrap();
}

#[test]
fn test_connection_succeeds_on_ok_status() {
    let (url, server) = spawn_http_server(vec![CannedReply::new("200 OK", HI_BODY)]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    runtime()
        .block_on(dispatcher.test_connection(&cfg))
        .expect("probe should succeed");
    // The probe never touches the conversation.
    assert!(dispatcher.history_snapshot().is_empty());
    server.join().unwrap();
}

#[test]
fn test_connection_reports_status_errors() {
    let (url, server) = spawn_http_server(vec![CannedReply::new(
        "401 Unauthorized",
        r#"{"error":{"message":"bad key"}}"#,
    )]);
    let dispatcher = Dispatcher::new();
    let cfg = test_config(&url);

    let result = runtime().block_on(dispatcher.test_connection(&cfg));
    match result {
        Err(ChatError::Status { code, message }) => {
            assert_eq!(code, 401);
            assert_eq!(message.as_deref(), Some("bad key"));
        }
        other => panic!("expected Status, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn test_connection_requires_api_key() {
    let dispatcher = Dispatcher::new();
    let mut cfg = test_config("http://127.0.0.1:1");
    cfg.api.key = None;

    let result = runtime().block_on(dispatcher.test_connection(&cfg));
    assert!(matches!(result, Err(ChatError::MissingApiKey)));
}
