//! Full-client tests against a canned-response HTTP listener.
//!
//! The listener accepts one TCP connection per request, records the path
//! and JSON body it received, and answers with the next canned response.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use creoson_rs::{ClientBuilder, CreosonError, OneOrMany};

#[derive(Clone, Debug)]
struct RecordedRequest {
    path: String,
    body: Value,
}

#[derive(Clone)]
struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    /// Bind a listener that serves the canned responses in order, one
    /// connection each, then stops accepting.
    async fn start(responses: Vec<CannedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("listener should have an addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };

                let request = read_http_request(&mut stream).await;
                recorded
                    .lock()
                    .expect("request log should not be poisoned")
                    .push(request);

                let payload = match &response {
                    CannedResponse::Json(value) => {
                        let body = value.to_string();
                        format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    }
                    CannedResponse::Status(code) => format!(
                        "HTTP/1.1 {code} Oops\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    ),
                    CannedResponse::Raw(body) => format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    ),
                };

                let _ = stream.write_all(payload.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }
}

enum CannedResponse {
    Json(Value),
    Status(u16),
    Raw(&'static str),
}

async fn read_http_request(stream: &mut tokio::net::TcpStream) -> RecordedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let (header_end, mut raw) = loop {
        let read = stream.read(&mut chunk).await.expect("request should read");
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(pos) = find_header_end(&buffer) {
            break (pos, buffer);
        }
        assert!(read > 0, "connection closed before headers finished");
    };

    let headers = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let path = headers
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = header_end + 4;
    while raw.len() < body_start + content_length {
        let read = stream.read(&mut chunk).await.expect("body should read");
        assert!(read > 0, "connection closed before body finished");
        raw.extend_from_slice(&chunk[..read]);
    }

    let body: Value = serde_json::from_slice(&raw[body_start..body_start + content_length])
        .expect("request body should be JSON");

    RecordedRequest { path, body }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn connect_ok(session: &str) -> CannedResponse {
    CannedResponse::Json(json!({"status": {"error": false}, "sessionId": session}))
}

async fn connected_client(server: &MockServer) -> creoson_rs::CreosonClient {
    ClientBuilder::new()
        .base_url(server.base_url.clone())
        .timeout(Duration::from_millis(2_000))
        .connect()
        .await
        .expect("connect should succeed")
}

#[tokio::test]
async fn connect_stores_session_and_later_requests_carry_it() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"error": false}, "data": {"dirname": "C:/work"}})),
    ])
    .await;

    let client = connected_client(&server).await;
    assert_eq!(client.session_id().expect("session readable"), "123456");

    let dirname = client.creo().pwd().await.expect("pwd should succeed");
    assert_eq!(dirname, "C:/work");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);

    // connect ships no sessionId key at all
    assert!(requests[0].body.get("sessionId").is_none());
    assert_eq!(requests[0].body["command"], json!("connection"));
    assert_eq!(requests[0].body["function"], json!("connect"));

    assert_eq!(requests[1].body["sessionId"], json!("123456"));
    assert_eq!(requests[1].body["command"], json!("creo"));
    assert_eq!(requests[1].body["function"], json!("pwd"));
    // no parameters supplied, so no data key either
    assert!(requests[1].body.get("data").is_none());
}

#[tokio::test]
async fn error_response_carries_server_message_verbatim() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"error": true, "message": "File not found"}})),
    ])
    .await;

    let client = connected_client(&server).await;
    let err = client
        .file()
        .erase(Some(OneOrMany::One("box.prt".to_string())), None)
        .await
        .expect_err("error=true should raise");

    match err {
        CreosonError::Api { message } => assert_eq!(message, "File not found"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn success_without_data_is_not_an_error() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"error": false}})),
    ])
    .await;

    let client = connected_client(&server).await;
    client
        .file()
        .regenerate(None, None)
        .await
        .expect("no-data success should be Ok");
}

#[tokio::test]
async fn missing_status_error_is_a_protocol_shape_failure() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"message": "odd"}})),
    ])
    .await;

    let client = connected_client(&server).await;
    let err = client
        .creo()
        .pwd()
        .await
        .expect_err("missing status.error should raise");

    assert!(
        matches!(err, CreosonError::MissingField { ref field } if field == "status.error"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn optional_parameters_stay_out_of_the_request_body() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({
            "status": {"error": false},
            "data": {"dirname": "C:/work", "files": ["box.prt"]}
        })),
    ])
    .await;

    let client = connected_client(&server).await;
    client
        .file()
        .open(OneOrMany::One("box.prt".to_string()), Default::default())
        .await
        .expect("open should succeed");

    let requests = server.requests();
    let data = requests[1].body["data"]
        .as_object()
        .expect("data should be an object");
    assert_eq!(data.len(), 1);
    assert_eq!(data.get("file"), Some(&json!("box.prt")));
}

#[tokio::test]
async fn plural_argument_uses_the_plural_key() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"error": false}})),
    ])
    .await;

    let client = connected_client(&server).await;
    client
        .file()
        .save(Some(OneOrMany::Many(vec![
            "box.prt".to_string(),
            "bracket.prt".to_string(),
        ])))
        .await
        .expect("save should succeed");

    let requests = server.requests();
    let data = requests[1].body["data"]
        .as_object()
        .expect("data should be an object");
    assert_eq!(data.get("files"), Some(&json!(["box.prt", "bracket.prt"])));
    assert!(!data.contains_key("file"));
}

#[tokio::test]
async fn server_domain_posts_to_the_server_path() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"error": false}, "data": {"dirname": "/srv"}})),
    ])
    .await;

    let client = connected_client(&server).await;
    let dirname = client.server().pwd().await.expect("pwd should succeed");
    assert_eq!(dirname, "/srv");

    let requests = server.requests();
    assert_eq!(requests[0].path, "/creoson");
    assert_eq!(requests[1].path, "/server");
}

#[tokio::test]
async fn disconnect_clears_the_session_and_later_calls_ship_it_empty() {
    let server = MockServer::start(vec![
        connect_ok("123456"),
        CannedResponse::Json(json!({"status": {"error": false}})),
        CannedResponse::Json(json!({
            "status": {"error": true, "message": "no session found"}
        })),
    ])
    .await;

    let client = connected_client(&server).await;
    client.disconnect().await.expect("disconnect should succeed");
    assert_eq!(client.session_id().expect("session readable"), "");

    // the client does not guard; the server rejects the empty session
    let err = client.creo().pwd().await.expect_err("server rejects");
    assert!(matches!(err, CreosonError::Api { .. }));

    let requests = server.requests();
    assert_eq!(requests[2].body["sessionId"], json!(""));
}

#[tokio::test]
async fn non_success_http_status_maps_to_its_own_error() {
    let server = MockServer::start(vec![CannedResponse::Status(500)]).await;

    let err = ClientBuilder::new()
        .base_url(server.base_url.clone())
        .connect()
        .await
        .expect_err("500 should fail");

    assert!(matches!(err, CreosonError::HttpStatus { status: 500 }));
}

#[tokio::test]
async fn invalid_json_body_is_a_decode_error() {
    let server = MockServer::start(vec![CannedResponse::Raw("not json at all")]).await;

    let err = ClientBuilder::new()
        .base_url(server.base_url.clone())
        .connect()
        .await
        .expect_err("garbage body should fail");

    assert!(matches!(err, CreosonError::Decode { .. }));
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = ClientBuilder::new()
        .base_url(format!("http://{addr}"))
        .timeout(Duration::from_millis(500))
        .connect()
        .await
        .expect_err("nothing listens there");

    assert!(matches!(
        err,
        CreosonError::Transport { .. } | CreosonError::Timeout { .. }
    ));
}
