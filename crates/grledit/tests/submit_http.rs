//! End-to-end submission over real HTTP against a local stub service.
//!
//! The stub accepts one connection per canned response, records the request
//! and answers with `Connection: close`.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use grledit::{
    submit_once, BlockPlacement, EditorSession, HttpTransport, Submitter, Tab,
};
use grledit_protocol::{decode, RequestShape};

struct CapturedRequest {
    request_line: String,
    headers: Vec<String>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|h| {
            let (key, value) = h.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }
}

/// Serve each `(status line, body)` once, in order. Returns the base URL.
fn start_stub(responses: Vec<(&'static str, &'static str)>) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status_line, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                headers.push(line.trim_end().to_string());
            }

            let length = headers
                .iter()
                .find_map(|h| {
                    let (key, value) = h.split_once(':')?;
                    key.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let mut raw_body = vec![0u8; length];
            reader.read_exact(&mut raw_body).unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            let _ = tx.send(CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(raw_body).unwrap(),
            });
        }
    });

    (format!("http://127.0.0.1:{}", port), rx)
}

fn session_with_two_blocks() -> EditorSession {
    EditorSession::with_contents(
        "rule R1 \"adult\" { when Fact.Age > 18 then Fact.Ok = true; }",
        ["{\"Age\": 21}", "{\"Name\": \"Zoë\"}"],
        BlockPlacement::Append,
    )
}

#[tokio::test]
async fn test_success_posts_envelope_and_renders_json() {
    let (endpoint, captured) = start_stub(vec![("200 OK", "{\"fired\": [\"R1\"]}")]);
    let transport = HttpTransport::new(&endpoint, Some(5)).unwrap();
    let session = session_with_two_blocks();

    let outcome = submit_once(&transport, &session.snapshot(), RequestShape::Array).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.render(), "200 : {\"fired\":[\"R1\"]}");

    let request = captured.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.request_line, "POST /evaluate HTTP/1.1");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("accept"), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    let grl = decode(body["grlText"].as_str().unwrap()).unwrap();
    assert_eq!(grl, session.rule.text());
    let contexts: Vec<String> = body["jsonInput"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| decode(v.as_str().unwrap()).unwrap())
        .collect();
    assert_eq!(contexts, ["{\"Age\": 21}", "{\"Name\": \"Zoë\"}"]);
}

#[tokio::test]
async fn test_server_error_renders_status_text_and_body() {
    let (endpoint, _captured) = start_stub(vec![("500 Internal Server Error", "boom")]);
    let transport = HttpTransport::new(&endpoint, Some(5)).unwrap();

    let outcome = submit_once(&transport, &session_with_two_blocks().snapshot(), RequestShape::Array).await;
    assert!(!outcome.is_success());
    assert_eq!(
        outcome.render(),
        "Status 500 : Internal Server Error. ResponseText : boom"
    );
}

#[tokio::test]
async fn test_success_status_with_non_json_body_is_failure() {
    let (endpoint, _captured) = start_stub(vec![("200 OK", "not json")]);
    let transport = HttpTransport::new(&endpoint, Some(5)).unwrap();

    let outcome = submit_once(&transport, &session_with_two_blocks().snapshot(), RequestShape::Array).await;
    assert_eq!(outcome.render(), "Status 200 : OK. ResponseText : not json");
}

#[tokio::test]
async fn test_legacy_shape_sends_first_block_only() {
    let (endpoint, captured) = start_stub(vec![("200 OK", "{}")]);
    let transport = HttpTransport::new(&endpoint, Some(5)).unwrap();

    submit_once(&transport, &session_with_two_blocks().snapshot(), RequestShape::Legacy).await;

    let request = captured.recv_timeout(Duration::from_secs(5)).unwrap();
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert!(body.get("jsonInput").is_none());
    assert_eq!(decode(body["jsonText"].as_str().unwrap()).unwrap(), "{\"Age\": 21}");
}

#[tokio::test]
async fn test_unreachable_service_is_status_zero() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let transport = HttpTransport::new(&format!("http://127.0.0.1:{}", port), Some(5)).unwrap();

    let outcome = submit_once(&transport, &session_with_two_blocks().snapshot(), RequestShape::Array).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.status(), 0);
    assert!(outcome.render().starts_with("Status 0 : Request failed"));
    assert!(outcome.render().ends_with(". ResponseText : "));
}

#[tokio::test]
async fn test_session_submit_round_trip_through_submitter() {
    let (endpoint, captured) = start_stub(vec![("200 OK", "{\"n\": 1}"), ("200 OK", "{\"n\": 2}")]);
    let transport = HttpTransport::new(&endpoint, Some(5)).unwrap();
    let mut submitter = Submitter::new(Arc::new(transport), RequestShape::Array);
    let mut session = session_with_two_blocks();

    for expected in ["200 : {\"n\":1}", "200 : {\"n\":2}"] {
        submitter.begin(session.snapshot()).unwrap();
        let result = loop {
            if let Some(result) = submitter.poll() {
                break result;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        };
        assert_eq!(result.block_count, 2);
        session.show_outcome(&result.outcome);
        assert_eq!(session.active_tab(), Tab::Result);
        assert_eq!(session.result.text(), expected);
    }

    assert!(captured.recv_timeout(Duration::from_secs(5)).is_ok());
    assert!(captured.recv_timeout(Duration::from_secs(5)).is_ok());
}
