// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use heap_analytics::{Event, HeapClient, HeapError, Properties, ResponseBody};
use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct TrackBody {
	app_id: String,
	identity: String,
	event: String,
	properties: HashMap<String, String>,
}

async fn ok_server() -> MockServer {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;
	server
}

fn client_for(server: &MockServer) -> HeapClient {
	HeapClient::builder("11").base_url(server.uri()).build()
}

#[tokio::test]
async fn test_track_end_to_end() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/track"))
		.and(header("content-type", "application/json"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let mut properties = HashMap::new();
	properties.insert("test_prop", "test_val");

	client_for(&server)
		.track("my@identifier.net", "test_event", properties)
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	let body: TrackBody = requests[0].body_json().unwrap();
	assert_eq!(body.app_id, "11");
	assert_eq!(body.identity, "my@identifier.net");
	assert_eq!(body.event, "test_event");
	assert_eq!(body.properties.get("test_prop").map(String::as_str), Some("test_val"));
}

#[tokio::test]
async fn test_user_properties_omits_event_key() {
	let server = ok_server().await;

	client_for(&server)
		.user_properties("my@identifier.net", Properties::new().insert("test_prop", "test_val"))
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert_eq!(requests[0].url.path(), "/api/add_user_properties");

	let body: serde_json::Value = requests[0].body_json().unwrap();
	assert!(body.get("event").is_none());
	assert_eq!(body["properties"]["test_prop"], "test_val");
}

#[tokio::test]
async fn test_empty_properties_key_is_absent() {
	let server = ok_server().await;
	let client = client_for(&server);

	client
		.track("my@identifier.net", "signup", Properties::new())
		.await
		.unwrap();
	client
		.user_properties("my@identifier.net", Properties::new())
		.await
		.unwrap();

	for request in server.received_requests().await.unwrap() {
		let body: serde_json::Value = request.body_json().unwrap();
		assert!(body.get("properties").is_none());
	}
}

#[tokio::test]
async fn test_body_decodes_back_into_event() {
	let server = ok_server().await;

	let props = Properties::new().insert("seats", 5).insert("trial", true);
	client_for(&server)
		.track("user-1", "upgrade", props.clone())
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	let event: Event = requests[0].body_json().unwrap();
	assert_eq!(event, Event::new("11", "user-1", "upgrade", props));
}

#[tokio::test]
async fn test_base_url_override_used_for_every_send() {
	let server = ok_server().await;
	let client = client_for(&server);

	for i in 0..3 {
		client
			.track(&format!("user-{i}"), "tick", Properties::new())
			.await
			.unwrap();
	}
	client
		.user_properties("user-0", Properties::new().insert("k", "v"))
		.await
		.unwrap();

	assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_bad_request_reports_status_and_body() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
		.mount(&server)
		.await;

	let err = client_for(&server)
		.track("id", "evt", Properties::new())
		.await
		.unwrap_err();

	let message = err.to_string();
	assert!(message.contains("400"), "{message}");
	assert!(message.contains("bad request"), "{message}");
	assert!(matches!(
		err,
		HeapError::UnexpectedStatus {
			status: 400,
			body: ResponseBody::Text(_),
		}
	));
}

/// Answers one request with a 400 whose body is cut short, then hangs up.
async fn truncated_body_server() -> String {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();

	tokio::spawn(async move {
		let (mut socket, _) = listener.accept().await.unwrap();
		let mut request = Vec::new();
		let mut buf = [0u8; 1024];
		loop {
			let n = socket.read(&mut buf).await.unwrap();
			if n == 0 {
				break;
			}
			request.extend_from_slice(&buf[..n]);
			if request_complete(&request) {
				break;
			}
		}
		socket
			.write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 64\r\n\r\nshort")
			.await
			.unwrap();
		socket.shutdown().await.unwrap();
	});

	format!("http://{addr}")
}

fn request_complete(request: &[u8]) -> bool {
	let text = String::from_utf8_lossy(request);
	let Some(header_end) = text.find("\r\n\r\n") else {
		return false;
	};
	let content_length = text[..header_end]
		.lines()
		.find_map(|line| {
			let (name, value) = line.split_once(':')?;
			name.eq_ignore_ascii_case("content-length")
				.then(|| value.trim().parse::<usize>().ok())
				.flatten()
		})
		.unwrap_or(0);
	request.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn test_unreadable_error_body_still_returns_error() {
	let base_url = truncated_body_server().await;
	let client = HeapClient::builder("11").base_url(base_url).build();

	let err = client
		.track("id", "evt", Properties::new().insert("k", "v"))
		.await
		.unwrap_err();

	assert_eq!(err.status(), Some(400));
	assert!(matches!(
		err,
		HeapError::UnexpectedStatus {
			body: ResponseBody::Unreadable(_),
			..
		}
	));
	assert!(err.to_string().contains("could not read response body"));
}

#[test]
fn test_connection_refused_is_transport_error() {
	let addr = std::net::TcpListener::bind("127.0.0.1:0")
		.unwrap()
		.local_addr()
		.unwrap();

	let client = HeapClient::builder("11")
		.base_url(format!("http://{addr}"))
		.build();

	let result = tokio_test::block_on(client.track("id", "evt", Properties::new()));
	assert!(matches!(result, Err(HeapError::Transport(_))));
}

#[tokio::test]
async fn test_shared_http_client_across_clients() {
	let server = ok_server().await;
	let http = heap_common_http::new_client();

	let a = HeapClient::builder("app-a")
		.base_url(server.uri())
		.http_client(http.clone())
		.build();
	let b = HeapClient::builder("app-b")
		.base_url(server.uri())
		.http_client(http)
		.build();

	a.track("id", "evt", Properties::new()).await.unwrap();
	b.track("id", "evt", Properties::new()).await.unwrap();

	let app_ids: Vec<String> = server
		.received_requests()
		.await
		.unwrap()
		.iter()
		.map(|r| r.body_json::<Event>().unwrap().app_id)
		.collect();
	assert_eq!(app_ids, vec!["app-a", "app-b"]);
}
