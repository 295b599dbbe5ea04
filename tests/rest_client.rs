//! `RestClient` against a loopback HTTP server with canned responses.
//!
//! Each test serves its responses one connection at a time and hands back
//! the raw request heads it received.

use daybook::datastore::{DataError, DataStore, RestClient};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Canned {
    status: &'static str,
    body: &'static str,
}

/// Serve `responses` in order, one per connection. Returns the base URL and
/// a handle yielding every request head, lowercased.
fn serve(responses: Vec<Canned>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut heads = Vec::new();
        for canned in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            heads.push(String::from_utf8_lossy(&raw).to_lowercase());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                canned.status,
                canned.body.len(),
                canned.body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        heads
    });

    (format!("http://{addr}/"), handle)
}

fn client(base: &str) -> RestClient {
    RestClient::new(base, "anon-key", Some(Duration::from_secs(5)))
}

#[test]
fn sends_key_headers_and_query_string() {
    let (base, server) = serve(vec![Canned {
        status: "200 OK",
        body: r#"[{"number": 3, "hook": "Let go."}]"#,
    }]);

    let steps = client(&base).steps().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].number, 3);
    assert_eq!(steps[0].hook.as_deref(), Some("Let go."));

    let heads = server.join().unwrap();
    let head = heads[0].replace("%2c", ",");
    let request_line = head.lines().next().unwrap();
    assert!(
        request_line.starts_with("get /rest/v1/steps?select=number,text,month,principle,"),
        "{request_line}"
    );
    assert!(request_line.contains("&order=number.asc"), "{request_line}");
    assert!(head.contains("\r\napikey: anon-key\r\n"), "{head}");
    assert!(head.contains("\r\nauthorization: bearer anon-key\r\n"), "{head}");
}

#[test]
fn shares_query_filters_to_approved() {
    let (base, server) = serve(vec![Canned {
        status: "200 OK",
        body: "[]",
    }]);

    assert!(client(&base).shares().unwrap().is_empty());

    let heads = server.join().unwrap();
    let request_line = heads[0].lines().next().unwrap().to_string();
    assert!(request_line.starts_with("get /rest/v1/member_shares?"));
    assert!(request_line.contains("&approved=eq.true"), "{request_line}");
}

#[test]
fn error_status_and_non_array_body() {
    let (base, server) = serve(vec![
        Canned {
            status: "503 Service Unavailable",
            body: r#"{"message":"down for maintenance"}"#,
        },
        Canned {
            status: "200 OK",
            body: "{}",
        },
    ]);
    let client = client(&base);

    match client.readings() {
        Err(DataError::HttpStatus {
            collection,
            status,
            body,
        }) => {
            assert_eq!(collection, "readings");
            assert_eq!(status, 503);
            assert!(body.contains("down for maintenance"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }

    assert!(matches!(
        client.themes(),
        Err(DataError::NotArray {
            collection: "themes"
        })
    ));

    let heads = server.join().unwrap();
    assert!(heads[0].starts_with("get /rest/v1/readings?"));
    assert!(heads[1].starts_with("get /rest/v1/themes?"));
}
