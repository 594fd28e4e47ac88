//! Raw socket tests for the clean URL host, without an HTTP client library.

use cleanurl::cli::Cli;
use cleanurl::server::run_server;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

/// A helper struct to manage a running test server.
struct TestServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    /// Sets up and runs a server in a background thread for testing.
    fn new(server_name: Option<&str>) -> Self {
        let dir = tempdir().unwrap();

        let cli = Cli {
            directory: dir.path().to_path_buf(),
            listen: "127.0.0.1".to_string(),
            port: 0,
            threads: 4,
            script_name: "/site/index.php".to_string(),
            server_name: server_name.map(str::to_string),
            https: Some("off".to_string()),
            view: "Page".to_string(),
            cgi: false,
            verbose: false,
            detailed_logging: false,
        };

        let (shutdown_tx, shutdown_rx) = mpsc::channel();
        let (addr_tx, addr_rx) = mpsc::channel();

        let server_handle = thread::spawn(move || {
            if let Err(e) = run_server(cli, Some(shutdown_rx), Some(addr_tx)) {
                eprintln!("Server thread failed: {}", e);
            }
        });

        let server_addr = addr_rx.recv().unwrap();

        TestServer {
            addr: server_addr,
            shutdown_tx,
            handle: Some(server_handle),
            _temp_dir: dir,
        }
    }

    fn document_root(&self) -> String {
        self._temp_dir
            .path()
            .canonicalize()
            .unwrap()
            .to_string_lossy()
            .into_owned()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.shutdown_tx.send(()).ok();
            handle.join().unwrap();
        }
    }
}

struct RawResponse {
    status_code: u16,
    headers: std::collections::HashMap<String, String>,
    body: String,
}

/// Sends `request` as is and reads the whole response.
fn send_raw(addr: SocketAddr, request: &str) -> RawResponse {
    send_bytes(addr, request.as_bytes())
}

fn send_bytes(addr: SocketAddr, request: &[u8]) -> RawResponse {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
    stream.write_all(request).unwrap();

    let mut reader = BufReader::new(stream);
    let mut status_line = String::new();
    reader.read_line(&mut status_line).unwrap();

    let status_code = status_line
        .split_whitespace()
        .nth(1)
        .unwrap()
        .parse::<u16>()
        .unwrap();

    let mut headers = std::collections::HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(": ") {
            headers.insert(key.to_lowercase(), value.to_string());
        }
    }

    let mut body = String::new();
    reader.read_to_string(&mut body).unwrap();

    RawResponse {
        status_code,
        headers,
        body,
    }
}

fn get(addr: SocketAddr, target: &str, host: &str) -> RawResponse {
    send_raw(
        addr,
        &format!("GET {target} HTTP/1.1\r\nHost: {host}\r\n\r\n"),
    )
}

#[test]
fn test_server_name_from_host_header() {
    let server = TestServer::new(None);
    let response = get(server.addr, "/site/", "docs.example.org:8443");

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("http://docs.example.org/site/"));
    assert!(response.body.contains("<td>/site/</td>"));
}

#[test]
fn test_configured_server_name_wins() {
    let server = TestServer::new(Some("static.example.com"));
    let response = get(server.addr, "/site/Page/1", "other.example.com");

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("http://static.example.com/site/"));
    assert!(!response.body.contains("other.example.com"));
}

#[test]
fn test_document_root_reported() {
    let server = TestServer::new(None);
    let response = get(server.addr, "/site/Page", "localhost");

    let expected = format!("<td>{}/</td>", server.document_root());
    assert!(response.body.contains(&expected), "body: {}", response.body);
}

#[test]
fn test_fragment_and_query_are_ignored() {
    let server = TestServer::new(None);
    let response = get(server.addr, "/site/Page/a#frag?q=1", "localhost");

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("<h2>Params</h2>\n<ol><li>a</li></ol>"));
    assert!(!response.body.contains("frag"));
}

#[test]
fn test_absolute_form_target() {
    let server = TestServer::new(None);
    let response = get(server.addr, "http://localhost/site/Page/b", "localhost");

    assert_eq!(response.status_code, 200);
    assert!(response.body.contains("<h2>Params</h2>\n<ol><li>b</li></ol>"));
}

#[test]
fn test_head_request_has_no_body() {
    let server = TestServer::new(None);
    let response = send_raw(
        server.addr,
        "HEAD /site/Page HTTP/1.1\r\nHost: localhost\r\n\r\n",
    );

    assert_eq!(response.status_code, 200);
    assert!(response.headers.get("content-length").unwrap() != "0");
    assert!(response.body.is_empty());
}

#[test]
fn test_malformed_request_line() {
    let server = TestServer::new(None);
    let response = send_raw(server.addr, "GARBAGE\r\n\r\n");

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Bad Request"));
}

#[test]
fn test_non_utf8_request_line() {
    let server = TestServer::new(None);
    let response = send_bytes(
        server.addr,
        b"GET /caf\xe9 HTTP/1.1\r\nHost: localhost\r\n\r\n",
    );

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Bad Request"));
}

#[test]
fn test_non_utf8_header_line() {
    let server = TestServer::new(None);
    let response = send_bytes(
        server.addr,
        b"GET /site/Page HTTP/1.1\r\nX-Name: caf\xe9\r\n\r\n",
    );

    assert_eq!(response.status_code, 400);
}

#[test]
fn test_concurrent_requests() {
    let server = TestServer::new(None);
    let addr = server.addr;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let response = get(addr, &format!("/site/Page/{i}"), "localhost");
                assert_eq!(response.status_code, 200);
                assert!(response
                    .body
                    .contains(&format!("<h2>Params</h2>\n<ol><li>{i}</li></ol>")));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
