//! Shared fixtures for CLI tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;

/// Minimal HTTP fixture: answers every request on a fresh port with the
/// given status line and body, then keeps serving until the test exits.
/// Returns the endpoint base URL.
pub fn spawn_backend(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture port");
    let addr = listener.local_addr().expect("fixture addr");
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

/// Backend that answers 200 with the given JSON body.
pub fn spawn_json_backend(body: &'static str) -> String {
    spawn_backend("HTTP/1.1 200 OK", body)
}

/// An endpoint nothing listens on; connections are refused immediately.
pub fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}
