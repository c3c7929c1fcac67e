//! Common test utilities and helpers
//!
//! Sample alert data plus a one-shot loopback HTTP server that records the
//! request HipChat would have received.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

pub const ROOM: &str = "testroom";
pub const TENANT: &str = "testhipurl";
pub const TOKEN: &str = "abcedfg12345678";
pub const ZABBIX_URL: &str = "https://zbx.test.com";
pub const OK_ICON: &str = "http://xyz.com/ok.png";
pub const PROBLEM_ICON: &str = "http://xyz.com/prob.png";

/// Alert body as a Zabbix action renders it
pub fn sample_message() -> String {
    alert_message("OK", "Disaster", "url.xyz.com")
}

pub fn alert_message(status: &str, severity: &str, url: &str) -> String {
    format!(
        "name: \"Test Trigger Name\" \n\
         id: \"1234567\" \n\
         status: \"{status}\" \n\
         hostname: \"xyz.com\" \n\
         event_id: \"987654321\" \n\
         severity: \"{severity}\" \n\
         url: \"{url}\" \n\
         description: \"Test Trigger Description\""
    )
}

/// What the mock server saw
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Accepts exactly one connection and answers with a canned response
pub struct MockHipChat {
    url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl MockHipChat {
    pub fn start(status_line: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback listener");
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("No connection received");
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.split_once(':') {
                    headers.push((key.trim().to_string(), value.trim().to_string()));
                }
            }

            let content_length = headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            CapturedRequest {
                request_line: request_line.trim_end().to_string(),
                headers,
                body: String::from_utf8(request_body).unwrap(),
            }
        });

        Self { url, handle }
    }

    /// Base URL to use as `hipchat.server_url`
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn finish(self) -> CapturedRequest {
        self.handle.join().expect("Mock server thread panicked")
    }
}

/// A loopback URL nothing is listening on
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
