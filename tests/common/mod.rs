//! Shared utilities for integration testing: a programmable HTTP/1.1 mock
//! server that records every request it receives.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use eureka_client::{ClientConfig, Credentials};

/// A request as seen on the wire.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or(&self.target)
    }

    /// Decoded `application/x-www-form-urlencoded` field.
    pub fn form_value(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Decoded query parameter.
    pub fn query_value(&self, name: &str) -> Option<String> {
        let query = self.target.split_once('?')?.1;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path())
    }
}

/// Response a handler asks the server to send.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
            delay: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A running mock server.
pub struct MockServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// "METHOD /path" for each request, in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.requests().iter().map(RecordedRequest::line).collect()
    }
}

/// Start a programmable mock server on an ephemeral port.
pub async fn start_programmable_server<F>(handler: F) -> MockServer
where
    F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    serve(listener, handler)
}

/// Start a programmable mock server on a specific address.
pub async fn start_programmable_server_at<F>(addr: SocketAddr, handler: F) -> MockServer
where
    F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    serve(listener, handler)
}

fn serve<F>(listener: TcpListener, handler: F) -> MockServer
where
    F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let handler = Arc::new(handler);

    let recorded = requests.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        handle_connection(socket, handler.as_ref(), &recorded).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockServer { addr, requests }
}

async fn handle_connection<F>(
    mut socket: TcpStream,
    handler: &F,
    recorded: &Mutex<Vec<RecordedRequest>>,
) where
    F: Fn(&RecordedRequest) -> MockResponse,
{
    let request = match read_request(&mut socket).await {
        Some(request) => request,
        None => return,
    };
    recorded.lock().unwrap().push(request.clone());

    let response = handler(&request);
    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let mut head = format!("HTTP/1.1 {} {}\r\n", response.status, reason(response.status));
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        response.body.len()
    ));

    let _ = socket.write_all(head.as_bytes()).await;
    let _ = socket.write_all(response.body.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(socket);
    let mut line = String::new();
    reader.read_line(&mut line).await.ok()?;

    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await.ok()? == 0 {
            return None;
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).await.ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// A bound-then-released local address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub const TGT: &str = "TGT-123";
pub const SERVICE_TICKET: &str = "ST-456";
pub const SESSION_COOKIE: &str = "JSESSIONID=abc123";

/// A CAS server that accepts `alice` / `secret`.
pub async fn start_cas() -> MockServer {
    let location = Arc::new(Mutex::new(String::new()));
    let server_location = location.clone();
    let server = start_programmable_server(move |req| {
        match (req.method.as_str(), req.path()) {
            ("POST", "/cas-server/v1/tickets/") => {
                if req.form_value("username").as_deref() == Some("alice")
                    && req.form_value("password").as_deref() == Some("secret")
                {
                    let location = server_location.lock().unwrap().clone();
                    MockResponse::new(201, "").header("Location", location)
                } else {
                    MockResponse::new(401, "bad credentials")
                }
            }
            ("POST", path) if path == format!("/cas-server/v1/tickets/{}", TGT) => {
                MockResponse::new(200, SERVICE_TICKET)
            }
            ("DELETE", _) => MockResponse::new(200, ""),
            _ => MockResponse::new(404, ""),
        }
    })
    .await;
    *location.lock().unwrap() = server.url(&format!("/cas-server/v1/tickets/{}", TGT));
    server
}

/// An API that issues a session cookie at get-session, requires it on
/// proxied resources, and answers with `handler` for those.
pub async fn start_api<F>(handler: F) -> MockServer
where
    F: Fn(&RecordedRequest) -> MockResponse + Send + Sync + 'static,
{
    start_programmable_server(move |req| match req.path() {
        "/eureka-webapp/protected/get-session" => {
            if req.query_value("ticket").as_deref() == Some(SERVICE_TICKET) {
                MockResponse::new(200, "")
                    .header("Set-Cookie", format!("{}; Path=/", SESSION_COOKIE))
            } else {
                MockResponse::new(401, "invalid ticket")
            }
        }
        "/eureka-webapp/destroy-session" => MockResponse::new(200, ""),
        _ => {
            if req.header("cookie") != Some(SESSION_COOKIE) {
                return MockResponse::new(401, "no session");
            }
            handler(req)
        }
    })
    .await
}

pub fn config_for(cas: &MockServer, api: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default()
        .with_cas_url(cas.url("/cas-server"))
        .with_api_url(api.url("/eureka-webapp"))
        .with_timeout_secs(5)
        .with_max_retries(2);
    config.retries.base_delay_ms = 10;
    config.retries.max_delay_ms = 50;
    config
}

pub fn alice() -> Credentials {
    Credentials::new("alice", "secret")
}
