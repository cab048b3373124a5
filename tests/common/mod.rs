//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::{self, Read};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use hyper::header::HeaderValue;
use hyper::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use loghttp::{Body, Result, Sink, Transport};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A sink that collects everything written to it.
pub fn capture() -> (Arc<Mutex<Vec<u8>>>, Sink) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let sink = Sink::writer(buf.clone());
    (buf, sink)
}

pub fn output(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buf.lock().unwrap().clone()).unwrap()
}

/// What the inner transport saw.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub body_was_replay: bool,
    pub body_was_empty: bool,
}

/// Transport double: records each request, answers with a canned response.
pub struct RecordingTransport {
    pub seen: Mutex<Vec<Seen>>,
    status: StatusCode,
    headers: HeaderMap,
    body: Arc<dyn Fn() -> Body + Send + Sync>,
}

impl RecordingTransport {
    pub fn new(status: StatusCode, content_type: Option<&'static str>, body: &'static str) -> Self {
        Self::with_body(status, content_type, move || Body::from_reader(io::Cursor::new(body)))
    }

    pub fn with_body<F>(status: StatusCode, content_type: Option<&'static str>, body: F) -> Self
    where
        F: Fn() -> Body + Send + Sync + 'static,
    {
        let mut headers = HeaderMap::new();
        if let Some(content_type) = content_type {
            headers.insert("content-type", HeaderValue::from_static(content_type));
        }
        Self {
            seen: Mutex::new(Vec::new()),
            status,
            headers,
            body: Arc::new(body),
        }
    }

    pub fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().expect("no request executed")
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: Request<Body>) -> Result<Response<Body>> {
        let (parts, body) = request.into_parts();
        let body_was_replay = body.is_replay();
        let body_was_empty = body.is_empty();
        let body = body.into_bytes().map_err(loghttp::Error::transport)?;

        self.seen.lock().unwrap().push(Seen {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            body_was_replay,
            body_was_empty,
        });

        let mut response = Response::new((self.body)());
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        Ok(response)
    }
}

/// Reader that fails every read.
pub struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"))
    }
}

/// Reader fed chunk by chunk from a channel; ends when the sender is dropped.
pub struct ChannelReader {
    rx: std::sync::mpsc::Receiver<Vec<u8>>,
    pending: io::Cursor<Vec<u8>>,
}

impl ChannelReader {
    pub fn new(rx: std::sync::mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            pending: io::Cursor::new(Vec::new()),
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let n = std::io::Read::read(&mut self.pending, buf)?;
            if n > 0 || buf.is_empty() {
                return Ok(n);
            }
            match self.rx.recv() {
                Ok(chunk) => self.pending = io::Cursor::new(chunk),
                Err(_) => return Ok(0),
            }
        }
    }
}

/// Reader that flags when it has been closed (dropped).
pub struct CloseTracking<R> {
    pub inner: R,
    pub closed: Arc<AtomicBool>,
}

impl<R: Read> Read for CloseTracking<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R> Drop for CloseTracking<R> {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// Start a mock backend that echoes the request body and content type back.
pub async fn start_echo_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let (content_type, body) = read_request(&mut socket).await;
                        let mut response = format!(
                            "HTTP/1.1 201 Created\r\nContent-Length: {}\r\nConnection: close\r\n",
                            body.len()
                        );
                        if let Some(content_type) = content_type {
                            response.push_str(&format!("Content-Type: {}\r\n", content_type));
                        }
                        response.push_str("\r\n");

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.write_all(&body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read one HTTP/1.1 request with a Content-Length body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> (Option<String>, Vec<u8>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return (None, Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut content_type = None;
    let mut content_length = 0usize;
    for line in head.lines().skip(1) {
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-type" => content_type = Some(value.trim().to_string()),
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                _ => {}
            }
        }
    }

    let mut body = buf[head_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    (content_type, body)
}
