//! Plain HTTP transport for the pairing request.

use crate::traits::Transport;
use async_trait::async_trait;
use dacp_core::{Error, PairingError, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

/// Time allowed for connect, request and response together.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest response body accepted. Pairing answers are well under 1 KiB.
pub const MAX_BODY_LEN: usize = 64 * 1024;

const MAX_HEADER_LEN: usize = 16 * 1024;

/// One-shot HTTP/1.1 client for `GET /pair`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request(addr: SocketAddr, pairing_code: &str, service_name: &str) -> String {
        format!(
            "GET /pair?pairingcode={}&servicename={} HTTP/1.1\r\n\
             Host: {}\r\n\
             Connection: close\r\n\
             \r\n",
            encode_query_value(pairing_code),
            encode_query_value(service_name),
            addr
        )
    }

    async fn exchange(addr: SocketAddr, request: &str) -> Result<Vec<u8>> {
        let mut stream = TcpStream::connect(addr).await?;
        stream.write_all(request.as_bytes()).await?;
        stream.flush().await?;

        let mut reader = BufReader::new(stream);
        let mut response = Vec::new();

        // Headers end at the first empty line
        loop {
            let mut line = String::new();
            let budget = (MAX_HEADER_LEN - response.len()) as u64;
            let n = (&mut reader).take(budget).read_line(&mut line).await?;
            response.extend_from_slice(line.as_bytes());
            if n == 0 || line == "\r\n" {
                break;
            }
            if response.len() >= MAX_HEADER_LEN {
                return Err(PairingError::Protocol(format!(
                    "headers exceed {} bytes",
                    MAX_HEADER_LEN
                ))
                .into());
            }
        }

        // Only bytes that actually arrive are buffered
        let limit = match content_length(&response) {
            Some(len) if len > MAX_BODY_LEN => return Err(body_too_large(len)),
            Some(len) => len,
            None => MAX_BODY_LEN + 1,
        };
        let mut body = Vec::new();
        (&mut reader).take(limit as u64).read_to_end(&mut body).await?;
        if body.len() > MAX_BODY_LEN {
            return Err(body_too_large(body.len()));
        }
        response.extend_from_slice(&body);

        Ok(response)
    }
}

fn body_too_large(len: usize) -> Error {
    PairingError::Protocol(format!(
        "body of {} bytes exceeds the {} byte limit",
        len, MAX_BODY_LEN
    ))
    .into()
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_pair(
        &self,
        addr: SocketAddr,
        pairing_code: &str,
        service_name: &str,
    ) -> Result<Vec<u8>> {
        let request = Self::request(addr, pairing_code, service_name);
        debug!("HTTP -> {} GET /pair", addr);
        trace!("Request:\n{}", request);

        let response = timeout(self.timeout, Self::exchange(addr, &request))
            .await
            .map_err(|_| Error::Timeout)??;

        let (status, body) = parse_response(&response)?;
        debug!("HTTP <- {} ({} byte body)", status, body.len());

        if status != 200 {
            return Err(PairingError::Rejected(status).into());
        }
        Ok(body)
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

fn content_length(head: &[u8]) -> Option<usize> {
    String::from_utf8_lossy(head).lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case("Content-Length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    })
}

/// Split a raw response into status code and body.
fn parse_response(data: &[u8]) -> Result<(u16, Vec<u8>)> {
    let header_end = data
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or_else(|| PairingError::Protocol("missing header terminator".to_string()))?;

    let head = std::str::from_utf8(&data[..header_end])
        .map_err(|_| PairingError::Protocol("invalid UTF-8 in headers".to_string()))?;

    // "HTTP/1.1 200 OK"
    let status_line = head
        .lines()
        .next()
        .ok_or_else(|| PairingError::Protocol("missing status line".to_string()))?;
    let mut parts = status_line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(
            PairingError::Protocol(format!("not an HTTP response: {:?}", status_line)).into(),
        );
    }
    let status = parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| PairingError::Protocol(format!("invalid status line: {:?}", status_line)))?;

    let mut body = data[header_end + 4..].to_vec();
    if let Some(len) = content_length(&data[..header_end + 2]) {
        if body.len() < len {
            return Err(PairingError::Protocol(format!(
                "body too short: expected {} bytes, got {}",
                len,
                body.len()
            ))
            .into());
        }
        body.truncate(len);
    }

    Ok((status, body))
}
