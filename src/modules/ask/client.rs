//! HTTP client for the tutoring service
//!
//! One blocking POST per submission. ALWAYS call from a background
//! thread, never from the render loop!

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Wire payload for `POST /api/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub question_id: String,
    pub query: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    response: String,
}

/// Send one submission and return the service's response text.
pub fn submit(endpoint: &str, request: &SubmitRequest) -> Result<String> {
    let agent = ureq::agent();

    let result = agent
        .post(endpoint)
        .set("Content-Type", "application/json")
        .send_string(&serde_json::to_string(request)?);

    match result {
        Ok(resp) => {
            // ureq surfaces only 4xx/5xx as Error::Status; a redirect
            // the agent did not follow still lands here
            if !(200..300).contains(&resp.status()) {
                anyhow::bail!("API request failed");
            }
            // A reply without a string `response` field is malformed,
            // not an empty answer
            let parsed: SubmitResponse = serde_json::from_reader(resp.into_reader())
                .context("Failed to parse service response")?;
            Ok(parsed.response)
        }
        // Uniform message for any non-2xx status, the body is ignored
        Err(ureq::Error::Status(_, _)) => anyhow::bail!("API request failed"),
        Err(ureq::Error::Transport(e)) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;

    /// Serve exactly one canned HTTP response on a local port and hand
    /// back the raw request bytes for inspection.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_http_request(&mut stream);

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            let _ = tx.send(request);
        });

        (format!("http://{}/api/submit", addr), rx)
    }

    /// Read the headers plus a Content-Length body off the socket.
    fn read_http_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            data.extend_from_slice(&buf[..n]);
            if let Some(pos) = header_end(&data) {
                let headers = String::from_utf8_lossy(&data[..pos]).to_string();
                let content_length = headers
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                while data.len() < pos + 4 + content_length {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    data.extend_from_slice(&buf[..n]);
                }
                return String::from_utf8_lossy(&data).to_string();
            }
            if n == 0 {
                return String::from_utf8_lossy(&data).to_string();
            }
        }
    }

    fn header_end(data: &[u8]) -> Option<usize> {
        data.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn request() -> SubmitRequest {
        SubmitRequest {
            question_id: "Q1".to_string(),
            query: "What does this do?".to_string(),
            code: "print(1)".to_string(),
        }
    }

    #[test]
    fn test_submit_posts_the_form_as_json() {
        let (url, rx) = serve_once("HTTP/1.1 200 OK", r#"{"response":"ok"}"#);
        let result = submit(&url, &request()).unwrap();
        assert_eq!(result, "ok");

        let raw = rx.recv().unwrap();
        let first_line = raw.lines().next().unwrap_or("");
        assert!(first_line.starts_with("POST /api/submit"));
        assert!(raw
            .to_ascii_lowercase()
            .contains("content-type: application/json"));

        // The body round-trips to the original triple
        let body = raw.split("\r\n\r\n").nth(1).unwrap_or("");
        let sent: SubmitRequest = serde_json::from_str(body).unwrap();
        assert_eq!(sent, request());
        assert!(body.contains("\"questionId\""));
    }

    #[test]
    fn test_response_text_passes_through_unchanged() {
        let (url, _rx) = serve_once(
            "HTTP/1.1 200 OK",
            "{\"response\":\"line1\\nline2\\u0000end\"}",
        );
        let result = submit(&url, &request()).unwrap();
        assert_eq!(result, "line1\nline2\u{0}end");
    }

    #[test]
    fn test_empty_response_string_is_ok() {
        let (url, _rx) = serve_once("HTTP/1.1 200 OK", r#"{"response":""}"#);
        assert_eq!(submit(&url, &request()).unwrap(), "");
    }

    #[test]
    fn test_server_error_maps_to_fixed_message() {
        let (url, _rx) = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"detail":"exploded"}"#,
        );
        let err = submit(&url, &request()).unwrap_err();
        assert_eq!(format!("{:#}", err), "API request failed");
    }

    #[test]
    fn test_client_error_maps_to_fixed_message() {
        let (url, _rx) = serve_once("HTTP/1.1 404 Not Found", "nope");
        let err = submit(&url, &request()).unwrap_err();
        assert_eq!(format!("{:#}", err), "API request failed");
    }

    #[test]
    fn test_redirect_maps_to_fixed_message() {
        // Without a Location header the agent hands the 302 back as-is,
        // through the success path. A well-formed body must not leak
        // through as a response.
        let (url, _rx) = serve_once("HTTP/1.1 302 Found", r#"{"response":"gotcha"}"#);
        let err = submit(&url, &request()).unwrap_err();
        assert_eq!(format!("{:#}", err), "API request failed");
    }

    #[test]
    fn test_missing_response_field_is_an_error() {
        let (url, _rx) = serve_once("HTTP/1.1 200 OK", r#"{"result":"x"}"#);
        let err = submit(&url, &request()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse service response"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let (url, _rx) = serve_once("HTTP/1.1 200 OK", "not json at all");
        let err = submit(&url, &request()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse service response"));
    }

    #[test]
    fn test_connection_refused_reports_the_transport_error() {
        // Bind then drop to get a port with nothing listening on it
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = submit(&format!("http://{}/api/submit", addr), &request()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(!message.is_empty());
        assert_ne!(message, "API request failed");
    }
}
