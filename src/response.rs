use crate::error::AppError;
use html_escape::encode_text;
use log::{debug, error};
use std::io::prelude::*;

/// HTTP response builder
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16, status_text: &str) -> Self {
        Self {
            status_code,
            status_text: status_text.to_string(),
            headers: vec![
                (
                    "Server".to_string(),
                    concat!("cleanurl/", env!("CARGO_PKG_VERSION")).to_string(),
                ),
                ("Connection".to_string(), "close".to_string()),
                ("Cache-Control".to_string(), "no-cache".to_string()),
            ],
            body: Vec::new(),
        }
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.headers.push((
            "Content-Type".to_string(),
            "text/html; charset=utf-8".to_string(),
        ));
        self.body = body.into_bytes();
        self
    }

    pub fn add_header(mut self, name: String, value: String) -> Self {
        self.headers.push((name, value));
        self
    }

    fn head(&self) -> String {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status_code, self.status_text);
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        for (name, value) in &self.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str("\r\n");
        head
    }

    /// Writes the response; `include_body` is false for HEAD requests.
    pub fn send<W: Write>(
        self,
        stream: &mut W,
        include_body: bool,
        log_prefix: &str,
    ) -> Result<(), AppError> {
        debug!(
            "{} Sending response - Status: {}, Body Length: {}",
            log_prefix,
            self.status_code,
            self.body.len()
        );

        stream.write_all(self.head().as_bytes()).map_err(|e| {
            error!("{log_prefix} Failed to write response headers: {e}");
            AppError::Io(e)
        })?;

        if include_body && !self.body.is_empty() {
            stream.write_all(&self.body).map_err(|e| {
                error!("{log_prefix} Failed to write response body: {e}");
                AppError::Io(e)
            })?;
        }

        stream.flush().map_err(|e| {
            error!("{log_prefix} Failed to flush response: {e}");
            AppError::Io(e)
        })?;

        Ok(())
    }

    /// Writes the response the way a CGI script answers: a `Status` header
    /// instead of a status line.
    pub fn send_cgi<W: Write>(self, out: &mut W) -> Result<(), AppError> {
        let mut head = format!("Status: {} {}\r\n", self.status_code, self.status_text);
        for (name, value) in &self.headers {
            if name == "Content-Type" {
                head.push_str(&format!("{name}: {value}\r\n"));
            }
        }
        head.push_str("\r\n");

        out.write_all(head.as_bytes())?;
        out.write_all(&self.body)?;
        out.flush()?;
        Ok(())
    }
}

/// Small HTML page for an error status.
pub fn create_error_response(status_code: u16, status_text: &str) -> HttpResponse {
    let page = format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Error {status_code}</title></head>
<body><h1>{status_code}</h1><p>{}</p></body>
</html>"#,
        encode_text(status_text)
    );
    let response = HttpResponse::new(status_code, status_text).with_html_body(page);

    if status_code == 405 {
        response.add_header("Allow".to_string(), "GET, HEAD".to_string())
    } else {
        response
    }
}
