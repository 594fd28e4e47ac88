use crate::clean_url::basename;
use crate::error::AppError;
use crate::request::{Request, ServerEnv};
use crate::response::{create_error_response, HttpResponse};
use crate::utils::{host_without_port, parse_request_line};
use crate::view::{render_view, View};
use log::{debug, info, warn};
use std::io::{self, prelude::*, BufReader, ErrorKind};
use std::net::TcpStream;
use std::path::PathBuf;

/// Everything a worker needs to answer a request; shared by all workers.
pub struct HostConfig {
    pub document_root: PathBuf,
    pub script_name: String,
    pub server_name: Option<String>,
    pub https: Option<String>,
    pub view: Box<dyn View + Send + Sync>,
}

impl HostConfig {
    /// Server metadata for a request to `request_uri` with the given `Host` header.
    pub fn server_env(&self, request_uri: &str, host: Option<&str>) -> ServerEnv {
        let script_filename = self
            .document_root
            .join(basename(&self.script_name))
            .to_string_lossy()
            .into_owned();

        let server_name = match (&self.server_name, host) {
            (Some(name), _) => name.clone(),
            (None, Some(host)) => host_without_port(host).to_string(),
            (None, None) => String::new(),
        };

        ServerEnv {
            request_uri: request_uri.to_string(),
            script_filename,
            script_name: self.script_name.clone(),
            server_name,
            https: self.https.clone(),
        }
    }
}

/// Handles a single client connection.
pub fn handle_client(
    mut stream: TcpStream,
    config: &HostConfig,
    log_prefix: &str,
) -> Result<(), AppError> {
    let (method, env) = match read_request(&stream, config, log_prefix) {
        Ok(request) => request,
        Err(e) => {
            let (code, text) = e.status();
            create_error_response(code, text).send(&mut stream, true, log_prefix)?;
            return Err(e);
        }
    };

    let include_body = match method.as_str() {
        "GET" => true,
        "HEAD" => false,
        _ => {
            warn!("{log_prefix} Method not allowed: {method}");
            create_error_response(405, "Method Not Allowed").send(&mut stream, true, log_prefix)?;
            return Err(AppError::MethodNotAllowed);
        }
    };

    let request = Request::new(env);
    let html = render_view(config.view.as_ref(), &request);
    info!(
        "{} {} '{}' -> segments {:?}",
        log_prefix,
        method,
        request.env().request_uri,
        request.clean_url().segments
    );

    HttpResponse::new(200, "OK")
        .with_html_body(html)
        .send(&mut stream, include_body, log_prefix)
}

// Lines that are not UTF-8 are the client's fault, not ours.
fn request_read_error(e: io::Error) -> AppError {
    if e.kind() == ErrorKind::InvalidData {
        AppError::BadRequest
    } else {
        AppError::Io(e)
    }
}

// Reads the request line and headers, returning the method and server metadata.
fn read_request(
    stream: &TcpStream,
    config: &HostConfig,
    log_prefix: &str,
) -> Result<(String, ServerEnv), AppError> {
    let reader = BufReader::new(stream);
    let mut lines_iter = reader.lines();

    let request_line = match lines_iter.next() {
        Some(Ok(line)) => line,
        Some(Err(e)) => return Err(request_read_error(e)),
        None => return Err(AppError::BadRequest),
    };

    debug!("{} Request line: {}", log_prefix, request_line);

    let (method, target) = parse_request_line(&request_line).ok_or(AppError::BadRequest)?;

    let mut host = None;
    for line in lines_iter {
        let line = line.map_err(request_read_error)?;
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("host") {
                host = Some(value.trim().to_string());
            }
        }
    }

    Ok((method.to_string(), config.server_env(target, host.as_deref())))
}
