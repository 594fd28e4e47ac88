use crate::error::AppError;
use crate::request::{Request, ServerEnv};
use crate::response::HttpResponse;
use crate::view::{render_view, View};
use log::debug;
use std::io::Write;

/// Answers one CGI request described by `env`, writing the response to `out`.
pub fn respond<W: Write>(env: ServerEnv, view: &dyn View, out: &mut W) -> Result<(), AppError> {
    let request = Request::new(env);
    let html = render_view(view, &request);
    debug!(
        "CGI request '{}' -> segments {:?}",
        request.env().request_uri,
        request.clean_url().segments
    );

    HttpResponse::new(200, "OK").with_html_body(html).send_cgi(out)
}
