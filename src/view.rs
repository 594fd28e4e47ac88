use crate::clean_url::Protocol;
use crate::request::Request;
use html_escape::encode_text;

/// Drops the leading run of segments equal to `view_name`.
///
/// Only the head is inspected: `["Bar", "Foo"]` trimmed by `Foo` comes back
/// unchanged.
pub fn trim_segments<'a>(segments: &'a [String], view_name: &str) -> &'a [String] {
    let skip = segments
        .iter()
        .take_while(|segment| segment.as_str() == view_name)
        .count();
    &segments[skip..]
}

/// Something that renders a page for a request.
pub trait View {
    fn name(&self) -> &str;

    fn render(&self, ctx: &ViewContext<'_>) -> String;
}

/// What a view gets to see of the request it renders.
pub struct ViewContext<'a> {
    request: &'a Request,
    view_name: &'a str,
}

impl<'a> ViewContext<'a> {
    pub fn new(request: &'a Request, view_name: &'a str) -> Self {
        Self { request, view_name }
    }

    /// `http://` or `https://`.
    pub fn protocol(&self) -> Protocol {
        self.request.clean_url().protocol
    }

    /// Base path for absolute links.
    pub fn base_path(&self) -> &'a str {
        &self.request.clean_url().base_path
    }

    /// The segments meant for this view, with its own name stripped off.
    pub fn params(&self) -> &'a [String] {
        trim_segments(&self.request.clean_url().segments, self.view_name)
    }

    pub fn segments(&self) -> &'a [String] {
        &self.request.clean_url().segments
    }

    pub fn request(&self) -> &'a Request {
        self.request
    }
}

/// Renders the request into an HTML page from `view`.
pub fn render_view(view: &dyn View, request: &Request) -> String {
    let ctx = ViewContext::new(request, view.name());
    view.render(&ctx)
}

/// Shows what the clean URL parser made of a request.
pub struct EchoView {
    name: String,
}

impl EchoView {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl View for EchoView {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, ctx: &ViewContext<'_>) -> String {
        let parsed = ctx.request().clean_url();

        let rows = [
            ("Document root", parsed.document_root.as_str()),
            ("URL root", parsed.url_root.as_str()),
            ("Protocol", ctx.protocol().as_str()),
            ("Base path", ctx.base_path()),
        ]
        .iter()
        .map(|(label, value)| format!("<tr><th>{label}</th><td>{}</td></tr>\n", encode_text(value)))
        .collect::<String>();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{name}</title>
<base href="{base}">
</head>
<body>
<h1>{name}</h1>
<table>
{rows}</table>
<h2>Segments</h2>
{segments}
<h2>Params</h2>
{params}
</body>
</html>
"#,
            name = encode_text(&self.name),
            base = html_escape::encode_double_quoted_attribute(ctx.base_path()),
            rows = rows,
            segments = render_list(ctx.segments()),
            params = render_list(ctx.params()),
        )
    }
}

fn render_list(items: &[String]) -> String {
    if items.is_empty() {
        return "<p>(none)</p>".to_string();
    }

    let entries = items
        .iter()
        .map(|item| format!("<li>{}</li>", encode_text(item)))
        .collect::<String>();
    format!("<ol>{entries}</ol>")
}
