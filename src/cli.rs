use clap::Parser;
use std::path::PathBuf;

// Command-line interface of the clean URL host.
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    long_about = "Serves a single view behind clean URLs.\n The request path is split into segments relative to the directory the script is mounted under,\n so /app/Foo/Bar on a script at /app/index.php gives the segments [Foo, Bar].\n The built-in view echoes the document root, URL root, protocol, base path and segments of each request.\n With --cgi the request is read from the CGI environment and answered on stdout instead of over a socket.\n",
    about = "Clean URL host that echoes how each request path is parsed."
)]
pub struct Cli {
    /// Document root the script lives in.
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Host address to listen on (e.g., "127.0.0.1", "0.0.0.0").
    #[arg(short, long, default_value = "127.0.0.1")]
    pub listen: String,

    /// Port number to listen on.
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Number of threads in the thread pool.
    #[arg(short, long, default_value_t = 4)]
    pub threads: usize,

    /// URL path of the script; its directory becomes the URL root.
    #[arg(long, default_value = "/index.php")]
    pub script_name: String,

    /// Host name for the base path. Defaults to the request's Host header.
    #[arg(long)]
    pub server_name: Option<String>,

    /// HTTPS indicator as a TLS-terminating proxy would set it ("on", "off").
    #[arg(long)]
    pub https: Option<String>,

    /// Name of the view; leading segments equal to it are not passed as params.
    #[arg(long, default_value = "Index")]
    pub view: String,

    /// Answer one request from the CGI environment instead of listening.
    #[arg(long, default_value_t = false)]
    pub cgi: bool,

    /// Enable verbose logging for debugging (log level: debug).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Enable more detailed logging (log level: info).
    #[arg(long, default_value_t = false)]
    pub detailed_logging: bool,
}
