/// # cleanurl
///
/// Clean URL parsing for scripts mounted under a web server, plus a small
/// host that serves a view behind those URLs.
///
/// The `run` function initializes logging and then either starts the HTTP
/// server or answers a single CGI request, based on command-line arguments.
pub mod cgi;
pub mod clean_url;
pub mod cli;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod server;
pub mod utils;
pub mod view;


use crate::cli::Cli;
use crate::request::ServerEnv;
use crate::view::EchoView;
use clap::Parser;
use log::error;

/// Initializes the logger, parses command-line arguments, and runs the host.
pub fn run() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.detailed_logging {
        "info"
    } else {
        "warn"
    };

    // CGI responses go to stdout; env_logger writes to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    log::debug!("Log level set to: {log_level}");

    let result = if cli.cgi {
        let view = EchoView::new(cli.view.clone());
        cgi::respond(ServerEnv::from_process_env(), &view, &mut std::io::stdout().lock())
    } else {
        server::run_server(cli, None, None)
    };

    if let Err(e) = result {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
