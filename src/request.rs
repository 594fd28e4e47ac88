use crate::clean_url::{parse_env, ParsedRequest};
use std::cell::OnceCell;

/// The server metadata a script sees for one request, CGI style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEnv {
    pub request_uri: String,
    pub script_filename: String,
    pub script_name: String,
    pub server_name: String,
    /// Raw `HTTPS` indicator, if the server set one.
    pub https: Option<String>,
}

impl ServerEnv {
    /// Picks the CGI variables out of `vars`. Missing ones are left empty.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = ServerEnv::default();
        for (key, value) in vars {
            match key.as_ref() {
                "REQUEST_URI" => env.request_uri = value.into(),
                "SCRIPT_FILENAME" => env.script_filename = value.into(),
                "SCRIPT_NAME" => env.script_name = value.into(),
                "SERVER_NAME" => env.server_name = value.into(),
                "HTTPS" => env.https = Some(value.into()),
                _ => {}
            }
        }
        env
    }

    /// Reads the CGI variables of the current process.
    pub fn from_process_env() -> Self {
        Self::from_vars(std::env::vars())
    }
}

/// One request as the hosting layer sees it.
///
/// The clean URL is computed on first use and kept until the request is
/// dropped.
#[derive(Debug)]
pub struct Request {
    env: ServerEnv,
    clean_url: OnceCell<ParsedRequest>,
}

impl Request {
    pub fn new(env: ServerEnv) -> Self {
        Self {
            env,
            clean_url: OnceCell::new(),
        }
    }

    pub fn env(&self) -> &ServerEnv {
        &self.env
    }

    pub fn clean_url(&self) -> &ParsedRequest {
        self.clean_url.get_or_init(|| parse_env(&self.env))
    }

    pub fn is_parsed(&self) -> bool {
        self.clean_url.get().is_some()
    }
}
