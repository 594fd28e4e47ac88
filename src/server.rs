use crate::cli::Cli;
use crate::error::AppError;
use crate::http::{handle_client, HostConfig};
use crate::view::EchoView;
use log::{debug, error, info};
use rand::Rng;
use std::net::{SocketAddr, TcpListener};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use threadpool::ThreadPool;

/// Builds the shared host configuration from the command line.
pub fn host_config(cli: &Cli) -> Result<HostConfig, AppError> {
    let document_root = cli.directory.canonicalize().map_err(|e| {
        error!("Cannot resolve document root '{}': {e}", cli.directory.display());
        AppError::DirectoryNotFound(cli.directory.to_string_lossy().into_owned())
    })?;

    if !document_root.is_dir() {
        return Err(AppError::DirectoryNotFound(
            cli.directory.to_string_lossy().into_owned(),
        ));
    }

    Ok(HostConfig {
        document_root,
        script_name: cli.script_name.clone(),
        server_name: cli.server_name.clone(),
        https: cli.https.clone(),
        view: Box::new(EchoView::new(cli.view.clone())),
    })
}

pub fn run_server(
    cli: Cli,
    shutdown_rx: Option<mpsc::Receiver<()>>,
    addr_tx: Option<mpsc::Sender<SocketAddr>>,
) -> Result<(), AppError> {
    let config = Arc::new(host_config(&cli)?);

    let bind_address = format!("{}:{}", cli.listen, cli.port);
    let listener = TcpListener::bind(&bind_address)?;
    let local_addr = listener.local_addr()?;
    listener.set_nonblocking(true)?;

    if let Some(tx) = addr_tx {
        if tx.send(local_addr).is_err() {
            return Err(AppError::InternalServerError(
                "Failed to send server address to test thread".to_string(),
            ));
        }
    }

    info!(
        "Server listening on {} for document root '{}' (script: {}, view: {})",
        local_addr,
        config.document_root.display(),
        config.script_name,
        config.view.name()
    );

    let pool = ThreadPool::new(cli.threads.max(1));

    'server_loop: loop {
        if let Some(ref rx) = shutdown_rx {
            if rx.try_recv().is_ok() {
                info!("Shutdown signal received. Shutting down gracefully.");
                break 'server_loop;
            }
        }

        match listener.accept() {
            Ok((stream, peer)) => {
                // Accepted sockets inherit non-blocking mode on some platforms.
                if let Err(e) = stream.set_nonblocking(false) {
                    error!("Failed to configure connection from {peer}: {e}");
                    continue;
                }

                let config = Arc::clone(&config);
                let request_id = generate_request_id();
                let log_prefix = format!("[ReqID: {request_id}][Peer: {peer}]");

                pool.execute(move || {
                    debug!("{log_prefix} Handling client connection");
                    match handle_client(stream, &config, &log_prefix) {
                        Ok(()) => debug!("{log_prefix} Client handled successfully"),
                        Err(e) => error!("{log_prefix} Error handling client: {e}"),
                    }
                });
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(100));
                continue;
            }
            Err(e) => {
                error!("Error accepting connection: {e}");
            }
        }
    }

    pool.join();
    info!("Server shutting down gracefully.");
    Ok(())
}

fn generate_request_id() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}
