//! Static preview server for the output directory.

mod lifecycle;
mod path;
mod response;

use crate::{config::Config, core, debug, log};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Worker threads answering requests.
const WORKERS: usize = 4;

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    root: PathBuf,
}

/// Bind the HTTP server on the configured interface and port.
pub fn bind_server(config: &Config) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    core::register_server(Arc::clone(&server));

    Ok(BoundServer {
        server,
        addr,
        root: config.build.output.clone(),
    })
}

impl BoundServer {
    /// Serve requests until Ctrl+C unblocks the server.
    pub fn run(self) -> Result<()> {
        log!("serve"; "http://{}", self.addr);
        debug!("serve"; "root {}", self.root.display());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(WORKERS)
            .build()
            .context("failed to create request thread pool")?;

        let root = Arc::new(self.root);
        for request in self.server.incoming_requests() {
            let root = Arc::clone(&root);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &root) {
                    log!("serve"; "request error: {e}");
                }
            });
        }

        Ok(())
    }
}

/// Bind and serve the output directory (blocking).
pub fn serve_site(config: &Config) -> Result<()> {
    if !config.build.output.is_dir() {
        anyhow::bail!(
            "output directory {} does not exist, run `theu build` first",
            config.build.output.display()
        );
    }
    bind_server(config)?.run()
}

/// Handle a single HTTP request.
fn handle_request(request: Request, root: &Path) -> Result<()> {
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    match path::resolve_path(request.url(), root) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request),
    }
}
