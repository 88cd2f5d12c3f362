//! Diagram HTTP server.
//!
//! Every request is answered from its URL alone: decode the source, pick the
//! diagram kind, render, and frame the bytes (or a JSON error).

mod lifecycle;
mod response;
mod route;

pub use response::Reply;
pub use route::Route;

use crate::{
    config::ServerConfig,
    core::is_shutdown,
    debug,
    diagram::{ApiError, Dispatcher, OutputFormat},
    log,
};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tiny_http::{Method, Request, Server};

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    workers: usize,
    dispatcher: Dispatcher,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &ServerConfig, dispatcher: Dispatcher) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    Ok(BoundServer {
        server,
        addr,
        workers: config.serve.workers,
        dispatcher,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking).
    ///
    /// Returns once the server is unblocked and every accepted request has
    /// been answered. Shutdown is checked at accept time: requests already
    /// queued on the pool are still rendered.
    pub fn run(self) -> Result<()> {
        let pool = lifecycle::worker_pool(self.workers)?;
        let dispatcher = &self.dispatcher;

        pool.in_place_scope(|scope| {
            for request in self.server.incoming_requests() {
                if let Some(reply) = refusal(is_shutdown()) {
                    if let Err(e) = response::respond(request, reply) {
                        log!("serve"; "request error: {e}");
                    }
                    continue;
                }

                scope.spawn(move |_| {
                    if let Err(e) = handle_request(request, dispatcher) {
                        log!("serve"; "request error: {e}");
                    }
                });
            }
        });

        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, dispatcher: &Dispatcher) -> Result<()> {
    let started = Instant::now();
    let reply = handle(request.method(), request.url(), dispatcher);

    debug!(
        "request";
        "{} {} -> {} ({:.1?})",
        request.method(),
        abbreviate(request.url()),
        reply.status,
        started.elapsed()
    );

    response::respond(request, reply)
}

/// Reply for a request accepted while shutting down.
fn refusal(shutting_down: bool) -> Option<Reply> {
    shutting_down.then(|| Reply::error(&ApiError::Unavailable))
}

/// Answer a request by method and URL.
pub fn handle(method: &Method, url: &str, dispatcher: &Dispatcher) -> Reply {
    if !matches!(method, Method::Get | Method::Head) {
        return Reply::error(&ApiError::MethodNotAllowed);
    }

    let Some(route) = Route::parse(url) else {
        return Reply::error(&ApiError::NotFound);
    };

    // Format is checked before anything is decoded.
    let format = match route.format().parse::<OutputFormat>() {
        Ok(format) => format,
        Err(err) => return Reply::error(&err),
    };

    let result = match &route {
        Route::Explicit { kind, encoded, .. } => {
            dispatcher.render_explicit(*kind, format, encoded)
        }
        Route::Sniffed { encoded, .. } => dispatcher.render_sniffed(format, encoded),
    };

    if let Ok(rendered) = &result {
        debug!("render"; "{} {}, {} bytes", rendered.kind, rendered.format, rendered.body.len());
    }

    Reply::from_result(result)
}

/// Shorten long encoded paths for log lines.
fn abbreviate(url: &str) -> String {
    const MAX: usize = 64;
    match url.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &url[..end]),
        None => url.to_string(),
    }
}
