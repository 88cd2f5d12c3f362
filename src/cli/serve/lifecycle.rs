//! Server lifecycle management.

use crate::{core::register_server, log};
use anyhow::{Result, anyhow};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::Server;

/// Bind to the specified interface and port.
///
/// Port 0 picks a free port; the returned address is the one actually bound.
pub fn bind(interface: IpAddr, port: u16) -> Result<(Server, SocketAddr)> {
    let requested = SocketAddr::new(interface, port);
    let server =
        Server::http(requested).map_err(|e| anyhow!("failed to bind {requested}: {e}"))?;
    let addr = server.server_addr().to_ip().unwrap_or(requested);
    Ok((server, addr))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the handler set up in main() unblocks the server,
/// ending the request loop.
pub fn register_server_for_shutdown(server: Arc<Server>) {
    register_server(server);
}

/// Create the pool that renders requests.
pub fn worker_pool(workers: usize) -> Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("diagserve-worker-{i}"))
        .build()?;
    log!("serve"; "{} worker{}", workers, if workers == 1 { "" } else { "s" });
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_any_port() {
        let (_server, addr) = bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_bind_in_use_port_fails() {
        let (_server, addr) = bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).unwrap();
        let Err(err) = bind(addr.ip(), addr.port()) else {
            panic!("second bind on {addr} succeeded");
        };
        assert!(err.to_string().contains("failed to bind"));
    }
}
