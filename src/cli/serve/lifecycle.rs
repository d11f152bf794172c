//! Server binding.

use crate::log;
use anyhow::{Result, anyhow};
use std::net::{IpAddr, SocketAddr};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, trying the following ports
/// when it is taken.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // Port 0 lets the OS pick; report what was bound
                let bound = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, bound));
            }
            Err(err) => last_error = Some((port, err)),
        }
    }

    match last_error {
        Some((port, err)) => Err(anyhow!(
            "failed to bind {interface} on ports {base_port}-{port}: {err}"
        )),
        None => Err(anyhow!("no port available from {base_port}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_next_port_when_taken() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let (first, first_addr) = bind_with_retry(localhost, 0).unwrap();
        assert_ne!(first_addr.port(), 0);

        let (_second, second_addr) = bind_with_retry(localhost, first_addr.port()).unwrap();
        assert_ne!(second_addr.port(), first_addr.port());
        drop(first);
    }
}
