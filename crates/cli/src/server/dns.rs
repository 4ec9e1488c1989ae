use addd_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

/// Largest datagram accepted; EDNS0 senders may exceed 512 bytes.
const MAX_DATAGRAM: usize = 4096;

/// Binds the DNS listener. Called before the receive loop is spawned so a
/// bind failure aborts startup.
pub fn bind_dns_socket(bind_addr: &str) -> anyhow::Result<UdpSocket> {
    let socket_addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid DNS bind address {}: {}", bind_addr, e))?;
    let socket = create_udp_socket(socket_addr)
        .map_err(|e| anyhow::anyhow!("Cannot bind DNS socket on {}: {}", socket_addr, e))?;

    info!(bind_address = %socket_addr, "DNS server ready");
    Ok(socket)
}

pub async fn start_dns_server(socket: UdpSocket, handler: DnsServerHandler) -> anyhow::Result<()> {
    let socket = Arc::new(socket);
    let handler = Arc::new(handler);

    let mut recv_buf = [0u8; MAX_DATAGRAM];
    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let request: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        tokio::spawn(async move {
            if let Some(response) = handler.handle_datagram(&request, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send reply");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

#[cfg(test)]
mod tests {
    use super::bind_dns_socket;

    #[tokio::test]
    async fn test_bind_on_loopback_succeeds() {
        let socket = bind_dns_socket("127.0.0.1:0").unwrap();
        assert!(socket.local_addr().unwrap().port() > 0);
    }

    #[tokio::test]
    async fn test_bind_on_foreign_address_fails() {
        // TEST-NET-3 is never assigned to a local interface.
        let err = bind_dns_socket("203.0.113.77:5353").unwrap_err();
        assert!(err.to_string().contains("Cannot bind DNS socket"));
    }

    #[tokio::test]
    async fn test_bind_rejects_malformed_address() {
        let err = bind_dns_socket("not-an-address:53").unwrap_err();
        assert!(err.to_string().contains("Invalid DNS bind address"));
    }
}
