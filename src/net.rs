use std::net::{IpAddr, SocketAddr, UdpSocket};

/// The address this machine uses to reach the wider network, found by
/// "connecting" a UDP socket (no packets are sent).
pub fn local_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}

/// Base URL to give the phone: the LAN address when bound to every
/// interface, otherwise the bound address itself.
pub fn public_url(bind_addr: SocketAddr) -> String {
    let host = if bind_addr.ip().is_unspecified() {
        local_ip().map_or_else(|| "localhost".to_string(), |ip| ip.to_string())
    } else {
        bind_addr.ip().to_string()
    };
    format!("http://{}:{}", host, bind_addr.port())
}
