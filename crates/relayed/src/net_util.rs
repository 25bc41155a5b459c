use std::io;
use std::net::SocketAddr;
use std::process;
use tokio::net::UdpSocket;

use dns_wire::protocol::types::HEADER_MASK_TC;

/// Send a serialised message over a connected UDP socket, truncating
/// it to a single datagram if need be.
pub async fn send_udp_bytes(sock: &UdpSocket, bytes: &mut [u8]) -> Result<(), io::Error> {
    let len = prepare_udp_bytes(bytes);
    sock.send(&bytes[..len]).await?;

    Ok(())
}

/// `send_udp_bytes` for an unconnected socket.
pub async fn send_udp_bytes_to(
    sock: &UdpSocket,
    target: SocketAddr,
    bytes: &mut [u8],
) -> Result<(), io::Error> {
    let len = prepare_udp_bytes(bytes);
    sock.send_to(&bytes[..len], target).await?;

    Ok(())
}

/// How much of the message fits into one datagram, with the TC flag
/// set or cleared in the header octets to match.
fn prepare_udp_bytes(bytes: &mut [u8]) -> usize {
    if bytes.len() < 12 {
        // the serialiser never emits fewer octets than a bare header
        tracing::error!(length = %bytes.len(), "message too short");
        process::exit(1);
    }

    if bytes.len() > 512 {
        bytes[2] |= HEADER_MASK_TC;
        512
    } else {
        bytes[2] &= !HEADER_MASK_TC;
        bytes.len()
    }
}
