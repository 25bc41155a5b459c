mod net_util;
mod resolver;

use bytes::BytesMut;
use clap::Parser;
use std::io;
use std::net::Ipv4Addr;
use std::process;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::{mpsc, Mutex};
use tracing_subscriber::EnvFilter;

use dns_wire::protocol::types::Message;

use crate::net_util::send_udp_bytes_to;
use crate::resolver::{resolve, Mode};

async fn handle_datagram(mode: &Mode, buf: &[u8]) -> Option<Message> {
    match Message::from_octets(buf) {
        Ok(msg) => {
            tracing::debug!(id = %msg.header.id, "received message");
            resolve(mode, &msg).await
        }
        Err(err) => {
            // nothing can be done with a datagram that does not parse
            tracing::warn!(id = ?err.id(), ?err, "could not deserialise message");
            None
        }
    }
}

async fn listen_udp(mode: Arc<Mode>, socket: UdpSocket) {
    let (tx, mut rx) = mpsc::channel(32);
    let mut buf = vec![0u8; 512];

    loop {
        tokio::select! {
            Ok((size, peer)) = socket.recv_from(&mut buf) => {
                let bytes = BytesMut::from(&buf[..size]);
                let reply = tx.clone();
                let mode = mode.clone();
                tokio::spawn(async move {
                    if let Some(response) = handle_datagram(&mode, bytes.as_ref()).await {
                        if let Err(err) = reply.send((response, peer)).await {
                            tracing::warn!(%peer, ?err, "could not reply");
                        }
                    }
                });
            }

            Some((message, peer)) = rx.recv() => {
                match message.to_octets() {
                    Ok(mut serialised) => {
                        if let Err(err) = send_udp_bytes_to(&socket, peer, &mut serialised).await {
                            tracing::warn!(%peer, ?err, "udp send error");
                        }
                    }
                    Err(err) => {
                        tracing::error!(?message, ?err, "could not serialise message");
                    }
                }
            }
        }
    }
}

async fn connect_upstream(upstream: &str) -> Result<UdpSocket, io::Error> {
    let sock = UdpSocket::bind("0.0.0.0:0").await?;
    sock.connect(upstream).await?;
    Ok(sock)
}

/// `RUST_LOG` when set, info-level output when not.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[derive(Debug, Parser)]
/// A DNS server which answers everything, one way or another.
///
/// Without an upstream resolver, every name resolves to the same
/// fixed address.  With one, queries are split up and relayed to the
/// upstream question by question, and the answers stitched back
/// together into a single response.
///
/// It speaks UDP only, and is not intended to face the internet.
struct Args {
    /// Upstream nameserver to relay queries to, as host:port
    #[clap(short, long)]
    resolver: Option<String>,

    /// Interface to listen on
    #[clap(short, long, default_value_t = Ipv4Addr::LOCALHOST)]
    interface: Ipv4Addr,

    /// Port to listen on
    #[clap(short, long, default_value_t = 2053)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt().with_env_filter(log_filter()).init();

    let mode = match &args.resolver {
        Some(upstream) => match connect_upstream(upstream).await {
            Ok(sock) => {
                tracing::info!(%upstream, "forwarding questions to the upstream resolver");
                Mode::Forwarding {
                    upstream: Mutex::new(sock),
                }
            }
            Err(err) => {
                eprintln!("error connecting to upstream \"{upstream}\": {err:?}");
                process::exit(1);
            }
        },
        None => {
            tracing::info!(address = %resolver::FIXED_ADDRESS, "answering every query with the fixed address");
            Mode::Fixed
        }
    };

    let udp = match UdpSocket::bind((args.interface, args.port)).await {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error binding UDP socket: {err:?}");
            process::exit(1);
        }
    };

    tracing::info!(interface = %args.interface, port = %args.port, "listening");

    listen_udp(Arc::new(mode), udp).await;
}
