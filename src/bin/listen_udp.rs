use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tokio::net::UdpSocket;
use tokio::signal;
use tracing::info;

/// Listen on a UDP port and print every datagram the hub broadcasts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to bind on all interfaces.
    port: u16,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_target(false)
        .init();

    tokio::select! {
        res = run(cli) => res,
        _ = signal::ctrl_c() => {
            info!("Ctrl+C received, shutting down gracefully.");
            Ok(())
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let socket = UdpSocket::bind(("0.0.0.0", cli.port))
        .await
        .with_context(|| format!("Failed to bind UDP port {}", cli.port))?;
    info!("Listening on udp/{}", cli.port);

    let mut buf = [0u8; 1024];
    loop {
        let (len, peer) = socket
            .recv_from(&mut buf)
            .await
            .context("UDP receive failed")?;
        let data = &buf[..len];
        match std::str::from_utf8(data) {
            Ok(text) => info!("Received {} bytes from {}: {:?}", len, peer, text),
            Err(_) => info!("Received {} bytes from {}: {}", len, peer, hex::encode(data)),
        }
    }
}
