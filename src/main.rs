mod cli;
mod codec;
mod errors;
mod parsers;
mod processor;
mod protocol;
mod responder;
mod wire;

use std::sync::Arc;

use anyhow::Context;
use responder::Responder;
use tokio::net::UdpSocket;
use tracing::info;

/// Largest datagram read from the socket; anything longer is truncated by the OS.
const MAX_DATAGRAM_LEN: usize = 4096;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse_args();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let sock = UdpSocket::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind UDP socket on {}", args.listen))?;
    let sock = Arc::new(sock);

    let responder = Responder::new(args.answer, args.ttl);
    let mut buf = [0; MAX_DATAGRAM_LEN];

    info!(
        "DNS server listening on {}, answering with {} (ttl {}s)",
        sock.local_addr()?,
        responder.address(),
        args.ttl
    );

    loop {
        // A failed receive means the socket itself is broken
        let (len, addr) = sock
            .recv_from(&mut buf)
            .await
            .context("failed to receive datagram")?;

        tokio::spawn(processor::process_dns_query(
            buf[..len].to_vec(),
            addr,
            responder,
            Arc::clone(&sock),
        ));
    }
}
