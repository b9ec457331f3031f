use std::{net::SocketAddr, sync::Arc};

use tokio::net::UdpSocket;
use tracing::{debug, error, info, trace, warn};

use crate::errors::DnsCodecError;
use crate::responder::Responder;

// Answer one datagram. Every failure stays inside this call so the receive
// loop keeps going.
pub async fn process_dns_query(
    packet_data: Vec<u8>,
    addr: SocketAddr,
    responder: Responder,
    sock: Arc<UdpSocket>,
) {
    debug!("Received {} bytes from {}", packet_data.len(), addr);
    trace!("Raw datagram from {}: {:02x?}", addr, packet_data);

    match responder.handle_query(&packet_data) {
        Ok(response) => match sock.send_to(&response, addr).await {
            Ok(response_len) => {
                info!("Sent DNS response ({} bytes) to {}", response_len, addr)
            }
            Err(e) => error!("Failed to send DNS response to {}: {}", addr, e),
        },
        Err(DnsCodecError::Format(e)) => {
            warn!("Dropping malformed DNS packet from {}: {}", addr, e);
        }
        Err(e) => {
            error!("Failed to answer DNS packet from {}: {}", addr, e);
        }
    }
}
