use clap::Parser;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::Level;

use crate::responder::{DEFAULT_ANSWER, DEFAULT_TTL};

#[derive(Parser, Debug)]
#[command(name = "fixed-answer-dns")]
#[command(about = "A DNS server that answers every query with one fixed A record", long_about = None)]
pub struct Args {
    /// Address to listen on, of the form <ip>:<port>
    #[arg(short, long, default_value = "0.0.0.0:53", value_parser = parse_socket_addr)]
    pub listen: SocketAddr,

    /// IPv4 address returned in every answer
    #[arg(short, long, default_value_t = DEFAULT_ANSWER)]
    pub answer: Ipv4Addr,

    /// TTL of the answer record, in seconds
    #[arg(short, long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

fn parse_socket_addr(s: &str) -> Result<SocketAddr, String> {
    s.parse::<SocketAddr>().map_err(|_| {
        format!(
            "Invalid address format: '{}'. Expected format: <ip>:<port>",
            s
        )
    })
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
