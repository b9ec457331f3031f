use std::net::Ipv4Addr;

use bytes::{Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, info};

use crate::codec::DnsCodec;
use crate::errors::{DnsCodecError, FormatError};
use crate::protocol::{ARecord, DnsPacketHeader, DnsQuery, DnsQuestion, DnsResponse};
use crate::wire::{class_mnemonic, rcode_mnemonic, type_mnemonic, RCODE_NOERROR};

pub const DEFAULT_TTL: u32 = 3600;
pub const DEFAULT_ANSWER: Ipv4Addr = Ipv4Addr::new(192, 168, 0, 1);

/// Answers every query with the same IPv4 address, whatever the name.
#[derive(Debug, Clone, Copy)]
pub struct Responder {
    address: Ipv4Addr,
    ttl: u32,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER, DEFAULT_TTL)
    }
}

impl Responder {
    pub fn new(address: Ipv4Addr, ttl: u32) -> Self {
        Self { address, ttl }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// The answer mirrors the question's name, type and class and always
    /// carries the configured address.
    pub fn build_answer(&self, question: &DnsQuestion) -> ARecord {
        ARecord::new(
            question.name.clone(),
            question.qtype,
            question.qclass,
            self.ttl,
            self.address,
        )
    }

    pub fn build_response(&self, query: &DnsQuery) -> DnsResponse {
        ResponseBuilder::new(query)
            .with_authoritative(true)
            .answer(self.build_answer(&query.question))
    }

    /// Decode a raw query datagram and produce the full response payload.
    pub fn handle_query(&self, datagram: &[u8]) -> Result<Bytes, DnsCodecError> {
        let mut codec = DnsCodec::new();
        let mut src = BytesMut::from(datagram);

        let query = codec
            .decode(&mut src)?
            .ok_or(FormatError::IncompleteHeader { available: 0 })?;

        log_query(&query, datagram.len());

        let response = self.build_response(&query);
        let mut dst = BytesMut::new();
        codec.encode(response, &mut dst)?;

        debug!(
            "Answered {} with {} ({} bytes)",
            query.question,
            self.address,
            dst.len()
        );
        Ok(dst.freeze())
    }
}

fn log_query(query: &DnsQuery, packet_size: usize) {
    let header = &query.header;
    let question = &query.question;

    debug!(
        target: "dns_server::packet_details",
        packet_id = header.id,
        packet_size,
        query_response = if header.qr { "Response" } else { "Query" },
        opcode = header.opcode,
        authoritative = header.aa,
        truncated = header.tc,
        recursion_desired = header.rd,
        recursion_available = header.ra,
        response_code = rcode_mnemonic(header.rcode).unwrap_or("UNKNOWN"),
        question_count = header.qdcount,
        answer_count = header.ancount,
        authority_count = header.nscount,
        additional_count = header.arcount,
        "DNS packet header parsed successfully"
    );

    // Unmapped codes are still answered; only the log line falls back to the number
    let qtype = match type_mnemonic(question.qtype) {
        Ok(name) => name.to_string(),
        Err(e) => {
            debug!("{}", e);
            question.qtype.to_string()
        }
    };
    let qclass = class_mnemonic(question.qclass)
        .map(str::to_string)
        .unwrap_or_else(|_| question.qclass.to_string());

    info!(
        query_name = ?question.name,
        qtype = %qtype,
        qclass = %qclass,
        "Query received"
    );
}

/// Fluent interface for turning a query into its response
pub struct ResponseBuilder<'a> {
    query: &'a DnsQuery,
    header: DnsPacketHeader,
}

impl<'a> ResponseBuilder<'a> {
    /// Start from the query's header: id, opcode and RD are echoed, QR is set,
    /// RA, TC and Z are clear and the rcode is NOERROR.
    pub fn new(query: &'a DnsQuery) -> Self {
        let header = DnsPacketHeader {
            id: query.header.id,
            qr: true,
            opcode: query.header.opcode,
            aa: false,
            tc: false,
            rd: query.header.rd,
            ra: false,
            z: 0,
            rcode: RCODE_NOERROR,
            qdcount: 1,
            ancount: 1,
            nscount: 0,
            arcount: 0,
        };
        Self { query, header }
    }

    /// Set authoritative flag
    pub fn with_authoritative(mut self, aa: bool) -> Self {
        self.header.aa = aa;
        self
    }

    /// Finish the response with its single answer.
    pub fn answer(self, record: ARecord) -> DnsResponse {
        let response = DnsResponse {
            header: self.header,
            question: self.query.question.clone(),
            answer: record,
        };
        tracing::trace!("DNS response built: {:?}", response.header);
        response
    }
}
