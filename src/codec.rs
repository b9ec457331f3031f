//! DNS message codec for tokio_util
//!
//! Decodes a query datagram into its header and first question, and encodes
//! a single-answer response. Each datagram is expected to hold exactly one
//! message, so a successful decode consumes the whole buffer.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::errors::{DnsCodecError, FormatError};
use crate::parsers::{decode_header, decode_question};
use crate::protocol::{ARecord, DnsPacketHeader, DnsQuery, DnsQuestion, DnsResponse};
use crate::wire::{HEADER_LEN, MAX_LABEL_LEN};

#[derive(Debug, Default)]
pub struct DnsCodec;

impl DnsCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for DnsCodec {
    type Item = DnsQuery;
    type Error = DnsCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        // A datagram never grows, so a short one is malformed rather than partial
        let header = decode_header(src)?;
        if header.qdcount == 0 {
            return Err(FormatError::NoQuestion.into());
        }

        // Only the first question is read; extra questions and any
        // answer/authority/additional sections are dropped with the buffer.
        let (question, consumed) = decode_question(src, HEADER_LEN)?;
        debug!(
            "Decoded question {} from {} of {} bytes",
            question,
            consumed,
            src.len()
        );
        src.clear();

        Ok(Some(DnsQuery { header, question }))
    }
}

impl Encoder<DnsResponse> for DnsCodec {
    type Error = DnsCodecError;

    fn encode(&mut self, item: DnsResponse, dst: &mut BytesMut) -> Result<(), Self::Error> {
        debug!("DnsCodec::encode called for packet ID {}", item.header.id);

        // The body always holds one question and one answer
        let mut corrected_header = item.header;
        corrected_header.qdcount = 1;
        corrected_header.ancount = 1;
        corrected_header.nscount = 0;
        corrected_header.arcount = 0;

        self.encode_header(&corrected_header, dst);
        self.encode_question(&item.question, dst)?;
        self.encode_record(&item.answer, dst)?;

        Ok(())
    }
}

impl DnsCodec {
    /// Encode a DNS domain name using label format
    /// Domain names are encoded as a sequence of labels, each prefixed by its length,
    /// terminated by a null byte (0)
    pub fn encode_domain_name(
        &self,
        domain_name: &str,
        dst: &mut BytesMut,
    ) -> Result<(), DnsCodecError> {
        let labels: Vec<&str> = domain_name.split('.').collect();

        // sum of (1 byte length + label bytes) + 1 null terminator
        let total_space: usize = labels.iter().map(|label| 1 + label.len()).sum::<usize>() + 1;
        dst.reserve(total_space);

        for label in labels {
            if label.len() > MAX_LABEL_LEN {
                return Err(DnsCodecError::InvalidDomainName(format!(
                    "Label '{}' exceeds maximum length of {} bytes",
                    label, MAX_LABEL_LEN
                )));
            }

            // Skip empty labels (e.g., from trailing dots or the root name)
            if label.is_empty() {
                continue;
            }

            dst.put_u8(label.len() as u8);
            dst.put_slice(label.as_bytes());
        }

        dst.put_u8(0);

        Ok(())
    }

    /// Encode DNS packet header into the destination buffer
    pub fn encode_header(&self, header: &DnsPacketHeader, dst: &mut BytesMut) {
        dst.reserve(HEADER_LEN);

        dst.put_u16(header.id);
        dst.put_u16(header.flags());
        dst.put_u16(header.qdcount);
        dst.put_u16(header.ancount);
        dst.put_u16(header.nscount);
        dst.put_u16(header.arcount);
    }

    pub fn encode_question(
        &self,
        question: &DnsQuestion,
        dst: &mut BytesMut,
    ) -> Result<(), DnsCodecError> {
        self.encode_domain_name(&question.name, dst)?;
        dst.put_u16(question.qtype);
        dst.put_u16(question.qclass);
        Ok(())
    }

    /// Encode a resource record header followed by its IPv4 payload.
    ///
    /// Only fails when the record name cannot be expressed as labels, which
    /// never happens for names that came off the wire.
    pub fn encode_record(
        &self,
        record: &ARecord,
        dst: &mut BytesMut,
    ) -> Result<(), DnsCodecError> {
        let header = &record.header;

        self.encode_domain_name(&header.name, dst)?;
        dst.put_u16(header.rtype);
        dst.put_u16(header.rclass);
        dst.put_u32(header.ttl);
        dst.put_u16(header.rdlength);
        dst.put_slice(&record.address.octets());

        Ok(())
    }
}
