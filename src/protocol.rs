// DNS message structures shared by the codec and the responder

use std::net::Ipv4Addr;

use crate::wire::{FLAG_AA, FLAG_QR, FLAG_RA, FLAG_RD, FLAG_TC, OPCODE_MASK, RCODE_MASK, Z_MASK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsPacketHeader {
    pub id: u16,      // Identifier, 16 bits
    pub qr: bool,     // Query or Response, 1 bit
    pub opcode: u8,   // Operation code, 4 bits
    pub aa: bool,     // Authoritative answer, 1 bit
    pub tc: bool,     // Truncated, 1 bit
    pub rd: bool,     // Recursion desired, 1 bit
    pub ra: bool,     // Recursion available, 1 bit
    pub z: u8,        // Reserved for future use, 3 bits
    pub rcode: u8,    // Response code, 4 bits
    pub qdcount: u16, // Number of questions, 16 bits
    pub ancount: u16, // Number of answers, 16 bits
    pub nscount: u16, // Number of authority records, 16 bits
    pub arcount: u16, // Number of additional records, 16 bits
}

impl DnsPacketHeader {
    /// Build a header from its id, raw flag word and the four section counts.
    pub fn from_wire(id: u16, flags: u16, counts: [u16; 4]) -> Self {
        let [qdcount, ancount, nscount, arcount] = counts;
        Self {
            id,
            qr: flags & FLAG_QR != 0,
            opcode: ((flags & OPCODE_MASK) >> 11) as u8,
            aa: flags & FLAG_AA != 0,
            tc: flags & FLAG_TC != 0,
            rd: flags & FLAG_RD != 0,
            ra: flags & FLAG_RA != 0,
            z: ((flags & Z_MASK) >> 4) as u8,
            rcode: (flags & RCODE_MASK) as u8,
            qdcount,
            ancount,
            nscount,
            arcount,
        }
    }

    /// Pack the flag fields back into the 16-bit word carried on the wire.
    pub fn flags(&self) -> u16 {
        let mut flags: u16 = 0;
        if self.qr {
            flags |= FLAG_QR;
        }
        flags |= ((self.opcode as u16) << 11) & OPCODE_MASK;
        if self.aa {
            flags |= FLAG_AA;
        }
        if self.tc {
            flags |= FLAG_TC;
        }
        if self.rd {
            flags |= FLAG_RD;
        }
        if self.ra {
            flags |= FLAG_RA;
        }
        flags |= ((self.z as u16) << 4) & Z_MASK;
        flags |= (self.rcode as u16) & RCODE_MASK;
        flags
    }
}

// Define the DNS question section structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String, // Domain name, represented as a sequence of "labels"
    pub qtype: u16, // Query type (e.g., A, AAAA, CNAME) https://www.rfc-editor.org/rfc/rfc1035#section-3.2.2
    pub qclass: u16, // Query class (e.g., IN for Internet) https://www.rfc-editor.org/rfc/rfc1035#section-3.2.4
}

impl std::fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.name, self.qtype, self.qclass)
    }
}

/// Prefix shared by every answer, authority and additional record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResourceRecordHeader {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,      // Time to live in seconds
    pub rdlength: u16, // Length of the resource data in bytes
}

/// An A record: the only answer this server ever produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecord {
    pub header: DnsResourceRecordHeader,
    pub address: Ipv4Addr,
}

impl ARecord {
    /// Type and class are taken as given so the answer can mirror whatever
    /// the question asked for; the payload is always four address bytes.
    pub fn new(name: String, rtype: u16, rclass: u16, ttl: u32, address: Ipv4Addr) -> Self {
        ARecord {
            header: DnsResourceRecordHeader {
                name,
                rtype,
                rclass,
                ttl,
                rdlength: 4,
            },
            address,
        }
    }
}

/// A decoded query: the header plus the first question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub header: DnsPacketHeader,
    pub question: DnsQuestion,
}

/// A response carrying one echoed question and one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub header: DnsPacketHeader,
    pub question: DnsQuestion,
    pub answer: ARecord,
}
