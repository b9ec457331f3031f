//! Numeric constants from RFC 1035 and their mnemonics.
//!
//! The mnemonic lookups exist for diagnostics only; nothing in the protocol
//! path depends on them.

use crate::errors::LookupError;

// Record types, valid in both resource records and questions
pub const DNS_TYPE_A: u16 = 1;
pub const DNS_TYPE_NS: u16 = 2;
pub const DNS_TYPE_MD: u16 = 3;
pub const DNS_TYPE_MF: u16 = 4;
pub const DNS_TYPE_CNAME: u16 = 5;
pub const DNS_TYPE_SOA: u16 = 6;
pub const DNS_TYPE_MB: u16 = 7;
pub const DNS_TYPE_MG: u16 = 8;
pub const DNS_TYPE_MR: u16 = 9;
pub const DNS_TYPE_NULL: u16 = 10;
pub const DNS_TYPE_WKS: u16 = 11;
pub const DNS_TYPE_PTR: u16 = 12;
pub const DNS_TYPE_HINFO: u16 = 13;
pub const DNS_TYPE_MINFO: u16 = 14;
pub const DNS_TYPE_MX: u16 = 15;
pub const DNS_TYPE_TXT: u16 = 16;
pub const DNS_TYPE_AAAA: u16 = 28;
pub const DNS_TYPE_SRV: u16 = 33;

// Question-only types
pub const DNS_TYPE_AXFR: u16 = 252;
pub const DNS_TYPE_MAILB: u16 = 253;
pub const DNS_TYPE_MAILA: u16 = 254;
pub const DNS_TYPE_ALL: u16 = 255;

// Classes
pub const DNS_CLASS_IN: u16 = 1;
pub const DNS_CLASS_CS: u16 = 2;
pub const DNS_CLASS_CH: u16 = 3;
pub const DNS_CLASS_HS: u16 = 4;
pub const DNS_CLASS_ANY: u16 = 255;

// Response codes
pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_NOTIMP: u8 = 4;
pub const RCODE_REFUSED: u8 = 5;

// Header flag masks
pub const FLAG_QR: u16 = 0x8000;
pub const FLAG_AA: u16 = 0x0400;
pub const FLAG_TC: u16 = 0x0200;
pub const FLAG_RD: u16 = 0x0100;
pub const FLAG_RA: u16 = 0x0080;
pub const OPCODE_MASK: u16 = 0x7800;
pub const Z_MASK: u16 = 0x0070;
pub const RCODE_MASK: u16 = 0x000F;

pub const HEADER_LEN: usize = 12;
pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// Mnemonic for a record type code, e.g. `1 -> "A"`.
pub fn type_mnemonic(code: u16) -> Result<&'static str, LookupError> {
    let name = match code {
        DNS_TYPE_A => "A",
        DNS_TYPE_NS => "NS",
        DNS_TYPE_MD => "MD",
        DNS_TYPE_MF => "MF",
        DNS_TYPE_CNAME => "CNAME",
        DNS_TYPE_SOA => "SOA",
        DNS_TYPE_MB => "MB",
        DNS_TYPE_MG => "MG",
        DNS_TYPE_MR => "MR",
        DNS_TYPE_NULL => "NULL",
        DNS_TYPE_WKS => "WKS",
        DNS_TYPE_PTR => "PTR",
        DNS_TYPE_HINFO => "HINFO",
        DNS_TYPE_MINFO => "MINFO",
        DNS_TYPE_MX => "MX",
        DNS_TYPE_TXT => "TXT",
        DNS_TYPE_AAAA => "AAAA",
        DNS_TYPE_SRV => "SRV",
        DNS_TYPE_AXFR => "AXFR",
        DNS_TYPE_MAILB => "MAILB",
        DNS_TYPE_MAILA => "MAILA",
        DNS_TYPE_ALL => "ALL",
        other => return Err(LookupError::UnknownType(other)),
    };
    Ok(name)
}

/// Mnemonic for a class code, e.g. `1 -> "IN"`.
pub fn class_mnemonic(code: u16) -> Result<&'static str, LookupError> {
    let name = match code {
        DNS_CLASS_IN => "IN",
        DNS_CLASS_CS => "CS",
        DNS_CLASS_CH => "CH",
        DNS_CLASS_HS => "HS",
        DNS_CLASS_ANY => "ANY",
        other => return Err(LookupError::UnknownClass(other)),
    };
    Ok(name)
}

pub fn rcode_mnemonic(rcode: u8) -> Result<&'static str, LookupError> {
    let name = match rcode {
        RCODE_NOERROR => "NOERROR",
        RCODE_FORMERR => "FORMERR",
        RCODE_SERVFAIL => "SERVFAIL",
        RCODE_NXDOMAIN => "NXDOMAIN",
        RCODE_NOTIMP => "NOTIMP",
        RCODE_REFUSED => "REFUSED",
        other => return Err(LookupError::UnknownRcode(other)),
    };
    Ok(name)
}
