/// Malformed inbound datagrams. These only ever abort the datagram they came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Incomplete header: need at least 12 bytes, have {available}")]
    IncompleteHeader { available: usize },

    #[error("Incomplete question at offset {offset}: only {available} bytes follow")]
    IncompleteQuestion { offset: usize, available: usize },

    #[error("Query declares no questions")]
    NoQuestion,

    #[error("Compressed name pointer at offset {offset} is not supported")]
    CompressedName { offset: usize },

    #[error("Label length {length} at offset {offset} exceeds 63 bytes")]
    LabelTooLong { offset: usize, length: u8 },

    #[error("Label at offset {offset} contains non-ASCII bytes")]
    NonAsciiLabel { offset: usize },

    #[error("Label at offset {offset} contains a dot or a control byte")]
    InvalidLabel { offset: usize },

    #[error("Domain name starting at offset {offset} exceeds 255 bytes")]
    NameTooLong { offset: usize },
}

/// A mnemonic was requested for a code the wire tables do not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Unknown record type code {0}")]
    UnknownType(u16),

    #[error("Unknown class code {0}")]
    UnknownClass(u16),

    #[error("Unknown response code {0}")]
    UnknownRcode(u8),
}

/// Errors that can occur during DNS packet codec operations
#[derive(Debug, thiserror::Error)]
pub enum DnsCodecError {
    #[error("Malformed DNS packet: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
