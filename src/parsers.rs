use nom::{
    self,
    bytes::complete::take,
    error::{Error, ErrorKind},
    number::complete::{be_u16, be_u8},
    IResult,
};

use crate::errors::FormatError;
use crate::protocol::{DnsPacketHeader, DnsQuestion};
use crate::wire::{HEADER_LEN, MAX_LABEL_LEN, MAX_NAME_LEN};

/// Root name (one zero byte) plus qtype and qclass.
const MIN_QUESTION_LEN: usize = 5;

pub fn parse_dns_packet_header(input: &[u8]) -> IResult<&[u8], DnsPacketHeader> {
    let (input, id) = be_u16(input)?;
    // qr(1) opcode(4) aa(1) tc(1) rd(1) ra(1) z(3) rcode(4)
    let (input, flags) = be_u16(input)?;
    let (input, qdcount) = be_u16(input)?;
    let (input, ancount) = be_u16(input)?;
    let (input, nscount) = be_u16(input)?;
    let (input, arcount) = be_u16(input)?;

    Ok((
        input,
        DnsPacketHeader::from_wire(id, flags, [qdcount, ancount, nscount, arcount]),
    ))
}

/// Parses an uncompressed domain name: length-prefixed labels up to the zero
/// terminator, joined with dots.
///
/// Failures carry the position of the offending length byte:
/// `Verify` for a pointer or an oversized label, `Char` for a non-ASCII label,
/// `Satisfy` for a label holding a dot or a control byte,
/// `TooLarge` (positioned at the start of the name) when the name runs past
/// 255 bytes on the wire.
fn parse_domain_name(input: &[u8]) -> IResult<&[u8], String> {
    let start = input;
    let mut remaining = input;
    let mut labels: Vec<String> = Vec::new();

    loop {
        let (i, length) = be_u8(remaining)?;
        match length as usize {
            0 => {
                remaining = i;
                break;
            }
            l if l <= MAX_LABEL_LEN => {
                let (i, label_bytes) = take(l)(i)?;
                if !label_bytes.is_ascii() {
                    return Err(nom::Err::Failure(Error::new(remaining, ErrorKind::Char)));
                }
                // a dot would split the label when the name is encoded again
                if label_bytes.iter().any(|b| *b == b'.' || b.is_ascii_control()) {
                    return Err(nom::Err::Failure(Error::new(remaining, ErrorKind::Satisfy)));
                }
                labels.push(String::from_utf8_lossy(label_bytes).into_owned());
                remaining = i;

                // +1 for the terminator still to come
                if start.len() - remaining.len() + 1 > MAX_NAME_LEN {
                    return Err(nom::Err::Failure(Error::new(start, ErrorKind::TooLarge)));
                }
            }
            _ => {
                return Err(nom::Err::Failure(Error::new(remaining, ErrorKind::Verify)));
            }
        }
    }

    Ok((remaining, labels.join(".")))
}

fn parse_dns_question(input: &[u8]) -> IResult<&[u8], DnsQuestion> {
    let (input, name) = parse_domain_name(input)?;
    let (input, qtype) = be_u16(input)?;
    let (input, qclass) = be_u16(input)?;

    Ok((
        input,
        DnsQuestion {
            name,
            qtype,
            qclass,
        },
    ))
}

/// Decode the fixed 12-byte header at the start of `buf`.
pub fn decode_header(buf: &[u8]) -> Result<DnsPacketHeader, FormatError> {
    if buf.len() < HEADER_LEN {
        return Err(FormatError::IncompleteHeader {
            available: buf.len(),
        });
    }

    parse_dns_packet_header(buf)
        .map(|(_, header)| header)
        .map_err(|_| FormatError::IncompleteHeader {
            available: buf.len(),
        })
}

/// Decode one question starting at `offset`.
///
/// Returns the question and the offset of the first byte after it. Anything
/// beyond that offset is left untouched.
pub fn decode_question(buf: &[u8], offset: usize) -> Result<(DnsQuestion, usize), FormatError> {
    let input = buf.get(offset..).unwrap_or_default();
    if input.len() < MIN_QUESTION_LEN {
        return Err(FormatError::IncompleteQuestion {
            offset,
            available: input.len(),
        });
    }

    match parse_dns_question(input) {
        Ok((rest, question)) => Ok((question, buf.len() - rest.len())),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(to_format_error(buf, offset, e))
        }
        Err(nom::Err::Incomplete(_)) => Err(FormatError::IncompleteQuestion {
            offset,
            available: input.len(),
        }),
    }
}

fn to_format_error(buf: &[u8], offset: usize, e: Error<&[u8]>) -> FormatError {
    let at = buf.len() - e.input.len();
    let byte = buf.get(at).copied().unwrap_or(0);

    match e.code {
        ErrorKind::Verify if byte & 0b1100_0000 == 0b1100_0000 => {
            FormatError::CompressedName { offset: at }
        }
        ErrorKind::Verify => FormatError::LabelTooLong {
            offset: at,
            length: byte,
        },
        ErrorKind::Char => FormatError::NonAsciiLabel { offset: at },
        ErrorKind::Satisfy => FormatError::InvalidLabel { offset: at },
        ErrorKind::TooLarge => FormatError::NameTooLong { offset },
        _ => FormatError::IncompleteQuestion {
            offset,
            available: buf.len() - offset,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_COM_QUESTION: [u8; 17] = [
        0x07, 0x65, 0x78, 0x61, 0x6d, 0x70, 0x6c, 0x65, // "example"
        0x03, 0x63, 0x6f, 0x6d, // "com"
        0x00, // terminator
        0x00, 0x01, // qtype A
        0x00, 0x01, // qclass IN
    ];

    fn query_bytes(question: &[u8]) -> Vec<u8> {
        let mut bytes = vec![
            0xAB, 0xCD, // id
            0x01, 0x00, // flags: RD
            0x00, 0x01, // qdcount
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        bytes.extend_from_slice(question);
        bytes
    }

    #[test]
    fn test_decode_header_fields() {
        let bytes = [
            0x12, 0x34, 0x81, 0x80, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04,
        ];
        let header = decode_header(&bytes).unwrap();

        assert_eq!(header.id, 0x1234);
        assert_eq!(header.flags(), 0x8180);
        assert!(header.qr);
        assert!(header.rd);
        assert!(header.ra);
        assert!(!header.aa);
        assert_eq!(header.qdcount, 1);
        assert_eq!(header.ancount, 2);
        assert_eq!(header.nscount, 3);
        assert_eq!(header.arcount, 4);
    }

    #[test]
    fn test_decode_header_too_short() {
        for len in 0..HEADER_LEN {
            let bytes = vec![0xFF; len];
            assert_eq!(
                decode_header(&bytes),
                Err(FormatError::IncompleteHeader { available: len })
            );
        }
    }

    #[test]
    fn test_decode_question_example_com() {
        let (question, next) = decode_question(&EXAMPLE_COM_QUESTION, 0).unwrap();

        assert_eq!(question.name, "example.com");
        assert_eq!(question.qtype, 1);
        assert_eq!(question.qclass, 1);
        assert_eq!(next, EXAMPLE_COM_QUESTION.len());
    }

    #[test]
    fn test_decode_question_after_header_ignores_trailing_bytes() {
        let mut bytes = query_bytes(&EXAMPLE_COM_QUESTION);
        // an OPT record in the additional section
        bytes.extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

        let (question, next) = decode_question(&bytes, HEADER_LEN).unwrap();
        assert_eq!(question.name, "example.com");
        assert_eq!(next, HEADER_LEN + EXAMPLE_COM_QUESTION.len());
    }

    #[test]
    fn test_decode_question_root_name() {
        let bytes = [0x00, 0x00, 0x02, 0x00, 0x01];
        let (question, next) = decode_question(&bytes, 0).unwrap();

        assert_eq!(question.name, "");
        assert_eq!(question.qtype, 2);
        assert_eq!(next, 5);
    }

    #[test]
    fn test_decode_question_missing() {
        let bytes = query_bytes(&[]);
        assert_eq!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::IncompleteQuestion {
                offset: HEADER_LEN,
                available: 0
            })
        );
    }

    #[test]
    fn test_decode_question_offset_past_end() {
        assert!(matches!(
            decode_question(&EXAMPLE_COM_QUESTION, 100),
            Err(FormatError::IncompleteQuestion { offset: 100, .. })
        ));
    }

    #[test]
    fn test_decode_question_truncated() {
        // drop qclass
        let bytes = query_bytes(&EXAMPLE_COM_QUESTION[..15]);
        assert!(matches!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::IncompleteQuestion { .. })
        ));

        // cut inside a label
        let bytes = query_bytes(&EXAMPLE_COM_QUESTION[..6]);
        assert!(matches!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::IncompleteQuestion { .. })
        ));

        // no terminator at all
        let bytes = query_bytes(&EXAMPLE_COM_QUESTION[..12]);
        assert!(matches!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::IncompleteQuestion { .. })
        ));
    }

    #[test]
    fn test_decode_question_rejects_pointer() {
        // "www" then a pointer back to offset 12
        let bytes = query_bytes(&[0x03, b'w', b'w', b'w', 0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
        assert_eq!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::CompressedName {
                offset: HEADER_LEN + 4
            })
        );
    }

    #[test]
    fn test_decode_question_rejects_long_label() {
        let mut question = vec![64u8];
        question.extend(std::iter::repeat(b'a').take(64));
        question.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x01]);
        let bytes = query_bytes(&question);

        assert_eq!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::LabelTooLong {
                offset: HEADER_LEN,
                length: 64
            })
        );
    }

    #[test]
    fn test_decode_question_rejects_non_ascii() {
        let bytes = query_bytes(&[0x02, 0xC3, 0xA9, 0x00, 0x00, 0x01, 0x00, 0x01]);
        assert_eq!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::NonAsciiLabel { offset: HEADER_LEN })
        );
    }

    #[test]
    fn test_decode_question_rejects_dot_inside_label() {
        // one label "a.b", which no dotted name can reproduce
        let bytes = query_bytes(&[0x03, b'a', b'.', b'b', 0x00, 0x00, 0x01, 0x00, 0x01]);
        assert_eq!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::InvalidLabel { offset: HEADER_LEN })
        );
    }

    #[test]
    fn test_decode_question_rejects_control_bytes() {
        for control in [0x00, 0x0A, 0x1B, 0x7F] {
            let bytes = query_bytes(&[
                0x01, b'w', 0x03, b'w', control, b'x', 0x00, 0x00, 0x01, 0x00, 0x01,
            ]);
            assert_eq!(
                decode_question(&bytes, HEADER_LEN),
                Err(FormatError::InvalidLabel {
                    offset: HEADER_LEN + 2
                }),
                "control byte {:#04x}",
                control
            );
        }
    }

    #[test]
    fn test_decode_question_accepts_service_labels() {
        let bytes = query_bytes(&[
            0x04, b'_', b's', b'i', b'p', 0x01, b'*', 0x03, b'a', b'-', b'b', 0x00, 0x00, 0x21,
            0x00, 0x01,
        ]);
        let (question, _) = decode_question(&bytes, HEADER_LEN).unwrap();
        assert_eq!(question.name, "_sip.*.a-b");
    }

    #[test]
    fn test_decode_question_rejects_oversized_name() {
        // five 63-byte labels take 320 bytes on the wire
        let mut question = Vec::new();
        for _ in 0..5 {
            question.push(63u8);
            question.extend(std::iter::repeat(b'x').take(63));
        }
        question.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x01]);
        let bytes = query_bytes(&question);

        assert_eq!(
            decode_question(&bytes, HEADER_LEN),
            Err(FormatError::NameTooLong { offset: HEADER_LEN })
        );
    }

    #[test]
    fn test_decode_question_accepts_name_at_limit() {
        // 3 * 64 + 62 + 1 = 255 bytes on the wire
        let mut question = Vec::new();
        for _ in 0..3 {
            question.push(63u8);
            question.extend(std::iter::repeat(b'x').take(63));
        }
        question.push(61u8);
        question.extend(std::iter::repeat(b'y').take(61));
        question.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x01]);

        let (decoded, _) = decode_question(&question, 0).unwrap();
        assert_eq!(decoded.name.len(), 3 * 64 + 61);
    }
}
