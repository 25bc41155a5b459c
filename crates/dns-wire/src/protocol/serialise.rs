//! Writing DNS messages out in wire format.  The `types` module
//! describes the format itself.

use bytes::{BufMut, BytesMut};

use crate::protocol::types::*;

impl Message {
    /// # Errors
    ///
    /// If a section has more than `u16::MAX` entries, or a record's
    /// RDATA more than `u16::MAX` octets.
    pub fn to_octets(&self) -> Result<BytesMut, Error> {
        let mut buffer = WritableBuffer::default();
        self.serialise(&mut buffer)?;
        Ok(buffer.octets)
    }

    /// # Errors
    ///
    /// The same failure modes as `Message::to_octets`.
    pub fn serialise(&self, buffer: &mut WritableBuffer) -> Result<(), Error> {
        let wire_header = WireHeader {
            header: self.header,
            qdcount: usize_to_u16(self.questions.len())?,
            ancount: usize_to_u16(self.answers.len())?,
            nscount: 0,
            arcount: 0,
        };

        wire_header.serialise(buffer);

        for question in &self.questions {
            question.serialise(buffer);
        }
        for rr in &self.answers {
            rr.serialise(buffer)?;
        }

        Ok(())
    }
}

impl WireHeader {
    pub fn serialise(&self, buffer: &mut WritableBuffer) {
        self.header.serialise(buffer);
        buffer.write_u16(self.qdcount);
        buffer.write_u16(self.ancount);
        buffer.write_u16(self.nscount);
        buffer.write_u16(self.arcount);
    }
}

impl Header {
    pub fn serialise(&self, buffer: &mut WritableBuffer) {
        let octet1 = mask_if(self.is_response, HEADER_MASK_QR)
            | (HEADER_MASK_OPCODE & (u8::from(self.opcode) << HEADER_OFFSET_OPCODE))
            | mask_if(self.is_authoritative, HEADER_MASK_AA)
            | mask_if(self.is_truncated, HEADER_MASK_TC)
            | mask_if(self.recursion_desired, HEADER_MASK_RD);

        let octet2 = mask_if(self.recursion_available, HEADER_MASK_RA)
            | (HEADER_MASK_Z & (self.z << HEADER_OFFSET_Z))
            | (HEADER_MASK_RCODE & (u8::from(self.rcode) << HEADER_OFFSET_RCODE));

        buffer.write_u16(self.id);
        buffer.write_u8(octet1);
        buffer.write_u8(octet2);
    }
}

impl Question {
    pub fn serialise(&self, buffer: &mut WritableBuffer) {
        self.name.serialise(buffer);
        self.qtype.serialise(buffer);
        self.qclass.serialise(buffer);
    }
}

impl ResourceRecord {
    /// # Errors
    ///
    /// If the RDATA is too long.
    pub fn serialise(&self, buffer: &mut WritableBuffer) -> Result<(), Error> {
        self.name.serialise(buffer);
        self.rtype.serialise(buffer);
        self.rclass.serialise(buffer);
        buffer.write_u32(self.ttl);

        // the RDLENGTH is always the length of the RDATA held, so a
        // record cannot claim a length other than the one it has
        buffer.write_u16(usize_to_u16(self.rdata.len())?);
        buffer.write_octets(&self.rdata);

        Ok(())
    }
}

impl DomainName {
    /// Writes the name as a plain sequence of labels.  Compression
    /// pointers are understood when parsing, but never emitted.
    pub fn serialise(&self, buffer: &mut WritableBuffer) {
        for label in &self.labels {
            buffer.write_u8(label.len());
            buffer.write_octets(label.octets());
        }
    }
}

impl RecordType {
    pub fn serialise(self, buffer: &mut WritableBuffer) {
        buffer.write_u16(self.into());
    }
}

impl RecordClass {
    pub fn serialise(self, buffer: &mut WritableBuffer) {
        buffer.write_u16(self.into());
    }
}

/// Errors from writing a message out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Error {
    /// A section count or RDLENGTH too big for its 16 bit field.
    CounterTooLarge { counter: usize, bits: u32 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::CounterTooLarge { counter, bits } => {
                write!(f, "counter {counter} does not fit in {bits} bits")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Accumulates the serialised octets.  Starts at the usual datagram
/// size so most messages never reallocate.
pub struct WritableBuffer {
    pub octets: BytesMut,
}

impl Default for WritableBuffer {
    fn default() -> Self {
        Self {
            octets: BytesMut::with_capacity(512),
        }
    }
}

impl WritableBuffer {
    pub fn write_u8(&mut self, octet: u8) {
        self.octets.put_u8(octet);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.octets.put_u16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.octets.put_u32(value);
    }

    pub fn write_octets(&mut self, octets: &[u8]) {
        self.octets.put_slice(octets);
    }
}

/// The given mask when the flag is set, otherwise nothing.
fn mask_if(set: bool, mask: u8) -> u8 {
    if set {
        mask
    } else {
        0
    }
}

/// Check a counter fits in the 16 bits the wire format gives it.
fn usize_to_u16(counter: usize) -> Result<u16, Error> {
    u16::try_from(counter).map_err(|_| Error::CounterTooLarge {
        counter,
        bits: u16::BITS,
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::protocol::types::test_util::*;

    #[test]
    #[rustfmt::skip]
    fn test_serialises_all_header_fields() {
        let wire_header = WireHeader {
            header: Header {
                id: 1234,
                is_response: false,
                opcode: Opcode::from(15),
                is_authoritative: false,
                is_truncated: true,
                recursion_desired: false,
                recursion_available: true,
                z: 5,
                rcode: Rcode::from(12),
            },
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        };

        let mut buf = WritableBuffer::default();
        wire_header.serialise(&mut buf);

        assert_eq!(
            vec![
                0b0000_0100, 0b1101_0010, // ID: 1234
                0b0111_1010, // QR / OPCODE / AA / TC / RD
                0b1101_1100, // RA / Z / RCODE
                0b0000_0000, 0b0000_0000, // QDCOUNT
                0b0000_0000, 0b0000_0000, // ANCOUNT
                0b0000_0000, 0b0000_0000, // NSCOUNT
                0b0000_0000, 0b0000_0000, // ARCOUNT
            ],
            buf.octets,
        );
    }

    #[test]
    #[rustfmt::skip]
    fn test_no_name_compression() {
        let mut buf = WritableBuffer::default();
        buf.write_u8(1);
        buf.write_u8(2);
        buf.write_u8(3);
        buf.write_u8(4);
        domain("www.example.com.").serialise(&mut buf);
        domain("www.example.com.").serialise(&mut buf);

        assert_eq!(
            vec![
                1, 2, 3, 4,
                // domain 1
                3, 119, 119, 119, // "www"
                7, 101, 120, 97, 109, 112, 108, 101, // "example"
                3, 99, 111, 109, 0, // "com"
                // domain 2, written in full rather than as a pointer
                3, 119, 119, 119, // "www"
                7, 101, 120, 97, 109, 112, 108, 101, // "example"
                3, 99, 111, 109, 0, // "com"
            ],
            buf.octets,
        );
    }

    #[test]
    #[rustfmt::skip]
    fn test_sets_rdlength() {
        let mut buf = WritableBuffer::default();
        buf.write_u8(1);
        buf.write_u8(2);
        buf.write_u8(3);
        buf.write_u8(4);

        let rr = ResourceRecord {
            name: domain("example.com."),
            rtype: RecordType::A,
            rclass: RecordClass::IN,
            ttl: 0,
            rdata: Bytes::from_static(b"hello, world!"),
        };
        let _ = rr.serialise(&mut buf);

        assert_eq!(
            vec![
                1, 2, 3, 4,
                // NAME
                7, 101, 120, 97, 109, 112, 108, 101, // "example"
                3, 99, 111, 109, 0, // "com"
                // TYPE
                0b0000_0000, 0b0000_0001, // A
                // CLASS
                0b0000_0000, 0b0000_0001, // IN
                // TTL
                0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, // 0
                // RDLENGTH
                0b0000_0000, 0b0000_1101, // 13 octets
                // RDATA
                104, 101, 108, 108, 111, 44, 32, // "hello, "
                119, 111, 114, 108, 100, 33, // "world!"
            ],
            buf.octets,
        );
    }

    #[test]
    fn test_authority_and_additional_counts_are_zero() {
        let message = Message {
            header: Header {
                id: 100,
                is_response: true,
                opcode: Opcode::Standard,
                is_authoritative: false,
                is_truncated: false,
                recursion_desired: false,
                recursion_available: false,
                z: 0,
                rcode: Rcode::NoError,
            },
            questions: Vec::new(),
            answers: Vec::new(),
        };

        let octets = message.to_octets().unwrap();

        assert_eq!(12, octets.len());
        assert_eq!(&[0, 0, 0, 0], &octets[8..12]);
    }
}
