//! Parsing DNS messages off the wire.  The `types` module describes
//! what the parsed structures mean.

use bytes::Bytes;

use crate::protocol::types::*;

impl Message {
    /// # Errors
    ///
    /// If the message cannot be parsed.
    pub fn from_octets(octets: &[u8]) -> Result<Self, Error> {
        Self::deserialise(&mut ConsumableBuffer::new(octets))
    }

    /// # Errors
    ///
    /// If the message cannot be parsed.
    pub fn deserialise(buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let wire_header = WireHeader::deserialise(buffer)?;
        let mut header = wire_header.header;

        // only standard queries are implemented: flag anything else
        // as it comes in, so the rcode survives into
        // `Message::make_response`
        if header.opcode != Opcode::Standard {
            header.rcode = Rcode::NotImplemented;
        }

        let mut questions = Vec::with_capacity(wire_header.qdcount.into());
        let mut answers = Vec::with_capacity(wire_header.ancount.into());

        for _ in 0..wire_header.qdcount {
            questions.push(Question::deserialise(header.id, buffer)?);
        }
        for _ in 0..wire_header.ancount {
            answers.push(ResourceRecord::deserialise(header.id, buffer)?);
        }

        // the authority and additional sections, and anything else
        // trailing, are left unparsed in the buffer

        Ok(Self {
            header,
            questions,
            answers,
        })
    }
}

impl WireHeader {
    /// # Errors
    ///
    /// If the header is too short.
    pub fn deserialise(buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let id = buffer.next_u16().ok_or(Error::CompletelyBusted)?;
        let flags1 = buffer.next_u8().ok_or(Error::HeaderTooShort(id))?;
        let flags2 = buffer.next_u8().ok_or(Error::HeaderTooShort(id))?;
        let qdcount = buffer.next_u16().ok_or(Error::HeaderTooShort(id))?;
        let ancount = buffer.next_u16().ok_or(Error::HeaderTooShort(id))?;
        let nscount = buffer.next_u16().ok_or(Error::HeaderTooShort(id))?;
        let arcount = buffer.next_u16().ok_or(Error::HeaderTooShort(id))?;

        Ok(Self {
            header: Header {
                id,
                is_response: flags1 & HEADER_MASK_QR != 0,
                opcode: Opcode::from((flags1 & HEADER_MASK_OPCODE) >> HEADER_OFFSET_OPCODE),
                is_authoritative: flags1 & HEADER_MASK_AA != 0,
                is_truncated: flags1 & HEADER_MASK_TC != 0,
                recursion_desired: flags1 & HEADER_MASK_RD != 0,
                recursion_available: flags2 & HEADER_MASK_RA != 0,
                z: (flags2 & HEADER_MASK_Z) >> HEADER_OFFSET_Z,
                rcode: Rcode::from((flags2 & HEADER_MASK_RCODE) >> HEADER_OFFSET_RCODE),
            },
            qdcount,
            ancount,
            nscount,
            arcount,
        })
    }
}

impl Question {
    /// # Errors
    ///
    /// If the question cannot be parsed.
    pub fn deserialise(id: u16, buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let name = DomainName::deserialise(id, buffer)?;
        let qtype = RecordType::from(buffer.next_u16().ok_or(Error::QuestionTooShort(id))?);
        let qclass = RecordClass::from(buffer.next_u16().ok_or(Error::QuestionTooShort(id))?);

        Ok(Self { name, qtype, qclass })
    }
}

impl ResourceRecord {
    /// # Errors
    ///
    /// If the record cannot be parsed.
    pub fn deserialise(id: u16, buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let name = DomainName::deserialise(id, buffer)?;
        let rtype = RecordType::from(buffer.next_u16().ok_or(Error::ResourceRecordTooShort(id))?);
        let rclass = RecordClass::from(buffer.next_u16().ok_or(Error::ResourceRecordTooShort(id))?);
        let ttl = buffer.next_u32().ok_or(Error::ResourceRecordTooShort(id))?;
        let rdlength = buffer.next_u16().ok_or(Error::ResourceRecordTooShort(id))?;

        // the RDATA is kept uninterpreted, so compression pointers
        // inside it (which RFC 1035 permits for some record types)
        // are not expanded
        let rdata = buffer
            .take(rdlength.into())
            .map(Bytes::copy_from_slice)
            .ok_or(Error::ResourceRecordTooShort(id))?;

        Ok(Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }
}

impl DomainName {
    /// # Errors
    ///
    /// If the domain cannot be parsed.
    #[allow(clippy::missing_panics_doc)]
    pub fn deserialise(id: u16, buffer: &mut ConsumableBuffer) -> Result<Self, Error> {
        let start = buffer.position;
        let mut labels = Vec::with_capacity(5);
        let mut len = 0;

        loop {
            let size = buffer.next_u8().ok_or(Error::DomainTooShort(id))?;

            // the high two bits of the length octet distinguish a
            // label (00) from a compression pointer (11); the other
            // two combinations are reserved
            if (size & 0b1100_0000) == 0b1100_0000 {
                let lo = buffer.next_u8().ok_or(Error::DomainTooShort(id))?;
                let target = usize::from(u16::from_be_bytes([size & 0b0011_1111, lo]));

                // RFC 1035 section 4.1.4: a pointer refers to a
                // *prior* occurrence of a name, so a target at or
                // past this name is malformed (and chasing it might
                // never terminate)
                if target >= start {
                    return Err(Error::DomainPointerInvalid(id));
                }

                // chasing a pointer re-parses the pointed-to name
                // every time it is referenced, trading speed for
                // simplicity
                let mut suffix = DomainName::deserialise(id, &mut buffer.at_offset(target))?;
                len += suffix.len;
                labels.append(&mut suffix.labels);
                break;
            }

            if usize::from(size) > LABEL_MAX_LEN {
                return Err(Error::DomainLabelInvalid(id));
            }

            len += 1;

            if size == 0 {
                labels.push(Label::new());
                break;
            }

            let os = buffer
                .take(usize::from(size))
                .ok_or(Error::DomainTooShort(id))?;
            // cannot fail, the length octet was checked against `LABEL_MAX_LEN`
            let label = Label::try_from(os).unwrap();
            len += usize::from(label.len());
            labels.push(label);

            if len > DOMAINNAME_MAX_LEN {
                break;
            }
        }

        if len > DOMAINNAME_MAX_LEN {
            return Err(Error::DomainTooLong(id));
        }

        Ok(DomainName { labels, len })
    }
}

/// Errors encountered when parsing a datagram.  The `u16` these carry
/// is the ID octets of the offending message, so a failure response
/// can still be addressed to the right query.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Error {
    /// The datagram ended inside the ID field.  With no ID there is
    /// no way to address a failure response, so none can be sent.
    CompletelyBusted,

    /// The header stopped after the ID but before the counts.
    HeaderTooShort(u16),

    /// A question ends with an incomplete field.
    QuestionTooShort(u16),

    /// A resource record ends with an incomplete field, or its
    /// RDLENGTH runs past the end of the datagram.
    ResourceRecordTooShort(u16),

    /// A domain is incomplete.
    DomainTooShort(u16),

    /// A domain came out longer than the 255 octets RFC 1035 allows.
    DomainTooLong(u16),

    /// A compression pointer aimed at itself or at later octets.
    DomainPointerInvalid(u16),

    /// A length octet from the reserved range: over 63, but not a
    /// pointer.
    DomainLabelInvalid(u16),
}

impl Error {
    pub fn id(self) -> Option<u16> {
        match self {
            Error::CompletelyBusted => None,
            Error::HeaderTooShort(id)
            | Error::QuestionTooShort(id)
            | Error::ResourceRecordTooShort(id)
            | Error::DomainTooShort(id)
            | Error::DomainTooLong(id)
            | Error::DomainPointerInvalid(id)
            | Error::DomainLabelInvalid(id) => Some(id),
        }
    }
}

/// A cursor over the undecoded octets.  Reads hand out subslices of
/// the original buffer rather than copies, and move the position
/// forward; a read past the end returns `None` and consumes nothing.
pub struct ConsumableBuffer<'a> {
    octets: &'a [u8],
    position: usize,
}

impl<'a> ConsumableBuffer<'a> {
    pub fn new(octets: &'a [u8]) -> Self {
        Self {
            octets,
            position: 0,
        }
    }

    pub fn next_u8(&mut self) -> Option<u8> {
        let octet = self.octets.get(self.position).copied()?;
        self.position += 1;
        Some(octet)
    }

    pub fn next_u16(&mut self) -> Option<u16> {
        let os = self.take(2)?;
        Some(u16::from_be_bytes([os[0], os[1]]))
    }

    pub fn next_u32(&mut self) -> Option<u32> {
        let os = self.take(4)?;
        Some(u32::from_be_bytes([os[0], os[1], os[2], os[3]]))
    }

    pub fn take(&mut self, size: usize) -> Option<&'a [u8]> {
        let end = self.position.checked_add(size)?;
        let slice = self.octets.get(self.position..end)?;
        self.position = end;
        Some(slice)
    }

    /// Another cursor over the same octets, starting wherever a
    /// compression pointer aims.  The original cursor is unaffected.
    pub fn at_offset(&self, position: usize) -> ConsumableBuffer<'a> {
        Self {
            octets: self.octets,
            position,
        }
    }
}
