use bytes::Bytes;
use std::fmt;

/// Upper bound on the wire length of a domain name: length octets and
/// label octets together.
pub const DOMAINNAME_MAX_LEN: usize = 255;

/// Upper bound on the length of one label.  Longer length octets are
/// either compression pointers or invalid.
pub const LABEL_MAX_LEN: usize = 63;

// Masks and shifts for the packed flag octets of the header (octets 2
// and 3 of the wire encoding).
pub const HEADER_MASK_QR: u8 = 0b1000_0000;
pub const HEADER_MASK_OPCODE: u8 = 0b0111_1000;
pub const HEADER_OFFSET_OPCODE: usize = 3;
pub const HEADER_MASK_AA: u8 = 0b0000_0100;
pub const HEADER_MASK_TC: u8 = 0b0000_0010;
pub const HEADER_MASK_RD: u8 = 0b0000_0001;
pub const HEADER_MASK_RA: u8 = 0b1000_0000;
pub const HEADER_MASK_Z: u8 = 0b0111_0000;
pub const HEADER_OFFSET_Z: usize = 4;
pub const HEADER_MASK_RCODE: u8 = 0b0000_1111;
pub const HEADER_OFFSET_RCODE: usize = 0;

/// A DNS message, query or response.  See section 4.1 of RFC 1035.
///
/// Of the four sections the RFC defines, only the question and answer
/// sections are represented: this application never produces or
/// consumes authority or additional records, so deserialisation
/// leaves those sections in the buffer and serialisation always
/// writes zero counts for them.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
}

impl Message {
    /// Begin a response to this message: flip the QR bit, clear the
    /// flags and reserved bits this server never sets, and echo the
    /// questions.
    ///
    /// The rcode is carried over from the query header, which is how
    /// the unsupported-opcode rule applied during deserialisation
    /// makes it back to the client.
    pub fn make_response(&self) -> Self {
        Self {
            header: Header {
                id: self.header.id,
                is_response: true,
                opcode: self.header.opcode,
                is_authoritative: false,
                is_truncated: false,
                recursion_desired: self.header.recursion_desired,
                recursion_available: false,
                z: 0,
                rcode: self.header.rcode,
            },
            questions: self.questions.clone(),
            answers: Vec::new(),
        }
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for Message {
    // this should match the `Message` deserialisation, which forces
    // the rcode for unsupported opcodes
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut header = u.arbitrary::<Header>()?;
        if header.opcode != Opcode::Standard {
            header.rcode = Rcode::NotImplemented;
        }

        Ok(Self {
            header,
            questions: u.arbitrary()?,
            answers: u.arbitrary()?,
        })
    }
}

/// The parsed form of the fixed 12-octet header which starts every
/// message.  See section 4.1.1 of RFC 1035 for the packed layout;
/// `WireHeader` for the section counts, which are deliberately not
/// kept here.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Header {
    /// Chosen by the requester and echoed in the response, so replies
    /// can be matched to outstanding queries.
    pub id: u16,

    /// The QR bit: false for a query, true for a response.
    pub is_response: bool,

    /// What kind of query this is.  Set by the requester and copied
    /// into the response.
    pub opcode: Opcode,

    /// The AA bit: in a response, whether the responder is an
    /// authority for the name being asked about.
    pub is_authoritative: bool,

    /// The TC bit: whether the message was cut down to fit the
    /// transport.
    pub is_truncated: bool,

    /// The RD bit: set in a query to ask the responder to recurse,
    /// copied into the response.
    pub recursion_desired: bool,

    /// The RA bit: in a response, whether the responder is willing to
    /// recurse.
    pub recursion_available: bool,

    /// Reserved for future use.  "Must be zero in all queries and
    /// responses", says RFC 1035, but this field round-trips whatever
    /// a peer actually sent rather than assuming conformance.  Only
    /// the low three bits are meaningful.
    pub z: u8,

    /// The outcome of a query, from the responder's point of view:
    /// `NoError`, or one of the failure codes.
    pub rcode: Rcode,
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for Header {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self {
            id: u.arbitrary()?,
            is_response: u.arbitrary()?,
            opcode: u.arbitrary()?,
            is_authoritative: u.arbitrary()?,
            is_truncated: u.arbitrary()?,
            recursion_desired: u.arbitrary()?,
            recursion_available: u.arbitrary()?,
            // z is a 3-bit field
            z: u.arbitrary::<u8>()? & 0b0000_0111,
            rcode: u.arbitrary()?,
        })
    }
}

/// A `Header` as it appears on the network: the `Header` fields plus
/// the four section counts.  Keeping the counts out of the normal
/// `Header` means they cannot drift out of sync with the sections
/// themselves; this wrapper exists for serialisation and
/// deserialisation only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(any(feature = "test-util", test), derive(arbitrary::Arbitrary))]
pub struct WireHeader {
    pub header: Header,
    /// Number of entries in the question section.
    pub qdcount: u16,
    /// Number of records in the answer section.
    pub ancount: u16,
    /// Number of records in the authority section.
    pub nscount: u16,
    /// Number of records in the additional section.
    pub arcount: u16,
}

/// One entry of the question section.  See section 4.1.2 of RFC 1035.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(any(feature = "test-util", test), derive(arbitrary::Arbitrary))]
pub struct Question {
    /// The name being asked about.
    pub name: DomainName,

    /// The record type being asked for.
    pub qtype: RecordType,

    /// The class being asked in, practically always IN.
    pub qclass: RecordClass,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.name.to_dotted_string(),
            self.qclass,
            self.qtype
        )
    }
}

/// A single resource record, the format shared by the answer,
/// authority, and additional sections.  See section 4.1.3 of RFC
/// 1035.
///
/// The RDLENGTH field is not represented: it is derived from the
/// RDATA length at serialisation time, so a record cannot claim a
/// length other than the one it has.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ResourceRecord {
    /// The name this record pertains to.
    pub name: DomainName,

    /// What the RDATA means, not that this application cares.
    pub rtype: RecordType,

    /// The class of the record, practically always IN.
    pub rclass: RecordClass,

    /// How long, in seconds, the record may be cached for.  Zero
    /// means: use for the transaction in progress and then discard.
    pub ttl: u32,

    /// The payload, passed through entirely uninterpreted.
    pub rdata: Bytes,
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for ResourceRecord {
    // hand-rolled so the size of the rdata can be bounded, which an
    // `arbitrary`-generated `Bytes` would not be
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let len = u.int_in_range(0..=128)?;
        let rdata = Bytes::copy_from_slice(u.bytes(len)?);

        Ok(Self {
            name: u.arbitrary()?,
            rtype: u.arbitrary()?,
            rclass: u.arbitrary()?,
            ttl: u.arbitrary()?,
            rdata,
        })
    }
}

/// What sort of query this is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Opcode {
    Standard,
    Inverse,
    Status,
    Reserved(OpcodeReserved),
}

/// A struct with a private constructor, to ensure invalid `Opcode`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct OpcodeReserved(u8);

impl From<u8> for Opcode {
    fn from(octet: u8) -> Self {
        match octet & 0b0000_1111 {
            0 => Opcode::Standard,
            1 => Opcode::Inverse,
            2 => Opcode::Status,
            other => Opcode::Reserved(OpcodeReserved(other)),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self {
        match value {
            Opcode::Standard => 0,
            Opcode::Inverse => 1,
            Opcode::Status => 2,
            Opcode::Reserved(OpcodeReserved(octet)) => octet,
        }
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for Opcode {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u8>()?))
    }
}

/// What sort of response this is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rcode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(RcodeReserved),
}

/// A struct with a private constructor, to ensure invalid `Rcode`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RcodeReserved(u8);

impl From<u8> for Rcode {
    fn from(octet: u8) -> Self {
        match octet & 0b0000_1111 {
            0 => Rcode::NoError,
            1 => Rcode::FormatError,
            2 => Rcode::ServerFailure,
            3 => Rcode::NameError,
            4 => Rcode::NotImplemented,
            5 => Rcode::Refused,
            other => Rcode::Reserved(RcodeReserved(other)),
        }
    }
}

impl From<Rcode> for u8 {
    fn from(value: Rcode) -> Self {
        match value {
            Rcode::NoError => 0,
            Rcode::FormatError => 1,
            Rcode::ServerFailure => 2,
            Rcode::NameError => 3,
            Rcode::NotImplemented => 4,
            Rcode::Refused => 5,
            Rcode::Reserved(RcodeReserved(octet)) => octet,
        }
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for Rcode {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u8>()?))
    }
}

/// A domain name: a sequence of labels ending with the empty label of
/// the root.  Always held fully expanded; compression pointers exist
/// on the wire and nowhere else.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DomainName {
    pub labels: Vec<Label>,
    // INVARIANT: len == len(labels) + sum(map(len, labels))
    pub len: usize,
}

impl DomainName {
    pub fn root_domain() -> Self {
        DomainName {
            labels: vec![Label::new()],
            len: 1,
        }
    }

    pub fn is_root(&self) -> bool {
        // only the bare root label has a wire length of 1
        self.len == 1
    }

    /// Format the name the way a zone file would write it, with a
    /// trailing dot: `www.example.com.`, or `.` for the root.
    pub fn to_dotted_string(&self) -> String {
        if self.is_root() {
            return ".".to_string();
        }

        let mut out = String::with_capacity(self.len);
        for label in &self.labels {
            for octet in label.octets() {
                out.push(char::from(*octet));
            }
            if !label.is_empty() {
                out.push('.');
            }
        }

        out
    }

    /// Inverse of `to_dotted_string`: the trailing dot is required,
    /// and labels have no escaping, so a name containing a literal
    /// dot cannot be written this way.
    pub fn from_dotted_string(s: &str) -> Option<Self> {
        if s == "." {
            return Some(Self::root_domain());
        }

        let chunk_count = s.split('.').count();
        let mut labels = Vec::with_capacity(chunk_count);

        for (i, chunk) in s.split('.').enumerate() {
            if chunk.is_empty() && i != chunk_count - 1 {
                return None;
            }

            labels.push(Label::try_from(chunk.as_bytes()).ok()?);
        }

        Self::from_labels(labels)
    }

    /// Assemble a name from labels, which must be non-empty except
    /// for the last, which must be the empty root label.  Fails if
    /// that shape is off or the assembled name would be over 255
    /// octets on the wire.
    pub fn from_labels(labels: Vec<Label>) -> Option<Self> {
        let (root, rest) = labels.split_last()?;
        if !root.is_empty() || rest.iter().any(Label::is_empty) {
            return None;
        }

        let mut len = labels.len();
        for label in &labels {
            len += usize::from(label.len());
        }

        if len > DOMAINNAME_MAX_LEN {
            return None;
        }

        Some(Self { labels, len })
    }
}

impl fmt::Debug for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainName")
            .field("to_dotted_string()", &self.to_dotted_string())
            .finish()
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", &self.to_dotted_string())
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for DomainName {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let num_labels = u.int_in_range::<usize>(0..=10)?;
        let mut labels = Vec::new();
        for _ in 0..num_labels {
            labels.push(u.arbitrary()?);
        }
        labels.push(Label::new());
        Ok(DomainName::from_labels(labels).unwrap())
    }
}

/// A label is just a sequence of octets, at most 63 of them.  The
/// octets are kept exactly as they appear on the wire: no case
/// folding, no character set assumptions.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Label {
    /// Private to this module so constructing an invalid `Label` is
    /// impossible.
    octets: Bytes,
}

impl Label {
    /// Create a new, empty, label.
    pub fn new() -> Self {
        Self {
            octets: Bytes::new(),
        }
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn len(&self) -> u8 {
        // safe as the `TryFrom` ensures a label is <= 63 bytes
        self.octets.len().try_into().unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }

    pub fn octets(&self) -> &Bytes {
        &self.octets
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[u8]> for Label {
    type Error = LabelTryFromOctetsError;

    fn try_from(octets: &[u8]) -> Result<Self, Self::Error> {
        if octets.len() > LABEL_MAX_LEN {
            return Err(LabelTryFromOctetsError::TooLong);
        }

        Ok(Self {
            octets: Bytes::copy_from_slice(octets),
        })
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for Label {
    // only generates non-empty labels
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Label> {
        let label_len = u.int_in_range::<u8>(1..=20)?;
        Ok(Self {
            octets: Bytes::copy_from_slice(u.bytes(label_len.into())?),
        })
    }
}

/// Errors that can arise when converting a `[u8]` into a `Label`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LabelTryFromOctetsError {
    TooLong,
}

/// Record types are used by resource records and by queries.  These
/// are the types from RFC 1035; anything else round-trips through the
/// `Unknown` variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RecordType {
    A,
    NS,
    MD,
    MF,
    CNAME,
    SOA,
    MB,
    MG,
    MR,
    NULL,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    Unknown(RecordTypeUnknown),
}

/// A struct with a private constructor, to ensure invalid `RecordType`s
/// cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RecordTypeUnknown(u16);

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::NS => write!(f, "NS"),
            RecordType::MD => write!(f, "MD"),
            RecordType::MF => write!(f, "MF"),
            RecordType::CNAME => write!(f, "CNAME"),
            RecordType::SOA => write!(f, "SOA"),
            RecordType::MB => write!(f, "MB"),
            RecordType::MG => write!(f, "MG"),
            RecordType::MR => write!(f, "MR"),
            RecordType::NULL => write!(f, "NULL"),
            RecordType::WKS => write!(f, "WKS"),
            RecordType::PTR => write!(f, "PTR"),
            RecordType::HINFO => write!(f, "HINFO"),
            RecordType::MINFO => write!(f, "MINFO"),
            RecordType::MX => write!(f, "MX"),
            RecordType::TXT => write!(f, "TXT"),
            RecordType::Unknown(RecordTypeUnknown(n)) => write!(f, "TYPE{n}"),
        }
    }
}

impl From<u16> for RecordType {
    fn from(value: u16) -> Self {
        match value {
            1 => RecordType::A,
            2 => RecordType::NS,
            3 => RecordType::MD,
            4 => RecordType::MF,
            5 => RecordType::CNAME,
            6 => RecordType::SOA,
            7 => RecordType::MB,
            8 => RecordType::MG,
            9 => RecordType::MR,
            10 => RecordType::NULL,
            11 => RecordType::WKS,
            12 => RecordType::PTR,
            13 => RecordType::HINFO,
            14 => RecordType::MINFO,
            15 => RecordType::MX,
            16 => RecordType::TXT,
            _ => RecordType::Unknown(RecordTypeUnknown(value)),
        }
    }
}

impl From<RecordType> for u16 {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::MD => 3,
            RecordType::MF => 4,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::MB => 7,
            RecordType::MG => 8,
            RecordType::MR => 9,
            RecordType::NULL => 10,
            RecordType::WKS => 11,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MINFO => 14,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::Unknown(RecordTypeUnknown(value)) => value,
        }
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for RecordType {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u16>()?))
    }
}

/// Record classes are used by resource records and by queries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RecordClass {
    IN,
    Unknown(RecordClassUnknown),
}

/// A struct with a private constructor, to ensure invalid
/// `RecordClass`es cannot be created.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RecordClassUnknown(u16);

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordClass::IN => write!(f, "IN"),
            RecordClass::Unknown(RecordClassUnknown(n)) => write!(f, "CLASS{n}"),
        }
    }
}

impl From<u16> for RecordClass {
    fn from(value: u16) -> Self {
        match value {
            1 => RecordClass::IN,
            _ => RecordClass::Unknown(RecordClassUnknown(value)),
        }
    }
}

impl From<RecordClass> for u16 {
    fn from(value: RecordClass) -> Self {
        match value {
            RecordClass::IN => 1,
            RecordClass::Unknown(RecordClassUnknown(value)) => value,
        }
    }
}

#[cfg(any(feature = "test-util", test))]
impl<'a> arbitrary::Arbitrary<'a> for RecordClass {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from(u.arbitrary::<u16>()?))
    }
}

#[cfg(test)]
mod tests {
    use fake::Fake;

    use super::*;

    #[test]
    fn u8_opcode_roundtrip() {
        for i in 0..15 {
            assert_eq!(u8::from(Opcode::from(i)), i);
        }
    }

    #[test]
    fn u8_rcode_roundtrip() {
        for i in 0..15 {
            assert_eq!(u8::from(Rcode::from(i)), i);
        }
    }

    #[test]
    fn u16_recordtype_roundtrip() {
        for i in 0..100 {
            assert_eq!(u16::from(RecordType::from(i)), i);
        }
    }

    #[test]
    fn u16_recordclass_roundtrip() {
        for i in 0..100 {
            assert_eq!(u16::from(RecordClass::from(i)), i);
        }
    }

    #[test]
    fn domainname_root_conversions() {
        assert_eq!(
            Some(DomainName::root_domain()),
            DomainName::from_dotted_string(".")
        );

        assert_eq!(
            Some(DomainName::root_domain()),
            DomainName::from_labels(vec![Label::new()])
        );

        assert_eq!(".", DomainName::root_domain().to_dotted_string());
    }

    #[test]
    fn domainname_conversions() {
        for _ in 0..100 {
            let (dotted_string, labels) = arbitrary_name_parts();

            let from_string = DomainName::from_dotted_string(&dotted_string);
            let from_labels = DomainName::from_labels(labels);

            assert_eq!(
                Some(dotted_string.clone()),
                from_string.clone().map(|name| name.to_dotted_string())
            );
            assert_eq!(from_string, from_labels);
        }
    }

    #[test]
    fn from_dotted_string_needs_the_trailing_dot() {
        assert_eq!(None, DomainName::from_dotted_string("www.example.com"));
    }

    #[test]
    fn from_labels_rejects_interior_blanks() {
        let labels = vec![
            Label::try_from(&b"before"[..]).unwrap(),
            Label::new(),
            Label::try_from(&b"after"[..]).unwrap(),
            Label::new(),
        ];

        assert_eq!(None, DomainName::from_labels(labels));
    }

    #[test]
    fn label_try_from_too_long() {
        assert_eq!(
            Err(LabelTryFromOctetsError::TooLong),
            Label::try_from(&[0u8; 64][..])
        );
    }

    #[test]
    fn make_response_carries_rcode() {
        let query = Message {
            header: Header {
                id: 1234,
                is_response: false,
                opcode: Opcode::Inverse,
                is_authoritative: false,
                is_truncated: true,
                recursion_desired: true,
                recursion_available: true,
                z: 0b101,
                rcode: Rcode::NotImplemented,
            },
            questions: vec![Question {
                name: test_util::domain("www.example.com."),
                qtype: RecordType::A,
                qclass: RecordClass::IN,
            }],
            answers: Vec::new(),
        };

        let response = query.make_response();

        assert!(response.header.is_response);
        assert_eq!(response.header.id, query.header.id);
        assert_eq!(response.header.opcode, query.header.opcode);
        assert!(!response.header.is_authoritative);
        assert!(!response.header.is_truncated);
        assert!(response.header.recursion_desired);
        assert!(!response.header.recursion_available);
        assert_eq!(response.header.z, 0);
        assert_eq!(response.header.rcode, Rcode::NotImplemented);
        assert_eq!(response.questions, query.questions);
        assert!(response.answers.is_empty());
    }

    // a random name as both a dotted string and a label list, never
    // containing '.' inside a label
    fn arbitrary_name_parts() -> (String, Vec<Label>) {
        let mut dotted_string = String::new();
        let mut labels = Vec::new();

        for _ in 0..(1..5).fake::<usize>() {
            let label_len = (1..10).fake::<usize>();
            let mut octets = Vec::with_capacity(label_len);

            for _ in 0..label_len {
                let mut chr = (32..126).fake::<u8>();
                if chr == b'.' {
                    chr = b'X';
                }

                octets.push(chr);
                dotted_string.push(char::from(chr));
            }

            dotted_string.push('.');
            labels.push(Label::try_from(&octets[..]).unwrap());
        }

        labels.push(Label::new());

        (dotted_string, labels)
    }
}

#[cfg(any(feature = "test-util", test))]
#[allow(clippy::missing_panics_doc)]
pub mod test_util {
    use super::*;

    use std::net::Ipv4Addr;

    pub fn domain(name: &str) -> DomainName {
        DomainName::from_dotted_string(name).unwrap()
    }

    pub fn a_record(name: &str, address: Ipv4Addr) -> ResourceRecord {
        ResourceRecord {
            name: domain(name),
            rtype: RecordType::A,
            rclass: RecordClass::IN,
            ttl: 300,
            rdata: Bytes::copy_from_slice(&address.octets()),
        }
    }
}
