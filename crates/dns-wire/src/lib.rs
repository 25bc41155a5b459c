//! An implementation of the DNS wire format from RFC 1035: message
//! types in `protocol::types`, with reading and writing split across
//! `protocol::deserialise` and `protocol::serialise`.

#![warn(clippy::pedantic)]
// Don't care enough to fix
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::similar_names)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::wildcard_imports)]

pub mod protocol;
