/*!
error module defines the error types used in bgpkit-codec.
*/
use ipnet::IpNet;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use thiserror::Error;

/// Errors produced while decoding a BGP message from the wire.
///
/// Every variant is terminal for the message being decoded: nothing is recovered and no bytes
/// past the failure point are interpreted.
#[derive(Debug, Error)]
pub enum ParserError {
    /// One of the two 8-byte marker fields is not all-1 bits.
    ///
    /// ## Occurs during:
    ///  - Parsing of a message header
    #[error("invalid BGP message marker")]
    InvalidMarker,
    /// The header length field is below the 19-byte minimum.
    ///
    /// ## Occurs during:
    ///  - Parsing of a message header
    #[error("invalid BGP message length {0}, must be at least 19 bytes")]
    InvalidLength(u16),
    #[error("unknown BGP message type {0}")]
    UnknownMessageType(u8),
    /// The message-specific decoder returned without consuming the whole body.
    #[error("wrong message length, {0} bytes left over")]
    TrailingGarbage(usize),
    /// A field, or a region announced by a length field, runs past the end of the available
    /// input.
    ///
    /// ## Occurs during:
    ///  - Reading any fixed-size field
    ///  - Reading a capability, attribute or prefix entry that is cut in the middle
    ///  - Reading a message body shorter than its header announces
    #[error("truncated {field}: needed {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        needed: usize,
        available: usize,
    },
    #[error("unsupported BGP version {0}, only version 4 is supported")]
    UnsupportedVersion(u8),
    #[error("unsupported BGP OPEN optional parameter type {0}, want capabilities (2)")]
    UnsupportedOption(u8),
    /// The OPEN optional parameter length does not frame exactly one capabilities parameter.
    #[error("invalid BGP OPEN option length {opt_len} for capability length {cap_len}")]
    InvalidOptionLength { opt_len: u8, cap_len: u8 },
    #[error("invalid ASN 0")]
    InvalidAsn,
    #[error("invalid hold time {0}, must be 0 or >=3")]
    InvalidHoldTime(u16),
    #[error("invalid prefix length {0}, must be between 0 and 32")]
    InvalidPrefixLength(u8),
    /// A prefix carries non-zero bits beyond its prefix length.
    ///
    /// The protocol calls those bits irrelevant, but accepting them would make decode followed
    /// by encode produce different bytes, so they are rejected.
    #[error("invalid CIDR prefix {addr}/{prefix_len}, address has non-zero masked bits")]
    NonZeroMaskedBits { addr: Ipv4Addr, prefix_len: u8 },
    /// A general IO error triggered by the underlying reader.
    ///
    /// ## Occurs during:
    ///  - Reading a message from a [std::io::Read] source
    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// Errors produced while serializing a message built in memory.
///
/// The same semantic checks applied on decode are enforced here, so an encode call either
/// produces a compliant message or no bytes at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncoderError {
    #[error("ASN must be non-zero")]
    InvalidAsn,
    #[error("invalid hold time {0:?}, must be zero or whole seconds in 3s..=65535s")]
    InvalidHoldTime(Duration),
    #[error("invalid router ID {0:?}, must be an IPv4 address")]
    InvalidRouterId(Option<IpAddr>),
    #[error("cannot encode non-IPv4 prefix {0}")]
    NotIpv4(IpNet),
    #[error("capability {code} payload is {len} bytes, at most 255 allowed")]
    CapabilityTooLong { code: u8, len: usize },
    #[error("capabilities take {0} bytes, at most 253 fit in the optional parameters")]
    OptionsTooLong(usize),
    #[error("attribute {code:#06x} payload is {len} bytes, too long for its length field")]
    AttributeTooLong { code: u16, len: usize },
    #[error("message would be {0} bytes, at most 65535 allowed")]
    MessageTooLarge(usize),
}
