//! BGP messages and relevant structs.

pub mod attributes;
pub mod capabilities;
pub mod error;

pub use attributes::*;
pub use capabilities::*;
pub use error::*;

use ipnet::IpNet;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::time::Duration;

/// Message type tag carried in the last octet of every message header.
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpMessageType {
    OPEN = 1,
    UPDATE = 2,
    NOTIFICATION = 3,
    KEEPALIVE = 4,
}

/// A decoded BGP message.
///
/// This is the return type of [crate::parse_bgp_message]. The wire header is not part of the
/// value: it is derived from the variant and the encoded body on [BgpMessage::encode].
// https://tools.ietf.org/html/rfc4271#section-4
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpMessage {
    Open(BgpOpenMessage),
    Update(BgpUpdateMessage),
    Notification(BgpNotificationMessage),
    KeepAlive(BgpKeepAliveMessage),
}

impl BgpMessage {
    pub const fn msg_type(&self) -> BgpMessageType {
        match self {
            BgpMessage::Open(_) => BgpMessageType::OPEN,
            BgpMessage::Update(_) => BgpMessageType::UPDATE,
            BgpMessage::Notification(_) => BgpMessageType::NOTIFICATION,
            BgpMessage::KeepAlive(_) => BgpMessageType::KEEPALIVE,
        }
    }
}

impl From<BgpOpenMessage> for BgpMessage {
    fn from(value: BgpOpenMessage) -> Self {
        BgpMessage::Open(value)
    }
}

impl From<BgpUpdateMessage> for BgpMessage {
    fn from(value: BgpUpdateMessage) -> Self {
        BgpMessage::Update(value)
    }
}

impl From<BgpNotificationMessage> for BgpMessage {
    fn from(value: BgpNotificationMessage) -> Self {
        BgpMessage::Notification(value)
    }
}

impl From<BgpKeepAliveMessage> for BgpMessage {
    fn from(value: BgpKeepAliveMessage) -> Self {
        BgpMessage::KeepAlive(value)
    }
}

fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per message, fields separated by `|`.
impl Display for BgpMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BgpMessage::Open(m) => write!(
                f,
                "OPEN|{}|{}|{}|{}",
                m.asn,
                m.hold_time.as_secs(),
                m.router_id.map(|ip| ip.to_string()).unwrap_or_default(),
                join(m.capabilities.iter().map(|c| c.code)),
            ),
            BgpMessage::Update(m) => write!(
                f,
                "UPDATE|{}|{}|{}",
                join(&m.withdrawn_prefixes),
                join(m.attributes.iter().map(|a| format!("{:#06x}", a.code))),
                join(&m.announced_prefixes),
            ),
            BgpMessage::Notification(m) => write!(
                f,
                "NOTIFICATION|{}|{}|{}",
                m.error_code(),
                m.error_subcode(),
                m.data.len()
            ),
            BgpMessage::KeepAlive(_) => write!(f, "KEEPALIVE"),
        }
    }
}

/// BGP Open Message
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///  +-+-+-+-+-+-+-+-+
///  |    Version    |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |     My Autonomous System      |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |           Hold Time           |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |                         BGP Identifier                        |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  | Opt Parm Len  | Parm Type = 2 |  Caps Length  |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |                                                               |
///  |                  Capabilities (variable)                      |
///  |                                                               |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The version is always 4 and the optional parameters always hold exactly one capabilities
/// parameter, so neither is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpOpenMessage {
    /// 2-octet "My Autonomous System" field; never 0.
    pub asn: u16,
    /// 0, or at least 3 seconds. Carried on the wire as whole seconds.
    pub hold_time: Duration,
    /// BGP identifier. Must be an IPv4 address to be encoded.
    pub router_id: Option<IpAddr>,
    /// Capabilities in wire order; duplicates are kept.
    pub capabilities: Vec<Capability>,
}

impl BgpOpenMessage {
    /// Returns the ASN announced in the first 4-octet ASN capability, if any.
    pub fn four_octet_asn(&self) -> Option<u32> {
        self.capabilities
            .iter()
            .find_map(Capability::as_four_octet_asn)
    }
}

/// BGP Update Message
///
/// Only IPv4 unicast routes outside of path attributes are represented here. Prefixes are
/// stored as [IpNet] so that in-memory values can be checked before encoding; decoded
/// prefixes are always [IpNet::V4] with host bits cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpUpdateMessage {
    pub withdrawn_prefixes: Vec<IpNet>,
    pub attributes: Vec<Attribute>,
    pub announced_prefixes: Vec<IpNet>,
}

/// BGP Notification Message
///
/// `code` packs the error code in its high octet and the error subcode in its low octet, the
/// same way they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpNotificationMessage {
    pub code: u16,
    pub data: Vec<u8>,
}

impl BgpNotificationMessage {
    pub fn new(error_code: u8, error_subcode: u8, data: Vec<u8>) -> Self {
        BgpNotificationMessage {
            code: u16::from_be_bytes([error_code, error_subcode]),
            data,
        }
    }

    pub const fn error_code(&self) -> u8 {
        (self.code >> 8) as u8
    }

    pub const fn error_subcode(&self) -> u8 {
        (self.code & 0xff) as u8
    }

    /// Interprets the code against the IANA error code registries.
    pub fn error(&self) -> BgpError {
        BgpError::new(self.error_code(), self.error_subcode())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpKeepAliveMessage {}
