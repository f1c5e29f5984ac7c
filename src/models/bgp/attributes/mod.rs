//! BGP path attribute structs
mod origin;

pub use origin::*;

use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::Ipv4Addr;

bitflags! {
    /// The high-order bit (bit 0) of the Attribute Flags octet is the
    /// Optional bit.  It defines whether the attribute is optional (if
    /// set to 1) or well-known (if set to 0).
    ///
    /// The second high-order bit (bit 1) of the Attribute Flags octet
    /// is the Transitive bit.  It defines whether an optional
    /// attribute is transitive (if set to 1) or non-transitive (if set
    /// to 0).
    ///
    /// The third high-order bit (bit 2) of the Attribute Flags octet
    /// is the Partial bit.  It defines whether the information
    /// contained in the optional transitive attribute is partial (if
    /// set to 1) or complete (if set to 0).
    ///
    /// The fourth high-order bit (bit 3) of the Attribute Flags octet
    /// is the Extended Length bit.  It defines whether the Attribute
    /// Length is one octet (if set to 0) or two octets (if set to 1).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AttrFlags: u8 {
        const OPTIONAL   = 0b10000000;
        const TRANSITIVE = 0b01000000;
        const PARTIAL    = 0b00100000;
        const EXTENDED   = 0b00010000;
    }
}

/// Bit of the 16-bit attribute code selecting a two-octet length field.
///
/// This is [AttrFlags::EXTENDED] seen through the combined flags/type code.
pub const EXTENDED_LENGTH_BIT: u16 = 0x1000;

/// Attribute types.
///
/// The attribute types needed to build plain IPv4 unicast announcements, plus the other
/// commonly seen ones. To see the full list, check out IANA at:
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-2>
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AttrType {
    RESERVED = 0,
    ORIGIN = 1,
    AS_PATH = 2,
    NEXT_HOP = 3,
    MULTI_EXIT_DISCRIMINATOR = 4,
    LOCAL_PREFERENCE = 5,
    ATOMIC_AGGREGATE = 6,
    AGGREGATOR = 7,
    COMMUNITIES = 8,
    ORIGINATOR_ID = 9,
    CLUSTER_LIST = 10,
    MP_REACHABLE_NLRI = 14,
    MP_UNREACHABLE_NLRI = 15,
    EXTENDED_COMMUNITIES = 16,
    AS4_PATH = 17,
    AS4_AGGREGATOR = 18,
    LARGE_COMMUNITIES = 32,
    ONLY_TO_CUSTOMER = 35,
    /// Also covers 255, reserved for development by RFC 2042.
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// AS_PATH segment type for an ordered set of ASes.
const AS_SEQUENCE: u8 = 2;

/// A BGP path attribute as carried in an UPDATE message.
///
/// `code` is the 16-bit combination of the flags octet (high) and the type octet (low). Whether
/// the length is written as one or two octets is decided by [EXTENDED_LENGTH_BIT] alone, never
/// by the payload size. The payload is opaque to the codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub code: u16,
    pub value: Vec<u8>,
}

impl Attribute {
    pub fn new(code: u16, value: Vec<u8>) -> Self {
        Attribute { code, value }
    }

    pub fn from_parts(flags: AttrFlags, attr_type: AttrType, value: Vec<u8>) -> Self {
        Attribute {
            code: u16::from_be_bytes([flags.bits(), u8::from(attr_type)]),
            value,
        }
    }

    /// Flags octet. Unassigned low bits are kept as-is.
    pub const fn flags(&self) -> AttrFlags {
        AttrFlags::from_bits_retain((self.code >> 8) as u8)
    }

    pub fn attr_type(&self) -> AttrType {
        AttrType::from((self.code & 0xff) as u8)
    }

    pub const fn is_extended_length(&self) -> bool {
        self.code & EXTENDED_LENGTH_BIT != 0
    }

    /// Well-known mandatory ORIGIN attribute.
    pub fn origin(origin: Origin) -> Self {
        Self::from_parts(AttrFlags::TRANSITIVE, AttrType::ORIGIN, vec![origin.into()])
    }

    /// Well-known mandatory AS_PATH attribute holding a single AS_SEQUENCE segment.
    ///
    /// ASNs are written as 4 octets when `four_octet` is set (the peer announced the 4-octet
    /// ASN capability), otherwise as 2 octets, replacing larger values with
    /// [AS_TRANS](super::AS_TRANS).
    /// An empty slice produces an empty AS_PATH, as used for iBGP announcements.
    pub fn as_sequence(asns: &[u32], four_octet: bool) -> Self {
        let mut value = vec![];
        for chunk in asns.chunks(u8::MAX as usize) {
            value.push(AS_SEQUENCE);
            value.push(chunk.len() as u8);
            for asn in chunk {
                if four_octet {
                    value.extend_from_slice(&asn.to_be_bytes());
                } else {
                    let asn = u16::try_from(*asn).unwrap_or(super::AS_TRANS);
                    value.extend_from_slice(&asn.to_be_bytes());
                }
            }
        }
        let flags = match value.len() > u8::MAX as usize {
            true => AttrFlags::TRANSITIVE | AttrFlags::EXTENDED,
            false => AttrFlags::TRANSITIVE,
        };
        Self::from_parts(flags, AttrType::AS_PATH, value)
    }

    /// Well-known mandatory NEXT_HOP attribute.
    pub fn next_hop(next_hop: Ipv4Addr) -> Self {
        Self::from_parts(
            AttrFlags::TRANSITIVE,
            AttrType::NEXT_HOP,
            next_hop.octets().to_vec(),
        )
    }

    pub fn multi_exit_discriminator(med: u32) -> Self {
        Self::from_parts(
            AttrFlags::OPTIONAL,
            AttrType::MULTI_EXIT_DISCRIMINATOR,
            med.to_be_bytes().to_vec(),
        )
    }

    pub fn local_preference(local_pref: u32) -> Self {
        Self::from_parts(
            AttrFlags::TRANSITIVE,
            AttrType::LOCAL_PREFERENCE,
            local_pref.to_be_bytes().to_vec(),
        )
    }

    /// Optional transitive COMMUNITIES attribute. Switches to the extended length encoding
    /// once the payload does not fit one octet.
    pub fn communities(communities: &[u32]) -> Self {
        let value: Vec<u8> = communities.iter().flat_map(|c| c.to_be_bytes()).collect();
        let mut flags = AttrFlags::OPTIONAL | AttrFlags::TRANSITIVE;
        if value.len() > u8::MAX as usize {
            flags |= AttrFlags::EXTENDED;
        }
        Self::from_parts(flags, AttrType::COMMUNITIES, value)
    }
}
