use num_enum::{FromPrimitive, IntoPrimitive};

/// AS_TRANS, the 2-octet ASN a 4-octet speaker puts in the OPEN "My Autonomous System" field
/// when its real ASN does not fit.
///
/// <https://datatracker.ietf.org/doc/html/rfc6793#section-9>
pub const AS_TRANS: u16 = 23456;

#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpCapabilityType {
    MULTIPROTOCOL_EXTENSIONS_FOR_BGP_4 = 1,
    ROUTE_REFRESH_CAPABILITY_FOR_BGP_4 = 2,
    OUTBOUND_ROUTE_FILTERING_CAPABILITY = 3,
    EXTENDED_NEXT_HOP_ENCODING = 5,
    BGP_EXTENDED_MESSAGE = 6,
    BGPSEC_CAPABILITY = 7,
    MULTIPLE_LABELS_CAPABILITY = 8,
    BGP_ROLE = 9,
    GRACEFUL_RESTART_CAPABILITY = 64,
    SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY = 65,
    SUPPORT_FOR_DYNAMIC_CAPABILITY = 67,
    MULTISESSION_BGP_CAPABILITY = 68,
    ADD_PATH_CAPABILITY = 69,
    ENHANCED_ROUTE_REFRESH_CAPABILITY = 70,
    LONG_LIVED_GRACEFUL_RESTART_CAPABILITY = 71,
    ROUTING_POLICY_DISTRIBUTION = 72,
    FQDN_CAPABILITY = 73,

    /// Catch-all type for any deprecated, unassigned, or reserved codes
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl BgpCapabilityType {
    pub const fn is_reserved(&self) -> bool {
        matches!(self, BgpCapabilityType::Unknown(0 | 255))
    }
}

/// BGP Capability, one TLV inside the OPEN capabilities parameter.
///
/// The payload is kept opaque; its length is implied by `value` and written as a single octet.
///
/// - RFC5492: <https://datatracker.ietf.org/doc/html/rfc5492>
/// - Capability codes: <https://www.iana.org/assignments/capability-codes/capability-codes.xhtml#capability-codes-2>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capability {
    pub code: u8,
    pub value: Vec<u8>,
}

impl Capability {
    pub fn new(code: u8, value: Vec<u8>) -> Self {
        Capability { code, value }
    }

    /// Builds the "Support for 4-octet AS number" capability (code 65) announcing `asn`.
    pub fn four_octet_asn(asn: u32) -> Self {
        Capability {
            code: BgpCapabilityType::SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY.into(),
            value: asn.to_be_bytes().to_vec(),
        }
    }

    pub fn capability_type(&self) -> BgpCapabilityType {
        BgpCapabilityType::from(self.code)
    }

    /// Returns the announced ASN if this is a well-formed 4-octet ASN capability.
    pub fn as_four_octet_asn(&self) -> Option<u32> {
        match self.capability_type() {
            BgpCapabilityType::SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY => {
                let octets: [u8; 4] = self.value.as_slice().try_into().ok()?;
                Some(u32::from_be_bytes(octets))
            }
            _ => None,
        }
    }
}
