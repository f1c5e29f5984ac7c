//! BGP error code module that maintains explicit error codes assigned by IANA.
//!
//! These types interpret the `code` of a [BgpNotificationMessage](super::BgpNotificationMessage);
//! the codec itself treats the code as an opaque 16-bit value.
//!
//! The full list of IANA error code assignments for BGP can be viewed at here:
//! <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-3>.
use log::warn;
use num_enum::{FromPrimitive, IntoPrimitive};

#[derive(Copy, Clone, Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq)]
#[repr(u8)]
pub enum BgpErrorCode {
    Reserved = 0,
    MessageHeaderError = 1,
    OpenError = 2,
    UpdateError = 3,
    HoldTimerExpired = 4,
    FiniteStateMachineError = 5,
    CeaseNotification = 6,
    RouteRefreshError = 7,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// BGP error code together with its interpreted subcode.
///
/// Subcodes are typed for the codes whose failures this codec can itself detect on the wire
/// (header, OPEN, UPDATE) and for Cease, which is what a session closes with. The others keep
/// the raw subcode.
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-4>
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpError {
    Reserved(u8),
    MessageHeaderError(MessageHeaderError),
    OpenError(OpenError),
    UpdateError(UpdateError),
    HoldTimerExpired(u8),
    FiniteStateMachineError(u8),
    CeaseNotification(CeaseNotification),
    RouteRefreshError(u8),
    Unknown(u8, u8),
}

impl BgpError {
    pub fn new(code: u8, subcode: u8) -> Self {
        match BgpErrorCode::from(code) {
            BgpErrorCode::Reserved => BgpError::Reserved(subcode),
            BgpErrorCode::MessageHeaderError => {
                BgpError::MessageHeaderError(MessageHeaderError::from(subcode))
            }
            BgpErrorCode::OpenError => BgpError::OpenError(OpenError::from(subcode)),
            BgpErrorCode::UpdateError => BgpError::UpdateError(UpdateError::from(subcode)),
            BgpErrorCode::HoldTimerExpired => BgpError::HoldTimerExpired(subcode),
            BgpErrorCode::FiniteStateMachineError => BgpError::FiniteStateMachineError(subcode),
            BgpErrorCode::CeaseNotification => {
                BgpError::CeaseNotification(CeaseNotification::from(subcode))
            }
            BgpErrorCode::RouteRefreshError => BgpError::RouteRefreshError(subcode),
            BgpErrorCode::Unknown(_) => {
                warn!(
                    "unassigned BGP notification error code: {}, subcode: {}",
                    code, subcode
                );
                BgpError::Unknown(code, subcode)
            }
        }
    }

    /// Returns the `(code, subcode)` pair to put on the wire.
    pub fn codes(&self) -> (u8, u8) {
        match *self {
            BgpError::Reserved(subcode) => (BgpErrorCode::Reserved.into(), subcode),
            BgpError::MessageHeaderError(e) => (BgpErrorCode::MessageHeaderError.into(), e.into()),
            BgpError::OpenError(e) => (BgpErrorCode::OpenError.into(), e.into()),
            BgpError::UpdateError(e) => (BgpErrorCode::UpdateError.into(), e.into()),
            BgpError::HoldTimerExpired(subcode) => {
                (BgpErrorCode::HoldTimerExpired.into(), subcode)
            }
            BgpError::FiniteStateMachineError(subcode) => {
                (BgpErrorCode::FiniteStateMachineError.into(), subcode)
            }
            BgpError::CeaseNotification(e) => (BgpErrorCode::CeaseNotification.into(), e.into()),
            BgpError::RouteRefreshError(subcode) => {
                (BgpErrorCode::RouteRefreshError.into(), subcode)
            }
            BgpError::Unknown(code, subcode) => (code, subcode),
        }
    }
}

impl From<BgpError> for super::BgpNotificationMessage {
    fn from(value: BgpError) -> Self {
        let (code, subcode) = value.codes();
        super::BgpNotificationMessage::new(code, subcode, vec![])
    }
}

/// Subcodes of code 1, for a bad marker, length or type in the fixed header.
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageHeaderError {
    UNSPECIFIC = 0,
    CONNECTION_NOT_SYNCHRONIZED = 1,
    BAD_MESSAGE_LENGTH = 2,
    BAD_MESSAGE_TYPE = 3,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Subcodes of code 2. Assignments 5 and 8 to 10 are deprecated and decode as `Unknown`.
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OpenError {
    UNSPECIFIC = 0,
    UNSUPPORTED_VERSION_NUMBER = 1,
    BAD_PEER_AS = 2,
    BAD_BGP_IDENTIFIER = 3,
    UNSUPPORTED_OPTIONAL_PARAMETER = 4,
    UNACCEPTABLE_HOLD_TIME = 6,
    UNSUPPORTED_CAPABILITY = 7,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Subcodes of code 3.
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum UpdateError {
    UNSPECIFIC = 0,
    MALFORMED_ATTRIBUTE_LIST = 1,
    UNRECOGNIZED_WELL_KNOWN_ATTRIBUTE = 2,
    MISSING_WELL_KNOWN_ATTRIBUTE = 3,
    ATTRIBUTE_FLAGS_ERROR = 4,
    ATTRIBUTE_LENGTH_ERROR = 5,
    INVALID_ORIGIN_ATTRIBUTE = 6,
    INVALID_NEXT_HOP_ATTRIBUTE = 8,
    OPTIONAL_ATTRIBUTE_ERROR = 9,
    INVALID_NETWORK_FIELD = 10,
    MALFORMED_AS_PATH = 11,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Subcodes of code 6 (RFC 4486).
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CeaseNotification {
    RESERVED = 0,
    MAXIMUM_NUMBER_OF_PREFIXES_REACHED = 1,
    ADMINISTRATIVE_SHUTDOWN = 2,
    PEER_DE_CONFIGURED = 3,
    ADMINISTRATIVE_RESET = 4,
    CONNECTION_REJECTED = 5,
    OTHER_CONFIGURATION_CHANGE = 6,
    CONNECTION_COLLISION_RESOLUTION = 7,
    OUT_OF_RESOURCES = 8,
    HARD_RESET = 9,
    #[num_enum(catch_all)]
    Unknown(u8),
}
