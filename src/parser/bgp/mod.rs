/*!
Provides decoding and encoding of BGP messages.
*/
pub mod header;
pub mod messages;
pub mod open;
pub mod update;

pub use header::{parse_bgp_header, BgpHeader, BGP_HEADER_LEN, BGP_MARKER};
pub use messages::{parse_bgp_message, parse_bgp_notification_message};
pub use open::parse_bgp_open_message;
pub use update::{
    encode_attributes, encode_prefixes, parse_attributes, parse_bgp_update_message,
    parse_prefixes,
};
