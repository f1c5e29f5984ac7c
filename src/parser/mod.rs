/*!
Provides decoding of BGP messages from byte buffers and blocking readers.
*/
pub mod bgp;
pub mod iters;
pub mod utils;

pub use self::utils::*;

pub use crate::error::{EncoderError, ParserError};
pub use bgp::{parse_bgp_header, parse_bgp_message, BgpHeader};
pub use iters::{parse_bgp_message_from_reader, read_bgp_message, BgpMessageIterator};
