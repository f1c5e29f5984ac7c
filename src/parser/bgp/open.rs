use crate::error::{EncoderError, ParserError};
use crate::models::*;
use crate::parser::bgp::header::encode_with_header;
use crate::parser::ReadUtils;
use bytes::{BufMut, Bytes, BytesMut};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// The only protocol version this codec speaks.
pub const BGP_VERSION: u8 = 4;

/// Optional parameter type carrying capabilities (RFC 5492).
pub const OPT_PARAM_CAPABILITIES: u8 = 2;

/// Size of the OPEN body before the capability block, from Version through CapLen.
const OPEN_FIXED_LEN: usize = 12;

/// Validate a hold time as read from the wire: zero disables keepalives, otherwise at least
/// three seconds are required.
fn validate_hold_time(hold_time: u16) -> bool {
    hold_time == 0 || hold_time >= 3
}

/// Parse the body of a BGP OPEN message.
///
/// The optional parameters must consist of exactly one capabilities parameter:
/// `OptLen` has to be `CapLen + 2`, and the capability list must fill `CapLen` exactly.
pub fn parse_bgp_open_message(input: &mut Bytes) -> Result<BgpOpenMessage, ParserError> {
    let version = input.read_u8("open version")?;
    if version != BGP_VERSION {
        return Err(ParserError::UnsupportedVersion(version));
    }
    let asn = input.read_u16("open asn")?;
    let hold_time = input.read_u16("open hold time")?;
    let router_id = input.read_ipv4_address("open router id")?;
    let opt_len = input.read_u8("open optional parameters length")?;
    let opt_type = input.read_u8("open optional parameter type")?;
    if opt_type != OPT_PARAM_CAPABILITIES {
        return Err(ParserError::UnsupportedOption(opt_type));
    }
    let cap_len = input.read_u8("open capabilities length")?;
    if opt_len as usize != cap_len as usize + 2 {
        return Err(ParserError::InvalidOptionLength { opt_len, cap_len });
    }

    if asn == 0 {
        return Err(ParserError::InvalidAsn);
    }
    if !validate_hold_time(hold_time) {
        return Err(ParserError::InvalidHoldTime(hold_time));
    }

    let mut cap_region = input.read_region(cap_len as usize, "open capabilities")?;
    let capabilities = parse_capabilities(&mut cap_region)?;

    Ok(BgpOpenMessage {
        asn,
        hold_time: Duration::from_secs(hold_time as u64),
        router_id: Some(IpAddr::V4(router_id)),
        capabilities,
    })
}

/// Parse capability TLVs until the region is used up.
fn parse_capabilities(input: &mut Bytes) -> Result<Vec<Capability>, ParserError> {
    let mut capabilities = vec![];
    while let Some(code) = input.try_read_u8().into_option("capability code")? {
        let len = input.read_u8("capability length")?;
        let value = input.read_n_bytes(len as usize, "capability value")?;
        capabilities.push(Capability { code, value });
    }
    Ok(capabilities)
}

impl BgpOpenMessage {
    fn checked_router_id(&self) -> Result<Ipv4Addr, EncoderError> {
        match self.router_id {
            Some(IpAddr::V4(addr)) => Ok(addr),
            other => Err(EncoderError::InvalidRouterId(other)),
        }
    }

    fn checked_hold_time(&self) -> Result<u16, EncoderError> {
        let invalid = EncoderError::InvalidHoldTime(self.hold_time);
        if self.hold_time.subsec_nanos() != 0 {
            return Err(invalid);
        }
        match u16::try_from(self.hold_time.as_secs()) {
            Ok(secs) if validate_hold_time(secs) => Ok(secs),
            _ => Err(invalid),
        }
    }

    /// Encode the message, header included.
    ///
    /// All fields are validated before anything is written.
    pub fn encode(&self) -> Result<Bytes, EncoderError> {
        if self.asn == 0 {
            return Err(EncoderError::InvalidAsn);
        }
        let hold_time = self.checked_hold_time()?;
        let router_id = self.checked_router_id()?;

        let mut caps = BytesMut::new();
        for cap in &self.capabilities {
            let len = u8::try_from(cap.value.len()).map_err(|_| EncoderError::CapabilityTooLong {
                code: cap.code,
                len: cap.value.len(),
            })?;
            caps.put_u8(cap.code);
            caps.put_u8(len);
            caps.put_slice(&cap.value);
        }
        // OptLen covers OptType, CapLen and the capabilities and must fit one octet
        let cap_len = match u8::try_from(caps.len()) {
            Ok(len) if len <= u8::MAX - 2 => len,
            _ => return Err(EncoderError::OptionsTooLong(caps.len())),
        };

        let mut body = BytesMut::with_capacity(OPEN_FIXED_LEN + caps.len());
        body.put_u8(BGP_VERSION);
        body.put_u16(self.asn);
        body.put_u16(hold_time);
        body.put_u32(router_id.into());
        body.put_u8(cap_len + 2);
        body.put_u8(OPT_PARAM_CAPABILITIES);
        body.put_u8(cap_len);
        body.extend_from_slice(&caps);

        encode_with_header(BgpMessageType::OPEN, &body)
    }
}
