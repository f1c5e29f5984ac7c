use crate::error::{EncoderError, ParserError};
use crate::models::*;
use crate::parser::bgp::header::encode_with_header;
use crate::parser::ReadUtils;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use ipnet::{IpNet, Ipv4Net};
use std::net::Ipv4Addr;

/// Parse a list of IPv4 NLRI prefixes filling the whole of `input`.
///
/// Each entry is a length octet followed by the `ceil(length / 8)` leading octets of the
/// address. Bits past the prefix length must be zero.
pub fn parse_prefixes(input: &mut Bytes) -> Result<Vec<IpNet>, ParserError> {
    let mut prefixes = vec![];
    while let Some(bit_len) = input.try_read_u8().into_option("prefix length")? {
        if bit_len > 32 {
            return Err(ParserError::InvalidPrefixLength(bit_len));
        }
        let n_bytes = prefix_octets(bit_len);
        input.has_n_remaining(n_bytes, "prefix address")?;
        let mut octets = [0u8; 4];
        input.copy_to_slice(&mut octets[..n_bytes]);
        let addr = Ipv4Addr::from(octets);

        let prefix = Ipv4Net::new(addr, bit_len)
            .map_err(|_| ParserError::InvalidPrefixLength(bit_len))?;
        if prefix.network() != addr {
            return Err(ParserError::NonZeroMaskedBits {
                addr,
                prefix_len: bit_len,
            });
        }
        prefixes.push(IpNet::V4(prefix));
    }
    Ok(prefixes)
}

/// Parse a list of path attributes filling the whole of `input`.
///
/// The length field is two octets when the extended length bit of the code is set, one
/// octet otherwise.
pub fn parse_attributes(input: &mut Bytes) -> Result<Vec<Attribute>, ParserError> {
    let mut attributes = vec![];
    while let Some(code) = input.try_read_u16().into_option("attribute code")? {
        let len = match code & EXTENDED_LENGTH_BIT {
            0 => input.read_u8("attribute length")? as usize,
            _ => input.read_u16("attribute length")? as usize,
        };
        let value = input.read_n_bytes(len, "attribute value")?;
        attributes.push(Attribute { code, value });
    }
    Ok(attributes)
}

/// Parse the body of a BGP UPDATE message.
///
/// ```text
/// +-----------------------------------------------------+
/// |   Withdrawn Routes Length (2 octets)                |
/// +-----------------------------------------------------+
/// |   Withdrawn Routes (variable)                       |
/// +-----------------------------------------------------+
/// |   Total Path Attribute Length (2 octets)            |
/// +-----------------------------------------------------+
/// |   Path Attributes (variable)                        |
/// +-----------------------------------------------------+
/// |   Network Layer Reachability Information (variable) |
/// +-----------------------------------------------------+
/// ```
///
/// The announced prefixes take everything left in `input`.
pub fn parse_bgp_update_message(input: &mut Bytes) -> Result<BgpUpdateMessage, ParserError> {
    let withdrawn_len = input.read_u16("withdrawn routes length")? as usize;
    let mut withdrawn_region = input.read_region(withdrawn_len, "withdrawn routes")?;
    let withdrawn_prefixes = parse_prefixes(&mut withdrawn_region)?;

    let attributes_len = input.read_u16("path attributes length")? as usize;
    let mut attributes_region = input.read_region(attributes_len, "path attributes")?;
    let attributes = parse_attributes(&mut attributes_region)?;

    let announced_prefixes = parse_prefixes(input)?;

    Ok(BgpUpdateMessage {
        withdrawn_prefixes,
        attributes,
        announced_prefixes,
    })
}

/// Encode a prefix list, failing on the first non-IPv4 entry.
pub fn encode_prefixes(prefixes: &[IpNet]) -> Result<Bytes, EncoderError> {
    let mut buf = BytesMut::with_capacity(prefixes.len() * 5);
    for prefix in prefixes {
        prefix.encode_nlri(&mut buf)?;
    }
    Ok(buf.freeze())
}

impl Attribute {
    /// Append code, length and value. The length width follows [EXTENDED_LENGTH_BIT].
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), EncoderError> {
        let too_long = || EncoderError::AttributeTooLong {
            code: self.code,
            len: self.value.len(),
        };
        buf.put_u16(self.code);
        if self.is_extended_length() {
            buf.put_u16(u16::try_from(self.value.len()).map_err(|_| too_long())?);
        } else {
            buf.put_u8(u8::try_from(self.value.len()).map_err(|_| too_long())?);
        }
        buf.put_slice(&self.value);
        Ok(())
    }
}

/// Encode a path attribute list.
pub fn encode_attributes(attributes: &[Attribute]) -> Result<Bytes, EncoderError> {
    let mut buf = BytesMut::new();
    for attribute in attributes {
        attribute.encode(&mut buf)?;
    }
    Ok(buf.freeze())
}

/// Fits a section length into its 2-octet field.
fn section_len(bytes: &Bytes, body_len: usize) -> Result<u16, EncoderError> {
    u16::try_from(bytes.len()).map_err(|_| EncoderError::MessageTooLarge(body_len + 19))
}

impl BgpUpdateMessage {
    /// Encode the message, header included.
    pub fn encode(&self) -> Result<Bytes, EncoderError> {
        let withdrawn = encode_prefixes(&self.withdrawn_prefixes)?;
        let attributes = encode_attributes(&self.attributes)?;
        let announced = encode_prefixes(&self.announced_prefixes)?;

        let body_len = 4 + withdrawn.len() + attributes.len() + announced.len();
        let mut body = BytesMut::with_capacity(body_len);
        body.put_u16(section_len(&withdrawn, body_len)?);
        body.extend_from_slice(&withdrawn);
        body.put_u16(section_len(&attributes, body_len)?);
        body.extend_from_slice(&attributes);
        body.extend_from_slice(&announced);

        encode_with_header(BgpMessageType::UPDATE, &body)
    }
}
