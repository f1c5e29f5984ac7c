use crate::error::EncoderError;
use bytes::{BufMut, BytesMut};
use ipnet::{IpNet, Ipv4Net};

/// Number of address octets carried on the wire for a prefix of `bit_len` bits.
pub const fn prefix_octets(bit_len: u8) -> usize {
    (bit_len as usize).div_ceil(8)
}

/// Encoding of a prefix in the IPv4 NLRI format of the UPDATE message.
///
/// ```text
/// +---------------------------+
/// |   Length (1 octet)        |
/// +---------------------------+
/// |   Prefix (variable)       |
/// +---------------------------+
/// ```
pub trait NlriPrefix {
    /// Appends the length octet and the leading `ceil(length / 8)` octets of the address,
    /// with the bits beyond the prefix length cleared.
    fn encode_nlri(&self, buf: &mut BytesMut) -> Result<(), EncoderError>;
}

impl NlriPrefix for Ipv4Net {
    fn encode_nlri(&self, buf: &mut BytesMut) -> Result<(), EncoderError> {
        let bit_len = self.prefix_len();
        buf.put_u8(bit_len);
        buf.put_slice(&self.network().octets()[..prefix_octets(bit_len)]);
        Ok(())
    }
}

impl NlriPrefix for IpNet {
    fn encode_nlri(&self, buf: &mut BytesMut) -> Result<(), EncoderError> {
        match self {
            IpNet::V4(prefix) => prefix.encode_nlri(buf),
            IpNet::V6(_) => Err(EncoderError::NotIpv4(*self)),
        }
    }
}
