use crate::error::{EncoderError, ParserError};
use crate::models::BgpMessageType;
use crate::parser::ReadUtils;
use bytes::{BufMut, Bytes, BytesMut};

/// Size of the fixed message header: two 8-octet markers, 2-octet length and 1-octet type.
pub const BGP_HEADER_LEN: usize = 19;

/// Value each of the two 8-octet marker fields must hold.
pub const BGP_MARKER: u64 = u64::MAX;

/// BGP message header
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `length` counts the whole message, header included. The type is kept raw so that framing
/// can be checked before the type is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BgpHeader {
    pub length: u16,
    pub msg_type: u8,
}

impl BgpHeader {
    /// Builds the header of a message whose body is `body_len` bytes long.
    pub fn new(body_len: usize, msg_type: BgpMessageType) -> Result<BgpHeader, EncoderError> {
        let total = BGP_HEADER_LEN + body_len;
        let length = u16::try_from(total).map_err(|_| EncoderError::MessageTooLarge(total))?;
        Ok(BgpHeader {
            length,
            msg_type: msg_type.into(),
        })
    }

    /// Length of the body following the header. Only meaningful on a validated header.
    pub const fn body_len(&self) -> usize {
        (self.length as usize).saturating_sub(BGP_HEADER_LEN)
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u64(BGP_MARKER);
        buf.put_u64(BGP_MARKER);
        buf.put_u16(self.length);
        buf.put_u8(self.msg_type);
    }
}

/// Parse the 19-byte message header and validate its markers and length.
///
/// Nothing is consumed unless at least 19 bytes are available.
pub fn parse_bgp_header<T: ReadUtils>(input: &mut T) -> Result<BgpHeader, ParserError> {
    input.has_n_remaining(BGP_HEADER_LEN, "message header")?;
    let marker_1 = input.get_u64();
    let marker_2 = input.get_u64();
    let length = input.get_u16();
    let msg_type = input.get_u8();

    if marker_1 != BGP_MARKER || marker_2 != BGP_MARKER {
        return Err(ParserError::InvalidMarker);
    }
    /*
    This 2-octet unsigned integer indicates the total length of the
    message, including the header in octets.  Thus, it allows one
    to locate the (Marker field of the) next message in the TCP
    stream.
    */
    if (length as usize) < BGP_HEADER_LEN {
        return Err(ParserError::InvalidLength(length));
    }

    Ok(BgpHeader { length, msg_type })
}

/// Prepends the header for `msg_type` to an encoded body.
pub(crate) fn encode_with_header(
    msg_type: BgpMessageType,
    body: &[u8],
) -> Result<Bytes, EncoderError> {
    let header = BgpHeader::new(body.len(), msg_type)?;
    let mut buf = BytesMut::with_capacity(header.length as usize);
    header.encode(&mut buf);
    buf.put_slice(body);
    Ok(buf.freeze())
}
