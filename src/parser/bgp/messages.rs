use crate::error::{EncoderError, ParserError};
use crate::models::*;
use crate::parser::bgp::header::{encode_with_header, parse_bgp_header, BgpHeader};
use crate::parser::bgp::open::parse_bgp_open_message;
use crate::parser::bgp::update::parse_bgp_update_message;
use crate::parser::ReadUtils;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::trace;

/// Parse one BGP message from the front of `data`.
///
/// Exactly `length` bytes, as announced by the header, are consumed on success. The body is
/// split off as its own buffer before the message-specific decoder runs, so that decoder can
/// never read into the next message, and whatever it leaves unread is reported as
/// [ParserError::TrailingGarbage]. On any error `data` is left untouched, so a caller
/// buffering a stream can append more bytes and try again after a `Truncated` error.
///
/// Format:
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Marker (16)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |    Body...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
pub fn parse_bgp_message(data: &mut Bytes) -> Result<BgpMessage, ParserError> {
    let mut input = data.clone();
    let header = parse_bgp_header(&mut input)?;
    let mut body = input.read_region(header.body_len(), "message body")?;
    let msg = parse_bgp_message_body(&header, &mut body)?;
    *data = input;
    Ok(msg)
}

/// Decode a message body already split off from its header.
pub(crate) fn parse_bgp_message_body(
    header: &BgpHeader,
    body: &mut Bytes,
) -> Result<BgpMessage, ParserError> {
    let msg_type = BgpMessageType::try_from(header.msg_type)
        .map_err(|_| ParserError::UnknownMessageType(header.msg_type))?;
    trace!(
        "decoding BGP {:?} message, {} body bytes",
        msg_type,
        body.remaining()
    );

    let msg = match msg_type {
        BgpMessageType::OPEN => BgpMessage::Open(parse_bgp_open_message(body)?),
        BgpMessageType::UPDATE => BgpMessage::Update(parse_bgp_update_message(body)?),
        BgpMessageType::NOTIFICATION => {
            BgpMessage::Notification(parse_bgp_notification_message(body)?)
        }
        BgpMessageType::KEEPALIVE => BgpMessage::KeepAlive(BgpKeepAliveMessage {}),
    };

    match body.remaining() {
        0 => Ok(msg),
        n => Err(ParserError::TrailingGarbage(n)),
    }
}

/// Parse the body of a BGP NOTIFICATION message.
///
/// The 16-bit code holds the error code and subcode; the data runs to the end of the body.
/// Codes are not checked against the IANA registries here, see [BgpNotificationMessage::error].
pub fn parse_bgp_notification_message(
    input: &mut Bytes,
) -> Result<BgpNotificationMessage, ParserError> {
    let code = input.read_u16("notification code")?;
    let data = input.read_remaining();
    Ok(BgpNotificationMessage { code, data })
}

impl BgpNotificationMessage {
    /// Encode the message, header included.
    pub fn encode(&self) -> Result<Bytes, EncoderError> {
        let mut body = BytesMut::with_capacity(2 + self.data.len());
        body.put_u16(self.code);
        body.put_slice(&self.data);
        encode_with_header(BgpMessageType::NOTIFICATION, &body)
    }
}

impl BgpKeepAliveMessage {
    /// A KEEPALIVE is a bare header.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(19);
        BgpHeader {
            length: 19,
            msg_type: BgpMessageType::KEEPALIVE.into(),
        }
        .encode(&mut buf);
        buf.freeze()
    }
}

impl BgpMessage {
    /// Encode the message, header included.
    pub fn encode(&self) -> Result<Bytes, EncoderError> {
        match self {
            BgpMessage::Open(msg) => msg.encode(),
            BgpMessage::Update(msg) => msg.encode(),
            BgpMessage::Notification(msg) => msg.encode(),
            BgpMessage::KeepAlive(msg) => Ok(msg.encode()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEEPALIVE: [u8; 19] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x00, 0x13, 0x04,
    ];

    #[test]
    fn test_keepalive() {
        let bytes = BgpKeepAliveMessage {}.encode();
        assert_eq!(bytes.as_ref(), &KEEPALIVE);

        let mut data = bytes.clone();
        assert_eq!(
            parse_bgp_message(&mut data).unwrap(),
            BgpMessage::KeepAlive(BgpKeepAliveMessage {})
        );
        assert!(data.is_empty());
    }

    #[test]
    fn test_keepalive_with_body() {
        let mut bytes = KEEPALIVE.to_vec();
        bytes[17] = 20;
        bytes.push(0);
        assert!(matches!(
            parse_bgp_message(&mut Bytes::from(bytes)),
            Err(ParserError::TrailingGarbage(1))
        ));
    }

    #[test]
    fn test_unknown_type() {
        let mut bytes = KEEPALIVE;
        bytes[18] = 99;
        assert!(matches!(
            parse_bgp_message(&mut Bytes::copy_from_slice(&bytes)),
            Err(ParserError::UnknownMessageType(99))
        ));
    }

    #[test]
    fn test_notification() {
        let msg = BgpNotificationMessage {
            code: 771,
            data: vec![1, 2, 3, 4, 5],
        };
        let bytes = msg.encode().unwrap();
        assert_eq!(&bytes[16..], &[0, 26, 3, 3, 3, 1, 2, 3, 4, 5]);

        let mut data = bytes;
        assert_eq!(
            parse_bgp_message(&mut data).unwrap(),
            BgpMessage::Notification(msg)
        );
    }

    #[test]
    fn test_notification_too_short() {
        let mut body = Bytes::from_static(&[6]);
        assert!(matches!(
            parse_bgp_notification_message(&mut body),
            Err(ParserError::Truncated {
                field: "notification code",
                ..
            })
        ));
    }

    #[test]
    fn test_body_shorter_than_header_length() {
        let mut bytes = KEEPALIVE.to_vec();
        bytes[17] = 25;
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(
            parse_bgp_message(&mut Bytes::from(bytes)),
            Err(ParserError::Truncated {
                field: "message body",
                needed: 6,
                available: 2
            })
        ));
    }

    #[test]
    fn test_short_body_consumes_nothing() {
        let mut bytes = KEEPALIVE.to_vec();
        bytes[17] = 23;
        bytes.extend_from_slice(&[0, 0, 0]);
        let mut data = Bytes::from(bytes.clone());
        assert!(matches!(
            parse_bgp_message(&mut data),
            Err(ParserError::Truncated { needed: 4, available: 3, .. })
        ));
        assert_eq!(data.as_ref(), bytes.as_slice());

        // bad bodies are not consumed either
        let mut data = Bytes::from_static(&[
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0x00, 0x14, 0x03, 0x06,
        ]);
        assert!(parse_bgp_message(&mut data).is_err());
        assert_eq!(data.len(), 20);
    }

    #[test]
    fn test_consecutive_messages() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&BgpKeepAliveMessage {}.encode());
        buf.extend_from_slice(
            &BgpNotificationMessage::new(6, 2, vec![])
                .encode()
                .unwrap(),
        );
        buf.extend_from_slice(&BgpKeepAliveMessage {}.encode());
        let mut data = buf.freeze();

        let mut types = vec![];
        while !data.is_empty() {
            types.push(parse_bgp_message(&mut data).unwrap().msg_type());
        }
        assert_eq!(
            types,
            vec![
                BgpMessageType::KEEPALIVE,
                BgpMessageType::NOTIFICATION,
                BgpMessageType::KEEPALIVE
            ]
        );
    }

    #[test]
    fn test_message_encode_dispatch() {
        let msg = BgpMessage::from(BgpUpdateMessage::default());
        assert_eq!(msg.encode().unwrap()[18], 2);
        let msg = BgpMessage::from(BgpKeepAliveMessage {});
        assert_eq!(msg.encode().unwrap().as_ref(), &KEEPALIVE);
    }
}
