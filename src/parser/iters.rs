/*!
Provides decoding of BGP messages from a blocking byte stream.
*/
use crate::error::ParserError;
use crate::models::BgpMessage;
use crate::parser::bgp::header::{parse_bgp_header, BGP_HEADER_LEN};
use crate::parser::bgp::messages::parse_bgp_message_body;
use bytes::Bytes;
use log::debug;
use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

/// Fill `buf` from `reader`, returning how many bytes were read before end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ParserError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ParserError::IoError(e)),
        }
    }
    Ok(filled)
}

/// Read one message from `reader`.
///
/// Returns `Ok(None)` when the stream ends cleanly before the first header byte. A stream
/// that ends anywhere inside a message fails with [ParserError::Truncated].
pub fn read_bgp_message<R: Read>(reader: &mut R) -> Result<Option<BgpMessage>, ParserError> {
    let mut raw_header = [0u8; BGP_HEADER_LEN];
    match read_full(reader, &mut raw_header)? {
        0 => return Ok(None),
        BGP_HEADER_LEN => {}
        n => {
            return Err(ParserError::Truncated {
                field: "message header",
                needed: BGP_HEADER_LEN,
                available: n,
            })
        }
    }
    let header = parse_bgp_header(&mut raw_header.as_slice())?;

    let body_len = header.body_len();
    let mut raw_body = vec![0u8; body_len];
    let n = read_full(reader, &mut raw_body)?;
    if n < body_len {
        return Err(ParserError::Truncated {
            field: "message body",
            needed: body_len,
            available: n,
        });
    }

    let mut body = Bytes::from(raw_body);
    parse_bgp_message_body(&header, &mut body).map(Some)
}

/// Read and decode exactly one message from a blocking reader.
///
/// The same rules as [crate::parse_bgp_message] apply; an empty stream is reported as a
/// truncated header.
pub fn parse_bgp_message_from_reader<R: Read>(reader: &mut R) -> Result<BgpMessage, ParserError> {
    read_bgp_message(reader)?.ok_or(ParserError::Truncated {
        field: "message header",
        needed: BGP_HEADER_LEN,
        available: 0,
    })
}

/// Iterator over the messages of a byte stream.
///
/// Iteration ends at a clean end of stream on a message boundary. The first error is yielded
/// as an item, after which the iterator only returns `None`.
pub struct BgpMessageIterator<R> {
    reader: R,
    pub count: u64,
    finished: bool,
}

impl<R: Read> BgpMessageIterator<R> {
    pub fn new(reader: R) -> Self {
        BgpMessageIterator {
            reader,
            count: 0,
            finished: false,
        }
    }
}

impl<R: Read> Iterator for BgpMessageIterator<R> {
    type Item = Result<BgpMessage, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match read_bgp_message(&mut self.reader) {
            Ok(Some(msg)) => {
                self.count += 1;
                Some(Ok(msg))
            }
            Ok(None) => {
                debug!("end of BGP message stream after {} messages", self.count);
                self.finished = true;
                None
            }
            Err(e) => {
                debug!("BGP message stream stopped after {} messages: {}", self.count, e);
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for BgpMessageIterator<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use std::io::Cursor;

    fn stream() -> Vec<u8> {
        let mut data = vec![];
        data.extend_from_slice(&BgpKeepAliveMessage {}.encode());
        data.extend_from_slice(
            &BgpNotificationMessage::new(6, 4, vec![1, 2])
                .encode()
                .unwrap(),
        );
        data.extend_from_slice(&BgpUpdateMessage::default().encode().unwrap());
        data
    }

    #[test]
    fn test_iterate_stream() {
        let mut iter = BgpMessageIterator::new(Cursor::new(stream()));
        assert_eq!(
            iter.next().unwrap().unwrap(),
            BgpMessage::KeepAlive(BgpKeepAliveMessage {})
        );
        assert_eq!(
            iter.next().unwrap().unwrap(),
            BgpMessage::Notification(BgpNotificationMessage::new(6, 4, vec![1, 2]))
        );
        assert_eq!(
            iter.next().unwrap().unwrap(),
            BgpMessage::Update(BgpUpdateMessage::default())
        );
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert_eq!(iter.count, 3);
    }

    #[test]
    fn test_empty_stream() {
        let mut iter = BgpMessageIterator::new(Cursor::new(vec![]));
        assert!(iter.next().is_none());

        let mut reader = Cursor::new(vec![]);
        assert!(matches!(
            parse_bgp_message_from_reader(&mut reader),
            Err(ParserError::Truncated { available: 0, .. })
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let mut data = stream();
        data.truncate(data.len() - 1);
        let results: Vec<_> = BgpMessageIterator::new(Cursor::new(data)).collect();
        assert_eq!(results.len(), 3);
        assert!(matches!(
            results[2],
            Err(ParserError::Truncated {
                field: "message body",
                needed: 4,
                available: 3
            })
        ));

        // cut inside the header
        let data = stream()[..25].to_vec();
        let results: Vec<_> = BgpMessageIterator::new(Cursor::new(data)).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[1],
            Err(ParserError::Truncated {
                field: "message header",
                needed: 19,
                available: 6
            })
        ));
    }

    #[test]
    fn test_error_fuses_iterator() {
        let mut data = stream();
        data[0] = 0;
        let mut iter = BgpMessageIterator::new(Cursor::new(data));
        assert!(matches!(iter.next(), Some(Err(ParserError::InvalidMarker))));
        assert!(iter.next().is_none());
        assert_eq!(iter.count, 0);
    }

    #[test]
    fn test_single_message_from_reader() {
        let mut reader = Cursor::new(stream());
        assert_eq!(
            parse_bgp_message_from_reader(&mut reader).unwrap(),
            BgpMessage::KeepAlive(BgpKeepAliveMessage {})
        );
        assert_eq!(reader.position(), 19);
    }
}
