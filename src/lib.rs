/*!
bgpkit-codec is a bit-exact encoder and decoder for BGP-4 messages (RFC 4271).

It turns a byte buffer or stream into typed [BgpMessage] values, and turns those values back
into the exact bytes a peer expects. OPEN, UPDATE, NOTIFICATION and KEEPALIVE messages are
supported, limited to what a plain IPv4 unicast session carries: capabilities and path
attributes are kept as opaque code/value pairs.

# Decoding

[parse_bgp_message] decodes one message from the front of a [bytes::Bytes] buffer:

```
use bgpkit_codec::{parse_bgp_message, BgpMessage};
use bytes::Bytes;

let mut data = Bytes::from_static(&[
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x00, 0x13, 0x04,
]);
let msg = parse_bgp_message(&mut data).unwrap();
assert!(matches!(msg, BgpMessage::KeepAlive(_)));
assert!(data.is_empty());
```

A message either decodes completely, consuming exactly the length announced in its header, or
fails with a [ParserError]. Decoding never accepts bytes that re-encode differently.

To read from a socket or file, use [BgpMessageIterator] or [parse_bgp_message_from_reader]:

```no_run
use bgpkit_codec::BgpMessageIterator;
use std::net::TcpStream;

let stream = TcpStream::connect("192.0.2.1:179").unwrap();
for msg in BgpMessageIterator::new(stream) {
    println!("{:?}", msg.unwrap());
}
```

# Encoding

Every message type has an `encode` method returning the full message, header included.
Messages are validated before anything is written:

```
use bgpkit_codec::models::*;
use std::time::Duration;

let open = BgpOpenMessage {
    asn: 64512,
    hold_time: Duration::from_secs(90),
    router_id: Some("192.0.2.1".parse().unwrap()),
    capabilities: vec![Capability::four_octet_asn(64512)],
};
let bytes = open.encode().unwrap();
assert_eq!(bytes.len(), 37);

let bad = BgpOpenMessage { asn: 0, ..open };
assert!(bad.encode().is_err());
```
*/

pub mod error;
pub mod models;
pub mod parser;

pub use error::{EncoderError, ParserError};
pub use models::BgpMessage;
pub use parser::{
    parse_bgp_header, parse_bgp_message, parse_bgp_message_from_reader, BgpHeader,
    BgpMessageIterator,
};
