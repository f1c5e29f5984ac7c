#![no_main]
use bgpkit_codec::parse_bgp_message;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut bytes = Bytes::copy_from_slice(data);
    let Ok(msg) = parse_bgp_message(&mut bytes) else {
        return;
    };
    // a message decoded from the whole input must encode back to the same bytes
    if bytes.is_empty() {
        let encoded = msg.encode().expect("decoded message must encode");
        assert_eq!(encoded.as_ref(), data);
    }
});
