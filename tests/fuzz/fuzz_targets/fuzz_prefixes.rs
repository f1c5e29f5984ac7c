#![no_main]
use bgpkit_codec::parser::bgp::{encode_prefixes, parse_prefixes};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut bytes = Bytes::copy_from_slice(data);
    if let Ok(prefixes) = parse_prefixes(&mut bytes) {
        let encoded = encode_prefixes(&prefixes).expect("decoded prefixes must encode");
        assert_eq!(encoded.as_ref(), data);
    }
});
