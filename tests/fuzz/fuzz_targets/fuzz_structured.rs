#![no_main]
use bgpkit_codec::parse_bgp_message;
use bgpkit_codec_fuzz::FuzzMessage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: FuzzMessage| {
    let msg = input.into_message();
    // oversized updates are rejected at encode time
    let Ok(bytes) = msg.encode() else {
        return;
    };
    let mut data = bytes.clone();
    let decoded = parse_bgp_message(&mut data).expect("encoded message must decode");
    assert!(data.is_empty());
    assert_eq!(decoded, msg);
});
