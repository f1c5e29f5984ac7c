//! Writes seed inputs for the fuzz targets.
//!
//! Usage: `cargo run --bin gen_corpus [OUTPUT_DIR]`, defaulting to `corpus/`.
use bgpkit_codec::parser::bgp::encode_prefixes;
use bgpkit_codec::BgpMessage;
use bgpkit_codec_fuzz::seed_messages;
use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("corpus"));

    let messages_dir = out_dir.join("fuzz_bgp_message");
    let prefixes_dir = out_dir.join("fuzz_prefixes");
    std::fs::create_dir_all(&messages_dir)?;
    std::fs::create_dir_all(&prefixes_dir)?;

    let mut stream = vec![];
    for (i, msg) in seed_messages().iter().enumerate() {
        let bytes = msg
            .encode()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(messages_dir.join(format!("seed-{:02}", i)), &bytes)?;
        stream.extend_from_slice(&bytes);

        if let BgpMessage::Update(update) = msg {
            let prefixes = encode_prefixes(&update.announced_prefixes)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(prefixes_dir.join(format!("seed-{:02}", i)), &prefixes)?;
        }
    }
    // several messages back to back; only the first one is decoded by the target
    std::fs::write(messages_dir.join("seed-stream"), &stream)?;

    println!("wrote seeds to {}", out_dir.display());
    Ok(())
}
