use std::io::{Read, Write};
use std::path::PathBuf;

use bgpkit_codec::{parse_bgp_message, BgpMessage};
use bytes::Bytes;
use clap::Parser;
use serde_json::json;

/// bgpkit-codec is a simple cli tool that decodes a stream of raw BGP messages.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// File path to a binary stream of BGP messages, `-` for stdin.
    #[clap(name = "FILE")]
    file_path: PathBuf,

    /// Input is hex text; whitespace is ignored
    #[clap(long)]
    hex: bool,

    /// Output as JSON objects
    #[clap(long)]
    json: bool,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,

    /// Only print the number of messages
    #[clap(short, long)]
    count: bool,

    /// Re-encode every message and report any difference from the input bytes
    #[clap(short, long)]
    roundtrip: bool,
}

fn read_input(opts: &Opts) -> Result<Bytes, String> {
    let mut raw = vec![];
    let result = match opts.file_path.to_str() {
        Some("-") => std::io::stdin().read_to_end(&mut raw),
        _ => std::fs::File::open(&opts.file_path).and_then(|mut f| f.read_to_end(&mut raw)),
    };
    result.map_err(|e| format!("{}: {}", opts.file_path.display(), e))?;

    if !opts.hex {
        return Ok(Bytes::from(raw));
    }
    let text: String = String::from_utf8_lossy(&raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    hex::decode(text)
        .map(Bytes::from)
        .map_err(|e| format!("invalid hex input: {}", e))
}

fn format_message(msg: &BgpMessage, opts: &Opts) -> String {
    if opts.json {
        let val = json!(msg);
        if opts.pretty {
            serde_json::to_string_pretty(&val).unwrap_or_default()
        } else {
            val.to_string()
        }
    } else {
        msg.to_string()
    }
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let mut data = match read_input(&opts) {
        Ok(d) => d,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let mut stdout = std::io::stdout();
    let mut count = 0;
    let mut offset = 0;
    let mut mismatches = 0;
    while !data.is_empty() {
        let raw = data.clone();
        let msg = match parse_bgp_message(&mut data) {
            Ok(msg) => msg,
            Err(err) => {
                eprintln!("message {} at offset {}: {}", count, offset, err);
                std::process::exit(1);
            }
        };
        let raw = raw.slice(..raw.len() - data.len());
        offset += raw.len();

        if opts.roundtrip {
            match msg.encode() {
                Ok(encoded) if encoded == raw => {}
                Ok(encoded) => {
                    mismatches += 1;
                    eprintln!(
                        "message {}: re-encoded bytes differ\n  input:  {}\n  output: {}",
                        count,
                        hex::encode(&raw),
                        hex::encode(&encoded)
                    );
                }
                Err(err) => {
                    mismatches += 1;
                    eprintln!("message {}: cannot re-encode: {}", count, err);
                }
            }
        }
        count += 1;

        if opts.count {
            continue;
        }
        if let Err(e) = writeln!(stdout, "{}", format_message(&msg, &opts)) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }

    if opts.count {
        println!("total messages: {}", count);
    }
    if mismatches > 0 {
        eprintln!("{} of {} messages did not round-trip", mismatches, count);
        std::process::exit(1);
    }
}
