//! Reads hex-encoded TPDUs from stdin, one per line, and prints the decoded message.
use std::io::prelude::*;
use sms_pdu::Message;

fn hex_decode(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).expect("invalid hex digit"))
        .collect()
}

fn main() {
    env_logger::init();
    println!("Input PDUs (hex, SCA-prefixed)");
    let stdin = ::std::io::stdin();
    for ln in stdin.lock().lines() {
        let ln = ln.expect("failed to read line");
        if ln.trim().is_empty() {
            continue;
        }
        let bytes = hex_decode(ln.trim());
        match Message::decode(&bytes) {
            Ok((consumed, message)) => {
                println!("consumed {} of {} bytes", consumed, bytes.len());
                println!("from: {}", message.address.display());
                println!("text: {:?}", message.text);
            }
            Err(e) => println!("decode error: {}", e),
        }
    }
}
