#![no_main]

use bincode::Options;
use libfuzzer_sys::fuzz_target;

const MAX_DECODE_BYTES: u64 = 1 << 20;

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_DECODE_BYTES)
}

fuzz_target!(|data: &[u8]| {
    // Blocks and their transactions come from the network as bytes. Parsing
    // them, and any election payloads they carry, must never panic.
    if let Ok(block) = codec().deserialize::<roster_chain::Block>(data) {
        let _ = block.hash();
        let _ = block.header.roster().digest();
        for tx in &block.transactions {
            let _ = tx.parse_election_payload();
        }
    }

    let _ = codec().deserialize::<roster_types::NodeInfo>(data);
    let _ = codec().deserialize::<roster_types::EpochRoster>(data);
});
