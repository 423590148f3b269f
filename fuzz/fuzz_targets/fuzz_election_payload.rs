#![no_main]

use libfuzzer_sys::fuzz_target;
use roster_transactions::{decode_election_payload, encode_election_payload};

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary transaction data must never panic. Anything that does
    // decode must survive a re-encode unchanged.
    if let Ok(Some(record)) = decode_election_payload(data) {
        let encoded = encode_election_payload(&record).expect("decoded record re-encodes");
        let again = decode_election_payload(&encoded)
            .expect("re-encoded payload decodes")
            .expect("re-encoded payload keeps its magic");
        assert_eq!(again, record);
    }
});
