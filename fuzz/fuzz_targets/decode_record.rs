#![no_main]
use libfuzzer_sys::fuzz_target;
use sas_decode::{decode_record, encode_record};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must survive a trip back through the encoder.
    if let Ok(record) = decode_record(data) {
        let enc = encode_record(&record);
        assert!(enc.len() <= data.len());
        assert_eq!(decode_record(&enc).unwrap(), record);
    }
});
