#![no_main]
use libfuzzer_sys::fuzz_target;
use nj::ondemand::{DocumentStream, pad_buffer};

/// Field names covering the hit, miss, and sentinel spellings the tools use.
const FIELDS: &[&str] = &["age", "a", "name", "__nj__", ""];

// The fuzzer selects a field via the first byte, then streams the remaining
// bytes and resolves that field in every document. Lookups must never panic
// on arbitrary input and must be idempotent.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let field = FIELDS[data[0] as usize % FIELDS.len()];
    let json = &data[1..];

    let buf = pad_buffer(json);
    let stream = DocumentStream::open(&buf, json.len(), 1_000_000).unwrap();
    for doc in stream {
        let first = doc.find_field_f64(field);
        let second = doc.find_field_f64(field);
        assert_eq!(first, second, "lookup not idempotent for {field:?}");
    }
});
