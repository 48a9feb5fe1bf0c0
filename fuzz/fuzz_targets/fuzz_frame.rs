#![no_main]
use libfuzzer_sys::fuzz_target;
use nj::ondemand::{DocumentStream, pad_buffer};

// Feed arbitrary bytes to the framing stream. Every yielded span must be
// non-empty, in bounds, and strictly after the previous one, and the stream
// must terminate (the iteration itself proves that, since frame never
// consumes zero bytes).
fuzz_target!(|data: &[u8]| {
    let buf = pad_buffer(data);
    let stream = DocumentStream::open(&buf, data.len(), 1_000_000).unwrap();
    let mut last_end = 0usize;
    for doc in stream {
        let r = doc.byte_range();
        assert!(r.start < r.end);
        assert!(r.start >= last_end);
        assert!(r.end <= data.len());
        assert_eq!(doc.source().len(), r.end - r.start);
        last_end = r.end;
    }
});
