#![no_main]
use libfuzzer_sys::fuzz_target;
use nj::harness::filter_pass;
use nj::lines::build_line_index;
use nj::ondemand::pad_buffer;
use nj::output::{OutputBuf, OutputMode};

const THRESHOLDS: &[f64] = &[-1.0, 0.0, 30.0, 1e9];

// Whole pipeline over arbitrary bytes: index, stream, filter, accumulate.
// Emitted lines must be exact indexed lines, counts must be consistent, and
// a second pass must reproduce the first bit-for-bit.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let threshold = THRESHOLDS[data[0] as usize % THRESHOLDS.len()];
    let json = &data[1..];

    let buf = pad_buffer(json);
    let index = build_line_index(json);

    let mut out = OutputBuf::new(OutputMode::Emit);
    let stats = filter_pass(&buf, json.len(), &index, "age", threshold, &mut out).unwrap();
    assert!(stats.matched <= stats.docs);

    let lines: Vec<&[u8]> = index.iter().map(|r| r.slice(json)).collect();
    let emitted: Vec<&[u8]> = out
        .bytes()
        .split(|&b| b == b'\n')
        .filter(|l| !l.is_empty())
        .collect();
    assert!(emitted.len() as u64 <= stats.matched);
    for line in &emitted {
        assert!(lines.contains(line), "emitted line not present in input");
    }

    let mut out2 = OutputBuf::new(OutputMode::Emit);
    let stats2 = filter_pass(&buf, json.len(), &index, "age", threshold, &mut out2).unwrap();
    assert_eq!(stats.docs, stats2.docs);
    assert_eq!(stats.matched, stats2.matched);
    assert_eq!(out.bytes(), out2.bytes());
});
