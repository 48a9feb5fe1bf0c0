#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::fmt::Write as _;

use nj::harness::filter_pass;
use nj::lines::build_line_index;
use nj::ondemand::pad_buffer;
use nj::output::{OutputBuf, OutputMode};

const THRESHOLD: f64 = 30.0;

// Surrounding-member keys; none of them is `age`, so the expected lookup
// outcome is decided by the record's own `age` slot alone.
const KEYS: &[&str] = &["id", "name", "score", "active", "tag"];

// Escape-free, newline-free strings keep every record on one line.
const STRINGS: &[&str] = &["", "ada", "bob o", "null", "42"];

/// One scalar member value, rendered verbatim.
#[derive(Arbitrary, Debug)]
enum FuzzScalar {
    Null,
    Bool(bool),
    Int(i32),
    Str(u8),
}

impl FuzzScalar {
    fn render(&self, out: &mut String) {
        match self {
            FuzzScalar::Null => out.push_str("null"),
            FuzzScalar::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            FuzzScalar::Int(n) => {
                let _ = write!(out, "{n}");
            }
            FuzzScalar::Str(idx) => {
                let _ = write!(out, "\"{}\"", STRINGS[*idx as usize % STRINGS.len()]);
            }
        }
    }
}

/// One NDJSON record: scalar members around an optional `age`, with or
/// without interior spacing.
#[derive(Arbitrary, Debug)]
struct FuzzRecord {
    before: Vec<(u8, FuzzScalar)>,
    age: Option<i16>,
    after: Vec<(u8, FuzzScalar)>,
    spaced: bool,
}

impl FuzzRecord {
    fn render(&self, out: &mut String) {
        let sep = if self.spaced { ", " } else { "," };
        let colon = if self.spaced { ": " } else { ":" };
        out.push('{');
        let mut first = true;
        let mut member = |out: &mut String, key: &str| {
            if !first {
                out.push_str(sep);
            }
            first = false;
            let _ = write!(out, "\"{key}\"{colon}");
        };
        for (k, v) in self.before.iter().take(4) {
            member(out, KEYS[*k as usize % KEYS.len()]);
            v.render(out);
        }
        if let Some(age) = self.age {
            member(out, "age");
            let _ = write!(out, "{age}");
        }
        for (k, v) in self.after.iter().take(4) {
            member(out, KEYS[*k as usize % KEYS.len()]);
            v.render(out);
        }
        out.push('}');
    }

    fn expect_match(&self) -> bool {
        self.age.is_some_and(|a| f64::from(a) > THRESHOLD)
    }
}

// Structured differential: render arbitrary records to NDJSON, run the real
// filter pass, and check counts and emitted bytes against what the records
// themselves dictate.
fuzz_target!(|records: Vec<FuzzRecord>| {
    let records: Vec<&FuzzRecord> = records.iter().take(64).collect();
    let mut text = String::new();
    for rec in &records {
        rec.render(&mut text);
        text.push('\n');
    }

    let buf = pad_buffer(text.as_bytes());
    let index = build_line_index(text.as_bytes());
    assert_eq!(index.len(), records.len());

    let mut out = OutputBuf::new(OutputMode::Emit);
    let stats = filter_pass(&buf, text.len(), &index, "age", THRESHOLD, &mut out).unwrap();
    assert_eq!(stats.docs, records.len() as u64);

    let mut expected_matched = 0u64;
    let mut expected_out = Vec::new();
    for (rec, range) in records.iter().zip(&index) {
        if rec.expect_match() {
            expected_matched += 1;
            expected_out.extend_from_slice(range.slice(text.as_bytes()));
            expected_out.push(b'\n');
        }
    }
    assert_eq!(stats.matched, expected_matched);
    assert_eq!(out.bytes(), expected_out.as_slice());
});
