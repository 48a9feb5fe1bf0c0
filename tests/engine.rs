//! Library-level differential tests: the lazy scanner against serde_json as
//! oracle, plus stream / line-index correspondence properties.

use proptest::prelude::*;

use nj::harness::{self, SENTINEL_FIELD};
use nj::lines::build_line_index;
use nj::ondemand::{DocumentStream, FieldLookup, pad_buffer};
use nj::output::{OutputBuf, OutputMode};

const BATCH: usize = 1 << 20;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn oracle_lookup(line: &[u8], field: &str) -> Option<f64> {
    let v: serde_json::Value = serde_json::from_slice(line).ok()?;
    v.get(field)?.as_f64()
}

fn my_lookup(doc_bytes: &[u8], field: &str) -> Option<f64> {
    let buf = pad_buffer(doc_bytes);
    let mut stream = DocumentStream::open(&buf, doc_bytes.len(), BATCH).unwrap();
    match stream.next().map(|d| d.find_field_f64(field)) {
        Some(FieldLookup::Number(v)) => Some(v),
        _ => None,
    }
}

fn to_ndjson(records: &[serde_json::Value]) -> String {
    let mut text = String::new();
    for r in records {
        text.push_str(&serde_json::to_string(r).unwrap());
        text.push('\n');
    }
    text
}

// ---------------------------------------------------------------------------
// Deterministic differential checks
// ---------------------------------------------------------------------------

#[test]
fn stream_agrees_with_serde_on_clean_corpus() {
    let records = vec![
        serde_json::json!({"age": 25, "name": "ada"}),
        serde_json::json!({"age": 35.5, "tags": ["x", "y"], "meta": {"age": 1}}),
        serde_json::json!({"score": -3}),
        serde_json::json!({}),
        serde_json::json!({"age": null}),
    ];
    let text = to_ndjson(&records);
    let buf = pad_buffer(text.as_bytes());
    let docs: Vec<_> = DocumentStream::open(&buf, text.len(), BATCH)
        .unwrap()
        .collect();
    assert_eq!(docs.len(), records.len());
    for (doc, rec) in docs.iter().zip(&records) {
        let parsed: serde_json::Value = serde_json::from_slice(doc.source()).unwrap();
        assert_eq!(&parsed, rec);
        assert!(doc.find_field_f64(SENTINEL_FIELD).is_miss());
    }
}

#[test]
fn consumed_ranges_equal_line_ranges_on_compact_corpus() {
    let records = vec![
        serde_json::json!({"age": 1}),
        serde_json::json!({"age": 2, "b": [1, 2, 3]}),
        serde_json::json!({"c": "three"}),
    ];
    let text = to_ndjson(&records);
    let buf = pad_buffer(text.as_bytes());
    let index = build_line_index(text.as_bytes());
    let stream = DocumentStream::open(&buf, text.len(), BATCH).unwrap();
    for (doc, range) in stream.zip(&index) {
        assert_eq!(doc.byte_range(), range.start..range.end);
    }
}

#[test]
fn consumed_ranges_are_trimmed_line_ranges_on_padded_corpus() {
    let text = "  {\"age\":35}  \n\t{\"age\":25}\n";
    let buf = pad_buffer(text.as_bytes());
    let index = build_line_index(text.as_bytes());
    let stream = DocumentStream::open(&buf, text.len(), BATCH).unwrap();
    let mut n = 0;
    for (doc, range) in stream.zip(&index) {
        assert_eq!(doc.source(), range.slice(text.as_bytes()).trim_ascii());
        n += 1;
    }
    assert_eq!(n, 2);
}

#[test]
fn two_documents_on_one_line_count_but_emit_the_line_once() {
    let input = b"{\"age\":90} {\"age\":80}\n";
    let buf = pad_buffer(input);
    let index = build_line_index(input);
    assert_eq!(index.len(), 1);
    let mut out = OutputBuf::new(OutputMode::Emit);
    let stats = harness::filter_pass(&buf, input.len(), &index, "age", 30.0, &mut out).unwrap();
    assert_eq!(stats.docs, 2);
    assert_eq!(stats.matched, 2);
    // Only the first document has a line range of its own.
    assert_eq!(out.bytes(), b"{\"age\":90} {\"age\":80}\n");
}

#[test]
fn lookup_matrix_agrees_with_serde() {
    let cases: &[&[u8]] = &[
        br#"{"age":35}"#,
        br#"{"age":35.5}"#,
        br#"{"age":-2}"#,
        br#"{"age":1e3}"#,
        br#"{"age":0.125}"#,
        br#"{"age":"35"}"#,
        br#"{"age":true}"#,
        br#"{"age":null}"#,
        br#"{"age":[35]}"#,
        br#"{"age":{"v":35}}"#,
        br#"{"name":"x"}"#,
        br#"{"a":1,"age":7,"z":2}"#,
        br#"{"meta":{"age":9},"age":10}"#,
        br#"{}"#,
    ];
    for case in cases {
        assert_eq!(
            my_lookup(case, "age"),
            oracle_lookup(case, "age"),
            "case: {}",
            String::from_utf8_lossy(case)
        );
    }
}

// ---------------------------------------------------------------------------
// Randomized differential properties
// ---------------------------------------------------------------------------

fn arb_leaf() -> BoxedStrategy<serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        (-1_000_000i64..1_000_000i64).prop_map(serde_json::Value::from),
        (-1.0e6f64..1.0e6f64).prop_map(|f| serde_json::json!(f)),
        "[a-z0-9 ]{0,12}".prop_map(serde_json::Value::from),
        prop::collection::vec((-100i64..100i64).prop_map(serde_json::Value::from), 0..4)
            .prop_map(serde_json::Value::from),
    ]
    .boxed()
}

/// Objects with lowercase keys (raw-byte key equality and the serde oracle
/// agree on those) and an optional numeric `age` member.
fn arb_record() -> BoxedStrategy<serde_json::Value> {
    (
        prop::collection::btree_map("[a-z]{1,8}", arb_leaf(), 0..5),
        prop::option::of(-50i64..120i64),
    )
        .prop_map(|(m, age)| {
            let mut map: serde_json::Map<String, serde_json::Value> = m.into_iter().collect();
            if let Some(a) = age {
                map.insert("age".to_owned(), serde_json::Value::from(a));
            }
            serde_json::Value::Object(map)
        })
        .boxed()
}

/// NDJSON text with blank-line runs sprinkled between records.
fn arb_corpus() -> BoxedStrategy<(String, Vec<serde_json::Value>)> {
    prop::collection::vec((arb_record(), 0u8..3u8), 0..30)
        .prop_map(|rows| {
            let mut text = String::new();
            let mut records = Vec::with_capacity(rows.len());
            for (rec, blanks) in rows {
                text.push_str(&serde_json::to_string(&rec).unwrap());
                text.push('\n');
                for _ in 0..blanks {
                    text.push('\n');
                }
                records.push(rec);
            }
            (text, records)
        })
        .boxed()
}

fn engine_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(engine_config())]

    #[test]
    fn prop_document_count_matches_record_count((text, records) in arb_corpus()) {
        let buf = pad_buffer(text.as_bytes());
        let count = DocumentStream::open(&buf, text.len(), BATCH).unwrap().count();
        prop_assert_eq!(count, records.len());
        prop_assert_eq!(build_line_index(text.as_bytes()).len(), records.len());
    }

    #[test]
    fn prop_lookup_agrees_with_serde((text, records) in arb_corpus()) {
        let buf = pad_buffer(text.as_bytes());
        let stream = DocumentStream::open(&buf, text.len(), BATCH).unwrap();
        for (doc, rec) in stream.zip(&records) {
            let mine = match doc.find_field_f64("age") {
                FieldLookup::Number(v) => Some(v),
                FieldLookup::Miss => None,
            };
            let oracle = rec.get("age").and_then(|v| v.as_f64());
            prop_assert_eq!(mine, oracle, "record: {}", rec);
        }
    }

    #[test]
    fn prop_filter_pass_equals_serde_filter(
        (text, records) in arb_corpus(),
        threshold in -60.0f64..130.0,
    ) {
        let buf = pad_buffer(text.as_bytes());
        let index = build_line_index(text.as_bytes());
        let mut out = OutputBuf::new(OutputMode::Emit);
        let stats =
            harness::filter_pass(&buf, text.len(), &index, "age", threshold, &mut out).unwrap();

        let mut expected = Vec::new();
        let mut expected_matches = 0u64;
        for (rec, range) in records.iter().zip(&index) {
            let hit = rec
                .get("age")
                .and_then(|v| v.as_f64())
                .is_some_and(|v| v > threshold);
            if hit {
                expected_matches += 1;
                expected.extend_from_slice(range.slice(text.as_bytes()));
                expected.push(b'\n');
            }
        }
        prop_assert_eq!(stats.docs, records.len() as u64);
        prop_assert_eq!(stats.matched, expected_matches);
        prop_assert_eq!(out.bytes(), expected.as_slice());
    }
}
