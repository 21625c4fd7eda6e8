/***************************************************************************************************
 * Copyright (c) 2021-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * Structural invariants of the tape representation, checked against the raw words of parsed
 * documents: container matching, scalar follow-up words, string store layout, root bracketing.
 **************************************************************************************************/

extern crate tps_minijson;

use tps_minijson::debug::{payload_of, tag_of, TapeType};
use tps_minijson::parser::parse;
use tps_minijson::types::Document;

fn parse_doc(json: &str) -> Document {
    parse(json.as_bytes(), true).unwrap()
}

/// Every container opener points at its matching close word and vice versa; the two document
/// brackets hold each other's index.
fn check_matching(doc: &Document) {
    let tape = doc.raw_tape();
    assert!(tape.len() >= 2);
    assert_eq!(tag_of(tape[0]), b'r');
    assert_eq!(tag_of(tape[tape.len() - 1]), b'r');
    assert_eq!(payload_of(tape[0]) as usize, tape.len() - 1);
    assert_eq!(payload_of(tape[tape.len() - 1]), 0);

    let mut i = 1;
    while i < tape.len() - 1 {
        let word = tape[i];
        match TapeType::from_tag(tag_of(word)) {
            Some(TapeType::StartObject) => {
                let j = payload_of(word) as usize;
                assert!(j > i && j < tape.len());
                assert_eq!(tag_of(tape[j]), b'}');
                assert_eq!(payload_of(tape[j]) as usize, i);
            }
            Some(TapeType::StartArray) => {
                let j = payload_of(word) as usize;
                assert!(j > i && j < tape.len());
                assert_eq!(tag_of(tape[j]), b']');
                assert_eq!(payload_of(tape[j]) as usize, i);
            }
            // Numeric tags are followed by one raw-bits word, which carries no tag.
            Some(TapeType::Int64) | Some(TapeType::Uint64) | Some(TapeType::Double) => {
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
}

#[test]
fn containers_match_in_nested_documents() {
    for json in [
        "[]",
        "{}",
        "[1, [2, [3, [4]]], {\"a\": [true]}]",
        "{\"a\": {\"b\": {\"c\": [[], {}]}}, \"d\": null}",
        "[[[[[1]]]]]",
    ]
    .iter()
    {
        check_matching(&parse_doc(json));
    }
}

#[test]
fn scalar_words_hold_raw_bits() {
    let doc = parse_doc("[1, -2, 3.5, 9223372036854775808]");
    let tape = doc.raw_tape();

    // ROOT, START_ARRAY, then four scalars of two words each, END_ARRAY, ROOT.
    assert_eq!(tape.len(), 12);
    assert_eq!(tag_of(tape[2]), b'l');
    assert_eq!(tape[3], 1u64);
    assert_eq!(tag_of(tape[4]), b'l');
    assert_eq!(tape[5], (-2i64) as u64);
    assert_eq!(tag_of(tape[6]), b'd');
    assert_eq!(tape[7], 3.5f64.to_bits());
    assert_eq!(tag_of(tape[8]), b'u');
    assert_eq!(tape[9], 9223372036854775808u64);
}

#[test]
fn negative_zero_double_preserves_bit_pattern() {
    let doc = parse_doc("[-0.0]");
    let tape = doc.raw_tape();
    assert_eq!(tag_of(tape[2]), b'd');
    assert_eq!(tape[3], (-0.0f64).to_bits());
}

#[test]
fn string_store_entries_are_length_prefixed_and_nul_terminated() {
    let doc = parse_doc(r#"{"a": "hi", "long": "0123456789abcdef"}"#);
    let strings = doc.raw_strings();
    let tape = doc.raw_tape();

    let mut offsets = Vec::new();
    for word in tape.iter() {
        if TapeType::from_tag(tag_of(*word)) == Some(TapeType::String) {
            offsets.push(payload_of(*word) as usize);
        }
    }
    assert_eq!(offsets.len(), 4);

    let expected = ["a", "hi", "long", "0123456789abcdef"];
    for (o, want) in offsets.iter().zip(expected.iter()) {
        let len = u32::from_le_bytes([
            strings[*o],
            strings[*o + 1],
            strings[*o + 2],
            strings[*o + 3],
        ]) as usize;
        assert_eq!(len, want.len());
        assert_eq!(&strings[o + 4..o + 4 + len], want.as_bytes());
        assert_eq!(strings[o + 4 + len], 0x00);
    }
}

#[test]
fn root_kind_matches_top_level_value() {
    assert!(parse_doc("null").root().unwrap().is_null());
    assert!(parse_doc("true").root().unwrap().is_bool());
    assert!(parse_doc("7").root().unwrap().is_integer());
    assert!(parse_doc("7.5").root().unwrap().is_number());
    assert!(parse_doc("\"x\"").root().unwrap().is_string());
    assert!(parse_doc("[]").root().unwrap().is_array());
    assert!(parse_doc("{}").root().unwrap().is_object());
}

#[test]
fn leaf_and_scalar_word_counts() {
    // ROOT, START_ARRAY, NULL, END_ARRAY, ROOT.
    assert_eq!(parse_doc("[null]").raw_tape().len(), 5);
    // Numeric scalars take a tag word plus a raw-bits word.
    assert_eq!(parse_doc("[7]").raw_tape().len(), 6);
    // A bare scalar document is bracketed by the two ROOT words alone.
    assert_eq!(parse_doc("true").raw_tape().len(), 3);
    assert_eq!(parse_doc("7.5").raw_tape().len(), 4);
}
