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
 * Typed extraction: the as_* accessors, the cross-integer promotions, the TryFrom conversion
 * ladder, string decoding (escapes and surrogates), and object lookup.
 **************************************************************************************************/

extern crate tps_minijson;

use std::convert::TryFrom;

use tps_minijson::error::JSONError;
use tps_minijson::parser::parse;
use tps_minijson::types::{Array, Document, Element, Object, ValueKind};

fn parse_doc(json: &str) -> Document {
    parse(json.as_bytes(), true).unwrap()
}

/// Extraction succeeds exactly for the matching kind, modulo the documented promotions.
#[test]
fn extraction_matrix_follows_kinds() {
    let doc = parse_doc(r#"[null, true, 7, -7, 3.5, "s", [], {}]"#);
    let items: Vec<_> = doc.root().unwrap().as_array().unwrap().iter().collect();

    let kinds: Vec<_> = items.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ValueKind::Null,
            ValueKind::Bool,
            ValueKind::Int64,
            ValueKind::Int64,
            ValueKind::Double,
            ValueKind::String,
            ValueKind::Array,
            ValueKind::Object,
        ]
    );

    // null
    assert!(items[0].is_null());
    assert_eq!(items[0].as_bool(), Err(JSONError::IncorrectType));
    // bool
    assert_eq!(items[1].as_bool(), Ok(true));
    assert_eq!(items[1].as_f64(), Err(JSONError::IncorrectType));
    // integers promote across signedness and to double
    assert_eq!(items[2].as_i64(), Ok(7));
    assert_eq!(items[2].as_u64(), Ok(7));
    assert_eq!(items[2].as_f64(), Ok(7.0));
    assert_eq!(items[3].as_i64(), Ok(-7));
    assert_eq!(items[3].as_u64(), Err(JSONError::NumberOutOfRange));
    assert_eq!(items[3].as_f64(), Ok(-7.0));
    // double does not demote
    assert_eq!(items[4].as_f64(), Ok(3.5));
    assert_eq!(items[4].as_i64(), Err(JSONError::IncorrectType));
    assert_eq!(items[4].as_u64(), Err(JSONError::IncorrectType));
    // string
    assert_eq!(items[5].as_str(), Ok("s"));
    assert_eq!(items[5].as_bool(), Err(JSONError::IncorrectType));
    // containers
    assert!(items[6].as_array().is_ok());
    assert_eq!(items[6].as_object().err(), Some(JSONError::IncorrectType));
    assert!(items[7].as_object().is_ok());
    assert_eq!(items[7].as_array().err(), Some(JSONError::IncorrectType));
}

#[test]
fn unsigned_values_above_i64_max_stay_unsigned() {
    let doc = parse_doc("[9223372036854775808, 18446744073709551615]");
    let items: Vec<_> = doc.root().unwrap().as_array().unwrap().iter().collect();

    assert_eq!(items[0].kind(), ValueKind::Uint64);
    assert_eq!(items[0].as_u64(), Ok(9223372036854775808));
    assert_eq!(items[0].as_i64(), Err(JSONError::NumberOutOfRange));
    assert_eq!(items[0].as_f64(), Ok(9223372036854775808.0));

    assert_eq!(items[1].as_u64(), Ok(u64::MAX));
    assert_eq!(items[1].as_i64(), Err(JSONError::NumberOutOfRange));
}

#[test]
fn integer_boundaries_convert_exactly() {
    let doc = parse_doc("[9223372036854775807, -9223372036854775808]");
    let items: Vec<_> = doc.root().unwrap().as_array().unwrap().iter().collect();
    assert_eq!(items[0].as_i64(), Ok(i64::MAX));
    assert_eq!(items[0].as_u64(), Ok(i64::MAX as u64));
    assert_eq!(items[1].as_i64(), Ok(i64::MIN));
    assert_eq!(items[1].as_u64(), Err(JSONError::NumberOutOfRange));
}

#[test]
fn try_from_narrows_with_range_checks() {
    let doc = parse_doc("[255, 256, -128, -129, 65535, 4294967296]");
    let items: Vec<_> = doc.root().unwrap().as_array().unwrap().iter().collect();

    assert_eq!(u8::try_from(items[0]), Ok(255));
    assert_eq!(u8::try_from(items[1]), Err(JSONError::NumberOutOfRange));
    assert_eq!(i8::try_from(items[2]), Ok(-128));
    assert_eq!(i8::try_from(items[3]), Err(JSONError::NumberOutOfRange));
    assert_eq!(u16::try_from(items[4]), Ok(65535));
    assert_eq!(u32::try_from(items[5]), Err(JSONError::NumberOutOfRange));
    assert_eq!(u64::try_from(items[5]), Ok(4294967296));
    assert_eq!(i64::try_from(items[2]), Ok(-128));
    assert_eq!(f64::try_from(items[0]), Ok(255.0));
    assert_eq!(u8::try_from(items[2]), Err(JSONError::NumberOutOfRange));
}

#[test]
fn try_from_extracts_strings_and_containers() {
    let doc = parse_doc(r#"{"name": "tape", "items": [1], "meta": {}}"#);
    let root = Object::try_from(doc.root().unwrap()).unwrap();

    let name = <&str>::try_from(root.get("name").unwrap());
    assert_eq!(name, Ok("tape"));

    let items = Array::try_from(root.get("items").unwrap()).unwrap();
    assert_eq!(items.len(), 1);

    assert!(Object::try_from(root.get("meta").unwrap()).is_ok());
    assert_eq!(
        bool::try_from(root.get("name").unwrap()),
        Err(JSONError::IncorrectType)
    );
}

#[test]
fn escapes_decode_into_the_string_store() {
    let doc = parse_doc(r#"["a\"b", "x\\y", "tab\there", "nl\nend", "\u0041\u0042C", "\/"]"#);
    let items: Vec<_> = doc.root().unwrap().as_array().unwrap().iter().collect();
    assert_eq!(items[0].as_str(), Ok("a\"b"));
    assert_eq!(items[1].as_str(), Ok("x\\y"));
    assert_eq!(items[2].as_str(), Ok("tab\there"));
    assert_eq!(items[3].as_str(), Ok("nl\nend"));
    assert_eq!(items[4].as_str(), Ok("ABC"));
    assert_eq!(items[5].as_str(), Ok("/"));
}

#[test]
fn surrogate_pairs_combine_and_lone_surrogates_fail() {
    let doc = parse_doc(r#""smile 😀""#);
    assert_eq!(doc.root().unwrap().as_str(), Ok("smile \u{1F600}"));

    assert_eq!(
        parse(br#""\uD800""#, true).err(),
        Some(JSONError::StringError)
    );
    assert_eq!(
        parse(br#""\uDC00""#, true).err(),
        Some(JSONError::StringError)
    );
    assert_eq!(
        parse(br#""\uD800A""#, true).err(),
        Some(JSONError::StringError)
    );
}

#[test]
fn raw_multibyte_utf8_passes_through() {
    let doc = parse_doc(r#""héllo wörld 漢字""#);
    assert_eq!(doc.root().unwrap().as_str(), Ok("héllo wörld 漢字"));
}

#[test]
fn escaped_nul_is_kept_with_its_terminator() {
    let doc = parse_doc(r#""a\u0000b""#);
    let root = doc.root().unwrap();
    assert_eq!(root.as_str(), Ok("a\0b"));
    // Interior NUL plus the store's own terminator.
    assert_eq!(root.as_c_str().unwrap(), b"a\0b\0");
}

#[test]
fn object_lookup_and_probes() {
    let doc = parse_doc(r#"{"port": 8080, "host": "local", "port": 9090}"#);
    let root = doc.root().unwrap().as_object().unwrap();

    assert!(root.contains_key("host"));
    assert!(!root.contains_key("missing"));

    // First occurrence in document order wins for duplicate keys.
    let port: u16 = root.lookup("port").unwrap();
    assert_eq!(port, 8080);

    let host: &str = root.lookup("host").unwrap();
    assert_eq!(host, "local");

    assert_eq!(
        root.lookup::<bool>("host").err(),
        Some(JSONError::IncorrectType)
    );
    assert_eq!(
        root.lookup::<u64>("missing").err(),
        Some(JSONError::KeyNotPresent)
    );
}

#[test]
fn array_positional_access() {
    let doc = parse_doc(r#"[[1, 2], "x", 3]"#);
    let arr = doc.root().unwrap().as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.index(1).unwrap().as_str(), Ok("x"));
    assert_eq!(arr.index(2).unwrap().as_i64(), Ok(3));
    assert!(arr.index(3).is_none());

    // Stepping over the nested container reaches its siblings.
    let nested = arr.index(0).unwrap().as_array().unwrap();
    let inner: Vec<_> = nested.iter().collect();
    assert_eq!(inner[0].as_i64(), Ok(1));
    assert_eq!(inner[1].as_i64(), Ok(2));
}

#[test]
fn elements_compare_by_position() {
    let doc = parse_doc("[1, 1]");
    let arr = doc.root().unwrap().as_array().unwrap();
    let a = arr.index(0).unwrap();
    let b = arr.index(1).unwrap();
    assert_ne!(a, b);
    assert_eq!(a, arr.index(0).unwrap());
}

#[test]
fn views_read_across_threads() {
    let doc = parse_doc(r#"{"n": 7}"#);
    let handle = std::thread::spawn(move || {
        let root = doc.root().unwrap().as_object().unwrap();
        root.lookup::<u64>("n").unwrap()
    });
    assert_eq!(handle.join().unwrap(), 7);
}

fn kind_of(json: &str) -> ValueKind {
    parse_doc(json).root().unwrap().kind()
}

#[test]
fn number_classification_is_stable() {
    assert_eq!(kind_of("0"), ValueKind::Int64);
    assert_eq!(kind_of("-0"), ValueKind::Int64);
    assert_eq!(kind_of("1e2"), ValueKind::Double);
    assert_eq!(kind_of("0.0"), ValueKind::Double);
    assert_eq!(kind_of("18446744073709551616"), ValueKind::Double);
}

#[test]
fn element_equality_requires_same_document() {
    let doc_a = parse_doc("[1]");
    let doc_b = parse_doc("[1]");
    let a: Element = doc_a.root().unwrap();
    let b: Element = doc_b.root().unwrap();
    assert_ne!(a, b);
}
