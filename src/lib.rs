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
 * rs_minijson module definition
 *
 * A high-throughput, tape-based deserializer for JSON (RFC8259). A UTF-8 input buffer is parsed
 * once into a flat vector of 64-bit tape words plus a store of decoded strings, over which cheap
 * random-access views provide typed extraction and iteration.
 **************************************************************************************************/

#![warn(missing_docs)]

//! # TPS_MINIJSON
//!
//! The `tps_minijson` crate parses JSON into a compact, random-access **tape**: a linear vector
//! of 64-bit words encoding the document tree in depth-first order, with decoded string payloads
//! held in a separate store. Parsing the input once up front means the views handed out
//! afterwards never re-scan text: array iteration, object lookup and typed extraction all walk
//! the tape directly.
//!
//! The design separates two roles:
//!
//! - a **structural stage** ([`parser::StructuralStage`]) walks the input bytes and drives the
//!   parser's builder callbacks in document order. The crate ships [`parser::ScalarStage`], a
//!   plain byte-dispatch reference stage; a vectorised stage implements the same trait and is
//!   selected at parser construction.
//! - the **parser state** ([`parser::JSONParser`]) owns the tape, the string store and the scope
//!   bookkeeping, and exposes the parsed [`types::Document`] once the stage reports success.
//!
//! A parser is allocated once for the largest expected input and reused across parses without
//! further allocation, which is the intended mode for high-throughput work.
//!
//! ## Decoding a document
//!
//! Values are extracted through [`types::Element`] views with explicit `as_*` accessors, or
//! through `TryFrom` conversions and the object [`types::Object::lookup`] convenience, which
//! converts to any type with a `TryFrom<Element>` instance:
//!
//! ```
//! use tps_minijson::error::JSONError;
//! use tps_minijson::parser::JSONParser;
//!
//! fn main() -> Result<(), JSONError> {
//!     let mut parser = JSONParser::new();
//!     assert!(parser.allocate(256));
//!
//!     let doc = parser.parse_str(
//!         r#"{
//!             "device": "sensor-7",
//!             "firmware": [3, 1],
//!             "calibrated": true,
//!             "offset": -40,
//!             "scale": 0.25
//!         }"#,
//!     )?;
//!
//!     let root = doc.root()?.as_object()?;
//!     let device: &str = root.lookup("device")?;
//!     let calibrated: bool = root.lookup("calibrated")?;
//!     let offset: i64 = root.lookup("offset")?;
//!     let scale: f64 = root.lookup("scale")?;
//!
//!     assert_eq!(device, "sensor-7");
//!     assert!(calibrated);
//!     assert_eq!(offset, -40);
//!     assert_eq!(scale, 0.25);
//!
//!     let firmware = root.get("firmware").ok_or(JSONError::KeyNotPresent)?;
//!     let mut version = firmware.as_array()?.iter();
//!     assert_eq!(version.next().map(|e| e.as_u64()), Some(Ok(3)));
//!     assert_eq!(version.next().map(|e| e.as_u64()), Some(Ok(1)));
//!     Ok(())
//! }
//! ```
//!
//! ## One-shot parsing
//!
//! Where a parser is not worth keeping around, the free function [`parser::parse`] sizes a
//! throwaway parser to the input and returns the document by value:
//!
//! ```
//! use tps_minijson::parser::parse;
//!
//! let doc = parse(b"[1, -2, 3.5]", true)?;
//! let total: f64 = doc
//!     .root()?
//!     .as_array()?
//!     .iter()
//!     .map(|e| e.as_f64().unwrap_or(0.0))
//!     .sum();
//! assert_eq!(total, 2.5);
//! # Ok::<(), tps_minijson::error::JSONError>(())
//! ```
//!
//! ## Error handling
//!
//! Every fallible operation returns [`error::Result`]. Parse failures (malformed structure, bad
//! numbers, invalid UTF-8, over-deep nesting) abort the parse and surface the error kind both in
//! the returned result and from [`parser::JSONParser::error_code`]; no partial document is ever
//! exposed. Extraction failures (`IncorrectType`, `NumberOutOfRange`) are carried in the result
//! of the individual accessor, so the success path stays free of checks.

pub(crate) mod array;
pub(crate) mod document;
pub(crate) mod element;
mod json_diag;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod padded;
pub(crate) mod parse;
pub(crate) mod stage;
pub(crate) mod strings;
pub(crate) mod tape;

/// The `error` module contains error definitions used throughout `tps_minijson`.
pub mod error;

/// The `types` module exports the [`types::Document`] produced by a parse and the view types
/// used to read it: [`types::Element`], [`types::Array`], [`types::Object`] and
/// [`types::KeyValuePair`].
pub mod types {
    pub use super::array::{Array, ElementIter};
    pub use super::document::Document;
    pub use super::element::{Element, ValueKind};
    pub use super::object::{KeyValuePair, Object, PairIter};
}

/// The `parser` module exports the [`parser::JSONParser`] state machine, the structural stage
/// seam, padded input handling, and the one-shot [`parser::parse`] entry point.
pub mod parser {
    pub use super::padded::{PaddedBytes, PADDING};
    pub use super::parse::{parse, JSONParser, StringCursor, DEFAULT_MAX_DEPTH};
    pub use super::stage::{ScalarStage, StructuralStage};
}

/// The `debug` module exports the debugging serializers and the raw tape word encoding, for
/// tooling that inspects parsed tapes directly.
pub mod debug {
    pub use super::json_diag::Diag;
    pub use super::tape::{pack, payload_of, tag_of, TapeType, TAPE_TAG_SHIFT, TAPE_VALUE_MASK};
}
