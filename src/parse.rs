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
 * rs_minijson parser state and tape builder
 *
 * The parser owns the document under construction, the scope bookkeeping used to patch container
 * words, and the validity flags. A structural stage drives the `on_*` builder callbacks in strict
 * document order; the callbacks append or patch tape words and fill the string store.
 **************************************************************************************************/
use crate::document::Document;
use crate::error::{JSONError, Result};
use crate::padded::PaddedBytes;
use crate::stage::{ScalarStage, StructuralStage};
use crate::tape::{pack, TapeType, TAPE_VALUE_MASK};

use std::fmt;
use std::mem;
use std::mem::size_of;
use std::sync::Arc;

/// Default ceiling on container nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// A reusable JSON parser.
///
/// A parser is sized once with [`allocate`](JSONParser::allocate) for the largest input it will
/// accept, and can then run any number of parses without further allocation. After a successful
/// parse the produced [`Document`] is borrowed from the parser, or moved out with
/// [`take_document`](JSONParser::take_document) - in the latter case the next parse re-allocates
/// the document buffers lazily.
///
/// A parser is exclusive to one thread while parsing; for parallelism, allocate one parser per
/// thread and share the (immutable) documents they produce.
pub struct JSONParser {
    doc: Document,
    stage: Arc<dyn StructuralStage + Send + Sync>,
    /// For each nesting depth, the tape index at which the scope at that depth was opened.
    scope_offsets: Vec<usize>,
    capacity: usize,
    max_depth: usize,
    valid: bool,
    error: Option<JSONError>,
}

/// A receipt for a string under construction in the string store.
///
/// Returned by [`JSONParser::on_start_string`] and consumed by [`JSONParser::on_end_string`],
/// so a structural stage cannot terminate a string it never started.
#[derive(Debug)]
pub struct StringCursor {
    base: usize,
}

impl JSONParser {
    /// Construct a parser with the reference scalar stage and the default maximum depth.
    ///
    /// The parser starts with zero capacity; call [`allocate`](JSONParser::allocate) before
    /// parsing.
    pub fn new() -> JSONParser {
        JSONParser::with_stage(Arc::new(ScalarStage), DEFAULT_MAX_DEPTH)
    }

    /// Construct a parser with the reference scalar stage and a chosen maximum nesting depth.
    pub fn with_max_depth(max_depth: usize) -> JSONParser {
        JSONParser::with_stage(Arc::new(ScalarStage), max_depth)
    }

    /// Construct a parser around a specific structural stage implementation.
    ///
    /// The stage is the strategy that walks input bytes and drives the builder callbacks; it is
    /// fixed for the lifetime of the parser.
    pub fn with_stage(
        stage: Arc<dyn StructuralStage + Send + Sync>,
        max_depth: usize,
    ) -> JSONParser {
        JSONParser {
            doc: Document::default(),
            stage,
            scope_offsets: Vec::new(),
            capacity: 0,
            max_depth,
            valid: false,
            error: Some(JSONError::Uninitialized),
        }
    }

    /// Reserve every internal buffer for inputs up to `capacity` bytes.
    ///
    /// Returns `false` if any reservation fails, or if `capacity` is too large for the 32-bit
    /// string store offsets (inputs must be below 4 GiB). Parse calls never grow the buffers
    /// reserved here.
    pub fn allocate(&mut self, capacity: usize) -> bool {
        if capacity as u64 >= u32::MAX as u64 {
            return false;
        }
        if self.doc.try_reserve(capacity).is_err() {
            return false;
        }
        if self.scope_offsets.try_reserve(self.max_depth + 1).is_err() {
            return false;
        }
        self.scope_offsets.resize(self.max_depth + 1, 0);
        self.capacity = capacity;
        true
    }

    /// The maximum input length this parser is prepared to handle.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The maximum container nesting depth this parser accepts.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse `json`, returning a borrow of the produced document.
    ///
    /// Structural stages may read a fixed number of bytes past the end of their input buffer.
    /// With `realloc_if_needed` set, `json` is first copied into a padded buffer which is
    /// released before this function returns, on success and error paths alike. Without it the
    /// caller asserts that `json` already sits in front of [`PADDING`](crate::parser::PADDING)
    /// readable bytes, e.g. inside a [`PaddedBytes`].
    pub fn parse(&mut self, json: &[u8], realloc_if_needed: bool) -> Result<&Document> {
        self.init_parse(json.len())?;
        let stage = Arc::clone(&self.stage);
        let outcome = if realloc_if_needed {
            let padded = PaddedBytes::from(json);
            stage.parse(padded.as_padded_bytes(), padded.len(), self)
        } else {
            stage.parse(json, json.len(), self)
        };
        match outcome {
            Ok(()) => Ok(&self.doc),
            Err(e) => Err(e),
        }
    }

    /// Parse a string slice. The input is always copied into a padded buffer.
    pub fn parse_str(&mut self, json: &str) -> Result<&Document> {
        self.parse(json.as_bytes(), true)
    }

    /// Parse an already padded input without copying.
    pub fn parse_padded(&mut self, json: &PaddedBytes) -> Result<&Document> {
        self.init_parse(json.len())?;
        let stage = Arc::clone(&self.stage);
        match stage.parse(json.as_padded_bytes(), json.len(), self) {
            Ok(()) => Ok(&self.doc),
            Err(e) => Err(e),
        }
    }

    /// Return `true` between a completed successful parse and the next initialization.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The outcome of the last parse: `None` after a success, otherwise the error kind.
    /// Reports `Uninitialized` before the first completed parse.
    pub fn error_code(&self) -> Option<JSONError> {
        if self.valid {
            None
        } else {
            Some(self.error.unwrap_or(JSONError::Uninitialized))
        }
    }

    /// Human-readable rendering of [`error_code`](JSONParser::error_code).
    pub fn error_message(&self) -> String {
        match self.error_code() {
            None => String::from("No error"),
            Some(e) => e.to_string(),
        }
    }

    /// Borrow the document produced by the last parse. Fails unless the parser is valid.
    pub fn document(&self) -> Result<&Document> {
        if self.valid {
            Ok(&self.doc)
        } else {
            Err(self.error.unwrap_or(JSONError::Uninitialized))
        }
    }

    /// Move the document produced by the last parse out of the parser.
    ///
    /// The parser is left uninitialized; its next parse re-allocates document buffers.
    pub fn take_document(&mut self) -> Result<Document> {
        if !self.valid {
            return Err(self.error.unwrap_or(JSONError::Uninitialized));
        }
        self.valid = false;
        self.error = Some(JSONError::Uninitialized);
        Ok(mem::take(&mut self.doc))
    }

    /// Check the input length against capacity and reset per-parse state. Failures here are
    /// recorded on the parser like any other parse-time error.
    fn init_parse(&mut self, len: usize) -> Result<()> {
        self.valid = false;
        self.error = Some(JSONError::Uninitialized);
        if len > self.capacity {
            return Err(self.on_error(JSONError::Capacity));
        }
        // The document buffers are re-reserved lazily after a take_document.
        if self.doc.tape.capacity() == 0 && self.doc.try_reserve(self.capacity).is_err() {
            return Err(self.on_error(JSONError::MemAlloc));
        }
        if self.scope_offsets.len() < self.max_depth + 1 {
            if self.scope_offsets.try_reserve(self.max_depth + 1).is_err() {
                return Err(self.on_error(JSONError::MemAlloc));
            }
            self.scope_offsets.resize(self.max_depth + 1, 0);
        }
        self.doc.tape.clear();
        self.doc.strings.clear();
        Ok(())
    }

    /// Next write index into the tape.
    #[inline]
    fn cursor(&self) -> usize {
        self.doc.tape.len()
    }

    /// Append a tape word. Writes land at monotonically increasing indices.
    #[inline]
    fn write_tape(&mut self, payload: u64, tag: TapeType) {
        self.doc.tape.push(pack(payload, tag));
    }

    /// OR a payload into a previously written word whose payload bits were zero.
    #[inline]
    fn patch_tape(&mut self, at: usize, payload: u64) {
        self.doc.tape[at] |= payload & TAPE_VALUE_MASK;
    }

    /***********************************************************************************************
     * Builder callbacks. A structural stage invokes these in strict document order, with `depth`
     * at most the configured maximum. Tape and string store advances stay within the space
     * reserved by `allocate`.
     **********************************************************************************************/

    /// Open the document scope: record it and write the opening document bracket.
    pub fn on_start_document(&mut self, depth: usize) {
        self.scope_offsets[depth] = self.cursor();
        self.write_tape(0, TapeType::Root);
    }

    /// Close the document scope: point the opening bracket at the closing one and vice versa.
    pub fn on_end_document(&mut self, depth: usize) {
        let open = self.scope_offsets[depth];
        let close = self.cursor();
        self.patch_tape(open, close as u64);
        self.write_tape(open as u64, TapeType::Root);
    }

    /// Open an object scope at `depth`.
    pub fn on_start_object(&mut self, depth: usize) {
        self.scope_offsets[depth] = self.cursor();
        self.write_tape(0, TapeType::StartObject);
    }

    /// Close the object scope opened at `depth`; the opener and closer end up holding each
    /// other's tape index.
    pub fn on_end_object(&mut self, depth: usize) {
        let open = self.scope_offsets[depth];
        let close = self.cursor();
        self.write_tape(open as u64, TapeType::EndObject);
        self.patch_tape(open, close as u64);
    }

    /// Open an array scope at `depth`.
    pub fn on_start_array(&mut self, depth: usize) {
        self.scope_offsets[depth] = self.cursor();
        self.write_tape(0, TapeType::StartArray);
    }

    /// Close the array scope opened at `depth`; the opener and closer end up holding each
    /// other's tape index.
    pub fn on_end_array(&mut self, depth: usize) {
        let open = self.scope_offsets[depth];
        let close = self.cursor();
        self.write_tape(open as u64, TapeType::EndArray);
        self.patch_tape(open, close as u64);
    }

    /// Record the atom `true`.
    pub fn on_true_atom(&mut self) {
        self.write_tape(0, TapeType::True);
    }

    /// Record the atom `false`.
    pub fn on_false_atom(&mut self) {
        self.write_tape(0, TapeType::False);
    }

    /// Record the atom `null`.
    pub fn on_null_atom(&mut self) {
        self.write_tape(0, TapeType::Null);
    }

    /// Begin a string: write its tape word and reserve the length prefix in the string store.
    ///
    /// Decoded content is then appended with
    /// [`append_string_content`](JSONParser::append_string_content) and the string is sealed by
    /// passing the returned cursor to [`on_end_string`](JSONParser::on_end_string).
    pub fn on_start_string(&mut self) -> StringCursor {
        let base = self.doc.strings.len();
        self.write_tape(base as u64, TapeType::String);
        self.doc.strings.extend_from_slice(&[0u8; size_of::<u32>()]);
        StringCursor { base }
    }

    /// Append a run of decoded (unescaped) UTF-8 bytes to the string under construction.
    pub fn append_string_content(&mut self, bytes: &[u8]) {
        self.doc.strings.extend_from_slice(bytes);
    }

    /// Seal a string: back-patch the little-endian length prefix and NUL-terminate the content.
    pub fn on_end_string(&mut self, cursor: StringCursor) {
        let len = (self.doc.strings.len() - cursor.base - size_of::<u32>()) as u32;
        self.doc.strings[cursor.base..cursor.base + size_of::<u32>()]
            .copy_from_slice(&len.to_le_bytes());
        self.doc.strings.push(0);
    }

    /// Record a signed integer: a tag word followed by the raw bits of the value.
    pub fn on_number_int64(&mut self, value: i64) {
        self.write_tape(0, TapeType::Int64);
        self.doc.tape.push(value as u64);
    }

    /// Record an unsigned integer: a tag word followed by the raw bits of the value.
    pub fn on_number_uint64(&mut self, value: u64) {
        self.write_tape(0, TapeType::Uint64);
        self.doc.tape.push(value);
    }

    /// Record a double: a tag word followed by the exact IEEE-754 bit pattern of the value.
    pub fn on_number_double(&mut self, value: f64) {
        self.write_tape(0, TapeType::Double);
        self.doc.tape.push(value.to_bits());
    }

    /// Terminate a parse successfully. Invoked by the stage after the close at depth 0.
    pub fn on_success(&mut self) {
        self.valid = true;
        self.error = None;
    }

    /// Terminate a parse with an error, which is recorded and echoed back.
    pub fn on_error(&mut self, kind: JSONError) -> JSONError {
        self.valid = false;
        self.error = Some(kind);
        kind
    }
}

impl Default for JSONParser {
    fn default() -> Self {
        JSONParser::new()
    }
}

impl fmt::Debug for JSONParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JSONParser")
            .field("capacity", &self.capacity)
            .field("max_depth", &self.max_depth)
            .field("valid", &self.valid)
            .field("error", &self.error)
            .finish()
    }
}

/// Parse `json` with a throwaway parser sized to the input, returning an owned document.
///
/// ```
/// use tps_minijson::parser::parse;
///
/// let doc = parse(br#"{"on": true}"#, true)?;
/// assert!(doc.root()?.is_object());
/// # Ok::<(), tps_minijson::error::JSONError>(())
/// ```
pub fn parse(json: &[u8], realloc_if_needed: bool) -> Result<Document> {
    let mut parser = JSONParser::new();
    if !parser.allocate(json.len()) {
        return Err(JSONError::MemAlloc);
    }
    parser.parse(json, realloc_if_needed)?;
    parser.take_document()
}
