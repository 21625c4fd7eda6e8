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
 * rs_minijson structural stage
 *
 * The structural stage is the strategy that walks the input bytes and drives the parser's
 * builder callbacks in document order. `ScalarStage` is the reference implementation: a plain
 * byte-dispatch walker. A SIMD stage implements the same trait and can be swapped in at parser
 * construction.
 **************************************************************************************************/
use crate::error::{JSONError, Result};
use crate::number::{self, Number};
use crate::parse::JSONParser;
use crate::strings;

use std::str::from_utf8;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// A structural stage: tokenises `input[..len]` and drives `parser`'s builder callbacks in
/// strict document order, terminating through `on_success` or `on_error`.
///
/// `input` holds at least `len + PADDING` readable bytes, so a vectorised implementation may
/// load full SIMD words at the tail; the padding content is unspecified and must not influence
/// the parse. The stage must keep `depth` arguments within the parser's configured maximum and
/// may assume the parser's buffers were reserved for `len` input bytes.
pub trait StructuralStage {
    /// Tokenise `input[..len]` and drive `parser`'s callbacks, terminating the parse exactly
    /// once through `on_success` or `on_error` and echoing any error as the return value.
    fn parse(&self, input: &[u8], len: usize, parser: &mut JSONParser) -> Result<()>;
}

/// The reference scalar stage. No SIMD, no lookahead beyond `len`.
#[derive(Debug, Default, Copy, Clone)]
pub struct ScalarStage;

impl StructuralStage for ScalarStage {
    fn parse(&self, input: &[u8], len: usize, parser: &mut JSONParser) -> Result<()> {
        match walk(&input[..len], parser) {
            Ok(()) => {
                parser.on_success();
                Ok(())
            }
            Err(e) => Err(parser.on_error(e)),
        }
    }
}

/// Parse the complete document: exactly one top-level value between the document brackets,
/// surrounded by nothing but whitespace.
fn walk(buf: &[u8], parser: &mut JSONParser) -> Result<()> {
    if from_utf8(buf).is_err() {
        return Err(JSONError::UTF8Error);
    }
    let mut i = skip_whitespace(buf, 0);
    if i >= buf.len() {
        return Err(JSONError::Empty);
    }
    parser.on_start_document(0);
    i = parse_value(buf, i, 1, parser)?;
    i = skip_whitespace(buf, i);
    if i < buf.len() {
        return Err(JSONError::TapeError);
    }
    parser.on_end_document(0);
    Ok(())
}

/// Parse one value whose first byte is at `i`. Containers opened by this value live at `depth`.
/// Returns the index of the first byte after the value.
fn parse_value(buf: &[u8], i: usize, depth: usize, parser: &mut JSONParser) -> Result<usize> {
    match buf[i] {
        b'{' => parse_object(buf, i, depth, parser),
        b'[' => parse_array(buf, i, depth, parser),
        b'"' => strings::parse_string(buf, i, parser),
        b't' => parse_atom(buf, i, b"true", JSONError::TAtomError, parser),
        b'f' => parse_atom(buf, i, b"false", JSONError::FAtomError, parser),
        b'n' => parse_atom(buf, i, b"null", JSONError::NAtomError, parser),
        b'-' | b'0'..=b'9' => {
            let (next, value) = number::parse_number(buf, i)?;
            match value {
                Number::Int64(v) => parser.on_number_int64(v),
                Number::Uint64(v) => parser.on_number_uint64(v),
                Number::Double(v) => parser.on_number_double(v),
            }
            Ok(next)
        }
        _ => Err(JSONError::UnexpectedChar),
    }
}

/// Parse an object whose opening brace is at `i`.
fn parse_object(buf: &[u8], i: usize, depth: usize, parser: &mut JSONParser) -> Result<usize> {
    if depth > parser.max_depth() {
        return Err(JSONError::DepthError);
    }
    parser.on_start_object(depth);
    let mut i = skip_whitespace(buf, i + 1);
    if i >= buf.len() {
        return Err(JSONError::UnclosedStructure);
    }
    if buf[i] == b'}' {
        parser.on_end_object(depth);
        return Ok(i + 1);
    }
    loop {
        // Field name, colon, value.
        if buf[i] != b'"' {
            return Err(JSONError::TapeError);
        }
        i = strings::parse_string(buf, i, parser)?;
        i = skip_whitespace(buf, i);
        if i >= buf.len() {
            return Err(JSONError::UnclosedStructure);
        }
        if buf[i] != b':' {
            return Err(JSONError::TapeError);
        }
        i = skip_whitespace(buf, i + 1);
        if i >= buf.len() {
            return Err(JSONError::UnclosedStructure);
        }
        i = parse_value(buf, i, depth + 1, parser)?;
        i = skip_whitespace(buf, i);
        if i >= buf.len() {
            return Err(JSONError::UnclosedStructure);
        }
        match buf[i] {
            b',' => {
                i = skip_whitespace(buf, i + 1);
                if i >= buf.len() {
                    return Err(JSONError::UnclosedStructure);
                }
            }
            b'}' => {
                parser.on_end_object(depth);
                return Ok(i + 1);
            }
            _ => return Err(JSONError::TapeError),
        }
    }
}

/// Parse an array whose opening bracket is at `i`.
fn parse_array(buf: &[u8], i: usize, depth: usize, parser: &mut JSONParser) -> Result<usize> {
    if depth > parser.max_depth() {
        return Err(JSONError::DepthError);
    }
    parser.on_start_array(depth);
    let mut i = skip_whitespace(buf, i + 1);
    if i >= buf.len() {
        return Err(JSONError::UnclosedStructure);
    }
    if buf[i] == b']' {
        parser.on_end_array(depth);
        return Ok(i + 1);
    }
    loop {
        i = parse_value(buf, i, depth + 1, parser)?;
        i = skip_whitespace(buf, i);
        if i >= buf.len() {
            return Err(JSONError::UnclosedStructure);
        }
        match buf[i] {
            b',' => {
                i = skip_whitespace(buf, i + 1);
                if i >= buf.len() {
                    return Err(JSONError::UnclosedStructure);
                }
            }
            b']' => {
                parser.on_end_array(depth);
                return Ok(i + 1);
            }
            _ => return Err(JSONError::TapeError),
        }
    }
}

/// Match an atom exactly, recording it through the matching callback.
#[cfg_attr(feature = "trace", trace)]
fn parse_atom(
    buf: &[u8],
    i: usize,
    atom: &'static [u8],
    mismatch: JSONError,
    parser: &mut JSONParser,
) -> Result<usize> {
    if i + atom.len() > buf.len() || &buf[i..i + atom.len()] != atom {
        return Err(mismatch);
    }
    match atom[0] {
        b't' => parser.on_true_atom(),
        b'f' => parser.on_false_atom(),
        _ => parser.on_null_atom(),
    }
    Ok(i + atom.len())
}

/// Advance over JSON insignificant whitespace.
#[inline]
fn skip_whitespace(buf: &[u8], mut i: usize) -> usize {
    while i < buf.len() && matches!(buf[i], b' ' | b'\t' | b'\n' | b'\r') {
        i += 1;
    }
    i
}
