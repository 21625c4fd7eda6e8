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
 * rs_minijson JSON Error API
 *
 * A high-throughput, tape-based deserializer for JSON (RFC8259). The input buffer is parsed once
 * into a flat vector of 64-bit words over which cheap random-access views are provided.
 **************************************************************************************************/
use std::result;

use thiserror::Error;

/// An alias for Result<T, JSONError> used throughout this crate.
pub type Result<T> = result::Result<T, JSONError>;

/// `JSONError` enumerates every outcome a parse or a typed extraction can produce, other than
/// success. Each variant carries its human-readable rendering via the `Display` instance.
#[derive(Copy, Clone, Error, Debug, PartialEq, Eq)]
pub enum JSONError {
    /// No parse has completed on this parser since construction or the last re-initialization.
    #[error("No parse has completed on this parser")]
    Uninitialized,
    /// The input is longer than the capacity reserved with `allocate`.
    #[error("Input length exceeds the allocated parser capacity")]
    Capacity,
    /// An internal buffer could not be allocated or grown.
    #[error("Memory allocation failed for a parser buffer")]
    MemAlloc,
    /// The input is empty or contains only whitespace.
    #[error("No JSON value found in an empty input")]
    Empty,
    /// Nesting is deeper than the configured maximum depth.
    #[error("Nesting exceeds the configured maximum depth")]
    DepthError,
    /// Commas, colons or brackets are out of place. Probably malformed JSON.
    #[error("Structural characters are out of place. Probably malformed JSON")]
    TapeError,
    /// A string contains an illegal escape sequence or an unescaped control character.
    #[error("A string contains an illegal escape or control character")]
    StringError,
    /// A number does not match the JSON grammar, or overflows every representation.
    #[error("A number is malformed or cannot be represented")]
    NumberError,
    /// Something other than `true` starts with a `t`.
    #[error("An atom starting with 't' is not 'true'")]
    TAtomError,
    /// Something other than `false` starts with an `f`.
    #[error("An atom starting with 'f' is not 'false'")]
    FAtomError,
    /// Something other than `null` starts with an `n`.
    #[error("An atom starting with 'n' is not 'null'")]
    NAtomError,
    /// The input contains an invalid UTF-8 sequence.
    #[error("The input contains an invalid UTF8 sequence")]
    UTF8Error,
    /// A byte that cannot begin any JSON value was found where a value was expected.
    #[error("A character that cannot start a JSON value was found")]
    UnexpectedChar,
    /// The input ended inside a string.
    #[error("The input ended before a string was closed")]
    UnclosedString,
    /// The input ended while an object or array was still open.
    #[error("The input ended while an object or array was still open")]
    UnclosedStructure,
    /// Attempt to extract an element as an incompatible type.
    #[error("Attempt to extract an element of incompatible type")]
    IncorrectType,
    /// An object does not contain the requested key.
    #[error("Object does not contain the requested key")]
    KeyNotPresent,
    /// An integer extraction would overflow or underflow the requested type.
    #[error("Overflow or underflow in number extraction")]
    NumberOutOfRange,
}
