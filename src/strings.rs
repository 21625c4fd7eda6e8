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
 * rs_minijson string unescaping
 *
 * Strings are decoded straight into the parser's string store through the string cursor
 * callbacks. Plain runs between escapes are appended in one piece; escapes are decoded to their
 * UTF-8 bytes.
 **************************************************************************************************/
use crate::error::{JSONError, Result};
use crate::parse::JSONParser;

/// Decode one string from `buf` starting at `start_index`, which must point at the opening
/// quote. The decoded content is written through `parser`'s string callbacks.
///
/// On success, returns the index of the first byte after the closing quote.
pub(crate) fn parse_string(
    buf: &[u8],
    start_index: usize,
    parser: &mut JSONParser,
) -> Result<usize> {
    let cursor = parser.on_start_string();
    let mut i = start_index + 1;
    let mut run_start = i;
    loop {
        if i >= buf.len() {
            return Err(JSONError::UnclosedString);
        }
        match buf[i] {
            b'"' => {
                parser.append_string_content(&buf[run_start..i]);
                parser.on_end_string(cursor);
                return Ok(i + 1);
            }
            b'\\' => {
                parser.append_string_content(&buf[run_start..i]);
                i = parse_escape(buf, i, parser)?;
                run_start = i;
            }
            // Control characters must be escaped in JSON strings.
            b if b < 0x20 => return Err(JSONError::StringError),
            _ => i += 1,
        }
    }
}

/// Decode the escape sequence starting at the backslash at `i`, appending its decoded bytes.
/// Returns the index of the first byte after the escape.
fn parse_escape(buf: &[u8], i: usize, parser: &mut JSONParser) -> Result<usize> {
    if i + 1 >= buf.len() {
        return Err(JSONError::UnclosedString);
    }
    let byte = match buf[i + 1] {
        b'"' => b'"',
        b'\\' => b'\\',
        b'/' => b'/',
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => 0x0A,
        b'r' => 0x0D,
        b't' => 0x09,
        b'u' => return parse_unicode_escape(buf, i, parser),
        _ => return Err(JSONError::StringError),
    };
    parser.append_string_content(&[byte]);
    Ok(i + 2)
}

/// Decode a `\uXXXX` escape at `i`, consuming a following low surrogate where the first unit is
/// a high surrogate. Returns the index of the first byte after the full escape.
fn parse_unicode_escape(buf: &[u8], i: usize, parser: &mut JSONParser) -> Result<usize> {
    let high = parse_hex4(buf, i + 2)?;
    let (scalar, next) = match high {
        // High surrogate: a low surrogate must follow immediately.
        0xD800..=0xDBFF => {
            if i + 8 > buf.len() || buf[i + 6] != b'\\' || buf[i + 7] != b'u' {
                return Err(JSONError::StringError);
            }
            let low = parse_hex4(buf, i + 8)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(JSONError::StringError);
            }
            let combined = 0x10000 + (((high - 0xD800) << 10) | (low - 0xDC00));
            (combined, i + 12)
        }
        // A lone low surrogate is not a scalar value.
        0xDC00..=0xDFFF => return Err(JSONError::StringError),
        _ => (high, i + 6),
    };
    match std::char::from_u32(scalar) {
        Some(c) => {
            let mut utf8 = [0u8; 4];
            parser.append_string_content(c.encode_utf8(&mut utf8).as_bytes());
            Ok(next)
        }
        None => Err(JSONError::StringError),
    }
}

/// Read four hex digits at `at`, yielding their value.
fn parse_hex4(buf: &[u8], at: usize) -> Result<u32> {
    if at + 4 > buf.len() {
        return Err(JSONError::UnclosedString);
    }
    let mut value: u32 = 0;
    for &b in &buf[at..at + 4] {
        let digit = match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'a'..=b'f' => (b - b'a' + 10) as u32,
            b'A'..=b'F' => (b - b'A' + 10) as u32,
            _ => return Err(JSONError::StringError),
        };
        value = (value << 4) | digit;
    }
    Ok(value)
}
