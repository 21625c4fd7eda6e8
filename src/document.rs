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
 * rs_minijson parsed document
 *
 * The product of a successful parse: the tape and the string store. A document is immutable once
 * produced and self-contained, so any number of views may read it, including from other threads.
 **************************************************************************************************/
use crate::element::Element;
use crate::error::{JSONError, Result};

use std::mem::size_of;

/// A parsed JSON document.
///
/// The `tape` is the depth-first encoding of the document tree as 64-bit words; `strings` is the
/// append-only store of decoded string payloads, each laid out as a little-endian `u32` length,
/// the UTF-8 content, and a single NUL byte.
///
/// A `Document` is produced by a parser and borrowed from it, or moved out of it with
/// `JSONParser::take_document`. It never changes after a successful parse.
#[derive(Debug, Default, Clone)]
pub struct Document {
    pub(crate) tape: Vec<u64>,
    pub(crate) strings: Vec<u8>,
}

impl Document {
    /// The top-level element of the document, positioned just after the opening document
    /// bracket on the tape.
    ///
    /// Fails with [`JSONError::Uninitialized`] on a document that has not been produced by a
    /// completed parse (for example one taken from a parser and then cloned from `Default`).
    pub fn root(&self) -> Result<Element<'_>> {
        if self.tape.len() < 2 {
            return Err(JSONError::Uninitialized);
        }
        Ok(Element::new(self, 1))
    }

    /// The raw tape words, exposed read-only for diagnostics and invariant checking.
    #[inline]
    pub fn raw_tape(&self) -> &[u64] {
        &self.tape
    }

    /// The raw string store bytes, exposed read-only for diagnostics and invariant checking.
    #[inline]
    pub fn raw_strings(&self) -> &[u8] {
        &self.strings
    }

    /// Reserve tape and string store space for inputs up to `capacity` bytes.
    ///
    /// The tape needs at worst one word per input byte, plus the two document brackets and the
    /// scalar follow-up word of a document that is a single number. The string store needs at
    /// worst the whole input plus the per-string length/terminator overhead covered by padding.
    pub(crate) fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        self.tape
            .try_reserve(capacity + 3)
            .map_err(|_| JSONError::MemAlloc)?;
        self.strings
            .try_reserve(capacity + crate::padded::PADDING)
            .map_err(|_| JSONError::MemAlloc)?;
        Ok(())
    }

    /// Decoded content of the string whose length prefix starts at `offset` in the string store.
    pub(crate) fn string_slice(&self, offset: usize) -> &[u8] {
        let len = self.string_len(offset);
        &self.strings[offset + size_of::<u32>()..offset + size_of::<u32>() + len]
    }

    /// As `string_slice`, but including the trailing NUL byte.
    pub(crate) fn string_slice_with_nul(&self, offset: usize) -> &[u8] {
        let len = self.string_len(offset);
        &self.strings[offset + size_of::<u32>()..offset + size_of::<u32>() + len + 1]
    }

    #[inline]
    fn string_len(&self, offset: usize) -> usize {
        let prefix = [
            self.strings[offset],
            self.strings[offset + 1],
            self.strings[offset + 2],
            self.strings[offset + 3],
        ];
        u32::from_le_bytes(prefix) as usize
    }
}
