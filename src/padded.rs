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
 * rs_minijson padded input buffer
 *
 * Structural stages are allowed to read a fixed number of bytes beyond the logical end of the
 * input (a SIMD stage loads full vector registers at the tail). `PaddedBytes` owns an input copy
 * with that slack guaranteed, so such stages can be driven without a further copy.
 **************************************************************************************************/

/// Number of readable bytes guaranteed beyond the logical input length. One SIMD word.
pub const PADDING: usize = 32;

/// An owned byte buffer of `len + PADDING` readable bytes, of which the first `len` are the
/// input. The padding bytes are zero, but stages must not rely on their content.
#[derive(Debug, Clone)]
pub struct PaddedBytes {
    bytes: Vec<u8>,
    len: usize,
}

impl PaddedBytes {
    /// Logical input length in bytes, excluding padding.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the logical input is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The full buffer, `len() + PADDING` bytes long.
    #[inline]
    pub fn as_padded_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The logical input, without padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Copy a byte slice into a freshly padded buffer.
impl From<&[u8]> for PaddedBytes {
    fn from(v: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(v.len() + PADDING);
        bytes.extend_from_slice(v);
        bytes.resize(v.len() + PADDING, 0);
        PaddedBytes { bytes, len: v.len() }
    }
}

/// Copy a string slice into a freshly padded buffer.
impl From<&str> for PaddedBytes {
    fn from(v: &str) -> Self {
        PaddedBytes::from(v.as_bytes())
    }
}

/// Take ownership of a byte vector, extending it in place with padding.
impl From<Vec<u8>> for PaddedBytes {
    fn from(mut bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        bytes.resize(len + PADDING, 0);
        PaddedBytes { bytes, len }
    }
}

/// Take ownership of a string, extending its bytes in place with padding.
impl From<String> for PaddedBytes {
    fn from(v: String) -> Self {
        PaddedBytes::from(v.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_readable_and_length_is_logical() {
        let p = PaddedBytes::from("[1]");
        assert_eq!(p.len(), 3);
        assert_eq!(p.as_bytes(), b"[1]");
        assert_eq!(p.as_padded_bytes().len(), 3 + PADDING);
    }

    #[test]
    fn owned_vec_is_padded_in_place() {
        let p = PaddedBytes::from(b"{}".to_vec());
        assert_eq!(p.len(), 2);
        assert_eq!(&p.as_padded_bytes()[2..], &[0u8; PADDING][..]);
    }
}
