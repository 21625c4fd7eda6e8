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
 * rs_minijson tape word encoding
 *
 * Every parsed document is a vector of 64-bit tape words. A word carries an 8-bit type tag in its
 * most significant byte and a 56-bit payload below it. Numeric tags are followed by one extra
 * word holding the raw bits of the value.
 **************************************************************************************************/

/// Bitmask selecting the 56-bit payload of a tape word.
pub const TAPE_VALUE_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;

/// Number of bits the type tag is shifted left within a tape word.
pub const TAPE_TAG_SHIFT: u32 = 56;

/// The type tag stored in the most significant byte of a tape word.
///
/// Discriminants are the ASCII bytes used by the raw tape dump, so a dumped tape reads naturally:
/// `r` brackets the document, `{`/`}` and `[`/`]` bracket containers, and scalar tags are the
/// initial letter of the value kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum TapeType {
    /// Document bracket. The word at index 0 and the last written word; each holds the other's
    /// tape index in its payload.
    Root = b'r',
    /// Object opener; payload is the tape index of the matching `EndObject`.
    StartObject = b'{',
    /// Object closer; payload is the tape index of the matching `StartObject`.
    EndObject = b'}',
    /// Array opener; payload is the tape index of the matching `EndArray`.
    StartArray = b'[',
    /// Array closer; payload is the tape index of the matching `StartArray`.
    EndArray = b']',
    /// String; payload is the byte offset of the length prefix in the string store.
    String = b'"',
    /// Signed integer; the next tape word holds the raw bits of an `i64`.
    Int64 = b'l',
    /// Unsigned integer; the next tape word holds the raw bits of a `u64`.
    Uint64 = b'u',
    /// Floating point; the next tape word holds the raw bits of an IEEE-754 `f64`.
    Double = b'd',
    True = b't',
    False = b'f',
    Null = b'n',
}

impl TapeType {
    /// Decode a tag byte back into a `TapeType`. Returns `None` for a byte that is not a tag,
    /// which on a well-formed tape can only happen if a caller reads a scalar follow-up word as
    /// if it were tagged.
    pub fn from_tag(tag: u8) -> Option<TapeType> {
        match tag {
            b'r' => Some(TapeType::Root),
            b'{' => Some(TapeType::StartObject),
            b'}' => Some(TapeType::EndObject),
            b'[' => Some(TapeType::StartArray),
            b']' => Some(TapeType::EndArray),
            b'"' => Some(TapeType::String),
            b'l' => Some(TapeType::Int64),
            b'u' => Some(TapeType::Uint64),
            b'd' => Some(TapeType::Double),
            b't' => Some(TapeType::True),
            b'f' => Some(TapeType::False),
            b'n' => Some(TapeType::Null),
            _ => None,
        }
    }
}

/// Pack a payload and a type tag into a tape word.
#[inline]
pub fn pack(payload: u64, tag: TapeType) -> u64 {
    (payload & TAPE_VALUE_MASK) | ((tag as u64) << TAPE_TAG_SHIFT)
}

/// Extract the tag byte of a tape word.
#[inline]
pub fn tag_of(word: u64) -> u8 {
    (word >> TAPE_TAG_SHIFT) as u8
}

/// Extract the 56-bit payload of a tape word.
#[inline]
pub fn payload_of(word: u64) -> u64 {
    word & TAPE_VALUE_MASK
}
