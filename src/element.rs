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
 * rs_minijson element view
 *
 * An `Element` is a read-only handle (document, tape index) identifying one JSON value. Elements
 * are cheap to copy and may not outlive the document they borrow from - this is the 'doc
 * lifetime.
 **************************************************************************************************/
use crate::array::Array;
use crate::document::Document;
use crate::error::{JSONError, Result};
use crate::object::Object;
use crate::tape::{payload_of, tag_of, TapeType};

use std::convert::TryFrom;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// The kind of JSON value an element identifies.
///
/// Signed, unsigned and floating point numbers are distinguished because they are stored with
/// different tape tags; the cross-kind promotions performed by the typed extractors are
/// documented on each `as_*` function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int64,
    Uint64,
    Double,
    String,
    Array,
    Object,
}

/// One JSON value, positioned at its tag word on the tape.
#[derive(Debug, Copy, Clone)]
pub struct Element<'doc> {
    doc: &'doc Document,
    index: usize,
}

impl<'doc> Element<'doc> {
    /// Construct a view of the value whose tag word is at `index`.
    #[inline]
    pub(crate) fn new(doc: &'doc Document, index: usize) -> Element<'doc> {
        Element { doc, index }
    }

    #[inline]
    pub(crate) fn document(&self) -> &'doc Document {
        self.doc
    }

    /// Tape index of this element's tag word.
    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    fn word(&self) -> u64 {
        self.doc.tape[self.index]
    }

    /// The 56-bit payload of this element's tag word.
    #[inline]
    pub(crate) fn payload(&self) -> u64 {
        payload_of(self.word())
    }

    /// The raw-bits word following a numeric tag.
    #[inline]
    fn scalar_word(&self) -> u64 {
        self.doc.tape[self.index + 1]
    }

    #[inline]
    pub(crate) fn tape_type(&self) -> Option<TapeType> {
        TapeType::from_tag(tag_of(self.word()))
    }

    /// Tape index of the next sibling: one past a plain leaf, two past a numeric scalar and its
    /// raw-bits word, and one past the matching close word of a container.
    pub(crate) fn after_element(&self) -> usize {
        match self.tape_type() {
            Some(TapeType::StartArray) | Some(TapeType::StartObject) => {
                self.payload() as usize + 1
            }
            Some(TapeType::Int64) | Some(TapeType::Uint64) | Some(TapeType::Double) => {
                self.index + 2
            }
            _ => self.index + 1,
        }
    }

    /// The kind of value this element identifies.
    pub fn kind(&self) -> ValueKind {
        match self.tape_type() {
            Some(TapeType::True) | Some(TapeType::False) => ValueKind::Bool,
            Some(TapeType::Int64) => ValueKind::Int64,
            Some(TapeType::Uint64) => ValueKind::Uint64,
            Some(TapeType::Double) => ValueKind::Double,
            Some(TapeType::String) => ValueKind::String,
            Some(TapeType::StartArray) => ValueKind::Array,
            Some(TapeType::StartObject) => ValueKind::Object,
            _ => ValueKind::Null,
        }
    }

    /// Return `true` if the element is the JSON atom `null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.tape_type() == Some(TapeType::Null)
    }

    /// Return `true` if the element is `true` or `false`.
    #[inline]
    pub fn is_bool(&self) -> bool {
        self.kind() == ValueKind::Bool
    }

    /// Return `true` if the element is any number: signed, unsigned or floating point.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(
            self.kind(),
            ValueKind::Int64 | ValueKind::Uint64 | ValueKind::Double
        )
    }

    /// Return `true` if the element is an integer, signed or unsigned.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self.kind(), ValueKind::Int64 | ValueKind::Uint64)
    }

    /// Return `true` if the element is a string.
    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind() == ValueKind::String
    }

    /// Return `true` if the element is an array.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.kind() == ValueKind::Array
    }

    /// Return `true` if the element is an object.
    #[inline]
    pub fn is_object(&self) -> bool {
        self.kind() == ValueKind::Object
    }

    /// Extract a `bool`. Fails with `IncorrectType` on anything but `true` and `false`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_bool(&self) -> Result<bool> {
        match self.tape_type() {
            Some(TapeType::True) => Ok(true),
            Some(TapeType::False) => Ok(false),
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// Borrow the decoded content of a string element.
    ///
    /// # Lifetime
    ///
    /// The returned `str` borrows from the document's string store, not from this element, so it
    /// lives as long as the document itself.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_str(&self) -> Result<&'doc str> {
        match self.tape_type() {
            Some(TapeType::String) => {
                let bytes = self.doc.string_slice(self.payload() as usize);
                std::str::from_utf8(bytes).map_err(|_| JSONError::UTF8Error)
            }
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// Borrow the decoded content of a string element as a NUL-terminated byte run.
    ///
    /// The final byte of the returned slice is the `0x00` terminator the string store writes
    /// after every entry. Note that a JSON string may itself contain an escaped NUL, in which
    /// case the run contains interior NUL bytes as well.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_c_str(&self) -> Result<&'doc [u8]> {
        match self.tape_type() {
            Some(TapeType::String) => Ok(self.doc.string_slice_with_nul(self.payload() as usize)),
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// Extract a `u64`.
    ///
    /// A signed integer element converts iff it is non-negative; a negative one fails with
    /// `NumberOutOfRange`. Every other kind fails with `IncorrectType`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_u64(&self) -> Result<u64> {
        match self.tape_type() {
            Some(TapeType::Uint64) => Ok(self.scalar_word()),
            Some(TapeType::Int64) => {
                let v = self.scalar_word() as i64;
                if v < 0 {
                    Err(JSONError::NumberOutOfRange)
                } else {
                    Ok(v as u64)
                }
            }
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// Extract an `i64`.
    ///
    /// An unsigned integer element converts iff it is at most `i64::MAX`; above that it fails
    /// with `NumberOutOfRange`. Every other kind fails with `IncorrectType`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_i64(&self) -> Result<i64> {
        match self.tape_type() {
            Some(TapeType::Int64) => Ok(self.scalar_word() as i64),
            Some(TapeType::Uint64) => {
                let v = self.scalar_word();
                if v > i64::MAX as u64 {
                    Err(JSONError::NumberOutOfRange)
                } else {
                    Ok(v as i64)
                }
            }
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// Extract an `f64`.
    ///
    /// A floating point element yields its exact bit pattern. Signed and unsigned integer
    /// elements convert with the usual (possibly lossy) integer-to-double conversion. Every
    /// other kind fails with `IncorrectType`.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_f64(&self) -> Result<f64> {
        match self.tape_type() {
            Some(TapeType::Double) => Ok(f64::from_bits(self.scalar_word())),
            Some(TapeType::Uint64) => Ok(self.scalar_word() as f64),
            Some(TapeType::Int64) => Ok((self.scalar_word() as i64) as f64),
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// View the element as an array. Fails with `IncorrectType` on any other kind.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_array(&self) -> Result<Array<'doc>> {
        match self.tape_type() {
            Some(TapeType::StartArray) => Ok(Array::new(*self)),
            _ => Err(JSONError::IncorrectType),
        }
    }

    /// View the element as an object. Fails with `IncorrectType` on any other kind.
    #[cfg_attr(feature = "trace", trace)]
    pub fn as_object(&self) -> Result<Object<'doc>> {
        match self.tape_type() {
            Some(TapeType::StartObject) => Ok(Object::new(*self)),
            _ => Err(JSONError::IncorrectType),
        }
    }
}

/// Two elements are equal when they denote the same tape position of the same document.
impl<'doc> PartialEq for Element<'doc> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

/***************************************************************************************************
 * Standard Trait Implementations: Try to convert an Element into a value. Always fallible
 **************************************************************************************************/

/// Attempt to convert an Element into bool
impl<'doc> TryFrom<Element<'doc>> for bool {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_bool()
    }
}

/// Attempt to convert an Element into u8
impl<'doc> TryFrom<Element<'doc>> for u8 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        let v = value.as_u64()?;
        if v <= u8::MAX as u64 {
            Ok(v as u8)
        } else {
            Err(JSONError::NumberOutOfRange)
        }
    }
}

/// Attempt to convert an Element into u16
impl<'doc> TryFrom<Element<'doc>> for u16 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        let v = value.as_u64()?;
        if v <= u16::MAX as u64 {
            Ok(v as u16)
        } else {
            Err(JSONError::NumberOutOfRange)
        }
    }
}

/// Attempt to convert an Element into u32
impl<'doc> TryFrom<Element<'doc>> for u32 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        let v = value.as_u64()?;
        if v <= u32::MAX as u64 {
            Ok(v as u32)
        } else {
            Err(JSONError::NumberOutOfRange)
        }
    }
}

/// Attempt to convert an Element into u64
impl<'doc> TryFrom<Element<'doc>> for u64 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_u64()
    }
}

/// Attempt to convert an Element into i8
///
/// This will fail, for unsigned values, if n > i8::MAX
/// This will fail, for signed values, if n < i8::MIN
impl<'doc> TryFrom<Element<'doc>> for i8 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        let v = value.as_i64()?;
        if v >= i8::MIN as i64 && v <= i8::MAX as i64 {
            Ok(v as i8)
        } else {
            Err(JSONError::NumberOutOfRange)
        }
    }
}

/// Attempt to convert an Element into i16
///
/// This will fail, for unsigned values, if n > i16::MAX
/// This will fail, for signed values, if n < i16::MIN
impl<'doc> TryFrom<Element<'doc>> for i16 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        let v = value.as_i64()?;
        if v >= i16::MIN as i64 && v <= i16::MAX as i64 {
            Ok(v as i16)
        } else {
            Err(JSONError::NumberOutOfRange)
        }
    }
}

/// Attempt to convert an Element into i32
///
/// This will fail, for unsigned values, if n > i32::MAX
/// This will fail, for signed values, if n < i32::MIN
impl<'doc> TryFrom<Element<'doc>> for i32 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        let v = value.as_i64()?;
        if v >= i32::MIN as i64 && v <= i32::MAX as i64 {
            Ok(v as i32)
        } else {
            Err(JSONError::NumberOutOfRange)
        }
    }
}

/// Attempt to convert an Element into i64
impl<'doc> TryFrom<Element<'doc>> for i64 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_i64()
    }
}

/// Attempt to convert an Element into f64
impl<'doc> TryFrom<Element<'doc>> for f64 {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_f64()
    }
}

/// Attempt to convert an Element into a &str
///
/// # Lifetime
///
/// The lifetime of the str is the lifetime of the document whose string store it borrows.
impl<'doc> TryFrom<Element<'doc>> for &'doc str {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_str()
    }
}

/// Attempt to convert an Element into an Array view
impl<'doc> TryFrom<Element<'doc>> for Array<'doc> {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_array()
    }
}

/// Attempt to convert an Element into an Object view
impl<'doc> TryFrom<Element<'doc>> for Object<'doc> {
    type Error = JSONError;

    fn try_from(value: Element<'doc>) -> Result<Self> {
        value.as_object()
    }
}
