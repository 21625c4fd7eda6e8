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
 * rs_minijson JSON Object view
 *
 * A view over an object opener word on the tape, exposing the fields as key/value pairs with an
 * exposed map-like API.
 **************************************************************************************************/
use crate::document::Document;
use crate::element::Element;
use crate::error::{JSONError, Result};

use std::convert::TryFrom;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// A view over a JSON object. The view has lifetime `'doc`, bounded by the document it reads.
///
/// Fields are stored on the tape in document order as a string word (the key) immediately
/// followed by the value. Lookup by key is a linear scan; objects in hot paths should be
/// iterated once rather than probed repeatedly.
#[derive(Debug, Copy, Clone)]
pub struct Object<'doc> {
    elem: Element<'doc>,
}

impl<'doc> Object<'doc> {
    /// Construct a view from an element already known to sit on an object opener word.
    #[inline]
    pub(crate) fn new(elem: Element<'doc>) -> Object<'doc> {
        Object { elem }
    }

    /// The object as a plain element (the opener word).
    #[inline]
    pub fn as_element(&self) -> Element<'doc> {
        self.elem
    }

    /// Tape index of the first key word, one past the opener.
    #[inline]
    fn begin_index(&self) -> usize {
        self.elem.index() + 1
    }

    /// Tape index of the matching close word.
    #[inline]
    fn end_index(&self) -> usize {
        self.elem.payload() as usize
    }

    /// Return `true` if the object has no fields.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin_index() == self.end_index()
    }

    /// Return the number of fields in the object.
    ///
    /// The tape does not record field counts, so this walks the object in O(n).
    #[cfg_attr(feature = "trace", trace)]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Return the value of the field named `key`, or `None` if no such field exists.
    ///
    /// When a key occurs more than once the first occurrence in document order wins.
    #[cfg_attr(feature = "trace", trace)]
    pub fn get(&self, key: &str) -> Option<Element<'doc>> {
        self.iter()
            .find(|pair| pair.key() == Ok(key))
            .map(|pair| pair.value())
    }

    /// Look up a value by key and convert it to any type with a `TryFrom<Element>` instance.
    ///
    /// Lookup is fallible - the function returns an error if the requested key is not present
    /// in the object, and the conversion's own error if the value has the wrong type.
    pub fn lookup<V>(&self, key: &str) -> Result<V>
    where
        V: TryFrom<Element<'doc>, Error = JSONError>,
    {
        match self.get(key) {
            Some(elem) => V::try_from(elem),
            None => Err(JSONError::KeyNotPresent),
        }
    }

    /// Return `true` if the object contains a field named `key`.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over the fields of the object in document order.
    #[inline]
    pub fn iter(&self) -> PairIter<'doc> {
        PairIter {
            doc: self.elem.document(),
            index: self.begin_index(),
            end: self.end_index(),
        }
    }
}

impl<'doc> IntoIterator for Object<'doc> {
    type Item = KeyValuePair<'doc>;
    type IntoIter = PairIter<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'doc> IntoIterator for &Object<'doc> {
    type Item = KeyValuePair<'doc>;
    type IntoIter = PairIter<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One field of an object: a view positioned at the string word naming the field, with the
/// field's value beginning at the next tape index.
#[derive(Debug, Copy, Clone)]
pub struct KeyValuePair<'doc> {
    doc: &'doc Document,
    index: usize,
}

impl<'doc> KeyValuePair<'doc> {
    /// The field name.
    ///
    /// The key word is written by the parser and guaranteed to be a string, so the only failure
    /// mode is a corrupted store, reported as `UTF8Error`.
    pub fn key(&self) -> Result<&'doc str> {
        Element::new(self.doc, self.index).as_str()
    }

    /// The field name as a NUL-terminated byte run borrowed from the string store.
    pub fn key_c_str(&self) -> Result<&'doc [u8]> {
        Element::new(self.doc, self.index).as_c_str()
    }

    /// The field value.
    #[inline]
    pub fn value(&self) -> Element<'doc> {
        Element::new(self.doc, self.index + 1)
    }
}

/// Two pairs are equal when they denote the same tape position of the same document.
impl<'doc> PartialEq for KeyValuePair<'doc> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

/// Iterator adapter walking the key/value pairs between an object opener and its matching close.
#[derive(Debug, Copy, Clone)]
pub struct PairIter<'doc> {
    doc: &'doc Document,
    index: usize,
    end: usize,
}

impl<'doc> Iterator for PairIter<'doc> {
    type Item = KeyValuePair<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.end {
            let pair = KeyValuePair {
                doc: self.doc,
                index: self.index,
            };
            self.index = pair.value().after_element();
            Some(pair)
        } else {
            None
        }
    }
}
