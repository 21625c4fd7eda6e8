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
 * rs_minijson JSON Array view
 *
 * A view over an array opener word on the tape, exposing iteration and positional access over
 * the array's elements.
 **************************************************************************************************/
use crate::document::Document;
use crate::element::Element;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// A view over a JSON array. The view has lifetime `'doc`, bounded by the document it reads.
///
/// Iteration walks the tape from the word after the opener to the matching close word, stepping
/// over nested containers in one hop via their patched matching index.
#[derive(Debug, Copy, Clone)]
pub struct Array<'doc> {
    elem: Element<'doc>,
}

impl<'doc> Array<'doc> {
    /// Construct a view from an element already known to sit on an array opener word.
    #[inline]
    pub(crate) fn new(elem: Element<'doc>) -> Array<'doc> {
        Array { elem }
    }

    /// The array as a plain element (the opener word).
    #[inline]
    pub fn as_element(&self) -> Element<'doc> {
        self.elem
    }

    /// Tape index of the first element, one past the opener.
    #[inline]
    fn begin_index(&self) -> usize {
        self.elem.index() + 1
    }

    /// Tape index of the matching close word.
    #[inline]
    fn end_index(&self) -> usize {
        self.elem.payload() as usize
    }

    /// Return `true` if the array has no elements.
    #[cfg_attr(feature = "trace", trace)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin_index() == self.end_index()
    }

    /// Return the number of elements in the array.
    ///
    /// The tape does not record element counts, so this walks the array in O(n).
    #[cfg_attr(feature = "trace", trace)]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Return the `n`th element (zero indexed) of the array.
    ///
    /// Worst case performance of this function is O(n) in standalone form, but performance is
    /// likely to be O(n^2) if used for random access in general.
    #[cfg_attr(feature = "trace", trace)]
    pub fn index(&self, n: usize) -> Option<Element<'doc>> {
        self.iter().nth(n)
    }

    /// Iterate over the elements of the array.
    #[inline]
    pub fn iter(&self) -> ElementIter<'doc> {
        ElementIter {
            doc: self.elem.document(),
            index: self.begin_index(),
            end: self.end_index(),
        }
    }
}

impl<'doc> IntoIterator for Array<'doc> {
    type Item = Element<'doc>;
    type IntoIter = ElementIter<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'doc> IntoIterator for &Array<'doc> {
    type Item = Element<'doc>;
    type IntoIter = ElementIter<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator adapter walking sibling elements between an array opener and its matching close.
#[derive(Debug, Copy, Clone)]
pub struct ElementIter<'doc> {
    doc: &'doc Document,
    index: usize,
    end: usize,
}

impl<'doc> Iterator for ElementIter<'doc> {
    type Item = Element<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.end {
            let elem = Element::new(self.doc, self.index);
            self.index = elem.after_element();
            Some(elem)
        } else {
            None
        }
    }
}
