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
//! # json_diag - debugging serializers for parsed documents
//!
//! Two complementary views of a parsed document for tooling and debugging:
//!
//! - `print_json` re-serializes the tape as minified JSON. The output is escape-clean and
//!   re-parses to a structurally identical tape, so it doubles as a round-trip check.
//! - `dump_raw_tape` prints the tape one word per line with the tag mnemonic and the decoded
//!   payload, in the spirit of a disassembly listing.
use crate::document::Document;
use crate::element::{Element, ValueKind};
use crate::error::JSONError;
use crate::parse::JSONParser;
use crate::tape::{payload_of, tag_of, TapeType};

use std::io::{self, Write};

/// Trait defining the debugging serializers implemented by anything holding a parsed document.
pub trait Diag {
    /// Write the document as minified JSON.
    fn print_json(&self, outfp: &mut dyn Write) -> io::Result<()>;
    /// Write the raw tape, one word per line.
    fn dump_raw_tape(&self, outfp: &mut dyn Write) -> io::Result<()>;
}

impl Diag for Document {
    fn print_json(&self, outfp: &mut dyn Write) -> io::Result<()> {
        let root = self.root().map_err(to_io)?;
        write_element(&root, outfp)
    }

    fn dump_raw_tape(&self, outfp: &mut dyn Write) -> io::Result<()> {
        let tape = self.raw_tape();
        let mut index = 0;
        while index < tape.len() {
            let word = tape[index];
            write!(outfp, "{} : ", index)?;
            match TapeType::from_tag(tag_of(word)) {
                Some(TapeType::Root) => {
                    writeln!(outfp, "r\t// pointing to {}", payload_of(word))?
                }
                Some(TapeType::StartObject) => {
                    writeln!(outfp, "{{\t// pointing to {}", payload_of(word))?
                }
                Some(TapeType::EndObject) => {
                    writeln!(outfp, "}}\t// pointing to {}", payload_of(word))?
                }
                Some(TapeType::StartArray) => {
                    writeln!(outfp, "[\t// pointing to {}", payload_of(word))?
                }
                Some(TapeType::EndArray) => {
                    writeln!(outfp, "]\t// pointing to {}", payload_of(word))?
                }
                Some(TapeType::String) => {
                    let offset = payload_of(word) as usize;
                    let content = String::from_utf8_lossy(self.string_slice(offset));
                    writeln!(outfp, "\"\t// \"{}\" at offset {}", content, offset)?;
                }
                Some(TapeType::Int64) => {
                    index += 1;
                    writeln!(outfp, "l\t// {}", tape[index] as i64)?;
                }
                Some(TapeType::Uint64) => {
                    index += 1;
                    writeln!(outfp, "u\t// {}", tape[index])?;
                }
                Some(TapeType::Double) => {
                    index += 1;
                    writeln!(outfp, "d\t// {}", f64::from_bits(tape[index]))?;
                }
                Some(TapeType::True) => writeln!(outfp, "t")?,
                Some(TapeType::False) => writeln!(outfp, "f")?,
                Some(TapeType::Null) => writeln!(outfp, "n")?,
                None => writeln!(outfp, "??\t// {:#018x}", word)?,
            }
            index += 1;
        }
        Ok(())
    }
}

/// The parser serializes its current document, failing if no valid parse is held.
impl Diag for JSONParser {
    fn print_json(&self, outfp: &mut dyn Write) -> io::Result<()> {
        self.document().map_err(to_io)?.print_json(outfp)
    }

    fn dump_raw_tape(&self, outfp: &mut dyn Write) -> io::Result<()> {
        self.document().map_err(to_io)?.dump_raw_tape(outfp)
    }
}

fn to_io(e: JSONError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

/// Serialize one element, recursing into containers.
fn write_element(elem: &Element<'_>, outfp: &mut dyn Write) -> io::Result<()> {
    match elem.kind() {
        ValueKind::Null => write!(outfp, "null"),
        ValueKind::Bool => {
            if elem.as_bool().map_err(to_io)? {
                write!(outfp, "true")
            } else {
                write!(outfp, "false")
            }
        }
        ValueKind::Int64 => write!(outfp, "{}", elem.as_i64().map_err(to_io)?),
        ValueKind::Uint64 => write!(outfp, "{}", elem.as_u64().map_err(to_io)?),
        ValueKind::Double => write_double(elem.as_f64().map_err(to_io)?, outfp),
        ValueKind::String => write_json_string(elem.as_str().map_err(to_io)?, outfp),
        ValueKind::Array => {
            write!(outfp, "[")?;
            let mut first = true;
            for item in elem.as_array().map_err(to_io)? {
                if !first {
                    write!(outfp, ",")?;
                }
                first = false;
                write_element(&item, outfp)?;
            }
            write!(outfp, "]")
        }
        ValueKind::Object => {
            write!(outfp, "{{")?;
            let mut first = true;
            for pair in elem.as_object().map_err(to_io)? {
                if !first {
                    write!(outfp, ",")?;
                }
                first = false;
                write_json_string(pair.key().map_err(to_io)?, outfp)?;
                write!(outfp, ":")?;
                write_element(&pair.value(), outfp)?;
            }
            write!(outfp, "}}")
        }
    }
}

/// Write a double so that re-parsing reproduces both its value and its tape kind. Rust's
/// shortest-roundtrip formatting drops the decimal point on integral values, which would read
/// back as an integer word, so one is restored.
fn write_double(v: f64, outfp: &mut dyn Write) -> io::Result<()> {
    let lexeme = format!("{}", v);
    if lexeme.contains('.') || lexeme.contains('e') || lexeme.contains('E') {
        write!(outfp, "{}", lexeme)
    } else {
        write!(outfp, "{}.0", lexeme)
    }
}

/// Write a string with JSON escaping: quotes, backslashes and control characters.
fn write_json_string(s: &str, outfp: &mut dyn Write) -> io::Result<()> {
    write!(outfp, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(outfp, "\\\"")?,
            '\\' => write!(outfp, "\\\\")?,
            '\u{08}' => write!(outfp, "\\b")?,
            '\u{0c}' => write!(outfp, "\\f")?,
            '\n' => write!(outfp, "\\n")?,
            '\r' => write!(outfp, "\\r")?,
            '\t' => write!(outfp, "\\t")?,
            c if (c as u32) < 0x20 => write!(outfp, "\\u{:04x}", c as u32)?,
            c => write!(outfp, "{}", c)?,
        }
    }
    write!(outfp, "\"")
}
