//! Fixed JSON encoding for structured documents
//!
//! Documents go over the wire as the byte form produced here: keys in
//! insertion order, `", "` between items, `": "` after keys, and every
//! character outside printable ASCII written as a `\uXXXX` escape (two
//! escapes, a UTF-16 surrogate pair, above the BMP).

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use crate::error::{ClientError, ClientResult};

/// `serde_json` formatter producing the document encoding
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentFormatter;

impl Formatter for DocumentFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.bytes().all(is_printable_ascii) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && is_printable_ascii(ch as u8) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

fn is_printable_ascii(byte: u8) -> bool {
    (0x20..0x7f).contains(&byte)
}

/// Serialize `value` with [`DocumentFormatter`]
pub fn encode<T>(value: &T) -> ClientResult<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, DocumentFormatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| ClientError::invalid_argument(format!("document is not serializable: {e}")))?;
    Ok(buf)
}
