//! Byte-stream adapters for text encodings other than UTF-8.
//!
//! The parser itself reads UTF-8. These functions put an [`encoding_rs`]
//! decoder in front of it (or an encoder behind the serializer) so callers can
//! read and write JSON in any WHATWG encoding, chosen either as an
//! [`Encoding`] or by label.
//!
//! On input, a byte-order mark matching the chosen encoding is stripped.
//! Bytes that are malformed in the encoding fail the parse with an
//! [`Error::Io`] of kind [`InvalidData`](io::ErrorKind::InvalidData).
//!
//! ```rust
//! use strict_json::encoding::{from_slice_with_encoding, to_writer_with_label};
//! use strict_json::JsonValue;
//!
//! let bytes = b"\xff\xfe[\x001\x00]\x00"; // UTF-16LE with BOM
//! let value = from_slice_with_encoding(bytes, encoding_rs::UTF_16LE).unwrap();
//! assert_eq!(value, JsonValue::from(vec![JsonValue::from(1)]));
//!
//! let mut out = Vec::new();
//! to_writer_with_label(&mut out, &JsonValue::from("café"), "latin1").unwrap();
//! assert_eq!(out, b"\"caf\xe9\"");
//! ```

use crate::options::{ParseOptions, WriteOptions, DEFAULT_BUFFER_SIZE};
use crate::{Error, JsonValue, Result};
use encoding_rs::{Decoder, DecoderResult, Encoding, UTF_16BE, UTF_16LE};
use std::io::{self, Read, Write};

/// Parses one JSON document from bytes in `encoding`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_encoding<R: Read>(
    reader: R,
    encoding: &'static Encoding,
) -> Result<JsonValue> {
    crate::from_reader_with_options(
        DecodeReader::new(reader, encoding),
        ParseOptions::default(),
    )
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice_with_encoding(bytes: &[u8], encoding: &'static Encoding) -> Result<JsonValue> {
    from_reader_with_encoding(bytes, encoding)
}

/// Parses one JSON document from bytes in the encoding named by `label`,
/// such as `"utf-16le"` or `"windows-1252"`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_label<R: Read>(reader: R, label: &str) -> Result<JsonValue> {
    from_reader_with_encoding(reader, lookup(label)?)
}

/// Writes compact JSON text to `writer` in `encoding`.
///
/// Fails with [`Error::Unmappable`] if a string holds a character the
/// encoding cannot represent; nothing is written in that case.
pub fn to_writer_with_encoding<W: Write>(
    mut writer: W,
    value: &JsonValue,
    encoding: &'static Encoding,
) -> Result<()> {
    let text = crate::to_string_with_options(value, &WriteOptions::default());
    let bytes = encode(&text, encoding)?;
    writer.write_all(&bytes)?;
    Ok(())
}

pub fn to_writer_with_label<W: Write>(writer: W, value: &JsonValue, label: &str) -> Result<()> {
    to_writer_with_encoding(writer, value, lookup(label)?)
}

fn lookup(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

fn encode(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>> {
    // encoding_rs only decodes UTF-16; its encoders fall back to UTF-8
    if encoding == UTF_16LE || encoding == UTF_16BE {
        let big_endian = encoding == UTF_16BE;
        let mut out = Vec::with_capacity(text.len() * 2);
        for unit in text.encode_utf16() {
            let bytes = if big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            };
            out.extend_from_slice(&bytes);
        }
        return Ok(out);
    }

    // encoding_rs would silently write the output encoding instead
    if encoding.output_encoding() != encoding {
        return Err(Error::UnwritableEncoding(encoding.name()));
    }

    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(Error::Unmappable(encoding.name()));
    }
    Ok(bytes.into_owned())
}

/// An `io::Read` yielding UTF-8 decoded incrementally from another encoding.
struct DecodeReader<R> {
    inner: R,
    decoder: Decoder,
    input: Box<[u8]>,
    in_pos: usize,
    in_len: usize,
    output: Box<[u8]>,
    out_pos: usize,
    out_len: usize,
    eof: bool,
    done: bool,
}

impl<R: Read> DecodeReader<R> {
    fn new(inner: R, encoding: &'static Encoding) -> Self {
        DecodeReader {
            inner,
            decoder: encoding.new_decoder_with_bom_removal(),
            input: vec![0; DEFAULT_BUFFER_SIZE].into_boxed_slice(),
            in_pos: 0,
            in_len: 0,
            output: vec![0; DEFAULT_BUFFER_SIZE].into_boxed_slice(),
            out_pos: 0,
            out_len: 0,
            eof: false,
            done: false,
        }
    }

    fn fill_input(&mut self) -> io::Result<()> {
        loop {
            match self.inner.read(&mut self.input) {
                Ok(n) => {
                    self.in_pos = 0;
                    self.in_len = n;
                    self.eof = n == 0;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> Read for DecodeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if self.out_pos < self.out_len {
                let n = buf.len().min(self.out_len - self.out_pos);
                buf[..n].copy_from_slice(&self.output[self.out_pos..self.out_pos + n]);
                self.out_pos += n;
                return Ok(n);
            }
            if self.done {
                return Ok(0);
            }
            if self.in_pos == self.in_len && !self.eof {
                self.fill_input()?;
            }

            let (result, read, written) = self.decoder.decode_to_utf8_without_replacement(
                &self.input[self.in_pos..self.in_len],
                &mut self.output,
                self.eof,
            );
            self.in_pos += read;
            self.out_pos = 0;
            self.out_len = written;
            match result {
                DecoderResult::InputEmpty => self.done = self.eof,
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(_, _) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "stream did not contain valid {}",
                            self.decoder.encoding().name()
                        ),
                    ));
                }
            }
        }
    }
}
