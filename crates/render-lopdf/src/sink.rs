//! Append-only serialization of operators to a byte writer.

use folio_render_core::{OperatorSink, RenderError};
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use std::io::{self, Write};

/// Writes each operator as soon as it is pushed, one per line. Nothing is
/// buffered beyond the writer itself.
pub struct StreamSink<W: Write> {
    writer: W,
    count: usize,
    bytes_written: usize,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OperatorSink for StreamSink<W> {
    fn push(&mut self, operation: Operation) -> Result<(), RenderError> {
        let mut line: Vec<u8> = Vec::with_capacity(32);
        for operand in &operation.operands {
            write_object(&mut line, operand)?;
            line.push(b' ');
        }
        line.extend_from_slice(operation.operator.as_bytes());
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.count += 1;
        self.bytes_written += line.len();
        Ok(())
    }

    fn operation_count(&self) -> usize {
        self.count
    }
}

fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
    match object {
        Object::Null => writer.write_all(b"null"),
        Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
        Object::Integer(i) => write!(writer, "{}", i),
        Object::Real(r) => writer.write_all(format_real(*r).as_bytes()),
        Object::Name(n) => write_name(writer, n),
        Object::String(s, format) => match format {
            StringFormat::Literal => {
                writer.write_all(b"(")?;
                writer.write_all(&escape_literal(s))?;
                writer.write_all(b")")
            }
            StringFormat::Hexadecimal => {
                write!(writer, "<{}>", s.iter().map(|b| format!("{:02X}", b)).collect::<String>())
            }
        },
        Object::Array(arr) => {
            writer.write_all(b"[")?;
            for (i, obj) in arr.iter().enumerate() {
                if i > 0 {
                    writer.write_all(b" ")?;
                }
                write_object(writer, obj)?;
            }
            writer.write_all(b"]")
        }
        Object::Dictionary(dict) => {
            writer.write_all(b"<<")?;
            for (key, value) in dict.iter() {
                write_name(writer, key)?;
                writer.write_all(b" ")?;
                write_object(writer, value)?;
                writer.write_all(b" ")?;
            }
            writer.write_all(b">>")
        }
        Object::Stream(_) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "streams cannot appear as operands",
        )),
        Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
    }
}

/// Escapes the bytes of a literal string body.
pub fn escape_literal(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            _ => out.push(b),
        }
    }
    out
}

fn write_name(writer: &mut dyn Write, name: &[u8]) -> io::Result<()> {
    writer.write_all(b"/")?;
    for &b in name {
        if b.is_ascii_graphic() && !b"()<>[]{}/%#".contains(&b) {
            writer.write_all(&[b])?;
        } else {
            write!(writer, "#{:02X}", b)?;
        }
    }
    Ok(())
}

/// Up to four decimals with trailing zeros removed.
fn format_real(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        return format!("{}", value as i64);
    }
    let text = format!("{value:.4}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
