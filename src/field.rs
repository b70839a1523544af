//! Labeled field tree produced by the decoders.
use std::fmt;
use std::mem;

use crate::bits::BitReader;
use crate::{ErrorKind, Result};

/// A decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: &'static str,

    /// Position of the first bit of the field within the packet.
    pub offset: u64,

    /// Width of the field in bits.
    ///
    /// Values synthesized from other fields (e.g., the reconstructed `scr`)
    /// have a width of zero.
    pub bit_len: u64,

    /// Decoded value.
    pub value: FieldValue,
}
impl Field {
    /// Returns the unsigned value of this field, if it is a scalar.
    pub fn as_u64(&self) -> Option<u64> {
        match self.value {
            FieldValue::Uint { value, .. } => Some(value),
            FieldValue::Bool(b) => Some(b as u64),
            _ => None,
        }
    }

    /// Returns the symbolic annotation of this field.
    pub fn sym(&self) -> Option<&'static str> {
        match self.value {
            FieldValue::Uint { sym, .. } => sym,
            _ => None,
        }
    }

    /// Returns the bytes of a raw field.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self.value {
            FieldValue::Raw(ref bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the children of a struct or array field.
    pub fn children(&self) -> &[Field] {
        match self.value {
            FieldValue::Struct(ref fields) | FieldValue::Array(ref fields) => &fields[..],
            _ => &[],
        }
    }

    /// Returns the first child named `name`.
    pub fn get(&self, name: &str) -> Option<&Field> {
        find(self.children(), name)
    }
}

/// The value carried by a `Field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Unsigned integer with an optional symbolic name.
    Uint {
        /// Numeric value.
        value: u64,
        /// Symbolic name looked up from a table.
        sym: Option<&'static str>,
    },

    /// One bit flag.
    Bool(bool),

    /// Opaque bits.
    Raw(Vec<u8>),

    /// Named sub-fields.
    Struct(Vec<Field>),

    /// Repeated sub-fields.
    Array(Vec<Field>),
}

/// Returns the first field in `fields` named `name`.
pub fn find<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.name == name)
}

/// Follows a `/`-separated path of field names (e.g., `"extension/pts_dts/pts"`).
pub fn find_path<'a>(fields: &'a [Field], path: &str) -> Option<&'a Field> {
    let mut names = path.split('/');
    let mut field = find(fields, names.next()?)?;
    for name in names {
        field = field.get(name)?;
    }
    Some(field)
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
impl Field {
    fn fmt_indented(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.name, width = depth * 2)?;
        match self.value {
            FieldValue::Uint { value, sym } => {
                write!(f, ": {} (0x{:x})", value, value)?;
                if let Some(sym) = sym {
                    write!(f, " ({})", sym)?;
                }
                writeln!(f)
            }
            FieldValue::Bool(b) => writeln!(f, ": {}", b),
            FieldValue::Raw(ref bytes) => {
                write!(f, ": raw bits {}", self.bit_len)?;
                for b in bytes.iter().take(16) {
                    write!(f, " {:02x}", b)?;
                }
                if bytes.len() > 16 {
                    write!(f, " ...")?;
                }
                writeln!(f)
            }
            FieldValue::Struct(ref fields) | FieldValue::Array(ref fields) => {
                writeln!(f, "{{}}")?;
                for field in fields {
                    field.fmt_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// A bit reader that records every field it reads.
#[derive(Debug)]
pub struct FieldReader<'a> {
    reader: BitReader<'a>,
    fields: Vec<Field>,
    strict_markers: bool,
}
impl<'a> FieldReader<'a> {
    /// Makes a new `FieldReader` instance.
    pub fn new(data: &'a [u8], strict_markers: bool) -> Self {
        FieldReader {
            reader: BitReader::new(data),
            fields: Vec::new(),
            strict_markers,
        }
    }

    /// Returns the underlying bit reader.
    pub fn bits(&self) -> &BitReader<'a> {
        &self.reader
    }

    /// Returns the number of bits that can still be read.
    pub fn bits_left(&self) -> u64 {
        self.reader.bits_left()
    }

    /// Returns `true` if fields with fixed values are validated.
    pub fn strict_markers(&self) -> bool {
        self.strict_markers
    }

    /// Returns the fields read so far, at the current nesting level.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Converts `FieldReader` into the fields it has read.
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// Reads the next `bits` bits without consuming them.
    pub fn peek_bits(&mut self, bits: u32) -> Result<u64> {
        track!(self.reader.peek_bits(bits))
    }

    /// Reads and records an unsigned field.
    pub fn field_u(&mut self, name: &'static str, bits: u32) -> Result<u64> {
        track!(self.field_u_sym(name, bits, |_| None))
    }

    /// Reads and records an unsigned field annotated by `sym`.
    pub fn field_u_sym<F>(&mut self, name: &'static str, bits: u32, sym: F) -> Result<u64>
    where
        F: FnOnce(u64) -> Option<&'static str>,
    {
        let offset = self.reader.position();
        let value = track!(self.reader.read_bits(bits), "field={}", name)?;
        self.push(name, offset, u64::from(bits), FieldValue::Uint {
            value,
            sym: sym(value),
        });
        Ok(value)
    }

    /// Reads and records a one bit flag.
    pub fn field_bool(&mut self, name: &'static str) -> Result<bool> {
        let offset = self.reader.position();
        let b = track!(self.reader.read_bits(1), "field={}", name)? == 1;
        self.push(name, offset, 1, FieldValue::Bool(b));
        Ok(b)
    }

    /// Reads and records `bits` opaque bits, returning a copy of them.
    pub fn field_raw(&mut self, name: &'static str, bits: u64) -> Result<Vec<u8>> {
        let offset = self.reader.position();
        let bytes = track!(self.reader.read_raw(bits), "field={}", name)?;
        self.push(name, offset, bits, FieldValue::Raw(bytes.clone()));
        Ok(bytes)
    }

    /// Records a value that was not read directly from the input.
    pub fn field_value(&mut self, name: &'static str, value: u64) {
        let offset = self.reader.position();
        self.push(name, offset, 0, FieldValue::Uint { value, sym: None });
    }

    /// Reads and records a field whose value is fixed by the format.
    ///
    /// The value is only checked when strict marker checking is enabled.
    pub fn field_marker(&mut self, name: &'static str, bits: u32, expected: u64) -> Result<u64> {
        let value = track!(self.field_u(name, bits))?;
        if self.strict_markers {
            track_assert_eq!(
                value,
                expected,
                ErrorKind::FormatMismatch,
                "field={}, position={}",
                name,
                self.reader.position()
            );
        }
        Ok(value)
    }

    /// Records the fields read by `f` as children of a struct field.
    pub fn field_struct<F, T>(&mut self, name: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.nested(name, FieldValue::Struct, f)
    }

    /// Records the fields read by `f` as elements of an array field.
    pub fn field_array<F, T>(&mut self, name: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.nested(name, FieldValue::Array, f)
    }

    /// Calls `f` as long as the next bit is `1`, returning the number of calls.
    ///
    /// The terminating `0` bit is not consumed. The end of the input also
    /// terminates the loop.
    pub fn while_peek_bit<F>(&mut self, mut f: F) -> Result<usize>
    where
        F: FnMut(&mut Self) -> Result<()>,
    {
        let mut count = 0;
        while self.bits_left() > 0 && track!(self.peek_bits(1))? == 1 {
            track!(f(self))?;
            count += 1;
        }
        Ok(count)
    }

    /// Runs `f` inside a region of exactly `bits` bits (see [`BitReader::framed`]).
    pub fn framed<F, T>(&mut self, bits: u64, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let frame = track!(self.reader.enter_frame(bits))?;
        let result = f(self);
        track!(self.reader.leave_frame(frame))?;
        track!(result)
    }

    fn nested<F, T, V>(&mut self, name: &'static str, wrap: V, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
        V: FnOnce(Vec<Field>) -> FieldValue,
    {
        let offset = self.reader.position();
        let parent = mem::replace(&mut self.fields, Vec::new());
        let result = f(self);
        let children = mem::replace(&mut self.fields, parent);
        let bit_len = self.reader.position() - offset;
        self.push(name, offset, bit_len, wrap(children));
        result
    }

    fn push(&mut self, name: &'static str, offset: u64, bit_len: u64, value: FieldValue) {
        self.fields.push(Field {
            name,
            offset,
            bit_len,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_fields_are_recorded_in_order() {
        let data = [0b1100_0000, 0xAB];
        let mut r = FieldReader::new(&data, false);
        track_try_unwrap!(r.field_struct("outer", |r| {
            track!(r.field_bool("a"))?;
            track!(r.field_u("b", 3))?;
            Ok(())
        }));
        track_try_unwrap!(r.field_u("c", 4));
        let fields = r.into_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].bit_len, 4);
        assert_eq!(fields[0].get("a").and_then(Field::as_u64), Some(1));
        assert_eq!(fields[0].get("b").and_then(Field::as_u64), Some(0b100));
        assert_eq!(find_path(&fields, "outer/b").map(|f| f.offset), Some(1));
        assert_eq!(fields[1].as_u64(), Some(0));
    }

    #[test]
    fn while_peek_bit_stops_before_zero() {
        let data = [0b1010_0100];
        let mut r = FieldReader::new(&data, false);
        let count = track_try_unwrap!(r.field_array("items", |r| {
            r.while_peek_bit(|r| r.field_u("item", 2).map(|_| ()))
        }));
        assert_eq!(count, 2);
        assert_eq!(track_try_unwrap!(r.peek_bits(1)), 0);
        assert_eq!(r.fields()[0].children().len(), 2);
    }

    #[test]
    fn markers_are_checked_only_when_strict() {
        let data = [0b0000_0000];
        let mut lenient = FieldReader::new(&data, false);
        assert_eq!(track_try_unwrap!(lenient.field_marker("marker", 1, 1)), 0);

        let mut strict = FieldReader::new(&data, true);
        let e = strict.field_marker("marker", 1, 1).err().unwrap();
        assert_eq!(*e.kind(), ErrorKind::FormatMismatch);
    }

    #[test]
    fn framed_fields_stay_inside_region() {
        let data = [0xFF, 0x00, 0x55];
        let mut r = FieldReader::new(&data, false);
        let e = r
            .framed(8, |r| r.field_u("wide", 12))
            .err()
            .unwrap();
        assert_eq!(*e.kind(), ErrorKind::TruncatedInput);
        assert_eq!(r.bits().position(), 8);

        track_try_unwrap!(r.framed(16, |r| r.field_u("narrow", 4)));
        assert_eq!(r.bits_left(), 0);
        assert_eq!(r.fields().len(), 1);
    }
}
