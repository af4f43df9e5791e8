//! Record layouts
//!
//! A layout is an ordered list of named fields. Decoding walks the fields in
//! declaration order against one shared stream, so each field starts where the
//! previous one stopped. The result is all-or-nothing: if any field fails the
//! partially built record is dropped and the error is returned.

use std::collections::HashSet;
use std::fmt;

use tracing::{trace, warn};

use crate::bytes::{resolve_byte_order, ByteOrder};
use crate::codec::BinaryDecode;
use crate::error::{BinaryError, Result};
use crate::stream::ByteRead;
use crate::value::{Record, Value};

type DecodeFn = fn(&mut dyn ByteRead, ByteOrder) -> Result<Value>;

fn decode_value<T: BinaryDecode + Into<Value>>(
    stream: &mut dyn ByteRead,
    order: ByteOrder,
) -> Result<Value> {
    T::decode(stream, order).map(Into::into)
}

/// Type-erased decoder for one conforming type
#[derive(Clone, Copy)]
pub struct FieldType {
    name: &'static str,
    decode: DecodeFn,
}

impl FieldType {
    pub fn of<T: BinaryDecode + Into<Value>>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            decode: decode_value::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn decode(&self, stream: &mut dyn ByteRead, order: ByteOrder) -> Result<Value> {
        (self.decode)(stream, order)
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldType").field(&self.name).finish()
    }
}

/// Single value or a fixed number of homogeneous values
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Single(FieldType),
    FixedCount(FieldType, usize),
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Single(ty) | FieldKind::FixedCount(ty, _) => *ty,
        }
    }
}

/// One named entry of a layout
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Overrides the layout default for this field only
    pub byte_order: Option<ByteOrder>,
}

impl Field {
    pub fn scalar<T: BinaryDecode + Into<Value>>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Single(FieldType::of::<T>()),
            byte_order: None,
        }
    }

    pub fn array<T: BinaryDecode + Into<Value>>(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::FixedCount(FieldType::of::<T>(), count),
            byte_order: None,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = Some(order);
        self
    }

    fn decode(&self, stream: &mut dyn ByteRead, order: ByteOrder) -> Result<Value> {
        match self.kind {
            FieldKind::Single(ty) => ty.decode(stream, order),
            FieldKind::FixedCount(ty, count) => {
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(ty.decode(stream, order)?);
                }
                Ok(Value::Sequence(items))
            },
        }
    }
}

/// Ordered field list describing a binary record
///
/// ```
/// use voltage_binary::{ByteOrder, Layout, Value};
///
/// let layout = Layout::new().field::<u8>("id").array::<i8>("asciiz", 8);
/// let bytes = [0x01u8, 0x41, 0x53, 0x43, 0x49, 0x49, 0x00, 0x00, 0x00];
/// let record = voltage_binary::decode_layout(&bytes, &layout, Some(ByteOrder::BigEndian)).unwrap();
///
/// assert_eq!(record.get("id"), Some(&Value::U8(1)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Layout {
    fields: Vec<Field>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field<T: BinaryDecode + Into<Value>>(self, name: impl Into<String>) -> Self {
        self.push(Field::scalar::<T>(name))
    }

    pub fn field_with_order<T: BinaryDecode + Into<Value>>(
        self,
        name: impl Into<String>,
        order: ByteOrder,
    ) -> Self {
        self.push(Field::scalar::<T>(name).with_byte_order(order))
    }

    pub fn array<T: BinaryDecode + Into<Value>>(self, name: impl Into<String>, count: usize) -> Self {
        self.push(Field::array::<T>(name, count))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reject layouts that name the same field twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                warn!(field = %field.name, "Layout rejected: duplicate field name");
                return Err(BinaryError::duplicate_field(field.name.clone()));
            }
        }
        Ok(())
    }

    /// Decode every field in order
    ///
    /// Byte order per field: the field override, else `default_order`, else
    /// the process-wide default. The layout is validated before any byte is
    /// consumed.
    pub fn decode(
        &self,
        stream: &mut dyn ByteRead,
        default_order: Option<ByteOrder>,
    ) -> Result<Record> {
        self.validate()?;

        let fallback = resolve_byte_order(default_order);
        let mut record = Record::with_capacity(self.fields.len());
        for field in &self.fields {
            let order = field.byte_order.unwrap_or(fallback);
            trace!(
                field = %field.name,
                ty = field.kind.field_type().name(),
                byte_order = %order,
                position = stream.position(),
                "Decoding layout field"
            );
            let value = field.decode(stream, order)?;
            record.insert(field.name.clone(), value)?;
        }
        Ok(record)
    }

    /// Encode a record field by field, the inverse of [`Layout::decode`]
    ///
    /// Each field is written with the same byte order `decode` would have
    /// used, so a decoded record encodes back to its source bytes. Fields of
    /// the record that the layout does not name are ignored.
    pub fn encode(&self, record: &Record, default_order: Option<ByteOrder>) -> Result<Vec<u8>> {
        self.validate()?;

        let fallback = resolve_byte_order(default_order);
        let mut out = Vec::new();
        for field in &self.fields {
            let value = record
                .get(&field.name)
                .ok_or_else(|| BinaryError::field_not_found(field.name.clone()))?;
            if let FieldKind::FixedCount(_, count) = field.kind {
                let items = value.as_sequence().ok_or(BinaryError::TypeMismatch {
                    expected: "sequence",
                    found: value.type_name(),
                })?;
                if items.len() != count {
                    return Err(BinaryError::invalid_data(format!(
                        "field '{}' holds {} item(s), layout expects {}",
                        field.name,
                        items.len(),
                        count
                    )));
                }
            }
            let order = field.byte_order.unwrap_or(fallback);
            value.encode_into(&mut out, order)?;
        }
        Ok(out)
    }
}
