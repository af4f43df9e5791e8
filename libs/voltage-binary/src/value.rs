//! Dynamic values
//!
//! Layout decoding produces values whose types are only known at runtime.
//! They are carried as a closed enum instead of type-erased objects, so every
//! consumer matches the possible shapes exhaustively.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::bytes::ByteOrder;
use crate::codec::{AsciiZ, BinaryEncode, RawBytes};
use crate::error::{BinaryError, Result};

/// A decoded scalar, byte run, text, sequence or record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Bytes(Vec<u8>),
    Text(String),
    Sequence(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::U8(_) => "u8",
            Value::I8(_) => "i8",
            Value::U16(_) => "u16",
            Value::I16(_) => "i16",
            Value::U32(_) => "u32",
            Value::I32(_) => "i32",
            Value::U64(_) => "u64",
            Value::I64(_) => "i64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Append the binary form of this value to `dst`
    ///
    /// Scalars, byte runs, text and sequences of those are encodable. A record
    /// is a name→value mapping without a binary form of its own and fails with
    /// `UnsupportedType`; `dst` may hold a partial prefix in that case.
    pub fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder) -> Result<()> {
        match self {
            Value::U8(v) => v.encode_into(dst, order),
            Value::I8(v) => v.encode_into(dst, order),
            Value::U16(v) => v.encode_into(dst, order),
            Value::I16(v) => v.encode_into(dst, order),
            Value::U32(v) => v.encode_into(dst, order),
            Value::I32(v) => v.encode_into(dst, order),
            Value::U64(v) => v.encode_into(dst, order),
            Value::I64(v) => v.encode_into(dst, order),
            Value::F32(v) => v.encode_into(dst, order),
            Value::F64(v) => v.encode_into(dst, order),
            Value::Bytes(bytes) => dst.extend_from_slice(bytes),
            Value::Text(text) => dst.extend_from_slice(text.as_bytes()),
            Value::Sequence(items) => {
                for item in items {
                    item.encode_into(dst, order)?;
                }
            },
            Value::Record(_) => return Err(BinaryError::unsupported(self.type_name())),
        }
        Ok(())
    }

    pub fn encode(&self, order: ByteOrder) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut out, order)?;
        Ok(out)
    }
}

/// Scalar ↔ `Value` conversions and typed accessors
macro_rules! impl_value_scalar {
    ($($ty:ty => $variant:ident, $accessor:ident);* $(;)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = BinaryError;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(BinaryError::TypeMismatch {
                            expected: stringify!($ty),
                            found: other.type_name(),
                        }),
                    }
                }
            }

            impl Value {
                pub fn $accessor(&self) -> Option<$ty> {
                    match self {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_value_scalar! {
    u8 => U8, as_u8;
    i8 => I8, as_i8;
    u16 => U16, as_u16;
    i16 => I16, as_i16;
    u32 => U32, as_u32;
    i32 => I32, as_i32;
    u64 => U64, as_u64;
    i64 => I64, as_i64;
    f32 => F32, as_f32;
    f64 => F64, as_f64;
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: TryFrom<Value, Error = BinaryError>> TryFrom<Value> for Vec<T> {
    type Error = BinaryError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(BinaryError::TypeMismatch {
                expected: "sequence",
                found: other.type_name(),
            }),
        }
    }
}

impl From<RawBytes> for Value {
    fn from(raw: RawBytes) -> Self {
        Value::Bytes(raw.0)
    }
}

/// Kept as its padded `N`-byte form so a decoded record re-encodes to the
/// same width
impl<const N: usize> From<AsciiZ<N>> for Value {
    fn from(text: AsciiZ<N>) -> Self {
        Value::Bytes(text.as_bytes().to_vec())
    }
}

impl<const N: usize> TryFrom<Value> for AsciiZ<N> {
    type Error = BinaryError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(bytes) => match <[u8; N]>::try_from(bytes.as_slice()) {
                Ok(raw) => AsciiZ::from_raw(raw),
                Err(_) => Err(BinaryError::out_of_range(bytes.len() as i64, N)),
            },
            Value::Text(text) => AsciiZ::new(text),
            other => Err(BinaryError::TypeMismatch {
                expected: "asciiz",
                found: other.type_name(),
            }),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// Ordered name→value mapping produced by layout decoding
///
/// Field order is the declaration order of the layout, so
/// `values()` re-encodes to the bytes the record was decoded from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field; names are unique within a record
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(BinaryError::duplicate_field(name));
        }
        self.fields.push((name, value.into()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a field and convert it to a concrete type
    ///
    /// The field stays in the record if the conversion fails.
    pub fn take<T>(&mut self, name: &str) -> Result<T>
    where
        T: TryFrom<Value, Error = BinaryError>,
    {
        let index = self
            .fields
            .iter()
            .position(|(field, _)| field == name)
            .ok_or_else(|| BinaryError::field_not_found(name))?;
        let converted = T::try_from(self.fields[index].1.clone())?;
        self.fields.remove(index);
        Ok(converted)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Values in field order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn into_map(self) -> std::collections::HashMap<String, Value> {
        self.fields.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
