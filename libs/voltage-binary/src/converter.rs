//! Conversion entry points
//!
//! Every function takes an optional byte order; `None` means the process-wide
//! default (see [`default_byte_order`](crate::bytes::default_byte_order)).
//! Sources may be a raw buffer, a sub-slice, a `Bytes`, or a borrowed stream:
//!
//! ```
//! use voltage_binary::{decode_one, encode_one, ByteOrder};
//!
//! let value: i16 = decode_one(&[0x80u8, 0x00], Some(ByteOrder::LittleEndian)).unwrap();
//! assert_eq!(value, 128);
//!
//! let value: i16 = decode_one(&[0x80u8, 0x00], Some(ByteOrder::BigEndian)).unwrap();
//! assert_eq!(value, -32768);
//!
//! assert_eq!(encode_one(&128i16, Some(ByteOrder::BigEndian)), vec![0x00, 0x80]);
//! ```

use crate::bytes::{resolve_byte_order, ByteOrder};
use crate::codec::{BinaryDecode, BinaryEncode};
use crate::error::Result;
use crate::layout::Layout;
use crate::stream::Source;
use crate::value::{Record, Value};

/// Decode a single value
pub fn decode_one<'a, T: BinaryDecode>(
    source: impl Into<Source<'a>>,
    byte_order: Option<ByteOrder>,
) -> Result<T> {
    let mut source = source.into();
    T::decode(&mut source, resolve_byte_order(byte_order))
}

/// Decode exactly `count` consecutive values of one type
pub fn decode_many<'a, T: BinaryDecode>(
    source: impl Into<Source<'a>>,
    count: usize,
    byte_order: Option<ByteOrder>,
) -> Result<Vec<T>> {
    let mut source = source.into();
    let order = resolve_byte_order(byte_order);
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(T::decode(&mut source, order)?);
    }
    Ok(values)
}

/// Decode a record described by `layout`
///
/// Fields without their own byte order use `default_byte_order`, then the
/// process-wide default.
pub fn decode_layout<'a>(
    source: impl Into<Source<'a>>,
    layout: &Layout,
    default_byte_order: Option<ByteOrder>,
) -> Result<Record> {
    let mut source = source.into();
    layout.decode(&mut source, default_byte_order)
}

/// Encode a record described by `layout`
///
/// Uses the same per-field byte orders as [`decode_layout`], so a decoded
/// record encodes back to the bytes it came from.
pub fn encode_layout(
    record: &Record,
    layout: &Layout,
    default_byte_order: Option<ByteOrder>,
) -> Result<Vec<u8>> {
    layout.encode(record, default_byte_order)
}

/// Encode a single value
pub fn encode_one<T: BinaryEncode + ?Sized>(value: &T, byte_order: Option<ByteOrder>) -> Vec<u8> {
    value.encode(resolve_byte_order(byte_order))
}

/// Encode values of one type back to back
pub fn encode_many<T: BinaryEncode>(values: &[T], byte_order: Option<ByteOrder>) -> Vec<u8> {
    values.encode(resolve_byte_order(byte_order))
}

/// Encode values of mixed types back to back, in iteration order
///
/// Fails with `UnsupportedType` if any element (or any element nested in a
/// sequence) has no binary form. No bytes are returned on failure.
pub fn encode_heterogeneous<'v>(
    values: impl IntoIterator<Item = &'v Value>,
    byte_order: Option<ByteOrder>,
) -> Result<Vec<u8>> {
    let order = resolve_byte_order(byte_order);
    let mut out = Vec::new();
    for value in values {
        value.encode_into(&mut out, order)?;
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::error::BinaryError;
    use crate::stream::{ByteRead, ByteStream};

    #[test]
    fn test_decode_many_ascii() {
        let asciiz8 = [0x41u8, 0x53, 0x43, 0x49, 0x49, 0x00, 0x00, 0x00];
        let chars: Vec<i8> = decode_many(&asciiz8, 8, None).unwrap();
        assert_eq!(chars.len(), 8);

        let text: String = chars
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| char::from(c as u8))
            .collect();
        assert_eq!(text, "ASCII");
    }

    #[test]
    fn test_decode_many_short_input() {
        let err = decode_many::<u16>(&[0x00u8, 0x01, 0x02], 2, Some(ByteOrder::BigEndian))
            .unwrap_err();
        assert_eq!(err, BinaryError::insufficient_data(2, 1));
    }

    #[test]
    fn test_decode_continues_on_borrowed_stream() {
        let data = [0x00u8, 0x80, 0x01, 0x02, 0x03, 0x04];
        let mut stream = ByteStream::new(&data[..]);

        let first: i16 = decode_one(&mut stream, Some(ByteOrder::BigEndian)).unwrap();
        let second: u32 = decode_one(&mut stream, Some(ByteOrder::BigEndian)).unwrap();
        assert_eq!((first, second), (128, 0x01020304));
        assert_eq!(stream.available(), 0);
    }

    #[test]
    fn test_decode_from_sub_range() {
        let data = [0xAAu8, 0x01, 0x02, 0xBB];
        let value: u16 = decode_one(&data[1..3], Some(ByteOrder::LittleEndian)).unwrap();
        assert_eq!(value, 0x0201);
    }

    #[test]
    fn test_layout_round_trip_with_override() {
        let layout = Layout::new()
            .field_with_order::<u16>("a", ByteOrder::LittleEndian)
            .field::<u8>("b");
        let data = [0x01u8, 0x02, 0x03];

        let record = decode_layout(&data, &layout, Some(ByteOrder::BigEndian)).unwrap();
        assert_eq!(
            encode_layout(&record, &layout, Some(ByteOrder::BigEndian)).unwrap(),
            data.to_vec()
        );
    }

    #[test]
    fn test_encode_many_big_endian() {
        assert_eq!(
            encode_many(&[0x7fffu16, 0x0102], Some(ByteOrder::BigEndian)),
            vec![0x7f, 0xff, 0x01, 0x02]
        );
        assert!(encode_many::<u32>(&[], None).is_empty());
    }

    #[test]
    fn test_encode_heterogeneous_order_preserved() {
        let values = [Value::I16(128), Value::U32(0x01020304)];
        assert_eq!(
            encode_heterogeneous(&values, Some(ByteOrder::BigEndian)).unwrap(),
            vec![0x00, 0x80, 0x01, 0x02, 0x03, 0x04]
        );
    }

    #[test]
    fn test_encode_heterogeneous_rejects_record() {
        let values = [Value::U8(1), Value::Record(Record::new())];
        assert_eq!(
            encode_heterogeneous(&values, None).unwrap_err(),
            BinaryError::unsupported("record")
        );
    }
}
