//! Voltage Binary Conversion Library
//!
//! Byte-order aware conversion between in-memory values and raw byte
//! sequences for VoltageEMS.
//!
//! # Architecture
//!
//! This library provides:
//! - **Streams**: `ByteStream` cursors over borrowed or shared buffers, behind the `ByteRead` trait
//! - **Codecs**: `BinaryDecode` / `BinaryEncode` for fixed-width numbers, arrays, raw bytes and ASCII text
//! - **Layouts**: named, ordered field lists decoded into a `Record`
//! - **Converter**: the `decode_*` / `encode_*` entry points, including `encode_layout` for records
//! - **Config**: process-wide default byte order, loaded with figment
//!
//! # Example
//!
//! ```
//! use voltage_binary::{decode_layout, encode_heterogeneous, ByteOrder, Layout};
//!
//! let layout = Layout::new().field::<u8>("id").field::<u16>("count");
//! let record = decode_layout(&[0x10u8, 0x00, 0x08], &layout, Some(ByteOrder::BigEndian)).unwrap();
//!
//! assert_eq!(record.get("count").and_then(|v| v.as_u16()), Some(8));
//! assert_eq!(
//!     encode_heterogeneous(record.values(), Some(ByteOrder::BigEndian)).unwrap(),
//!     vec![0x10, 0x00, 0x08]
//! );
//! ```

pub mod bytes;
pub mod codec;
pub mod config;
pub mod converter;
pub mod error;
pub mod layout;
pub mod stream;
pub mod value;

// Re-export core types
pub use crate::bytes::{default_byte_order, resolve_byte_order, set_default_byte_order, ByteOrder};
pub use crate::codec::{AsciiZ, BinaryCodec, BinaryDecode, BinaryEncode, RawBytes};
pub use crate::config::BinaryConfig;
pub use crate::error::{BinaryError, Result};
pub use crate::layout::{Field, FieldKind, FieldType, Layout};
pub use crate::stream::{ByteRead, ByteStream, SharedByteStream, Source};
pub use crate::value::{Record, Value};

// Conversion entry points
pub use crate::converter::{
    decode_layout, decode_many, decode_one, encode_heterogeneous, encode_layout, encode_many,
    encode_one,
};
