//! Type conversion contract
//!
//! A type opts into binary conversion by implementing [`BinaryDecode`]
//! (stream → value) and [`BinaryEncode`] (value → bytes). Encoding a value
//! produces exactly the bytes decoding consumes for an equal value under the
//! same byte order.
//!
//! Composite types implement both traits by delegating to their fields in a
//! fixed order, either directly or through a [`Layout`](crate::layout::Layout).

use crate::bytes::ByteOrder;
use crate::error::{BinaryError, Result};
use crate::stream::ByteRead;

/// Materialize a value by consuming bytes from a stream
pub trait BinaryDecode: Sized {
    fn decode(stream: &mut dyn ByteRead, order: ByteOrder) -> Result<Self>;
}

/// Produce the byte representation of a value
pub trait BinaryEncode {
    /// Append the encoded bytes to `dst`
    fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder);

    fn encode(&self, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out, order);
        out
    }
}

/// Types convertible in both directions
pub trait BinaryCodec: BinaryDecode + BinaryEncode {}

impl<T: BinaryDecode + BinaryEncode> BinaryCodec for T {}

/// Fixed-width numeric adapters
///
/// Little-endian writes the least significant byte first, big-endian the most
/// significant byte first. Floats use their IEEE-754 bit pattern.
macro_rules! impl_scalar_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BinaryDecode for $ty {
                fn decode(stream: &mut dyn ByteRead, order: ByteOrder) -> Result<Self> {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    stream.read_exact(&mut buf)?;
                    Ok(match order {
                        ByteOrder::LittleEndian => <$ty>::from_le_bytes(buf),
                        ByteOrder::BigEndian => <$ty>::from_be_bytes(buf),
                    })
                }
            }

            impl BinaryEncode for $ty {
                fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder) {
                    match order {
                        ByteOrder::LittleEndian => dst.extend_from_slice(&self.to_le_bytes()),
                        ByteOrder::BigEndian => dst.extend_from_slice(&self.to_be_bytes()),
                    }
                }
            }
        )*
    };
}

impl_scalar_codec!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl<T: BinaryDecode, const N: usize> BinaryDecode for [T; N] {
    fn decode(stream: &mut dyn ByteRead, order: ByteOrder) -> Result<Self> {
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::decode(stream, order)?);
        }
        match items.try_into() {
            Ok(array) => Ok(array),
            Err(_) => unreachable!("loop pushes exactly N items"),
        }
    }
}

impl<T: BinaryEncode, const N: usize> BinaryEncode for [T; N] {
    fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder) {
        self.as_slice().encode_into(dst, order);
    }
}

impl<T: BinaryEncode> BinaryEncode for [T] {
    fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder) {
        for item in self {
            item.encode_into(dst, order);
        }
    }
}

impl<T: BinaryEncode> BinaryEncode for Vec<T> {
    fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder) {
        self.as_slice().encode_into(dst, order);
    }
}

impl<T: BinaryEncode + ?Sized> BinaryEncode for &T {
    fn encode_into(&self, dst: &mut Vec<u8>, order: ByteOrder) {
        (**self).encode_into(dst, order);
    }
}

/// Everything left in the stream, taken verbatim
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawBytes(pub Vec<u8>);

impl BinaryDecode for RawBytes {
    fn decode(stream: &mut dyn ByteRead, _order: ByteOrder) -> Result<Self> {
        let available = stream.available();
        stream.read_n(available).map(RawBytes)
    }
}

impl BinaryEncode for RawBytes {
    fn encode_into(&self, dst: &mut Vec<u8>, _order: ByteOrder) {
        dst.extend_from_slice(&self.0);
    }
}

impl From<Vec<u8>> for RawBytes {
    fn from(bytes: Vec<u8>) -> Self {
        RawBytes(bytes)
    }
}

/// Fixed-width, zero-padded ASCII text of exactly `N` bytes
///
/// The text runs up to the first NUL. The full `N`-byte field is kept, so
/// whatever follows the NUL is written back unchanged on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiZ<const N: usize> {
    raw: [u8; N],
    text_len: usize,
}

impl<const N: usize> AsciiZ<N> {
    /// Zero-padded field holding `text`
    pub fn new(text: impl AsRef<str>) -> Result<Self> {
        let text = text.as_ref();
        if !text.is_ascii() || text.contains('\0') {
            return Err(BinaryError::invalid_data(format!(
                "text '{}' is not NUL-free ASCII",
                text.escape_default()
            )));
        }
        if text.len() > N {
            return Err(BinaryError::out_of_range(text.len() as i64, N));
        }
        let mut raw = [0u8; N];
        raw[..text.len()].copy_from_slice(text.as_bytes());
        Ok(Self {
            raw,
            text_len: text.len(),
        })
    }

    /// Validate a raw field: the bytes before the first NUL must be ASCII
    pub fn from_raw(raw: [u8; N]) -> Result<Self> {
        let text_len = raw.iter().position(|&b| b == 0).unwrap_or(N);
        if !raw[..text_len].is_ascii() {
            return Err(BinaryError::invalid_data(
                "non-ASCII bytes in fixed-width text",
            ));
        }
        Ok(Self { raw, text_len })
    }

    pub fn as_str(&self) -> &str {
        // ASCII checked on construction
        std::str::from_utf8(&self.raw[..self.text_len]).unwrap_or_default()
    }

    /// Whole field, padding included
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.as_str().to_owned()
    }
}

impl<const N: usize> Default for AsciiZ<N> {
    fn default() -> Self {
        Self {
            raw: [0u8; N],
            text_len: 0,
        }
    }
}

impl<const N: usize> BinaryDecode for AsciiZ<N> {
    fn decode(stream: &mut dyn ByteRead, _order: ByteOrder) -> Result<Self> {
        let start = stream.position();
        let mut raw = [0u8; N];
        stream.read_exact(&mut raw)?;
        Self::from_raw(raw).map_err(|err| {
            // Leave the stream where it was, as for a short read
            let _ = stream.seek_to(start);
            err
        })
    }
}

impl<const N: usize> BinaryEncode for AsciiZ<N> {
    fn encode_into(&self, dst: &mut Vec<u8>, _order: ByteOrder) {
        dst.extend_from_slice(&self.raw);
    }
}

impl<const N: usize> std::fmt::Display for AsciiZ<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
