//! Byte order representation for binary conversion
//!
//! Only whole-value endianness is modelled here: every multi-byte scalar is
//! either written least-significant byte first or most-significant byte first.

use serde::{Deserialize, Serialize};

use crate::error::BinaryError;

/// Byte order of multi-byte scalars
///
/// For 32-bit value `0x01020304`:
/// - `LittleEndian`: [0x04, 0x03, 0x02, 0x01]
/// - `BigEndian`: [0x01, 0x02, 0x03, 0x04]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ByteOrder {
    /// Least significant byte first (DCBA)
    ///
    /// Intel x86 / ARM native byte order.
    LittleEndian,

    /// Most significant byte first (ABCD)
    ///
    /// Network byte order.
    BigEndian,
}

impl ByteOrder {
    /// Byte order of the machine running this process
    pub const fn host() -> Self {
        #[cfg(target_endian = "big")]
        let order = Self::BigEndian;

        #[cfg(target_endian = "little")]
        let order = Self::LittleEndian;

        order
    }

    /// Parse from the spellings used in config files
    ///
    /// - "LE", "LITTLE", "LITTLE_ENDIAN", "DCBA" → LittleEndian
    /// - "BE", "BIG", "BIG_ENDIAN", "ABCD", "NETWORK" → BigEndian
    /// - "HOST", "NATIVE" → `ByteOrder::host()`
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace('-', "");
        match normalized.as_str() {
            "LE" | "LITTLE" | "LITTLE_ENDIAN" | "LITTLEENDIAN" | "DCBA" => {
                Some(Self::LittleEndian)
            },
            "BE" | "BIG" | "BIG_ENDIAN" | "BIGENDIAN" | "ABCD" | "NETWORK" => {
                Some(Self::BigEndian)
            },
            "HOST" | "NATIVE" => Some(Self::host()),
            _ => None,
        }
    }

    /// Get descriptive name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LittleEndian => "little_endian",
            Self::BigEndian => "big_endian",
        }
    }

    pub fn is_big_endian(&self) -> bool {
        matches!(self, Self::BigEndian)
    }

    pub fn is_little_endian(&self) -> bool {
        matches!(self, Self::LittleEndian)
    }
}

impl TryFrom<String> for ByteOrder {
    type Error = BinaryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
            .ok_or_else(|| BinaryError::config(format!("unknown byte order '{}'", value)))
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for ByteOrder {
    /// Default to the host byte order
    fn default() -> Self {
        Self::host()
    }
}
