//! Process-wide default byte order
//!
//! Fixed at most once per process. The first read pins the host byte order
//! if nothing was configured before it, so every call that omits an order
//! sees the same value for the rest of the run.

use std::sync::OnceLock;

use tracing::debug;

use super::ByteOrder;
use crate::error::{BinaryError, Result};

static DEFAULT_BYTE_ORDER: OnceLock<ByteOrder> = OnceLock::new();

/// Current process-wide default byte order
pub fn default_byte_order() -> ByteOrder {
    *DEFAULT_BYTE_ORDER.get_or_init(ByteOrder::host)
}

/// Fix the process-wide default byte order
///
/// Setting the value it already has is a no-op. Any other value fails with
/// `DefaultAlreadySet` once the default has been set or read.
pub fn set_default_byte_order(order: ByteOrder) -> Result<()> {
    let current = *DEFAULT_BYTE_ORDER.get_or_init(|| {
        debug!(byte_order = %order, "Default byte order configured");
        order
    });
    if current == order {
        Ok(())
    } else {
        Err(BinaryError::DefaultAlreadySet { current })
    }
}

/// Explicit order if given, else the process-wide default
#[inline]
pub fn resolve_byte_order(order: Option<ByteOrder>) -> ByteOrder {
    order.unwrap_or_else(default_byte_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stable_across_calls() {
        let first = default_byte_order();
        for _ in 0..10 {
            assert_eq!(default_byte_order(), first);
        }
        assert_eq!(resolve_byte_order(None), first);
    }

    #[test]
    fn test_explicit_order_wins() {
        assert_eq!(
            resolve_byte_order(Some(ByteOrder::BigEndian)),
            ByteOrder::BigEndian
        );
        assert_eq!(
            resolve_byte_order(Some(ByteOrder::LittleEndian)),
            ByteOrder::LittleEndian
        );
    }

    #[test]
    fn test_reset_to_other_order_fails() {
        let current = default_byte_order();
        assert!(set_default_byte_order(current).is_ok());

        let other = match current {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
        };
        assert_eq!(
            set_default_byte_order(other),
            Err(BinaryError::DefaultAlreadySet { current })
        );
        assert_eq!(default_byte_order(), current);
    }
}
