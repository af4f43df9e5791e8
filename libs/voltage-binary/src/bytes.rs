//! Byte order handling
//!
//! Provides the byte order enum shared by every codec and the single
//! process-wide default used when a call does not name an order.

pub mod byte_order;
pub mod default_order;

pub use byte_order::ByteOrder;
pub use default_order::{default_byte_order, resolve_byte_order, set_default_byte_order};
