//! Variable-length data pools of a DEX file.
//!
//! Unlike the fixed-stride id tables in [`crate::metadata::tables`], pool entries are located
//! through stored absolute offsets and have to be decoded before use. Decoded values are
//! memoized.

mod strings;

pub use strings::StringPool;
