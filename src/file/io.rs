//! Low-level little-endian reading utilities for DEX parsing.
//!
//! This module provides safe, bounds-checked reads of primitive integers from byte buffers.
//! The DEX format is little-endian throughout (files carrying the reverse endian tag are not
//! produced by any mainstream toolchain), so only little-endian conversions are offered.
//!
//! # Key Components
//!
//! - [`crate::file::io::DexIO`] - Trait describing how a primitive is built from its bytes
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use dexscope::file::io::read_le_at;
//!
//! let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;  // offset: 0 -> 2
//! let second: u16 = read_le_at(&data, &mut offset)?; // offset: 2 -> 4
//! let third: u32 = read_le_at(&data, &mut offset)?;  // offset: 4 -> 8
//!
//! assert_eq!((first, second, third), (1, 2, 3));
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Error::OutOfBounds`] carrying the offending offset and
//! width if the buffer is too short.

use crate::Result;

/// Trait for primitive types that can be decoded from a fixed number of little-endian bytes.
///
/// Each implementation names the byte array matching its width (e.g. `[u8; 4]` for `u32`).
pub trait DexIO: Sized {
    /// Byte array type holding exactly one encoded value.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Build `Self` from its little-endian representation
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_dex_io {
    ($($ty:ty),*) => {
        $(
            impl DexIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_dex_io!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Safely reads a value of type `T` in little-endian byte order at `offset`, advancing
/// `offset` by the width of `T`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes. The offset is left
/// untouched in that case.
pub fn read_le_at<T: DexIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!(*offset, type_len));
    };

    if end > data.len() {
        return Err(out_of_bounds_error!(*offset, type_len));
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_bounds_error!(*offset, type_len));
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}
