use thiserror::Error;

use crate::metadata::tables::TableId;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    ($offset:expr, $len:expr) => {
        crate::Error::OutOfBounds {
            offset: $offset,
            len: $len,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every structural problem found while decoding a DEX file is reported through this enum, and
/// each variant carries enough context (offset, table, index) to point at the byte or record
/// that is at fault. Lookups that simply find nothing, such as asking for a class that is not
/// defined in the file, are never errors; they return `Ok(None)` instead.
///
/// # Error Categories
///
/// ## Header Errors
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::InvalidMagic`] - The magic/version tag does not match `dex\nNNN\0`
/// - [`Error::FileSizeMismatch`] - The declared file size differs from the buffer length
///
/// ## Decoding Errors
/// - [`Error::OutOfBounds`] - A read would run past the end of the buffer
/// - [`Error::IndexOutOfRange`] - A table index is outside the table declared by the header
/// - [`Error::Malformed`] - Corrupted structure (overlong varint, unterminated string, ...)
///
/// ## Resolution Errors
/// - [`Error::LockError`] - The class resolver lock was poisoned by a panicking thread
///
/// # Examples
///
/// ```rust
/// use dexscope::{DexView, Error};
///
/// match DexView::from_mem(vec![0u8; 16]) {
///     Ok(_) => println!("loaded"),
///     Err(Error::OutOfBounds { offset, len }) => {
///         println!("header truncated: {len} bytes at {offset:#x}");
///     }
///     Err(e) => println!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    ///
    /// Occurs whenever a fixed-width read, slice or varint would extend past the end of
    /// the buffer.
    #[error("Out of bound read of {len} bytes at offset {offset:#x}")]
    OutOfBounds {
        /// Absolute offset of the attempted read
        offset: usize,
        /// Number of bytes requested
        len: usize,
    },

    /// A table index was outside of the `[0, count)` range declared by the header.
    #[error("Index {index} out of range for {table} table with {count} entries")]
    IndexOutOfRange {
        /// The table that was accessed
        table: TableId,
        /// The offending index
        index: u32,
        /// Number of entries the header declares for this table
        count: u32,
    },

    /// The magic/version tag at the start of the file is not `dex\n` + 3 digits + `\0`.
    #[error("Invalid DEX magic: {0:02x?}")]
    InvalidMagic([u8; 8]),

    /// The header's `file_size` field does not match the length of the provided buffer.
    #[error("DEX file size mismatch: header={declared} actual={actual}")]
    FileSizeMismatch {
        /// Size declared in the header
        declared: u32,
        /// Actual length of the input buffer
        actual: usize,
    },

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// Failed to lock target.
    ///
    /// The class resolver serializes top-level resolutions through a mutex; this error is
    /// returned if a previous holder panicked and poisoned it.
    #[error("Failed to lock target")]
    LockError,
}
