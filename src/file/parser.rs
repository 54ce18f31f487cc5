//! Low-level byte stream parser for DEX decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data parser
//! used to walk the variable-length parts of a DEX file: string data items, class data blocks
//! and type lists. It offers bounds-checked access to the data with support for the unsigned
//! LEB128 encoding used throughout the format.
//!
//! # Key Components
//!
//! - [`crate::file::parser::Parser::seek`] - Move to a specific position
//! - [`crate::file::parser::Parser::read_le`] - Read primitive types (little-endian)
//! - [`crate::file::parser::Parser::read_uleb128`] - Read an unsigned LEB128 value
//! - [`crate::file::parser::read_uleb128`] - Stateless variant returning the next offset
//!
//! # Usage Examples
//!
//! ```rust
//! use dexscope::Parser;
//!
//! // 0x7F, then 0x80 0x01 (= 128)
//! let data = [0x7F, 0x80, 0x01];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_uleb128()?, 127);
//! assert_eq!(parser.read_uleb128()?, 128);
//! assert!(!parser.has_more_data());
//! # Ok::<(), dexscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, DexIO},
    Result,
};

/// Maximum number of bytes a ULEB128 value may occupy when it decodes to a `u32`.
pub const ULEB128_MAX_BYTES: usize = 5;

/// A binary data parser for reading DEX structures.
///
/// `Parser` keeps a position cursor over a borrowed byte slice. Every read validates that
/// enough data is available, so malformed or truncated files produce an
/// [`crate::Error::OutOfBounds`] rather than a panic.
///
/// # Examples
///
/// ```rust
/// use dexscope::Parser;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut parser = Parser::new(&data);
///
/// let first = parser.read_le::<u32>()?;
/// assert_eq!(first, 0x04030201);
///
/// parser.seek(6)?;
/// assert_eq!(parser.read_le::<u16>()?, 0x0807);
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Create a parser positioned at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is not inside `data`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut parser = Parser::new(data);
        parser.seek(offset)?;
        Ok(parser)
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!(pos, 1));
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        match self.position.checked_add(step) {
            Some(end) if end <= self.data.len() => {
                self.position = end;
                Ok(())
            }
            _ => Err(out_of_bounds_error!(self.position, step)),
        }
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Read a value of type `T` in little-endian format and advance past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the data length.
    pub fn read_le<T: DexIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read an unsigned LEB128 encoded value.
    ///
    /// Each byte contributes its low 7 bits, least significant group first; a set high bit
    /// means another byte follows. At most [`ULEB128_MAX_BYTES`] bytes are consumed, bits that
    /// do not fit into 32 bits are discarded.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data ends mid-sequence, or
    /// [`crate::Error::Malformed`] if the fifth byte still has its continuation bit set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dexscope::Parser;
    ///
    /// let data = [0xE5, 0x8E, 0x26];
    /// let mut parser = Parser::new(&data);
    /// assert_eq!(parser.read_uleb128()?, 624_485);
    /// # Ok::<(), dexscope::Error>(())
    /// ```
    pub fn read_uleb128(&mut self) -> Result<u32> {
        let start = self.position;
        let mut value = 0u32;
        let mut shift = 0;

        for _ in 0..ULEB128_MAX_BYTES {
            if self.position >= self.data.len() {
                return Err(out_of_bounds_error!(self.position, 1));
            }

            let byte = self.data[self.position];
            self.position += 1;

            value |= u32::from(byte & 0x7F) << shift;
            if (byte & 0x80) == 0 {
                return Ok(value);
            }

            shift += 7;
        }

        Err(malformed_error!(
            "ULEB128 at offset {:#x} exceeds {} bytes",
            start,
            ULEB128_MAX_BYTES
        ))
    }
}

/// Decode an unsigned LEB128 value starting at `offset`.
///
/// Returns the decoded value together with the offset of the first byte after it.
///
/// # Errors
/// See [`Parser::read_uleb128`].
pub fn read_uleb128(data: &[u8], offset: usize) -> Result<(u32, usize)> {
    let mut parser = Parser::at(data, offset)?;
    let value = parser.read_uleb128()?;
    Ok((value, parser.pos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn uleb128_single_byte() {
        assert_eq!(read_uleb128(&[0x00], 0).unwrap(), (0, 1));
        assert_eq!(read_uleb128(&[0x01], 0).unwrap(), (1, 1));
        assert_eq!(read_uleb128(&[0x7F], 0).unwrap(), (127, 1));
    }

    #[test]
    fn uleb128_multi_byte() {
        assert_eq!(read_uleb128(&[0x80, 0x7F], 0).unwrap(), (16256, 2));
        assert_eq!(read_uleb128(&[0xAA, 0xE5, 0x8E, 0x26], 1).unwrap(), (624_485, 4));
    }

    #[test]
    fn uleb128_five_bytes() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
        assert_eq!(read_uleb128(&data, 0).unwrap(), (u32::MAX, 5));

        // high bits of the last group do not fit and are dropped
        let data = [0x80, 0x80, 0x80, 0x80, 0x7F];
        assert_eq!(read_uleb128(&data, 0).unwrap(), (0xF000_0000, 5));
    }

    #[test]
    fn uleb128_too_long() {
        let data = [0x80, 0x80, 0x80, 0x80, 0x80, 0x00];
        assert!(matches!(
            read_uleb128(&data, 0),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn uleb128_truncated() {
        let data = [0x00, 0x80, 0x80];
        assert!(matches!(
            read_uleb128(&data, 1),
            Err(Error::OutOfBounds { offset: 3, len: 1 })
        ));
        assert!(read_uleb128(&data, 3).is_err());
    }

    #[test]
    fn sequential_reads() {
        let data = [0x01, 0x00, 0x85, 0x01, 0x04, 0x03, 0x02, 0x01];
        let mut parser = Parser::new(&data);

        assert_eq!(parser.read_le::<u16>().unwrap(), 1);
        assert_eq!(parser.read_uleb128().unwrap(), 133);
        assert_eq!(parser.read_le::<u32>().unwrap(), 0x0102_0304);
        assert!(!parser.has_more_data());
        assert!(parser.read_le::<u8>().is_err());
    }

    #[test]
    fn navigation() {
        let data = [0x01, 0x02, 0x03];
        let mut parser = Parser::new(&data);

        assert!(parser.seek(3).is_err());
        parser.seek(2).unwrap();
        assert_eq!(parser.pos(), 2);
        assert!(parser.advance_by(2).is_err());
        parser.advance_by(1).unwrap();
        assert!(!parser.has_more_data());

        assert!(Parser::at(&data, 5).is_err());
        assert_eq!(Parser::at(&data, 1).unwrap().pos(), 1);
    }
}
