//! Input buffer handling and bounds-checked random access.
//!
//! The [`File`] type owns the complete contents of a DEX file and is the only place where raw
//! bytes are touched by absolute offset. It knows nothing about the DEX format; higher layers
//! ask it for fixed-width integers, slices and terminator positions and get back either the
//! value or an [`crate::Error::OutOfBounds`] naming the offending range.
//!
//! Loading the bytes (from disk, network, an APK archive, ...) is left to the caller.
//!
//! # Examples
//!
//! ```rust
//! use dexscope::File;
//!
//! let file = File::from_mem(vec![0x64, 0x65, 0x78, 0x0A, 0x00])?;
//! assert_eq!(file.u8(0)?, 0x64);
//! assert_eq!(file.u16(1)?, 0x7865);
//! assert_eq!(file.slice(0, 3)?, b"dex");
//! assert_eq!(file.find_zero(0), Some(4));
//! # Ok::<(), dexscope::Error>(())
//! ```

pub mod io;
pub mod parser;

use crate::{file::io::read_le_at, Error::Empty, Result};

/// Immutable, in-memory backing store for a DEX file.
#[derive(Debug)]
pub struct File {
    data: Vec<u8>,
}

impl File {
    /// Take ownership of a complete file image.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if `data` is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        if data.is_empty() {
            return Err(Empty);
        }

        Ok(File { data })
    }

    /// Returns the length of the loaded file in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the file has a length of zero
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the complete file contents
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read a `u8` at an absolute offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is past the end of the file.
    pub fn u8(&self, offset: usize) -> Result<u8> {
        let mut offset = offset;
        read_le_at(&self.data, &mut offset)
    }

    /// Read a little-endian `u16` at an absolute offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the two bytes are not inside the file.
    pub fn u16(&self, offset: usize) -> Result<u16> {
        let mut offset = offset;
        read_le_at(&self.data, &mut offset)
    }

    /// Read a little-endian `u32` at an absolute offset.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the four bytes are not inside the file.
    pub fn u32(&self, offset: usize) -> Result<u32> {
        let mut offset = offset;
        read_le_at(&self.data, &mut offset)
    }

    /// Return a borrowed view of `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the requested range is not inside the file.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(out_of_bounds_error!(offset, len));
        };

        if offset_end > self.data.len() {
            return Err(out_of_bounds_error!(offset, len));
        }

        Ok(&self.data[offset..offset_end])
    }

    /// Find the first zero byte at or after `offset`.
    ///
    /// Returns `None` if there is none before the end of the file, including when `offset`
    /// itself is past the end.
    #[must_use]
    pub fn find_zero(&self, offset: usize) -> Option<usize> {
        self.data
            .get(offset..)?
            .iter()
            .position(|&byte| byte == 0)
            .map(|position| offset + position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn memory() {
        let mut data = vec![0xCC_u8; 1048];
        data[10] = 0xBB;
        data[11] = 0xBB;
        data[12] = 0xBB;
        data[13] = 0xBB;
        data[14] = 0xBB;

        let file = File::from_mem(data).unwrap();

        assert_eq!(file.len(), 1048);
        assert_eq!(file.u8(0).unwrap(), 0xCC);
        assert_eq!(file.u32(11).unwrap(), 0xBBBB_BBBB);
        assert_eq!(file.slice(10, 5).unwrap(), &[0xBB, 0xBB, 0xBB, 0xBB, 0xBB]);

        assert!(file.slice(u32::MAX as usize, u32::MAX as usize).is_err());
        assert!(file.slice(0, 2048).is_err());
        assert!(file.slice(usize::MAX, 1).is_err());
    }

    #[test]
    fn empty() {
        assert!(matches!(File::from_mem(vec![]), Err(Error::Empty)));
    }

    #[test]
    fn boundaries() {
        let file = File::from_mem(vec![0x42, 0x43, 0x44]).unwrap();

        assert_eq!(file.u16(1).unwrap(), 0x4443);
        assert!(matches!(
            file.u16(2),
            Err(Error::OutOfBounds { offset: 2, len: 2 })
        ));
        assert!(file.u32(0).is_err());
        assert!(file.u8(3).is_err());

        let empty_slice: &[u8] = &[];
        assert_eq!(file.slice(3, 0).unwrap(), empty_slice);
        assert!(file.slice(3, 1).is_err());
    }

    #[test]
    fn find_zero() {
        let file = File::from_mem(vec![0x00, 0x41, 0x42, 0x00, 0x43]).unwrap();

        assert_eq!(file.find_zero(0), Some(0));
        assert_eq!(file.find_zero(1), Some(3));
        assert_eq!(file.find_zero(3), Some(3));
        assert_eq!(file.find_zero(4), None);
        assert_eq!(file.find_zero(100), None);
    }
}
