//! The string pool (`string_ids` + `string_data_item`s)
//!
//! Each `string_ids` row holds the absolute offset of a `string_data_item`: the UTF-16 length
//! of the string as ULEB128, followed by the string bytes in modified UTF-8 and a zero
//! terminator.
//!
//! # Reference
//! - [string_data_item](https://source.android.com/docs/core/runtime/dex-format#string-data-item)

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use dashmap::DashMap;
use tracing::trace;

use crate::{
    file::{parser::read_uleb128, File},
    metadata::tables::{MetadataTable, StringId},
    Result,
};

/// Memoizing decoder for the strings of one DEX file.
///
/// The pool does not own the file contents; callers pass the same [`File`] on each access.
/// Decoded strings are cached per index, so repeated lookups never touch the buffer again.
///
/// Strings are decoded as UTF-8 with lossy replacement. Modified UTF-8 differs from UTF-8
/// for the encoded NUL (`C0 80`) and for supplementary characters (stored as two
/// three-byte surrogates); both come out as U+FFFD.
///
/// # Examples
///
/// ```rust
/// use dexscope::{metadata::streams::StringPool, File};
///
/// // one string_ids row pointing at offset 4: len=5, "Hello", NUL
/// let file = File::from_mem(vec![0x04, 0x00, 0x00, 0x00, 0x05, b'H', b'e', b'l', b'l', b'o', 0x00])?;
/// let strings = StringPool::new(0, 1);
///
/// assert_eq!(&*strings.get(&file, 0)?, "Hello");
/// assert_eq!(strings.decoded_count(), 1);
/// # Ok::<(), dexscope::Error>(())
/// ```
pub struct StringPool {
    table_offset: u32,
    count: u32,
    cache: DashMap<u32, Arc<str>>,
    decoded: AtomicUsize,
}

impl StringPool {
    /// Create a new pool for a `string_ids` table
    ///
    /// ## Arguments
    /// * 'table_offset'    - Absolute offset of `string_ids`
    /// * 'count'           - Number of rows in `string_ids`
    #[must_use]
    pub fn new(table_offset: u32, count: u32) -> Self {
        StringPool {
            table_offset,
            count,
            cache: DashMap::new(),
            decoded: AtomicUsize::new(0),
        }
    }

    /// Number of strings in the pool
    #[must_use]
    pub fn len(&self) -> u32 {
        self.count
    }

    /// Returns true if the pool holds no strings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// How many strings have been decoded from the buffer so far (cache misses)
    #[must_use]
    pub fn decoded_count(&self) -> usize {
        self.decoded.load(Ordering::Relaxed)
    }

    /// Get the string at `index`.
    ///
    /// ## Arguments
    /// * 'file'    - The file holding the pool
    /// * 'index'   - Index into `string_ids`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] for an index outside of `string_ids`,
    /// [`crate::Error::OutOfBounds`] if the row or its data lies outside of the file, and
    /// [`crate::Error::Malformed`] if the string data has no zero terminator.
    pub fn get(&self, file: &File, index: u32) -> Result<Arc<str>> {
        if let Some(cached) = self.cache.get(&index) {
            return Ok(cached.value().clone());
        }

        let row =
            MetadataTable::<StringId>::new(file.data(), self.table_offset, self.count).get(index)?;
        let decoded = Self::decode(file, row.data_off as usize)?;

        self.decoded.fetch_add(1, Ordering::Relaxed);
        trace!("Decoded string #{} at {:#x}", index, row.data_off);

        Ok(self.cache.entry(index).or_insert(decoded).value().clone())
    }

    fn decode(file: &File, data_off: usize) -> Result<Arc<str>> {
        let (_utf16_len, start) = read_uleb128(file.data(), data_off)?;

        let Some(end) = file.find_zero(start) else {
            return Err(malformed_error!(
                "String data at {:#x} has no terminator",
                data_off
            ));
        };

        let bytes = file.slice(start, end - start)?;
        Ok(Arc::from(String::from_utf8_lossy(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn crafted() -> File {
        File::from_mem(vec![
            0x0C, 0x00, 0x00, 0x00, // #0 -> 0x0C
            0x14, 0x00, 0x00, 0x00, // #1 -> 0x14
            0x16, 0x00, 0x00, 0x00, // #2 -> 0x16
            0x06, b'<', b'i', b'n', b'i', b't', b'>', 0x00, // 0x0C
            0x00, 0x00, // 0x14: empty string
            0x03, 0xC3, 0xA4, b'b', 0xED, 0x00, // 0x16: "äb" + lone lead byte
        ])
        .unwrap()
    }

    #[test]
    fn crafted_strings() {
        let data = crafted();
        let strings = StringPool::new(0, 3);

        assert_eq!(strings.len(), 3);
        assert_eq!(&*strings.get(&data, 0).unwrap(), "<init>");
        assert_eq!(&*strings.get(&data, 1).unwrap(), "");
        assert_eq!(&*strings.get(&data, 2).unwrap(), "äb\u{FFFD}");
    }

    #[test]
    fn cache_hit() {
        let data = crafted();
        let strings = StringPool::new(0, 3);

        let first = strings.get(&data, 0).unwrap();
        assert_eq!(strings.decoded_count(), 1);

        let second = strings.get(&data, 0).unwrap();
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(strings.decoded_count(), 1);

        // cached strings never touch the buffer again
        let unrelated = File::from_mem(vec![0xFF; 4]).unwrap();
        assert_eq!(&*strings.get(&unrelated, 0).unwrap(), "<init>");
    }

    #[test]
    fn invalid() {
        let data = crafted();
        let strings = StringPool::new(0, 3);

        assert!(matches!(
            strings.get(&data, 3),
            Err(Error::IndexOutOfRange { index: 3, count: 3, .. })
        ));

        let unterminated = File::from_mem(vec![0x04, 0x00, 0x00, 0x00, 0x02, b'h', b'i']).unwrap();
        let strings = StringPool::new(0, 1);
        assert!(matches!(
            strings.get(&unterminated, 0),
            Err(Error::Malformed { .. })
        ));
        assert_eq!(strings.decoded_count(), 0);

        let dangling = File::from_mem(vec![0x40, 0x00, 0x00, 0x00]).unwrap();
        assert!(matches!(
            strings.get(&dangling, 0),
            Err(Error::OutOfBounds { offset: 0x40, .. })
        ));
    }
}
