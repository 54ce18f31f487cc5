//! Generic fixed-stride table access.
//!
//! Every id table of a DEX file (`string_ids`, `type_ids`, `proto_ids`, `field_ids`,
//! `method_ids`, `class_defs`) is an array of equally sized rows located through a
//! `(count, offset)` pair in the header. [`MetadataTable`] is a zero-copy view over such an
//! array; rows are decoded on demand through the [`RowReadable`] implementation of the row type.

use std::marker::PhantomData;

use strum::{Display, EnumCount, EnumIter};

use crate::{Error::IndexOutOfRange, Result};

/// Identifies one of the six id tables described by the DEX header.
#[derive(Clone, Copy, PartialEq, Debug, Display, EnumIter, EnumCount, Eq, Hash)]
pub enum TableId {
    /// `string_ids` - offsets of string data items
    #[strum(to_string = "string_ids")]
    StringId,
    /// `type_ids` - type descriptors
    #[strum(to_string = "type_ids")]
    TypeId,
    /// `proto_ids` - method prototypes
    #[strum(to_string = "proto_ids")]
    ProtoId,
    /// `field_ids` - field references
    #[strum(to_string = "field_ids")]
    FieldId,
    /// `method_ids` - method references
    #[strum(to_string = "method_ids")]
    MethodId,
    /// `class_defs` - class definitions
    #[strum(to_string = "class_defs")]
    ClassDef,
}

/// A row type that can be decoded from a fixed-stride id table.
pub trait RowReadable: Sized {
    /// Table this row type belongs to
    const TABLE: TableId;

    /// Size of one row in bytes
    const ROW_SIZE: usize;

    /// Decode one row from `data` at `offset`, advancing `offset` past it.
    ///
    /// ## Arguments
    /// * 'data'    - The complete file contents
    /// * 'offset'  - Absolute offset of the row, advanced by [`Self::ROW_SIZE`] on success
    /// * 'index'   - Index of the row within its table
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row extends past the end of `data`.
    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self>;
}

/// Zero-copy view over one id table.
///
/// The view itself is created without validating its offset; a header that points a table
/// outside of the file only fails once a row of that table is actually read.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    offset: usize,
    row_count: u32,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Create a new table view
    ///
    /// ## Arguments
    /// * 'data'        - The complete file contents
    /// * 'offset'      - Absolute offset of the first row
    /// * 'row_count'   - Number of rows declared by the header
    #[must_use]
    pub fn new(data: &'a [u8], offset: u32, row_count: u32) -> Self {
        MetadataTable {
            data,
            offset: offset as usize,
            row_count,
            _phantom: PhantomData,
        }
    }

    /// Number of rows declared for this table
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of rows that actually fit into the file, at most [`Self::row_count`].
    ///
    /// The row count comes straight from the header; use this instead when sizing
    /// allocations.
    #[must_use]
    pub fn capacity(&self) -> usize {
        let available = self.data.len().saturating_sub(self.offset) / T::ROW_SIZE;
        available.min(self.row_count as usize)
    }

    /// Size of one row in bytes
    #[must_use]
    pub fn row_size(&self) -> usize {
        T::ROW_SIZE
    }

    /// Absolute offset of the first row
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Decode the row at `index` (0-based).
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] if `index >= row_count`, or
    /// [`crate::Error::OutOfBounds`] if the row lies outside of the file.
    pub fn get(&self, index: u32) -> Result<T> {
        if index >= self.row_count {
            return Err(IndexOutOfRange {
                table: T::TABLE,
                index,
                count: self.row_count,
            });
        }

        let Some(mut offset) = (index as usize)
            .checked_mul(T::ROW_SIZE)
            .and_then(|relative| relative.checked_add(self.offset))
        else {
            return Err(out_of_bounds_error!(self.offset, T::ROW_SIZE));
        };

        T::row_read(self.data, &mut offset, index)
    }

    /// Iterate over all rows, yielding a decode result for each
    #[must_use]
    pub fn iter(&'a self) -> TableIterator<'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
        }
    }
}

impl<'a, T: RowReadable> IntoIterator for &'a MetadataTable<'a, T> {
    type Item = Result<T>;
    type IntoIter = TableIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the rows of a [`MetadataTable`]
pub struct TableIterator<'a, T> {
    table: &'a MetadataTable<'a, T>,
    current_row: u32,
}

impl<T: RowReadable> Iterator for TableIterator<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        let row = self.table.get(self.current_row);
        self.current_row += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.table.row_count - self.current_row) as usize;
        let readable = self
            .table
            .capacity()
            .saturating_sub(self.current_row as usize);
        (readable.min(remaining), Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::tables::StringId, Error};

    #[test]
    fn capacity_is_bounded_by_data() {
        let data = [0u8; 10];

        let table = MetadataTable::<StringId>::new(&data, 2, 0xFFFF_FFFF);
        assert_eq!(table.row_count(), 0xFFFF_FFFF);
        assert_eq!(table.capacity(), 2);

        let mut rows = table.iter();
        assert_eq!(rows.size_hint(), (2, Some(0xFFFF_FFFF)));
        assert!(rows.next().unwrap().is_ok());
        assert!(rows.next().unwrap().is_ok());
        assert_eq!(rows.size_hint().0, 0);
        assert!(matches!(rows.next(), Some(Err(Error::OutOfBounds { offset: 10, .. }))));

        let short = MetadataTable::<StringId>::new(&data, 0, 1);
        assert_eq!(short.capacity(), 1);
        assert_eq!(MetadataTable::<StringId>::new(&data, 64, 3).capacity(), 0);
    }
}
