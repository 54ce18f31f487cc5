use crate::{file::parser::Parser, Result};

/// A `type_list`: an ordered list of `type_ids` indices.
///
/// Used for the interfaces implemented by a class and for the parameters of a prototype.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeList {
    /// Offset of the list within the file, 0 for the implicit empty list
    pub offset: usize,
    /// Indices into `type_ids`
    pub type_idx: Vec<u16>,
}

impl TypeList {
    /// Read a `type_list` (`u32` size followed by `size` packed `u16` type indices).
    ///
    /// An offset of 0 denotes an absent list and yields an empty [`TypeList`] without
    /// touching `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the list extends past the end of `data`.
    pub fn read(data: &[u8], offset: u32) -> Result<TypeList> {
        if offset == 0 {
            return Ok(TypeList::default());
        }

        let mut parser = Parser::at(data, offset as usize)?;
        let size = parser.read_le::<u32>()?;

        let remaining = data.len().saturating_sub(parser.pos()) / 2;
        if size as usize > remaining {
            return Err(out_of_bounds_error!(parser.pos(), size as usize * 2));
        }

        let mut type_idx = Vec::with_capacity(size as usize);
        for _ in 0..size {
            type_idx.push(parser.read_le::<u16>()?);
        }

        Ok(TypeList {
            offset: offset as usize,
            type_idx,
        })
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.type_idx.len()
    }

    /// Returns true if the list has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.type_idx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn crafted() {
        let data = vec![
            0xAA, 0xAA, 0xAA, 0xAA, // unrelated
            0x03, 0x00, 0x00, 0x00, // size
            0x01, 0x00, // type_idx
            0x05, 0x00, // type_idx
            0x02, 0x01, // type_idx
        ];

        let list = TypeList::read(&data, 4).unwrap();
        assert_eq!(list.offset, 4);
        assert_eq!(list.type_idx, vec![1, 5, 0x0102]);
    }

    #[test]
    fn zero_offset_is_empty() {
        let list = TypeList::read(&[], 0).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.offset, 0);
    }

    #[test]
    fn truncated() {
        let data = vec![
            0x00, 0x00, 0x00, 0x00, //
            0xFF, 0xFF, 0x00, 0x00, // size
            0x01, 0x00, // type_idx
        ];

        assert!(matches!(
            TypeList::read(&data, 4),
            Err(Error::OutOfBounds { offset: 8, .. })
        ));
        assert!(TypeList::read(&data, 0x100).is_err());
    }
}
