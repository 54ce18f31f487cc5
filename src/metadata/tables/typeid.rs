use crate::{
    file::io::read_le_at,
    metadata::tables::{RowReadable, TableId},
    Result,
};

/// One entry of the `type_ids` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeId {
    /// Index of this row within the table
    pub index: u32,
    /// Offset of this row within the file
    pub offset: usize,
    /// Index into `string_ids` of the type descriptor
    pub descriptor_idx: u32,
}

impl RowReadable for TypeId {
    const TABLE: TableId = TableId::TypeId;
    const ROW_SIZE: usize = 4;

    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self> {
        Ok(TypeId {
            index,
            offset: *offset,
            descriptor_idx: read_le_at::<u32>(data, offset)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::tables::MetadataTable, Error};

    #[test]
    fn crafted() {
        let data = vec![
            0xFF, 0xFF, // padding
            0x07, 0x00, 0x00, 0x00, // descriptor_idx #0
            0x03, 0x00, 0x00, 0x00, // descriptor_idx #1
        ];

        let table = MetadataTable::<TypeId>::new(&data, 2, 2);
        assert_eq!(table.get(0).unwrap().descriptor_idx, 7);
        assert_eq!(table.get(1).unwrap().descriptor_idx, 3);
        assert!(matches!(
            table.get(2),
            Err(Error::IndexOutOfRange {
                table: TableId::TypeId,
                index: 2,
                count: 2
            })
        ));
    }

    #[test]
    fn table_outside_of_file() {
        let data = vec![0x00; 8];

        let table = MetadataTable::<TypeId>::new(&data, 6, 2);
        assert!(matches!(
            table.get(0),
            Err(Error::OutOfBounds { offset: 6, len: 4 })
        ));
    }
}
