use crate::{
    file::io::read_le_at,
    metadata::tables::{RowReadable, TableId},
    Result,
};

/// One entry of the `field_ids` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldId {
    /// Index of this row within the table
    pub index: u32,
    /// Offset of this row within the file
    pub offset: usize,
    /// Index into `type_ids` of the declaring class
    pub class_idx: u16,
    /// Index into `type_ids` of the field type
    pub type_idx: u16,
    /// Index into `string_ids` of the field name
    pub name_idx: u32,
}

impl RowReadable for FieldId {
    const TABLE: TableId = TableId::FieldId;
    const ROW_SIZE: usize = 8;

    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self> {
        Ok(FieldId {
            index,
            offset: *offset,
            class_idx: read_le_at::<u16>(data, offset)?,
            type_idx: read_le_at::<u16>(data, offset)?,
            name_idx: read_le_at::<u32>(data, offset)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::MetadataTable;

    #[test]
    fn crafted() {
        let data = vec![
            0x01, 0x02, // class_idx
            0x03, 0x04, // type_idx
            0x05, 0x06, 0x07, 0x08, // name_idx
        ];

        let table = MetadataTable::<FieldId>::new(&data, 0, 1);
        let row = table.get(0).unwrap();
        assert_eq!(row.class_idx, 0x0201);
        assert_eq!(row.type_idx, 0x0403);
        assert_eq!(row.name_idx, 0x0807_0605);
    }
}
