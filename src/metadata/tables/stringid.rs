use crate::{
    file::io::read_le_at,
    metadata::tables::{RowReadable, TableId},
    Result,
};

/// One entry of the `string_ids` table: the absolute offset of a string data item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringId {
    /// Index of this row within the table
    pub index: u32,
    /// Offset of this row within the file
    pub offset: usize,
    /// Absolute offset of the `string_data_item`
    pub data_off: u32,
}

impl RowReadable for StringId {
    const TABLE: TableId = TableId::StringId;
    const ROW_SIZE: usize = 4;

    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self> {
        Ok(StringId {
            index,
            offset: *offset,
            data_off: read_le_at::<u32>(data, offset)?,
        })
    }
}
