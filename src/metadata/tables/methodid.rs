use crate::{
    file::io::read_le_at,
    metadata::tables::{RowReadable, TableId},
    Result,
};

/// One entry of the `method_ids` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodId {
    /// Index of this row within the table
    pub index: u32,
    /// Offset of this row within the file
    pub offset: usize,
    /// Index into `type_ids` of the declaring class
    pub class_idx: u16,
    /// Index into `proto_ids` of the prototype
    pub proto_idx: u16,
    /// Index into `string_ids` of the method name
    pub name_idx: u32,
}

impl RowReadable for MethodId {
    const TABLE: TableId = TableId::MethodId;
    const ROW_SIZE: usize = 8;

    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self> {
        Ok(MethodId {
            index,
            offset: *offset,
            class_idx: read_le_at::<u16>(data, offset)?,
            proto_idx: read_le_at::<u16>(data, offset)?,
            name_idx: read_le_at::<u32>(data, offset)?,
        })
    }
}
