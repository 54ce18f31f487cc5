use crate::{
    file::io::read_le_at,
    metadata::tables::{RowReadable, TableId},
    Result,
};

/// One entry of the `proto_ids` table, describing a method prototype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtoId {
    /// Index of this row within the table
    pub index: u32,
    /// Offset of this row within the file
    pub offset: usize,
    /// Index into `string_ids` of the short-form descriptor
    pub shorty_idx: u32,
    /// Index into `type_ids` of the return type
    pub return_type_idx: u32,
    /// Offset of the parameter `type_list`, 0 if the prototype takes no parameters
    pub parameters_off: u32,
}

impl RowReadable for ProtoId {
    const TABLE: TableId = TableId::ProtoId;
    const ROW_SIZE: usize = 12;

    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self> {
        Ok(ProtoId {
            index,
            offset: *offset,
            shorty_idx: read_le_at::<u32>(data, offset)?,
            return_type_idx: read_le_at::<u32>(data, offset)?,
            parameters_off: read_le_at::<u32>(data, offset)?,
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
            0x01, 0x00, 0x00, 0x00, // shorty_idx
            0x02, 0x00, 0x00, 0x00, // return_type_idx
            0x00, 0x00, 0x00, 0x00, // parameters_off
            0x05, 0x00, 0x00, 0x00, // shorty_idx
            0x06, 0x00, 0x00, 0x00, // return_type_idx
            0x40, 0x01, 0x00, 0x00, // parameters_off
        ];

        let table = MetadataTable::<ProtoId>::new(&data, 0, 2);

        let eval = |row: ProtoId, shorty, ret, params| {
            assert_eq!(row.shorty_idx, shorty);
            assert_eq!(row.return_type_idx, ret);
            assert_eq!(row.parameters_off, params);
        };

        eval(table.get(0).unwrap(), 1, 2, 0);
        eval(table.get(1).unwrap(), 5, 6, 0x140);
        assert_eq!(table.get(1).unwrap().offset, 12);
    }
}
