use crate::{
    file::io::read_le_at,
    metadata::tables::{RowReadable, TableId, NO_INDEX},
    Result,
};

/// One entry of the `class_defs` table.
///
/// Index fields are kept exactly as stored; [`ClassDef::superclass`] and
/// [`ClassDef::source_file`] translate the [`NO_INDEX`] sentinel into `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    /// Index of this row within the table
    pub index: u32,
    /// Offset of this row within the file
    pub offset: usize,
    /// Index into `type_ids` of this class
    pub class_idx: u32,
    /// Raw access flags, see [`crate::metadata::flags::AccessFlags`]
    pub access_flags: u32,
    /// Index into `type_ids` of the superclass, or [`NO_INDEX`]
    pub superclass_idx: u32,
    /// Offset of the interfaces `type_list`, 0 if there are none
    pub interfaces_off: u32,
    /// Index into `string_ids` of the source file name, or [`NO_INDEX`]
    pub source_file_idx: u32,
    /// Offset of the annotations directory, 0 if there is none
    pub annotations_off: u32,
    /// Offset of the `class_data_item`, 0 if the class declares no members
    pub class_data_off: u32,
    /// Offset of the static field initial values, 0 if there are none
    pub static_values_off: u32,
}

impl ClassDef {
    /// The superclass type index, `None` for a class without a superclass
    #[must_use]
    pub fn superclass(&self) -> Option<u32> {
        (self.superclass_idx != NO_INDEX).then_some(self.superclass_idx)
    }

    /// The source file string index, `None` if the information was stripped
    #[must_use]
    pub fn source_file(&self) -> Option<u32> {
        (self.source_file_idx != NO_INDEX).then_some(self.source_file_idx)
    }
}

impl RowReadable for ClassDef {
    const TABLE: TableId = TableId::ClassDef;
    const ROW_SIZE: usize = 32;

    fn row_read(data: &[u8], offset: &mut usize, index: u32) -> Result<Self> {
        Ok(ClassDef {
            index,
            offset: *offset,
            class_idx: read_le_at::<u32>(data, offset)?,
            access_flags: read_le_at::<u32>(data, offset)?,
            superclass_idx: read_le_at::<u32>(data, offset)?,
            interfaces_off: read_le_at::<u32>(data, offset)?,
            source_file_idx: read_le_at::<u32>(data, offset)?,
            annotations_off: read_le_at::<u32>(data, offset)?,
            class_data_off: read_le_at::<u32>(data, offset)?,
            static_values_off: read_le_at::<u32>(data, offset)?,
        })
    }
}
