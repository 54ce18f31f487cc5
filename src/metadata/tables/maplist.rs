use strum::{Display, EnumIter, FromRepr};

use crate::{file::parser::Parser, Result};

/// Section kinds listed in the map list.
#[derive(Clone, Copy, PartialEq, Debug, Display, EnumIter, FromRepr, Eq, Hash)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum MapItemType {
    HeaderItem = 0x0000,
    StringIdItem = 0x0001,
    TypeIdItem = 0x0002,
    ProtoIdItem = 0x0003,
    FieldIdItem = 0x0004,
    MethodIdItem = 0x0005,
    ClassDefItem = 0x0006,
    CallSiteIdItem = 0x0007,
    MethodHandleItem = 0x0008,
    MapList = 0x1000,
    TypeList = 0x1001,
    AnnotationSetRefList = 0x1002,
    AnnotationSetItem = 0x1003,
    ClassDataItem = 0x2000,
    CodeItem = 0x2001,
    StringDataItem = 0x2002,
    DebugInfoItem = 0x2003,
    AnnotationItem = 0x2004,
    EncodedArrayItem = 0x2005,
    AnnotationsDirectoryItem = 0x2006,
    HiddenapiClassDataItem = 0xF000,
}

/// One entry of the map list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapItem {
    /// Raw section kind as stored in the file
    pub type_code: u16,
    /// Number of items in the section
    pub size: u32,
    /// Offset of the first item of the section
    pub offset: u32,
}

impl MapItem {
    /// Size of one map item in bytes
    pub const SIZE: usize = 12;

    /// The known section kind, `None` for codes introduced by newer format versions
    #[must_use]
    pub fn item_type(&self) -> Option<MapItemType> {
        MapItemType::from_repr(self.type_code)
    }
}

/// Read the map list located at `offset`.
///
/// The map is a `u32` count followed by 12-byte items `(type: u16, unused: u16, size: u32,
/// offset: u32)`. An offset of 0 yields an empty list.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the list extends past the end of `data`.
pub fn read_map_list(data: &[u8], offset: u32) -> Result<Vec<MapItem>> {
    if offset == 0 {
        return Ok(Vec::new());
    }

    let mut parser = Parser::at(data, offset as usize)?;
    let count = parser.read_le::<u32>()? as usize;

    let remaining = data.len().saturating_sub(parser.pos()) / MapItem::SIZE;
    if count > remaining {
        return Err(out_of_bounds_error!(
            parser.pos(),
            count.saturating_mul(MapItem::SIZE)
        ));
    }

    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let type_code = parser.read_le::<u16>()?;
        let _unused = parser.read_le::<u16>()?;
        items.push(MapItem {
            type_code,
            size: parser.read_le::<u32>()?,
            offset: parser.read_le::<u32>()?,
        });
    }

    Ok(items)
}
