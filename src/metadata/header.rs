//! The DEX file header.
//!
//! The header is a fixed 0x70 byte structure at the very start of the file. Besides the
//! magic/version tag and integrity fields it holds a `(size, offset)` pair for every id table,
//! which is all the information needed to locate any record in the file.
//!
//! # Reference
//! - [header_item](https://source.android.com/docs/core/runtime/dex-format#header-item)

use crate::{
    file::parser::Parser,
    metadata::tables::TableId,
    Result,
};

/// Size of the header in bytes
pub const HEADER_SIZE: usize = 0x70;

/// Value of `endian_tag` for little-endian files
pub const ENDIAN_CONSTANT: u32 = 0x1234_5678;

/// The header of a DEX file.
///
/// All fields are read verbatim. The checksum and signature are exposed but never verified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DexHeader {
    /// `dex\n` + three digit version + `\0`
    pub magic: [u8; 8],
    /// adler32 checksum of the rest of the file
    pub checksum: u32,
    /// SHA-1 signature of the rest of the file
    pub signature: [u8; 20],
    /// Declared size of the whole file
    pub file_size: u32,
    /// Declared size of the header
    pub header_size: u32,
    /// Byte order tag, [`ENDIAN_CONSTANT`] for little-endian files
    pub endian_tag: u32,
    /// Size of the link section
    pub link_size: u32,
    /// Offset of the link section
    pub link_off: u32,
    /// Offset of the map list
    pub map_off: u32,
    /// Number of rows in `string_ids`
    pub string_ids_size: u32,
    /// Offset of `string_ids`
    pub string_ids_off: u32,
    /// Number of rows in `type_ids`
    pub type_ids_size: u32,
    /// Offset of `type_ids`
    pub type_ids_off: u32,
    /// Number of rows in `proto_ids`
    pub proto_ids_size: u32,
    /// Offset of `proto_ids`
    pub proto_ids_off: u32,
    /// Number of rows in `field_ids`
    pub field_ids_size: u32,
    /// Offset of `field_ids`
    pub field_ids_off: u32,
    /// Number of rows in `method_ids`
    pub method_ids_size: u32,
    /// Offset of `method_ids`
    pub method_ids_off: u32,
    /// Number of rows in `class_defs`
    pub class_defs_size: u32,
    /// Offset of `class_defs`
    pub class_defs_off: u32,
    /// Size of the data section
    pub data_size: u32,
    /// Offset of the data section
    pub data_off: u32,
}

impl DexHeader {
    /// Read the header from the start of `data`.
    ///
    /// Only the layout is decoded here; semantic checks (magic, file size) are applied by
    /// [`crate::DexView`] according to its [`crate::ValidationConfig`].
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than [`HEADER_SIZE`].
    pub fn read(data: &[u8]) -> Result<DexHeader> {
        if data.len() < HEADER_SIZE {
            return Err(out_of_bounds_error!(0, HEADER_SIZE));
        }

        let mut parser = Parser::new(data);

        let mut magic = [0u8; 8];
        for byte in &mut magic {
            *byte = parser.read_le::<u8>()?;
        }

        let checksum = parser.read_le::<u32>()?;

        let mut signature = [0u8; 20];
        for byte in &mut signature {
            *byte = parser.read_le::<u8>()?;
        }

        Ok(DexHeader {
            magic,
            checksum,
            signature,
            file_size: parser.read_le::<u32>()?,
            header_size: parser.read_le::<u32>()?,
            endian_tag: parser.read_le::<u32>()?,
            link_size: parser.read_le::<u32>()?,
            link_off: parser.read_le::<u32>()?,
            map_off: parser.read_le::<u32>()?,
            string_ids_size: parser.read_le::<u32>()?,
            string_ids_off: parser.read_le::<u32>()?,
            type_ids_size: parser.read_le::<u32>()?,
            type_ids_off: parser.read_le::<u32>()?,
            proto_ids_size: parser.read_le::<u32>()?,
            proto_ids_off: parser.read_le::<u32>()?,
            field_ids_size: parser.read_le::<u32>()?,
            field_ids_off: parser.read_le::<u32>()?,
            method_ids_size: parser.read_le::<u32>()?,
            method_ids_off: parser.read_le::<u32>()?,
            class_defs_size: parser.read_le::<u32>()?,
            class_defs_off: parser.read_le::<u32>()?,
            data_size: parser.read_le::<u32>()?,
            data_off: parser.read_le::<u32>()?,
        })
    }

    /// Returns true if the magic is exactly `dex\n`, three ASCII digits and `\0`
    #[must_use]
    pub fn has_valid_magic(&self) -> bool {
        self.magic.starts_with(b"dex\n")
            && self.magic[4..7].iter().all(u8::is_ascii_digit)
            && self.magic[7] == 0
    }

    /// The format version encoded in the magic, e.g. `35` for `dex\n035\0`
    #[must_use]
    pub fn version(&self) -> Option<u16> {
        if !self.has_valid_magic() {
            return None;
        }

        Some(
            self.magic[4..7]
                .iter()
                .fold(0u16, |acc, digit| acc * 10 + u16::from(digit - b'0')),
        )
    }

    /// The `(row_count, offset)` pair the header declares for `table`
    #[must_use]
    pub fn table_info(&self, table: TableId) -> (u32, u32) {
        match table {
            TableId::StringId => (self.string_ids_size, self.string_ids_off),
            TableId::TypeId => (self.type_ids_size, self.type_ids_off),
            TableId::ProtoId => (self.proto_ids_size, self.proto_ids_off),
            TableId::FieldId => (self.field_ids_size, self.field_ids_off),
            TableId::MethodId => (self.method_ids_size, self.method_ids_off),
            TableId::ClassDef => (self.class_defs_size, self.class_defs_off),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn crafted() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[0..8].copy_from_slice(b"dex\n039\0");
        data[8..12].copy_from_slice(&0xDEAD_BEEF_u32.to_le_bytes());
        data[32..36].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        data[36..40].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        data[40..44].copy_from_slice(&ENDIAN_CONSTANT.to_le_bytes());
        for (i, word) in (56..112).step_by(4).enumerate() {
            data[word..word + 4].copy_from_slice(&(i as u32 + 1).to_le_bytes());
        }
        data
    }

    #[test]
    fn read() {
        let header = DexHeader::read(&crafted()).unwrap();

        assert!(header.has_valid_magic());
        assert_eq!(header.version(), Some(39));
        assert_eq!(header.checksum, 0xDEAD_BEEF);
        assert_eq!(header.file_size, 0x70);
        assert_eq!(header.endian_tag, ENDIAN_CONSTANT);
        assert_eq!(header.string_ids_size, 1);
        assert_eq!(header.string_ids_off, 2);
        assert_eq!(header.class_defs_size, 11);
        assert_eq!(header.class_defs_off, 12);
        assert_eq!(header.data_size, 13);
        assert_eq!(header.data_off, 14);

        for (i, table) in TableId::iter().enumerate() {
            let i = i as u32;
            assert_eq!(header.table_info(table), (2 * i + 1, 2 * i + 2));
        }
    }

    #[test]
    fn magic() {
        let mut data = crafted();

        data[5] = b'x';
        let header = DexHeader::read(&data).unwrap();
        assert!(!header.has_valid_magic());
        assert_eq!(header.version(), None);

        data[5] = b'3';
        data[7] = b'\n';
        assert!(!DexHeader::read(&data).unwrap().has_valid_magic());

        data[7] = 0;
        data[0] = b'D';
        assert!(!DexHeader::read(&data).unwrap().has_valid_magic());
    }

    #[test]
    fn truncated() {
        let data = crafted();
        assert!(DexHeader::read(&data[..HEADER_SIZE - 1]).is_err());
    }
}
