//! Random-access view over a complete DEX file.
//!
//! [`DexView`] owns the file contents, validates the header once at construction and then
//! exposes bounds-checked accessors for every id table and the data items they reference.
//! Nothing beyond the header is decoded up front: a table whose offset or count is corrupt
//! only fails once one of its rows is actually accessed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dexscope::DexView;
//!
//! let data = std::fs::read("classes.dex").unwrap();
//! let view = DexView::from_mem(data)?;
//!
//! println!("DEX version {:?}", view.header().version());
//! for class_def in view.class_defs().iter() {
//!     let class_def = class_def?;
//!     println!("{}", view.class_name(class_def.class_idx)?);
//! }
//! # Ok::<(), dexscope::Error>(())
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use tracing::{debug, warn};

use crate::{
    file::File,
    metadata::{
        header::DexHeader,
        streams::StringPool,
        tables::{
            read_map_list, ClassData, ClassDef, FieldId, MapItem, MetadataTable, MethodId,
            ProtoId, RowReadable, TypeId, TypeList,
        },
        typesystem::descriptor_to_dot,
        validation::ValidationConfig,
    },
    Error::{FileSizeMismatch, InvalidMagic},
    Result,
};

/// A validated DEX file with typed, bounds-checked access to all of its tables.
///
/// The view is `Send + Sync`; decoded strings are memoized internally so repeated lookups
/// are cheap.
pub struct DexView {
    file: File,
    header: DexHeader,
    strings: StringPool,
    class_index: OnceLock<ClassIndex>,
}

/// Class defs by descriptor, built on first lookup
struct ClassIndex {
    classes: HashMap<Arc<str>, u32>,
    first_corrupt: Option<u32>,
}

impl DexView {
    /// Create a view from a complete file image, applying the default (strict) validation.
    ///
    /// ## Arguments
    /// * 'data' - The contents of the DEX file
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for an empty buffer, [`crate::Error::OutOfBounds`] if the
    /// buffer cannot hold a header, [`crate::Error::InvalidMagic`] or
    /// [`crate::Error::FileSizeMismatch`] if the header fails validation.
    pub fn from_mem(data: Vec<u8>) -> Result<DexView> {
        Self::from_mem_with_validation(data, ValidationConfig::default())
    }

    /// Create a view from a complete file image with a custom validation configuration.
    ///
    /// ## Arguments
    /// * 'data'        - The contents of the DEX file
    /// * 'validation'  - Which header checks to enforce
    ///
    /// # Errors
    /// See [`DexView::from_mem`]; disabled checks only produce a `warn!` event.
    pub fn from_mem_with_validation(
        data: Vec<u8>,
        validation: ValidationConfig,
    ) -> Result<DexView> {
        let file = File::from_mem(data)?;
        let header = DexHeader::read(file.data())?;

        if !header.has_valid_magic() {
            if validation.enable_magic_validation {
                return Err(InvalidMagic(header.magic));
            }
            warn!("Ignoring invalid DEX magic {:02x?}", header.magic);
        }

        if header.file_size as usize != file.len() {
            if validation.enable_file_size_validation {
                return Err(FileSizeMismatch {
                    declared: header.file_size,
                    actual: file.len(),
                });
            }
            warn!(
                "Ignoring file size mismatch: header={} actual={}",
                header.file_size,
                file.len()
            );
        }

        let strings = StringPool::new(header.string_ids_off, header.string_ids_size);

        Ok(DexView {
            file,
            header,
            strings,
            class_index: OnceLock::new(),
        })
    }

    /// Returns the parsed header
    #[must_use]
    pub fn header(&self) -> &DexHeader {
        &self.header
    }

    /// Returns the underlying file
    #[must_use]
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Returns the complete file contents
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.file.data()
    }

    /// Returns the string pool
    #[must_use]
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    /// The SHA-1 signature stored in the header (not verified)
    #[must_use]
    pub fn signature(&self) -> &[u8; 20] {
        &self.header.signature
    }

    /// A view over the id table holding rows of type `T`
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> MetadataTable<'_, T> {
        let (row_count, offset) = self.header.table_info(T::TABLE);
        MetadataTable::new(self.file.data(), offset, row_count)
    }

    /// A view over `class_defs`
    #[must_use]
    pub fn class_defs(&self) -> MetadataTable<'_, ClassDef> {
        self.table::<ClassDef>()
    }

    /// Get the string at `index` of `string_ids`
    ///
    /// # Errors
    /// See [`StringPool::get`].
    pub fn string_by_id(&self, index: u32) -> Result<Arc<str>> {
        self.strings.get(&self.file, index)
    }

    /// Get row `index` of `type_ids`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] or [`crate::Error::OutOfBounds`].
    pub fn type_id(&self, index: u32) -> Result<TypeId> {
        self.table::<TypeId>().get(index)
    }

    /// Get the descriptor of type `type_idx`, e.g. `Ljava/lang/String;`
    ///
    /// # Errors
    /// Returns an error if either the type row or its string cannot be decoded.
    pub fn type_descriptor(&self, type_idx: u32) -> Result<Arc<str>> {
        let type_id = self.type_id(type_idx)?;
        self.string_by_id(type_id.descriptor_idx)
    }

    /// Get the dotted name of type `type_idx`, e.g. `java.lang.String`
    ///
    /// # Errors
    /// See [`DexView::type_descriptor`].
    pub fn class_name(&self, type_idx: u32) -> Result<String> {
        Ok(descriptor_to_dot(&self.type_descriptor(type_idx)?))
    }

    /// Get row `index` of `field_ids`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] or [`crate::Error::OutOfBounds`].
    pub fn field_id(&self, index: u32) -> Result<FieldId> {
        self.table::<FieldId>().get(index)
    }

    /// Get row `index` of `method_ids`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] or [`crate::Error::OutOfBounds`].
    pub fn method_id(&self, index: u32) -> Result<MethodId> {
        self.table::<MethodId>().get(index)
    }

    /// Get row `index` of `proto_ids`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] or [`crate::Error::OutOfBounds`].
    pub fn proto_id(&self, index: u32) -> Result<ProtoId> {
        self.table::<ProtoId>().get(index)
    }

    /// Get row `index` of `class_defs`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] or [`crate::Error::OutOfBounds`].
    pub fn class_def(&self, index: u32) -> Result<ClassDef> {
        self.class_defs().get(index)
    }

    /// Get the descriptor of the class defined by `class_defs[index]`
    ///
    /// # Errors
    /// Returns an error if the class def, its type or the descriptor string cannot be decoded.
    pub fn class_descriptor(&self, index: u32) -> Result<Arc<str>> {
        let class_def = self.class_def(index)?;
        self.type_descriptor(class_def.class_idx)
    }

    /// Read the `type_list` at `offset`; 0 yields an empty list
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the list lies outside of the file.
    pub fn type_list(&self, offset: u32) -> Result<TypeList> {
        TypeList::read(self.file.data(), offset)
    }

    /// The interfaces directly implemented by a class
    ///
    /// # Errors
    /// See [`DexView::type_list`].
    pub fn interfaces(&self, class_def: &ClassDef) -> Result<TypeList> {
        self.type_list(class_def.interfaces_off)
    }

    /// The parameter types of a prototype
    ///
    /// # Errors
    /// See [`DexView::type_list`].
    pub fn parameters(&self, proto_id: &ProtoId) -> Result<TypeList> {
        self.type_list(proto_id.parameters_off)
    }

    /// Decode the member lists of a class; a class without class data yields empty lists
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] or [`crate::Error::Malformed`] for a truncated
    /// block and [`crate::Error::IndexOutOfRange`] if an accumulated index leaves its id table.
    pub fn class_data(&self, class_def: &ClassDef) -> Result<ClassData> {
        ClassData::read(
            self.file.data(),
            class_def.class_data_off,
            self.header.field_ids_size,
            self.header.method_ids_size,
        )
    }

    /// Find the class def declaring `descriptor` (e.g. `Lcom/example/Foo;`).
    ///
    /// The first call builds an index over all class defs; if two defs declare the same
    /// descriptor the first one wins. `Ok(None)` means the class is not defined in this file.
    ///
    /// Rows that fail to decode are left out of the index, so they never hide the classes
    /// that do decode.
    ///
    /// # Errors
    /// If `descriptor` is not in the index but some row could not be decoded, the error of
    /// the first such row is returned, as that row might have declared the class.
    pub fn class_def_by_descriptor(&self, descriptor: &str) -> Result<Option<ClassDef>> {
        let index = self.class_index();
        if let Some(&class_def_idx) = index.classes.get(descriptor) {
            return Ok(Some(self.class_def(class_def_idx)?));
        }

        match index.first_corrupt {
            Some(class_def_idx) => {
                let class_def = self.class_def(class_def_idx)?;
                let found = self.type_descriptor(class_def.class_idx)?;
                Ok((&*found == descriptor).then_some(class_def))
            }
            None => Ok(None),
        }
    }

    /// Read the map list; a file without one yields an empty list
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the map lies outside of the file.
    pub fn map_list(&self) -> Result<Vec<MapItem>> {
        read_map_list(self.file.data(), self.header.map_off)
    }

    fn class_index(&self) -> &ClassIndex {
        self.class_index.get_or_init(|| {
            let class_defs = self.class_defs();
            let mut index = ClassIndex {
                classes: HashMap::with_capacity(class_defs.capacity()),
                first_corrupt: None,
            };

            for class_def in class_defs.iter() {
                // rows are contiguous, once one is out of bounds all following ones are too
                let class_def = match class_def {
                    Ok(class_def) => class_def,
                    Err(error) => {
                        let row = class_defs.capacity() as u32;
                        warn!("Class def #{} is unreadable: {}", row, error);
                        index.first_corrupt.get_or_insert(row);
                        break;
                    }
                };

                match self.type_descriptor(class_def.class_idx) {
                    Ok(descriptor) => {
                        index.classes.entry(descriptor).or_insert(class_def.index);
                    }
                    Err(error) => {
                        warn!("Skipping class def #{}: {}", class_def.index, error);
                        index.first_corrupt.get_or_insert(class_def.index);
                    }
                }
            }

            debug!("Indexed {} class definitions", index.classes.len());
            index
        })
    }
}
