//! DEX id tables and data items.
//!
//! This module contains the row types of the six fixed-stride id tables and the readers for
//! the variable-length data items they point to.
//!
//! # Tables
//! - [`StringId`] - `string_ids`, 4 bytes per row
//! - [`TypeId`] - `type_ids`, 4 bytes per row
//! - [`ProtoId`] - `proto_ids`, 12 bytes per row
//! - [`FieldId`] - `field_ids`, 8 bytes per row
//! - [`MethodId`] - `method_ids`, 8 bytes per row
//! - [`ClassDef`] - `class_defs`, 32 bytes per row
//!
//! # Data items
//! - [`TypeList`] - interface and parameter lists
//! - [`ClassData`] - diff-encoded member lists of a class
//! - [`MapItem`] - entries of the trailing map list
//!
//! # Reference
//! - [Dalvik Executable format](https://source.android.com/docs/core/runtime/dex-format)

mod classdata;
mod classdef;
mod fieldid;
mod maplist;
mod methodid;
mod protoid;
mod stringid;
mod typeid;
mod typelist;
mod types;

pub use classdata::{ClassData, EncodedField, EncodedMethod};
pub use classdef::ClassDef;
pub use fieldid::FieldId;
pub use maplist::{read_map_list, MapItem, MapItemType};
pub use methodid::MethodId;
pub use protoid::ProtoId;
pub use stringid::StringId;
pub use typeid::TypeId;
pub use typelist::TypeList;
pub use types::{MetadataTable, RowReadable, TableId, TableIterator};

/// Sentinel stored in optional index fields (e.g. a class without superclass)
pub const NO_INDEX: u32 = 0xFFFF_FFFF;
