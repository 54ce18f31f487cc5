//! # dexscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dexscope library. Import this module to get quick access to the essential
//! types for DEX analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dexscope operations
pub use crate::Error;

/// The result type used throughout dexscope
pub use crate::Result;

/// Configuration for header validation during loading
pub use crate::ValidationConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry points for DEX analysis
pub use crate::{DexObject, DexView};

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Format
// ================================================================================================

/// The file header
pub use crate::metadata::header::DexHeader;

/// Id table rows and data items
pub use crate::metadata::tables::{
    ClassData, ClassDef, EncodedField, EncodedMethod, FieldId, MapItem, MapItemType, MethodId,
    ProtoId, TableId, TypeId, TypeList, NO_INDEX,
};

/// Access flags of classes and members
pub use crate::metadata::flags::AccessFlags;

// ================================================================================================
// Class Model
// ================================================================================================

/// Raw and linked class records
pub use crate::metadata::typesystem::{
    ClassLoader, ClassType, ClassTypeRc, ClassTypeRef, RawClass, RawField, RawMethod,
    ResolvedField, ResolvedMethod, ROOT_OBJECT,
};

/// Conversion between descriptors and dotted names
pub use crate::metadata::typesystem::{descriptor_to_dot, dot_to_descriptor};
