//! DEX format decoding and the class model built on top of it.
//!
//! This module contains the complete decoding pipeline, from the fixed header over the id
//! tables and data items up to the linked class graph.
//!
//! # Key Components
//!
//! - [`dexobject::DexObject`] - Main entry point: a file plus its class loader
//! - [`dexview::DexView`] - Validated, bounds-checked access to every table
//! - [`header`] - The fixed 0x70 byte file header
//! - [`tables`] - Id table rows and the data items they reference
//! - [`streams`] - The memoizing string pool
//! - [`typesystem`] - Raw and linked class records, name conversion and the class loader
//! - [`flags`] - Access flags of classes and members
//! - [`validation`] - Header validation settings
//!
//! # Examples
//!
//! ```rust,no_run
//! use dexscope::DexObject;
//!
//! let dex = DexObject::from_mem(std::fs::read("classes.dex").unwrap())?;
//! println!("{} classes", dex.header().class_defs_size);
//!
//! if let Some(class) = dex.class_by_name("com.example.MainActivity")? {
//!     println!("extends {:?}", class.superclass);
//! }
//! # Ok::<(), dexscope::Error>(())
//! ```

/// Implementation of a loaded DEX file with its class loader
pub mod dexobject;
/// Implementation of the table level view of a DEX file
pub mod dexview;
/// Access flags of classes, fields and methods
pub mod flags;
/// Implementation of the DEX header
pub mod header;
/// Implementation of the variable-length data pools
pub mod streams;
/// Implementation of the DEX id tables and data items
pub mod tables;
/// Implementation of the DEX class model
pub mod typesystem;
/// Load-time validation settings
pub mod validation;
