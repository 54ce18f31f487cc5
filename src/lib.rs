// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dexscope
//!
//! A fast, zero-copy framework for decoding Android DEX (Dalvik Executable) files into a
//! navigable class model. Built in pure Rust, `dexscope` reads the header and id tables of a
//! DEX file directly from memory and links its classes, fields and methods into a graph,
//! without requiring the Android SDK or a JVM.
//!
//! ## Features
//!
//! - **📦 Lazy decoding** - Only the header is parsed up front, everything else on access
//! - **🔍 Complete table access** - Strings, types, prototypes, fields, methods, class defs, map
//! - **🔗 Linked class graph** - Cyclic references resolved to shared records
//! - **🛡️ Memory safe** - Bounds-checked everywhere, malformed input yields precise errors
//! - **🧵 Thread safe** - Caches are concurrent, objects are `Send + Sync`
//!
//! ## Quick Start
//!
//! Add `dexscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dexscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust,no_run
//! use dexscope::prelude::*;
//!
//! let dex = DexObject::from_mem(std::fs::read("classes.dex").unwrap())?;
//! println!("Found {} classes", dex.class_names()?.len());
//! # Ok::<(), dexscope::Error>(())
//! ```
//!
//! ### Basic Usage
//!
//! ```rust,no_run
//! use dexscope::DexObject;
//!
//! let dex = DexObject::from_mem(std::fs::read("classes.dex")?)?;
//!
//! // raw records carry dotted type names
//! if let Some(class) = dex.class_by_name("com.example.MainActivity")? {
//!     println!("{} extends {:?}", class.name, class.superclass);
//!     for method in &class.methods {
//!         println!("  {}({})", method.name, method.parameter_types.join(", "));
//!     }
//! }
//!
//! // resolved records link every type to a shared record
//! if let Some(class) = dex.class_by_name_resolved("com.example.MainActivity")? {
//!     let superclass = class.superclass().map(|s| s.name.clone());
//!     println!("{} extends {:?}", class.name, superclass);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`File`] and [`Parser`] - Bounds-checked reads and ULEB128 decoding, no format knowledge
//! - [`metadata::header`] - The fixed file header
//! - [`metadata::tables`] - Id table rows, type lists, class data and the map list
//! - [`metadata::streams`] - The memoizing string pool
//! - [`DexView`] - Validated table-level access to one file
//! - [`metadata::typesystem`] - Raw and linked class records and the [`ClassLoader`]
//! - [`DexObject`] - A view plus its class loader, the main entry point
//!
//! ## Logging
//!
//! Cache misses, class resolution and stub creation are reported through [`tracing`]
//! events (`debug` and `trace` level); relaxed validation reports what it let through at
//! `warn` level. No subscriber is installed by the library.
//!
//! ## Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```
#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use dexscope::prelude::*;
///
/// let dex = DexObject::from_mem(std::fs::read("classes.dex").unwrap())?;
/// let classes = dex.classes()?;
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod prelude;

/// Decoding of the DEX format and the class model built on top of it
///
/// # Key Components
///
/// - [`DexObject`] - Main entry point
/// - [`DexView`] - Table level access
/// - [`metadata::typesystem`] - Class records and the class loader
/// - [`metadata::tables`] - Id tables and data items
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::DexView;
///
/// let view = DexView::from_mem(std::fs::read("classes.dex").unwrap())?;
/// let class_def = view.class_def(0)?;
/// println!("{}", view.class_name(class_def.class_idx)?);
/// # Ok::<(), dexscope::Error>(())
/// ```
pub mod metadata;

/// `dexscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dexscope` Error type
///
/// The main error type for all operations in this crate.
///
/// # Examples
///
/// ```rust,no_run
/// use dexscope::{DexObject, Error};
///
/// match DexObject::from_mem(std::fs::read("classes.dex").unwrap()) {
///     Ok(_) => println!("Loaded successfully"),
///     Err(Error::InvalidMagic(magic)) => println!("Not a DEX file: {:02x?}", magic),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;

/// Main entry point for working with DEX files.
///
/// See [`metadata::dexobject::DexObject`].
pub use metadata::dexobject::DexObject;

/// Table level access to a DEX file.
///
/// See [`metadata::dexview::DexView`].
pub use metadata::dexview::DexView;

/// Header validation settings.
pub use metadata::validation::ValidationConfig;

/// The class loader and the linked class records it produces.
pub use metadata::typesystem::{ClassLoader, ClassType, ClassTypeRc, RawClass};

/// Provides access to low-level file and memory parsing utilities.
///
/// The [`Parser`] type is used for decoding ULEB128 values and little-endian primitives
/// from a byte slice, [`File`] for bounds-checked random access to a complete file.
///
/// # Example
///
/// ```rust
/// use dexscope::Parser;
/// let data = [0xE5, 0x8E, 0x26];
/// let mut parser = Parser::new(&data);
/// assert_eq!(parser.read_uleb128()?, 624_485);
/// # Ok::<(), dexscope::Error>(())
/// ```
pub use file::{parser::Parser, File};
