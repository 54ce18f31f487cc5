//! A loaded DEX file together with its class loader.
//!
//! [`DexObject`] is the main entry point of the crate. It wraps a [`DexView`] for raw table
//! access and a [`ClassLoader`] that turns class definitions into [`RawClass`] and
//! [`crate::metadata::typesystem::ClassType`] records on demand.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dexscope::DexObject;
//!
//! let dex = DexObject::from_mem(std::fs::read("classes.dex").unwrap())?;
//!
//! for name in dex.class_names()? {
//!     let class = dex.class_by_name(&name)?.unwrap();
//!     println!("{} ({} fields, {} methods)", class.name, class.fields.len(), class.methods.len());
//! }
//!
//! if let Some(class) = dex.class_by_name_resolved("com.example.MainActivity")? {
//!     for field in class.fields() {
//!         println!("{}: {:?}", field.name, field.field_type.name());
//!     }
//! }
//! # Ok::<(), dexscope::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        dexview::DexView,
        header::DexHeader,
        typesystem::{descriptor_to_dot, ClassLoader, ClassTypeRc, RawClass},
        validation::ValidationConfig,
    },
    Result,
};

/// A DEX file with lazily decoded, cached classes.
///
/// All lookups accept dotted names (`com.example.Foo`) as well as descriptors
/// (`Lcom/example/Foo;`). The object is `Send + Sync` and can be shared between threads.
pub struct DexObject {
    view: DexView,
    loader: ClassLoader,
}

impl DexObject {
    /// Load a DEX file from memory with the default (strict) validation.
    ///
    /// ## Arguments
    /// * 'data' - The contents of the DEX file
    ///
    /// # Errors
    /// See [`DexView::from_mem`].
    pub fn from_mem(data: Vec<u8>) -> Result<DexObject> {
        Self::from_mem_with_validation(data, ValidationConfig::default())
    }

    /// Load a DEX file from memory with a custom validation configuration.
    ///
    /// # Errors
    /// See [`DexView::from_mem_with_validation`].
    pub fn from_mem_with_validation(
        data: Vec<u8>,
        validation: ValidationConfig,
    ) -> Result<DexObject> {
        Ok(DexObject {
            view: DexView::from_mem_with_validation(data, validation)?,
            loader: ClassLoader::new(),
        })
    }

    /// Returns the underlying table view
    #[must_use]
    pub fn view(&self) -> &DexView {
        &self.view
    }

    /// Returns the class loader holding all decoded classes
    #[must_use]
    pub fn loader(&self) -> &ClassLoader {
        &self.loader
    }

    /// Returns the parsed header
    #[must_use]
    pub fn header(&self) -> &DexHeader {
        self.view.header()
    }

    /// Find a class defined in this file, with all types as dotted names.
    ///
    /// # Errors
    /// Returns any decode error hit while reading the class definition.
    pub fn class_by_name(&self, name: &str) -> Result<Option<Arc<RawClass>>> {
        self.loader.find_raw(&self.view, name)
    }

    /// Find a class defined in this file with all of its types linked.
    ///
    /// Referenced classes that are not defined in this file appear as stub records.
    ///
    /// # Errors
    /// Returns any decode error hit while reading the class or anything it references.
    pub fn class_by_name_resolved(&self, name: &str) -> Result<Option<ClassTypeRc>> {
        self.loader.find_resolved(&self.view, name)
    }

    /// Dotted names of all classes defined in this file, in definition order
    ///
    /// # Errors
    /// Returns an error if a class definition or its name cannot be decoded.
    pub fn class_names(&self) -> Result<Vec<String>> {
        self.view
            .class_defs()
            .iter()
            .map(|class_def| -> Result<String> {
                let descriptor = self.view.type_descriptor(class_def?.class_idx)?;
                Ok(descriptor_to_dot(&descriptor))
            })
            .collect()
    }

    /// All classes defined in this file, in definition order
    ///
    /// A descriptor defined twice is reported for each definition, both times with the
    /// record of the first one.
    ///
    /// # Errors
    /// Returns the first error hit while decoding any class.
    pub fn classes(&self) -> Result<Vec<Arc<RawClass>>> {
        let mut classes = Vec::with_capacity(self.view.class_defs().capacity());
        for name in self.class_names()? {
            if let Some(class) = self.class_by_name(&name)? {
                classes.push(class);
            }
        }

        Ok(classes)
    }
}
