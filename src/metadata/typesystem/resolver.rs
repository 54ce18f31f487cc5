//! Two-level class cache turning class definitions into a linked class graph.
//!
//! Both caches are keyed by descriptor, so `java.lang.String`, `Ljava/lang/String;` and
//! `Ljava.lang.String;` all address the same entry.
//!
//! Resolution publishes a record before any of its references are followed. A reference
//! back to a class that is still being filled in hits the cache and receives the very same
//! record, which is what makes self-referencing and mutually referencing classes terminate.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::{
    metadata::{
        dexview::DexView,
        typesystem::{
            normalize_to_descriptor, ClassType, ClassTypeRc, ClassTypeRef, RawClass,
            ResolvedField, ResolvedMethod,
        },
    },
    Error::LockError,
    Result,
};

/// Caching class loader for a single [`DexView`].
///
/// The loader owns every resolved record. Top-level resolutions are serialized, so no
/// caller ever observes a record that is still being filled in. If a resolution fails, all
/// records it published are withdrawn again; records completed by earlier calls stay valid.
pub struct ClassLoader {
    raw: DashMap<String, Option<Arc<RawClass>>>,
    resolved: DashMap<String, ClassTypeRc>,
    lock: Mutex<()>,
}

impl Default for ClassLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassLoader {
    /// Create an empty loader
    #[must_use]
    pub fn new() -> Self {
        ClassLoader {
            raw: DashMap::new(),
            resolved: DashMap::new(),
            lock: Mutex::new(()),
        }
    }

    /// Number of resolved records, stubs included
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Find the raw record of a class defined in `view`.
    ///
    /// `name` may be dotted or a descriptor. Absence is cached as well, so a miss is only
    /// looked up once.
    ///
    /// # Errors
    /// Returns any decode error hit while reading the class definition.
    pub fn find_raw(&self, view: &DexView, name: &str) -> Result<Option<Arc<RawClass>>> {
        let Some(descriptor) = normalize_to_descriptor(name) else {
            return Ok(None);
        };

        if let Some(cached) = self.raw.get(&descriptor) {
            trace!("Fast path: raw class {} cached", descriptor);
            return Ok(cached.value().clone());
        }

        let raw = match view.class_def_by_descriptor(&descriptor)? {
            Some(class_def) => {
                let raw = Arc::new(RawClass::read(view, &class_def)?);
                debug!("Slow path: decoded class {}", raw.name);
                Some(raw)
            }
            None => {
                trace!("Class {} is not defined in this file", descriptor);
                None
            }
        };

        Ok(self.raw.entry(descriptor).or_insert(raw).value().clone())
    }

    /// Find the linked record of a class defined in `view`.
    ///
    /// Repeated calls return the identical record. Classes that are not defined in the file
    /// yield `None`, even if a stub was created for them while resolving another class.
    ///
    /// # Errors
    /// Returns any decode error hit while reading this class or anything it references, and
    /// [`crate::Error::LockError`] if a previous resolution panicked.
    pub fn find_resolved(&self, view: &DexView, name: &str) -> Result<Option<ClassTypeRc>> {
        let resolved =
            self.locked(|loader, published| loader.resolve_class(view, name, published))?;
        Ok(resolved.filter(|class| !class.stub))
    }

    /// Resolve a type reference, synthesizing a shared stub if the class is not defined in
    /// `view`.
    ///
    /// # Errors
    /// See [`ClassLoader::find_resolved`].
    pub fn resolve_type_ref(&self, view: &DexView, name: &str) -> Result<ClassTypeRc> {
        self.locked(|loader, published| loader.type_ref(view, name, published))
    }

    fn locked<T>(
        &self,
        resolve: impl FnOnce(&Self, &mut Vec<String>) -> Result<T>,
    ) -> Result<T> {
        let _guard = self.lock.lock().map_err(|_| LockError)?;

        let mut published = Vec::new();
        let result = resolve(self, &mut published);
        if result.is_err() && !published.is_empty() {
            for descriptor in &published {
                self.resolved.remove(descriptor);
            }
            debug!("Withdrew {} records after failed resolution", published.len());
        }

        result
    }

    fn resolve_class(
        &self,
        view: &DexView,
        name: &str,
        published: &mut Vec<String>,
    ) -> Result<Option<ClassTypeRc>> {
        let Some(descriptor) = normalize_to_descriptor(name) else {
            return Ok(None);
        };

        if let Some(cached) = self.resolved.get(&descriptor) {
            trace!("Fast path: resolved class {} cached", descriptor);
            return Ok(Some(cached.value().clone()));
        }

        let Some(raw) = self.find_raw(view, name)? else {
            return Ok(None);
        };

        let class = Arc::new(ClassType::new(raw.name.clone(), raw.access_flags));
        self.resolved.insert(descriptor.clone(), class.clone());
        published.push(descriptor);

        if let Some(superclass) = &raw.superclass {
            let superclass = self.type_ref(view, superclass, published)?;
            class.set_superclass(&superclass);
        }

        for interface in &raw.interfaces {
            let interface = self.type_ref(view, interface, published)?;
            class.interfaces.push(ClassTypeRef::new(&interface));
        }

        for field in &raw.fields {
            let field_type = self.type_ref(view, &field.field_type, published)?;
            class.fields.push(ResolvedField {
                access_flags: field.access_flags,
                name: field.name.clone(),
                field_type: ClassTypeRef::new(&field_type),
            });
        }

        for method in &raw.methods {
            let return_type = self.type_ref(view, &method.return_type, published)?;
            let mut parameter_types = Vec::with_capacity(method.parameter_types.len());
            for parameter in &method.parameter_types {
                let parameter = self.type_ref(view, parameter, published)?;
                parameter_types.push(ClassTypeRef::new(&parameter));
            }

            class.methods.push(ResolvedMethod {
                access_flags: method.access_flags,
                name: method.name.clone(),
                return_type: ClassTypeRef::new(&return_type),
                parameter_types,
            });
        }

        debug!("Slow path: resolved class {}", class.name);
        Ok(Some(class))
    }

    fn type_ref(
        &self,
        view: &DexView,
        name: &str,
        published: &mut Vec<String>,
    ) -> Result<ClassTypeRc> {
        if let Some(class) = self.resolve_class(view, name, published)? {
            return Ok(class);
        }

        let descriptor = normalize_to_descriptor(name).unwrap_or_default();
        let stub = Arc::new(ClassType::stub(name.to_string()));
        self.resolved.insert(descriptor.clone(), stub.clone());
        published.push(descriptor);

        debug!("Synthesized stub for {}", name);
        Ok(stub)
    }
}
