//! Class model of a DEX file.
//!
//! Classes are available in two shapes:
//!
//! - [`RawClass`]: decoded from a single class definition, every type is a dotted name
//! - [`ClassType`]: the linked form, every type is a reference to another [`ClassType`]
//!
//! Resolved classes form a graph rather than a tree: a class may reference itself, two
//! classes may reference each other and every reference to the same name shares one record.
//! The [`ClassLoader`] owns all records (strong references); records point at each other
//! through weak [`ClassTypeRef`]s so cycles never leak.
//!
//! Types that are referenced but not defined in the file (platform classes, primitives,
//! arrays) are represented by *stub* records: no flags, no supertype, no members.
//!
//! # Examples
//!
//! ```rust,no_run
//! use dexscope::DexObject;
//!
//! let dex = DexObject::from_mem(std::fs::read("classes.dex").unwrap())?;
//!
//! if let Some(class) = dex.class_by_name_resolved("com.example.MainActivity")? {
//!     let mut current = class.superclass();
//!     while let Some(superclass) = current {
//!         println!("extends {}", superclass.name);
//!         current = superclass.superclass();
//!     }
//! }
//! # Ok::<(), dexscope::Error>(())
//! ```

mod descriptor;
mod raw;
mod resolver;

use std::sync::{Arc, OnceLock, Weak};

pub use descriptor::{descriptor_to_dot, dot_to_descriptor, normalize_to_descriptor};
pub use raw::{
    RawClass, RawField, RawMethod, CONSTRUCTOR_NAME, ROOT_OBJECT, STATIC_INITIALIZER_NAME,
};
pub use resolver::ClassLoader;

use crate::metadata::flags::AccessFlags;

/// Reference to a `ClassType`
pub type ClassTypeRc = Arc<ClassType>;
/// A vector that holds `ClassTypeRef` instances (weak references)
pub type ClassTypeRefList = Arc<boxcar::Vec<ClassTypeRef>>;
/// A vector that holds the fields of a `ClassType`
pub type ResolvedFieldList = Arc<boxcar::Vec<ResolvedField>>;
/// A vector that holds the methods of a `ClassType`
pub type ResolvedMethodList = Arc<boxcar::Vec<ResolvedMethod>>;

/// A weak reference to a [`ClassType`], used for every edge of the class graph
#[derive(Clone, Debug)]
pub struct ClassTypeRef {
    weak_ref: Weak<ClassType>,
}

impl ClassTypeRef {
    /// Create a new `ClassTypeRef` from a strong reference
    #[must_use]
    pub fn new(strong_ref: &ClassTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the class, returning None if it has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<ClassTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced class is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Get the name of the referenced class (if still alive)
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|class| class.name.clone())
    }

    /// Returns true if both references point at the same record
    #[must_use]
    pub fn is(&self, other: &ClassTypeRc) -> bool {
        std::ptr::eq(self.weak_ref.as_ptr(), Arc::as_ptr(other))
    }
}

/// A field whose type is linked to a [`ClassType`]
#[derive(Clone, Debug)]
pub struct ResolvedField {
    /// Access flags from the class data
    pub access_flags: AccessFlags,
    /// Field name
    pub name: String,
    /// Field type
    pub field_type: ClassTypeRef,
}

/// A method whose signature is linked to [`ClassType`]s
#[derive(Clone, Debug)]
pub struct ResolvedMethod {
    /// Access flags from the class data
    pub access_flags: AccessFlags,
    /// Method name
    pub name: String,
    /// Return type
    pub return_type: ClassTypeRef,
    /// Parameter types in declaration order
    pub parameter_types: Vec<ClassTypeRef>,
}

impl ResolvedMethod {
    /// Returns true for instance initializers (`<init>`)
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Returns true for the class initializer (`<clinit>`)
    #[must_use]
    pub fn is_static_initializer(&self) -> bool {
        self.name == STATIC_INITIALIZER_NAME
    }
}

/// A linked class.
///
/// Records are published to the [`ClassLoader`] before their supertypes and members are
/// resolved, then filled in place. Once a top-level resolution returns, the record is
/// complete and never changes again.
#[derive(Debug)]
pub struct ClassType {
    /// `true` for placeholders of classes that are not defined in this file
    pub stub: bool,
    /// Access flags, empty for stubs
    pub access_flags: AccessFlags,
    /// Dotted class name
    pub name: String,
    superclass: OnceLock<ClassTypeRef>,
    pub(crate) interfaces: ClassTypeRefList,
    pub(crate) fields: ResolvedFieldList,
    pub(crate) methods: ResolvedMethodList,
}

impl ClassType {
    /// Create an empty record for a class defined in the file
    #[must_use]
    pub fn new(name: String, access_flags: AccessFlags) -> Self {
        ClassType {
            stub: false,
            access_flags,
            name,
            superclass: OnceLock::new(),
            interfaces: Arc::new(boxcar::Vec::new()),
            fields: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Create a placeholder for a class that is referenced but not defined in the file
    #[must_use]
    pub fn stub(name: String) -> Self {
        ClassType {
            stub: true,
            ..ClassType::new(name, AccessFlags::empty())
        }
    }

    /// Access the superclass of this class, if it exists
    #[must_use]
    pub fn superclass(&self) -> Option<ClassTypeRc> {
        self.superclass.get().and_then(ClassTypeRef::upgrade)
    }

    /// Set the superclass; only the first call has an effect
    pub(crate) fn set_superclass(&self, superclass: &ClassTypeRc) {
        let _ = self.superclass.set(ClassTypeRef::new(superclass));
    }

    /// Directly implemented interfaces, in declaration order
    pub fn interfaces(&self) -> impl Iterator<Item = &ClassTypeRef> {
        self.interfaces.iter().map(|(_, interface)| interface)
    }

    /// The interface at `index`
    #[must_use]
    pub fn interface(&self, index: usize) -> Option<&ClassTypeRef> {
        self.interfaces.get(index)
    }

    /// Instance fields followed by static fields
    pub fn fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().map(|(_, field)| field)
    }

    /// The field at `index`
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&ResolvedField> {
        self.fields.get(index)
    }

    /// Direct methods followed by virtual methods
    pub fn methods(&self) -> impl Iterator<Item = &ResolvedMethod> {
        self.methods.iter().map(|(_, method)| method)
    }

    /// The method at `index`
    #[must_use]
    pub fn method(&self, index: usize) -> Option<&ResolvedMethod> {
        self.methods.get(index)
    }

    /// Returns true if this is `java.lang.Object`
    #[must_use]
    pub fn is_root_object(&self) -> bool {
        self.name == ROOT_OBJECT
    }

    /// Returns true for interfaces (including annotation types)
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.access_flags.is_interface()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_edges() {
        let object = Arc::new(ClassType::stub(ROOT_OBJECT.to_string()));
        let foo = Arc::new(ClassType::new("a.Foo".to_string(), AccessFlags::PUBLIC));

        foo.set_superclass(&object);
        foo.set_superclass(&foo);
        assert!(Arc::ptr_eq(&foo.superclass().unwrap(), &object));
        assert!(object.superclass().is_none());
        assert!(object.stub);
        assert!(object.is_root_object());
        assert!(object.access_flags.is_empty());

        foo.interfaces.push(ClassTypeRef::new(&foo));
        let edge = foo.interface(0).unwrap();
        assert_eq!(foo.interfaces().count(), 1);
        assert!(foo.field(0).is_none());
        assert!(edge.is(&foo));
        assert!(!edge.is(&object));
        assert_eq!(edge.name().as_deref(), Some("a.Foo"));

        drop(object);
        assert!(foo.superclass().is_none());
    }
}
