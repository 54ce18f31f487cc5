//! Access flags shared by classes, fields and methods.
//!
//! DEX uses a single `access_flags` bit space for all three kinds of declarations, with a few
//! bits carrying a different meaning depending on where they appear (e.g. `0x40` is
//! `volatile` on a field and `bridge` on a method).
//!
//! # Reference
//! - [access_flags definitions](https://source.android.com/docs/core/runtime/dex-format#access-flags)

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    /// Access flags of a class, field or method
    pub struct AccessFlags: u32 {
        /// Visible everywhere
        const PUBLIC = 0x0001;
        /// Only visible to the defining class
        const PRIVATE = 0x0002;
        /// Visible to the package and subclasses
        const PROTECTED = 0x0004;
        /// Not bound to an instance (member), or not holding an outer reference (inner class)
        const STATIC = 0x0008;
        /// Not subclassable / overridable / assignable after construction
        const FINAL = 0x0010;
        /// Method acquires the monitor of its receiver
        const SYNCHRONIZED = 0x0020;
        /// Field access is volatile
        const VOLATILE = 0x0040;
        /// Compiler-generated bridge method
        const BRIDGE = 0x0040;
        /// Field is not serialized
        const TRANSIENT = 0x0080;
        /// Last method argument is a rest argument
        const VARARGS = 0x0080;
        /// Method is implemented in native code
        const NATIVE = 0x0100;
        /// Class is an interface
        const INTERFACE = 0x0200;
        /// Not directly instantiable / not implemented by this class
        const ABSTRACT = 0x0400;
        /// Strict floating point semantics
        const STRICT = 0x0800;
        /// Not directly defined in source code
        const SYNTHETIC = 0x1000;
        /// Class is an annotation type
        const ANNOTATION = 0x2000;
        /// Enumerated type or enum constant
        const ENUM = 0x4000;
        /// Constructor or class initializer
        const CONSTRUCTOR = 0x1_0000;
        /// Method declared `synchronized`
        const DECLARED_SYNCHRONIZED = 0x2_0000;
    }
}

impl AccessFlags {
    /// Build from a raw `access_flags` value, keeping bits this crate does not know about
    #[must_use]
    pub fn from_raw(flags: u32) -> Self {
        Self::from_bits_retain(flags)
    }

    /// Returns true for interfaces (including annotation types)
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.contains(AccessFlags::INTERFACE)
    }

    /// Returns true for enum types and enum constants
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.contains(AccessFlags::ENUM)
    }

    /// Returns true for abstract classes and methods
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.contains(AccessFlags::ABSTRACT)
    }

    /// Returns true for native methods
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.contains(AccessFlags::NATIVE)
    }

    /// Returns true for static members
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.contains(AccessFlags::STATIC)
    }
}
