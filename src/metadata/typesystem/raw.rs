//! Name-keyed class records decoded straight from a class definition.
//!
//! Every type in a [`RawClass`] is a dotted name (`java.lang.String`, `int[]` stays `[I`),
//! nothing is linked yet. [`crate::metadata::typesystem::ClassLoader`] turns these into the
//! cross-referenced [`crate::metadata::typesystem::ClassType`] graph.

use crate::{
    metadata::{
        dexview::DexView,
        flags::AccessFlags,
        tables::{ClassDef, EncodedField, EncodedMethod},
    },
    Result,
};

/// Dotted name of the root of the class hierarchy
pub const ROOT_OBJECT: &str = "java.lang.Object";

/// Name of instance initializers
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name of the class initializer
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

/// A field with its type as a dotted name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawField {
    /// Access flags from the class data
    pub access_flags: AccessFlags,
    /// Field name
    pub name: String,
    /// Dotted type name
    pub field_type: String,
}

impl RawField {
    /// Decode the field referenced by a class data entry
    ///
    /// # Errors
    /// Returns an error if the field id, its type or its name cannot be decoded.
    pub fn read(view: &DexView, encoded: &EncodedField) -> Result<RawField> {
        let field_id = view.field_id(encoded.field_idx)?;

        Ok(RawField {
            access_flags: AccessFlags::from_raw(encoded.access_flags),
            name: view.string_by_id(field_id.name_idx)?.to_string(),
            field_type: view.class_name(u32::from(field_id.type_idx))?,
        })
    }
}

/// A method with its signature as dotted type names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMethod {
    /// Access flags from the class data
    pub access_flags: AccessFlags,
    /// Method name
    pub name: String,
    /// Dotted return type name
    pub return_type: String,
    /// Dotted parameter type names in declaration order
    pub parameter_types: Vec<String>,
}

impl RawMethod {
    /// Decode the method referenced by a class data entry
    ///
    /// # Errors
    /// Returns an error if the method id, its prototype, a type or its name cannot be decoded.
    pub fn read(view: &DexView, encoded: &EncodedMethod) -> Result<RawMethod> {
        let method_id = view.method_id(encoded.method_idx)?;
        let proto_id = view.proto_id(u32::from(method_id.proto_idx))?;

        let parameter_types = view
            .parameters(&proto_id)?
            .type_idx
            .iter()
            .map(|&type_idx| view.class_name(u32::from(type_idx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(RawMethod {
            access_flags: AccessFlags::from_raw(encoded.access_flags),
            name: view.string_by_id(method_id.name_idx)?.to_string(),
            return_type: view.class_name(proto_id.return_type_idx)?,
            parameter_types,
        })
    }

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

/// A class definition with all types as dotted names
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawClass {
    /// Access flags of the class definition
    pub access_flags: AccessFlags,
    /// Dotted class name
    pub name: String,
    /// Dotted superclass name, `None` only for `java.lang.Object` itself
    pub superclass: Option<String>,
    /// Dotted names of the directly implemented interfaces
    pub interfaces: Vec<String>,
    /// Instance fields followed by static fields
    pub fields: Vec<RawField>,
    /// Direct methods followed by virtual methods
    pub methods: Vec<RawMethod>,
}

impl RawClass {
    /// Decode a class definition.
    ///
    /// A missing superclass index means the class derives from [`ROOT_OBJECT`]. Members are
    /// only decoded if the class has class data.
    ///
    /// # Errors
    /// Returns any decode error of the class type, its supertypes or its members.
    pub fn read(view: &DexView, class_def: &ClassDef) -> Result<RawClass> {
        let name = view.class_name(class_def.class_idx)?;

        let superclass = match class_def.superclass() {
            Some(type_idx) => Some(view.class_name(type_idx)?),
            // the root itself has no superclass, even though the sentinel would otherwise
            // name `java.lang.Object` here and make it its own parent
            None if name == ROOT_OBJECT => None,
            None => Some(ROOT_OBJECT.to_string()),
        };

        let interfaces = view
            .interfaces(class_def)?
            .type_idx
            .iter()
            .map(|&type_idx| view.class_name(u32::from(type_idx)))
            .collect::<Result<Vec<_>>>()?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        if class_def.class_data_off != 0 {
            let class_data = view.class_data(class_def)?;

            fields.reserve(class_data.field_count());
            for encoded in class_data
                .instance_fields
                .iter()
                .chain(&class_data.static_fields)
            {
                fields.push(RawField::read(view, encoded)?);
            }

            methods.reserve(class_data.method_count());
            for encoded in class_data
                .direct_methods
                .iter()
                .chain(&class_data.virtual_methods)
            {
                methods.push(RawMethod::read(view, encoded)?);
            }
        }

        Ok(RawClass {
            access_flags: AccessFlags::from_raw(class_def.access_flags),
            name,
            superclass,
            interfaces,
            fields,
            methods,
        })
    }

    /// Returns true if this is `java.lang.Object`
    #[must_use]
    pub fn is_root_object(&self) -> bool {
        self.name == ROOT_OBJECT
    }
}
