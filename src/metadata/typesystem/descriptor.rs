//! Conversion between type descriptors and dotted class names.
//!
//! DEX stores every type as a descriptor: `I` for `int`, `Ljava/lang/String;` for a class,
//! `[I` for an `int[]`. Records handed to users carry the dotted form (`java.lang.String`),
//! lookups accept either.

/// Convert a dotted class name into a descriptor.
///
/// Array names (leading `[`) only have their dots replaced, everything else is wrapped into
/// `L...;`. Returns `None` for an empty name.
///
/// # Examples
///
/// ```rust
/// use dexscope::metadata::typesystem::dot_to_descriptor;
///
/// assert_eq!(dot_to_descriptor("java.lang.String").as_deref(), Some("Ljava/lang/String;"));
/// assert_eq!(dot_to_descriptor("[Ljava.lang.String;").as_deref(), Some("[Ljava/lang/String;"));
/// assert_eq!(dot_to_descriptor(""), None);
/// ```
#[must_use]
pub fn dot_to_descriptor(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    let replaced = name.replace('.', "/");
    if name.starts_with('[') {
        Some(replaced)
    } else {
        Some(format!("L{replaced};"))
    }
}

/// Convert a descriptor into its dotted form.
///
/// The `L`/`;` wrapper of a class descriptor is stripped; primitive and array descriptors
/// keep their shape and only have slashes replaced.
///
/// # Examples
///
/// ```rust
/// use dexscope::metadata::typesystem::descriptor_to_dot;
///
/// assert_eq!(descriptor_to_dot("Ljava/lang/Object;"), "java.lang.Object");
/// assert_eq!(descriptor_to_dot("[Ljava/lang/Object;"), "[Ljava.lang.Object;");
/// assert_eq!(descriptor_to_dot("I"), "I");
/// ```
#[must_use]
pub fn descriptor_to_dot(descriptor: &str) -> String {
    let inner = if descriptor.len() >= 2 && descriptor.starts_with('L') && descriptor.ends_with(';')
    {
        &descriptor[1..descriptor.len() - 1]
    } else {
        descriptor
    };

    inner.replace('/', ".")
}

/// Normalize a class name given in either form to its descriptor.
///
/// `[`-prefixed and `L...;` names are already descriptors and are only slash-normalized.
/// Anything else is treated as a dotted name. Returns `None` for an empty name, which never
/// matches a class.
#[must_use]
pub fn normalize_to_descriptor(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    let is_descriptor = name.starts_with('[')
        || (name.len() > 1 && name.starts_with('L') && name.ends_with(';'));

    if is_descriptor {
        Some(name.replace('.', "/"))
    } else {
        dot_to_descriptor(name)
    }
}
