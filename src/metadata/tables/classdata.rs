use crate::{
    file::parser::Parser,
    metadata::tables::TableId,
    Error::IndexOutOfRange,
    Result,
};

/// A field entry of a `class_data_item` with its index already accumulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedField {
    /// Absolute index into `field_ids`
    pub field_idx: u32,
    /// Raw access flags
    pub access_flags: u32,
}

/// A method entry of a `class_data_item` with its index already accumulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedMethod {
    /// Absolute index into `method_ids`
    pub method_idx: u32,
    /// Raw access flags
    pub access_flags: u32,
    /// Offset of the `code_item`, 0 for abstract and native methods
    pub code_off: u32,
}

/// The decoded `class_data_item` of a class definition.
///
/// On disk each of the four member lists stores index *differences*: the first entry holds
/// the index itself and every following entry the distance to its predecessor. The running
/// index restarts at 0 for every list. The lists here hold the accumulated, absolute indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassData {
    /// Offset of the item within the file, 0 for the implicit empty item
    pub offset: usize,
    /// Static fields
    pub static_fields: Vec<EncodedField>,
    /// Instance fields
    pub instance_fields: Vec<EncodedField>,
    /// Constructors, static and private methods
    pub direct_methods: Vec<EncodedMethod>,
    /// Overridable methods
    pub virtual_methods: Vec<EncodedMethod>,
}

impl ClassData {
    /// Read a `class_data_item`.
    ///
    /// ## Arguments
    /// * 'data'            - The complete file contents
    /// * 'offset'          - Offset of the item, 0 yields an empty [`ClassData`]
    /// * 'field_count'     - Number of rows in `field_ids`
    /// * 'method_count'    - Number of rows in `method_ids`
    ///
    /// # Errors
    /// Returns [`crate::Error::IndexOutOfRange`] if an accumulated index leaves its table,
    /// and [`crate::Error::OutOfBounds`] / [`crate::Error::Malformed`] for truncated or
    /// overlong ULEB128 values.
    pub fn read(data: &[u8], offset: u32, field_count: u32, method_count: u32) -> Result<Self> {
        if offset == 0 {
            return Ok(ClassData::default());
        }

        let mut parser = Parser::at(data, offset as usize)?;

        let static_fields_size = parser.read_uleb128()?;
        let instance_fields_size = parser.read_uleb128()?;
        let direct_methods_size = parser.read_uleb128()?;
        let virtual_methods_size = parser.read_uleb128()?;

        Ok(ClassData {
            offset: offset as usize,
            static_fields: read_fields(&mut parser, static_fields_size, field_count)?,
            instance_fields: read_fields(&mut parser, instance_fields_size, field_count)?,
            direct_methods: read_methods(&mut parser, direct_methods_size, method_count)?,
            virtual_methods: read_methods(&mut parser, virtual_methods_size, method_count)?,
        })
    }

    /// Total number of declared fields
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.static_fields.len() + self.instance_fields.len()
    }

    /// Total number of declared methods
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.direct_methods.len() + self.virtual_methods.len()
    }
}

fn accumulate(current: u32, diff: u32, table: TableId, count: u32) -> Result<u32> {
    let Some(index) = current.checked_add(diff) else {
        return Err(malformed_error!(
            "{} index overflow: {} + {}",
            table,
            current,
            diff
        ));
    };

    if index >= count {
        return Err(IndexOutOfRange { table, index, count });
    }

    Ok(index)
}

// Every entry takes at least two bytes, so a size larger than that cannot be satisfied and
// would only trigger a huge allocation.
fn capacity(parser: &Parser, size: u32) -> Result<usize> {
    let remaining = parser.len().saturating_sub(parser.pos());
    if size as usize > remaining / 2 {
        return Err(out_of_bounds_error!(parser.pos(), size as usize * 2));
    }

    Ok(size as usize)
}

fn read_fields(parser: &mut Parser, size: u32, field_count: u32) -> Result<Vec<EncodedField>> {
    let mut fields = Vec::with_capacity(capacity(parser, size)?);

    let mut field_idx = 0;
    for _ in 0..size {
        let diff = parser.read_uleb128()?;
        let access_flags = parser.read_uleb128()?;

        field_idx = accumulate(field_idx, diff, TableId::FieldId, field_count)?;
        fields.push(EncodedField {
            field_idx,
            access_flags,
        });
    }

    Ok(fields)
}

fn read_methods(parser: &mut Parser, size: u32, method_count: u32) -> Result<Vec<EncodedMethod>> {
    let mut methods = Vec::with_capacity(capacity(parser, size)?);

    let mut method_idx = 0;
    for _ in 0..size {
        let diff = parser.read_uleb128()?;
        let access_flags = parser.read_uleb128()?;
        let code_off = parser.read_uleb128()?;

        method_idx = accumulate(method_idx, diff, TableId::MethodId, method_count)?;
        methods.push(EncodedMethod {
            method_idx,
            access_flags,
            code_off,
        });
    }

    Ok(methods)
}
