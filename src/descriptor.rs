//! Parsing of variant descriptors such as `"Binary : Expr* left, Token* op, Expr* right"`.
use crate::error::{Error, Reason, Result};
use crate::src::Src;

/// One typed member of a variant. The type is opaque and emitted exactly as written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub ty: String,
    pub name: String,
}

impl Field {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Field {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// A concrete subtype of the base type, with its fields in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Separator between field entries.
const FIELD_SEPARATOR: &str = ", ";

/// Parse a descriptor of the form `"<TypeName> : <TypeRef> <name>, <TypeRef> <name>, ..."`.
///
/// The type name is everything before the first `:`, trimmed. The remainder is split on `", "`
/// into entries, and each entry on its first space into a type reference and a field name.
pub fn parse(descriptor: &str) -> Result<Variant> {
    let Some((name_part, fields_part)) = descriptor.split_once(':') else {
        return Error::malformed(descriptor, Src::end_of(descriptor), Reason::MissingColon);
    };

    let name = name_part.trim();
    if name.is_empty() {
        let src = Src::new(name_part.len(), 1);
        return Error::malformed(descriptor, src, Reason::EmptyTypeName);
    }
    if !is_identifier(name) {
        let reason = Reason::InvalidTypeName(name.to_owned());
        return Error::malformed(descriptor, span(name, descriptor), reason);
    }

    let fields_part = fields_part.trim();
    if fields_part.is_empty() {
        return Error::malformed(descriptor, Src::end_of(descriptor), Reason::NoFields);
    }

    let mut fields: Vec<Field> = Vec::new();
    for entry in fields_part.split(FIELD_SEPARATOR) {
        let Some((ty, field_name)) = entry.split_once(' ') else {
            let reason = Reason::MissingFieldName(entry.to_owned());
            return Error::malformed(descriptor, span(entry, descriptor), reason);
        };
        if ty.is_empty() {
            let reason = Reason::MissingFieldName(entry.to_owned());
            return Error::malformed(descriptor, span(entry, descriptor), reason);
        }
        if !is_identifier(field_name) {
            let reason = Reason::InvalidFieldName(field_name.to_owned());
            return Error::malformed(descriptor, span(field_name, descriptor), reason);
        }
        if fields.iter().any(|f| f.name == field_name) {
            let reason = Reason::DuplicateField(field_name.to_owned());
            return Error::malformed(descriptor, span(field_name, descriptor), reason);
        }
        fields.push(Field::new(ty, field_name));
    }

    Ok(Variant {
        name: name.to_owned(),
        fields,
    })
}

/// Whether `s` is usable as a C-style identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// Every part handed to this is sliced out of the descriptor.
fn span(part: &str, descriptor: &str) -> Src {
    Src::of(part, descriptor).unwrap_or_else(|| Src::end_of(descriptor))
}
