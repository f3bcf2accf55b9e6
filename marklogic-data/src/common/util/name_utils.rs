/// Lower-cases the first character: `Person` becomes `person`.
///
/// Used for default root element names and for turning method-name
/// fragments (`Lastname`) back into property names (`lastname`).
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-cases the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the last path segment of a Rust type name, without generics.
///
/// `my_app::model::Person` becomes `Person`.
pub fn simple_type_name(type_name: &str) -> &str {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Byte offsets where a new camel-case word starts, excluding offset 0.
///
/// `AddressCountry` yields `[7]`.
pub(crate) fn camel_case_boundaries(source: &str) -> Vec<usize> {
    source
        .char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_uppercase())
        .map(|(index, _)| index)
        .collect()
}
