#![recursion_limit = "128"]
//! # MarkLogic Data Derive Macros
//!
//! This crate provides the `MarklogicEntity` derive macro, which generates the
//! mapping table and the property accessor of a document type at compile time.
//!
//! ## Attributes
//!
//! Container attribute `#[document(...)]`:
//!
//! - `name = "..."` - local name of the root element (default: decapitalized type name)
//! - `namespace = "..."` - namespace of the root element and its properties
//! - `collection = "..."` - default collection template
//! - `uri = "..."` - URI template (default: `/content/#{entityClass}/#{id}.xml`)
//! - `id = "field"` - the identifier field
//! - `id_in_property_fragment` - the id element lives in the property fragment
//!
//! Field attribute `#[property(...)]`:
//!
//! - `name = "..."` - element name when it differs from the field name
//! - `namespace = "..."` - element namespace
//! - `entity` - the field is a nested mapped type (`T` or `Option<T>`)
//! - `collection_selector` - the field names document collections
//! - `skip` - the field is not mapped
//!
//! The property kind follows the field type: `Vec<T>` and `Option<Vec<T>>` are
//! collections, `Option<T>` is an optional scalar, anything else a scalar.
//!
//! # Examples
//!
//! ```rust,ignore
//! use marklogic_data_derive::MarklogicEntity;
//!
//! #[derive(MarklogicEntity, Default)]
//! #[document(collection = "Person", uri = "/contact/person/#{id}.xml", id = "id")]
//! pub struct Person {
//!     pub id: Option<String>,
//!     pub lastname: Option<String>,
//!     pub skills: Vec<String>,
//!     #[property(entity)]
//!     pub address: Option<Address>,
//! }
//! ```

extern crate proc_macro;
mod marklogic_entity;

use crate::marklogic_entity::generate_entity_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

/// Derives the `MarklogicEntity` trait.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to an enum, a union or a struct without named fields
/// - The `id` attribute names a field that does not exist or is skipped
/// - An `entity` field is a collection
/// - An attribute is unknown
#[proc_macro_derive(MarklogicEntity, attributes(document, property))]
pub fn derive_marklogic_entity(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_entity_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => e.to_compile_error().into(),
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive MarklogicEntity for enums. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive MarklogicEntity for unions. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
    }
}
