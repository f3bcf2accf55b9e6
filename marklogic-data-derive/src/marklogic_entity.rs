use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DataStruct, DeriveInput, Field, Fields, GenericArgument, LitStr, PathArguments, Result, Type};

#[derive(Default)]
struct DocumentAttributes {
    root_name: Option<String>,
    namespace: Option<String>,
    collection: Option<String>,
    uri: Option<String>,
    id: Option<String>,
    id_in_property_fragment: bool,
}

#[derive(Default)]
struct PropertyAttributes {
    name: Option<String>,
    namespace: Option<String>,
    entity: bool,
    collection_selector: bool,
    skip: bool,
}

enum FieldShape {
    Scalar,
    Optional,
    Collection,
    OptionalCollection,
}

pub(crate) fn generate_entity_for_struct(ast: &DeriveInput, data: &DataStruct) -> Result<TokenStream> {
    let name = &ast.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &data.fields {
        Fields::Named(named) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                format!(
                    "Cannot derive MarklogicEntity for '{}': only structs with named fields are supported",
                    type_name
                ),
            ))
        }
    };

    let document = parse_document_attributes(ast)?;

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut accessors = Vec::with_capacity(fields.len());
    let mut mapped_fields = Vec::with_capacity(fields.len());

    for field in fields {
        let attributes = parse_property_attributes(field)?;
        if attributes.skip {
            continue;
        }

        let ident = match &field.ident {
            Some(ident) => ident,
            None => return Err(syn::Error::new_spanned(field, "Field must be named")),
        };
        let field_name = ident.unraw().to_string();

        let (mut descriptor, accessor) = if attributes.entity {
            entity_property(field, &field_name)?
        } else {
            value_property(field, &field_name)
        };

        if let Some(element_name) = &attributes.name {
            descriptor = quote! { #descriptor.xml_name(#element_name) };
        }
        if let Some(namespace) = &attributes.namespace {
            descriptor = quote! { #descriptor.namespace(#namespace) };
        }
        if attributes.collection_selector {
            descriptor = quote! { #descriptor.collection_selector() };
        }

        descriptors.push(descriptor);
        accessors.push(quote! {
            #field_name => ::std::result::Result::Ok(#accessor),
        });
        mapped_fields.push(field_name);
    }

    if let Some(id) = &document.id {
        if !mapped_fields.contains(id) {
            return Err(syn::Error::new_spanned(
                ast,
                format!("Id field '{}' not found among the mapped fields of '{}'", id, type_name),
            ));
        }
    }

    let mut entity_code = quote! {
        marklogic_data::mapping::EntityDescriptor::new(#type_name)
    };
    if let Some(root_name) = &document.root_name {
        entity_code = quote! { #entity_code.root_name(#root_name) };
    }
    if let Some(namespace) = &document.namespace {
        entity_code = quote! { #entity_code.namespace(#namespace) };
    }
    if let Some(collection) = &document.collection {
        entity_code = quote! { #entity_code.default_collection(#collection) };
    }
    if let Some(uri) = &document.uri {
        entity_code = quote! { #entity_code.uri_template(#uri) };
    }
    if let Some(id) = &document.id {
        entity_code = quote! { #entity_code.id_property(#id) };
    }
    if document.id_in_property_fragment {
        entity_code = quote! { #entity_code.id_in_property_fragment(true) };
    }

    let gen = quote! {
        impl #impl_generics marklogic_data::mapping::MarklogicEntity for #name #ty_generics #where_clause {
            fn describe() -> marklogic_data::mapping::EntityDescriptor {
                #entity_code
                    #(.property(#descriptors))*
            }

            fn read_property(
                &self,
                name: &str,
            ) -> marklogic_data::errors::MarklogicResult<marklogic_data::mapping::PropertyValue<'_>> {
                match name {
                    #(#accessors)*
                    _ => ::std::result::Result::Err(marklogic_data::errors::MarklogicError::new(
                        &::std::format!("Type {} has no readable property '{}'", #type_name, name),
                        marklogic_data::errors::ErrorKind::AccessorError,
                    )),
                }
            }
        }
    };

    Ok(TokenStream::from(gen))
}

fn parse_document_attributes(ast: &DeriveInput) -> Result<DocumentAttributes> {
    let mut attributes = DocumentAttributes::default();
    for attr in &ast.attrs {
        if !attr.path().is_ident("document") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attributes.root_name = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("namespace") {
                attributes.namespace = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("collection") {
                attributes.collection = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("uri") {
                attributes.uri = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("id") {
                if attributes.id.is_some() {
                    return Err(meta.error("Multiple id attributes are not allowed"));
                }
                attributes.id = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("id_in_property_fragment") {
                attributes.id_in_property_fragment = true;
                Ok(())
            } else {
                Err(meta.error("Unknown document attribute"))
            }
        })?;
    }
    Ok(attributes)
}

fn parse_property_attributes(field: &Field) -> Result<PropertyAttributes> {
    let mut attributes = PropertyAttributes::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attributes.name = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("namespace") {
                attributes.namespace = Some(string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("entity") {
                attributes.entity = true;
                Ok(())
            } else if meta.path.is_ident("collection_selector") {
                attributes.collection_selector = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                attributes.skip = true;
                Ok(())
            } else {
                Err(meta.error("Unknown property attribute"))
            }
        })?;
    }
    Ok(attributes)
}

fn string_value(meta: &syn::meta::ParseNestedMeta) -> Result<String> {
    let value = meta.value()?;
    let s: LitStr = value.parse()?;
    Ok(s.value())
}

fn entity_property(
    field: &Field,
    field_name: &str,
) -> Result<(proc_macro2::TokenStream, proc_macro2::TokenStream)> {
    let ident = &field.ident;
    let (entity_type, accessor) = match field_shape(&field.ty) {
        FieldShape::Scalar => (
            &field.ty,
            quote! { marklogic_data::mapping::PropertyValue::entity(&self.#ident) },
        ),
        FieldShape::Optional => match generic_argument(&field.ty, "Option") {
            Some(inner) => (
                inner,
                quote! { marklogic_data::mapping::PropertyValue::optional_entity(&self.#ident) },
            ),
            None => return Err(syn::Error::new_spanned(&field.ty, "Cannot read the entity type")),
        },
        FieldShape::Collection | FieldShape::OptionalCollection => {
            return Err(syn::Error::new_spanned(
                &field.ty,
                format!(
                    "Entity property '{}' cannot be a collection; only `T` or `Option<T>` is supported",
                    field_name
                ),
            ))
        }
    };

    let descriptor = quote! {
        marklogic_data::mapping::PropertyDescriptor::entity(
            #field_name,
            marklogic_data::mapping::EntityType::of::<#entity_type>(),
        )
    };
    Ok((descriptor, accessor))
}

fn value_property(field: &Field, field_name: &str) -> (proc_macro2::TokenStream, proc_macro2::TokenStream) {
    let ident = &field.ident;
    match field_shape(&field.ty) {
        FieldShape::Scalar => (
            quote! { marklogic_data::mapping::PropertyDescriptor::scalar(#field_name) },
            quote! {
                marklogic_data::mapping::PropertyValue::scalar(::std::clone::Clone::clone(&self.#ident))
            },
        ),
        FieldShape::Optional => (
            quote! { marklogic_data::mapping::PropertyDescriptor::scalar(#field_name) },
            quote! { marklogic_data::mapping::PropertyValue::optional(&self.#ident) },
        ),
        FieldShape::Collection => (
            quote! { marklogic_data::mapping::PropertyDescriptor::collection(#field_name) },
            quote! { marklogic_data::mapping::PropertyValue::collection(&self.#ident) },
        ),
        FieldShape::OptionalCollection => (
            quote! { marklogic_data::mapping::PropertyDescriptor::collection(#field_name) },
            quote! { marklogic_data::mapping::PropertyValue::optional_collection(&self.#ident) },
        ),
    }
}

fn field_shape(ty: &Type) -> FieldShape {
    match generic_argument(ty, "Option") {
        Some(inner) if generic_argument(inner, "Vec").is_some() => FieldShape::OptionalCollection,
        Some(_) => FieldShape::Optional,
        None if generic_argument(ty, "Vec").is_some() => FieldShape::Collection,
        None => FieldShape::Scalar,
    }
}

// `Option<T>` / `Vec<T>` recognised by the last path segment, so qualified
// paths like `std::option::Option<T>` work too.
fn generic_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let type_path = match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path,
        _ => return None,
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}
