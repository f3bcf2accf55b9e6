mod entity_derive_test;
mod mapping_context_test;
