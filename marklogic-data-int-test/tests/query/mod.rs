mod query_by_example_test;
mod serialization_test;
mod sort_test;
mod template_test;
