mod derived_query_test;
mod entity_information_test;
mod named_query_test;
