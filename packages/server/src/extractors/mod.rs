pub mod form;
pub mod query;
