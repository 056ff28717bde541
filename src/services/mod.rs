pub mod builder;
pub mod maps;
pub mod recorder;
pub mod store;
pub mod summary;
