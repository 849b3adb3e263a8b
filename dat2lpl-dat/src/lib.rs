pub mod dat;
pub mod error;
pub mod schema;

pub use dat::{parse_dat, parse_dat_file};
pub use error::DatError;
pub use schema::{
    HttpSchemaFetcher, SchemaFetcher, Validation, ValidationOptions, validate_dat,
    validate_dat_file,
};
