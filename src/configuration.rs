pub mod config;
pub mod types;
pub mod validate;

pub use config::{Config, Overrides};
pub use validate::{apply_defaults, validate, AliasMap};
