//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML -> DTO mapping
//!
//! Loading files and reacting to the values lives in `pl-infra` / `pl-app`.

mod field_settings;

pub use field_settings::{FieldSettings, LoggingSettings};
