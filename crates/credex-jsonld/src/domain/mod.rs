//! # Domain Module
//!
//! Core domain types for the LD-proof credential format.

pub mod attachment;
pub mod config;
pub mod entities;
pub mod errors;
pub mod options;
pub mod value_objects;

pub use attachment::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use options::*;
pub use value_objects::*;
