//! `groupmgr-core`: domain building blocks shared by the group manager crates.
//!
//! This crate contains **pure domain** primitives (no directory or transport concerns).

pub mod entity;
pub mod error;
pub mod name;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use name::{GroupName, UserName};
pub use value_object::ValueObject;
