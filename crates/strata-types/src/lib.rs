//! Foundation types for Strata.
//!
//! This crate provides the value types shared by every other Strata crate:
//! the tolerance that governs approximate equality, and the attribute-value
//! sets attached to database objects.
//!
//! # Key Types
//!
//! - [`Tolerance`] -- Distance tolerance for numeric and point equality
//! - [`AttrSet`] -- String-keyed attribute-value set with unique names
//! - [`TypeError`] -- Errors from type validation

pub mod attrs;
pub mod error;
pub mod tolerance;

pub use attrs::AttrSet;
pub use error::{TypeError, TypeResult};
pub use tolerance::Tolerance;
