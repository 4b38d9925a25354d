//! Fitted model representation.
//!
//! [`LinearModel`] is produced by [`crate::training::OlsTrainer`] and is
//! read-only afterwards.

mod linear;

pub use linear::LinearModel;
