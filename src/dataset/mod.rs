//! Feed descriptor loading and structural validation.
//!
//! Submodules provide the serde data model, the JSON document loader
//! (with environment placeholder substitution for secrets), and the
//! pure structural validators applied to each record before any
//! network probe runs.

pub mod loader;
pub mod model;
pub mod validation;
