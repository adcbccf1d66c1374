//! Repository implementations.
//!
//! Currently one backend: `local`, an in-memory implementation used for
//! development, tests, and single-process deployments.
pub mod local;

pub use local::LocalRepository;
