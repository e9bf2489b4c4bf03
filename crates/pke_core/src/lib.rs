//! Provide the canonical vocabulary shared by the PKE emitter and its tooling.
//!
//! This crate is intentionally small and dependency-free. It answers "how is this spelled in the target API?" for
//! every decision the emitter makes that is not derived from the IR itself:
//! - which FHE schemes exist and which strings each of them selects (prelude, plaintext handle, parameter template),
//! - the target-API method names and handle aliases,
//! - which identifiers the emitted C++ must never bind.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no IR types.
//! - Lookups from user-facing spellings (CLI flags, config) go through [`scheme::from_str`].

pub mod cpp_keywords;
pub mod openfhe;
pub mod scheme;

pub use scheme::{Scheme, UnknownScheme};
