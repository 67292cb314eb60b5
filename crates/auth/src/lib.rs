//! `atrium-auth` — the role model.
//!
//! Pure capability logic over the closed [`Role`] enumeration. Decisions
//! about *which* role an operation requires live in the engine's decision
//! table; this crate only answers what a given role is capable of.

pub mod role;

pub use role::{CapabilityTier, Role};
