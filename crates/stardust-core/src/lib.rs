//! Stardust Core - Foundational types for the Stardust particle field
//!
//! This crate provides the types every other Stardust crate depends on:
//! - `Vec3` - 3D vector math
//! - `Color` - straight RGB color with HSL construction
//! - `force` - falloff and smoothing primitives shared by every force source
//! - Error types and Result alias

mod error;
pub mod force;
mod types;

pub use error::{Result, StardustError};
pub use types::{Color, Vec3};
