//! Glide Core - Foundational types for Glide path animation
//!
//! This crate provides the types every other Glide crate depends on:
//! - `Vec3`, `Transform`, `Color` - Spatial types
//! - `CatmullRomPath` - Clamped Catmull-Rom spline evaluation
//! - `PathId` - Stable path identifiers
//! - `ContentHash` - SHA-256 based content hashing
//! - Error types and Result alias

mod error;
mod hash;
mod id;
pub mod spline;
mod types;

pub use error::{GlideError, Result};
pub use hash::ContentHash;
pub use id::PathId;
pub use spline::CatmullRomPath;
pub use types::{Color, Transform, Vec3};
