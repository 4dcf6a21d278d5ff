//! Procedural 2-D nature/fractal geometry generation library.
//!
//! Every generator is a pure function of a 32-bit seed plus a flat
//! parameter record, and returns an immutable geometry model that a
//! rendering or export layer can consume. Identical inputs always
//! reproduce identical geometry.
//!
//! Main components:
//! - [`rng`] — seeded deterministic random source and the stamp-seed allocator.
//! - [`noise`] — 2-D coherent lattice noise.
//! - [`geometry`] — shared output primitives (segments, triangles).
//! - [`tree`] — recursive branching trees.
//! - [`fern`] — iterated-function-system fern point clouds.
//! - [`lsystem`] — string-rewrite curves (flower, dragon curve).
//! - [`subdivision`] — Koch snowflake and midpoint-displacement ridges.
//! - [`lightning`] — recursive discharge bolts.
//! - [`vine`] — noise-driven constrained random walks.
//! - [`sierpinski`] — region-subdivision gaskets.
//! - [`grass`] — grass-blade patches.
//! - [`texture`] — element-field texture synthesis.
//! - [`generate`] — the single dispatch entry point over all families.
//! - [`types`] — shared type aliases.

pub mod fern;
pub mod generate;
pub mod geometry;
pub mod grass;
pub mod lightning;
pub mod lsystem;
pub mod noise;
pub mod rng;
pub mod sierpinski;
pub mod subdivision;
pub mod texture;
pub mod tree;
pub mod types;
pub mod vine;

pub use generate::{GeneratorParams, GeometryModel, generate};
