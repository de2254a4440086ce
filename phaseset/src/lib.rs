//! Phaseset assigns material **phases** to regions bounded by several 2D
//! level-set functions, then tessellates only the regions belonging to the
//! selected phase.
//!
//! A **level set** (or scalar field) is a function `f(x, z)` over the
//! horizontal plane.  Its sign splits the plane into two sides: by convention,
//! `f(x, z) >= 0` is the **positive** side and `f(x, z) < 0` is the
//! **negative** side.  With `N` geometries, every point of the plane falls into
//! one of `2^N` sign combinations, each of which is encoded as a
//! [`SignVector`](sign::SignVector).
//!
//! # Phase assignment
//! A [`PhaseTable`](phase::PhaseTable) maps each sign combination to a phase
//! identifier.  By default every combination is its own phase; editing the
//! table merges several combinations into one material.
//!
//! ```
//! use phaseset::{Scene, ScalarField, resolve::Visibility};
//!
//! let mut scene = Scene::new();
//! scene.define_geometry(ScalarField::new(|x, _z| x))?;
//! scene.define_geometry(ScalarField::new(|_x, z| z))?;
//!
//! // Phase 2 is `10` in binary: positive side of geometry 0, negative side
//! // of geometry 1
//! scene.select_phase(2);
//! assert_eq!(
//!     scene.visibility(),
//!     [Visibility::PositiveOnly, Visibility::NegativeOnly]
//! );
//! # Ok::<(), phaseset::Error>(())
//! ```
//!
//! # Tessellation
//! Each visible geometry is sampled on a regular grid and drawn as a height
//! field (the field value is the vertical `y` coordinate).  Only grid columns
//! whose samples lie on a visible side are drawn; runs of drawable columns
//! become separate triangle strips, so a strip never bridges a sign boundary.
//!
//! ```
//! use phaseset::{
//!     ScalarField, resolve::Visibility,
//!     tessellate::{tessellate, TessellateSettings},
//! };
//!
//! let circle = ScalarField::new(|x, z| x * x + z * z - 1.0);
//! let settings = TessellateSettings {
//!     resolution: 5,
//!     ..Default::default()
//! };
//! let strips = tessellate(&circle, Visibility::PositiveOnly, &settings)?;
//! for s in &strips {
//!     for v in &s.vertices {
//!         assert!(v.y >= 0.0);
//!     }
//! }
//! # Ok::<(), phaseset::Error>(())
//! ```
//!
//! # Feature flags
#![doc = document_features::document_features!()]
#![warn(missing_docs)]

mod error;
pub use error::Error;

mod field;
pub use field::ScalarField;

pub mod phase;
pub mod resolve;
pub mod scene;
pub mod sign;
pub mod tessellate;

pub use scene::Scene;

#[cfg(feature = "rhai")]
pub mod rhai;

/// Maximum number of simultaneously defined geometries
pub const MAX_GEOMETRIES: usize = 10;

/// Number of entries in a [`PhaseTable`](phase::PhaseTable)
///
/// This is the number of sign combinations for [`MAX_GEOMETRIES`] geometries.
pub const TABLE_CAPACITY: usize = 1 << MAX_GEOMETRIES;
