//! pf-core: stable foundation for porous-media fluid states.
//!
//! Contains:
//! - numeric (Scalar abstraction + tolerances + float helpers)
//! - units (uom SI types + constructors + physical constants)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PfError, PfResult};
pub use numeric::*;
pub use units::*;
