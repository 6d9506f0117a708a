//! pf-fluidstate: the fluid state contract for porous-media flow.
//!
//! A fluid state is a snapshot of thermodynamic-equilibrium properties
//! (saturation, density, pressure, temperature, fugacity) and composition
//! of a multi-phase, multi-component mixture. Numerical solvers read it;
//! equilibrium models (flash calculations, equations of state, miscibility
//! models) fill it.
//!
//! Provides:
//! - `FluidState` trait: capability constants + read accessors
//! - `CompositionalFluidState`: fully populated plain-data implementation
//! - Consistency checks for the mixture laws
//! - `FluidStateSi`: `uom`-typed accessor views
//!
//! # Architecture
//!
//! The contract is a trait with associated constants (`NUM_PHASES`,
//! `NUM_COMPONENTS`, `NUM_SOLVENTS`) and default accessor bodies that return
//! `FluidStateError::NotImplemented`. Solvers stay generic over the concrete
//! state, so every accessor call is resolved at compile time.
//!
//! # Example
//!
//! ```
//! use pf_fluidstate::{CompositionalFluidState, FluidState, consistency};
//! use pf_core::Tolerances;
//!
//! // Two phases (water, gas), two components (H2O, N2), one solvent.
//! let mut fs = CompositionalFluidState::<f64, 2, 2, 1>::new();
//! fs.set_saturation(0, 0.3)?;
//! fs.set_saturation(1, 0.7)?;
//! fs.set_mole_fracs(0, [0.9, 0.1])?;
//! fs.set_mole_fracs(1, [0.05, 0.95])?;
//!
//! consistency::check_saturations(&fs, Tolerances::default())?;
//! assert_eq!(fs.mole_frac(1, 1)?, 0.95);
//! # Ok::<(), pf_fluidstate::FluidStateError>(())
//! ```

pub mod compositional;
pub mod consistency;
pub mod contract;
pub mod error;
pub mod units;

// Re-exports for ergonomics
pub use compositional::CompositionalFluidState;
pub use consistency::{ConsistencyReport, check_all};
pub use contract::{Capabilities, FluidState, assert_capabilities, capabilities_valid};
pub use error::{FluidStateError, FluidStateResult};
pub use units::FluidStateSi;
