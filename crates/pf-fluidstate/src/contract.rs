//! The fluid state contract: capability constants and read accessors.

use crate::error::{FluidStateError, FluidStateResult};
use pf_core::Scalar;

/// Phase/component counts a fluid system declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub num_phases: usize,
    pub num_components: usize,
    pub num_solvents: usize,
}

/// Read-only view of thermodynamic-equilibrium properties and composition of
/// a multi-phase, multi-component fluid mixture.
///
/// This trait does _not_ compute the equilibrium. It only defines how a solver
/// reads the resulting quantities once an equilibrium model has filled them.
///
/// Implementations must declare the three capability constants; omitting one
/// is a compile error. Every accessor has a default body returning
/// [`FluidStateError::NotImplemented`], so a concrete state overrides only the
/// quantities its fluid model can provide. Call sites are generic over the
/// implementing type (`fn f<FS: FluidState>(fs: &FS)`), so each accessor
/// resolves statically with no vtable.
///
/// Phase indices run over `0..NUM_PHASES`, component indices over
/// `0..NUM_COMPONENTS`. The contract performs no bounds checks; that is the
/// implementation's responsibility.
///
/// # Example
///
/// ```
/// use pf_fluidstate::FluidState;
///
/// struct Isothermal;
///
/// impl FluidState for Isothermal {
///     type Scalar = f64;
///     const NUM_PHASES: usize = 1;
///     const NUM_COMPONENTS: usize = 1;
///     const NUM_SOLVENTS: usize = 1;
///
///     fn temperature(&self) -> pf_fluidstate::FluidStateResult<f64> {
///         Ok(293.15)
///     }
/// }
///
/// let fs = Isothermal;
/// assert_eq!(fs.temperature().unwrap(), 293.15);
/// assert!(fs.density(0).unwrap_err().is_not_implemented());
/// ```
///
/// A state that omits a capability constant does not compile:
///
/// ```compile_fail
/// use pf_fluidstate::FluidState;
///
/// struct NoSolvents;
///
/// impl FluidState for NoSolvents {
///     type Scalar = f64;
///     const NUM_PHASES: usize = 2;
///     const NUM_COMPONENTS: usize = 2;
/// }
/// ```
pub trait FluidState {
    /// Numeric type every accessor returns.
    type Scalar: Scalar;

    /// The maximum number of phases that can occur in the fluid system.
    const NUM_PHASES: usize;

    /// The number of the fluid system's chemical (pseudo-) species.
    const NUM_COMPONENTS: usize;

    /// The number of "highly" miscible components. Only traces of the
    /// remaining components are resolved in the liquid phases.
    ///
    /// Solvents are the first `NUM_SOLVENTS` components.
    const NUM_SOLVENTS: usize;

    /// Declared capability constants as a value.
    fn capabilities() -> Capabilities {
        assert_capabilities::<Self>();
        Capabilities {
            num_phases: Self::NUM_PHASES,
            num_components: Self::NUM_COMPONENTS,
            num_solvents: Self::NUM_SOLVENTS,
        }
    }

    /// Saturation of a phase (fraction of pore volume) [-].
    fn saturation(&self, _phase_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::saturation()")
    }

    /// Mole fraction of a component within a phase [-].
    fn mole_frac(&self, _phase_idx: usize, _comp_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::mole_frac()")
    }

    /// Sum of the concentrations of all components in a phase [mol/m³].
    fn phase_concentration(&self, _phase_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::phase_concentration()")
    }

    /// Concentration of an individual component in a phase [mol/m³].
    fn concentration(
        &self,
        _phase_idx: usize,
        _comp_idx: usize,
    ) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::concentration()")
    }

    /// Mass density of a phase [kg/m³].
    fn density(&self, _phase_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::density()")
    }

    /// Average molar mass of a phase [kg/mol].
    ///
    /// This is the sum of all molar masses times their respective mole
    /// fractions in the phase.
    fn average_molar_mass(&self, _phase_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::average_molar_mass()")
    }

    /// Fugacity (effective partial pressure) of a component [Pa].
    ///
    /// For an ideal gas this is `R * T * c`.
    fn fugacity(&self, _comp_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::fugacity()")
    }

    /// Total pressure of a phase [Pa].
    fn phase_pressure(&self, _phase_idx: usize) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::phase_pressure()")
    }

    /// Temperature at which the equilibrium was calculated [K].
    fn temperature(&self) -> FluidStateResult<Self::Scalar> {
        not_implemented("FluidState::temperature()")
    }
}

/// Whether `FS` declares a valid solvent count (`NUM_SOLVENTS <= NUM_COMPONENTS`).
pub const fn capabilities_valid<FS: FluidState + ?Sized>() -> bool {
    FS::NUM_SOLVENTS <= FS::NUM_COMPONENTS
}

/// Compile-time check of the capability invariants of `FS`.
///
/// Evaluated in a `const` block when the calling function is monomorphized, so
/// it costs nothing at run time. Generic entry points of this crate call it.
#[inline(always)]
pub fn assert_capabilities<FS: FluidState + ?Sized>() {
    const {
        assert!(
            capabilities_valid::<FS>(),
            "fluid state declares more solvents than components"
        )
    }
}

/// Assert at item level that a concrete fluid state type has valid
/// capability constants.
///
/// ```
/// use pf_fluidstate::{assert_fluid_state, FluidState};
///
/// struct AllSolvents;
///
/// impl FluidState for AllSolvents {
///     type Scalar = f64;
///     const NUM_PHASES: usize = 2;
///     const NUM_COMPONENTS: usize = 3;
///     const NUM_SOLVENTS: usize = 3;
/// }
///
/// assert_fluid_state!(AllSolvents);
/// ```
///
/// ```compile_fail
/// use pf_fluidstate::{assert_fluid_state, FluidState};
///
/// struct TooManySolvents;
///
/// impl FluidState for TooManySolvents {
///     type Scalar = f64;
///     const NUM_PHASES: usize = 2;
///     const NUM_COMPONENTS: usize = 2;
///     const NUM_SOLVENTS: usize = 3;
/// }
///
/// assert_fluid_state!(TooManySolvents);
/// ```
#[macro_export]
macro_rules! assert_fluid_state {
    ($ty:ty) => {
        const _: () = assert!(
            $crate::capabilities_valid::<$ty>(),
            "fluid state declares more solvents than components"
        );
    };
}

#[cold]
pub(crate) fn not_implemented<T>(what: &'static str) -> FluidStateResult<T> {
    tracing::debug!(what, "fluid state accessor not implemented");
    Err(FluidStateError::NotImplemented { what })
}
