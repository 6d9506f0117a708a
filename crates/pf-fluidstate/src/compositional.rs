//! Fully populated fluid state for compositional models.
//!
//! `CompositionalFluidState` is plain data: an equilibrium model (flash,
//! equation of state, miscibility model) fills it through the setters, and
//! solvers read it back through [`FluidState`]. It does not compute
//! equilibrium itself, only the standard mixture relations that follow from
//! values already set.

use crate::contract::FluidState;
use crate::error::{FluidStateError, FluidStateResult};
use pf_core::Scalar;
use pf_core::units::constants::r_molar;

/// Phase/component resolved fluid state with compile-time dimensions.
///
/// - `NP`: number of phases
/// - `NC`: number of components
/// - `NS`: number of solvents (the first `NS` components), `NS <= NC`
///
/// Every value starts at zero. Reads and writes with an index outside the
/// declared dimensions return [`FluidStateError::IndexOutOfRange`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionalFluidState<S: Scalar, const NP: usize, const NC: usize, const NS: usize> {
    saturation: [S; NP],
    mole_frac: [[S; NC]; NP],
    concentration: [[S; NC]; NP],
    phase_concentration: [S; NP],
    density: [S; NP],
    average_molar_mass: [S; NP],
    phase_pressure: [S; NP],
    fugacity: [S; NC],
    temperature: S,
}

impl<S: Scalar, const NP: usize, const NC: usize, const NS: usize> Default
    for CompositionalFluidState<S, NP, NC, NS>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar, const NP: usize, const NC: usize, const NS: usize>
    CompositionalFluidState<S, NP, NC, NS>
{
    /// Create an all-zero state.
    pub fn new() -> Self {
        const { assert!(NS <= NC, "fluid state declares more solvents than components") }
        let zero = S::zero();
        Self {
            saturation: [zero; NP],
            mole_frac: [[zero; NC]; NP],
            concentration: [[zero; NC]; NP],
            phase_concentration: [zero; NP],
            density: [zero; NP],
            average_molar_mass: [zero; NP],
            phase_pressure: [zero; NP],
            fugacity: [zero; NC],
            temperature: zero,
        }
    }

    /// Whether a component is one of the highly miscible solvents.
    pub const fn is_solvent(comp_idx: usize) -> bool {
        comp_idx < NS
    }

    /// Saturation of a phase [-], a fraction in `[0, 1]`.
    pub fn set_saturation(&mut self, phase_idx: usize, value: S) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        self.saturation[p] = validation::fraction(value, "saturation")?;
        Ok(())
    }

    /// Mole fraction of a component in a phase [-], a fraction in `[0, 1]`.
    pub fn set_mole_frac(
        &mut self,
        phase_idx: usize,
        comp_idx: usize,
        value: S,
    ) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        let c = component(comp_idx, NC)?;
        self.mole_frac[p][c] = validation::fraction(value, "mole fraction")?;
        Ok(())
    }

    /// Set the whole composition of a phase at once.
    ///
    /// Nothing is written unless every fraction is valid.
    pub fn set_mole_fracs(&mut self, phase_idx: usize, values: [S; NC]) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        for v in values {
            validation::fraction(v, "mole fraction")?;
        }
        self.mole_frac[p] = values;
        Ok(())
    }

    /// Component concentration in a phase [mol/m³], non-negative.
    pub fn set_concentration(
        &mut self,
        phase_idx: usize,
        comp_idx: usize,
        value: S,
    ) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        let c = component(comp_idx, NC)?;
        self.concentration[p][c] = validation::non_negative(value, "concentration")?;
        Ok(())
    }

    /// Total concentration of a phase [mol/m³], non-negative.
    pub fn set_phase_concentration(&mut self, phase_idx: usize, value: S) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        self.phase_concentration[p] = validation::non_negative(value, "phase concentration")?;
        Ok(())
    }

    /// Mass density of a phase [kg/m³], positive.
    pub fn set_density(&mut self, phase_idx: usize, value: S) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        self.density[p] = validation::positive(value, "density")?;
        Ok(())
    }

    /// Average molar mass of a phase [kg/mol], positive.
    pub fn set_average_molar_mass(&mut self, phase_idx: usize, value: S) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        self.average_molar_mass[p] = validation::positive(value, "average molar mass")?;
        Ok(())
    }

    /// Pressure of a phase [Pa], positive.
    pub fn set_phase_pressure(&mut self, phase_idx: usize, value: S) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        self.phase_pressure[p] = validation::positive(value, "phase pressure")?;
        Ok(())
    }

    /// Fugacity of a component [Pa], non-negative.
    pub fn set_fugacity(&mut self, comp_idx: usize, value: S) -> FluidStateResult<()> {
        let c = component(comp_idx, NC)?;
        self.fugacity[c] = validation::non_negative(value, "fugacity")?;
        Ok(())
    }

    /// Equilibrium temperature [K], positive.
    pub fn set_temperature(&mut self, value: S) -> FluidStateResult<()> {
        self.temperature = validation::positive(value, "temperature")?;
        Ok(())
    }

    /// Recompute the composition-derived quantities of one phase.
    ///
    /// From the phase's mole fractions `x_i`, its density `rho` and the
    /// component molar masses `M_i` [kg/mol]:
    ///
    /// ```text
    /// M   = Σ x_i M_i
    /// c   = rho / M
    /// c_i = x_i c
    /// ```
    pub fn update_mixture_quantities(
        &mut self,
        phase_idx: usize,
        molar_masses: &[S; NC],
    ) -> FluidStateResult<()> {
        let p = phase(phase_idx, NP)?;
        for &m in molar_masses {
            validation::positive(m, "component molar mass")?;
        }

        let avg = mean_molar_mass(&self.mole_frac[p], molar_masses)?;
        let rho = validation::positive(self.density[p], "density")?;
        let total = rho / avg;

        self.average_molar_mass[p] = avg;
        self.phase_concentration[p] = total;
        for (c_i, &x_i) in self.concentration[p].iter_mut().zip(&self.mole_frac[p]) {
            *c_i = x_i * total;
        }

        tracing::trace!(
            phase = p,
            average_molar_mass = avg.as_f64(),
            phase_concentration = total.as_f64(),
            "updated mixture quantities"
        );
        Ok(())
    }

    /// Set every component fugacity from the ideal-gas relation `f_i = R T c_i`,
    /// using the concentrations of `gas_phase_idx`.
    pub fn set_ideal_gas_fugacities(&mut self, gas_phase_idx: usize) -> FluidStateResult<()> {
        let p = phase(gas_phase_idx, NP)?;
        let t = validation::positive(self.temperature, "temperature")?;
        let rt = r_molar::<S>() * t;
        for (f_i, &c_i) in self.fugacity.iter_mut().zip(&self.concentration[p]) {
            *f_i = rt * c_i;
        }
        Ok(())
    }

    /// Mass fraction of a component in a phase, `x_i M_i / Σ x_j M_j` [-].
    pub fn mass_frac(
        &self,
        phase_idx: usize,
        comp_idx: usize,
        molar_masses: &[S; NC],
    ) -> FluidStateResult<S> {
        let p = phase(phase_idx, NP)?;
        let c = component(comp_idx, NC)?;
        for &m in molar_masses {
            validation::positive(m, "component molar mass")?;
        }
        let avg = mean_molar_mass(&self.mole_frac[p], molar_masses)?;
        Ok(self.mole_frac[p][c] * molar_masses[c] / avg)
    }
}

impl<S: Scalar, const NP: usize, const NC: usize, const NS: usize> FluidState
    for CompositionalFluidState<S, NP, NC, NS>
{
    type Scalar = S;
    const NUM_PHASES: usize = NP;
    const NUM_COMPONENTS: usize = NC;
    const NUM_SOLVENTS: usize = NS;

    fn saturation(&self, phase_idx: usize) -> FluidStateResult<S> {
        Ok(self.saturation[phase(phase_idx, NP)?])
    }

    fn mole_frac(&self, phase_idx: usize, comp_idx: usize) -> FluidStateResult<S> {
        Ok(self.mole_frac[phase(phase_idx, NP)?][component(comp_idx, NC)?])
    }

    fn phase_concentration(&self, phase_idx: usize) -> FluidStateResult<S> {
        Ok(self.phase_concentration[phase(phase_idx, NP)?])
    }

    fn concentration(&self, phase_idx: usize, comp_idx: usize) -> FluidStateResult<S> {
        Ok(self.concentration[phase(phase_idx, NP)?][component(comp_idx, NC)?])
    }

    fn density(&self, phase_idx: usize) -> FluidStateResult<S> {
        Ok(self.density[phase(phase_idx, NP)?])
    }

    fn average_molar_mass(&self, phase_idx: usize) -> FluidStateResult<S> {
        Ok(self.average_molar_mass[phase(phase_idx, NP)?])
    }

    fn fugacity(&self, comp_idx: usize) -> FluidStateResult<S> {
        Ok(self.fugacity[component(comp_idx, NC)?])
    }

    fn phase_pressure(&self, phase_idx: usize) -> FluidStateResult<S> {
        Ok(self.phase_pressure[phase(phase_idx, NP)?])
    }

    fn temperature(&self) -> FluidStateResult<S> {
        Ok(self.temperature)
    }
}

fn phase(index: usize, len: usize) -> FluidStateResult<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(FluidStateError::IndexOutOfRange {
            what: "phase",
            index,
            len,
        })
    }
}

fn component(index: usize, len: usize) -> FluidStateResult<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(FluidStateError::IndexOutOfRange {
            what: "component",
            index,
            len,
        })
    }
}

fn mean_molar_mass<S: Scalar>(mole_frac: &[S], molar_masses: &[S]) -> FluidStateResult<S> {
    let avg: S = mole_frac
        .iter()
        .zip(molar_masses)
        .map(|(&x, &m)| x * m)
        .sum();
    validation::positive(avg, "average molar mass")
}

/// Validation helpers for populated values.
mod validation {
    use super::*;

    pub fn fraction<S: Scalar>(v: S, what: &'static str) -> FluidStateResult<S> {
        if !v.is_finite() || v < S::zero() || v > S::one() {
            return Err(FluidStateError::NonPhysical { what });
        }
        Ok(v)
    }

    pub fn non_negative<S: Scalar>(v: S, what: &'static str) -> FluidStateResult<S> {
        if !v.is_finite() || v < S::zero() {
            return Err(FluidStateError::NonPhysical { what });
        }
        Ok(v)
    }

    pub fn positive<S: Scalar>(v: S, what: &'static str) -> FluidStateResult<S> {
        if !v.is_finite() || v <= S::zero() {
            return Err(FluidStateError::NonPhysical { what });
        }
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::numeric::{Tolerances, nearly_equal};
    use pf_core::units::constants::R_MOLAR;

    type WaterAir = CompositionalFluidState<f64, 2, 2, 1>;

    const M_WATER: f64 = 0.018_015;
    const M_AIR: f64 = 0.028_96;

    fn water_air() -> WaterAir {
        let mut fs = WaterAir::new();
        fs.set_temperature(300.0).unwrap();
        fs.set_saturation(0, 0.4).unwrap();
        fs.set_saturation(1, 0.6).unwrap();
        fs.set_mole_fracs(0, [0.9999, 0.0001]).unwrap();
        fs.set_mole_fracs(1, [0.03, 0.97]).unwrap();
        fs.set_density(0, 996.5).unwrap();
        fs.set_density(1, 1.16).unwrap();
        fs.set_phase_pressure(0, 1.0e5).unwrap();
        fs.set_phase_pressure(1, 1.0e5).unwrap();
        let masses = [M_WATER, M_AIR];
        fs.update_mixture_quantities(0, &masses).unwrap();
        fs.update_mixture_quantities(1, &masses).unwrap();
        fs
    }

    #[test]
    fn new_state_is_zeroed() {
        let fs = WaterAir::new();
        assert_eq!(fs.saturation(1).unwrap(), 0.0);
        assert_eq!(fs.mole_frac(1, 1).unwrap(), 0.0);
        assert_eq!(fs.temperature().unwrap(), 0.0);
        assert_eq!(fs, WaterAir::default());
    }

    #[test]
    fn setters_round_trip_through_accessors() {
        let fs = water_air();
        assert_eq!(fs.saturation(0).unwrap(), 0.4);
        assert_eq!(fs.mole_frac(1, 0).unwrap(), 0.03);
        assert_eq!(fs.density(1).unwrap(), 1.16);
        assert_eq!(fs.phase_pressure(0).unwrap(), 1.0e5);
        assert_eq!(fs.temperature().unwrap(), 300.0);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut fs = water_air();
        assert_eq!(
            fs.saturation(2),
            Err(FluidStateError::IndexOutOfRange {
                what: "phase",
                index: 2,
                len: 2
            })
        );
        assert_eq!(
            fs.mole_frac(0, 5),
            Err(FluidStateError::IndexOutOfRange {
                what: "component",
                index: 5,
                len: 2
            })
        );
        assert!(fs.fugacity(2).is_err());
        assert!(fs.set_density(3, 1.0).is_err());
    }

    #[test]
    fn non_physical_values_are_rejected() {
        let mut fs = WaterAir::new();
        assert!(fs.set_saturation(0, 1.2).is_err());
        assert!(fs.set_saturation(0, -0.1).is_err());
        assert!(fs.set_mole_frac(0, 0, f64::NAN).is_err());
        assert!(fs.set_density(0, 0.0).is_err());
        assert!(fs.set_temperature(-5.0).is_err());
        assert!(fs.set_fugacity(0, f64::INFINITY).is_err());
    }

    #[test]
    fn rejected_composition_leaves_phase_untouched() {
        let mut fs = water_air();
        assert!(fs.set_mole_fracs(0, [0.5, 1.5]).is_err());
        assert_eq!(fs.mole_frac(0, 0).unwrap(), 0.9999);
    }

    #[test]
    fn mixture_quantities_follow_mixing_rules() {
        let fs = water_air();
        let tol = Tolerances::default();

        let m_gas = 0.03 * M_WATER + 0.97 * M_AIR;
        assert!(nearly_equal(fs.average_molar_mass(1).unwrap(), m_gas, tol));
        assert!(nearly_equal(
            fs.phase_concentration(1).unwrap(),
            1.16 / m_gas,
            tol
        ));

        for p in 0..2 {
            let rho = fs.density(p).unwrap();
            let m = fs.average_molar_mass(p).unwrap();
            let mut sum = 0.0;
            for c in 0..2 {
                let expected = rho * fs.mole_frac(p, c).unwrap() / m;
                assert!(nearly_equal(fs.concentration(p, c).unwrap(), expected, tol));
                sum += fs.concentration(p, c).unwrap();
            }
            assert!(nearly_equal(sum, fs.phase_concentration(p).unwrap(), tol));
        }
    }

    #[test]
    fn mixture_update_needs_density_and_composition() {
        let mut fs = WaterAir::new();
        fs.set_mole_fracs(0, [1.0, 0.0]).unwrap();
        assert!(matches!(
            fs.update_mixture_quantities(0, &[M_WATER, M_AIR]),
            Err(FluidStateError::NonPhysical { what: "density" })
        ));

        let mut fs = WaterAir::new();
        fs.set_density(0, 1000.0).unwrap();
        assert!(matches!(
            fs.update_mixture_quantities(0, &[M_WATER, M_AIR]),
            Err(FluidStateError::NonPhysical {
                what: "average molar mass"
            })
        ));
    }

    #[test]
    fn ideal_gas_fugacities_recover_partial_pressures() {
        let mut fs = water_air();
        fs.set_ideal_gas_fugacities(1).unwrap();

        // c = p / (R T) for the gas phase, so f_i = x_i p.
        let t = 300.0;
        let c_total = fs.phase_concentration(1).unwrap();
        let p_ideal = c_total * R_MOLAR * t;
        let tol = Tolerances::default();
        assert!(nearly_equal(fs.fugacity(0).unwrap(), 0.03 * p_ideal, tol));
        assert!(nearly_equal(fs.fugacity(1).unwrap(), 0.97 * p_ideal, tol));
    }

    #[test]
    fn mass_fractions_sum_to_one() {
        let fs = water_air();
        let masses = [M_WATER, M_AIR];
        let sum: f64 = (0..2).map(|c| fs.mass_frac(1, c, &masses).unwrap()).sum();
        assert!(nearly_equal(sum, 1.0, Tolerances::default()));
        assert!(fs.mass_frac(1, 0, &masses).unwrap() < 0.03);
    }

    #[test]
    fn mass_frac_rejects_non_physical_molar_masses() {
        let mut fs = WaterAir::new();
        fs.set_mole_fracs(0, [0.5, 0.5]).unwrap();
        assert_eq!(
            fs.mass_frac(0, 1, &[0.1, -0.05]),
            Err(FluidStateError::NonPhysical {
                what: "component molar mass"
            })
        );
        assert!(fs.mass_frac(0, 0, &[f64::NAN, 0.1]).is_err());
        assert!(fs.mass_frac(0, 1, &[0.1, 0.3]).is_ok());
    }

    #[test]
    fn solvents_are_leading_components() {
        assert!(WaterAir::is_solvent(0));
        assert!(!WaterAir::is_solvent(1));
        assert!(!CompositionalFluidState::<f64, 1, 3, 0>::is_solvent(0));
        assert!(CompositionalFluidState::<f64, 1, 3, 3>::is_solvent(2));
    }

    #[test]
    fn single_precision_state() {
        let mut fs = CompositionalFluidState::<f32, 1, 1, 1>::new();
        fs.set_density(0, 1000.0).unwrap();
        fs.set_mole_fracs(0, [1.0]).unwrap();
        fs.update_mixture_quantities(0, &[0.018]).unwrap();
        let c = fs.concentration(0, 0).unwrap();
        assert!(nearly_equal(c, 1000.0 / 0.018, Tolerances::single_precision()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::consistency::check_concentration;
    use pf_core::numeric::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn concentrations_sum_to_phase_concentration(
            raw in prop::collection::vec(0.01_f64..1.0, 3),
            masses in prop::collection::vec(0.002_f64..0.2, 3),
            rho in 0.5_f64..1500.0,
        ) {
            let total: f64 = raw.iter().sum();
            let x = [raw[0] / total, raw[1] / total, raw[2] / total];
            let m = [masses[0], masses[1], masses[2]];

            let mut fs = CompositionalFluidState::<f64, 1, 3, 2>::new();
            fs.set_mole_fracs(0, x).unwrap();
            fs.set_density(0, rho).unwrap();
            fs.update_mixture_quantities(0, &m).unwrap();

            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
            let sum: f64 = (0..3).map(|c| fs.concentration(0, c).unwrap()).sum();
            prop_assert!(nearly_equal(sum, fs.phase_concentration(0).unwrap(), tol));
            for c in 0..3 {
                prop_assert!(check_concentration(&fs, 0, c, tol).is_ok());
            }
        }
    }
}
