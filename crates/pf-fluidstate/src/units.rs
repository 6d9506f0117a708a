//! SI-typed views of fluid state accessors.
//!
//! The contract returns bare scalars in SI units. `FluidStateSi` wraps the
//! same values in `uom` quantities for consumers that want dimension checking
//! at their boundary (output writers, reporting).

use crate::contract::{FluidState, assert_capabilities};
use crate::error::FluidStateResult;
use pf_core::Scalar;
use pf_core::units::{
    Density, MolarConcentration, MolarMass, Pressure, Temperature, k, kg_per_m3, kg_per_mol,
    mol_per_m3, pa,
};

/// Unit-typed accessors, available on every [`FluidState`].
pub trait FluidStateSi: FluidState {
    fn phase_pressure_si(&self, phase_idx: usize) -> FluidStateResult<Pressure> {
        assert_capabilities::<Self>();
        Ok(pa(self.phase_pressure(phase_idx)?.as_f64()))
    }

    fn temperature_si(&self) -> FluidStateResult<Temperature> {
        assert_capabilities::<Self>();
        Ok(k(self.temperature()?.as_f64()))
    }

    fn density_si(&self, phase_idx: usize) -> FluidStateResult<Density> {
        assert_capabilities::<Self>();
        Ok(kg_per_m3(self.density(phase_idx)?.as_f64()))
    }

    fn average_molar_mass_si(&self, phase_idx: usize) -> FluidStateResult<MolarMass> {
        assert_capabilities::<Self>();
        Ok(kg_per_mol(self.average_molar_mass(phase_idx)?.as_f64()))
    }

    fn concentration_si(
        &self,
        phase_idx: usize,
        comp_idx: usize,
    ) -> FluidStateResult<MolarConcentration> {
        assert_capabilities::<Self>();
        Ok(mol_per_m3(self.concentration(phase_idx, comp_idx)?.as_f64()))
    }

    fn phase_concentration_si(&self, phase_idx: usize) -> FluidStateResult<MolarConcentration> {
        assert_capabilities::<Self>();
        Ok(mol_per_m3(self.phase_concentration(phase_idx)?.as_f64()))
    }

    /// Fugacity as a pressure [Pa].
    fn fugacity_si(&self, comp_idx: usize) -> FluidStateResult<Pressure> {
        assert_capabilities::<Self>();
        Ok(pa(self.fugacity(comp_idx)?.as_f64()))
    }
}

impl<FS: FluidState> FluidStateSi for FS {}
