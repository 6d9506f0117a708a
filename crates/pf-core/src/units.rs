// pf-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, MolarConcentration as UomMolarConcentration,
    MolarMass as UomMolarMass, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type MolarConcentration = UomMolarConcentration;
pub type MolarMass = UomMolarMass;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn mol_per_m3(v: f64) -> MolarConcentration {
    use uom::si::molar_concentration::mole_per_cubic_meter;
    MolarConcentration::new::<mole_per_cubic_meter>(v)
}

#[inline]
pub fn kg_per_mol(v: f64) -> MolarMass {
    use uom::si::molar_mass::kilogram_per_mole;
    MolarMass::new::<kilogram_per_mole>(v)
}

pub mod constants {
    use crate::Scalar;

    /// Molar gas constant [J/(mol·K)]
    pub const R_MOLAR: f64 = 8.314_462_618;

    /// Molar gas constant in the requested scalar type.
    #[inline]
    pub fn r_molar<S: Scalar>() -> S {
        S::lit(R_MOLAR)
    }
}
