//! Consistency checks for populated fluid states.
//!
//! These verify the consumer-visible laws every fully populated state should
//! satisfy:
//! - saturations of all phases sum to one
//! - mole fractions within a phase sum to one
//! - `c_i = rho * x_i / M` for each phase and component
//!
//! All checks are generic over the concrete state and dispatch statically.

use crate::contract::{FluidState, assert_capabilities};
use crate::error::{FluidStateError, FluidStateResult};
use pf_core::numeric::{Real, Tolerances, nearly_equal};
use pf_core::Scalar;

/// Sum of saturations over all phases.
pub fn saturation_sum<FS: FluidState>(fs: &FS) -> FluidStateResult<FS::Scalar> {
    assert_capabilities::<FS>();
    (0..FS::NUM_PHASES).map(|p| fs.saturation(p)).sum()
}

/// Sum of mole fractions over all components of one phase.
pub fn mole_frac_sum<FS: FluidState>(fs: &FS, phase_idx: usize) -> FluidStateResult<FS::Scalar> {
    assert_capabilities::<FS>();
    (0..FS::NUM_COMPONENTS)
        .map(|c| fs.mole_frac(phase_idx, c))
        .sum()
}

pub fn check_saturations<FS: FluidState>(fs: &FS, tol: Tolerances) -> FluidStateResult<()> {
    let sum = saturation_sum(fs)?;
    expect_unity(sum, "saturation sum", tol)
}

pub fn check_mole_fracs<FS: FluidState>(
    fs: &FS,
    phase_idx: usize,
    tol: Tolerances,
) -> FluidStateResult<()> {
    let sum = mole_frac_sum(fs, phase_idx)?;
    expect_unity(sum, "mole fraction sum", tol)
}

/// Check `concentration(p, c) == density(p) * mole_frac(p, c) / average_molar_mass(p)`.
pub fn check_concentration<FS: FluidState>(
    fs: &FS,
    phase_idx: usize,
    comp_idx: usize,
    tol: Tolerances,
) -> FluidStateResult<()> {
    let (expected, actual) =
        concentration_pair(fs, phase_idx, comp_idx)?.ok_or(FluidStateError::NonPhysical {
            what: "average molar mass",
        })?;
    if nearly_equal(actual, expected, tol) {
        return Ok(());
    }
    tracing::warn!(
        phase = phase_idx,
        component = comp_idx,
        expected = expected.as_f64(),
        actual = actual.as_f64(),
        "concentration inconsistent with density and composition"
    );
    Err(FluidStateError::Inconsistent {
        what: "concentration",
        expected: expected.as_f64(),
        actual: actual.as_f64(),
    })
}

/// Result of running every consistency law over a fluid state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyReport {
    /// Sum of saturations over all phases.
    pub saturation_sum: Real,
    /// Mole fraction sum per phase.
    pub mole_frac_sums: Vec<Real>,
    /// Largest `|c - rho x / M|` over all phases and components, or `None`
    /// when the state does not provide every quantity involved.
    pub max_concentration_residual: Option<Real>,
    /// Whether every evaluated law held within tolerance.
    pub consistent: bool,
}

/// Evaluate all laws and summarize them.
///
/// The concentration law is skipped when any of concentration, density,
/// mole fraction or average molar mass is not implemented by `FS`, or when
/// an average molar mass is not positive yet (mixture quantities not
/// populated). Missing saturations or mole fractions, and any other error,
/// propagate.
pub fn check_all<FS: FluidState>(fs: &FS, tol: Tolerances) -> FluidStateResult<ConsistencyReport> {
    let saturation_sum = saturation_sum(fs)?.as_f64();
    let mut consistent = nearly_equal(saturation_sum, 1.0, tol);

    let mut mole_frac_sums = Vec::with_capacity(FS::NUM_PHASES);
    for phase_idx in 0..FS::NUM_PHASES {
        let sum = mole_frac_sum(fs, phase_idx)?.as_f64();
        consistent &= nearly_equal(sum, 1.0, tol);
        mole_frac_sums.push(sum);
    }

    let max_concentration_residual = match max_concentration_residual(fs, tol) {
        Ok(Some((residual, ok))) => {
            consistent &= ok;
            Some(residual)
        }
        Ok(None) => None,
        Err(err) if err.is_not_implemented() => None,
        Err(err) => return Err(err),
    };

    if !consistent {
        tracing::warn!(
            saturation_sum,
            ?mole_frac_sums,
            ?max_concentration_residual,
            "fluid state violates consistency laws"
        );
    } else {
        tracing::debug!(
            phases = FS::NUM_PHASES,
            components = FS::NUM_COMPONENTS,
            "fluid state consistent"
        );
    }

    Ok(ConsistencyReport {
        saturation_sum,
        mole_frac_sums,
        max_concentration_residual,
        consistent,
    })
}

/// Expected and stored concentration, or `None` while the phase's average
/// molar mass is not positive.
fn concentration_pair<FS: FluidState>(
    fs: &FS,
    phase_idx: usize,
    comp_idx: usize,
) -> FluidStateResult<Option<(FS::Scalar, FS::Scalar)>> {
    let rho = fs.density(phase_idx)?;
    let x = fs.mole_frac(phase_idx, comp_idx)?;
    let m = fs.average_molar_mass(phase_idx)?;
    let actual = fs.concentration(phase_idx, comp_idx)?;
    if !(m > <FS::Scalar as Scalar>::lit(0.0)) {
        return Ok(None);
    }
    Ok(Some((rho * x / m, actual)))
}

fn max_concentration_residual<FS: FluidState>(
    fs: &FS,
    tol: Tolerances,
) -> FluidStateResult<Option<(Real, bool)>> {
    let mut worst: Real = 0.0;
    let mut ok = true;
    for phase_idx in 0..FS::NUM_PHASES {
        for comp_idx in 0..FS::NUM_COMPONENTS {
            let Some((expected, actual)) = concentration_pair(fs, phase_idx, comp_idx)? else {
                tracing::debug!(
                    phase = phase_idx,
                    "average molar mass not populated, skipping concentration law"
                );
                return Ok(None);
            };
            worst = worst.max((actual.as_f64() - expected.as_f64()).abs());
            ok &= nearly_equal(actual, expected, tol);
        }
    }
    Ok(Some((worst, ok)))
}

fn expect_unity<S: Scalar>(sum: S, what: &'static str, tol: Tolerances) -> FluidStateResult<()> {
    if nearly_equal(sum, S::one(), tol) {
        return Ok(());
    }
    tracing::warn!(what, sum = sum.as_f64(), "sum deviates from one");
    Err(FluidStateError::Inconsistent {
        what,
        expected: 1.0,
        actual: sum.as_f64(),
    })
}
