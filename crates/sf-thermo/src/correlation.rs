//! Heat-capacity correlations over a single temperature range.

use crate::error::{ThermoError, ThermoResult};
use sf_core::ensure_finite;

/// Heat-capacity rule Cp(T) [J/(mol·K)].
#[derive(Debug, Clone, PartialEq)]
pub enum Correlation {
    /// Temperature-independent heat capacity.
    Constant { cp: f64 },
    /// NIST Shomate form with coefficients (A, B, C, D, E, F, G, H) and t = T/1000.
    ///
    /// Only A..E enter Cp and enthalpy differences; F, G, H are kept so tables
    /// can be transcribed verbatim.
    Shomate { coeffs: [f64; 8] },
    /// Piecewise-linear Cp(T) through `(kelvin, cp)` points, strictly increasing in T.
    Tabulated { points: Vec<(f64, f64)> },
}

impl Correlation {
    pub fn constant(cp: f64) -> Self {
        Correlation::Constant { cp }
    }

    pub fn shomate(coeffs: [f64; 8]) -> Self {
        Correlation::Shomate { coeffs }
    }

    pub fn tabulated(points: Vec<(f64, f64)>) -> Self {
        Correlation::Tabulated { points }
    }

    fn kind(&self) -> &'static str {
        match self {
            Correlation::Constant { .. } => "constant",
            Correlation::Shomate { .. } => "shomate",
            Correlation::Tabulated { .. } => "tabulated",
        }
    }

    /// Instantaneous molar heat capacity at `kelvin`.
    fn cp(&self, kelvin: f64) -> f64 {
        match self {
            Correlation::Constant { cp } => *cp,
            Correlation::Shomate { coeffs } => {
                let [a, b, c, d, e, ..] = *coeffs;
                let t = kelvin / 1000.0;
                a + b * t + c * t * t + d * t.powi(3) + e / (t * t)
            }
            Correlation::Tabulated { points } => interpolate(points, kelvin),
        }
    }

    /// Molar enthalpy change from `t_initial` to `t_final` [J/mol].
    fn molar_delta_h(&self, t_initial: f64, t_final: f64) -> f64 {
        match self {
            Correlation::Constant { cp } => cp * (t_final - t_initial),
            Correlation::Shomate { coeffs } => {
                let [a, b, c, d, e, ..] = *coeffs;
                let integral = |kelvin: f64| {
                    let t = kelvin / 1000.0;
                    a * t + b / 2.0 * t * t + c / 3.0 * t.powi(3) + d / 4.0 * t.powi(4) - e / t
                };
                // Shomate enthalpies are tabulated in kJ/mol
                (integral(t_final) - integral(t_initial)) * 1000.0
            }
            Correlation::Tabulated { points } => {
                let (lo, hi, sign) = if t_initial <= t_final {
                    (t_initial, t_final, 1.0)
                } else {
                    (t_final, t_initial, -1.0)
                };
                let mut total = 0.0;
                for pair in points.windows(2) {
                    let (x0, x1) = (pair[0].0, pair[1].0);
                    let from = lo.max(x0);
                    let to = hi.min(x1);
                    if to > from {
                        total += (to - from) * (interpolate(points, from) + interpolate(points, to))
                            / 2.0;
                    }
                }
                sign * total
            }
        }
    }
}

/// Linear interpolation in a sorted `(x, y)` table, clamped at both ends.
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    let Some(&(first_x, first_y)) = points.first() else {
        return 0.0;
    };
    if x <= first_x {
        return first_y;
    }
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }
    points.last().map_or(first_y, |&(_, y)| y)
}

/// One correlation valid over `[min_kelvin, max_kelvin]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    min_kelvin: f64,
    max_kelvin: f64,
    correlation: Correlation,
}

impl Segment {
    pub fn new(min_kelvin: f64, max_kelvin: f64, correlation: Correlation) -> ThermoResult<Self> {
        ensure_finite(min_kelvin, "segment lower bound")?;
        ensure_finite(max_kelvin, "segment upper bound")?;
        if min_kelvin < 0.0 {
            return Err(ThermoError::InvalidSegment {
                what: "negative lower bound",
            });
        }
        if min_kelvin >= max_kelvin {
            return Err(ThermoError::InvalidSegment {
                what: "lower bound must be below upper bound",
            });
        }

        if let Correlation::Tabulated { points } = &correlation {
            if points.len() < 2 {
                return Err(ThermoError::InvalidSegment {
                    what: "tabulated correlation needs at least two points",
                });
            }
            if points.windows(2).any(|p| p[1].0 <= p[0].0) {
                return Err(ThermoError::InvalidSegment {
                    what: "tabulated temperatures must be strictly increasing",
                });
            }
            let first = points[0].0;
            let last = points[points.len() - 1].0;
            if first > min_kelvin || last < max_kelvin {
                return Err(ThermoError::InvalidSegment {
                    what: "tabulated points must span the segment",
                });
            }
        }

        Ok(Self {
            min_kelvin,
            max_kelvin,
            correlation,
        })
    }

    /// Shorthand for a constant heat-capacity segment.
    pub fn constant(min_kelvin: f64, max_kelvin: f64, cp: f64) -> ThermoResult<Self> {
        Self::new(min_kelvin, max_kelvin, Correlation::constant(cp))
    }

    /// Shorthand for a Shomate segment.
    pub fn shomate(min_kelvin: f64, max_kelvin: f64, coeffs: [f64; 8]) -> ThermoResult<Self> {
        Self::new(min_kelvin, max_kelvin, Correlation::shomate(coeffs))
    }

    pub fn min_kelvin(&self) -> f64 {
        self.min_kelvin
    }

    pub fn max_kelvin(&self) -> f64 {
        self.max_kelvin
    }

    pub fn correlation(&self) -> &Correlation {
        &self.correlation
    }

    pub(crate) fn snap_min(&mut self, kelvin: f64) {
        self.min_kelvin = kelvin;
    }

    pub fn contains(&self, kelvin: f64) -> bool {
        self.min_kelvin <= kelvin && kelvin <= self.max_kelvin
    }

    /// Enthalpy change [J] for `moles` between two temperatures inside this segment.
    pub fn delta_h(&self, moles: f64, t_initial: f64, t_final: f64) -> ThermoResult<f64> {
        self.check(t_initial)?;
        self.check(t_final)?;
        Ok(moles * self.correlation.molar_delta_h(t_initial, t_final))
    }

    /// Molar heat capacity [J/(mol·K)].
    pub fn cp(&self, kelvin: f64) -> ThermoResult<f64> {
        self.check(kelvin)?;
        Ok(self.correlation.cp(kelvin))
    }

    fn check(&self, kelvin: f64) -> ThermoResult<()> {
        if self.contains(kelvin) {
            Ok(())
        } else {
            Err(ThermoError::OutOfRange {
                kelvin,
                min: self.min_kelvin,
                max: self.max_kelvin,
            })
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} segment {}-{} K",
            self.correlation.kind(),
            self.min_kelvin,
            self.max_kelvin
        )
    }
}

/// Enthalpy jump of a phase change (fusion, vaporisation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatentHeat {
    pub kelvin: f64,
    /// J/mol
    pub joules_per_mole: f64,
}

impl LatentHeat {
    pub fn new(kelvin: f64, joules_per_mole: f64) -> Self {
        Self {
            kelvin,
            joules_per_mole,
        }
    }

    pub fn delta_h(&self, moles: f64) -> f64 {
        moles * self.joules_per_mole
    }
}
