use crate::SfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute + relative tolerance pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Tolerance used to compare adjacent correlation segment boundaries.
    pub const BOUNDARY: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// True when `v` is indistinguishable from zero (amounts, masses).
pub fn is_negligible(v: Real) -> bool {
    v.abs() <= 1e-12
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SfError::NonFinite { what, value: v })
    }
}

/// Finite and non-negative, as required for amounts and absolute temperatures.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, SfError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        Err(SfError::Negative { what, value: v })
    } else {
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn boundary_tolerance_accepts_rounding() {
        assert!(nearly_equal(1000.0, 1000.0 + 1e-7, Tolerances::BOUNDARY));
        assert!(!nearly_equal(1000.0, 1000.1, Tolerances::BOUNDARY));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert!(ensure_non_negative(0.0, "moles").is_ok());
        let err = ensure_non_negative(-1.0, "moles").unwrap_err();
        assert!(matches!(err, SfError::Negative { what: "moles", .. }));
    }

    #[test]
    fn negligible_values() {
        assert!(is_negligible(0.0));
        assert!(is_negligible(-1e-14));
        assert!(!is_negligible(1e-6));
    }
}
