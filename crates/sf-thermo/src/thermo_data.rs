//! Piecewise heat-capacity data with latent heat events.

use crate::correlation::{LatentHeat, Segment};
use crate::error::{ThermoError, ThermoResult};
use sf_core::{BASELINE_KELVIN, Tolerances, ensure_finite, is_negligible, nearly_equal};

/// Width [K] above the baseline within which a temperature below the first
/// segment is clamped onto it. Some tables start fractionally above 298 K.
const CLAMP_WINDOW_KELVIN: f64 = 2.0;

/// Sorted, contiguous heat-capacity segments plus sorted latent heats.
///
/// Construction validates that adjacent segments share their boundary and that
/// every latent heat lies inside the covered range.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoData {
    segments: Vec<Segment>,
    latent_heats: Vec<LatentHeat>,
}

impl ThermoData {
    pub fn new(mut segments: Vec<Segment>, mut latent_heats: Vec<LatentHeat>) -> ThermoResult<Self> {
        if segments.is_empty() {
            return Err(ThermoError::InvalidSegment {
                what: "thermo data needs at least one segment",
            });
        }

        segments.sort_by(|a, b| a.min_kelvin().total_cmp(&b.min_kelvin()));
        for i in 1..segments.len() {
            let upper = segments[i - 1].max_kelvin();
            let lower = segments[i].min_kelvin();
            if !nearly_equal(upper, lower, Tolerances::BOUNDARY) {
                return Err(ThermoError::NonContiguous {
                    upper_of_previous: upper,
                    lower_of_next: lower,
                });
            }
            // Snap so the segment walk can hand over exactly at the boundary.
            segments[i].snap_min(upper);
        }

        let min = segments[0].min_kelvin();
        let max = segments[segments.len() - 1].max_kelvin();

        latent_heats.sort_by(|a, b| a.kelvin.total_cmp(&b.kelvin));
        for latent in &latent_heats {
            ensure_finite(latent.joules_per_mole, "latent heat")?;
            if !(min <= latent.kelvin && latent.kelvin <= max) {
                return Err(ThermoError::LatentHeatOutOfRange {
                    kelvin: latent.kelvin,
                    min,
                    max,
                });
            }
        }

        Ok(Self {
            segments,
            latent_heats,
        })
    }

    /// Thermo data without phase changes.
    pub fn from_segments(segments: Vec<Segment>) -> ThermoResult<Self> {
        Self::new(segments, Vec::new())
    }

    pub fn min_kelvin(&self) -> f64 {
        self.segments[0].min_kelvin()
    }

    pub fn max_kelvin(&self) -> f64 {
        self.segments[self.segments.len() - 1].max_kelvin()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn latent_heats(&self) -> &[LatentHeat] {
        &self.latent_heats
    }

    pub fn covers(&self, kelvin: f64) -> bool {
        self.min_kelvin() <= kelvin && kelvin <= self.max_kelvin()
    }

    /// Enthalpy change [J] of `moles` going from `t_initial` to `t_final`,
    /// including latent heats crossed on the way up.
    pub fn delta_h(&self, moles: f64, t_initial: f64, t_final: f64) -> ThermoResult<f64> {
        let t_initial = self.admit(t_initial)?;
        let t_final = self.admit(t_final)?;

        if is_negligible(moles) {
            return Ok(0.0);
        }

        // Integrate upwards only; negate afterwards when cooling.
        let flip = t_final < t_initial;
        let (mut t_low, t_high) = if flip {
            (t_final, t_initial)
        } else {
            (t_initial, t_final)
        };

        let mut delta_h: f64 = self
            .latent_heats
            .iter()
            .filter(|l| t_low <= l.kelvin && l.kelvin < t_high)
            .map(|l| l.delta_h(moles))
            .sum();

        for segment in &self.segments {
            if !segment.contains(t_low) {
                continue;
            }
            if segment.contains(t_high) {
                delta_h += segment.delta_h(moles, t_low, t_high)?;
                break;
            }
            delta_h += segment.delta_h(moles, t_low, segment.max_kelvin())?;
            t_low = segment.max_kelvin();
        }

        Ok(if flip { -delta_h } else { delta_h })
    }

    /// Molar heat capacity [J/(mol·K)] at `kelvin`.
    pub fn cp(&self, kelvin: f64) -> ThermoResult<f64> {
        self.segments
            .iter()
            .find(|s| s.contains(kelvin))
            .ok_or(ThermoError::OutOfRange {
                kelvin,
                min: self.min_kelvin(),
                max: self.max_kelvin(),
            })?
            .cp(kelvin)
    }

    /// Accept a temperature inside the covered range, or clamp one that sits just
    /// above the baseline but below a table starting fractionally above it.
    fn admit(&self, kelvin: f64) -> ThermoResult<f64> {
        let min = self.min_kelvin();
        let max = self.max_kelvin();
        if min <= kelvin && kelvin <= max {
            return Ok(kelvin);
        }

        let window = BASELINE_KELVIN..=BASELINE_KELVIN + CLAMP_WINDOW_KELVIN;
        let near_baseline = |t: f64| t > BASELINE_KELVIN && window.contains(&t);
        if kelvin < min && near_baseline(kelvin) && near_baseline(min) {
            tracing::debug!(kelvin, min, "clamping temperature onto first thermo segment");
            return Ok(min);
        }

        Err(ThermoError::OutOfRange { kelvin, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::Correlation;

    fn water_like() -> ThermoData {
        ThermoData::new(
            vec![
                Segment::constant(373.15, 500.0, 36.57).unwrap(),
                Segment::constant(273.15, 373.15, 75.36).unwrap(),
            ],
            vec![LatentHeat::new(373.15, 40660.0)],
        )
        .unwrap()
    }

    #[test]
    fn segments_are_sorted() {
        let data = water_like();
        assert_eq!(data.min_kelvin(), 273.15);
        assert_eq!(data.max_kelvin(), 500.0);
        assert_eq!(data.segments()[0].max_kelvin(), 373.15);
    }

    #[test]
    fn gap_is_construction_error() {
        let result = ThermoData::from_segments(vec![
            Segment::constant(300.0, 400.0, 10.0).unwrap(),
            Segment::constant(410.0, 500.0, 10.0).unwrap(),
        ]);
        assert!(matches!(result, Err(ThermoError::NonContiguous { .. })));
    }

    #[test]
    fn overlap_is_construction_error() {
        let result = ThermoData::from_segments(vec![
            Segment::constant(300.0, 420.0, 10.0).unwrap(),
            Segment::constant(400.0, 500.0, 10.0).unwrap(),
        ]);
        assert!(matches!(result, Err(ThermoError::NonContiguous { .. })));
    }

    #[test]
    fn latent_heat_outside_range_rejected() {
        let result = ThermoData::new(
            vec![Segment::constant(300.0, 400.0, 10.0).unwrap()],
            vec![LatentHeat::new(450.0, 1000.0)],
        );
        assert!(matches!(
            result,
            Err(ThermoError::LatentHeatOutOfRange { .. })
        ));
    }

    #[test]
    fn latent_heat_counted_when_crossed() {
        let data = water_like();
        // Liquid up to the boiling point: no latent heat (event is at the upper end).
        let liquid = data.delta_h(1.0, 298.15, 373.15).unwrap();
        assert!((liquid - 75.36 * 75.0).abs() < 1e-9);

        // Crossing into vapour adds the latent heat.
        let to_vapour = data.delta_h(1.0, 298.15, 400.0).unwrap();
        let expected = 75.36 * 75.0 + 40660.0 + 36.57 * (400.0 - 373.15);
        assert!((to_vapour - expected).abs() < 1e-6);

        // And cooling releases it again.
        let back = data.delta_h(1.0, 400.0, 298.15).unwrap();
        assert!((back + expected).abs() < 1e-6);
    }

    #[test]
    fn zero_moles_gives_zero() {
        let data = water_like();
        assert_eq!(data.delta_h(0.0, 300.0, 450.0).unwrap(), 0.0);
    }

    #[test]
    fn out_of_range_is_error() {
        let data = water_like();
        assert!(matches!(
            data.delta_h(1.0, 300.0, 600.0),
            Err(ThermoError::OutOfRange { .. })
        ));
        assert!(data.cp(200.0).is_err());
    }

    #[test]
    fn near_baseline_temperature_is_clamped() {
        let data = ThermoData::from_segments(vec![
            Segment::constant(300.0, 1000.0, 20.0).unwrap(),
        ])
        .unwrap();
        let dh = data.delta_h(1.0, 298.15, 400.0).unwrap();
        assert!((dh - 20.0 * 100.0).abs() < 1e-9);
        let dh = data.delta_h(1.0, 400.0, 299.0).unwrap();
        assert!((dh + 20.0 * 100.0).abs() < 1e-9);

        // Below the baseline the clamp does not apply.
        assert!(data.delta_h(1.0, 290.0, 400.0).is_err());
    }

    #[test]
    fn cp_uses_covering_segment() {
        let data = ThermoData::from_segments(vec![
            Segment::constant(300.0, 400.0, 10.0).unwrap(),
            Segment::new(
                400.0,
                600.0,
                Correlation::tabulated(vec![(400.0, 10.0), (600.0, 30.0)]),
            )
            .unwrap(),
        ])
        .unwrap();
        assert_eq!(data.cp(350.0).unwrap(), 10.0);
        assert!((data.cp(500.0).unwrap() - 20.0).abs() < 1e-12);
    }
}
