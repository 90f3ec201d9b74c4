//! Algebraic properties of enthalpy integration and flow merging.

use proptest::prelude::*;
use sf_core::{Tolerances, nearly_equal};
use sf_thermo::{Flow, Mixture, catalog};

fn close(a: f64, b: f64) -> bool {
    nearly_equal(a, b, Tolerances { abs: 1e-6, rel: 1e-9 })
}

proptest! {
    #[test]
    fn delta_h_over_zero_width_is_zero(t in 300.0_f64..5000.0, moles in 0.0_f64..50.0) {
        let n2 = catalog::entry("N2").unwrap().thermo_data().unwrap();
        prop_assert_eq!(n2.delta_h(moles, t, t).unwrap(), 0.0);
    }

    #[test]
    fn delta_h_is_antisymmetric(t1 in 274.0_f64..5999.0, t2 in 274.0_f64..5999.0, moles in 0.01_f64..50.0) {
        let water = catalog::entry("H2O").unwrap().thermo_data().unwrap();
        let up = water.delta_h(moles, t1, t2).unwrap();
        let down = water.delta_h(moles, t2, t1).unwrap();
        prop_assert!(close(up, -down), "up {} down {}", up, down);
    }

    #[test]
    fn delta_h_is_additive(
        a in 274.0_f64..5999.0,
        b in 274.0_f64..5999.0,
        c in 274.0_f64..5999.0,
        moles in 0.01_f64..50.0,
    ) {
        let mut t = [a, b, c];
        t.sort_by(f64::total_cmp);
        let water = catalog::entry("H2O").unwrap().thermo_data().unwrap();
        let whole = water.delta_h(moles, t[0], t[2]).unwrap();
        let parts = water.delta_h(moles, t[0], t[1]).unwrap() + water.delta_h(moles, t[1], t[2]).unwrap();
        prop_assert!(close(whole, parts), "whole {} parts {}", whole, parts);
    }

    #[test]
    fn merge_is_commutative(
        t_a in 300.0_f64..2500.0,
        t_b in 300.0_f64..2500.0,
        n_a in 0.1_f64..10.0,
        n_b in 0.1_f64..10.0,
    ) {
        let n2 = catalog::species("N2").unwrap().with_moles(n_a).unwrap().at(t_a).unwrap();
        let o2 = catalog::species("O2").unwrap().with_moles(n_b).unwrap().at(t_b).unwrap();

        let mut a_then_b = Mixture::new("ab", vec![n2.clone()]).unwrap();
        a_then_b.merge(&Flow::from(o2.clone())).unwrap();
        let mut b_then_a = Mixture::new("ba", vec![o2]).unwrap();
        b_then_a.merge(&Flow::from(n2)).unwrap();

        prop_assert!(close(a_then_b.mass(), b_then_a.mass()));
        let t_ab = a_then_b.temperature().unwrap();
        let t_ba = b_then_a.temperature().unwrap();
        prop_assert!((t_ab - t_ba).abs() < 1e-6, "{} vs {}", t_ab, t_ba);
        prop_assert!(t_ab >= t_a.min(t_b) - 1e-6 && t_ab <= t_a.max(t_b) + 1e-6);
    }
}
