//! Independent systems solved side by side.

use rayon::prelude::*;
use sf_graph::System;

use crate::config::SolverConfig;
use crate::converge::{SolveReport, solve_mass_energy_flow};
use crate::error::SolverResult;
use crate::physics::PhysicsResult;

/// Solve every system with the same physics on the rayon thread pool.
///
/// Systems share no state, so results are identical to solving them one by
/// one. The returned vector is in the order of `systems`.
pub fn solve_all<F>(
    systems: &mut [System],
    physics: &F,
    config: &SolverConfig,
) -> Vec<SolverResult<SolveReport>>
where
    F: Fn(&mut System) -> PhysicsResult<()> + Sync,
{
    systems
        .par_iter_mut()
        .map(|system| {
            let mut pass = |s: &mut System| physics(s);
            solve_mass_energy_flow(system, &mut pass, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use sf_graph::SystemBuilder;

    const RATIO: &str = "plasma h2 excess ratio";

    fn system(name: &str, ratio: f64) -> System {
        let mut builder = SystemBuilder::new(name);
        builder.add_device("plasma smelter").unwrap();
        builder.set_parameter(RATIO, ratio);
        builder.build().unwrap()
    }

    #[test]
    fn results_follow_input_order() {
        let mut systems: Vec<_> = [1.0, 1.5, 2.0, 0.5]
            .iter()
            .enumerate()
            .map(|(i, r)| system(&format!("plant {i}"), *r))
            .collect();
        let physics = |s: &mut System| -> PhysicsResult<()> {
            if s.params().require(RATIO)? < 1.4 {
                return Err(Signal::IncreaseExcessHydrogenPlasma.into());
            }
            Ok(())
        };

        let results = solve_all(&mut systems, &physics, &SolverConfig::default());
        let retries: Vec<_> = results.iter().map(|r| r.as_ref().unwrap().retries()).collect();
        // 1.0 -> 1.05^7 = 1.407; 0.5 -> 0.5 * 1.05^22 = 1.463
        assert_eq!(retries, [7, 0, 0, 22]);
        assert!(systems.iter().all(|s| s.params().get(RATIO).unwrap() >= 1.4));
    }
}
