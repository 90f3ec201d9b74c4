use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use sf_core::{SfError, celsius_to_kelvin, joules_to_kwh, kelvin_to_celsius};
use sf_graph::{DeviceBalance, GraphError, Parameters, System};
use sf_solver::{
    BalanceOptions, PhysicsResult, Signal, SolveReport, SolverConfig, SolverError, solve_all,
    solve_mass_energy_flow,
};
use sf_thermo::{ThermoError, catalog};

mod plants;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Thermo(#[from] ThermoError),

    #[error(transparent)]
    Core(#[from] SfError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "SteelFlow CLI - mass and energy flows of steelmaking plants", long_about = None)]
struct Cli {
    /// Solver configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// YAML map of parameter overrides applied before solving
    #[arg(short, long, global = true)]
    params: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalogued species, optionally filtered by id or name
    Catalog {
        query: Option<String>,
    },
    /// Print the effective solver configuration
    Config,
    /// Solve a demonstration plant
    #[command(subcommand)]
    Demo(DemoCommands),
}

#[derive(Subcommand)]
enum DemoCommands {
    /// Electric water heater
    Heater {
        /// Electrical efficiency (0, 1]
        #[arg(long, default_value_t = 0.8)]
        efficiency: f64,
        /// Water exit temperature in °C
        #[arg(long, default_value_t = 76.85)]
        target_celsius: f64,
        /// Water amount in mol
        #[arg(long, default_value_t = 1.0)]
        moles: f64,
    },
    /// Converter whose hot metal carbon is raised until it can be blown
    Converter {
        /// Starting carbon content in wt%; repeat to solve several plants in parallel
        #[arg(long = "start", default_values_t = vec![4.0])]
        starts: Vec<f64>,
        /// Lowest workable carbon content in wt%
        #[arg(long, default_value_t = 5.0)]
        threshold: f64,
    },
    /// Hydrogen plasma smelter with an off-gas temperature floor
    Plasma {
        /// Lowest acceptable off-gas temperature in K
        #[arg(long, default_value_t = 1000.0)]
        floor: f64,
        /// Heat losses in J
        #[arg(long, default_value_t = 20_000.0)]
        losses: f64,
    },
}

#[derive(Serialize)]
struct FlowSummary {
    name: String,
    kind: &'static str,
    /// kg
    mass: f64,
    /// K
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature_celsius: Option<f64>,
    /// kWh
    #[serde(skip_serializing_if = "Option::is_none")]
    energy_kwh: Option<f64>,
}

#[derive(Serialize)]
struct Summary {
    system: String,
    report: SolveReport,
    balances: Vec<DeviceBalance>,
    flows: Vec<FlowSummary>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    let overrides = match &cli.params {
        Some(path) => load_params(path)?,
        None => Parameters::new(),
    };

    match cli.command {
        Commands::Catalog { query } => cmd_catalog(query.as_deref()),
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
            Ok(())
        }
        Commands::Demo(demo) => match demo {
            DemoCommands::Heater {
                efficiency,
                target_celsius,
                moles,
            } => {
                let target = celsius_to_kelvin(target_celsius)?;
                let system = plants::water_heater(moles, efficiency)?;
                run(vec![system], &plants::heater_physics(target), &overrides, &config)
            }
            DemoCommands::Converter { starts, threshold } => {
                let systems = starts
                    .iter()
                    .map(|&perc| plants::converter(perc))
                    .collect::<Result<Vec<_>, _>>()?;
                run(systems, &plants::converter_physics(threshold), &overrides, &config)
            }
            DemoCommands::Plasma { floor, losses } => {
                let (system, off_gas) = plants::plasma_smelter(losses)?;
                let options = BalanceOptions {
                    initial_guess: Some(3000.0),
                    ..config.balance.clone()
                }
                .with_floor(floor, Signal::IncreaseExcessHydrogenPlasma);
                run(vec![system], &plants::plasma_physics(off_gas, options), &overrides, &config)
            }
        },
    }
}

fn load_params(path: &Path) -> CliResult<Parameters> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

fn cmd_catalog(query: Option<&str>) -> CliResult<()> {
    let entries = match query {
        Some(query) => catalog::filter_catalog(query),
        None => catalog::catalog().to_vec(),
    };
    if entries.is_empty() {
        println!("No species match");
        return Ok(());
    }
    for entry in entries {
        let species = entry.build()?;
        println!(
            "  {:<8} {:<20} M = {:.5} kg/mol, {:.0}-{:.0} K",
            entry.id,
            entry.display_name,
            entry.molar_mass,
            species.thermo().min_kelvin(),
            species.thermo().max_kelvin(),
        );
    }
    Ok(())
}

fn run<F>(
    mut systems: Vec<System>,
    physics: &F,
    overrides: &Parameters,
    config: &SolverConfig,
) -> CliResult<()>
where
    F: Fn(&mut System) -> PhysicsResult<()> + Sync,
{
    for system in &mut systems {
        system.params_mut().extend_from(overrides);
    }

    let results = if systems.len() == 1 {
        let mut pass = |s: &mut System| physics(s);
        vec![solve_mass_energy_flow(&mut systems[0], &mut pass, config)]
    } else {
        solve_all(&mut systems, physics, config)
    };

    let mut summaries = Vec::with_capacity(systems.len());
    for (system, result) in systems.iter().zip(results) {
        summaries.push(summarize(system, result?)?);
    }
    print!("{}", serde_yaml::to_string(&summaries)?);
    Ok(())
}

fn summarize(system: &System, report: SolveReport) -> CliResult<Summary> {
    let flows = system
        .flows()
        .iter()
        .map(|(_, flow)| {
            let temperature = flow.temperature().ok();
            FlowSummary {
                name: flow.name().to_string(),
                kind: flow.kind(),
                mass: flow.mass(),
                temperature,
                temperature_celsius: temperature.and_then(|t| kelvin_to_celsius(t).ok()),
                energy_kwh: flow.energy().ok().map(joules_to_kwh),
            }
        })
        .collect();
    Ok(Summary {
        system: system.name().to_string(),
        report,
        balances: system.balances()?,
        flows,
    })
}
