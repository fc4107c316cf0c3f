use clap::{Parser, Subcommand, ValueEnum};
use ro_physics::{MembraneClass, membranes, search};
use ro_sim::{RunResults, SystemConfig, simulate};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sim(#[from] ro_sim::SimError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ro-cli")]
#[command(about = "RO membrane train performance calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a train configuration file
    Validate {
        /// Path to the configuration YAML file
        config_path: PathBuf,
    },
    /// Simulate a train and print its performance
    Simulate {
        /// Path to the configuration YAML file
        config_path: PathBuf,
        /// Emit the full results as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// List the membrane element catalog
    Membranes {
        /// Restrict to one membrane class
        #[arg(long)]
        class: Option<MembraneClassArg>,
        /// Case-insensitive substring filter on the model name
        query: Option<String>,
    },
    /// Print the default configuration as YAML
    Defaults,
}

#[derive(Clone, Copy, ValueEnum)]
enum MembraneClassArg {
    Ulp,
    Bw,
    Sw,
}

impl From<MembraneClassArg> for MembraneClass {
    fn from(arg: MembraneClassArg) -> Self {
        match arg {
            MembraneClassArg::Ulp => MembraneClass::Ulp,
            MembraneClassArg::Bw => MembraneClass::Bw,
            MembraneClassArg::Sw => MembraneClass::Sw,
        }
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Simulate { config_path, json } => cmd_simulate(&config_path, json),
        Commands::Membranes { class, query } => {
            cmd_membranes(class.map(Into::into), query.as_deref().unwrap_or(""))
        }
        Commands::Defaults => cmd_defaults(),
    }
}

fn load_config(config_path: &Path) -> CliResult<SystemConfig> {
    let text = std::fs::read_to_string(config_path)?;
    Ok(serde_yaml::from_str(&text)?)
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = load_config(config_path)?;
    config.validate()?;
    println!(
        "✓ Configuration is valid ({} stages, {} vessels, {} elements)",
        config.stage_count(),
        config.vessel_count(),
        config.total_elements()
    );
    Ok(())
}

fn cmd_simulate(config_path: &Path, json: bool) -> CliResult<()> {
    let config = load_config(config_path)?;
    let results = simulate(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }
    Ok(())
}

fn cmd_membranes(class: Option<MembraneClass>, query: &str) -> CliResult<()> {
    let entries = if class.is_none() && query.is_empty() {
        membranes().iter().collect()
    } else {
        search(class, query)
    };

    if entries.is_empty() {
        println!("No membranes match the query");
        return Ok(());
    }

    println!(
        "{:<24} {:>6} {:>12} {:>13} {:>14}",
        "Model", "Class", "Flow (m³/d)", "Rejection (%)", "Pressure (psi)"
    );
    for entry in entries {
        println!(
            "{:<24} {:>6} {:>12.1} {:>13.2} {:>14.0}",
            entry.model,
            entry.class.to_string(),
            entry.nominal_flow_m3_d,
            entry.rejection_pct,
            entry.test_pressure_psi
        );
    }
    Ok(())
}

fn cmd_defaults() -> CliResult<()> {
    print!("{}", serde_yaml::to_string(&SystemConfig::default())?);
    Ok(())
}

fn print_results(results: &RunResults) {
    let sys = &results.system;

    println!("System results:");
    print_metric("Recovery", sys.recovery_pct, "%", sys.recovery_capped);
    print_metric("Limiting recovery", sys.limiting_recovery_pct, "%", false);
    print_metric("Average flux", sys.average_flux_gfd, "GFD", false);
    print_metric(
        "Total permeate flow",
        sys.total_permeate_flow_m3_h,
        "m³/h",
        false,
    );
    print_metric("Permeate TDS", sys.permeate_tds_mg_l, "mg/L", false);
    print_metric(
        "Average element recovery",
        sys.average_element_recovery_pct,
        "%",
        false,
    );
    print_metric(
        "Concentration polarization",
        sys.concentrate_polarization,
        "",
        false,
    );
    print_metric(
        "Concentrate osmotic pressure",
        sys.concentrate_osmotic_pressure_psi,
        "psi",
        false,
    );
    print_metric(
        "Feed osmotic pressure",
        sys.feed_osmotic_pressure_psi,
        "psi",
        false,
    );
    let drops: Vec<String> = sys
        .stage_pressure_drops_psi
        .iter()
        .map(|d| format!("{d:.0}"))
        .collect();
    println!("  {:<30} {} psi", "Stage pressure drops", drops.join(", "));

    println!();
    println!("Element details:");
    println!(
        "{:>5} {:>6} {:>7} {:>16} {:>14} {:>12} {:>9} {:>14}",
        "Stage", "Vessel", "Element", "Feed flow (m³/h)", "Feed TDS (mg/L)", "Recovery (%)", "CP", "Osmotic (psi)"
    );
    for el in &results.elements {
        let capped = if el.recovery_capped { " *" } else { "" };
        println!(
            "{:>5} {:>6} {:>7} {:>16.1} {:>14.0} {:>12.1} {:>9.2} {:>14.1}{}",
            el.stage,
            el.vessel,
            el.element,
            el.feed_flow_m3_h,
            el.feed_tds_mg_l,
            el.recovery_pct,
            el.polarization,
            el.osmotic_pressure_psi,
            capped
        );
    }
    if results.elements.iter().any(|e| e.recovery_capped) {
        println!("  * recovery bounded by the 30 % per-element policy cap");
    }
}

fn print_metric(label: &str, value: f64, unit: &str, capped: bool) {
    let cap_note = if capped { " (capped)" } else { "" };
    if unit.is_empty() {
        println!("  {label:<30} {value:.2}{cap_note}");
    } else {
        println!("  {label:<30} {value:.1} {unit}{cap_note}");
    }
}
