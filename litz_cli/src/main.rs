//! # litz - Litz Wire Design Calculator
//!
//! Command-line front end for `litz_core`. Every subcommand prints a short
//! report, or the result JSON with `--json`.
//!
//! ```text
//! litz design 100 40 --temperature 60 --frequency 1200
//! litz construction 67 40 --json
//! litz design 100 40 --film heavy --serve single
//! litz n1-max 44 --frequency 100000 --material silver
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use litz_core::calculations::{BundleDiameters, ConstructionResult, ElectricalProperties, N1MaxResult, NylonServe};
use litz_core::materials::{ConductorMaterial, FilmType, MagnetWireGrade};
use litz_core::units::{Celsius, CircularMils, Fahrenheit, SquareMillimeters};
use litz_core::{CalcError, CalcResult, EngineSettings, LitzDesignInput, LitzDesignResult, LitzEngine};

/// Litz wire design calculator.
///
/// Resolves bundle constructions and computes bundle area, equivalent gauge,
/// DC resistance, skin depth, N1 max and bundle diameter.
#[derive(Parser, Debug)]
#[command(name = "litz")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Operating conditions shared by several subcommands.
#[derive(clap::Args, Debug, Clone, Copy)]
struct Conditions {
    /// Operating temperature (°C unless --fahrenheit); defaults from config
    #[arg(short, long, allow_negative_numbers = true)]
    temperature: Option<f64>,

    /// Interpret --temperature as °F
    #[arg(long)]
    fahrenheit: bool,

    /// Operating frequency (Hz); defaults from config
    #[arg(short, long)]
    frequency: Option<f64>,
}

impl Conditions {
    fn temperature_c(&self) -> Option<f64> {
        self.temperature.map(|t| {
            if self.fahrenheit {
                Celsius::from(Fahrenheit(t)).0
            } else {
                t
            }
        })
    }

    fn resolve(&self, settings: &EngineSettings) -> (f64, f64) {
        (
            self.temperature_c().unwrap_or(settings.defaults.temperature_c),
            self.frequency.unwrap_or(settings.defaults.frequency_hz),
        )
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one row of the AWG table
    Gauge {
        /// AWG size
        awg: u32,
    },
    /// List the AWG table
    Table,
    /// Resolve the bunching/stranding construction for a strand count
    Construction {
        /// Number of strands
        strands: u32,
        /// Strand AWG size
        awg: u32,
    },
    /// Bundle area, equivalent gauge and DC resistance
    Electrical {
        strands: u32,
        awg: u32,
        #[command(flatten)]
        conditions: Conditions,
    },
    /// Skin depth and recommended maximum strands per bunch
    #[command(name = "n1-max")]
    N1Max {
        awg: u32,
        #[command(flatten)]
        conditions: Conditions,
        /// Strand metal (copper, aluminum, silver, gold)
        #[arg(short, long, value_parser = parse_material)]
        material: Option<ConductorMaterial>,
    },
    /// Every calculation for one design, with advisories
    Design {
        strands: u32,
        awg: u32,
        #[command(flatten)]
        conditions: Conditions,
        /// Strand film build (single, heavy, triple, quadruple)
        #[arg(long, value_parser = parse_film, default_value = "single")]
        film: FilmType,
        /// Magnet wire grade, e.g. "MW 79-C" or 79
        #[arg(long, value_parser = parse_grade, default_value = "MW 79-C")]
        grade: MagnetWireGrade,
        /// Nylon serve (none, single, double)
        #[arg(long, value_parser = parse_serve, default_value = "none")]
        serve: NylonServe,
    },
}

fn parse_material(s: &str) -> Result<ConductorMaterial, String> {
    ConductorMaterial::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_film(s: &str) -> Result<FilmType, String> {
    FilmType::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_grade(s: &str) -> Result<MagnetWireGrade, String> {
    MagnetWireGrade::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_serve(s: &str) -> Result<NylonServe, String> {
    NylonServe::from_str_flexible(s).map_err(|e| e.to_string())
}

/// `construction --json` output: the construction plus nearby alternatives.
#[derive(Debug, Serialize)]
struct ConstructionReport<'a> {
    #[serde(flatten)]
    construction: &'a ConstructionResult,
    nearby_counts: &'a [u32],
}

/// Configuration file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CliConfig {
    #[serde(default)]
    engine: EngineSettings,

    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingConfig {
    /// trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

fn load_config(path: Option<&Path>) -> CalcResult<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let config: CliConfig = toml::from_str(&text)?;
    config.engine.validate()?;
    Ok(config)
}

/// Determines the log level from CLI arguments.
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(get_log_level(args.verbose, args.quiet, &config.logging.level));
    info!(version = env!("CARGO_PKG_VERSION"), "Starting litz");

    let result = LitzEngine::with_settings(config.engine).and_then(|engine| run(&args, &engine));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON ({}):", e.error_code());
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, engine: &LitzEngine<'_>) -> CalcResult<()> {
    let settings = engine.settings();
    match &args.command {
        Command::Gauge { awg } => {
            let entry = engine.lookup_gauge(*awg)?;
            if args.json {
                return print_json(entry);
            }
            let area = SquareMillimeters::from(CircularMils(entry.circular_mil_area));
            println!("AWG {}", entry.gauge);
            println!("  Bare diameter: {:.5} in", entry.bare_diameter_in);
            println!("  Area:          {:.2} CMA ({:.5} mm²)", entry.circular_mil_area, area.0);
            println!("  Resistance:    {:.3} Ω/1000 ft @ 20 °C", entry.dc_resistance_per_kft);
            println!("  Max ends/pass: {}", entry.max_ends);
            for film in FilmType::ALL {
                if let Some(od) = entry.film.get(film) {
                    println!("  {:<9}      {:.5} / {:.5} / {:.5} in", film.display_name(), od.min, od.nom, od.max);
                }
            }
        }
        Command::Table => {
            let tables = engine.tables();
            if args.json {
                return print_json(&tables.iter().collect::<Vec<_>>());
            }
            println!("{:>4}  {:>9}  {:>10}  {:>12}  {:>4}", "AWG", "Dia (in)", "CMA", "Ω/1000 ft", "Ends");
            for entry in tables.iter() {
                println!(
                    "{:>4}  {:>9.5}  {:>10.2}  {:>12.3}  {:>4}",
                    entry.gauge,
                    entry.bare_diameter_in,
                    entry.circular_mil_area,
                    entry.dc_resistance_per_kft,
                    entry.max_ends
                );
            }
        }
        Command::Construction { strands, awg } => {
            let result = engine.resolve_construction(*strands, *awg)?;
            let nearby = engine.nearby_counts(*strands, *awg)?;
            if args.json {
                return print_json(&ConstructionReport {
                    construction: &result,
                    nearby_counts: &nearby,
                });
            }
            print_banner("LITZ CONSTRUCTION");
            print_construction(*strands, &result);
            print_nearby(&nearby);
        }
        Command::Electrical {
            strands,
            awg,
            conditions,
        } => {
            let (temperature_c, frequency_hz) = conditions.resolve(settings);
            let props = engine.compute_electrical_properties(*strands, *awg, temperature_c, frequency_hz)?;
            if args.json {
                return print_json(&props);
            }
            print_banner("ELECTRICAL PROPERTIES");
            println!("Input: {} x AWG {} @ {:.1} °C, {} Hz", strands, awg, temperature_c, frequency_hz);
            println!();
            print_electrical(&props);
        }
        Command::N1Max {
            awg,
            conditions,
            material,
        } => {
            let (temperature_c, frequency_hz) = conditions.resolve(settings);
            let result = match material {
                Some(material) => engine.compute_n1_max_for_material(*material, *awg, frequency_hz, temperature_c)?,
                None => engine.compute_n1_max(*awg, frequency_hz, temperature_c)?,
            };
            if args.json {
                return print_json(&result);
            }
            print_banner("SKIN EFFECT");
            println!(
                "Input: AWG {} {} @ {:.1} °C, {} Hz",
                awg,
                material.unwrap_or_default(),
                temperature_c,
                frequency_hz
            );
            println!();
            print_n1_max(&result);
        }
        Command::Design {
            strands,
            awg,
            conditions,
            film,
            grade,
            serve,
        } => {
            let mut input = LitzDesignInput::new(*strands, *awg)
                .with_film(*film)
                .with_grade(*grade)
                .with_serve(*serve);
            input.temperature_c = conditions.temperature_c();
            input.frequency_hz = conditions.frequency;
            let result = engine.design(&input)?;
            if args.json {
                return print_json(&result);
            }
            print_design(&result);
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
    println!();
}

fn print_construction(requested: u32, result: &ConstructionResult) {
    println!("Construction:");
    println!("  {} ({} operations): {}", result.construction_type, result.operations, result.designation());
    println!("  Strands:   {} requested, {} built {}", requested, result.final_strand_count, status_icon(result.is_valid));
    println!("  Take-up:   {:.3}", result.take_up_factor);
    println!("  Packing:   {:.3}", result.packing_factor);
}

fn print_nearby(counts: &[u32]) {
    if counts.is_empty() {
        return;
    }
    let list: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
    println!("  Nearby:    {}", list.join(", "));
}

fn print_diameters(label: &str, diameters: &BundleDiameters) {
    println!(
        "  {:<7} {:.3} / {:.3} / {:.3} in  {}",
        label, diameters.min_in, diameters.nom_in, diameters.max_in, diameters.part_number
    );
}

fn print_electrical(props: &ElectricalProperties) {
    println!("Electrical:");
    println!("  Total area:     {:.2} CMA ({:.4} mm²)", props.total_cma, props.total_area_mm2);
    println!("  Equivalent:     AWG {}", props.equivalent_awg);
    println!("  DC resistance:  {:.4} Ω/1000 ft", props.dc_resistance);
    println!("  Resistivity:    {:.4e} Ω·m", props.corrected_resistivity);
    println!("  Skin depth:     {:.4} mils", props.skin_depth_mils);
    println!("  N1 max:         {}", props.n1_max);
}

fn print_n1_max(result: &N1MaxResult) {
    println!("Skin effect:");
    println!("  Resistivity:     {:.4e} Ω·m", result.corrected_resistivity);
    println!("  Skin depth:      {:.4} mils ({:.4e} m)", result.skin_depth_mils, result.skin_depth_m);
    println!("  Strand diameter: {:.5} mils ({} in)", result.strand_diameter_mils, result.strand_diameter_in);
    println!("  N1 max:          {}", result.n1_max);
}

fn print_design(result: &LitzDesignResult) {
    print_banner("LITZ DESIGN");
    println!(
        "Input: {} x AWG {} @ {:.1} °C, {} Hz",
        result.strand_count, result.gauge, result.temperature_c, result.frequency_hz
    );
    println!();
    print_construction(result.strand_count, &result.construction);
    if !result.construction.is_valid {
        print_nearby(&result.nearby_counts);
    }
    println!();
    print_electrical(&result.electrical);
    println!(
        "  Strands/N1:     {} / {} {}",
        result.strand_count,
        result.n1_max.n1_max,
        status_icon(!result.exceeds_n1_max())
    );
    println!();
    println!("Diameter (min / nom / max):");
    match &result.bare_diameter {
        Some(bare) => print_diameters("Bare:", bare),
        None => println!("  Bare:   n/a"),
    }
    if let Some(served) = &result.served_diameter {
        print_diameters("Served:", served);
    }
    println!();
    println!("═══════════════════════════════════════");
    if result.requires_review() {
        println!("  REVIEW REQUIRED");
        for advisory in &result.advisories {
            println!("  - {}", advisory);
        }
    } else {
        println!("  RESULT: OK");
    }
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[CHECK]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_design_args() {
        let args = Args::try_parse_from(["litz", "design", "100", "40", "-t", "60", "-f", "1200", "--json"]).unwrap();
        assert!(args.json);
        match args.command {
            Command::Design {
                strands,
                awg,
                conditions,
                film,
                grade,
                serve,
            } => {
                assert_eq!((strands, awg), (100, 40));
                assert_eq!(conditions.temperature_c(), Some(60.0));
                assert_eq!(conditions.frequency, Some(1200.0));
                assert_eq!(film, FilmType::Single);
                assert_eq!(grade, MagnetWireGrade::Mw79C);
                assert_eq!(serve, NylonServe::None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_insulation_args() {
        let args = Args::try_parse_from([
            "litz", "design", "100", "40", "--film", "heavy", "--grade", "80", "--serve", "dn",
        ])
        .unwrap();
        match args.command {
            Command::Design { film, grade, serve, .. } => {
                assert_eq!(film, FilmType::Heavy);
                assert_eq!(grade, MagnetWireGrade::Mw80C);
                assert_eq!(serve, NylonServe::Double);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(["litz", "design", "100", "40", "--film", "double"]).is_err());
    }

    #[test]
    fn test_construction_report_json() {
        let engine = LitzEngine::standard().unwrap();
        let construction = engine.resolve_construction(67, 40).unwrap();
        let nearby = engine.nearby_counts(67, 40).unwrap();
        let report = ConstructionReport {
            construction: &construction,
            nearby_counts: &nearby,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["type"], "Type 1");
        assert_eq!(json["final_strand_count"], 66);
        assert_eq!(json["nearby_counts"][0], 66);
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let args = Args::try_parse_from(["litz", "electrical", "100", "40", "-t", "212", "--fahrenheit"]).unwrap();
        match args.command {
            Command::Electrical { conditions, .. } => {
                assert!((conditions.temperature_c().unwrap() - 100.0).abs() < 1e-9);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_material_parse() {
        let args = Args::try_parse_from(["litz", "n1-max", "44", "--material", "Al"]).unwrap();
        match args.command {
            Command::N1Max { material, .. } => assert_eq!(material, Some(ConductorMaterial::Aluminum)),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(Args::try_parse_from(["litz", "n1-max", "44", "--material", "brass"]).is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "nonsense"), Level::WARN);
        assert_eq!(get_log_level(2, false, "warn"), Level::DEBUG);
    }

    #[test]
    fn test_config_parse() {
        let config: CliConfig = toml::from_str(
            r#"
            [engine.construction]
            max_operations = 4

            [logging]
            level = "info"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.construction.max_operations, 4);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/litz.toml"))).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
