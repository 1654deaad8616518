// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mountain_huts::{logging, Municipality, Region, RegionConfig, RegionReport};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mountain-huts")]
#[command(about = "Aggregate statistics over a region's municipalities and mountain huts")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// JSON config file (name, data_file, altitude_ranges)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Region name (overrides config)
    #[arg(long, global = true)]
    name: Option<String>,

    /// Semicolon-delimited data file (overrides config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Altitude range like "0-1000" or "2001-INF"; repeat to list several (overrides config)
    #[arg(long = "range", global = true)]
    ranges: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all aggregate queries
    Report {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List municipalities
    Municipalities,
    /// List mountain huts
    Huts,
    /// Show which altitude range an altitude falls into (omit for "no altitude")
    Classify {
        #[arg(allow_negative_numbers = true)]
        altitude: Option<i32>,
    },
    /// Browse the report in a terminal UI
    Ui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = resolve_config(&cli.source)?;

    match cli.command {
        Commands::Classify { altitude } => run_classify(&config, altitude),
        Commands::Report { json } => run_report(&load_region(&config)?, json),
        Commands::Municipalities => run_municipalities(&load_region(&config)?),
        Commands::Huts => run_huts(&load_region(&config)?),
        Commands::Ui => run_ui_mode(&load_region(&config)?),
    }
}

fn resolve_config(args: &SourceArgs) -> Result<RegionConfig> {
    let mut config = match &args.config {
        Some(path) => RegionConfig::from_file(path)?,
        None => RegionConfig::default(),
    };

    if let Some(name) = &args.name {
        config.name = name.clone();
    }
    if let Some(data) = &args.data {
        config.data_file = data.clone();
    }
    if !args.ranges.is_empty() {
        config.altitude_ranges = args.ranges.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn load_region(config: &RegionConfig) -> Result<Region> {
    let (mut region, load) = Region::from_file(config.name.clone(), &config.data_file)?;
    region.configure_altitude_ranges(config.parsed_ranges()?);

    if !load.is_clean() {
        eprintln!("⚠️  {}", load.summary());
    }

    Ok(region)
}

fn run_classify(config: &RegionConfig, altitude: Option<i32>) -> Result<()> {
    let mut region = Region::new(config.name.clone());
    region.configure_altitude_ranges(config.parsed_ranges()?);

    println!("{}", region.altitude_range(altitude));
    Ok(())
}

fn run_report(region: &Region, json: bool) -> Result<()> {
    let report = RegionReport::build(region);

    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("🏔️  {}", report.summary());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Altitude ranges: {}", report.altitude_ranges.join(", "));

    println!("\n📍 Municipalities per province");
    for (province, count) in &report.municipalities_by_province {
        println!("   {:<12} {:>6}", province, count);
    }

    println!("\n🛖 Huts per municipality");
    for (province, per_municipality) in &report.huts_by_municipality_by_province {
        println!("   {}", province);
        for (municipality, count) in per_municipality {
            println!("      {:<30} {:>4}", municipality, count);
        }
    }

    println!("\n⛰️  Huts per altitude range");
    for (range, count) in &report.huts_by_altitude_range {
        println!("   {:<12} {:>6}", range, count);
    }

    println!("\n🛏️  Beds per province");
    for (province, beds) in &report.beds_by_province {
        println!("   {:<12} {:>6}", province, beds);
    }

    println!("\n📈 Max beds per altitude range");
    for (range, max) in &report.max_beds_by_altitude_range {
        let max = max.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
        println!("   {:<12} {:>6}", range, max);
    }

    println!("\n🔢 Municipalities by number of huts");
    for (count, names) in &report.municipalities_by_hut_count {
        println!("   {:>3}: {}", count, names.join(", "));
    }

    Ok(())
}

fn run_municipalities(region: &Region) -> Result<()> {
    println!("{:<30} {:<10} {:>8}", "Municipality", "Province", "Altitude");
    for m in region.municipalities() {
        println!("{:<30} {:<10} {:>8}", m.name(), m.province(), m.altitude());
    }
    println!("\n✓ {} municipalities", region.municipalities().len());
    Ok(())
}

fn run_huts(region: &Region) -> Result<()> {
    println!(
        "{:<35} {:<25} {:>8} {:>5}  {}",
        "Hut", "Municipality", "Altitude", "Beds", "Category"
    );
    for hut in region.mountain_huts() {
        let altitude = hut
            .altitude()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<35} {:<25} {:>8} {:>5}  {}",
            hut.name(),
            region.municipality_of(hut).map(Municipality::name).unwrap_or("-"),
            altitude,
            hut.beds_number(),
            hut.category()
        );
    }
    println!("\n✓ {} huts", region.mountain_huts().len());
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(region: &Region) -> Result<()> {
    let mut app = ui::App::new(RegionReport::build(region));
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_region: &Region) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse(&[
            "mountain-huts",
            "report",
            "--name",
            "Lombardia",
            "--range",
            "0-999",
            "--range",
            "1000-INF",
        ]);
        let config = resolve_config(&cli.source).unwrap();

        assert_eq!(config.name, "Lombardia");
        assert_eq!(config.altitude_ranges, vec!["0-999", "1000-INF"]);
        assert_eq!(config.data_file, PathBuf::from("data/mountain_huts.csv"));
    }

    #[test]
    fn test_cli_rejects_bad_range() {
        let cli = parse(&["mountain-huts", "huts", "--range", "abc"]);
        assert!(resolve_config(&cli.source).is_err());
    }

    #[test]
    fn test_classify_accepts_negative_and_absent() {
        let cli = parse(&["mountain-huts", "classify", "-20"]);
        assert!(matches!(cli.command, Commands::Classify { altitude: Some(-20) }));

        let cli = parse(&["mountain-huts", "classify"]);
        assert!(matches!(cli.command, Commands::Classify { altitude: None }));
    }
}
