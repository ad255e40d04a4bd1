use bac_core::config::OutputFormat;
use bac_core::*;
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bac")]
#[command(about = "Blood alcohol concentration estimator (Widmark)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Body weight in kg (overrides the profile)
    #[arg(long, global = true)]
    weight: Option<f64>,

    /// Sex: male or female (overrides the profile)
    #[arg(long, global = true, value_parser = parse_sex)]
    sex: Option<Sex>,

    /// Stomach state: full or empty (overrides the profile)
    #[arg(long, global = true, value_parser = parse_stomach)]
    stomach: Option<StomachState>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate BAC after a single drink
    Single {
        /// Volume consumed in ml
        #[arg(long)]
        volume: f64,

        /// Alcohol content as a fraction (0.12) or percentage (12%)
        #[arg(long, value_parser = parse_abv)]
        abv: f64,

        /// Start of consumption (HH:MM)
        #[arg(long, value_parser = parse_time_of_day)]
        start: NaiveTime,

        /// End of consumption (HH:MM)
        #[arg(long, value_parser = parse_time_of_day)]
        end: NaiveTime,
    },

    /// Estimate cumulative BAC for a CSV list of drinks
    Session {
        /// CSV file with volume_ml,abv,start,end[,stomach]
        #[arg(long)]
        drinks: PathBuf,

        /// Accumulation model (reference, decay)
        #[arg(long, default_value = "reference", value_parser = parse_model)]
        model: AccumulationModel,
    },

    /// Apply elimination to a known BAC
    Decay {
        /// Current BAC in g/L
        #[arg(long, allow_negative_numbers = true)]
        bac: f64,

        /// Hours elapsed
        #[arg(long, allow_negative_numbers = true)]
        hours: f64,
    },

    /// Time elapsed between two times of day
    Elapsed {
        #[arg(long, value_parser = parse_time_of_day)]
        start: NaiveTime,

        #[arg(long, value_parser = parse_time_of_day)]
        end: NaiveTime,
    },

    /// Interpret a BAC against the legal limits
    Interpret {
        /// BAC in g/L
        #[arg(long, allow_negative_numbers = true)]
        bac: f64,
    },
}

fn parse_sex(s: &str) -> Result<Sex> {
    s.parse()
}

fn parse_stomach(s: &str) -> Result<StomachState> {
    s.parse()
}

fn parse_model(s: &str) -> Result<AccumulationModel> {
    s.parse()
}

fn main() -> Result<()> {
    // Initialize logging
    bac_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let json = cli.json || config.output.format == OutputFormat::Json;
    let stomach = cli.stomach.unwrap_or(config.profile.stomach);
    tracing::debug!("Stomach state {}, JSON output {}", stomach, json);

    match cli.command {
        Commands::Single {
            volume,
            abv,
            start,
            end,
        } => {
            let subject = config.subject(cli.weight, cli.sex)?;
            let drink = DrinkEvent::new(volume, abv, stomach, start, end)?;
            cmd_single(&subject, &drink, json)
        }
        Commands::Session { drinks, model } => {
            let subject = config.subject(cli.weight, cli.sex)?;
            cmd_session(&subject, &drinks, stomach, cli.stomach, model, json)
        }
        Commands::Decay { bac, hours } => cmd_decay(bac, hours, json),
        Commands::Elapsed { start, end } => cmd_elapsed(start, end, json),
        Commands::Interpret { bac } => {
            print_report(&BacReport::from_bac(BacResult::try_new(bac)?), json)
        }
    }
}

fn cmd_single(subject: &Subject, drink: &DrinkEvent, json: bool) -> Result<()> {
    let bac = estimate_single_drink_bac(subject, drink)?;
    print_report(&BacReport::from_bac(bac), json)
}

fn cmd_session(
    subject: &Subject,
    drinks_path: &Path,
    default_stomach: StomachState,
    stomach_override: Option<StomachState>,
    model: AccumulationModel,
    json: bool,
) -> Result<()> {
    // Rows without a stomach column take the profile state; --stomach wins over both
    let drinks = load_drinks_csv(drinks_path, default_stomach)?;
    if drinks.is_empty() {
        eprintln!("No drinks found in {}", drinks_path.display());
    }

    let result = cumulative_bac_with(subject, &drinks, stomach_override, model)?;
    let report = BacReport::from_bac(result.final_bac);

    if json {
        let doc = serde_json::json!({
            "model": model,
            "drinks": drinks.len(),
            "metabolism_trace": result.metabolism_trace,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Drinks: {} ({:?} model)", drinks.len(), model);
    for (i, step) in result.metabolism_trace.iter().enumerate() {
        println!("Between drink {} and {}:", i + 1, i + 2);
        println!("  Elapsed: {} {}", step.elapsed, step.elapsed_unit);
        println!("  BAC after metabolism: {}", step.bac_after_metabolism);
    }
    println!();
    print_report(&report, false)
}

fn cmd_decay(bac: f64, hours: f64, json: bool) -> Result<()> {
    let result = estimate_metabolized_bac(BacResult::try_new(bac)?, hours);
    print_report(&BacReport::from_bac(result), json)
}

fn cmd_elapsed(start: NaiveTime, end: NaiveTime, json: bool) -> Result<()> {
    let elapsed = elapsed_time(start, end);
    if json {
        println!("{}", serde_json::to_string_pretty(&elapsed)?);
    } else {
        println!("Elapsed: {}", elapsed);
    }
    Ok(())
}

fn print_report(report: &BacReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("BAC: {}", report.bac);
    println!("Level: {}", report.interpretation.level_label);
    println!(
        "Legal to drive: {}",
        if report.interpretation.legal_to_drive {
            "yes"
        } else {
            "no"
        }
    );
    println!("Time to sober: {}", report.time_to_sober);
    Ok(())
}
