use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use duty_roster::config::SchedulerConfig;
use duty_roster::generate::{generate, prune_preferences};
use duty_roster::input::RosterInput;
use duty_roster::scheduler::{Assignment, Scheduler};

#[derive(Parser, Debug)]
#[command(name = "duty-roster")]
#[command(version)]
#[command(about = "Assign soldiers to duties by weighted preference")]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Schedule a roster document and print the result
    Run(RunArgs),

    /// Check a roster document without scheduling it
    Validate {
        /// Path to the roster document (JSON)
        input: PathBuf,
    },

    /// Write a random roster document
    Generate(GenerateArgs),
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Parser, Debug)]
struct RunArgs {
    /// Path to the roster document (JSON)
    input: PathBuf,

    /// Election randomness, 1 (strong preference bias) to 4 (mild)
    #[arg(long, short = 'r', default_value = "4")]
    randomness: u8,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    output: OutputFormat,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Number of soldiers, equal to the total number of seats
    #[arg(long, default_value = "50")]
    soldiers: usize,

    /// Seed for a reproducible document
    #[arg(long)]
    seed: Option<u64>,

    /// Restrict some soldiers to a single duty
    #[arg(long)]
    prune: bool,

    /// Write to this file instead of stdout
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// =============================================================================
// JSON Output Types
// =============================================================================

#[derive(Serialize)]
struct ValidateOutput {
    duties: usize,
    soldiers: usize,
    seats: u64,
}

// =============================================================================
// Handlers
// =============================================================================

fn handle_run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SchedulerConfig::new(args.randomness);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let input = RosterInput::from_path(&args.input)?;
    let seats = input.total_capacity();
    if seats != input.soldiers.len() as u64 {
        tracing::warn!(
            seats,
            soldiers = input.soldiers.len(),
            "Seat count differs from soldier count"
        );
    }

    let mut scheduler = Scheduler::from_input(input, &config)?;
    let assignment = scheduler.run_with(&config)?;
    print_assignment(&assignment, &args.output)?;
    Ok(())
}

fn print_assignment(
    assignment: &Assignment,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(assignment)?);
        }
        OutputFormat::Table => {
            let width = assignment
                .duties
                .iter()
                .map(|d| d.name.len())
                .max()
                .unwrap_or(0)
                .max("DUTY".len());
            println!("{:<width$}  {:>5}  SOLDIERS", "DUTY", "SEATS", width = width);
            println!("{}", "-".repeat(width + 18));
            for duty in &assignment.duties {
                println!(
                    "{:<width$}  {:>5}  {}",
                    duty.name,
                    duty.capacity,
                    duty.soldiers.join(", "),
                    width = width
                );
            }
        }
    }
    Ok(())
}

fn handle_validate(input: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let input = RosterInput::from_path(&input)?;
    input.validate()?;
    let output = ValidateOutput {
        duties: input.duties.len(),
        soldiers: input.soldiers.len(),
        seats: input.total_capacity(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn handle_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut input = generate(args.soldiers, &mut rng);
    if args.prune {
        prune_preferences(&mut input, &mut rng);
    }

    match args.file {
        Some(path) => {
            input.to_path(&path)?;
            tracing::info!(
                path = %path.display(),
                duties = input.duties.len(),
                soldiers = input.soldiers.len(),
                "Roster document written"
            );
        }
        None => println!("{}", input.to_json()?),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Run(run_args) => handle_run(run_args)?,
        Commands::Validate { input } => handle_validate(input)?,
        Commands::Generate(generate_args) => handle_generate(generate_args)?,
    }

    Ok(())
}
