//! Popsim - Entry Point
//!
//! Loads a scenario, runs the yearly simulation and reports the resulting
//! demographic history as text or JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use popsim::core::config::ScenarioConfig;
use popsim::core::error::Result;
use popsim::simulation::{Population, SimulationOutput};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Population simulator - births, marriages, kinship-blocked mating and death
#[derive(Parser, Debug)]
#[command(name = "popsim")]
#[command(about = "Run a discrete-time demographic and genetic population simulation")]
struct Args {
    /// Scenario TOML file (defaults to the built-in scenario)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of years to simulate
    #[arg(long, allow_negative_numbers = true)]
    years: Option<i64>,

    /// Override the initial population size
    #[arg(long)]
    population: Option<usize>,

    /// Override the maximum starting age
    #[arg(long)]
    max_start_age: Option<u32>,

    /// Force polygamous conception
    #[arg(long)]
    polygamy: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// In text mode, print a history line every N years
    #[arg(long, default_value_t = 10)]
    report_every: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("popsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(population) = args.population {
        config.initial_population = population;
    }
    if let Some(age) = args.max_start_age {
        config.max_start_age = age;
    }
    if args.polygamy {
        config.environment.polygamy = true;
    }
    config.validate()?;

    let years = args.years.unwrap_or(config.years as i64);
    tracing::info!(
        seed = config.seed,
        population = config.initial_population,
        years,
        polygamy = config.environment.polygamy,
        "starting simulation"
    );

    let start = Instant::now();
    let mut population = Population::new(config.seed);
    population.set_environment(config.build_environment());
    population.initialize_random(config.initial_population, config.max_start_age);
    population.try_step(years)?;
    let elapsed = start.elapsed();

    let output = SimulationOutput::new(&population, config.seed, config.initial_population, elapsed);
    let rendered = match args.format {
        OutputFormat::Json => output.to_json()?,
        OutputFormat::Text => render_text(&output, args.report_every),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Summary followed by a sampled year-by-year table
fn render_text(output: &SimulationOutput, every: usize) -> String {
    let mut text = String::new();
    text.push_str(&output.summary());
    text.push_str("\n\n  year  population  births  deaths  mean age\n");

    let history = &output.history;
    let every = every.max(1);
    for year in 0..history.len() {
        let last = year + 1 == history.len();
        if (year + 1) % every != 0 && !last {
            continue;
        }
        if let Some(r) = history.year(year) {
            text.push_str(&format!(
                "{:>6}  {:>10}  {:>6}  {:>6}  {:>8.2}\n",
                year + 1,
                r.population,
                r.births,
                r.deaths,
                r.mean_age
            ));
        }
    }
    text
}
