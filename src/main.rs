use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use soop::catalog::load_passes;
use soop::config::{Config, OperationOverrides, PlanSetup};
use soop::parsing::format_duration;
use soop::report;

#[derive(Parser)]
#[command(name = "soop")]
#[command(about = "Satellite outdoor operation planning")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best operating window for the passes in a file
    Plan {
        /// Pass file (YAML or JSON)
        #[arg(long)]
        passes: PathBuf,
        #[command(flatten)]
        overrides: OperationOverrides,
        /// Optimize days in parallel
        #[arg(long)]
        parallel: bool,
        /// Print the forecast as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check the operating constraints
    Validate {
        #[command(flatten)]
        overrides: OperationOverrides,
    },
    /// Serve the planning API
    Serve,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Plan {
            passes,
            overrides,
            parallel,
            json,
        } => plan(&config, &passes, &overrides, parallel, json),
        Commands::Validate { overrides } => validate(&config, &overrides),
        Commands::Serve => serve(config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, soop::config::ConfigError> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn resolve(config: &Config, overrides: &OperationOverrides) -> Option<PlanSetup> {
    match config.resolve(overrides) {
        Ok(setup) => Some(setup),
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            None
        }
    }
}

fn plan(
    config: &Config,
    passes: &Path,
    overrides: &OperationOverrides,
    parallel: bool,
    json: bool,
) -> ExitCode {
    let Some(mut setup) = resolve(config, overrides) else {
        return ExitCode::FAILURE;
    };
    setup.parallel |= parallel;

    let events = match load_passes(passes) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error reading passes: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let forecast = match setup
        .planner()
        .forecast(setup.start_date, setup.timezone, &events)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Planning failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&forecast) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing forecast: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    print_station(config, &setup);
    for line in report::render(&forecast, setup.constraints.max_duration) {
        println!("{}", line);
    }
    ExitCode::SUCCESS
}

fn validate(config: &Config, overrides: &OperationOverrides) -> ExitCode {
    let Some(setup) = resolve(config, overrides) else {
        return ExitCode::FAILURE;
    };

    match setup.constraints.validate() {
        Ok(()) => {
            let c = &setup.constraints;
            println!("Constraints are valid");
            print_station(config, &setup);
            println!("  start date:     {}", setup.start_date);
            println!("  earliest start: {}", c.earliest_start.format("%H:%M"));
            println!("  latest finish:  {}", c.latest_finish.format("%H:%M"));
            println!("  max duration:   {}", format_duration(c.max_duration));
            println!("  forecast days:  {}", c.horizon_days);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid constraints: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(config: Config) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(soop::web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_station(config: &Config, setup: &PlanSetup) {
    let name = config.station.name.as_deref().unwrap_or("station");
    match &config.station.locator {
        Some(locator) => println!("{} ({}), UTC offset {}", name, locator, setup.timezone),
        None => println!("{}, UTC offset {}", name, setup.timezone),
    }
}
