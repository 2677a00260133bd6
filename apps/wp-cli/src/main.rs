use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, info_span};
use wp_app::{AppError, AppResult, PollutantKind, project_service};
use wp_core::Id;
use wp_timeseries::Window;

#[derive(Parser)]
#[command(name = "wp-cli")]
#[command(about = "Well-plan emissions calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a plan file
    Validate {
        /// Path to the plan file (YAML or JSON)
        plan_path: PathBuf,
    },
    /// Emissions of a single planned step
    Step {
        plan_path: PathBuf,
        /// Step ID
        step_id: u32,
        #[command(flatten)]
        options: PlanOptions,
    },
    /// Totals of the planned well
    Total {
        plan_path: PathBuf,
        #[command(flatten)]
        options: PlanOptions,
    },
    /// Per-day planned emissions
    Daily {
        plan_path: PathBuf,
        #[command(flatten)]
        options: PlanOptions,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Per-hour planned emissions inside a window
    Hourly {
        plan_path: PathBuf,
        #[command(flatten)]
        options: PlanOptions,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Baseline and target CO2 of the improved plan
    Summary { plan_path: PathBuf },
    /// CO2 saved by productivity initiatives
    Saved {
        plan_path: PathBuf,
        #[command(flatten)]
        window: OptionalWindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Emissions of the executed well reconciled against telemetry
    #[command(subcommand)]
    Measured(MeasuredCommands),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Validate { .. } => "validate",
            Commands::Step { .. } => "step",
            Commands::Total { .. } => "total",
            Commands::Daily { .. } => "daily",
            Commands::Hourly { .. } => "hourly",
            Commands::Summary { .. } => "summary",
            Commands::Saved { .. } => "saved",
            Commands::Measured(MeasuredCommands::Daily { .. }) => "measured daily",
            Commands::Measured(MeasuredCommands::Hourly { .. }) => "measured hourly",
            Commands::Measured(MeasuredCommands::Summary { .. }) => "measured summary",
            Commands::Measured(MeasuredCommands::Samples { .. }) => "measured samples",
        }
    }
}

#[derive(Subcommand)]
enum MeasuredCommands {
    /// Per-day measured emissions
    Daily {
        plan_path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Per-hour measured emissions inside a window
    Hourly {
        plan_path: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Baseline and target CO2 of the executed well
    Summary { plan_path: PathBuf },
    /// Raw telemetry, daily averages or hourly samples
    Samples {
        plan_path: PathBuf,
        #[command(flatten)]
        window: OptionalWindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PollutantArg {
    Co2,
    Nox,
}

impl From<PollutantArg> for PollutantKind {
    fn from(arg: PollutantArg) -> Self {
        match arg {
            PollutantArg::Co2 => PollutantKind::Co2,
            PollutantArg::Nox => PollutantKind::Nox,
        }
    }
}

#[derive(Args)]
struct PlanOptions {
    #[arg(long, value_enum, default_value = "co2")]
    pollutant: PollutantArg,
    /// Use the durations shortened by productivity initiatives
    #[arg(long)]
    improved: bool,
}

#[derive(Args)]
struct WindowArgs {
    /// Window start (RFC 3339)
    #[arg(long)]
    start: DateTime<Utc>,
    /// Window end, inclusive (RFC 3339)
    #[arg(long)]
    end: DateTime<Utc>,
}

impl WindowArgs {
    fn window(&self) -> AppResult<Window> {
        if self.end < self.start {
            return Err(AppError::InvalidInput(format!(
                "window ends ({}) before it starts ({})",
                self.end, self.start
            )));
        }
        Ok(Window::new(self.start, self.end))
    }
}

#[derive(Args)]
struct OptionalWindowArgs {
    #[arg(long, requires = "end")]
    start: Option<DateTime<Utc>>,
    #[arg(long, requires = "start")]
    end: Option<DateTime<Utc>>,
}

impl OptionalWindowArgs {
    fn window(&self) -> AppResult<Option<Window>> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => WindowArgs { start, end }.window().map(Some),
            _ => Ok(None),
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output JSON file path (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let _span = info_span!("command", name = cli.command.name()).entered();
    info!("starting");

    match cli.command {
        Commands::Validate { plan_path } => cmd_validate(&plan_path),
        Commands::Step {
            plan_path,
            step_id,
            options,
        } => cmd_step(&plan_path, step_id, &options),
        Commands::Total { plan_path, options } => cmd_total(&plan_path, &options),
        Commands::Daily {
            plan_path,
            options,
            output,
        } => {
            let plan = project_service::load_plan(&plan_path)?;
            let pollutant = PollutantKind::from(options.pollutant).strategy(plan.factors);
            let dataset =
                wp_app::compute_plan_daily_dataset(&plan, pollutant.as_ref(), options.improved)?;
            emit(&dataset, output.output.as_deref())
        }
        Commands::Hourly {
            plan_path,
            options,
            window,
            output,
        } => {
            let plan = project_service::load_plan(&plan_path)?;
            let pollutant = PollutantKind::from(options.pollutant).strategy(plan.factors);
            let dataset = wp_app::compute_plan_windowed_dataset(
                &plan,
                pollutant.as_ref(),
                options.improved,
                window.window()?,
            )?;
            emit(&dataset, output.output.as_deref())
        }
        Commands::Summary { plan_path } => {
            let plan = project_service::load_plan(&plan_path)?;
            emit(&wp_app::compute_plan_summary(&plan)?, None)
        }
        Commands::Saved {
            plan_path,
            window,
            output,
        } => {
            let plan = project_service::load_plan(&plan_path)?;
            let dataset = wp_app::compute_saved_co2_dataset(&plan, window.window()?)?;
            emit(&dataset, output.output.as_deref())
        }
        Commands::Measured(measured) => cmd_measured(measured),
    }
}

fn cmd_validate(plan_path: &Path) -> AppResult<()> {
    println!("Validating plan: {}", plan_path.display());
    let overview = project_service::validate_plan_file(plan_path)?;
    println!("✓ Plan is valid: {}", overview.name);
    println!("  Planned steps: {}", overview.planned_steps);
    println!("  Executed steps: {}", overview.complete_steps);
    println!("  Initiatives: {}", overview.initiatives);
    println!("  Telemetry samples: {}", overview.telemetry_samples);
    Ok(())
}

fn cmd_step(plan_path: &Path, step_id: u32, options: &PlanOptions) -> AppResult<()> {
    let plan = project_service::load_plan(plan_path)?;
    let step_id = Id::from_raw(step_id).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    let pollutant = PollutantKind::from(options.pollutant).strategy(plan.factors);
    let result = wp_app::compute_planned_step(&plan, pollutant.as_ref(), step_id, options.improved)?;
    emit(&result, None)
}

fn cmd_total(plan_path: &Path, options: &PlanOptions) -> AppResult<()> {
    let plan = project_service::load_plan(plan_path)?;
    let pollutant = PollutantKind::from(options.pollutant).strategy(plan.factors);
    let total = wp_app::compute_plan_total(&plan, pollutant.as_ref(), options.improved)?;
    let (duration, improved_duration) = wp_app::planned_durations(&plan)?;

    println!("Plan: {} ({})", plan.name, pollutant.name());
    println!("  Duration: {:.3} d (improved {:.3} d)", duration, improved_duration);
    println!("  Baseline: {:.3} t", total.baseline);
    println!("  Target:   {:.3} t", total.target);
    println!("  Reduction: {:.3} t", total.total_reduction());
    Ok(())
}

fn cmd_measured(command: MeasuredCommands) -> AppResult<()> {
    match command {
        MeasuredCommands::Daily { plan_path, output } => {
            let plan = project_service::load_plan(&plan_path)?;
            emit(
                &wp_app::compute_measured_daily_dataset(&plan)?,
                output.output.as_deref(),
            )
        }
        MeasuredCommands::Hourly {
            plan_path,
            window,
            output,
        } => {
            let plan = project_service::load_plan(&plan_path)?;
            let dataset = wp_app::compute_measured_windowed_dataset(&plan, window.window()?)?;
            emit(&dataset, output.output.as_deref())
        }
        MeasuredCommands::Summary { plan_path } => {
            let plan = project_service::load_plan(&plan_path)?;
            emit(&wp_app::compute_measured_summary(&plan)?, None)
        }
        MeasuredCommands::Samples {
            plan_path,
            window,
            output,
        } => {
            let plan = project_service::load_plan(&plan_path)?;
            let dataset = wp_app::compute_measurement_dataset(&plan, window.window()?)?;
            emit(&dataset, output.output.as_deref())
        }
    }
}

/// Write `value` as pretty JSON to `output`, or stdout.
fn emit<T: Serialize>(value: &T, output: Option<&Path>) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "wrote output");
            println!("✓ Written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
