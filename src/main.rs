use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quake_alert::{
    announcement::BoardView,
    config::Config,
    console::{describe_event, Console},
    error::AppError,
    logging::init_tracing,
    models::FeatureField,
    session::OperatorSession,
    startup::AppContext,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "quake-alert")]
#[command(about = "Earthquake alert-level prediction and public announcements", version)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, env = "QUAKE_ALERT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive operator console (default)
    Console,

    /// List the most recent selectable events
    Events {
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Predict the alert level for an event or manual readings
    Predict(ReadingArgs),

    /// Predict and publish as the public announcement
    Publish {
        #[command(flatten)]
        readings: ReadingArgs,

        /// Region shown on the board
        #[arg(long)]
        region: Option<String>,

        /// Message shown on the board
        #[arg(long)]
        message: Option<String>,
    },

    /// Show the public announcement board
    Board,
}

#[derive(Args)]
struct ReadingArgs {
    /// Event row to start from (defaults to the most recent)
    #[arg(short, long)]
    row: Option<usize>,

    #[arg(long)]
    magnitude: Option<f64>,

    #[arg(long)]
    depth: Option<f64>,

    #[arg(long)]
    cdi: Option<f64>,

    #[arg(long)]
    mmi: Option<f64>,

    #[arg(long)]
    sig: Option<f64>,
}

impl ReadingArgs {
    fn apply(&self, session: &mut OperatorSession) -> quake_alert::Result<()> {
        if let Some(row) = self.row {
            session.select(row)?;
        }
        let overrides = [
            (FeatureField::Magnitude, self.magnitude),
            (FeatureField::Depth, self.depth),
            (FeatureField::Cdi, self.cdi),
            (FeatureField::Mmi, self.mmi),
            (FeatureField::Sig, self.sig),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(AppError::Validation(format!("{} must be a finite number", field)));
                }
                session.set_feature(field, value);
            }
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.observability);
    tracing::info!("Starting quake-alert v{}", env!("CARGO_PKG_VERSION"));

    let context = match AppContext::load(config) {
        Ok(context) => context,
        Err(AppError::MissingPrerequisites(missing)) => {
            eprintln!("⚠️  Required files are missing:");
            for path in &missing {
                eprintln!("   {}", path.display());
            }
            eprintln!("Run quake-train first to produce the model artifacts.");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command.unwrap_or(Commands::Console), &context) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, context: &AppContext) -> anyhow::Result<()> {
    let events = context.dataset.tail(context.config.session.tail_rows);

    match command {
        Commands::Console => {
            let mut console = Console::from_context(context)?;
            let stdin = io::stdin();
            console.run(stdin.lock(), io::stdout())?;
        }

        Commands::Events { limit } => {
            let start = limit.map_or(0, |n| events.len().saturating_sub(n));
            for (i, record) in events.iter().enumerate().skip(start) {
                println!("{}", describe_event(i, record));
            }
        }

        Commands::Predict(readings) => {
            let mut session = OperatorSession::new(events)?;
            readings.apply(&mut session)?;
            let draft = session.predict(&context.predictor)?;

            println!("Inputs: {}", draft.inputs);
            println!(
                "Predicted alert level: {} {}",
                draft.risk_level.marker(),
                draft.risk_level.display_name()
            );
        }

        Commands::Publish {
            readings,
            region,
            message,
        } => {
            let mut session = OperatorSession::new(events)?;
            readings.apply(&mut session)?;
            session.predict(&context.predictor)?;
            if let Some(region) = region {
                session.set_region(region)?;
            }
            if let Some(message) = message {
                session.set_message(message)?;
            }

            let document = session
                .publish(&context.publisher())
                .context("publishing announcement")?;
            println!("✅ Published at {}", document.last_updated);
            print!("{}", BoardView::Published(document));
        }

        Commands::Board => {
            let view = BoardView::load(context.store.as_ref()).context("reading announcement board")?;
            print!("{}", view);
        }
    }

    Ok(())
}
