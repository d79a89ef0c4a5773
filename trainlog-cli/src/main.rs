use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use log::{LevelFilter, info};

use trainlog::aggregate::{sort_by_volume, summarize};
use trainlog::catalog::{CatalogClient, filter_by_name};
use trainlog::config::CatalogConfig;
use trainlog::export::read_training;
use trainlog::logging::{Target, init_file_logger, init_logger, parse_level};
use trainlog::{SortOrder, Training};

mod form;
mod ui;

#[derive(Parser, Debug)]
#[command(version, about = "Trainlog - Training Logger CLI", long_about = None)]
struct Args {
    /// off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl fmt::Display for OrderArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderArg::Asc => write!(f, "asc"),
            OrderArg::Desc => write!(f, "desc"),
        }
    }
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Ascending,
            OrderArg::Desc => SortOrder::Descending,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log trainings in the interactive form
    Interactive {
        /// Write logs here; without it the form logs nothing
        #[arg(long)]
        log_file: Option<PathBuf>,
        /// Directory exported trainings are written to
        #[arg(short, long, default_value = ".")]
        export_dir: PathBuf,
    },
    /// Search the exercise catalog by name
    Catalog {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Summarize exported trainings ordered by volume
    Report {
        #[arg(short, long, default_value_t = OrderArg::Desc)]
        order: OrderArg,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn log_level(args: &Args) -> Result<LevelFilter> {
    match parse_level(&args.log_level) {
        Some(level) => Ok(level),
        None => bail!("unknown log level: {}", args.log_level),
    }
}

fn catalog_client() -> Result<CatalogClient> {
    CatalogClient::new_wger(&CatalogConfig::from_env()).context("Failed to create catalog client")
}

fn report_lines(trainings: &[Training], order: SortOrder) -> Vec<String> {
    let mut lines = Vec::new();
    for training in sort_by_volume(trainings, order) {
        lines.push(format!(
            "{} ({}): {}",
            training.name(),
            training.id(),
            summarize(&training)
        ));
        for exercise in training.exercises() {
            lines.push(format!("\t{}", exercise));
        }
    }
    lines
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    let level = log_level(&args)?;

    match args.command {
        Commands::Interactive {
            log_file,
            export_dir,
        } => {
            if let Some(path) = log_file {
                init_file_logger(level, &path)?;
            }
            let app = form::App::new(catalog_client()?, export_dir);

            let terminal = ratatui::init();
            let result = ui::run(terminal, app).await;
            ratatui::restore();
            result
        }
        Commands::Catalog { query } => {
            init_logger(level, Target::Stderr);
            let entries = catalog_client()?.fetch_exercise_names().await?;
            let matches = filter_by_name(&query, &entries);
            info!("{} of {} catalog entries match {:?}", matches.len(), entries.len(), query);
            for entry in matches {
                println!("{}", entry.name);
            }
            Ok(())
        }
        Commands::Report { order, files } => {
            init_logger(level, Target::Stderr);
            let trainings = files
                .iter()
                .map(read_training)
                .collect::<Result<Vec<_>>>()?;
            for line in report_lines(&trainings, order.into()) {
                println!("{}", line);
            }
            Ok(())
        }
    }
}
