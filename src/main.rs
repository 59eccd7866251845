use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use community_registry::{
    load_political_communities, load_postal_communities, JoinEngine, LoaderConfig, Model,
    QueryEngine, RegistryReport,
};

#[derive(Debug, Parser)]
#[command(
    name = "community-registry",
    version,
    about = "Query the political and postal community registers"
)]
struct Cli {
    /// Political community register (CSV)
    #[arg(long, env = "COMMUNITY_POLITICAL_CSV")]
    political: PathBuf,

    /// Postal community register (CSV)
    #[arg(long, env = "COMMUNITY_POSTAL_CSV")]
    postal: PathBuf,

    /// Field separator used by both files
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every aggregate
    Report {
        #[arg(long)]
        json: bool,
    },
    /// Political communities and districts of a canton
    Canton { code: String },
    /// Political communities of a district
    District { number: String },
    /// Districts covered by a zip code
    Zip { zip_code: String },
    /// Earliest last update among owners of a postal community name
    PostalName { name: String },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let model = load_model(&cli)?;
    let engine = QueryEngine::new(&model);

    match cli.command {
        Command::Report { json } => {
            let report = RegistryReport::build(&engine)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Canton { code } => {
            let communities = engine.count_political_communities_in_canton(&code)?;
            let districts = engine.count_districts_in_canton(&code)?;
            println!("{code}: {communities} political communities in {districts} districts");
        }
        Command::District { number } => {
            let communities = engine.count_political_communities_in_district(&number)?;
            println!("District {number}: {communities} political communities");
        }
        Command::Zip { zip_code } => {
            let districts = engine.districts_for_zip_code(&zip_code);
            if districts.is_empty() {
                println!("No district for zip code {zip_code}");
            }
            for district in districts {
                println!("{district}");
            }
        }
        Command::PostalName { name } => {
            let last_update = engine.last_update_for_postal_community_name(&name)?;
            println!("{name}: {last_update}");
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_model(cli: &Cli) -> Result<Model> {
    if !cli.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", cli.delimiter);
    }
    let config = LoaderConfig::default().with_delimiter(cli.delimiter as u8);

    let political = load_political_communities(&cli.political, &config)
        .with_context(|| format!("Failed to load {}", cli.political.display()))?;
    let postal = load_postal_communities(&cli.postal, &config)
        .with_context(|| format!("Failed to load {}", cli.postal.display()))?;

    JoinEngine::new()
        .build(&political, &postal)
        .context("Failed to build community model")
}
