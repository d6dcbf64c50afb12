use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};

use hospital_directory::config::Config;
use hospital_directory::{
    logging, server, Directory, Pipeline, PipelineResult, SearchQuery,
    SharedDirectory,
};

#[derive(Parser)]
#[command(name = "hospital_directory")]
#[command(about = "Qualifying hospital directory: load, search and serve")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./directory.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the hospital directory CSV path
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Override the CSV field delimiter (e.g. ';')
    #[arg(long, global = true)]
    delimiter: Option<char>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the directory in the background and serve the HTTP API
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
    /// Load the directory and print ingestion statistics
    Summary,
    /// Search hospitals by name
    Search {
        query: String,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        locality: Option<String>,
    },
    /// Print one hospital as JSON
    Lookup { id: String },
}

async fn load(
    config: &Config,
    pipeline: &Pipeline,
) -> anyhow::Result<(Directory, PipelineResult)> {
    let source = config.data.source()?;
    pipeline
        .load_directory(&source)
        .await
        .with_context(|| format!("loading {}", source.path().display()))
}

async fn serve(config: Config, pipeline: Pipeline, port: Option<u16>) -> anyhow::Result<()> {
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.server.host, port))?;

    if config.metrics.enabled {
        hospital_directory::metrics::init_metrics(config.metrics.port);
    }

    let directory = SharedDirectory::new();

    // Serve the empty directory until the load commits
    let loader = directory.clone();
    let source = config.data.source()?;
    tokio::spawn(async move {
        match pipeline.load_into(&source, &loader).await {
            Ok(result) => info!("Directory ready: {} hospitals", result.accepted),
            Err(e) => error!("Directory load failed, serving empty dataset: {}", e),
        }
    });

    server::start_server(directory, addr).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(csv) = cli.csv {
        config.data.csv_path = csv;
    }
    if let Some(delimiter) = cli.delimiter {
        config.data.delimiter = delimiter;
    }
    let pipeline = Pipeline::new(config.classifier.clone());

    match cli.command {
        Commands::Serve { port } => serve(config, pipeline, port).await?,
        Commands::Summary => {
            let (directory, result) = load(&config, &pipeline).await?;
            println!("📊 Load results for {}:", result.source);
            println!("   Rows:      {}", result.total_rows);
            println!("   Accepted:  {}", result.accepted);
            println!("   Rejected:  {}", result.rejected);
            for check in pipeline.checks() {
                if let Some(count) = result.rejections.get(check.name) {
                    println!("     - {} ({}): {}", check.name, check.description, count);
                }
            }
            println!("   Errors:    {}", result.errors.len());
            let summary = directory.summary();
            println!("   Districts: {}", summary.districts);
            println!("   States:    {}", summary.states);
            println!("   Took:      {}ms", result.elapsed_ms);
        }
        Commands::Search {
            query,
            district,
            locality,
        } => {
            let (directory, _) = load(&config, &pipeline).await?;
            let query = SearchQuery {
                query,
                district,
                locality,
            };
            for hospital in directory.search(&query)? {
                println!(
                    "{}\t{}\t{} / {}",
                    hospital.id, hospital.name, hospital.district, hospital.subdistrict
                );
            }
        }
        Commands::Lookup { id } => {
            let (directory, _) = load(&config, &pipeline).await?;
            let hospital = directory.by_id(&id)?;
            println!("{}", serde_json::to_string_pretty(&hospital)?);
        }
    }

    Ok(())
}
