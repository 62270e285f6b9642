use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use parkmap::config::AppConfig;
use std::process;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parking lot map, booking and reservations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: AppConfig,

    /// JSON settings file; explicit flags still win over it
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the lot as a grid
    Spots(cmd::spots::SpotsArgs),
    /// Compute spot geometry for a container size
    Layout(cmd::layout::LayoutArgs),
    /// Book an available spot
    Book(cmd::book::BookArgs),
    /// List reservations
    Reservations(cmd::reservations::ReservationsArgs),
}

#[tokio::main]
async fn main() {
    // 1. Parse raw matches so explicit flags can be told apart from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    // 2. Resolve settings: file first, then explicit CLI overrides
    let config = match &cli.config_file {
        Some(path) => {
            println!("⚙️  Loading settings from: {}", path);
            let mut file_config = AppConfig::load_from_file(path).unwrap_or_else(|e| {
                eprintln!("❌ {}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(&cli.config, &matches);
            file_config
        }
        None => cli.config.clone(),
    };

    if let Err(e) = config.layout.validate() {
        eprintln!("❌ {}", e);
        process::exit(1);
    }

    // 3. Execute
    let result = match cli.command {
        Commands::Spots(args) => cmd::spots::run(args, &config).await,
        Commands::Layout(args) => cmd::layout::run(args, &config).await,
        Commands::Book(args) => cmd::book::run(args, &config).await,
        Commands::Reservations(args) => cmd::reservations::run(args, &config).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        process::exit(1);
    }
}
