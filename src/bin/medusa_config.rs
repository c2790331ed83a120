use clap::{Parser, ValueEnum};
use flowdose::utils::logger;
use flowdose::utils::validation::Validate;
use flowdose::{assemble, EnvSnapshot};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Toml,
}

#[derive(Parser)]
#[command(name = "medusa-config")]
#[command(about = "Print the Medusa configuration assembled from the environment")]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let env = EnvSnapshot::from_env();
    if let Err(e) = env.validate() {
        tracing::warn!("❌ {}", e.user_friendly_message());
        tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
    }
    for warning in env.warnings() {
        tracing::warn!("{}", warning);
    }

    let config = assemble(&env);
    tracing::info!("Assembled {} module(s)", config.modules.len());

    let rendered = match args.format {
        Format::Json => config.to_json_pretty(),
        Format::Toml => config.to_toml(),
    };

    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }
}
