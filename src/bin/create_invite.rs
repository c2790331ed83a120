use anyhow::Context;
use clap::Parser;
use flowdose::adapters::admin_api::AdminApiClient;
use flowdose::core::subscriber::DEFAULT_BACKEND_URL;
use flowdose::utils::logger;
use flowdose::utils::validation::{validate_email, validate_url};
use flowdose::EnvSnapshot;

/// Creates a test admin invitation.
///
/// Example: `create_invite newadmin@example.com`
#[derive(Parser)]
#[command(name = "create-invite")]
#[command(about = "Create an admin invite through the backend admin API")]
struct Args {
    /// Address to invite
    email: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let Some(email) = args.email else {
        eprintln!("❌ Please provide an email address as an argument");
        eprintln!("Usage: create_invite newadmin@example.com");
        std::process::exit(1);
    };

    if let Err(e) = run(&email).await {
        eprintln!("❌ Failed to create invite for {}:", email);
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(email: &str) -> anyhow::Result<()> {
    validate_email("email", email)?;

    let env = EnvSnapshot::from_env();
    let backend_url = env
        .backend_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    validate_url("BACKEND_URL", &backend_url)?;

    if env.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN not set, sending unauthenticated request");
    }

    let client = AdminApiClient::new(backend_url.as_str(), env.admin_api_token.clone());
    let invite = client
        .create_invite(email)
        .await
        .with_context(|| format!("backend at {} refused the invite", backend_url))?;

    println!("✅ Successfully created invite for {}", invite.email);
    println!("The invite token is: {}", invite.token);
    println!("An email should be sent with the invitation.");
    Ok(())
}
