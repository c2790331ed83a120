use anyhow::Context;
use clap::Parser;
use flowdose::adapters::resend::ResendClient;
use flowdose::core::notifier::ResendNotifier;
use flowdose::domain::model::{Channel, EmailTemplate, NotificationRequest};
use flowdose::domain::ports::NotificationModule;
use flowdose::utils::logger;
use flowdose::utils::validation::{validate_email, validate_required_field};
use flowdose::EnvSnapshot;

#[derive(Parser)]
#[command(name = "verify-resend")]
#[command(about = "Send a test email through Resend to check the provider setup")]
struct Args {
    /// Address that receives the test email
    email: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    // 先檢查參數，不發任何網路請求
    let Some(email) = args.email else {
        eprintln!("Error: Please provide a test email address as an argument");
        eprintln!("Usage: verify_resend test@example.com");
        std::process::exit(1);
    };

    if let Err(e) = run(&email).await {
        eprintln!("Error sending email:");
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(email: &str) -> anyhow::Result<()> {
    validate_email("email", email)?;

    let env = EnvSnapshot::from_env();
    let api_key = validate_required_field("RESEND_API_KEY", &env.resend_api_key)?;
    let from = env
        .sender_address()
        .context("RESEND_FROM or RESEND_FROM_EMAIL is not set in the environment variables")?;

    println!("Sending test email from {} to {}...", from, email);

    let notifier = ResendNotifier::new(ResendClient::new(api_key.clone()), from);
    let receipt = notifier
        .create_notification(NotificationRequest {
            to: email.to_string(),
            channel: Channel::Email,
            template: EmailTemplate::VerifyTest,
            data: serde_json::Value::Null,
        })
        .await
        .context("Resend rejected the test email")?;

    println!("Email sent successfully!");
    println!("Response: {{ id: {} }}", receipt.id);
    Ok(())
}
