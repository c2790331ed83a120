use clap::Parser;
use flowdose::app::server;
use flowdose::utils::logger;
use flowdose::{AppState, EnvSnapshot, ServerArgs};

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // 初始化日誌
    logger::init_server_logger(args.json_logs);

    let env = EnvSnapshot::from_env();
    let addr = args.bind_address(env.port);

    let source = args.data_source(&env);

    tracing::info!("Starting stand-in API on {} (products from {:?})", addr, source);

    if let Err(e) = server::serve(&addr, AppState::new(source.provider())).await {
        tracing::error!("❌ Server failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
}
