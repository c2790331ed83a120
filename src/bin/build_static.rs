use clap::Parser;
use flowdose::core::build::{self, BuildPlan};
use flowdose::core::prefetch::{self, DataSource, StubStorefront};
use flowdose::utils::logger;
use flowdose::EnvSnapshot;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "build-static")]
#[command(about = "Production storefront build that stubs data modules in CI")]
struct Args {
    /// Storefront project root (contains src/ and node_modules/)
    #[arg(short, long, default_value = ".")]
    root: String,

    /// Outside CI, ask the prefetch source what it returns before building
    #[arg(long)]
    probe_source: bool,

    /// Seconds the source probe may take before the build starts anyway
    #[arg(long, default_value_t = 10)]
    probe_timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Logs what the selected prefetch source returns. Never blocks the build
/// longer than `limit`.
async fn probe_source(env: &EnvSnapshot, limit: Duration) {
    let source = DataSource::select(env);
    let provider = source.provider_with_timeout(limit);

    match tokio::time::timeout(limit, prefetch::summarize(provider.as_ref())).await {
        Ok(Ok(summary)) => tracing::info!(
            "Prefetch source {:?}: {} categories, {} products, {} regions",
            source,
            summary.categories,
            summary.products,
            summary.regions
        ),
        Ok(Err(e)) => tracing::warn!("Prefetch source unreachable, pages may render empty: {}", e),
        Err(_) => tracing::warn!(
            "Prefetch source did not answer within {}s, building anyway",
            limit.as_secs()
        ),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let env = EnvSnapshot::from_env();
    let plan = BuildPlan::next_build(&args.root);

    let stub_module = if env.ci {
        println!("Running in Docker build environment, using stub data");
        match prefetch::render_stub_module(&StubStorefront).await {
            Ok(module) => Some(module),
            Err(e) => {
                eprintln!("❌ Could not render stub module: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        if args.probe_source {
            probe_source(&env, Duration::from_secs(args.probe_timeout)).await;
        }
        None
    };

    println!("Starting Next.js build...");
    if let Err(e) = build::run_build(&plan, stub_module.as_deref()).await {
        tracing::error!("Build failed: {}", e);
        eprintln!("❌ Build failed: {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    println!("✅ Build completed");
}
