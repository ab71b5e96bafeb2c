// src/main.rs — learnpath entry point

use clap::Parser;

use learnpath::cli::curate::CurateArgs;
use learnpath::cli::{Cli, Commands};
use learnpath::infra::config::Config;
use learnpath::infra::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // Respects RUST_LOG / LEARNPATH_LOG
    let level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    logger::init_logging(level);

    match cli.command {
        Commands::Classify { topic } => learnpath::cli::curate::run_classify(&topic),
        Commands::Query {
            query,
            skill_level,
            content_type,
            category,
        } => learnpath::cli::curate::run_query(
            &query,
            skill_level.as_deref(),
            content_type.as_deref(),
            category.as_deref(),
        ),
        Commands::Curate {
            topic,
            input,
            skill_level,
            content_type,
            min_quality,
            max_age_days,
            code_examples,
            limit,
            json,
        } => learnpath::cli::curate::run_curate(
            CurateArgs {
                topic: &topic,
                input: &input,
                skill_level: skill_level.as_deref(),
                content_type: content_type.as_deref(),
                min_quality,
                max_age_days,
                code_examples,
                limit,
                json,
            },
            &config,
        ),
        Commands::Roadmap {
            topic,
            response,
            track,
        } => learnpath::cli::roadmap::run_roadmap(&topic, &response, track),
        Commands::Progress { action } => learnpath::cli::progress::run_progress(action, &config),
        Commands::Export {
            format,
            output,
            no_analytics,
            no_achievements,
        } => learnpath::cli::export::run_export(
            &format,
            output.as_deref(),
            !no_analytics,
            !no_achievements,
            &config,
        ),
        Commands::Cost {
            input_tokens,
            output_tokens,
            model,
        } => learnpath::cli::cost::run_cost(input_tokens, output_tokens, model.as_deref(), &config),
    }
}
