// src/cli/mod.rs — CLI definition (clap derive)

pub mod cost;
pub mod curate;
pub mod export;
pub mod progress;
pub mod roadmap;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "learnpath", about = "Learning roadmaps, curated content and progress analytics", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the topic category of a subject
    Classify {
        topic: String,
    },
    /// Build an enhanced search query
    Query {
        query: String,
        /// beginner, intermediate or advanced
        #[arg(long)]
        skill_level: Option<String>,
        /// tutorial, documentation, article, research, video, course
        #[arg(long)]
        content_type: Option<String>,
        /// programming, web_development, data_science, devops (detected when omitted)
        #[arg(long)]
        category: Option<String>,
    },
    /// Score, filter and rank raw search results from a JSON file
    Curate {
        topic: String,
        /// JSON array of raw search records
        #[arg(long)]
        input: String,
        #[arg(long)]
        skill_level: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
        /// Minimum quality score (defaults to config)
        #[arg(long)]
        min_quality: Option<f64>,
        /// Drop anything published longer ago than this
        #[arg(long)]
        max_age_days: Option<i64>,
        /// Only keep results with code examples
        #[arg(long)]
        code_examples: bool,
        /// Maximum results (defaults to config; 0 = all)
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate and repair an AI roadmap response
    Roadmap {
        topic: String,
        /// File holding the raw AI response text
        #[arg(long)]
        response: String,
        /// Add the roadmap to tracked progress
        #[arg(long)]
        track: bool,
    },
    /// Learning progress
    Progress {
        #[command(subcommand)]
        action: Option<ProgressAction>,
    },
    /// Export progress data
    Export {
        /// json, csv, pdf (plain-text report) or yaml
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        no_analytics: bool,
        #[arg(long)]
        no_achievements: bool,
    },
    /// Estimate the cost of an AI call
    Cost {
        #[arg(long)]
        input_tokens: u32,
        #[arg(long)]
        output_tokens: u32,
        /// Model name (defaults to config)
        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ProgressAction {
    /// Show metrics, trends and achievements (default)
    Show {
        /// day, week or month
        #[arg(long, default_value = "week")]
        period: String,
    },
    /// Mark a milestone as completed
    Complete {
        path_id: String,
        milestone_id: String,
        /// Minutes spent
        #[arg(long, default_value = "0")]
        minutes: u32,
        /// Score 0-100
        #[arg(long)]
        score: Option<f64>,
    },
    /// Check stored progress for problems
    Validate,
}
