use std::path::PathBuf;

use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};

use vigil_core::{PullRequestRecord, VigilConfig};
use vigil_review::diff::DiffFetcher;
use vigil_review::llm::LlmClient;
use vigil_review::pipeline::ReviewPipeline;
use vigil_review::report::render_report;

#[derive(Parser)]
#[command(
    name = "vigil",
    version,
    about = "Batch AI code review for open pull requests",
    long_about = "vigil reads a list of open pull requests, fetches each diff through\n\
                  the GitHub CLI, asks a hosted Claude model for a first-pass review,\n\
                  and writes every review into a single markdown report.\n\n\
                  Examples:\n  \
                    gh pr list --json number,title,author,url > prs.json\n  \
                    vigil review\n  \
                    vigil review --input prs.json --output review_results.md"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .vigil.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Review every listed pull request and write a markdown report
    #[command(long_about = "Review every listed pull request and write a markdown report.\n\n\
        Reads a JSON array of PR records (number, title, author.login, url),\n\
        fetches each diff with 'gh pr diff', reviews it with the configured\n\
        model, and writes one report section per successful review. A PR that\n\
        fails to fetch or review is logged and skipped; the rest continue.\n\n\
        Examples:\n  vigil review\n  vigil review --input prs.json --output review_results.md")]
    Review {
        /// JSON file listing the PRs to review (overrides config)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Report file to write (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create a default .vigil.toml configuration file
    #[command(long_about = "Create a default .vigil.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .vigil.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!("vigil v{version} — a first-pass AI review for every open pull request\n");

    println!("Quick start:");
    println!("  vigil init                                  Create a .vigil.toml config file");
    println!("  gh pr list --json number,title,author,url \\");
    println!("    > prs.json                                Export the open PRs to review");
    println!("  vigil review                                Review them and write the report\n");

    println!("Run 'vigil <command> --help' for details.");
}

const DEFAULT_CONFIG: &str = r#"# vigil configuration
# See: https://github.com/vigil-ai/vigil

[llm]
# Bedrock model identifier
# model = "anthropic.claude-3-5-sonnet-20241022-v2:0"
# anthropic_version = "bedrock-2023-05-31"
# Region is selected through the endpoint URL
# base_url = "https://bedrock-runtime.us-east-1.amazonaws.com"
# api_key = ""   # or export AWS_BEARER_TOKEN_BEDROCK
# max_tokens = 4096

[review]
# max_diff_chars = 15000
# input = "prs.json"
# output = "review_results.md"
"#;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => VigilConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".vigil.toml");
            if default_path.exists() {
                VigilConfig::from_file(default_path).into_diagnostic()?
            } else {
                VigilConfig::default()
            }
        }
    };

    match cli.command {
        None => {
            print_welcome();
        }
        Some(Command::Review { input, output }) => {
            let input_path = input.unwrap_or_else(|| config.review.input.clone());
            let output_path = output.unwrap_or_else(|| config.review.output.clone());

            let prs = PullRequestRecord::load_all(&input_path).into_diagnostic()?;

            if prs.is_empty() {
                println!("No open pull requests found.");
                return Ok(());
            }

            // Hint: missing API key — fail before any external call
            if config.llm.api_key.is_none() && std::env::var("AWS_BEARER_TOKEN_BEDROCK").is_err() {
                miette::bail!(miette::miette!(
                    help = "Set AWS_BEARER_TOKEN_BEDROCK or add api_key in your .vigil.toml under [llm]",
                    "No API key configured for the inference endpoint"
                ));
            }

            if cli.verbose {
                eprintln!(
                    "Reviewing {} pull requests from {}",
                    prs.len(),
                    input_path.display()
                );
                eprintln!("Model: {}", config.llm.model);
            }

            let llm = LlmClient::new(&config.llm).into_diagnostic()?;
            let pipeline = ReviewPipeline::new(DiffFetcher::new(), llm, config.review.clone());

            let results = pipeline.review_all(&prs).await;

            let report = render_report(&results, Utc::now());
            std::fs::write(&output_path, report)
                .into_diagnostic()
                .wrap_err(format!("writing {}", output_path.display()))?;

            println!("Review complete! {} PRs reviewed.", results.len());
        }
        Some(Command::Init) => {
            let path = std::path::Path::new(".vigil.toml");
            if path.exists() {
                miette::bail!(".vigil.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .vigil.toml with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "vigil", &mut std::io::stdout());
        }
    }

    Ok(())
}
