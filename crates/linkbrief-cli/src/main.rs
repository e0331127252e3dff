//! LinkBrief CLI - link previews and AI summaries from the command line

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use linkbrief::{BriefResult, Config, PipelineBuilder, WebMetadata};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format for scrape and brief subcommands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// LinkBrief - fetch a page, extract its metadata, summarize it with an LLM
#[derive(Parser, Debug)]
#[command(name = "linkbrief")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// API key for the LLM provider
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Fetch URL and print its metadata and body text
    Scrape {
        /// URL to scrape (scheme optional)
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// Summarize text given as argument or on stdin
    Summarize {
        /// Text to summarize; read from stdin when omitted
        text: Option<String>,

        /// Page title used as the prompt label
        #[arg(long)]
        title: Option<String>,

        /// Page URL used as the prompt label when no title is given
        #[arg(long)]
        url: Option<String>,
    },
    /// Fetch URL, extract metadata and summarize it
    Brief {
        /// URL to brief (scheme optional)
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_tracing(serving: bool) {
    let default = if serving { "linkbrief=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!(path = %path.display(), "Loaded config");
            config
        }
        None => Config::default(),
    };

    let mut builder = PipelineBuilder::from_config(&config);
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    let pipeline = builder.build()?;
    debug!(on_fetch_failure = ?pipeline.on_fetch_failure(), "Pipeline ready");

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or(config.server.bind);
            linkbrief::server::run_server(&bind, Arc::new(pipeline))
                .await
                .with_context(|| format!("Server on {} failed", bind))?;
        }
        Commands::Scrape { url, output } => {
            let metadata = pipeline.scrape(&url).await?;
            match output {
                OutputFormat::Md => writeln_safe(&format_metadata_md(&metadata)),
                OutputFormat::Json => writeln_safe(&serde_json::to_string_pretty(&metadata)?),
            }
        }
        Commands::Summarize { text, title, url } => {
            let content = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let summary = pipeline
                .summarize(&content, title.as_deref(), url.as_deref())
                .await?;
            writeln_safe(&summary);
        }
        Commands::Brief { url, output } => {
            let brief = pipeline.scrape_and_summarize(&url).await?;
            match output {
                OutputFormat::Md => writeln_safe(&format_brief_md(&brief)),
                OutputFormat::Json => writeln_safe(&serde_json::to_string_pretty(&brief)?),
            }
        }
    }

    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;
    if content.trim().is_empty() {
        bail!("No text given; pass TEXT or pipe it on stdin");
    }
    Ok(content)
}

/// Build a frontmatter block, skipping absent and empty values
fn frontmatter(fields: &[(&str, Option<&str>)]) -> String {
    let mut output = String::from("---\n");
    for (key, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            output.push_str(&format!("{}: {}\n", key, value));
        }
    }
    output.push_str("---\n");
    output
}

/// Format metadata as frontmatter followed by the page text
fn format_metadata_md(metadata: &WebMetadata) -> String {
    let mut output = frontmatter(&[
        ("url", Some(metadata.url.as_str())),
        ("title", Some(metadata.title.as_str())),
        ("description", Some(metadata.description.as_str())),
        ("image_url", metadata.image_url.as_deref()),
        ("favicon_url", metadata.favicon_url.as_deref()),
    ]);
    output.push_str(&metadata.content);
    output
}

/// Format a brief as frontmatter followed by the summary
fn format_brief_md(brief: &BriefResult) -> String {
    let mut output = frontmatter(&[
        ("url", Some(brief.url.as_str())),
        ("title", Some(brief.title.as_str())),
        ("description", Some(brief.description.as_str())),
        ("image_url", brief.image_url.as_deref()),
        ("favicon_url", brief.favicon_url.as_deref()),
    ]);
    output.push_str(&brief.summary);
    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
