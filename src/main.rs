use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use word_friends::{explore_network, NetworkConfig, NetworkConfigBuilder, TracingReporter};

/// Measure the edit-distance-1 social network of a word
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word whose network is measured
    #[arg(short, long)]
    start_word: Option<String>,

    /// Number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Read the word list from this file
    #[arg(short, long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Download the word list from this URL
    #[arg(short, long)]
    url: Option<String>,

    /// Letters used to build candidate words
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Report progress every N words found (0 disables)
    #[arg(short, long)]
    progress_interval: Option<usize>,

    /// Expected network size to check the result against
    #[arg(short, long)]
    expect: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<NetworkConfig> {
        let base = match &self.config {
            Some(path) => NetworkConfig::from_yaml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => NetworkConfig::default(),
        };

        let mut builder = NetworkConfigBuilder::from_config(base);
        if let Some(word) = self.start_word {
            builder = builder.start_word(word);
        }
        if let Some(workers) = self.workers {
            builder = builder.worker_count(workers);
        }
        if let Some(path) = self.file {
            builder = builder.word_file(path);
        }
        if let Some(url) = self.url {
            builder = builder.word_url(url);
        }
        if let Some(alphabet) = self.alphabet {
            builder = builder.alphabet(alphabet);
        }
        if let Some(interval) = self.progress_interval {
            builder = builder.progress_interval(interval);
        }
        if self.expect.is_some() {
            builder = builder.expected_size(self.expect);
        }
        Ok(builder.build()?)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
    }

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<()> {
    let json = cli.json;
    let config = cli.into_config()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let summary = runtime.block_on(explore_network(&config, Arc::new(TracingReporter)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
