use clap::Parser;
use std::path::PathBuf;

use voice_embedding_viewer::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "voice_embedding_viewer",
    version,
    about = "Scatter plot of sentence embeddings for active and passive phrasings"
)]
pub struct Cli {
    /// Viewer configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Embeddings CSV (overrides `data_path` in the config)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Embedding service URL (overrides `endpoint` in the config)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Active-voice sentence to embed; needs --passive too
    #[arg(long)]
    pub active: Option<String>,

    /// Passive-voice sentence to embed; needs --active too
    #[arg(long)]
    pub passive: Option<String>,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,
}
