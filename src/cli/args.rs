use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kinofetch", version, about = "Kinopoisk metadata to JSON/CSV")]
pub struct CliArgs {
    /// API key for kinopoisk.dev
    #[arg(long, env = "KINOPOISK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// JSON config file with base_url, api_key, timeout_secs, search_limit and output_dir
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Number of search results offered for selection (overrides the config file)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Directory for the exported .json and .csv files [default: .]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Title to look up; repeat for several. Without it an interactive prompt runs
    #[arg(short, long = "query")]
    pub queries: Vec<String>,

    /// Enable logging (to stderr)
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
