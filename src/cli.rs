use crate::api::DEFAULT_API_URL;
use clap::Parser;

/// Report the size and stats of remote GitHub repositories without cloning them
#[derive(Parser, Debug)]
#[command(name = "repo-size")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub API token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Size unit: B, KB, MB or GB
    #[arg(long, default_value = "MB")]
    pub unit: String,

    /// Show language, stars, forks and last commit
    #[arg(long)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Base URL of the GitHub API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Sum file sizes across all branches instead of using the reported size
    #[arg(long)]
    pub full_size: bool,

    /// Print debug diagnostics to stderr
    #[arg(long)]
    pub debug: bool,

    /// Repository URLs (https://github.com/<owner>/<repo>)
    #[arg(required = true, value_name = "REPO_URL")]
    pub repos: Vec<String>,
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repos: Vec<String>,
    pub token: Option<String>,
    pub unit: String,
    pub verbose: bool,
    pub json: bool,
    pub api_url: String,
    pub full_size: bool,
    pub debug: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            repos: args.repos,
            token: args.token.filter(|t| !t.is_empty()),
            unit: args.unit,
            verbose: args.verbose,
            json: args.json,
            api_url: args.api_url.trim_end_matches('/').to_string(),
            full_size: args.full_size,
            debug: args.debug,
        }
    }
}
