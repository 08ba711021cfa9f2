//! CLI definitions for docview
//!
//! The clap structure lives apart from main.rs so command handlers and
//! tests can refer to it.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;
use std::sync::OnceLock;

use docview::config::StorageBackend;

/// Build clap styles for help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

/// Version string, with the git commit for dev builds.
pub fn version() -> &'static str {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "unknown" && !cfg!(feature = "release") => {
            static VERSION: OnceLock<String> = OnceLock::new();
            VERSION
                .get_or_init(|| format!("{} ({})", env!("CARGO_PKG_VERSION"), sha))
                .as_str()
        }
        _ => env!("CARGO_PKG_VERSION"),
    }
}

#[derive(Parser)]
#[command(name = "docview")]
#[command(about = "[ docview ] - bounded, revocable previews for uploaded documents")]
#[command(
    long_about = "docview - preview documents through a bounded LRU cache of revocable references.

Each previewed document gets a display reference (a blob: or file:// URL with
viewer settings such as #toolbar=0&navpanes=0 appended). At most
[cache].max_size previews stay alive; the least recently used one is revoked
when the cache is full.

QUICK START:
    docview preview cv.pdf transcript.pdf     Preview documents in the current directory
    docview preview --dir uploads a.pdf b.pdf a.pdf --capacity 1
    docview config show                       Show the effective configuration"
)]
#[command(version = version())]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview documents through the cache and report what it holds
    #[command(long_about = "Fetch each document, store it in the preview cache and print its
display reference. Ids are processed in order; repeating an id that is still
cached is served from the cache. References are revoked when docview exits.

EXAMPLES:
    docview preview cv.pdf
    docview preview --dir ./uploads a.pdf b.pdf a.pdf c.pdf --capacity 2
    docview preview --storage spool --json cv.pdf")]
    Preview(PreviewArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Document ids, relative to --dir
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Directory containing the documents (default: current directory)
    #[arg(long, short)]
    pub dir: Option<PathBuf>,

    /// Override [cache].max_size
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Override [storage].backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageBackend>,

    /// Seconds to wait for each document
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Open configuration in editor
    Edit,
}
