use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use svn_bridge::commands::*;
use svn_bridge::core::{
    classify::ErrorKind,
    error::{Result, SvnBridgeError},
    print_error, BridgeConfig, ResolvePolicy, SvnClient,
};

#[derive(Parser)]
#[command(name = "svn-bridge")]
#[command(about = "Background SVN status synchronization engine with a lean CLI")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Working copy root (defaults to the current directory)
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show working copy status
    Status {
        /// Include a server round-trip (out-of-date and lock info)
        #[arg(short = 'u', long)]
        remote: bool,
        /// Limit the query to these paths
        paths: Vec<String>,
    },
    /// Bring paths up to date from the server
    Update { paths: Vec<String> },
    /// Commit paths
    Commit {
        /// Log message
        #[arg(short, long)]
        message: Option<String>,
        paths: Vec<String>,
    },
    /// Schedule unversioned paths for addition
    Add { paths: Vec<String> },
    /// Discard local modifications
    Revert { paths: Vec<String> },
    /// Schedule paths for deletion
    Delete {
        /// Delete even when locally modified
        #[arg(long)]
        force: bool,
        paths: Vec<String>,
    },
    /// Acquire repository locks
    Lock {
        /// Steal an existing lock
        #[arg(long)]
        steal: bool,
        paths: Vec<String>,
    },
    /// Release repository locks
    Unlock { paths: Vec<String> },
    /// Move paths into or out of a changelist
    Changelist {
        /// Remove from the current changelist instead of adding
        #[arg(long)]
        remove: bool,
        /// Changelist name (with --remove, all positionals are paths)
        #[arg(required_unless_present = "remove")]
        name: Option<String>,
        paths: Vec<String>,
    },
    /// Check out a repository URL
    Checkout { url: String, directory: String },
    /// Move an asset, keeping history
    Move { from: String, to: String },
    /// Resolve conflicted paths
    Resolve {
        /// Which side wins
        #[arg(long, value_enum, default_value_t = AcceptChoice::Ours)]
        accept: AcceptChoice,
        paths: Vec<String>,
    },
    /// Release stale working-copy locks
    Cleanup,
    /// Run the engine and print status events until Enter is pressed
    Watch { paths: Vec<String> },
}

#[derive(Clone, Copy, ValueEnum)]
enum AcceptChoice {
    Ours,
    Theirs,
    Ignore,
}

impl From<AcceptChoice> for ResolvePolicy {
    fn from(choice: AcceptChoice) -> Self {
        match choice {
            AcceptChoice::Ours => ResolvePolicy::Ours,
            AcceptChoice::Theirs => ResolvePolicy::Theirs,
            AcceptChoice::Ignore => ResolvePolicy::Ignore,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let working_copy = cli
        .path
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let client = Arc::new(SvnClient::new(BridgeConfig::for_working_copy(&working_copy)));
    client.start();

    if let Err(e) = dispatch(&client, cli.command) {
        report_error(&e);
        std::process::exit(1);
    }
}

fn dispatch(client: &Arc<SvnClient>, command: Commands) -> Result<()> {
    match command {
        Commands::Status { remote, paths } => execute_status(client, paths, remote),
        Commands::Update { paths } => execute_update(client, paths),
        Commands::Commit { message, paths } => execute_commit(client, paths, message),
        Commands::Add { paths } => execute_add(client, paths),
        Commands::Revert { paths } => execute_revert(client, paths),
        Commands::Delete { force, paths } => execute_delete(client, paths, force),
        Commands::Lock { steal, paths } => execute_lock(client, paths, steal),
        Commands::Unlock { paths } => execute_unlock(client, paths),
        Commands::Changelist {
            remove,
            name,
            paths,
        } => {
            // With --remove there is no name; the first positional is a path.
            let (name, paths) = if remove {
                (None, name.into_iter().chain(paths).collect())
            } else {
                (name, paths)
            };
            execute_changelist(client, name, remove, paths)
        }
        Commands::Checkout { url, directory } => execute_checkout(client, url, directory),
        Commands::Move { from, to } => execute_move(client, from, to),
        Commands::Resolve { accept, paths } => execute_resolve(client, paths, accept.into()),
        Commands::Cleanup => execute_cleanup(client),
        Commands::Watch { paths } => execute_watch(Arc::clone(client), paths),
    }
}

/// Surface the failure with a hint matched to its classified kind.
fn report_error(error: &SvnBridgeError) {
    match error {
        SvnBridgeError::LaunchFailed { program, .. } => {
            print_error(&format!(
                "Could not run '{program}'. Install the Subversion client or point \
                 svn-bridge at it in the settings file."
            ));
        }
        SvnBridgeError::CommandFailed { kind, stderr } => {
            let hint = match kind {
                ErrorKind::LocalCopyLocked => "\nRun 'svn-bridge cleanup' and try again.",
                ErrorKind::OutOfDate => "\nRun 'svn-bridge update' and try again.",
                ErrorKind::ConnectionTimeout => "\nCheck the server connection and retry.",
                _ => "",
            };
            print_error(&format!("{kind}: {}{hint}", stderr.trim()));
        }
        other => print_error(&other.to_string()),
    }
}
