use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::PagerWriter;
use twig::errors::{TwigError, as_twig_error};

const LOG_ENV_VAR: &str = "TWIG_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "Twig tracks snapshots of a working directory as commits, \
    with a staging area, named branches and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: Option<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the files of HEAD with the staged changes applied as a new commit."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "rm", about = "Unstage a file or stage its removal")]
    Rm {
        #[arg(index = 1)]
        file: Option<String>,
    },
    #[command(name = "log", about = "Show the first-parent history of HEAD")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: Option<String>,
    },
    #[command(name = "status", about = "Show branches, staged files and working directory changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from HEAD, \
        checkout <commit> -- <file> restores it from a commit, \
        checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A commit id or a branch name")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: Option<String>,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: Option<String>,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: Option<String>,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: Option<String>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match as_twig_error(&err) {
                Some(twig_error) => {
                    tracing::debug!(kind = ?twig_error.kind(), "command aborted");
                    println!("{twig_error}");
                }
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(command: &Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let pwd = pwd.to_string_lossy();

    match command {
        Commands::Init { path } => {
            let path = path.as_deref().unwrap_or(&pwd);
            Repository::new(path, stdout())?.init()
        }
        Commands::Add { file } => Repository::open(&pwd, stdout())?.add(operand(file)?),
        Commands::Commit { message } => {
            let mut repository = Repository::open(&pwd, stdout())?;
            repository.commit(message.as_deref().unwrap_or_default())
        }
        Commands::Rm { file } => Repository::open(&pwd, stdout())?.rm(operand(file)?),
        Commands::Log => with_pager(|writer| Repository::open(&pwd, writer)?.log()),
        Commands::GlobalLog => {
            with_pager(|writer| Repository::open(&pwd, writer)?.global_log())
        }
        Commands::Find { message } => Repository::open(&pwd, stdout())?.find(operand(message)?),
        Commands::Status => Repository::open(&pwd, stdout())?.status(),
        Commands::Checkout { target, file } => {
            let mut repository = Repository::open(&pwd, stdout())?;
            match (target.as_deref(), file.as_deref()) {
                (revision, Some(file)) => repository.checkout_file(revision, file),
                (Some(branch), None) => repository.checkout_branch(branch),
                (None, None) => Err(TwigError::IncorrectOperands.into()),
            }
        }
        Commands::Branch { name } => Repository::open(&pwd, stdout())?.branch(operand(name)?),
        Commands::RmBranch { name } => {
            Repository::open(&pwd, stdout())?.rm_branch(operand(name)?)
        }
        Commands::Reset { commit } => Repository::open(&pwd, stdout())?.reset(operand(commit)?),
        Commands::Merge { branch } => {
            let mut repository = Repository::open(&pwd, stdout())?;
            repository.merge(operand(branch)?)?;
            Ok(())
        }
    }
}

fn operand(value: &Option<String>) -> anyhow::Result<&str> {
    value
        .as_deref()
        .ok_or_else(|| TwigError::IncorrectOperands.into())
}

fn stdout() -> Box<dyn Write> {
    Box::new(std::io::stdout())
}

/// Route a report through the pager when stdout is a terminal and
/// `NO_PAGER` is unset.
fn with_pager<F>(report: F) -> anyhow::Result<()>
where
    F: FnOnce(Box<dyn Write>) -> anyhow::Result<()>,
{
    if std::env::var_os("NO_PAGER").is_some() || !std::io::stdout().is_terminal() {
        return report(stdout());
    }

    let pager = Pager::new();
    report(Box::new(PagerWriter::new(pager.clone())))?;
    minus::page_all(pager)?;

    Ok(())
}
