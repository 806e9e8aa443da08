use anyhow::Result;
use clap::{Parser, Subcommand};
use minus::Pager;
use std::path::PathBuf;
use trove::areas::repository::Repository;
use trove::artifacts::core::{PagerWriter, should_page, stdout_is_terminal};
use trove::artifacts::diff::snapshot_diff::DiffFilter;
use trove::commands::plumbing::cat_file::CatFileMode;
use trove::commands::porcelain::log::LogOptions;
use trove::config::Config;

#[derive(Parser)]
#[command(
    name = "trove",
    version = "0.1.0",
    about = "A minimal version-control core",
    long_about = "trove stores file snapshots in a content-addressable object store, \
    links them into a single-parent commit history, and tracks branches with a \
    symbolic HEAD.",
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
    #[command(
        name = "add",
        about = "Add files to the staging area",
        long_about = "This command stages files or whole directories for the next commit. \
        Paths listed in .trove/ignore are skipped."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to add")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the staging area with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create or list branches",
        long_about = "With a name, this command creates a branch at the current branch's tip. \
        Without one, it lists all branches and marks the current one."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to another branch",
        long_about = "This command points HEAD at an existing branch. Working-tree files are not touched."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command shows the history of the current branch, newest commit first."
    )]
    Log {
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
        #[arg(long = "abbrev-commit", help = "Show abbreviated commit digests")]
        abbrev_commit: bool,
        #[arg(long, help = "Show the branches pointing at each commit")]
        decorate: bool,
    },
    #[command(
        name = "diff",
        about = "Show the files that differ between two revisions",
        long_about = "This command compares the snapshots of two revisions and reports \
        each path as added, removed or modified."
    )]
    Diff {
        #[arg(index = 1, help = "The old revision")]
        old: String,
        #[arg(index = 2, help = "The new revision")]
        new: String,
        #[arg(
            long = "diff-filter",
            value_parser = parse_diff_filter,
            help = "Only show changes of the given kinds (A, D, M)"
        )]
        diff_filter: Option<DiffFilter>,
    },
    #[command(
        name = "clone",
        about = "Copy the repository to a new directory",
        long_about = "This command copies the working tree and all repository state to a new directory."
    )]
    Clone {
        #[arg(index = 1, help = "The destination directory")]
        destination: PathBuf,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file and can write it to the object database. \
        It requires the path to the file to be specified."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content or type of an object",
        long_about = "This command prints the content (-p) or type (-t) of an object in the repository.",
        group(
            clap::ArgGroup::new("mode")
                .required(true)
                .args(["pretty", "show_type"])
        )
    )]
    CatFile {
        #[arg(short = 'p', help = "Print the object's content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's type")]
        show_type: bool,
        #[arg(index = 1, help = "A digest, digest prefix or revision")]
        object: String,
    },
}

fn parse_diff_filter(value: &str) -> Result<DiffFilter, String> {
    DiffFilter::try_parse(value).ok_or_else(|| format!("invalid diff filter: {value}"))
}

fn open_repository(writer: Box<dyn std::io::Write>, config: Config) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Ok(Repository::open(&pwd, writer)?.with_config(config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from_env()?;

    trove::telemetry::init(config.log_filter());
    if !stdout_is_terminal() {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => PathBuf::from(path),
                None => std::env::current_dir()?,
            };
            let mut repository =
                Repository::new(&path, Box::new(std::io::stdout()))?.with_config(config);

            repository.init().await?
        }
        Commands::Add { paths } => {
            let mut repository = open_repository(Box::new(std::io::stdout()), config)?;

            let report = repository.add(paths).await?;
            if !report.is_success() {
                for path in &report.missing {
                    eprintln!("error: {} does not exist", path.display());
                }
                std::process::exit(1);
            }
        }
        Commands::Commit { message } => {
            let mut repository = open_repository(Box::new(std::io::stdout()), config)?;

            repository.commit(message).await?;
        }
        Commands::Branch { name } => {
            let mut repository = open_repository(Box::new(std::io::stdout()), config)?;

            repository.branch(name.as_deref())?
        }
        Commands::Checkout { branch } => {
            let mut repository = open_repository(Box::new(std::io::stdout()), config)?;

            repository.checkout(branch)?
        }
        Commands::Log {
            oneline,
            abbrev_commit,
            decorate,
        } => {
            let opts = LogOptions {
                oneline: *oneline,
                abbrev_commit: *abbrev_commit,
                decorate: *decorate,
            };

            if should_page(&config) {
                let pager = Pager::new();
                let repository =
                    open_repository(Box::new(PagerWriter::new(pager.clone())), config)?;

                repository.log(&opts)?;
                minus::page_all(pager)?;
            } else {
                let repository = open_repository(Box::new(std::io::stdout()), config)?;

                repository.log(&opts)?
            }
        }
        Commands::Diff {
            old,
            new,
            diff_filter,
        } => {
            let repository = open_repository(Box::new(std::io::stdout()), config)?;

            repository.diff(old, new, diff_filter.unwrap_or(DiffFilter::all()))?;
        }
        Commands::Clone { destination } => {
            let repository = open_repository(Box::new(std::io::stdout()), config)?;

            repository.clone_to(destination)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = open_repository(Box::new(std::io::stdout()), config)?;

            repository.hash_object(file, *write)?;
        }
        Commands::CatFile {
            pretty,
            show_type,
            object,
        } => {
            let mut repository = open_repository(Box::new(std::io::stdout()), config)?;
            let mode = match (*pretty, *show_type) {
                (true, _) => CatFileMode::Pretty,
                (_, true) => CatFileMode::Type,
                _ => anyhow::bail!("cat-file needs either -p or -t"),
            };

            repository.cat_file(object, mode)?
        }
    }

    Ok(())
}
