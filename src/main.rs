use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ghproj::app::{
    parse_project_number, requested_number, run_delete, run_item_list, DeleteOpts, ItemListOpts,
    OutputFormat, Streams,
};
use ghproj::config::{Config, DEFAULT_LOG_FILTER};
use ghproj::data::{LoginRef, LIMIT_DEFAULT};
use ghproj::services::{GithubClient, NoPrompt, ProjectError, Prompter, ProjectsClient};
use ghproj::utils::term;
use ghproj::view::TerminalPrompter;

/// Work with GitHub Projects from the command line
#[derive(Parser)]
#[command(name = "ghproj", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete a project
    Delete {
        /// Number of the project
        #[arg(value_parser = parse_number)]
        number: Option<u32>,

        /// Login of the owner. Use "@me" for the current user
        #[arg(long)]
        login: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the items in a project
    #[command(name = "item-list")]
    ItemList {
        /// Number of the project
        #[arg(value_parser = parse_number)]
        number: Option<u32>,

        /// Login of the owner. Use "@me" for the current user
        #[arg(long)]
        login: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Maximum number of items to fetch
        #[arg(short = 'L', long, default_value_t = LIMIT_DEFAULT)]
        limit: usize,
    },
}

fn parse_number(arg: &str) -> Result<u32, String> {
    parse_project_number(arg).map_err(|err| err.to_string())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ProjectError>() {
                Some(ProjectError::NoResults(message)) => eprintln!("{message}"),
                _ => eprintln!("error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let streams = Streams {
        is_tty: term::stdout_is_tty(),
        can_prompt: term::can_prompt(config.prompt_disabled),
        width: term::terminal_width(),
    };

    let executor = GithubClient::new(config.token()?)?;
    let prompter: Box<dyn Prompter> = if streams.can_prompt {
        Box::new(TerminalPrompter)
    } else {
        Box::new(NoPrompt)
    };
    let client = ProjectsClient::new(executor, prompter);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Delete {
            number,
            login,
            format,
        } => {
            let opts = DeleteOpts {
                login: LoginRef::parse(login.as_deref().unwrap_or_default()),
                number: requested_number(number),
                format,
            };
            run_delete(&client, &opts, streams, &mut stdout)
        }
        Commands::ItemList {
            number,
            login,
            format,
            limit,
        } => {
            let opts = ItemListOpts {
                login: LoginRef::parse(login.as_deref().unwrap_or_default()),
                number: requested_number(number),
                limit,
                format,
            };
            run_item_list(&client, &opts, streams, &mut stdout)
        }
    }
}
