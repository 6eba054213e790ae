// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod config;
mod logging;
mod reveal;

use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use clap::{error::ErrorKind, ArgAction, ArgGroup, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Generator, Shell};
use serde_json::{json, Value};
use sorteiaki_core::{
    resolve_config_path, resolve_results_dir, ConfigPathScope, ErrorCode, ExitCode, MachineError,
};
use sorteiaki_model::EngagementType;

pub use config::{ConfigError, FileConfig, ProviderSection, RaffleSection};

pub const CRATE_NAME: &str = "sorteiaki-cli";

const SORTEIAKI_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "sorteiaki")]
#[command(about = "Fair, verifiable social-media raffles")]
#[command(help_template = SORTEIAKI_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  SORTEIAKI_CONFIG         Config file override\n  SORTEIAKI_ACCESS_TOKEN   Provider access token\n  SORTEIAKI_LOG_LEVEL      Log verbosity override\n  SORTEIAKI_LOG_JSON       Emit logs as JSON"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true, default_value_t = false)]
    trace: bool,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a raffle and print the result record.
    Draw {
        #[command(subcommand)]
        source: DrawSource,
    },
    Media {
        #[command(subcommand)]
        command: MediaCommand,
    },
    /// Dry run of the eligibility filters over a participant file.
    Filter {
        #[arg(long)]
        participants: PathBuf,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Recompute the verification token of a stored result.
    Verify {
        #[arg(long)]
        result: PathBuf,
    },
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
    Version,
}

#[derive(Subcommand)]
enum DrawSource {
    /// One name per line, from a file or `-` for stdin.
    Manual {
        #[arg(long)]
        names: PathBuf,
        #[command(flatten)]
        draw: DrawArgs,
    },
    Fixture {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        media: String,
        #[command(flatten)]
        draw: DrawArgs,
    },
    Graph {
        #[arg(long)]
        media: String,
        #[command(flatten)]
        draw: DrawArgs,
    },
    Demo {
        #[arg(long, default_value = sorteiaki_provider::DEMO_MEDIA_ID)]
        media: String,
        #[command(flatten)]
        draw: DrawArgs,
    },
}

#[derive(Subcommand)]
enum MediaCommand {
    #[command(group(ArgGroup::new("backend").required(true).args(["root", "graph", "demo"])))]
    List {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        graph: bool,
        #[arg(long, default_value_t = false)]
        demo: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngagementCli {
    Comments,
    Likes,
}

impl From<EngagementCli> for EngagementType {
    fn from(value: EngagementCli) -> Self {
        match value {
            EngagementCli::Comments => Self::Comments,
            EngagementCli::Likes => Self::Likes,
        }
    }
}

/// Flags layered over the `[raffle]` config section.
#[derive(Args, Clone, Debug, Default)]
struct SettingsArgs {
    #[arg(long)]
    winners: Option<u32>,
    #[arg(long, value_enum)]
    engagement: Option<EngagementCli>,
    #[arg(long)]
    min_mentions: Option<u32>,
    #[arg(long)]
    keyword: Option<String>,
    #[arg(long, default_value_t = false)]
    allow_duplicates: bool,
}

#[derive(Args, Clone, Debug)]
struct DrawArgs {
    #[command(flatten)]
    settings: SettingsArgs,
    /// Countdown ticks before the reveal; 0 reveals at once.
    #[arg(long)]
    countdown: Option<u8>,
    /// Write the result record here, plus a `.sha256` digest beside it.
    #[arg(long, conflicts_with = "save")]
    out: Option<PathBuf>,
    /// Write the result record into the results directory as `<run id>.json`.
    #[arg(long, default_value_t = false)]
    save: bool,
}

#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
}

struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn new(code: ErrorCode, message: impl Display) -> Self {
        Self {
            exit_code: code.exit_code(),
            machine: MachineError::new(code, &message.to_string()),
        }
    }

    fn with_detail(mut self, key: &str, value: impl Display) -> Self {
        self.machine = self.machine.with_detail(key, &value.to_string());
        self
    }

    fn usage(message: impl Display) -> Self {
        Self::new(ErrorCode::UsageError, message)
    }

    fn validation(message: impl Display) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    fn internal(message: impl Display) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    fn provider(err: sorteiaki_provider::ProviderError) -> Self {
        Self::new(err.code(), &err)
    }

    fn config(err: ConfigError) -> Self {
        let path = err.path.as_ref().map(|p| p.display().to_string());
        let out = Self::new(ErrorCode::ConfigError, &err);
        match path {
            Some(path) => out.with_detail("path", path),
            None => out,
        }
    }
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError::usage("invalid command line arguments")
                    .with_detail("error", err.to_string().trim_end()));
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    if cli.print_config_paths {
        return emit_config_paths(output_mode);
    }

    let command = cli
        .command
        .ok_or_else(|| CliError::usage("missing command; see --help"))?;
    logging::init_tracing(logging::LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
    });
    let presentation = reveal::Presentation {
        animate: !cli.json && !cli.quiet,
    };

    match command {
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
        Commands::Version => emit_version(output_mode),
        Commands::Draw { source } => commands::run_draw(source, output_mode, presentation),
        Commands::Media { command } => match command {
            MediaCommand::List { root, graph, demo } => {
                commands::run_media_list(root, graph, demo, output_mode)
            }
        },
        Commands::Filter {
            participants,
            settings,
        } => commands::run_filter(&participants, &settings, output_mode),
        Commands::Verify { result } => commands::run_verify(&result, output_mode),
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

fn emit_version(output_mode: OutputMode) -> Result<(), CliError> {
    if output_mode.json {
        emit_ok(
            output_mode,
            &json!({"name": "sorteiaki", "version": env!("CARGO_PKG_VERSION")}),
        )
    } else {
        println!("sorteiaki {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}

fn emit_config_paths(output_mode: OutputMode) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        &json!({
            "workspace_config": resolve_config_path(ConfigPathScope::Workspace),
            "user_config": resolve_config_path(ConfigPathScope::User),
            "results_dir": resolve_results_dir(),
        }),
    )
}

fn emit_ok(output_mode: OutputMode, payload: &Value) -> Result<(), CliError> {
    let text = if output_mode.json {
        serde_json::to_string(payload)
    } else {
        serde_json::to_string_pretty(payload)
    }
    .map_err(CliError::internal)?;
    println!("{text}");
    Ok(())
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
        for (key, value) in &error.machine.details {
            eprintln!("  {key}: {value}");
        }
    }
}
