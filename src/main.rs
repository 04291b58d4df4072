mod app;
mod command;
mod config;
mod consts;
mod game;
mod options;
mod util;
use crate::app::App;
use crate::config::{Config, LogConfig};
use crate::options::{difficulty_list, Difficulty, Options, Players};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// Parsed command-line invocation
#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

/// Command-line settings that override the configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    players: Option<Players>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                Arg::Short('p') | Arg::Long("players") => {
                    args.players = Some(parser.value()?.parse()?);
                }
                Arg::Short('d') | Arg::Long("difficulty") => {
                    args.difficulty = Some(parser.value()?.parse()?);
                }
                Arg::Short('s') | Arg::Long("seed") => {
                    args.seed = Some(parser.value()?.parse()?);
                }
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

impl Arguments {
    /// Override `options` with any settings given on the command line
    fn apply(&self, mut options: Options) -> Options {
        if let Some(players) = self.players {
            options.players = players;
        }
        if let Some(difficulty) = self.difficulty {
            options.difficulty = difficulty;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        options
    }

    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::load(&Config::default_path()?, true),
        }
        .context("failed to load configuration")?;
        if let Err(e) = init_logging(&config.log) {
            eprintln!("twinsnake: warning: logging disabled: {e:#}");
        }
        let options = self.apply(config.options());
        let summary = App::new(options).run()?;
        log::info!("{}", summary.outcome);
        println!("{summary}");
        Ok(())
    }
}

/// Send log messages to the configured log file
fn init_logging(cfg: &LogConfig) -> anyhow::Result<()> {
    if cfg.level == log::LevelFilter::Off {
        return Ok(());
    }
    let path = cfg
        .file()
        .context("failed to determine path to local data directory")?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&*path)?;
    WriteLogger::init(cfg.level, simplelog::Config::default(), file)?;
    Ok(())
}

fn usage() -> String {
    format!(
        concat!(
            "Usage: twinsnake [OPTIONS]\n",
            "\n",
            "One- or two-player Snake with obstacles\n",
            "\n",
            "Options:\n",
            "  -p, --players <1|2>          Number of players\n",
            "  -d, --difficulty <LABEL>     Difficulty: {}\n",
            "  -s, --seed <N>               Seed for obstacle placement\n",
            "  -c, --config <PATH>          Read configuration from the given file\n",
            "  -h, --help                   Show this help and exit\n",
            "  -V, --version                Show the program version and exit\n",
            "\n",
            "Player 1 turns with the left & right arrow keys; player 2 with q & s.\n",
            "Press p to pause and n to quit.",
        ),
        difficulty_list()
    )
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(Cli::Run(args)) => exit(args.run()),
        Ok(Cli::Help) => {
            println!("{}", usage());
            ExitCode::SUCCESS
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("twinsnake: {e}");
            ExitCode::from(2)
        }
    }
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("twinsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|ioe| ioe.kind() == ErrorKind::BrokenPipe)
}
