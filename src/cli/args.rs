//! CLI argument parsing.
//!
//! Hand-rolled so that parsing is testable from any iterator of strings.

use std::path::PathBuf;

/// Default number of runs for `verify`.
pub const DEFAULT_VERIFY_RUNS: usize = 3;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Overrides shared by `run` and `random`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Configuration YAML; defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Seed override.
    pub seed: Option<u64>,
    /// Cycle count override.
    pub cycles: Option<u64>,
    /// Step budget per tick override.
    pub budget: Option<usize>,
    /// Print the final result as JSON instead of progress lines.
    pub json: bool,
    /// Debug-level logging.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Solve an instance file.
    Run {
        /// Path to the instance YAML file.
        instance_path: PathBuf,
        /// Overrides.
        options: RunOptions,
    },
    /// Solve a randomly generated instance.
    Random {
        /// Number of cities (clamped to 1..=100).
        cities: usize,
        /// Overrides.
        options: RunOptions,
    },
    /// Check that repeated runs with one seed end in the same state.
    Verify {
        /// Path to the instance YAML file.
        instance_path: PathBuf,
        /// Configuration YAML.
        config_path: Option<PathBuf>,
        /// Number of runs to compare.
        runs: usize,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether debug logging was requested.
    #[must_use]
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Run { options, .. } | Command::Random { options, .. } => options.verbose,
            _ => false,
        }
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "random" => Self::parse_random_command(args),
            "verify" => Self::parse_verify_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires an instance path");
            return Command::Help;
        }

        Command::Run {
            instance_path: PathBuf::from(&args[2]),
            options: Self::parse_options(&args[3..]),
        }
    }

    fn parse_random_command(args: &[String]) -> Command {
        let Some(cities) = args.get(2).and_then(|n| n.parse().ok()) else {
            eprintln!("Error: 'random' command requires a city count");
            return Command::Help;
        };

        Command::Random {
            cities,
            options: Self::parse_options(&args[3..]),
        }
    }

    fn parse_verify_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'verify' command requires an instance path");
            return Command::Help;
        }

        let mut runs = DEFAULT_VERIFY_RUNS;
        let mut config_path = None;
        let mut i = 3;
        while i < args.len() {
            match (args[i].as_str(), args.get(i + 1)) {
                ("--runs", Some(value)) => {
                    if let Ok(n) = value.parse() {
                        runs = n;
                    }
                    i += 2;
                }
                ("--config", Some(value)) => {
                    config_path = Some(PathBuf::from(value));
                    i += 2;
                }
                _ => i += 1,
            }
        }

        Command::Verify {
            instance_path: PathBuf::from(&args[2]),
            config_path,
            runs,
        }
    }

    /// Parse trailing flags. Unknown flags and unparsable values are skipped.
    fn parse_options(args: &[String]) -> RunOptions {
        let mut options = RunOptions::default();
        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match (args[i].as_str(), value) {
                ("--config", Some(v)) => {
                    options.config_path = Some(PathBuf::from(v));
                    i += 2;
                }
                ("--seed", Some(v)) => {
                    options.seed = v.parse().ok().or(options.seed);
                    i += 2;
                }
                ("--cycles", Some(v)) => {
                    options.cycles = v.parse().ok().or(options.cycles);
                    i += 2;
                }
                ("--budget", Some(v)) => {
                    options.budget = v.parse().ok().or(options.budget);
                    i += 2;
                }
                ("--json", _) => {
                    options.json = true;
                    i += 1;
                }
                ("-v" | "--verbose", _) => {
                    options.verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        options
    }
}
