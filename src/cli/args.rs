//! CLI argument parsing.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Evaluate every scenario in a file
    Run {
        /// Path to the scenario YAML file.
        path: PathBuf,
        /// Emit a JSON array of snapshots instead of the text dump.
        json: bool,
        /// Enable debug logging.
        verbose: bool,
    },
    /// Check a scenario file without evaluating it
    Validate {
        /// Path to the scenario YAML file.
        path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name, as with `std::env::args()`.
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
    pub const fn verbose(&self) -> bool {
        matches!(self.command, Command::Run { verbose: true, .. })
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "validate" => Self::parse_validate_command(args),
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
        let mut path = None;
        let mut json = false;
        let mut verbose = false;

        for arg in &args[2..] {
            match arg.as_str() {
                "--json" => json = true,
                "-v" | "--verbose" => verbose = true,
                flag if flag.starts_with('-') => {
                    eprintln!("Warning: ignoring unknown option '{flag}'");
                }
                other if path.is_none() => path = Some(PathBuf::from(other)),
                extra => eprintln!("Warning: ignoring extra argument '{extra}'"),
            }
        }

        match path {
            Some(path) => Command::Run {
                path,
                json,
                verbose,
            },
            None => {
                eprintln!("Error: 'run' command requires a scenario file");
                Command::Help
            }
        }
    }

    fn parse_validate_command(args: &[String]) -> Command {
        match args.get(2) {
            Some(path) => Command::Validate {
                path: PathBuf::from(path),
            },
            None => {
                eprintln!("Error: 'validate' command requires a scenario file");
                Command::Help
            }
        }
    }
}
