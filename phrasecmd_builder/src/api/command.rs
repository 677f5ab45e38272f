use std::env;

use thiserror::Error;

use crate::api::{build_parser, Arguments, ArgumentBuilders, SetupError};
use crate::console::{ConsoleInterface, UserInterface};
use crate::model::CommandRef;

/// The option parser a command registers its options/arguments against.
pub type OptionParser = clap::Command;

/// The parsed values handed to [`Command::run`].
pub type OptionValues = clap::ArgMatches;

/// Describes a command without running it.
///
/// Every method has a default, so an empty `impl Describe for MyCommand {}` is valid.
/// Typically this is derived: `#[derive(Describe)]`.
pub trait Describe {
    /// The loadable name of the command (ex: `greet::HelloCommand`).
    ///
    /// Defaults to [`std::any::type_name`].
    fn qualified_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Short description, shown in command listings and at the top of the command's help.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Text shown at the end of the command's help.
    fn epilog(&self) -> Option<&str> {
        None
    }

    /// Replacement for the generated usage line.
    fn usage(&self) -> Option<&str> {
        None
    }

    /// The names of the shared argument builders to apply, in order.
    /// Each name must be available from [`Command::builders`].
    fn arguments(&self) -> Arguments {
        Arguments::default()
    }
}

/// A unit of work bound to a phrase.
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::clap::Arg;
/// use phrasecmd::{parse_args, Command, CommandError, Describe, OptionParser, OptionValues};
///
/// #[derive(Default)]
/// struct HelloCommand {
///     greeted: Option<String>,
/// }
///
/// impl Describe for HelloCommand {
///     fn description(&self) -> Option<&str> {
///         Some("Says hello")
///     }
/// }
///
/// impl Command for HelloCommand {
///     fn add_arguments(&self, parser: OptionParser) -> OptionParser {
///         parser.arg(Arg::new("name").long("name").default_value("you"))
///     }
///
///     fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
///         self.greeted = values.get_one::<String>("name").cloned();
///         Ok(())
///     }
/// }
///
/// let command = HelloCommand::default();
/// let values = parse_args(&command, &["--name", "Bob"]).unwrap();
/// assert_eq!(values.get_one::<String>("name").unwrap(), "Bob");
/// ```
pub trait Command: Describe {
    /// The argument builders this command may declare via [`Describe::arguments`].
    fn builders(&self) -> ArgumentBuilders {
        ArgumentBuilders::default()
    }

    /// Add command specific options/arguments.
    /// Runs after the declared argument builders.
    fn add_arguments(&self, parser: OptionParser) -> OptionParser {
        parser
    }

    /// Validate the parsed values before [`Command::run`].
    fn check_arguments(&self, values: &OptionValues) -> Result<(), CommandError> {
        let _ = values;
        Ok(())
    }

    /// Execute the command.
    fn run(&mut self, values: &OptionValues) -> Result<(), CommandError>;
}

/// Ways for a [`Command`] to stop short of success.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Show this help text, then exit with `0`.
    #[error("{0}")]
    HelpNeeded(String),
    /// Report this message, then exit with `1`.
    #[error("{0}")]
    Failed(String),
    /// Exit with this status, without a message.
    #[error("exit status {0}.")]
    Exit(i32),
}

impl CommandError {
    /// Convenience for [`CommandError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed(message.into())
    }

    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::HelpNeeded(_) => 0,
            CommandError::Failed(_) => 1,
            CommandError::Exit(code) => *code,
        }
    }
}

/// The command's options could not be set up or parsed.
#[derive(Debug, Error)]
pub enum ArgumentError {
    /// See [`SetupError`].
    #[error(transparent)]
    Setup(#[from] SetupError),
    /// The option parser rejected the tokens (or was asked for help).
    #[error(transparent)]
    Parse(#[from] clap::Error),
}

/// Set up the option parser for `command` and parse `tokens` with it, without running the command.
///
/// The program name used in messages is the final segment of [`Describe::qualified_name`].
pub fn parse_args(command: &dyn Command, tokens: &[&str]) -> Result<OptionValues, ArgumentError> {
    let program = short_name(command.qualified_name());
    let parser = build_parser(command, program.clone())?;
    let values = parser
        .try_get_matches_from(std::iter::once(program.as_str()).chain(tokens.iter().copied()))?;
    Ok(values)
}

/// Run a single command against the input tokens, outside of a [`Tool`](crate::Tool).
///
/// Returns `Err(0)` when help was displayed, and `Err(code)` for any failure (after reporting it).
pub fn execute(command: &mut dyn Command, program: &str, tokens: &[&str]) -> Result<(), i32> {
    invoke(command, program, tokens, &ConsoleInterface::default())
}

/// Run a single command against the Cli [`env::args`].
///
/// If the command does not succeed, exits with its status code (via [`std::process::exit`]).
pub fn main(mut command: impl Command) {
    let mut args = env::args();
    let program = args
        .next()
        .map(|argv0| program_name(&argv0))
        .unwrap_or_else(|| short_name(command.qualified_name()));
    let tokens: Vec<String> = args.collect();

    if let Err(exit_code) = execute(
        &mut command,
        &program,
        tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .as_slice(),
    ) {
        std::process::exit(exit_code);
    }
}

pub(crate) fn invoke(
    command: &mut dyn Command,
    program: &str,
    tokens: &[&str],
    user_interface: &(impl UserInterface + ?Sized),
) -> Result<(), i32> {
    let parser = match build_parser(command, program) {
        Ok(parser) => parser,
        Err(error) => {
            user_interface.print_error(error.to_string());
            return Err(1);
        }
    };

    let values = match parser
        .try_get_matches_from(std::iter::once(program).chain(tokens.iter().copied()))
    {
        Ok(values) => values,
        Err(error) => {
            let rendered = error.render().to_string();
            let rendered = rendered.trim_end().to_string();

            return if error.use_stderr() {
                user_interface.print_error(rendered);
                Err(error.exit_code())
            } else {
                user_interface.print(rendered);
                Err(0)
            };
        }
    };

    match command
        .check_arguments(&values)
        .and_then(|_| command.run(&values))
    {
        Ok(()) => Ok(()),
        Err(CommandError::HelpNeeded(help)) => {
            user_interface.print(help);
            Err(0)
        }
        Err(error @ CommandError::Failed(_)) => {
            user_interface.print_error(error.to_string());
            Err(error.exit_code())
        }
        Err(error @ CommandError::Exit(_)) => Err(error.exit_code()),
    }
}

fn short_name(qualified_name: &str) -> String {
    let name = CommandRef::new(qualified_name);
    let last = name.as_str().rsplit('.').next().unwrap_or(qualified_name);
    last.to_string()
}

fn program_name(argv0: &str) -> String {
    std::path::Path::new(argv0)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| argv0.to_string())
}
