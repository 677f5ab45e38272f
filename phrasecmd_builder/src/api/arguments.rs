use thiserror::Error;

use crate::api::{Command, OptionParser};
use crate::constant::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The ordered names of the argument builders a command applies to its [`OptionParser`].
///
/// Declared via a single comma separated string, or any ordered collection of names.
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::Arguments;
///
/// assert_eq!(Arguments::from("name, verbose"), Arguments::from(["name", "verbose"]));
/// assert_eq!(Arguments::from(" , name,,"), Arguments::from(vec!["name"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments(Vec<String>);

impl Arguments {
    /// The declared names, in declaration order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Whether no argument builders are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Arguments {
    fn from(value: &str) -> Self {
        value.split(ARGUMENTS_SEPARATOR).collect()
    }
}

impl From<String> for Arguments {
    fn from(value: String) -> Self {
        Arguments::from(value.as_str())
    }
}

impl<S: Into<String>> From<Vec<S>> for Arguments {
    fn from(value: Vec<S>) -> Self {
        value.into_iter().collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Arguments {
    fn from(value: [S; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Arguments {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

type BuilderFn = dyn Fn(OptionParser) -> OptionParser;

/// An explicit table of named argument builders.
///
/// Each builder adds any number of options/arguments to an [`OptionParser`].
/// A command's own builders take precedence over [inherited](ArgumentBuilders::inherit) ones.
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::{clap::Arg, ArgumentBuilders};
///
/// let shared = ArgumentBuilders::default()
///     .with("name", |p| p.arg(Arg::new("name").long("name").default_value("you")));
/// let builders = ArgumentBuilders::default()
///     .with("loud", |p| p.arg(Arg::new("loud").long("loud")))
///     .inherit(shared);
///
/// assert_eq!(builders.names(), vec!["loud", "name"]);
/// ```
#[derive(Default)]
pub struct ArgumentBuilders {
    own: Vec<(String, Box<BuilderFn>)>,
    inherited: Vec<(String, Box<BuilderFn>)>,
}

impl std::fmt::Debug for ArgumentBuilders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgumentBuilders")
            .field("names", &self.names())
            .finish()
    }
}

impl ArgumentBuilders {
    /// Add a builder under `name`.
    /// If repeated for the same `name`, only the first builder applies.
    pub fn with(
        mut self,
        name: impl Into<String>,
        builder: impl Fn(OptionParser) -> OptionParser + 'static,
    ) -> Self {
        self.own.push((name.into(), Box::new(builder)));
        self
    }

    /// Fall back to the builders of `table`, for any name this table does not define itself.
    pub fn inherit(mut self, table: ArgumentBuilders) -> Self {
        let ArgumentBuilders { own, inherited } = table;
        self.inherited.extend(own);
        self.inherited.extend(inherited);
        self
    }

    /// Find the builder for `name`.
    pub fn get(&self, name: &str) -> Option<&BuilderFn> {
        self.own
            .iter()
            .chain(self.inherited.iter())
            .find(|(n, _)| n == name)
            .map(|(_, builder)| builder.as_ref())
    }

    /// The available builder names, in lookup order, without repeats.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::default();

        for (name, _) in self.own.iter().chain(self.inherited.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }

        names
    }
}

/// A command's option parser could not be set up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// A declared argument name has no matching builder.
    #[error("command '{command}' has no argument builder '{builder}'.")]
    UnknownArgumentBuilder {
        /// The builder that was looked up (ex: `arg_name`).
        builder: String,
        /// The qualified name of the command.
        command: String,
    },
}

/// Build the option parser for `command`.
///
/// The parser is documented from [`Describe`](crate::Describe), then the declared [`Arguments`] are applied in order, then [`Command::add_arguments`].
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::{build_parser, Command, CommandError, Describe, OptionValues};
///
/// struct Noop;
/// impl Describe for Noop {}
/// impl Command for Noop {
///     fn run(&mut self, _: &OptionValues) -> Result<(), CommandError> {
///         Ok(())
///     }
/// }
///
/// let parser = build_parser(&Noop, "noop").unwrap();
/// assert_eq!(parser.get_name(), "noop");
/// ```
pub fn build_parser(
    command: &dyn Command,
    program: impl Into<String>,
) -> Result<OptionParser, SetupError> {
    let program = program.into();
    let mut parser = OptionParser::new(program.clone()).bin_name(program);

    if let Some(description) = command.description() {
        parser = parser.about(description.to_string());
    }

    if let Some(epilog) = command.epilog() {
        parser = parser.after_help(epilog.to_string());
    }

    if let Some(usage) = command.usage() {
        parser = parser.override_usage(usage.to_string());
    }

    let arguments = command.arguments();

    if !arguments.is_empty() {
        let builders = command.builders();

        for name in arguments.names() {
            let builder = builders
                .get(name)
                .ok_or_else(|| SetupError::UnknownArgumentBuilder {
                    builder: format!("{ARGUMENT_BUILDER_PREFIX}{name}"),
                    command: command.qualified_name().to_string(),
                })?;

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Applying argument builder '{name}' for '{}'.", command.qualified_name());
            }

            parser = builder(parser);
        }
    }

    Ok(command.add_arguments(parser))
}
