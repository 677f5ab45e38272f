use std::env;
use std::path::Path;

use thiserror::Error;

use crate::api::{invoke, CommandLoader};
use crate::console::{ConsoleInterface, Listing, UserInterface};
use crate::constant::*;
use crate::document::{SpecError, ToolSpec};
use crate::model::{CommandRef, MatchPolicy, Phrase, PhraseError};
use crate::registry::{Candidate, PhraseEntry, PhraseMatch, PhraseRegistry, RegistryError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A [`Tool`] could not be built.
#[derive(Debug, Error)]
pub enum LoadError {
    /// See [`SpecError`].
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// See [`RegistryError`].
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// See [`PhraseError`].
    #[error(transparent)]
    Phrase(#[from] PhraseError),
}

/// Builder for a [`Tool`].
///
/// Phrases are collected in order, then registered (and their commands loaded) at build time.
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::{Catalog, Command, CommandError, Describe, OptionValues, ToolBuilder};
///
/// #[derive(Default)]
/// struct Hello;
/// impl Describe for Hello {
///     fn qualified_name(&self) -> &'static str {
///         "greet::Hello"
///     }
///     fn description(&self) -> Option<&str> {
///         Some("Says hello")
///     }
/// }
/// impl Command for Hello {
///     fn run(&mut self, _: &OptionValues) -> Result<(), CommandError> {
///         Ok(())
///     }
/// }
///
/// let tool = ToolBuilder::new("greeter", Catalog::new().register::<Hello>())
///     .phrase("say hello", "greet.Hello")
///     .build();
///
/// assert_eq!(tool.dispatch(&["say", "hello"]), Ok(()));
/// ```
pub struct ToolBuilder {
    program: String,
    loader: Box<dyn CommandLoader>,
    policy: MatchPolicy,
    spec: ToolSpec,
    deferred_error: Option<LoadError>,
}

impl ToolBuilder {
    /// Create a tool builder for `program`, loading commands through `loader`.
    pub fn new(program: impl Into<String>, loader: impl CommandLoader + 'static) -> Self {
        Self {
            program: program.into(),
            loader: Box::new(loader),
            policy: MatchPolicy::default(),
            spec: ToolSpec::new(),
            deferred_error: None,
        }
    }

    /// Set the [`MatchPolicy`] for dispatch.
    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bind the whitespace separated `phrase` to `command`.
    ///
    /// An invalid `phrase` is reported at build time.
    pub fn phrase(mut self, phrase: &str, command: impl Into<CommandRef>) -> Self {
        match Phrase::parse(phrase) {
            Ok(phrase) => self.spec.push(phrase, command),
            Err(error) => {
                self.deferred_error.get_or_insert(LoadError::Phrase(error));
            }
        }

        self
    }

    /// Bind each `(phrase, command)` pair, in order.
    pub fn phrases<I, P, C>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<CommandRef>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (phrase, command)| {
                builder.phrase(phrase.as_ref(), command)
            })
    }

    /// Bind every entry of `spec`, in order.
    pub fn spec(mut self, spec: ToolSpec) -> Self {
        for entry in spec {
            self.spec.push(entry.phrase, entry.command);
        }

        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<Tool, LoadError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let registry = self.spec.build_registry(self.loader.as_ref(), self.policy)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Built '{}' with {} phrases.", self.program, registry.len());
        }

        Ok(Tool {
            program: self.program,
            registry,
            loader: self.loader,
            user_interface,
        })
    }

    /// Build the tool as a Result.
    /// This registers every phrase, loading its command, and checks for errors (ex: a repeated phrase).
    pub fn build_tool(self) -> Result<Tool, LoadError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the tool.
    /// This registers every phrase, loading its command, and checks for errors (ex: a repeated phrase).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> Tool {
        match self.build_tool() {
            Ok(tool) => tool,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

/// A command line tool which dispatches to commands by their phrase.
pub struct Tool {
    program: String,
    registry: PhraseRegistry,
    loader: Box<dyn CommandLoader>,
    user_interface: Box<dyn UserInterface>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("program", &self.program)
            .field("registry", &self.registry)
            .finish()
    }
}

impl Tool {
    /// Build a tool from `(phrase, command)` pairs.
    pub fn from_phrases<I, P, C>(
        program: impl Into<String>,
        loader: impl CommandLoader + 'static,
        pairs: I,
    ) -> Result<Tool, LoadError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<CommandRef>,
    {
        ToolBuilder::new(program, loader).phrases(pairs).build_tool()
    }

    /// Build a tool from a Yaml document; see [`ToolSpec`] for the accepted forms.
    pub fn from_yaml(
        program: impl Into<String>,
        loader: impl CommandLoader + 'static,
        text: &str,
    ) -> Result<Tool, LoadError> {
        let spec = ToolSpec::from_yaml(text)?;
        ToolBuilder::new(program, loader).spec(spec).build_tool()
    }

    /// Build a tool from a Yaml file; see [`ToolSpec`] for the accepted forms.
    pub fn from_yaml_path(
        program: impl Into<String>,
        loader: impl CommandLoader + 'static,
        path: impl AsRef<Path>,
    ) -> Result<Tool, LoadError> {
        let spec = ToolSpec::from_yaml_path(path)?;
        ToolBuilder::new(program, loader).spec(spec).build_tool()
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The registered phrases.
    pub fn registry(&self) -> &PhraseRegistry {
        &self.registry
    }

    /// The listing of every registered phrase.
    pub fn help(&self) -> String {
        listing(self.registry.list_phrases()).heading_and_rows(VALID_COMMANDS)
    }

    /// Dispatch the input tokens to the command of the matching phrase, and run it.
    ///
    /// Returns `Err(0)` when help was displayed, and `Err(code)` for any failure (after reporting it).
    pub fn dispatch(&self, tokens: &[&str]) -> Result<(), i32> {
        let user_interface = self.user_interface.as_ref();
        let outcome = match self.registry.match_tokens(tokens) {
            Ok(outcome) => outcome,
            Err(error) => {
                user_interface.print_error(error.to_string());
                return Err(1);
            }
        };

        match outcome {
            PhraseMatch::Resolved {
                phrase,
                command,
                remaining,
            } => {
                let factory = match self.loader.load(&command) {
                    Ok(factory) => factory,
                    Err(error) => {
                        user_interface.print_error(error.to_string());
                        return Err(1);
                    }
                };

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Dispatching '{phrase}' to '{command}' with {remaining:?}.");
                }

                let mut instance = factory();
                let program = format!("{} {phrase}", self.program);
                let remaining: Vec<&str> = remaining.iter().map(String::as_str).collect();
                invoke(instance.as_mut(), &program, &remaining, user_interface)
            }
            PhraseMatch::Incomplete {
                consumed,
                candidates,
            } => {
                let heading = if consumed.is_empty() {
                    format!("A command is required. {VALID_COMMANDS}")
                } else {
                    format!("Incomplete command '{}', could be one of:", consumed.join(" "))
                };
                candidate_listing(&candidates).print_error(heading, user_interface);
                Err(1)
            }
            PhraseMatch::NoMatch {
                consumed,
                unmatched,
                candidates,
            } => {
                if HELP_TOKENS.contains(&unmatched.as_str()) {
                    candidate_listing(&candidates).print(VALID_COMMANDS, user_interface);
                    return Err(0);
                }

                let mut attempted = consumed;
                attempted.push(unmatched);
                let heading = if candidates.is_empty() {
                    format!("Unknown command '{}'.", attempted.join(" "))
                } else {
                    format!(
                        "Unknown command '{}', could be one of:",
                        attempted.join(" ")
                    )
                };
                candidate_listing(&candidates).print_error(heading, user_interface);
                Err(1)
            }
        }
    }

    /// Dispatch the Cli [`env::args`].
    ///
    /// If the command does not succeed (or help is displayed), exits with its status code (via [`std::process::exit`]).
    pub fn main(&self) {
        let tokens: Vec<String> = env::args().skip(1).collect();

        if let Err(exit_code) = self.dispatch(
            tokens
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            std::process::exit(exit_code);
        }
    }
}

fn listing<'e>(entries: impl Iterator<Item = &'e PhraseEntry>) -> Listing {
    Listing::terminal(
        entries
            .map(|entry| {
                (
                    entry.phrase.to_string(),
                    entry.description.clone().unwrap_or_default(),
                )
            })
            .collect(),
    )
}

fn candidate_listing(candidates: &[Candidate]) -> Listing {
    listing(candidates.iter().flat_map(|c| c.entries.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test::greetings;
    use crate::console::util::{channel_interface, ReceiverInterface};
    use rstest::rstest;

    fn say_builder() -> ToolBuilder {
        ToolBuilder::new("program", greetings())
            .phrase("say hello", "greet.HelloCommand")
            .phrase("say goodbye", "greet.GoodbyeCommand")
            .phrase("quiet", "greet.Quiet")
    }

    fn build(builder: ToolBuilder) -> (Tool, ReceiverInterface) {
        let (sender, receiver) = channel_interface();
        let tool = builder.build_with_interface(Box::new(sender)).unwrap();
        (tool, receiver)
    }

    #[rstest]
    #[case(vec!["say", "hello"])]
    #[case(vec!["say", "hello", "--name", "Bob"])]
    #[case(vec!["say", "goodbye"])]
    #[case(vec!["quiet"])]
    fn dispatch_resolved(#[case] tokens: Vec<&str>) {
        // Setup
        let (tool, receiver) = build(say_builder());

        // Execute
        let result = tool.dispatch(tokens.as_slice());

        // Verify
        assert_eq!(result, Ok(()));
        assert_eq!(receiver.consume(), (None, None));
    }

    #[test]
    fn dispatch_command_failure() {
        // Setup
        let (tool, receiver) = build(say_builder());

        // Execute
        let exit_code = tool
            .dispatch(&["say", "hello", "--name", "nobody"])
            .unwrap_err();

        // Verify
        assert_eq!(exit_code, 1);
        assert_eq!(receiver.consume_error(), "nobody to greet.");
    }

    #[test]
    fn dispatch_parse_error() {
        let (tool, receiver) = build(say_builder());

        let exit_code = tool.dispatch(&["say", "hello", "--bogus"]).unwrap_err();

        assert_eq!(exit_code, 2);
        crate::test::assert_contains!(receiver.consume_error(), "--bogus");
    }

    #[test]
    fn dispatch_incomplete() {
        // Setup
        let (tool, receiver) = build(say_builder());

        // Execute
        let exit_code = tool.dispatch(&["say"]).unwrap_err();

        // Verify
        assert_eq!(exit_code, 1);
        let error = receiver.consume_error();
        crate::test::assert_contains!(error, "Incomplete command 'say', could be one of:");
        crate::test::assert_contains!(error, "say hello     Says hello");
        crate::test::assert_contains!(error, "say goodbye   Says goodbye");
        assert!(!error.contains("quiet"));
    }

    #[test]
    fn dispatch_nothing() {
        let (tool, receiver) = build(say_builder());

        let exit_code = tool.dispatch(&[]).unwrap_err();

        assert_eq!(exit_code, 1);
        let error = receiver.consume_error();
        crate::test::assert_contains!(error, "A command is required.");
        crate::test::assert_contains!(error, "say hello");
        crate::test::assert_contains!(error, "quiet");
    }

    #[rstest]
    #[case(vec!["shout"], "Unknown command 'shout', could be one of:")]
    #[case(vec!["say", "hi", "--name", "Bob"], "Unknown command 'say hi', could be one of:")]
    fn dispatch_no_match(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        // Setup
        let (tool, receiver) = build(say_builder());

        // Execute
        let exit_code = tool.dispatch(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(exit_code, 1);
        let error = receiver.consume_error();
        crate::test::assert_contains!(error, expected);
        crate::test::assert_contains!(error, "say goodbye");
    }

    #[rstest]
    #[case(vec!["help"], true)]
    #[case(vec!["-h"], true)]
    #[case(vec!["--help"], true)]
    #[case(vec!["say", "help"], false)]
    #[case(vec!["say", "--help", "--name", "Bob"], false)]
    fn dispatch_help_listing(#[case] tokens: Vec<&str>, #[case] lists_quiet: bool) {
        // Setup
        let (tool, receiver) = build(say_builder());

        // Execute
        let exit_code = tool.dispatch(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(exit_code, 0);
        let message = receiver.consume_message();
        crate::test::assert_contains!(message, "Valid commands:");
        crate::test::assert_contains!(message, "Says hello");
        assert_eq!(message.contains("quiet"), lists_quiet);
    }

    #[rstest]
    #[case(vec!["say", "hello", "--help"])]
    #[case(vec!["say", "hello", "-h"])]
    fn dispatch_command_help(#[case] tokens: Vec<&str>) {
        // Setup
        let (tool, receiver) = build(say_builder());

        // Execute
        let exit_code = tool.dispatch(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(exit_code, 0);
        let message = receiver.consume_message();
        crate::test::assert_contains!(message, "Says hello");
        crate::test::assert_contains!(message, "program say hello");
        crate::test::assert_contains!(message, "--name");
    }

    #[test]
    fn dispatch_longest() {
        // Setup
        let (tool, receiver) = build(
            ToolBuilder::new("program", greetings())
                .policy(MatchPolicy::Longest)
                .phrase("say", "greet.SayCommand")
                .phrase("say hello", "greet.HelloCommand"),
        );

        // Execute
        let result = tool.dispatch(&["say", "hello", "--name", "nobody"]);

        // Verify
        assert_eq!(result, Err(1));
        assert_eq!(receiver.consume_error(), "nobody to greet.");
        assert_eq!(tool.registry().policy(), MatchPolicy::Longest);
    }

    #[test]
    fn dispatch_first_bound() {
        let (tool, receiver) = build(
            ToolBuilder::new("program", greetings())
                .phrase("say", "greet.SayCommand")
                .phrase("say hello", "greet.HelloCommand"),
        );

        // `hello` reaches the option parser of `say`.
        let exit_code = tool.dispatch(&["say", "hello"]).unwrap_err();

        assert_eq!(exit_code, 2);
        crate::test::assert_contains!(receiver.consume_error(), "hello");
    }

    #[test]
    fn build_invalid_phrase() {
        let result = ToolBuilder::new("program", greetings())
            .phrase("say hello", "greet.HelloCommand")
            .phrase("   ", "greet.GoodbyeCommand")
            .phrase("", "greet.Quiet")
            .build_tool();

        assert_matches!(result, Err(LoadError::Phrase(PhraseError::Empty)));
    }

    #[test]
    fn build_unresolvable() {
        // Execute
        let error = ToolBuilder::new("program", greetings())
            .phrase("say hello", "greet.HelloCommand")
            .phrase("say hi", "greet.HiCommand")
            .build_tool()
            .unwrap_err();

        // Verify
        assert_matches!(
            error,
            LoadError::Registry(RegistryError::UnresolvableCommand { .. })
        );
        assert_eq!(
            error.to_string(),
            "cannot load command 'greet.HiCommand' for phrase 'say hi'."
        );
    }

    #[test]
    fn build_duplicate() {
        let result = ToolBuilder::new("program", greetings())
            .phrases([
                ("say hello", "greet.HelloCommand"),
                ("say  hello", "greet.GoodbyeCommand"),
            ])
            .build_tool();

        assert_matches!(
            result,
            Err(LoadError::Registry(RegistryError::DuplicatePhrase { .. }))
        );
    }

    #[test]
    fn from_phrases() {
        let tool = Tool::from_phrases(
            "program",
            greetings(),
            [("say hello", "greet.HelloCommand"), ("quiet", "greet.Quiet")],
        )
        .unwrap();

        assert_eq!(tool.program(), "program");
        assert_eq!(tool.registry().len(), 2);
    }

    #[test]
    fn from_yaml() {
        // Execute
        let tool = Tool::from_yaml(
            "program",
            greetings(),
            r#"
default: greet
phrases:
  - [say, hello, HelloCommand]
  - [say, goodbye, GoodbyeCommand]
"#,
        )
        .unwrap();

        // Verify
        let phrases: Vec<String> = tool
            .registry()
            .list_phrases()
            .map(|e| format!("{} {}", e.phrase, e.command))
            .collect();
        assert_eq!(
            phrases,
            vec![
                "say hello greet.HelloCommand",
                "say goodbye greet.GoodbyeCommand"
            ]
        );
    }

    #[test]
    fn from_yaml_invalid() {
        let error = Tool::from_yaml("program", greetings(), "hello: [a]\n").unwrap_err();

        assert_matches!(error, LoadError::Spec(SpecError::InvalidEntry { .. }));
    }

    #[test]
    fn from_yaml_path() {
        // Setup
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("tool.yaml");
        std::fs::write(
            &path,
            "_package: greet\nsay:\n  hello: HelloCommand\n  goodbye: GoodbyeCommand\n",
        )
        .unwrap();

        // Execute
        let tool = Tool::from_yaml_path("program", greetings(), &path).unwrap();

        // Verify
        assert_eq!(tool.registry().len(), 2);
        assert_matches!(
            tool.registry().match_tokens(&["say", "goodbye"]).unwrap(),
            PhraseMatch::Resolved { command, .. } if command.as_str() == "greet.GoodbyeCommand"
        );
    }

    #[test]
    fn help() {
        let (tool, _) = build(say_builder());

        let help = tool.help();

        assert!(help.starts_with("Valid commands:\n"));
        crate::test::assert_contains!(help, "say hello     Says hello");
        crate::test::assert_contains!(help, "say goodbye   Says goodbye");
        crate::test::assert_contains!(help, "  quiet");
    }
}
