use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::api::CommandLoader;
use crate::model::{CommandRef, MatchPolicy, Phrase, PhraseError};
use crate::registry::{PhraseRegistry, RegistryBuilder, RegistryError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

mod yaml;

/// A tool specification could not be read.
#[derive(Debug, Error)]
pub enum SpecError {
    /// The document is not valid Yaml, or does not have the expected shape.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    /// The document could not be read.
    #[error("cannot read '{path}': {source}.")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying failure.
        source: std::io::Error,
    },
    /// The document is not a mapping of phrases.
    #[error("invalid tool specification: {0}.")]
    InvalidDocument(String),
    /// One entry of the document is invalid.
    #[error("invalid entry '{entry}': {reason}.")]
    InvalidEntry {
        /// The entry, as written.
        entry: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The words of an entry do not form a phrase.
    #[error("invalid phrase '{text}': {source}")]
    InvalidPhrase {
        /// The phrase, as written.
        text: String,
        /// The underlying failure.
        source: PhraseError,
    },
    /// The same phrase is bound to different commands.
    #[error("phrase '{phrase}' is bound to both '{first}' and '{second}'.")]
    Ambiguous {
        /// The repeated phrase.
        phrase: Phrase,
        /// The command bound first.
        first: CommandRef,
        /// The conflicting command.
        second: CommandRef,
    },
    /// An `!include` was used without a file to resolve it against.
    #[error("cannot include '{0}' from a document which was not loaded from a file.")]
    IncludeUnavailable(String),
    /// An `!include` leads back to a file which is already being read.
    #[error("cannot include '{}': it is already being included.", .path.display())]
    IncludeCycle {
        /// The file included a second time.
        path: PathBuf,
    },
}

/// One `phrase → command` binding of a [`ToolSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntry {
    /// The command phrase.
    pub phrase: Phrase,
    /// The loadable name of the command.
    pub command: CommandRef,
}

/// An ordered list of phrase bindings, ready to be [registered](ToolSpec::build_registry).
///
/// Built from in-process pairs, or from a Yaml document in one of two forms.
///
/// The *list* form binds each phrase explicitly.
/// The optional `default` namespace applies to references without a `.`.
/// ```yaml
/// default: greet.commands
/// phrases:
///   - [say, hello, HelloCommand]
///   - [say goodbye, other.GoodbyeCommand]
///   - phrase: say anything
///     class: SayCommand
/// ```
///
/// The *nested* form builds phrases from the keys of nested mappings.
/// `_package` places the references of its mapping (and any nested mappings) under a namespace; nested `_package` values extend it.
/// Other keys starting with `_` are ignored.
/// A value tagged `!include <file>` reads a nested mapping from `file`, relative to the including document.
/// ```yaml
/// _package: greet.commands
/// _title: Greetings
/// say:
///   hello: HelloCommand
///   goodbye: GoodbyeCommand
/// ```
///
/// In both forms, an entry repeated identically is kept once, while a phrase bound to two different references is [`SpecError::Ambiguous`].
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::ToolSpec;
///
/// let spec = ToolSpec::from_yaml("
/// default: pkg.commands
/// phrases:
///   - [say, hello, HelloCommand]
/// ").unwrap();
///
/// assert_eq!(spec.entries()[0].phrase.to_string(), "say hello");
/// assert_eq!(spec.entries()[0].command.as_str(), "pkg.commands.HelloCommand");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSpec {
    entries: Vec<SpecEntry>,
}

impl ToolSpec {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a specification from `(phrase, command)` pairs, splitting each phrase on whitespace.
    ///
    /// Pairs are kept exactly as given; a repeated phrase is reported when the registry is built.
    pub fn from_pairs<I, P, C>(pairs: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: Into<CommandRef>,
    {
        let mut spec = Self::new();

        for (phrase, command) in pairs {
            let phrase = parse_phrase(phrase.as_ref())?;
            spec.push(phrase, command);
        }

        Ok(spec)
    }

    /// Read a specification from Yaml `text`.
    ///
    /// `!include` is unavailable; see [`ToolSpec::from_yaml_path`].
    pub fn from_yaml(text: &str) -> Result<Self, SpecError> {
        let spec = yaml::read(text, None)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Read {} phrases from text.", spec.len());
        }

        Ok(spec)
    }

    /// Read a specification from the Yaml file at `path`.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let text = read_file(path)?;
        let spec = yaml::read(&text, Some(path))?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Read {} phrases from '{}'.", spec.len(), path.display());
        }

        Ok(spec)
    }

    /// Append a binding.
    pub fn push(&mut self, phrase: Phrase, command: impl Into<CommandRef>) {
        self.entries.push(SpecEntry {
            phrase,
            command: command.into(),
        });
    }

    /// Append a binding, unless the same binding is already present.
    pub(crate) fn merge(&mut self, phrase: Phrase, command: CommandRef) -> Result<(), SpecError> {
        match self.entries.iter().find(|entry| entry.phrase == phrase) {
            Some(existing) if existing.command == command => Ok(()),
            Some(existing) => Err(SpecError::Ambiguous {
                phrase,
                first: existing.command.clone(),
                second: command,
            }),
            None => {
                self.push(phrase, command);
                Ok(())
            }
        }
    }

    /// The bindings, in order.
    pub fn entries(&self) -> &[SpecEntry] {
        &self.entries
    }

    /// The number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register every binding, in order, stopping at the first error.
    pub fn build_registry(
        &self,
        loader: &dyn CommandLoader,
        policy: MatchPolicy,
    ) -> Result<PhraseRegistry, RegistryError> {
        let mut builder = RegistryBuilder::new(loader).policy(policy);

        for entry in &self.entries {
            builder.register(entry.phrase.clone(), entry.command.clone())?;
        }

        Ok(builder.build())
    }
}

impl IntoIterator for ToolSpec {
    type Item = SpecEntry;
    type IntoIter = std::vec::IntoIter<SpecEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

pub(crate) fn parse_phrase(text: &str) -> Result<Phrase, SpecError> {
    Phrase::parse(text).map_err(|source| SpecError::InvalidPhrase {
        text: text.to_string(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, SpecError> {
    std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test::greetings;
    use crate::registry::PhraseMatch;

    fn pairs(spec: &ToolSpec) -> Vec<(String, String)> {
        spec.entries()
            .iter()
            .map(|e| (e.phrase.to_string(), e.command.to_string()))
            .collect()
    }

    #[test]
    fn from_pairs() {
        // Execute
        let spec = ToolSpec::from_pairs([
            ("say hello", "greet.HelloCommand"),
            ("say  goodbye ", "greet::GoodbyeCommand"),
        ])
        .unwrap();

        // Verify
        assert_eq!(
            pairs(&spec),
            vec![
                ("say hello".to_string(), "greet.HelloCommand".to_string()),
                ("say goodbye".to_string(), "greet.GoodbyeCommand".to_string()),
            ]
        );
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn from_pairs_keeps_repeats() {
        let spec = ToolSpec::from_pairs([
            ("say hello", "greet.HelloCommand"),
            ("say hello", "greet.HelloCommand"),
        ])
        .unwrap();

        assert_eq!(spec.len(), 2);
        assert_matches!(
            spec.build_registry(&greetings(), MatchPolicy::default()),
            Err(RegistryError::DuplicatePhrase { .. })
        );
    }

    #[test]
    fn from_pairs_invalid_phrase() {
        let error = ToolSpec::from_pairs([("  ", "greet.HelloCommand")]).unwrap_err();

        assert_matches!(
            error,
            SpecError::InvalidPhrase { source: PhraseError::Empty, .. }
        );
    }

    #[test]
    fn merge() {
        // Setup
        let mut spec = ToolSpec::new();
        let phrase = Phrase::parse("first command").unwrap();
        spec.merge(phrase.clone(), CommandRef::new("testing.impl")).unwrap();

        // Execute
        spec.merge(phrase.clone(), CommandRef::new("testing.impl")).unwrap();
        let error = spec
            .merge(phrase.clone(), CommandRef::new("testing.other"))
            .unwrap_err();

        // Verify
        assert_eq!(spec.len(), 1);
        assert_matches!(error, SpecError::Ambiguous { phrase: p, first, second } => {
            assert_eq!(p, phrase);
            assert_eq!(first.as_str(), "testing.impl");
            assert_eq!(second.as_str(), "testing.other");
        });
    }

    #[test]
    fn build_registry() {
        // Setup
        let spec = ToolSpec::from_pairs([
            ("say hello", "greet.HelloCommand"),
            ("say goodbye", "greet.GoodbyeCommand"),
        ])
        .unwrap();

        // Execute
        let registry = spec
            .build_registry(&greetings(), MatchPolicy::FirstBound)
            .unwrap();

        // Verify
        assert_eq!(registry.len(), 2);
        assert_matches!(
            registry.match_tokens(&["say", "goodbye"]).unwrap(),
            PhraseMatch::Resolved { command, .. } if command.as_str() == "greet.GoodbyeCommand"
        );
    }

    #[test]
    fn build_registry_aborts() {
        let spec = ToolSpec::from_pairs([
            ("say hello", "greet.HelloCommand"),
            ("say hi", "greet.HiCommand"),
            ("say goodbye", "greet.GoodbyeCommand"),
        ])
        .unwrap();

        let error = spec
            .build_registry(&greetings(), MatchPolicy::FirstBound)
            .unwrap_err();

        assert_matches!(
            error,
            RegistryError::UnresolvableCommand { phrase, command }
                if phrase.to_string() == "say hi" && command.as_str() == "greet.HiCommand"
        );
    }

    #[test]
    fn from_yaml_path_missing() {
        let error = ToolSpec::from_yaml_path("/definitely/not/here.yaml").unwrap_err();

        assert_matches!(error, SpecError::Io { .. });
        crate::test::assert_contains!(error.to_string(), "/definitely/not/here.yaml");
    }
}
