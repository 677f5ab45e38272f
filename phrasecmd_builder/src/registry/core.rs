use thiserror::Error;

use crate::api::CommandLoader;
use crate::model::{CommandRef, MatchPolicy, Phrase};
use crate::registry::{PhraseEntry, PhraseNode};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The phrase registry could not be built, or is corrupt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The phrase is already registered.
    #[error("phrase '{phrase}' is already bound to '{existing}'.")]
    DuplicatePhrase {
        /// The phrase being registered.
        phrase: Phrase,
        /// The command the phrase is already bound to.
        existing: CommandRef,
    },
    /// The command reference could not be loaded.
    #[error("cannot load command '{command}' for phrase '{phrase}'.")]
    UnresolvableCommand {
        /// The phrase being registered.
        phrase: Phrase,
        /// The reference that failed to load.
        command: CommandRef,
    },
    /// An internal node has neither a command nor continuations.
    #[error("malformed registry: '{prefix}' has neither a command nor continuations.")]
    MalformedRegistry {
        /// The words leading to the broken node.
        prefix: String,
    },
}

/// A possible continuation of a partial phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The next word.
    pub token: String,
    /// The description of the phrase ending at `token`, if it is registered.
    pub description: Option<String>,
    /// Every registered phrase reachable through `token`.
    pub entries: Vec<PhraseEntry>,
}

/// The outcome of matching tokens against a [`PhraseRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseMatch {
    /// A registered phrase was matched.
    Resolved {
        /// The matched phrase.
        phrase: Phrase,
        /// The command bound to `phrase`.
        command: CommandRef,
        /// The tokens after `phrase`, for the command's own option parser.
        remaining: Vec<String>,
    },
    /// The tokens ran out part way into a phrase.
    Incomplete {
        /// The tokens matched so far.
        consumed: Vec<String>,
        /// The possible next words.
        candidates: Vec<Candidate>,
    },
    /// A token does not continue any phrase.
    NoMatch {
        /// The tokens matched before `unmatched`.
        consumed: Vec<String>,
        /// The first token which did not match.
        unmatched: String,
        /// The possible next words, in place of `unmatched`.
        candidates: Vec<Candidate>,
    },
}

/// Builds a [`PhraseRegistry`], resolving every command as it is registered.
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::{Catalog, Command, CommandError, Describe, OptionValues, Phrase, PhraseMatch, RegistryBuilder};
///
/// #[derive(Default)]
/// struct Hello;
/// impl Describe for Hello {
///     fn qualified_name(&self) -> &'static str {
///         "greet::Hello"
///     }
/// }
/// impl Command for Hello {
///     fn run(&mut self, _: &OptionValues) -> Result<(), CommandError> {
///         Ok(())
///     }
/// }
///
/// let catalog = Catalog::new().register::<Hello>();
/// let mut builder = RegistryBuilder::new(&catalog);
/// builder.register(Phrase::parse("say hello").unwrap(), "greet.Hello").unwrap();
/// let registry = builder.build();
///
/// assert!(matches!(
///     registry.match_tokens(&["say", "hello", "--name", "Bob"]).unwrap(),
///     PhraseMatch::Resolved { remaining, .. } if remaining == vec!["--name", "Bob"]
/// ));
/// ```
pub struct RegistryBuilder<'l> {
    loader: &'l dyn CommandLoader,
    policy: MatchPolicy,
    root: PhraseNode,
    order: Vec<Phrase>,
}

impl<'l> RegistryBuilder<'l> {
    /// Create an empty builder, loading commands through `loader`.
    pub fn new(loader: &'l dyn CommandLoader) -> Self {
        Self {
            loader,
            policy: MatchPolicy::default(),
            root: PhraseNode::root(),
            order: Vec::default(),
        }
    }

    /// Set the [`MatchPolicy`] of the built registry.
    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bind `phrase` to `command`.
    ///
    /// The command is loaded immediately, to verify it and to copy its description.
    /// On error, the registry is left unchanged.
    pub fn register(
        &mut self,
        phrase: Phrase,
        command: impl Into<CommandRef>,
    ) -> Result<(), RegistryError> {
        let command = command.into();

        if let Some(existing) = self.root.find(phrase.tokens()).and_then(PhraseNode::binding) {
            return Err(RegistryError::DuplicatePhrase {
                phrase,
                existing: existing.command.clone(),
            });
        }

        let factory = match self.loader.load(&command) {
            Ok(factory) => factory,
            Err(_) => {
                return Err(RegistryError::UnresolvableCommand { phrase, command });
            }
        };
        let description = factory().description().map(str::to_string);

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registering '{phrase}' to '{command}'.");
        }

        self.root.find_or_insert(phrase.tokens()).bind(PhraseEntry {
            phrase: phrase.clone(),
            command,
            description,
        });
        self.order.push(phrase);
        Ok(())
    }

    /// Freeze the registry.
    pub fn build(self) -> PhraseRegistry {
        PhraseRegistry {
            policy: self.policy,
            root: self.root,
            order: self.order,
        }
    }
}

/// The immutable dispatch tree of registered phrases.
#[derive(Debug)]
pub struct PhraseRegistry {
    policy: MatchPolicy,
    root: PhraseNode,
    order: Vec<Phrase>,
}

impl PhraseRegistry {
    /// The [`MatchPolicy`] used by [`PhraseRegistry::match_tokens`].
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The root of the dispatch tree.
    pub fn root(&self) -> &PhraseNode {
        &self.root
    }

    /// The number of registered phrases.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no phrases are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Match the leading `tokens` against the registered phrases.
    ///
    /// Only whole tokens are compared.
    /// Fails only when the tree itself is malformed.
    pub fn match_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<PhraseMatch, RegistryError> {
        let mut node = &self.root;
        let mut depth = 0;
        let mut fallback: Option<(&PhraseEntry, usize)> = None;

        let outcome = loop {
            if node.is_dead_end() {
                return Err(RegistryError::MalformedRegistry {
                    prefix: join(&tokens[..depth]),
                });
            }

            if let Some(entry) = node.binding() {
                match self.policy {
                    MatchPolicy::FirstBound => break resolved(entry, tokens, depth),
                    MatchPolicy::Longest => fallback = Some((entry, depth)),
                }
            }

            match tokens.get(depth) {
                Some(token) => match node.child(token.as_ref()) {
                    Some(child) => {
                        node = child;
                        depth += 1;
                    }
                    None => {
                        break match fallback {
                            Some((entry, at)) => resolved(entry, tokens, at),
                            None => PhraseMatch::NoMatch {
                                consumed: owned(&tokens[..depth]),
                                unmatched: token.as_ref().to_string(),
                                candidates: candidates_of(node),
                            },
                        };
                    }
                },
                None => {
                    break match fallback {
                        Some((entry, at)) => resolved(entry, tokens, at),
                        None => PhraseMatch::Incomplete {
                            consumed: owned(&tokens[..depth]),
                            candidates: candidates_of(node),
                        },
                    };
                }
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Matched {:?} under {}: {outcome:?}.", owned(tokens), self.policy);
        }

        Ok(outcome)
    }

    /// The registered phrases, in registration order.
    ///
    /// Each call walks the tree afresh.
    pub fn list_phrases(&self) -> Phrases<'_> {
        Phrases {
            registry: self,
            index: 0,
        }
    }

    /// The possible continuations of `prefix`, or `None` if `prefix` is not part of any phrase.
    pub fn candidates<S: AsRef<str>>(&self, prefix: &[S]) -> Option<Vec<Candidate>> {
        self.root.find(prefix).map(candidates_of)
    }
}

/// Lazy iterator over the entries of a [`PhraseRegistry`]; see [`PhraseRegistry::list_phrases`].
#[derive(Debug, Clone)]
pub struct Phrases<'r> {
    registry: &'r PhraseRegistry,
    index: usize,
}

impl<'r> Iterator for Phrases<'r> {
    type Item = &'r PhraseEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(phrase) = self.registry.order.get(self.index) {
            self.index += 1;

            if let Some(entry) = self
                .registry
                .root
                .find(phrase.tokens())
                .and_then(PhraseNode::binding)
            {
                return Some(entry);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.registry.order.len() - self.index))
    }
}

fn resolved<S: AsRef<str>>(entry: &PhraseEntry, tokens: &[S], depth: usize) -> PhraseMatch {
    PhraseMatch::Resolved {
        phrase: entry.phrase.clone(),
        command: entry.command.clone(),
        remaining: owned(&tokens[depth..]),
    }
}

fn candidates_of(node: &PhraseNode) -> Vec<Candidate> {
    node.children()
        .iter()
        .filter_map(|child| {
            child.token().map(|token| Candidate {
                token: token.to_string(),
                description: child.description().map(str::to_string),
                entries: child.entries().into_iter().cloned().collect(),
            })
        })
        .collect()
}

fn owned<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|t| t.as_ref().to_string()).collect()
}

fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    owned(tokens).join(" ")
}
