use thiserror::Error;

/// An ordered, non-empty sequence of command words (ex: `say hello`).
///
/// Each token is non-empty and free of whitespace.
/// A `Phrase` is displayed as its tokens joined by a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase(Vec<String>);

/// A phrase could not be formed from the provided words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhraseError {
    /// No tokens were provided.
    #[error("a phrase must contain at least one word.")]
    Empty,
    /// A token was empty, or contained whitespace.
    #[error("phrase word '{0}' must be non-empty and free of whitespace.")]
    InvalidToken(String),
}

impl Phrase {
    /// Create a phrase from explicit tokens.
    ///
    /// ### Example
    /// ```
    /// # use phrasecmd_builder as phrasecmd;
    /// use phrasecmd::Phrase;
    ///
    /// let phrase = Phrase::new(["say", "hello"]).unwrap();
    /// assert_eq!(phrase.to_string(), "say hello");
    /// assert!(Phrase::new(["say hello"]).is_err());
    /// ```
    pub fn new<I, S>(tokens: I) -> Result<Self, PhraseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();

        if tokens.is_empty() {
            return Err(PhraseError::Empty);
        }

        if let Some(token) = tokens
            .iter()
            .find(|t| t.is_empty() || t.chars().any(char::is_whitespace))
        {
            return Err(PhraseError::InvalidToken(token.clone()));
        }

        Ok(Self(tokens))
    }

    /// Create a phrase by splitting `text` on whitespace.
    ///
    /// ### Example
    /// ```
    /// # use phrasecmd_builder as phrasecmd;
    /// use phrasecmd::Phrase;
    ///
    /// let phrase = Phrase::parse("  say   hello ").unwrap();
    /// assert_eq!(phrase.tokens(), &["say".to_string(), "hello".to_string()]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, PhraseError> {
        Self::new(text.split_whitespace())
    }

    /// The words of this phrase, in order.
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// The number of words in this phrase.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a phrase holds at least one word.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Produce the phrase `self` followed by the words of `suffix`.
    pub fn join(&self, suffix: &Phrase) -> Phrase {
        let mut tokens = self.0.clone();
        tokens.extend(suffix.0.iter().cloned());
        Phrase(tokens)
    }
}

impl std::fmt::Display for Phrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

impl std::str::FromStr for Phrase {
    type Err = PhraseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phrase::parse(s)
    }
}

/// The loadable name of a [`Command`](crate::Command) implementation.
///
/// Names are kept in dotted form (`greet.commands.HelloCommand`).
/// Rust style paths (`greet::commands::HelloCommand`) are normalized to the dotted form, so both spellings refer to the same command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandRef(String);

impl CommandRef {
    /// Create a command reference, normalizing `::` separators to `.`.
    ///
    /// ### Example
    /// ```
    /// # use phrasecmd_builder as phrasecmd;
    /// use phrasecmd::CommandRef;
    ///
    /// assert_eq!(
    ///     CommandRef::new("greet::HelloCommand"),
    ///     CommandRef::new("greet.HelloCommand"),
    /// );
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().replace("::", "."))
    }

    /// The dotted name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name already contains a namespace (at least one `.`).
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }

    /// Place this name under `namespace`, unless it is already qualified.
    ///
    /// ### Example
    /// ```
    /// # use phrasecmd_builder as phrasecmd;
    /// use phrasecmd::CommandRef;
    ///
    /// let default = "pkg.commands";
    /// assert_eq!(CommandRef::new("HelloCommand").qualify(default).as_str(), "pkg.commands.HelloCommand");
    /// assert_eq!(CommandRef::new("other.HelloCommand").qualify(default).as_str(), "other.HelloCommand");
    /// ```
    pub fn qualify(self, namespace: &str) -> Self {
        if self.is_qualified() {
            self
        } else {
            self.within(namespace)
        }
    }

    /// Place this name under `namespace`, regardless of its current qualification.
    pub fn within(self, namespace: &str) -> Self {
        let namespace = CommandRef::new(namespace);

        if namespace.0.is_empty() {
            self
        } else {
            Self(format!("{}.{}", namespace.0, self.0))
        }
    }
}

impl std::fmt::Display for CommandRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CommandRef {
    fn from(value: &str) -> Self {
        CommandRef::new(value)
    }
}

impl From<String> for CommandRef {
    fn from(value: String) -> Self {
        CommandRef::new(value)
    }
}

/// How a phrase is resolved when a bound phrase is also the prefix of longer phrases.
///
/// Given the phrases `say` and `say hello`, the tokens `say hello --loud` resolve as:
/// * `FirstBound`: `say` with remaining tokens `hello --loud`.
/// * `Longest`: `say hello` with remaining tokens `--loud`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Stop at the first bound phrase; every later token belongs to the command.
    #[default]
    FirstBound,
    /// Follow the tokens as deep as they match, falling back to the deepest bound phrase passed on the way.
    Longest,
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
