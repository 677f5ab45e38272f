use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::api::Command;
use crate::model::CommandRef;

/// Produces a fresh instance of a command.
pub type CommandFactory = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// No command is available under the requested name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no command is available under '{0}'.")]
pub struct NotFound(pub CommandRef);

/// Behaviour to resolve a loadable name into a [`CommandFactory`].
pub trait CommandLoader {
    /// Resolve `name`.
    fn load(&self, name: &CommandRef) -> Result<CommandFactory, NotFound>;
}

/// An explicit name to [`CommandFactory`] registry; the default [`CommandLoader`].
///
/// ### Example
/// ```
/// # use phrasecmd_builder as phrasecmd;
/// use phrasecmd::{Catalog, Command, CommandError, CommandLoader, CommandRef, Describe, OptionValues};
///
/// #[derive(Default)]
/// struct Noop;
/// impl Describe for Noop {
///     fn qualified_name(&self) -> &'static str {
///         "demo::Noop"
///     }
/// }
/// impl Command for Noop {
///     fn run(&mut self, _: &OptionValues) -> Result<(), CommandError> {
///         Ok(())
///     }
/// }
///
/// let catalog = Catalog::new()
///     .register::<Noop>()
///     .insert("other.Name", || Box::new(Noop));
///
/// assert!(catalog.load(&CommandRef::new("demo.Noop")).is_ok());
/// assert!(catalog.load(&CommandRef::new("other::Name")).is_ok());
/// assert!(catalog.load(&CommandRef::new("Noop")).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Catalog {
    factories: HashMap<CommandRef, CommandFactory>,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("names", &self.names())
            .finish()
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `factory` available under `name`.
    /// If repeated for the same `name`, only the final factory applies.
    pub fn insert(
        mut self,
        name: impl Into<CommandRef>,
        factory: impl Fn() -> Box<dyn Command> + Send + Sync + 'static,
    ) -> Self {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Make `C` available under its [`qualified_name`](crate::Describe::qualified_name).
    pub fn register<C: Command + Default + 'static>(self) -> Self {
        let name = C::default().qualified_name();
        self.insert(name, || Box::new(C::default()))
    }

    /// Make `C` available under `name`, in addition to any other names.
    pub fn alias<C: Command + Default + 'static>(self, name: impl Into<CommandRef>) -> Self {
        self.insert(name, || Box::new(C::default()))
    }

    /// The available names, sorted.
    pub fn names(&self) -> Vec<&CommandRef> {
        let mut names: Vec<&CommandRef> = self.factories.keys().collect();
        names.sort();
        names
    }

    /// The number of available names.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no names are available.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl CommandLoader for Catalog {
    fn load(&self, name: &CommandRef) -> Result<CommandFactory, NotFound> {
        self.factories
            .get(name)
            .cloned()
            .ok_or_else(|| NotFound(name.clone()))
    }
}

impl<L: CommandLoader + ?Sized> CommandLoader for Box<L> {
    fn load(&self, name: &CommandRef) -> Result<CommandFactory, NotFound> {
        (**self).load(name)
    }
}

impl<L: CommandLoader + ?Sized> CommandLoader for &L {
    fn load(&self, name: &CommandRef) -> Result<CommandFactory, NotFound> {
        (**self).load(name)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use crate::api::{Catalog, Command, CommandError, Describe, OptionParser, OptionValues};
    use clap::Arg;

    /// A configurable command for exercising registries and tools.
    pub(crate) struct Recorder {
        pub(crate) name: &'static str,
        pub(crate) description: Option<&'static str>,
    }

    impl Describe for Recorder {
        fn qualified_name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> Option<&str> {
            self.description
        }
    }

    impl Command for Recorder {
        fn add_arguments(&self, parser: OptionParser) -> OptionParser {
            parser.arg(Arg::new("name").long("name").default_value("you"))
        }

        fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
            match values.get_one::<String>("name").map(String::as_str) {
                Some("nobody") => Err(CommandError::failed("nobody to greet.")),
                _ => Ok(()),
            }
        }
    }

    /// A catalog of [`Recorder`]s under the given `(name, description)` pairs.
    pub(crate) fn recorders(entries: &[(&'static str, Option<&'static str>)]) -> Catalog {
        entries
            .iter()
            .fold(Catalog::new(), |catalog, &(name, description)| {
                catalog.insert(name, move || {
                    Box::new(Recorder { name, description }) as Box<dyn Command>
                })
            })
    }

    /// The greeting catalog used throughout the tests.
    pub(crate) fn greetings() -> Catalog {
        recorders(&[
            ("greet.HelloCommand", Some("Says hello")),
            ("greet.GoodbyeCommand", Some("Says goodbye")),
            ("greet.SayCommand", Some("Says anything")),
            ("greet.Quiet", None),
        ])
    }
}
