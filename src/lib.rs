//! `phrasecmd` builds command line tools out of multi-word command phrases.
//!
//! A tool is a set of phrases (ex: `say hello`, `say goodbye`), each bound to a command.
//! The leading Cli tokens select the command by its phrase, and the remaining tokens are parsed by that command's own option parser.
//! Options and arguments are defined via [`clap`], re-exported as [`phrasecmd::clap`](clap).
//!
//! `phrasecmd` concerns itself with the layer above the option parser:
//! * *Phrase dispatch*:
//! Phrases form a tree of words; dispatch walks the tree and reports incomplete or unknown commands along with the phrases that could follow.
//! * *Declarative tools*:
//! The phrase to command bindings may be written in code, or as a Yaml document.
//! * *Shared argument builders*:
//! Commands declare, by name, which reusable argument builders to apply to their option parser.
//!
//! # Usage
//! This page includes a demo on using `phrasecmd`.
//! More demos are outlined in [the source](https://github.com/phrasecmd/phrasecmd/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/greeters.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ greeters
//! A command is required. Valid commands:
//!   say hello     Says hello
//!   say goodbye   Says goodbye
//!
//! $ greeters say hello
//! Hello from me!
//!
//! $ greeters say goodbye --name Bob
//! Goodbye from Bob
//!
//! $ greeters say hi
//! Unknown command 'say hi', could be one of:
//!   say hello     Says hello
//!   say goodbye   Says goodbye
//! ```
//!
//! # Commands
//! A command implements [`Command`] and [`Describe`].
//! `Describe` is typically [derived](./derive/index.html), which supplies the command's qualified name along with its description, epilog, usage, and declared argument builders.
//! * [`Command::add_arguments`] adds the command's own options/arguments to its parser.
//! * [`Command::builders`] offers named argument builders, which [`Describe::arguments`] selects from.
//! The declared builders are applied in order, before `add_arguments`.
//! * [`Command::check_arguments`] validates the parsed values.
//! * [`Command::run`] does the work.
//!
//! A single command may also act as a program by itself, via [`main`].
//!
//! # Tools
//! Build a [`Tool`] via [`ToolBuilder`], [`Tool::from_phrases`], or [`Tool::from_yaml`].
//! Commands are resolved by name through a [`CommandLoader`]; [`Catalog`] is the explicit name to factory implementation.
//! Every phrase is checked when the tool is built: a repeated phrase, or a command which cannot be loaded, fails the build.
//!
//! ### Yaml
//! Two document forms are accepted (see [`ToolSpec`] for details).
//!
//! The nested form maps phrase words to command names, where `_package` places the names under a namespace:
//! ```yaml
//! _package: greet
//! say:
//!   hello: HelloCommand
//!   goodbye: GoodbyeCommand
//! ```
//!
//! The list form declares each phrase explicitly, where `default` namespaces any unqualified name:
//! ```yaml
//! default: greet
//! phrases:
//!   - [say, hello, HelloCommand]
//!   - phrase: say goodbye
//!     class: GoodbyeCommand
//! ```
//!
//! # Dispatch
//! By default, a command is selected by the first bound phrase found along the input words ([`MatchPolicy::FirstBound`]).
//! Use [`MatchPolicy::Longest`] to prefer the longest bound phrase instead.
//!
//! Dispatch returns `Ok(())` when the command succeeds, and otherwise `Err(code)` for the process exit status:
//! * `0` when help was displayed.
//! * `1` for an incomplete/unknown command, or a failed command.
//! * `2` when the command's option parser rejects the input.

pub mod derive;

pub use phrasecmd_builder::*;
