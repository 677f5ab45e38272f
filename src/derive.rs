//! Derive Api for `phrasecmd` commands.
//!
//! ### Getting Started
//! Instrument a command type with `#[derive(Describe)]`.
//! This implements [`Describe`](crate::Describe), leaving [`Command`](crate::Command) to be implemented by hand.
//!
//! The derived [`qualified_name`](crate::Describe::qualified_name) is the module path of the type followed by its name (ex: `greet::HelloCommand`).
//! This is the name under which [`Catalog::register`](crate::Catalog::register) makes the command available.
//!
//! ```no_run
//! use phrasecmd::clap::Arg;
//! use phrasecmd::derive::*;
//! use phrasecmd::{Command, CommandError, OptionParser, OptionValues};
//!
//! /// Says hello
//! /// to someone.
//! ///
//! /// Only the first paragraph becomes the description.
//! #[derive(Default, Describe)]
//! #[phrasecmd(epilog = "Be polite.")]
//! struct HelloCommand;
//!
//! impl Command for HelloCommand {
//!     fn add_arguments(&self, parser: OptionParser) -> OptionParser {
//!         parser.arg(Arg::new("name").long("name").default_value("you"))
//!     }
//!
//!     fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
//!         println!("Hello {}!", values.get_one::<String>("name").unwrap());
//!         Ok(())
//!     }
//! }
//!
//! fn main() {
//!     phrasecmd::main(HelloCommand);
//! }
//! ```
//!
//! ### Configuration
//! All configuration is via the `#[phrasecmd(..)]` attribute, which may be repeated:
//! * `description = ".."`: the short description, shown in listings and at the top of the help.
//! When omitted, the first paragraph of the doc comment is used (if any).
//! * `epilog = ".."`: text shown at the end of the help.
//! * `usage = ".."`: replacement for the generated usage line.
//! * `arguments = ".."`: the comma separated names of the argument builders to apply, in order.
//! Each name must be offered by [`Command::builders`](crate::Command::builders).
//!
//! Each key may be specified at most once; unknown keys are rejected at compile time.

pub use phrasecmd_derive::*;
