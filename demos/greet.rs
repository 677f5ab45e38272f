//! Greeting commands shared by the demos.
#![allow(dead_code)]

use phrasecmd::clap::Arg;
use phrasecmd::derive::*;
use phrasecmd::{Catalog, Command, CommandError, OptionParser, OptionValues};

/// The namespace the greeting commands are registered under.
pub const PACKAGE: &str = module_path!();

fn name_argument(default: &'static str) -> Arg {
    Arg::new("name")
        .long("name")
        .help("Name of the person to greet")
        .default_value(default)
}

/// Says hello
#[derive(Default, Describe)]
pub struct HelloCommand;

impl Command for HelloCommand {
    fn add_arguments(&self, parser: OptionParser) -> OptionParser {
        parser.arg(name_argument("you"))
    }

    fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
        let name = values
            .get_one::<String>("name")
            .ok_or_else(|| CommandError::failed("missing --name."))?;
        println!("Hello {name}!");
        Ok(())
    }
}

#[derive(Default, Describe)]
#[phrasecmd(description = "Says goodbye")]
pub struct GoodbyeCommand;

impl Command for GoodbyeCommand {
    fn add_arguments(&self, parser: OptionParser) -> OptionParser {
        parser.arg(name_argument("you"))
    }

    fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
        let name = values
            .get_one::<String>("name")
            .ok_or_else(|| CommandError::failed("missing --name."))?;
        println!("Goodbye {name}!");
        Ok(())
    }
}

/// Every greeting command, under its qualified name.
pub fn catalog() -> Catalog {
    Catalog::new()
        .register::<HelloCommand>()
        .register::<GoodbyeCommand>()
}
