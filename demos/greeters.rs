use phrasecmd::clap::Arg;
use phrasecmd::derive::*;
use phrasecmd::{ArgumentBuilders, Catalog, Command, CommandError, OptionValues, Tool};

/// Argument builders shared by every greeter, defaulting `--name` to `default`.
fn greeter_builders(default: &'static str) -> ArgumentBuilders {
    ArgumentBuilders::default().with("name", move |parser| {
        parser.arg(
            Arg::new("name")
                .long("name")
                .help("Name of the person to greet")
                .default_value(default),
        )
    })
}

fn name(values: &OptionValues) -> Result<&String, CommandError> {
    values
        .get_one::<String>("name")
        .ok_or_else(|| CommandError::failed("missing --name."))
}

#[derive(Default, Describe)]
#[phrasecmd(description = "Says hello", arguments = "name")]
struct HelloCommand;

impl Command for HelloCommand {
    fn builders(&self) -> ArgumentBuilders {
        greeter_builders("me")
    }

    fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
        println!("Hello from {}!", name(values)?);
        Ok(())
    }
}

#[derive(Default, Describe)]
#[phrasecmd(description = "Says goodbye", arguments = "name")]
struct GoodbyeCommand;

impl Command for GoodbyeCommand {
    fn builders(&self) -> ArgumentBuilders {
        greeter_builders("him")
    }

    fn run(&mut self, values: &OptionValues) -> Result<(), CommandError> {
        println!("Goodbye from {}", name(values)?);
        Ok(())
    }
}

fn main() {
    let catalog = Catalog::new()
        .register::<HelloCommand>()
        .register::<GoodbyeCommand>();
    let yaml = format!(
        "_package: {}\nsay hello: HelloCommand\nsay goodbye: GoodbyeCommand\n",
        module_path!(),
    );

    match Tool::from_yaml("greeters", catalog, &yaml) {
        Ok(tool) => tool.main(),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
