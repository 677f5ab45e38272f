mod greet;

use phrasecmd::Tool;

fn main() {
    let yaml = format!(
        "
_package: {}
say:
  hello: HelloCommand
  goodbye: GoodbyeCommand
",
        greet::PACKAGE.replace("::", "."),
    );

    match Tool::from_yaml("greeter3", greet::catalog(), &yaml) {
        Ok(tool) => tool.main(),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
