mod greet;

use phrasecmd::ToolBuilder;

fn main() {
    let yaml = format!(
        "say hello: {package}.HelloCommand\nsay goodbye: {package}.GoodbyeCommand\n",
        package = greet::PACKAGE.replace("::", "."),
    );
    let spec = match phrasecmd::ToolSpec::from_yaml(&yaml) {
        Ok(spec) => spec,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    ToolBuilder::new("greeter2", greet::catalog())
        .spec(spec)
        .build()
        .main();
}
