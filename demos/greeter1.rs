mod greet;

use phrasecmd::Tool;

fn main() {
    let tool = Tool::from_phrases(
        "greeter1",
        greet::catalog(),
        [
            ("say hello", format!("{}::HelloCommand", greet::PACKAGE)),
            ("say goodbye", format!("{}::GoodbyeCommand", greet::PACKAGE)),
        ],
    );

    match tool {
        Ok(tool) => tool.main(),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
