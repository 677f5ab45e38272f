mod greet;

use greet::HelloCommand;

fn main() {
    phrasecmd::main(HelloCommand);
}
