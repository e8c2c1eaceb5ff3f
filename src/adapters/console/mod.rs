// Console adapter - Operator echo on stdout

use crate::ports::ConsolePort;

/// Console that writes operator echo to stdout
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl ConsolePort for StdoutConsole {
    fn print(&self, text: &str) {
        println!("{}", text);
    }
}
