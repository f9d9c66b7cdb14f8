//! Command-line interface for esround.
//!
//! Usage:
//!   esround `<path>` [--dump]   - Re-emit a file (or print its tree with `--dump`)
//!   esround                    - Start a REPL reading one fragment per line

use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use esround::{dump, parse, print};
use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::process;

fn cli() -> Command {
    Command::new("esround")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parses JavaScript function bodies and prints them back with their comments")
        .arg(
            Arg::new("path")
                .help("Path to the source file; starts a REPL when omitted")
                .index(1),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .help("Print the parsed tree instead of the re-emitted source")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    env_logger::init();
    let matches = cli().get_matches();

    let result = match matches.get_one::<String>("path") {
        Some(path) => run_file(path, dump_requested(&matches)),
        None => repl(),
    };
    if let Err(err) = result {
        fail(err);
    }
}

fn dump_requested(matches: &ArgMatches) -> bool {
    matches.get_flag("dump")
}

fn fail(message: impl Display) -> ! {
    eprintln!("{}", style(format!("ERROR: {}", message)).red());
    process::exit(1);
}

/// Prints the re-emitted source (or the tree dump) of a file.
fn run_file(path: &str, dump_tree: bool) -> io::Result<()> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => fail(format!("cannot read {}: {}", path, err)),
    };
    match parse(&content) {
        Ok(ast) if dump_tree => print!("{}", dump::dump_program(&ast)),
        Ok(ast) => print!("{}", print(&ast)),
        Err(err) => fail(format!("{} in {}", err, path)),
    }
    Ok(())
}

fn repl() -> io::Result<()> {
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            return Ok(()); // EOF
        }

        match parse(&input) {
            Ok(ast) => {
                print!("{}", print(&ast));
                eprint!("{}", style(dump::dump_program(&ast)).dim());
            }
            Err(err) => eprintln!("{}", style(format!("ERROR: {}", err)).red()),
        }
    }
}
