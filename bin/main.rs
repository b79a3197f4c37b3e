//! Loupe - a trace console for watching an interpreter work.

mod demo;

use console::{Console, Level};

const VERBOSITY_HELP: &str =
    "Print log output up to and including this severity. Step tracing and \
     state dumps are debug-tier.";

fn main() {
    let app = clap::App::new("loupe")
        .version(clap::crate_version!())
        .about("a trace console for an interpreter")
        .arg(
            clap::Arg::new("verbosity")
                .help("Log verbosity")
                .long_help(VERBOSITY_HELP)
                .short('v')
                .long("verbosity")
                .value_name("LEVEL")
                .takes_value(true)
                .possible_values(Level::NAMES)
                .default_value("debug"),
        )
        .arg(
            clap::Arg::new("quiet")
                .help("Log nothing at all")
                .short('q')
                .long("quiet")
                .conflicts_with("verbosity"),
        )
        .arg(
            clap::Arg::new("ascii")
                .help("Draw nesting guides with ASCII instead of Unicode")
                .long("ascii"),
        )
        .arg(
            clap::Arg::new("dump")
                .help("Dump the full frame stack at the deepest point")
                .long("dump"),
        );

    let matches = app.get_matches();

    let mut console = if matches.is_present("quiet") {
        Console::silent()
    } else {
        let level = matches.value_of("verbosity").unwrap_or("debug");
        Console::stderr(Level::from_name(level))
    };

    if matches.is_present("ascii") {
        console = console.ascii();
    }

    demo::run(&mut console, matches.is_present("dump"));
}
