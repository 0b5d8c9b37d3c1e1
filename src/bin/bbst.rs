use log::{error, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::{
    io::{self, BufRead, Write},
    path, process,
};

use bbst::{Command, Error, EventCounter};

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(parse(from_os_str))]
    file: path::PathBuf,
}

fn main() {
    let opts = Opt::from_args();
    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .ok();

    let mut counter = match EventCounter::from_file(&opts.file) {
        Ok(counter) => counter,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    info!("loaded {} events from {:?}", counter.len(), opts.file);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("failed to read input stream: {}", err);
                process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let res = match line.parse::<Command>() {
            Ok(cmd) => match counter.execute(cmd) {
                Some(reply) => writeln!(out, "{}", reply),
                None => break,
            },
            Err(Error::ParseError(_, _)) => {
                writeln!(out, "Failed to parse Number in command: {}", line)
            }
            Err(_) => writeln!(out, "Invalid Command: {}", line),
        };
        if let Err(err) = res {
            error!("failed to write output: {}", err);
            process::exit(1);
        }
    }
}
