//! Dandy CLI entry point.

use dandy_editor::Screen;
use dandy_runtime::{
    CrosstermInput, CrosstermScreen, Session, ShellConfig, TerminalGuard, init_file_logging,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// What the command line asked for besides configuration.
#[derive(Default)]
struct CliOptions {
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<(ShellConfig, CliOptions), Box<dyn std::error::Error>> {
    let mut config = ShellConfig::default();
    let mut options = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => options.show_help = true,
            "-V" | "--version" => options.show_version = true,
            "-b" | "--batch" => config.batch = true,
            flag @ ("--seed" | "--keys" | "--bestiary" | "--startup" | "--log" | "--max-depth") => {
                i += 1;
                let Some(value) = args.get(i) else {
                    return Err(format!("{flag} requires a value").into());
                };
                config = match flag {
                    "--seed" => config.with_seed(
                        value
                            .parse()
                            .map_err(|_| format!("invalid --seed value: {value}"))?,
                    ),
                    "--max-depth" => config.with_max_depth(
                        value
                            .parse()
                            .map_err(|_| format!("invalid --max-depth value: {value}"))?,
                    ),
                    "--keys" => config.with_keymap(value),
                    "--bestiary" => config.with_bestiary(value),
                    "--startup" => config.with_startup(value),
                    _ => config.with_log(value),
                };
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok((config, options))
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, options) = parse_args(args)?;

    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.show_version {
        println!("dandy {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(path) = &config.log_path {
        init_file_logging(path)?;
    }

    if config.batch {
        return run_batch(&config);
    }

    // Load everything that can fail before touching the terminal.
    let mut screen = CrosstermScreen::new();
    let mut input = CrosstermInput::new()?;
    let (width, height) = screen.size()?;
    let mut session = Session::from_config(&config, width, height)?;
    let startup: Vec<&PathBuf> = config.startup_path.iter().chain(&config.files).collect();

    let mut guard = TerminalGuard::enter()?;
    let result = startup
        .into_iter()
        .try_for_each(|path| session.run_startup(path, &mut screen))
        .and_then(|()| session.run(&mut input, &mut screen));
    guard.restore();
    result?;
    Ok(())
}

/// Runs files through the interpreter and prints their output.
fn run_batch(config: &ShellConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut interpreter = config.interpreter()?;
    let files = config.startup_path.iter().chain(&config.files);
    for file in files {
        let outcome = interpreter.exec_file(file)?;
        if !outcome.text.is_empty() {
            println!("{}", outcome.text);
        }
        if outcome.halt {
            break;
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mDandy\x1b[0m - Dice and creature macros for tabletop games

\x1b[1mUSAGE:\x1b[0m
    dandy [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Command files to run before the session starts

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -b, --batch          Run files, print their output, and exit
    --seed N             Seed the dice for reproducible rolls
    --keys PATH          Key-binding overrides (JSON)
    --bestiary PATH      Creature definitions (JSON)
    --startup PATH       Command file run silently at startup
    --log PATH           Write diagnostics to PATH (filter with DANDY_LOG)
    --max-depth N        Alias and sub-command nesting limit (default 32)

\x1b[1mEXAMPLES:\x1b[0m
    dandy                                Start a session
    dandy --bestiary monsters.json       Start with creatures loaded
    dandy -b rolls.txt                   Run rolls.txt and exit
    dandy --seed 42 -b rolls.txt         Reproducible batch run

\x1b[1mCOMMANDS:\x1b[0m
    roll 2d6+1           Roll dice (bare notation works too)
    hit 5                Roll to hit with a +5 bonus
    echo text            Print text; (cmd) is replaced by its output
    alias name cmd...    Define a shorthand
    unalias name         Remove a shorthand
    exec path            Run a command file
    help                 List commands, aliases and creatures
    quit                 Leave (also exit, halt, Ctrl-C, Ctrl-D)
    <creature> <macro>   Run a creature macro, e.g. knight longsword"
    );
}
