use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use errors::{Reporter, StderrReporter};
use itertools::Itertools;

/// Scans and parses a lox expression and prints its syntax tree.
#[derive(clap::Parser)]
struct Args {
    /// Source file. Starts a prompt if omitted.
    file: Option<PathBuf>,

    /// Also print the scanned tokens.
    #[arg(long)]
    tokens: bool,
}

// Conventional exit code for malformed input data.
const EX_DATAERR: u8 = 65;

fn run_file(path: PathBuf, args: &Args) -> anyhow::Result<ExitCode> {
    let source = std::fs::read_to_string(path)?;
    let mut reporter = StderrReporter::new();

    run(&source, args, &mut reporter, &mut stdout())?;

    Ok(if reporter.had_error() { ExitCode::from(EX_DATAERR) } else { ExitCode::SUCCESS })
}

fn run_prompt(args: &Args) -> anyhow::Result<ExitCode> {
    let mut reporter = StderrReporter::new();
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }
        run(&line, args, &mut reporter, &mut stdout())?;
        reporter.reset();
    }
}

fn run(
    source: &str,
    args: &Args,
    reporter: &mut impl Reporter,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let tokens = scanner::scan(source, reporter);
    if args.tokens {
        writeln!(
            out,
            "{}",
            tokens.iter().map(|t| format!("{:?} {:?} {}", t.ty(), t.lexeme(), t.line())).join("\n")
        )?;
    }

    let expr = parser::parse(&tokens, reporter);
    if reporter.had_error() {
        log::debug!("Not printing the tree, errors were reported");
        return Ok(());
    }

    if let Some(expr) = expr {
        writeln!(out, "{expr}")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    match &args.file {
        Some(file) => run_file(file.clone(), &args),
        None => run_prompt(&args),
    }
}
