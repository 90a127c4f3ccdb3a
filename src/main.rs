mod descriptor;
mod error;
mod generate;
mod grammar;
mod header;
mod run;
mod src;

use anstream::{eprintln, print};
use clap::Parser;
use generate::Style;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;

/// Generate AST class declarations as a C++ header.
#[derive(Parser)]
#[clap(name = "generate", version)]
struct Cli {
    /// Directory to write `<base>.h` into
    #[clap(required_unless_present = "stdout")]
    output_dir: Option<PathBuf>,

    /// Shape of the generated classes
    #[clap(short, long, value_enum, default_value_t)]
    style: Style,

    /// Read descriptors from this file instead of using the built-in `Expr` grammar
    #[clap(short, long)]
    grammar: Option<PathBuf>,

    /// Name of the base type, and of the generated header
    #[clap(short, long)]
    base: Option<String>,

    /// A type to forward-declare; may be repeated [default: Token]
    #[clap(short, long)]
    forward: Vec<String>,

    /// Print the header instead of writing it
    #[clap(long)]
    stdout: bool,

    /// Do not report where the header was written
    #[clap(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        // Help and version requests are not errors.
        let code = if e.use_stderr() {
            exitcode::USAGE
        } else {
            exitcode::OK
        };
        let _ = e.print();
        process::exit(code)
    });

    if let Err(err) = generate(cli) {
        eprintln!("{}{} {err:#}", "error".bold().red(), ":".bold());
        let code = match err.downcast_ref::<error::Error>() {
            Some(err) => {
                if let Some(highlight) = err.highlight() {
                    eprintln!("{}", highlight.dimmed());
                }
                exitcode::DATAERR
            }
            None => exitcode::IOERR,
        };
        process::exit(code)
    }
}

fn generate(cli: Cli) -> anyhow::Result<()> {
    let grammar = run::load_grammar(cli.grammar.as_deref(), cli.base, cli.forward)?;
    if cli.stdout {
        print!("{}", run::render(&grammar, cli.style)?);
        return Ok(());
    }
    let Some(dir) = cli.output_dir else {
        anyhow::bail!("no output directory given");
    };
    let path = run::write_header(dir, &grammar, cli.style)?;
    if !cli.quiet {
        eprintln!("{} {}", "Outputting to".green(), path.display());
    }
    Ok(())
}
