use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use coolfront::{
    driver::{compile_sources, SourceFile},
    errors::errors::{Diagnostic, ErrorTip},
    lexer::lexer::tokenize,
    visitor::printer::dump,
};
use tracing_subscriber::EnvFilter;

/// Parses Cool sources and prints their syntax tree.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Source files, merged into one program in the order given
    files: Vec<PathBuf>,

    /// Print the token stream of each file instead of the tree
    #[arg(long)]
    tokens: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if args.files.is_empty() {
        eprintln!("No file(s) given");
        return ExitCode::FAILURE;
    }

    let mut sources = vec![];
    for path in &args.files {
        match read_to_string(path) {
            Ok(text) => sources.push(SourceFile::from_path(path, text)),
            Err(error) => {
                eprintln!("{}: {}", path.display(), error);
                return ExitCode::FAILURE;
            }
        }
    }

    if args.tokens {
        for source in sources {
            println!("{}:", source.name);
            for token in tokenize(source.text) {
                println!("  {} {}", token.position, token);
            }
        }
        return ExitCode::SUCCESS;
    }

    let start = Instant::now();
    let parsed = match compile_sources(&sources) {
        Ok(parsed) => parsed,
        Err(diagnostics) => {
            display_diagnostics(&diagnostics);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        files = sources.len(),
        classes = parsed.program.classes.len(),
        "parsed in {:?}",
        start.elapsed()
    );

    match dump(&parsed.program) {
        Ok(tree) => {
            print!("{}", tree);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("failed to render the tree: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn display_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic);

        if let ErrorTip::Suggestion(tip) = diagnostic.error.get_tip() {
            tracing::info!(position = %diagnostic.error.get_position(), "{}", tip);
        }
    }

    eprintln!("Compilation halted");
}
