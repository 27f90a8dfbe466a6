// idl-parser: parse an IDL file and print its declarations in canonical form

use std::fs;
use std::path::PathBuf;

use clap::Parser as ClapParser;
use miette::{IntoDiagnostic, NamedSource, Report, WrapErr};

use idl_parser::parser::lexer::{Lexer, LexerConfig};
use idl_parser::parser::parse::Parser;

#[derive(ClapParser, Debug)]
#[command(name = "idl-parser", version, about = "Parse an IDL file and print its declarations")]
#[command(override_usage = "idl-parser [OPTIONS] <FILE>")]
struct Cli {
    /// Input file path
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print the program as JSON instead of canonical text
    #[arg(long, conflicts_with = "tokens")]
    json: bool,

    /// Print the token stream and stop
    #[arg(long)]
    tokens: bool,

    /// Treat `/*` as an error instead of a comment opener
    #[arg(long)]
    no_comments: bool,

    /// Report progress on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Exactly one input file
    let [path] = cli.files.as_slice() else {
        eprintln!("Usage:");
        eprintln!("    idl-parser <file>");
        std::process::exit(1);
    };

    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;

    let config = LexerConfig {
        block_comments: !cli.no_comments,
    };

    if cli.verbose {
        eprintln!("Parsing {}...", path.display());
    }

    let with_source = |err: Report| {
        err.with_source_code(NamedSource::new(
            path.display().to_string(),
            source.clone(),
        ))
    };

    let tokens = Lexer::with_config(&source, config)
        .tokenize()
        .map_err(|e| with_source(e.into()))?;

    if cli.tokens {
        for token in &tokens {
            println!("{} {:?} {}", token.offset, token.kind, token.text);
        }
        return Ok(());
    }

    let program = Parser::new(&tokens)
        .parse_program()
        .map_err(|e| with_source(e.into()))?;

    if cli.verbose {
        eprintln!("Parsed {} declarations", program.len());
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&program).into_diagnostic()?;
        println!("{json}");
    } else {
        for decl in &program {
            println!("{decl}");
        }
    }

    Ok(())
}
