//! declc CLI entry point.

use declc_foundation::Error;
use declc_render::RenderConfig;
use declc_runtime::{CompileConfig, Compiler};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    command: Option<String>,
    positional: Vec<PathBuf>,
    prefix: Option<String>,
    extension: Option<String>,
    no_strict_types: bool,
    verbose: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbose = true,
            "--no-strict-types" => config.no_strict_types = true,
            "--prefix" => {
                config.prefix = Some(args.next().ok_or("--prefix requires a value")?);
            }
            "--ext" => {
                config.extension = Some(args.next().ok_or("--ext requires a value")?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            value if config.command.is_none() => config.command = Some(value.to_string()),
            path => config.positional.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("declc {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match config.command.as_deref() {
        Some("compile") => {}
        Some(other) => return Err(format!("unknown command: {other}").into()),
        None => {
            print_help();
            return Err("missing command".into());
        }
    }

    let [input, output] = config.positional.as_slice() else {
        return Err("compile expects <input> and <output>".into());
    };

    init_logging(config.verbose);

    let mut compile = CompileConfig::new(input, output)
        .with_render(RenderConfig::default().with_strict_types(!config.no_strict_types));
    if let Some(prefix) = config.prefix {
        compile = compile.with_prefix(prefix);
    }
    if let Some(extension) = config.extension {
        compile = compile.with_extension(extension);
    }

    let summary = Compiler::new(compile).run().map_err(with_context)?;
    println!(
        "Compiled {} declaration(s) from {} file(s) into {} file(s)",
        summary.declarations,
        summary.files,
        summary.written.len()
    );
    Ok(())
}

/// Appends the error's source position and frames to its message.
fn with_context(err: Error) -> Box<dyn std::error::Error> {
    if let Some(context) = &err.context {
        return format!("{err}\n{context}").into();
    }
    err.into()
}

fn print_help() {
    println!(
        "declc - Declaration compiler for immutable PHP value objects

USAGE:
    declc compile <INPUT> <OUTPUT> [OPTIONS]

ARGUMENTS:
    <INPUT>     DSL file or directory to compile
    <OUTPUT>    Directory receiving the generated classes

OPTIONS:
    --prefix NS          Namespace mapped onto OUTPUT (PSR-4)
    --ext EXT            Extension of DSL files in directories (default: decl)
    --no-strict-types    Omit declare(strict_types=1)
    -v, --verbose        Debug logging (RUST_LOG overrides)
    -h, --help           Print help information
    -V, --version        Print version information

EXAMPLES:
    declc compile types/ src/Generated --prefix App\\\\Generated
    declc compile person.decl out/"
    );
}
