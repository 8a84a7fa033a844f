//! `hydrate` command-line tool.

use anyhow::Result;
use clap::Parser;

use hydrate_cli::cli::{Cli, Command, LoadArgs, OutputFormatArg};
use hydrate_cli::commands::{run_load, run_schema};
use hydrate_cli::logging::init_logging;
use hydrate_cli::render::{json_lines, records_table, schema_table};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Load(args) => load(args),
        Command::Schema(args) => run_schema(args).map(|schema| {
            println!("Record: {}", schema.type_name());
            println!("{}", schema_table(&schema));
        }),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn load(args: &LoadArgs) -> Result<()> {
    let result = run_load(args)?;
    match args.output {
        OutputFormatArg::Table => {
            println!("Record: {}", result.spec.name);
            println!("Source: {}", args.file.display());
            println!("Records: {}", result.records.len());
            println!("{}", records_table(&result.spec, &result.records));
        }
        OutputFormatArg::Json => {
            if !result.records.is_empty() {
                println!("{}", json_lines(&result.records)?);
            }
        }
    }
    Ok(())
}
