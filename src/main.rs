//! hashdupe - Duplicate File Finder
//!
//! Entry point for the hashdupe CLI application.

use clap::Parser;
use hashdupe::cli::Cli;

fn main() {
    let cli = Cli::parse();

    match hashdupe::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = hashdupe::exit_code_for(&err);
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
