use clap::Parser;

use vdirs::cli::{execute_command, output, usage_exit_code, Cli};
use vdirs::infrastructure::logging::setup_logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = usage_exit_code(&e);
            // help and version go to stdout, usage errors to stderr
            let _ = e.print();
            std::process::exit(code);
        }
    };

    setup_logging(cli.verbose);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}
