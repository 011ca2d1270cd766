use std::env::args_os;
use std::process::ExitCode;

use netpbm_editor::{run_editor, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run_editor(&arguments) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Editing session failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
