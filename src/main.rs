use std::io::{self, Write};
use std::process::ExitCode;

use lr_forge::cli::{self, parse_args, resolve_discipline};
use lr_forge::trace::set_verbose;

fn main() -> ExitCode {
    let args = parse_args();
    set_verbose(args.verbose);

    let discipline = match resolve_discipline(&args) {
        Ok(d) => d,
        Err(msg) => {
            eprintln!("error: {msg}");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match cli::run(discipline, &mut input, &mut output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = output.flush();
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
