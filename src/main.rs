use std::process::ExitCode;

fn main() -> ExitCode {
    tilecut::init_tracing();

    match tilecut::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_config_error() => {
            eprintln!("Error: {}", err);
            eprintln!("Run 'tilecut --help' for usage information.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::SUCCESS
        }
    }
}
