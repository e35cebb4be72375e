use std::process::ExitCode;

fn main() -> ExitCode {
    expedite_cli::run()
}
