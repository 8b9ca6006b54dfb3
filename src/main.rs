//! Binary entrypoint for the `nexus-uploader` CLI.

use std::process::ExitCode;

use nexus_uploader::Error;

fn main() -> ExitCode {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    match nexus_uploader::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(err)) => err.exit(),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
