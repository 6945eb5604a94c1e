use std::process::ExitCode;

fn main() -> ExitCode {
    pydepgraph::cli::run()
}
