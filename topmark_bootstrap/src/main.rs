use std::process::ExitCode as ProcessExitCode;

fn main() -> ProcessExitCode {
    let (exit_code, _result) = topmark_bootstrap::run(std::env::args());
    ProcessExitCode::from(exit_code.as_i32() as u8)
}
