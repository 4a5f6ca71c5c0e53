//! Binary entrypoint that serves the quiz form.

use std::process::ExitCode;

use quiz_forge::start_quiz_forge;

/// Start the quiz form server.
fn main() -> ExitCode {
    start_quiz_forge::run()
}
