use rask_log_fanout::app;
use std::process::ExitCode;

fn main() -> ExitCode {
    app::main()
}
