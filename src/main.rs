use std::io;
use std::process::ExitCode;

use clap::Parser;

use ddos_sim::cli::{exit_status, run, Args};
use ddos_sim::clock::SystemClock;

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let result = run(Args::parse(), &mut input, &mut output, &SystemClock);
    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    ExitCode::from(exit_status(&result))
}
