use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::exit::CliResult;

pub mod clock;
pub mod devices;
pub mod run;
pub mod serve;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Spawn the consumer and bridge its standard streams.
    Run(RunArgs),
    /// Serve controller state over a named FIFO pair.
    Serve(ServeArgs),
    /// Spawn the consumer and feed it a free-running counter.
    Clock(ClockArgs),
    /// List attached game controllers.
    Devices(DevicesArgs),
}

pub fn run(command: Command) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args),
        Command::Serve(args) => serve::run(args),
        Command::Clock(args) => clock::run(args),
        Command::Devices(args) => devices::run(args),
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Consumer command and arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub consumer: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path of the request (clock) FIFO.
    #[arg(long, default_value = "padlink.clock")]
    pub clock_path: PathBuf,
    /// Path of the reply (data) FIFO.
    #[arg(long, default_value = "padlink.data")]
    pub data_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ClockArgs {
    /// Consumer command and arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub consumer: Vec<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct DevicesArgs {
    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,
}
