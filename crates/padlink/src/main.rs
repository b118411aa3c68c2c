mod bridge;
mod clock;
mod cmd;
mod exit;
mod logging;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "padlink",
    version,
    about = "Bridge a game controller to a consumer process over pipes or FIFOs"
)]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.log_level);

    match cmd::run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_subcommand_with_trailing_argv() {
        let cli = Cli::try_parse_from(["padlink", "run", "pico8", "-home", "/tmp/p8"])
            .expect("run args should parse");

        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.consumer, vec!["pico8", "-home", "/tmp/p8"]);
            }
            other => panic!("expected run subcommand, got {other:?}"),
        }
    }

    #[test]
    fn run_requires_a_consumer_command() {
        let err = Cli::try_parse_from(["padlink", "run"]).expect_err("empty argv should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_serve_with_fifo_paths() {
        let cli = Cli::try_parse_from([
            "padlink",
            "serve",
            "--clock-path",
            "/tmp/c.fifo",
            "--data-path",
            "/tmp/d.fifo",
        ])
        .expect("serve args should parse");

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.clock_path.to_str(), Some("/tmp/c.fifo"));
                assert_eq!(args.data_path.to_str(), Some("/tmp/d.fifo"));
            }
            other => panic!("expected serve subcommand, got {other:?}"),
        }
    }

    #[test]
    fn serve_has_fixed_default_paths() {
        let cli = Cli::try_parse_from(["padlink", "serve"]).expect("serve should parse");
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.clock_path.to_str(), Some("padlink.clock"));
                assert_eq!(args.data_path.to_str(), Some("padlink.data"));
            }
            other => panic!("expected serve subcommand, got {other:?}"),
        }
    }

    #[test]
    fn parses_quiet_log_level() {
        let cli = Cli::try_parse_from(["padlink", "--log-level", "quiet", "devices"])
            .expect("quiet level should parse");
        assert!(matches!(cli.log_level, LogLevel::Quiet));
    }

    #[test]
    fn parses_devices_json_format() {
        let cli = Cli::try_parse_from(["padlink", "devices", "--format", "json"])
            .expect("devices args should parse");
        assert!(matches!(cli.command, Command::Devices(_)));
    }
}
