use padlink_controller::{PadRegistry, SdlBackend};
use padlink_transport::FifoPair;

use crate::bridge;
use crate::cmd::ServeArgs;
use crate::exit::{channel_error, pad_error, CliResult};

pub fn run(args: ServeArgs) -> CliResult<i32> {
    let backend = SdlBackend::init().map_err(|err| pad_error("backend init failed", err))?;
    let mut registry = PadRegistry::new(backend);

    let fifos = FifoPair::create(&args.clock_path, &args.data_path)
        .map_err(|err| channel_error("FIFO setup failed", err))?;
    fifos
        .install_signal_cleanup()
        .map_err(|err| channel_error("signal hook failed", err))?;

    println!(
        "FIFOs ready. Start the consumer with:\n    -o {} -i {}",
        fifos.clock_path().display(),
        fifos.data_path().display()
    );

    // Reconnect loop: a consumer may come and go; only a signal stops us.
    loop {
        tracing::info!("waiting for consumer");
        let channel = match fifos.connect() {
            Ok(channel) => channel,
            Err(err) => return Err(channel_error("connect failed", err)),
        };
        tracing::info!("consumer connected");

        match bridge::run_bridge(
            channel.requests,
            channel.replies,
            std::io::stdout().lock(),
            &mut registry,
        ) {
            Ok(()) => tracing::info!("consumer disconnected"),
            Err(err) => tracing::warn!(error = %err, "connection failed"),
        }
    }
}
