use padlink_controller::{PadRegistry, SdlBackend};
use padlink_transport::ConsumerProcess;

use crate::bridge;
use crate::cmd::RunArgs;
use crate::exit::{bridge_error, channel_error, pad_error, CliResult, FAILURE, SUCCESS};

pub fn run(args: RunArgs) -> CliResult<i32> {
    let backend = SdlBackend::init().map_err(|err| pad_error("backend init failed", err))?;
    let mut registry = PadRegistry::new(backend);

    let (mut consumer, channel) =
        ConsumerProcess::spawn(&args.consumer).map_err(|err| channel_error("spawn failed", err))?;

    let bridge_result = bridge::run_bridge(
        channel.requests,
        channel.replies,
        std::io::stdout().lock(),
        &mut registry,
    );

    // Reap the child before surfacing any bridge fault; its stdin closed
    // when the bridge returned, so this does not hang.
    let status = consumer
        .wait()
        .map_err(|err| channel_error("wait failed", err))?;
    bridge_result.map_err(|err| bridge_error("bridge failed", err))?;

    if status.success() {
        Ok(SUCCESS)
    } else {
        tracing::warn!(%status, "consumer exited with failure");
        Ok(status.code().unwrap_or(FAILURE))
    }
}
