use std::sync::atomic::AtomicU32;
use std::sync::Arc;

use padlink_transport::ConsumerProcess;

use crate::clock;
use crate::cmd::ClockArgs;
use crate::exit::{channel_error, io_error, CliResult, FAILURE, SUCCESS};

pub fn run(args: ClockArgs) -> CliResult<i32> {
    let counter = Arc::new(AtomicU32::new(0));
    let _ticker = clock::spawn_ticker(Arc::clone(&counter));

    let (mut consumer, channel) =
        ConsumerProcess::spawn(&args.consumer).map_err(|err| channel_error("spawn failed", err))?;

    clock::run_clock(channel.requests, channel.replies, &counter)
        .map_err(|err| io_error("clock loop failed", err))?;

    let status = consumer
        .wait()
        .map_err(|err| channel_error("wait failed", err))?;

    if status.success() {
        Ok(SUCCESS)
    } else {
        Ok(status.code().unwrap_or(FAILURE))
    }
}
