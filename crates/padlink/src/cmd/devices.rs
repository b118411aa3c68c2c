use serde::Serialize;

use padlink_controller::{PadRegistry, SdlBackend};

use crate::cmd::{DevicesArgs, OutputFormat};
use crate::exit::{pad_error, CliError, CliResult, INTERNAL, SUCCESS};

#[derive(Serialize)]
struct DeviceEntry {
    index: usize,
    name: String,
}

pub fn run(args: DevicesArgs) -> CliResult<i32> {
    let backend = SdlBackend::init().map_err(|err| pad_error("backend init failed", err))?;
    let mut registry = PadRegistry::new(backend);

    let entries: Vec<DeviceEntry> = registry
        .attached_pads()
        .into_iter()
        .map(|(index, name)| DeviceEntry { index, name })
        .collect();

    match args.format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("no controllers attached");
            }
            for entry in &entries {
                println!("{}: {}", entry.index, entry.name);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|err| CliError::new(INTERNAL, format!("JSON encoding failed: {err}")))?;
            println!("{json}");
        }
    }

    Ok(SUCCESS)
}
