use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use fieldlink_frame::Request;
use fieldlink_router::{ChildLink, Router};

use crate::cmd::{device_id, PollArgs};
use crate::exit::{io_error, router_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_response, OutputFormat};

pub fn run(args: PollArgs, format: OutputFormat) -> CliResult<i32> {
    let interval = parse_duration(&args.interval)?;
    let id = device_id(args.id)?;

    let child = Command::new(&args.bridge)
        .args(&args.bridge_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| io_error(&format!("failed to spawn {}", args.bridge.display()), err))?;
    let link =
        ChildLink::new(child).map_err(|err| io_error("failed to wire bridge pipes", err))?;
    tracing::info!(bridge = %args.bridge.display(), pid = link.pid(), "bridge running");

    let mut router = Router::new(link);
    let received = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&received);
    router
        .register(id, move |response| {
            print_response(&response, format);
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .map_err(|err| router_error("registration failed", err))?;

    let mut next_send = Instant::now();
    loop {
        if Instant::now() >= next_send {
            router
                .handle_request(&Request::vfd_status(id))
                .map_err(|err| router_error("status request failed", err))?;
            next_send += interval;
        }

        // Responses for other ids or malformed frames are reported and
        // dropped; only pipe-level failures end the loop.
        if let Err(err) = router.poll() {
            tracing::warn!(%err, "inbound poll");
        }

        if let Some(count) = args.count {
            if received.load(Ordering::Relaxed) >= count {
                return Ok(SUCCESS);
            }
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
