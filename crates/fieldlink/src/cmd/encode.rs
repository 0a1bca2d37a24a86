use fieldlink_frame::Request;

use crate::cmd::{device_id, EncodeArgs, RequestCommand};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let request = build_request(&args.request)?;
    let frame = request
        .encode()
        .map_err(|err| frame_error("encode failed", err))?;
    print_frame(&frame, format);
    Ok(SUCCESS)
}

fn build_request(command: &RequestCommand) -> CliResult<Request> {
    Ok(match *command {
        RequestCommand::VfdRun { id, hertz } => Request::vfd_run(device_id(id)?, hertz),
        RequestCommand::VfdStop { id } => Request::vfd_stop(device_id(id)?),
        RequestCommand::VfdStatus { id } => Request::vfd_status(device_id(id)?),
        RequestCommand::Joystick { id, channel } => {
            Request::joystick(device_id(id)?, channel.into())
        }
    })
}
