use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use fieldlink_frame::{DeviceId, JoystickFunction};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod crc;
pub mod decode;
pub mod encode;
pub mod poll;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a request frame and print it.
    Encode(EncodeArgs),
    /// Decode an 8-byte response frame given as hex.
    Decode(DecodeArgs),
    /// Compute the CRC-16 of hex bytes.
    Crc(CrcArgs),
    /// Spawn a serial bridge and poll one device for status.
    Poll(PollArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Crc(args) => crc::run(args, format),
        Command::Poll(args) => poll::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(subcommand)]
    pub request: RequestCommand,
}

#[derive(Subcommand, Debug)]
pub enum RequestCommand {
    /// Run a VFD at a signed frequency in Hz (negative reverses).
    VfdRun {
        #[arg(long)]
        id: u8,
        #[arg(long)]
        hertz: f64,
    },
    /// Stop a VFD.
    VfdStop {
        #[arg(long)]
        id: u8,
    },
    /// Query a VFD's status.
    VfdStatus {
        #[arg(long)]
        id: u8,
    },
    /// Poll one joystick channel.
    Joystick {
        #[arg(long)]
        id: u8,
        #[arg(long, value_enum)]
        channel: JoystickChannel,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum JoystickChannel {
    XPos,
    YPos,
    Button,
    XThumb,
    YThumb,
}

impl From<JoystickChannel> for JoystickFunction {
    fn from(channel: JoystickChannel) -> Self {
        match channel {
            JoystickChannel::XPos => JoystickFunction::XPos,
            JoystickChannel::YPos => JoystickFunction::YPos,
            JoystickChannel::Button => JoystickFunction::Button,
            JoystickChannel::XThumb => JoystickFunction::XThumb,
            JoystickChannel::YThumb => JoystickFunction::YThumb,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame bytes as 16 hex digits (whitespace and colons allowed).
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct CrcArgs {
    /// Input bytes as hex (whitespace and colons allowed).
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct PollArgs {
    /// Path of the serial-bridge executable to spawn.
    pub bridge: PathBuf,
    /// Device id to poll.
    #[arg(long)]
    pub id: u8,
    /// Time between status requests (e.g. 500ms, 2s).
    #[arg(long, default_value = "500ms")]
    pub interval: String,
    /// Exit after receiving N responses.
    #[arg(long)]
    pub count: Option<u64>,
    /// Arguments passed through to the bridge executable.
    #[arg(last = true)]
    pub bridge_args: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn device_id(raw: u8) -> CliResult<DeviceId> {
    DeviceId::new(raw)
        .ok_or_else(|| CliError::new(USAGE, format!("device id {raw} is outside 0-247")))
}

pub(crate) fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    if cleaned.len() % 2 != 0 {
        return Err(CliError::new(
            USAGE,
            format!("hex input has odd length ({})", cleaned.len()),
        ));
    }
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte: {}", &cleaned[i..i + 2])))
        })
        .collect()
}
