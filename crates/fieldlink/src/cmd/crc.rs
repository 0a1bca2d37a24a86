use fieldlink_frame::crc16;
use serde::Serialize;

use crate::cmd::{parse_hex, CrcArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{to_hex, OutputFormat};

#[derive(Serialize)]
struct CrcOutput {
    input: String,
    crc_lo: u8,
    crc_hi: u8,
    hex: String,
}

pub fn run(args: CrcArgs, format: OutputFormat) -> CliResult<i32> {
    let data = parse_hex(&args.hex)?;
    let crc = crc16(&data);
    match format {
        OutputFormat::Json => {
            let out = CrcOutput {
                input: to_hex(&data),
                crc_lo: crc[0],
                crc_hi: crc[1],
                hex: to_hex(&crc),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("crc_lo={} crc_hi={} hex={}", crc[0], crc[1], to_hex(&crc));
        }
    }
    Ok(SUCCESS)
}
