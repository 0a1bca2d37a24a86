use fieldlink_frame::Response;

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_response, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let raw = parse_hex(&args.hex)?;
    let response = Response::decode(&raw).map_err(|err| frame_error("decode failed", err))?;
    print_response(&response, format);
    Ok(SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::DATA_INVALID;

    #[test]
    fn decodes_a_sealed_response() {
        let args = DecodeArgs {
            hex: "030203001388".to_string() + &hex_crc(&[3, 2, 3, 0, 0x13, 0x88]),
        };
        assert_eq!(run(args, OutputFormat::Pretty).unwrap(), SUCCESS);
    }

    #[test]
    fn bad_crc_exits_data_invalid() {
        let args = DecodeArgs {
            hex: "0302030013880000".to_string(),
        };
        let err = run(args, OutputFormat::Pretty).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    fn hex_crc(body: &[u8]) -> String {
        let crc = fieldlink_frame::crc16(body);
        format!("{:02x}{:02x}", crc[0], crc[1])
    }
}
