use std::{fs, path::Path};

use bytes::Bytes;
use tracing::{debug, error};

use crate::{utils::strings::decode_hex, Error};

/// Given a target, determines whether it is a file path or inline hex, and returns the
/// bytecode for the target.
///
/// Whitespace anywhere in the hex is ignored, so bytecode files may be wrapped across lines.
///
/// ```
/// use evmi_common::bytecode::load_bytecode;
///
/// let bytecode = load_bytecode("0x60 0a\n60 00").expect("valid hex");
/// assert_eq!(bytecode.as_ref(), &[0x60, 0x0a, 0x60, 0x00]);
/// ```
pub fn load_bytecode(target: &str) -> Result<Bytes, Error> {
    let contents = if Path::new(target).is_file() {
        debug!("reading bytecode from file '{}'", target);
        fs::read_to_string(target).map_err(|e| {
            error!("failed to open file '{}'", target);
            Error::FilesystemError(e)
        })?
    } else {
        target.to_owned()
    };

    let hex = contents.split_whitespace().collect::<String>();
    let bytecode = decode_hex(&hex).map_err(|e| {
        error!("target '{}' doesn't contain valid bytecode", target);
        e
    })?;

    debug!("loaded {} bytes of bytecode", bytecode.len());
    Ok(Bytes::from(bytecode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::io::file::write_file;

    #[test]
    fn test_inline_hex() {
        assert_eq!(load_bytecode("60ff").expect("valid hex").as_ref(), &[0x60, 0xff]);
        assert_eq!(load_bytecode("0x").expect("valid hex").len(), 0);
    }

    #[test]
    fn test_invalid_inline_hex() {
        assert!(load_bytecode("60f").is_err());
        assert!(load_bytecode("not bytecode").is_err());
    }

    #[test]
    fn test_file_target() {
        let path = std::env::temp_dir()
            .join(format!("evmi-bytecode-{}", std::process::id()))
            .join("program.hex");
        let path = path.to_str().expect("utf8 path");
        write_file(path, "0x600a\n600052\n").expect("write");

        assert_eq!(
            load_bytecode(path).expect("valid file").as_ref(),
            &[0x60, 0x0a, 0x60, 0x00, 0x52]
        );

        let _ = std::fs::remove_file(path);
    }
}
