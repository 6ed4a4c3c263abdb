//! The binary form of an [`Executable`].
//!
//! Layout: [`MAGIC`], the format [`VERSION`] as a little-endian `u16`, then
//! the executable in bincode's standard configuration.

use alloc::vec::Vec;
use std::io::{Read, Write};

use crate::bytecode::Executable;
use crate::error::ContainerError;

pub const MAGIC: [u8; 4] = *b"CPKL";
pub const VERSION: u16 = 1;

const HEADER_LEN: usize = MAGIC.len() + 2;

/// Encodes `executable` with its header.
pub fn to_bytes(executable: &Executable) -> Result<Vec<u8>, ContainerError> {
    let payload = bincode::serde::encode_to_vec(executable, bincode::config::standard())?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decodes an executable, checking the header and that no bytes follow.
pub fn from_bytes(bytes: &[u8]) -> Result<Executable, ContainerError> {
    let Some((magic, rest)) = bytes.split_first_chunk::<4>() else {
        return Err(ContainerError::BadMagic);
    };
    if *magic != MAGIC {
        return Err(ContainerError::BadMagic);
    }
    let Some((version, payload)) = rest.split_first_chunk::<2>() else {
        return Err(ContainerError::UnsupportedVersion {
            found: 0,
            expected: VERSION,
        });
    };
    let version = u16::from_le_bytes(*version);
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion {
            found: version,
            expected: VERSION,
        });
    }

    let (executable, read): (Executable, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;
    match payload.len() - read {
        0 => Ok(executable),
        trailing => Err(ContainerError::TrailingBytes(trailing)),
    }
}

/// Writes `executable` to `writer`.
pub fn write_to(executable: &Executable, mut writer: impl Write) -> Result<(), ContainerError> {
    writer.write_all(&to_bytes(executable)?)?;
    Ok(())
}

/// Reads an executable from `reader`, consuming it to the end.
pub fn read_from(mut reader: impl Read) -> Result<Executable, ContainerError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{MAGIC, VERSION, from_bytes, read_from, to_bytes, write_to};
    use crate::bytecode::{CodeObject, Const, Executable, Instruction};
    use crate::error::ContainerError;

    fn sample() -> Executable {
        Executable {
            names: vec![String::from("retval")],
            consts: vec![Const::Int(2123), Const::Float(0.5)],
            functions: Vec::new(),
            main: CodeObject {
                name: String::from("<main>"),
                instructions: vec![Instruction::LoadConst(0), Instruction::StoreName(0)],
            },
        }
    }

    #[test]
    fn header_layout() {
        let bytes = to_bytes(&sample()).unwrap();
        assert_eq!(bytes[..4], MAGIC);
        assert_eq!(bytes[4..6], VERSION.to_le_bytes());
        assert_eq!(from_bytes(&bytes).unwrap(), sample());
    }

    #[test]
    fn io_helpers() {
        let mut buffer = Vec::new();
        write_to(&sample(), &mut buffer).unwrap();
        assert_eq!(read_from(buffer.as_slice()).unwrap(), sample());
    }

    #[test]
    fn rejects_bad_headers() {
        let mut bytes = to_bytes(&sample()).unwrap();

        assert!(matches!(from_bytes(b"CP"), Err(ContainerError::BadMagic)));
        assert!(matches!(from_bytes(b"NOPE\x01\x00"), Err(ContainerError::BadMagic)));

        bytes[4] = 7;
        assert!(matches!(
            from_bytes(&bytes),
            Err(ContainerError::UnsupportedVersion {
                found: 7,
                expected: 1
            })
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = to_bytes(&sample()).unwrap();
        bytes.extend_from_slice(&[0, 0]);
        assert!(matches!(from_bytes(&bytes), Err(ContainerError::TrailingBytes(2))));

        let bytes = to_bytes(&sample()).unwrap();
        assert!(matches!(
            from_bytes(&bytes[..bytes.len() - 1]),
            Err(ContainerError::Decode(_))
        ));
    }
}
