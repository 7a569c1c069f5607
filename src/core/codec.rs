use crate::domain::model::Vote;
use crate::utils::error::{Result, VotifierError};

/// Leading token every well-formed payload starts with.
pub const OPCODE: &str = "VOTE";

/// Parses a decrypted payload into a `Vote`.
///
/// The payload is the `VOTE` opcode followed by four newline-terminated fields
/// in fixed order: service name, username, address, timestamp. The encryption
/// block is padded past the payload, so anything after the fourth field is
/// ignored.
pub fn parse(plaintext: &[u8]) -> Result<Vote> {
    let mut position = 0;

    let opcode = read_field(plaintext, &mut position, "opcode")?;
    if opcode != OPCODE {
        return Err(VotifierError::protocol(format!(
            "unexpected opcode '{}'",
            opcode
        )));
    }

    let service_name = read_field(plaintext, &mut position, "service name")?;
    let username = read_field(plaintext, &mut position, "username")?;
    let address = read_field(plaintext, &mut position, "address")?;
    let timestamp = read_field(plaintext, &mut position, "timestamp")?;

    for (name, value) in [
        ("service name", &service_name),
        ("username", &username),
        ("address", &address),
        ("timestamp", &timestamp),
    ] {
        if value.is_empty() {
            return Err(VotifierError::protocol(format!("empty {} field", name)));
        }
    }

    Ok(Vote {
        service_name,
        username,
        address,
        timestamp,
    })
}

/// Reads one newline-terminated field starting at `position`, advancing past
/// the terminator.
fn read_field(buf: &[u8], position: &mut usize, name: &str) -> Result<String> {
    let rest = buf
        .get(*position..)
        .ok_or_else(|| VotifierError::protocol(format!("missing {} field", name)))?;

    let end = rest
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| VotifierError::protocol(format!("unterminated {} field", name)))?;

    let field = std::str::from_utf8(&rest[..end])
        .map_err(|_| VotifierError::protocol(format!("{} field is not valid UTF-8", name)))?;

    *position += end + 1;
    Ok(field.to_string())
}
