pub mod descriptor;

pub use descriptor::{normalize, Descriptor, FileEntry, RejectReason}; // re-export

/// Parses a 40-char hex infohash into its 20-byte form.
pub fn parse_infohash(hex_str: &str) -> Result<[u8; 20], hex::FromHexError> {
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(hex_str, &mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_infohash() {
        let bytes = parse_infohash("546cf15f724d19c4319cc17b179d7e035f89c1f4").unwrap();
        assert_eq!(hex::encode(bytes), "546cf15f724d19c4319cc17b179d7e035f89c1f4");
    }

    #[test]
    fn test_parse_infohash_rejects_bad_input() {
        assert!(parse_infohash("546c").is_err()); // too short
        assert!(parse_infohash("zz6cf15f724d19c4319cc17b179d7e035f89c1f4").is_err());
    }
}
