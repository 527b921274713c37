use super::bvalue::BValue;
use super::error::BencodeError;

/// Deepest composite nesting accepted from the network. Anything deeper is a
/// nesting bomb, not a torrent.
pub const MAX_DEPTH: usize = 32;

/// Decodes a complete metadata blob. The blob must contain exactly one value;
/// trailing bytes are rejected so that two distinct byte strings can never
/// decode to the same value.
pub fn decode(input: &[u8]) -> Result<BValue, BencodeError> {
    let (consumed, value) = decode_bencode(input)?;
    if consumed != input.len() {
        return Err(BencodeError::TrailingBytes(input.len() - consumed));
    }
    Ok(value)
}

/// Decodes one bencoded value from the front of `input`, returning the number
/// of bytes consumed alongside it.
pub fn decode_bencode(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    decode_value(input, 0)
}

fn decode_value(input: &[u8], depth: usize) -> Result<(usize, BValue), BencodeError> {
    if depth > MAX_DEPTH {
        return Err(BencodeError::TooDeep(MAX_DEPTH));
    }
    if input.is_empty() {
        return Err(BencodeError::UnexpectedEnd);
    }

    match input[0] {
        b'i' => decode_integer(input),
        b'l' => decode_list(input, depth),
        b'd' => decode_dict(input, depth),
        c if c.is_ascii_digit() => decode_string(input),
        c => Err(BencodeError::InvalidFormat(format!(
            "Unexpected byte: {}",
            c
        ))),
    }
}

fn decode_integer(input: &[u8]) -> Result<(usize, BValue), BencodeError> {
    // Caller guarantees input[0] == 'i'.
    let end_pos = input
        .iter()
        .position(|&b| b == b'e')
        .ok_or_else(|| BencodeError::InvalidFormat("Missing 'e' for integer".to_string()))?;

    let num_str = std::str::from_utf8(&input[1..end_pos])
        .map_err(|_| BencodeError::InvalidFormat("Non-UTF-8 data in integer".to_string()))?;

    if num_str.is_empty() || num_str == "-" {
        return Err(BencodeError::InvalidInteger("empty integer".to_string()));
    }

    // i0e is the only zero spelling; i-0e and leading zeros are invalid.
    if (num_str.len() > 1 && num_str.starts_with('0')) || num_str.starts_with("-0") {
        return Err(BencodeError::InvalidInteger(format!(
            "Leading zeros are not allowed: {}",
            num_str
        )));
    }

    let parsed = num_str
        .parse::<i64>()
        .map_err(|e| BencodeError::InvalidInteger(format!("Failed to parse '{}': {}", num_str, e)))?;

    // add 1 to account for 'e'
    Ok((end_pos + 1, BValue::Integer(parsed)))
}

/// Decodes a bencoded string of the form `<length>:<bytes>`.
fn decode_string(encoded: &[u8]) -> Result<(usize, BValue), BencodeError> {
    let digits_end = encoded
        .iter()
        .position(|b| !b.is_ascii_digit())
        .ok_or(BencodeError::UnexpectedEnd)?;

    if encoded[digits_end] != b':' {
        return Err(BencodeError::InvalidFormat(format!(
            "Expected ':' after string length, found byte {}",
            encoded[digits_end]
        )));
    }

    let len_str = std::str::from_utf8(&encoded[..digits_end])
        .map_err(|_| BencodeError::InvalidFormat("Non-UTF-8 string length".to_string()))?;
    let length = len_str.parse::<usize>().map_err(|e| {
        BencodeError::InvalidFormat(format!("Invalid String Length:{} err: {}", len_str, e))
    })?;

    let start_data = digits_end + 1;
    let remaining = encoded.len() - start_data;

    // The declared length comes from the peer. Check it against the buffer
    // before allocating so a short packet cannot claim a multi-gigabyte string.
    let end_data = start_data
        .checked_add(length)
        .ok_or(BencodeError::LengthOverrun { declared: length, remaining })?;
    if end_data > encoded.len() {
        return Err(BencodeError::LengthOverrun { declared: length, remaining });
    }

    let data = &encoded[start_data..end_data];
    Ok((end_data, BValue::ByteString(data.to_vec())))
}

/// Decodes a bencoded list of the form `l<items>e`.
fn decode_list(encoded: &[u8], depth: usize) -> Result<(usize, BValue), BencodeError> {
    let mut idx = 1; // skip 'l'
    let mut items = Vec::new();

    while idx < encoded.len() && encoded[idx] != b'e' {
        let (consumed, val) = decode_value(&encoded[idx..], depth + 1)?;
        idx += consumed;
        items.push(val);
    }

    // If we've run out of input, the list is unclosed
    if idx >= encoded.len() {
        return Err(BencodeError::InvalidFormat(
            "Unclosed list (missing 'e')".to_string(),
        ));
    }

    // add 1 to account for 'e'
    Ok((idx + 1, BValue::List(items)))
}

fn decode_dict(encoded: &[u8], depth: usize) -> Result<(usize, BValue), BencodeError> {
    let mut idx = 1; // skip 'd'
    let mut pairs: Vec<(Vec<u8>, BValue)> = Vec::new();

    while idx < encoded.len() && encoded[idx] != b'e' {
        // Dictionary keys must be strings
        if !encoded[idx].is_ascii_digit() {
            return Err(BencodeError::InvalidFormat(
                "Dict key must be a ByteString".to_string(),
            ));
        }
        let (key_len, key_value) = decode_string(&encoded[idx..])?;
        idx += key_len;
        let key = match key_value {
            BValue::ByteString(bytes) => bytes,
            _ => {
                return Err(BencodeError::InvalidFormat(
                    "Dict key must be a ByteString".to_string(),
                ));
            }
        };

        if pairs.iter().any(|(k, _)| *k == key) {
            return Err(BencodeError::DuplicateKey(
                String::from_utf8_lossy(&key).into_owned(),
            ));
        }

        // Decode the value (can be int, string, list, or dict)
        let (consumed_val, value) = decode_value(&encoded[idx..], depth + 1)?;
        idx += consumed_val;

        pairs.push((key, value));
    }

    // Here, either we ran out of input or we encountered an 'e'
    if idx >= encoded.len() {
        return Err(BencodeError::InvalidFormat(
            "Unclosed dictionary (missing 'e')".to_string(),
        ));
    }

    // add 1 to account for 'e'
    Ok((idx + 1, BValue::Dict(pairs)))
}
