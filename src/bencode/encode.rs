use super::BValue;

/// Encode a `BValue` back into a bencoded `Vec<u8>`.
///
/// Dictionary pairs are written in stored order. The decoder preserves wire
/// order, so decoding and re-encoding reproduces the input bytes; re-sorting
/// here would corrupt infohash derivation downstream.
pub fn encode_bvalue(value: &BValue) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();

    match value {
        BValue::Integer(i) => {
            out.push(b'i');
            out.extend_from_slice(i.to_string().as_bytes());
            out.push(b'e');
        }
        BValue::ByteString(bytes) => {
            out.extend_from_slice(bytes.len().to_string().as_bytes());
            out.push(b':');
            out.extend_from_slice(bytes);
        }
        BValue::List(items) => {
            out.push(b'l');
            for item in items {
                out.extend_from_slice(&encode_bvalue(item));
            }
            out.push(b'e');
        }
        BValue::Dict(pairs) => {
            out.push(b'd');
            for (key, val) in pairs {
                out.extend_from_slice(key.len().to_string().as_bytes());
                out.push(b':');
                out.extend_from_slice(key);
                out.extend_from_slice(&encode_bvalue(val));
            }
            out.push(b'e');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::decode;

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode_bvalue(&BValue::Integer(-7)), b"i-7e");
        assert_eq!(
            encode_bvalue(&BValue::ByteString(b"spam".to_vec())),
            b"4:spam"
        );
    }

    #[test]
    fn test_encode_keeps_dict_order() {
        let dict = BValue::Dict(vec![
            (b"zeta".to_vec(), BValue::Integer(1)),
            (b"alpha".to_vec(), BValue::Integer(2)),
        ]);
        assert_eq!(encode_bvalue(&dict), b"d4:zetai1e5:alphai2ee");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let value = BValue::Dict(vec![
            (b"name".to_vec(), BValue::ByteString(b"a/b".to_vec())),
            (
                b"files".to_vec(),
                BValue::List(vec![BValue::Dict(vec![
                    (
                        b"path".to_vec(),
                        BValue::List(vec![BValue::ByteString(b"b".to_vec())]),
                    ),
                    (b"length".to_vec(), BValue::Integer(9)),
                ])]),
            ),
        ]);
        let encoded = encode_bvalue(&value);
        assert_eq!(decode(&encoded).unwrap(), value);
    }
}
