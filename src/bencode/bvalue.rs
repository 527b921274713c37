/// A decoded bencode value.
///
/// Dictionaries keep their pairs in the order they appeared on the wire; that
/// order feeds into infohash derivation elsewhere and must never be shuffled.
/// Keys are raw bytes because remote peers are free to send non-UTF-8 keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
    ByteString(Vec<u8>),
    Integer(i64),
    List(Vec<BValue>),
    Dict(Vec<(Vec<u8>, BValue)>),
}

impl BValue {
    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&BValue> {
        match self {
            BValue::Dict(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_slice() == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BValue::ByteString(b) => Some(b),
            _ => None,
        }
    }

    /// The byte string as UTF-8, or `None` if it is not a string or not UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            BValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[BValue]> {
        match self {
            BValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&[(Vec<u8>, BValue)]> {
        match self {
            BValue::Dict(pairs) => Some(pairs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_finds_key_in_dict() {
        let dict = BValue::Dict(vec![
            (b"name".to_vec(), BValue::Integer(1)),
            (b"other".to_vec(), BValue::Integer(2)),
        ]);
        assert_eq!(dict.get(b"name"), Some(&BValue::Integer(1)));
        assert_eq!(dict.get(b"other"), Some(&BValue::Integer(2)));
        assert_eq!(dict.get(b"missing"), None);
    }

    #[test]
    fn test_get_on_non_dict() {
        assert_eq!(BValue::Integer(7).get(b"name"), None);
        assert_eq!(BValue::List(vec![]).get(b"name"), None);
    }

    #[test]
    fn test_checked_accessors_reject_wrong_variant() {
        let s = BValue::ByteString(b"spam".to_vec());
        assert_eq!(s.as_str(), Some("spam"));
        assert_eq!(s.as_int(), None);
        assert_eq!(s.as_list(), None);
        assert_eq!(s.as_dict(), None);

        let i = BValue::Integer(-3);
        assert_eq!(i.as_int(), Some(-3));
        assert_eq!(i.as_bytes(), None);
    }

    #[test]
    fn test_as_str_rejects_invalid_utf8() {
        let s = BValue::ByteString(vec![0xff, 0xfe]);
        assert_eq!(s.as_str(), None);
        assert_eq!(s.as_bytes(), Some(&[0xff, 0xfe][..]));
    }
}
