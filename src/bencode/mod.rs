pub mod bvalue;
pub mod decode;
pub mod encode;
pub mod error;

pub use bvalue::BValue; // re-export
pub use decode::{decode, decode_bencode, MAX_DEPTH}; // re-export
pub use encode::encode_bvalue; // re-export
pub use error::BencodeError;
