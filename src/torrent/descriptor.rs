use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bencode::BValue;

/// One file inside a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: Vec<String>, // ordered path segments, each non-empty
    pub length: u64,
}

/// The validated record produced from a metadata blob.
///
/// At most one of `files` (multi-file layout) and `length` (single-file
/// layout) is populated; absent fields are omitted from the JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub infohash: String, // 40 lowercase hex chars
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
}

/// Why a well-formed blob was refused. Rejection is routine for metadata
/// pulled off the open network, so these are values, not panics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("metadata root is not a dictionary")]
    NotADictionary,

    #[error("missing or malformed name field")]
    MissingName,

    #[error("malformed entry in files list")]
    MalformedFileEntry,
}

/// Validates a decoded metadata value against the announced infohash and
/// builds the canonical descriptor.
///
/// A present-but-mistyped `files` or `length` falls through to the next
/// layout rule; a record with neither ends up as a name-only descriptor,
/// which is still emitted.
pub fn normalize(metadata: &BValue, info_hash: &[u8; 20]) -> Result<Descriptor, RejectReason> {
    if metadata.as_dict().is_none() {
        return Err(RejectReason::NotADictionary);
    }

    let name = metadata
        .get(b"name")
        .and_then(BValue::as_str)
        .filter(|n| !n.is_empty())
        .ok_or(RejectReason::MissingName)?;

    let mut descriptor = Descriptor {
        infohash: hex::encode(info_hash),
        name: name.to_string(),
        files: None,
        length: None,
    };

    if let Some(files) = metadata.get(b"files").and_then(BValue::as_list) {
        // One bad entry poisons the whole record; a half-built descriptor
        // must never reach the output stream.
        let entries = files
            .iter()
            .map(file_entry)
            .collect::<Result<Vec<_>, _>>()?;
        descriptor.files = Some(entries);
    } else if let Some(length) = metadata
        .get(b"length")
        .and_then(BValue::as_int)
        .filter(|l| *l >= 0)
    {
        descriptor.length = Some(length as u64);
    }

    Ok(descriptor)
}

fn file_entry(entry: &BValue) -> Result<FileEntry, RejectReason> {
    let length = entry
        .get(b"length")
        .and_then(BValue::as_int)
        .filter(|l| *l >= 0)
        .ok_or(RejectReason::MalformedFileEntry)? as u64;

    let segments = entry
        .get(b"path")
        .and_then(BValue::as_list)
        .ok_or(RejectReason::MalformedFileEntry)?;
    if segments.is_empty() {
        return Err(RejectReason::MalformedFileEntry);
    }

    let path = segments
        .iter()
        .map(|seg| {
            seg.as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .ok_or(RejectReason::MalformedFileEntry)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FileEntry { path, length })
}
