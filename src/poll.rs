use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const OPTION_PREFIX: &str = "- ";
const MIN_OPTIONS: usize = 2;
/// Bytes of the payload digest kept in a poll id.
const POLL_ID_DIGEST_BYTES: usize = 8;

/// A poll parsed from a `[poll]...[/poll]` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollDefinition {
    pub question: String,
    pub options: Vec<String>,
}

impl PollDefinition {
    /// Parse a poll payload.
    ///
    /// The first non-empty line is the question; following lines starting
    /// with `"- "` are options. Returns `None` unless there are at least
    /// three non-empty lines and two options.
    pub fn parse(payload: &str) -> Option<Self> {
        let lines: Vec<&str> = payload
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.len() < MIN_OPTIONS + 1 {
            return None;
        }

        let options: Vec<String> = lines[1..]
            .iter()
            .filter_map(|line| line.strip_prefix(OPTION_PREFIX))
            .map(|option| option.trim().to_string())
            .collect();

        if options.len() < MIN_OPTIONS {
            return None;
        }

        Some(Self {
            question: lines[0].to_string(),
            options,
        })
    }
}

/// Identifier for a poll embed: a digest of the trimmed payload plus the
/// byte offset of the marker.
///
/// Identical input always yields the same id, but the id changes whenever
/// text before the marker changes length.
pub fn poll_id(payload: &str, start: usize) -> String {
    let digest = format!("{:x}", Sha256::digest(payload.trim().as_bytes()));
    format!("poll-{}-{}", &digest[..POLL_ID_DIGEST_BYTES * 2], start)
}
