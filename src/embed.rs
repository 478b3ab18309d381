use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Block-level widget kinds that can be embedded in a post body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbedKind {
    PetProfile,
    Poll,
}

impl EmbedKind {
    /// Tag name used in the bracket markup.
    pub fn tag(self) -> &'static str {
        match self {
            EmbedKind::PetProfile => "pet-profile",
            EmbedKind::Poll => "poll",
        }
    }
}

impl fmt::Display for EmbedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Location of one embed marker in the raw text.
///
/// `start..end` is the byte range of the whole marker including its tags;
/// `payload` is the text between the tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedSpan {
    pub kind: EmbedKind,
    pub start: usize,
    pub end: usize,
    pub payload: String,
}

impl EmbedSpan {
    pub fn overlaps(&self, other: &EmbedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Find every embed marker in `text`, sorted by start offset.
///
/// Each kind is scanned independently; spans of different kinds may overlap
/// and are all returned.
pub fn find_embeds(text: &str) -> Vec<EmbedSpan> {
    let mut spans = scan(text, EmbedKind::PetProfile, pet_profile_regex());
    spans.extend(scan(text, EmbedKind::Poll, poll_regex()));
    spans.sort_by_key(|span| span.start);
    spans
}

fn scan(text: &str, kind: EmbedKind, re: &Regex) -> Vec<EmbedSpan> {
    re.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(EmbedSpan {
                kind,
                start: whole.start(),
                end: whole.end(),
                payload: caps.get(1)?.as_str().to_string(),
            })
        })
        .collect()
}

fn pet_profile_regex() -> &'static Regex {
    static PET_PROFILE_REGEX: OnceLock<Regex> = OnceLock::new();
    PET_PROFILE_REGEX
        .get_or_init(|| Regex::new(r"\[pet-profile\]([^\[\]]+)\[/pet-profile\]").unwrap())
}

fn poll_regex() -> &'static Regex {
    static POLL_REGEX: OnceLock<Regex> = OnceLock::new();
    POLL_REGEX.get_or_init(|| Regex::new(r"(?s)\[poll\](.*?)\[/poll\]").unwrap())
}
