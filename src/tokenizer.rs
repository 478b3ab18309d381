//! Inline markup tokenizer.
//!
//! The grammar is an ordered table of anchored rules tried at the current
//! position; the first rule that matches wins. When none matches, a plain
//! text run is consumed up to the next character that could open a rule.

use crate::segment::{HeadingLevel, Segment};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// A successful rule match: the produced segment and how many bytes it used.
struct RuleMatch {
    segment: Segment,
    consumed: usize,
}

struct Rule {
    name: &'static str,
    apply: fn(&str) -> Option<RuleMatch>,
}

/// Rules in priority order.
const RULES: &[Rule] = &[
    Rule {
        name: "bold",
        apply: match_bold,
    },
    Rule {
        name: "italic",
        apply: match_italic,
    },
    Rule {
        name: "strikethrough",
        apply: match_strikethrough,
    },
    Rule {
        name: "heading",
        apply: match_heading,
    },
    Rule {
        name: "image",
        apply: match_image,
    },
    Rule {
        name: "link",
        apply: match_link,
    },
    Rule {
        name: "line-break",
        apply: match_line_break,
    },
];

/// Split `text` into inline segments.
///
/// Never fails and always terminates: every step consumes at least one
/// character. Segment contents are not tokenized recursively.
pub fn tokenize(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if let Some((name, m)) = RULES
            .iter()
            .find_map(|rule| (rule.apply)(rest).map(|m| (rule.name, m)))
        {
            tracing::trace!(rule = name, pos, consumed = m.consumed, "markup rule matched");
            segments.push(m.segment);
            pos += m.consumed;
            continue;
        }

        let run = plain_run_len(rest);
        segments.push(Segment::text(&rest[..run]));
        pos += run;
    }

    segments
}

/// Length in bytes of the plain text run at the start of `rest`.
///
/// Stops before the next possible rule opener. If the opener is the first
/// character (a trigger that did not match any rule) exactly one character
/// is taken so the scan always advances.
fn plain_run_len(rest: &str) -> usize {
    static TRIGGER_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = TRIGGER_REGEX.get_or_init(|| Regex::new(r#"[*_\-!"\n]|h[123]\."#).unwrap());

    match re.find(rest) {
        Some(m) if m.start() > 0 => m.start(),
        Some(_) => rest.chars().next().map_or(rest.len(), char::len_utf8),
        None => rest.len(),
    }
}

/// First participating capture group among `groups`.
fn first_group<'t>(caps: &Captures<'t>, groups: &[usize]) -> Option<&'t str> {
    groups
        .iter()
        .find_map(|&i| caps.get(i))
        .map(|m| m.as_str())
}

fn match_bold(rest: &str) -> Option<RuleMatch> {
    static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = BOLD_REGEX.get_or_init(|| Regex::new(r"^(?:\*\*([^*]+?)\*\*|\*([^*]+?)\*)").unwrap());

    let caps = re.captures(rest)?;
    Some(RuleMatch {
        segment: Segment::bold(first_group(&caps, &[1, 2])?),
        consumed: caps.get(0)?.end(),
    })
}

fn match_italic(rest: &str) -> Option<RuleMatch> {
    static ITALIC_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = ITALIC_REGEX.get_or_init(|| Regex::new(r"^(?:__([^_]+?)__|_([^_]+?)_)").unwrap());

    let caps = re.captures(rest)?;
    Some(RuleMatch {
        segment: Segment::italic(first_group(&caps, &[1, 2])?),
        consumed: caps.get(0)?.end(),
    })
}

fn match_strikethrough(rest: &str) -> Option<RuleMatch> {
    static STRIKE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = STRIKE_REGEX.get_or_init(|| Regex::new(r"^-([^\-\n]+?)-").unwrap());

    let caps = re.captures(rest)?;
    Some(RuleMatch {
        segment: Segment::strikethrough(caps.get(1)?.as_str()),
        consumed: caps.get(0)?.end(),
    })
}

fn match_heading(rest: &str) -> Option<RuleMatch> {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = HEADING_REGEX.get_or_init(|| Regex::new(r"^h([123])\. ?([^\n]*)").unwrap());

    let caps = re.captures(rest)?;
    let level = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(HeadingLevel::from_digit)?;
    Some(RuleMatch {
        segment: Segment::heading(level, caps.get(2)?.as_str()),
        consumed: caps.get(0)?.end(),
    })
}

fn match_image(rest: &str) -> Option<RuleMatch> {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = IMAGE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^!([^!\s]+\.(?:jpg|jpeg|png|gif|webp|svg))!").unwrap()
    });

    let caps = re.captures(rest)?;
    let url = caps.get(1)?.as_str();
    Some(RuleMatch {
        segment: Segment::image(url, image_alt(url)),
        consumed: caps.get(0)?.end(),
    })
}

/// File name of the image without its extension, e.g. `fluffy` for
/// `https://cdn.example/pets/fluffy.png`.
fn image_alt(url: &str) -> String {
    let file = url.rsplit('/').next().unwrap_or(url);
    file.rsplit_once('.')
        .map_or(file, |(stem, _)| stem)
        .to_string()
}

fn match_link(rest: &str) -> Option<RuleMatch> {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = LINK_REGEX.get_or_init(|| Regex::new(r#"^"([^"]+)":(\S+)"#).unwrap());

    let caps = re.captures(rest)?;
    Some(RuleMatch {
        segment: Segment::link(caps.get(1)?.as_str(), caps.get(2)?.as_str().trim()),
        consumed: caps.get(0)?.end(),
    })
}

fn match_line_break(rest: &str) -> Option<RuleMatch> {
    rest.starts_with('\n').then_some(RuleMatch {
        segment: Segment::LineBreak,
        consumed: 1,
    })
}
