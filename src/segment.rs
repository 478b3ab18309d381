use serde::{Deserialize, Serialize};

/// One classified inline unit of a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment {
    Text { content: String },
    Bold { content: String },
    Italic { content: String },
    Strikethrough { content: String },
    Heading { content: String, level: HeadingLevel },
    /// `content` is the display text, `href` the raw target as authored.
    Link { content: String, href: String },
    /// `content` is the image url.
    Image { content: String, alt: String },
    LineBreak,
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        Segment::Bold {
            content: content.into(),
        }
    }

    pub fn italic(content: impl Into<String>) -> Self {
        Segment::Italic {
            content: content.into(),
        }
    }

    pub fn strikethrough(content: impl Into<String>) -> Self {
        Segment::Strikethrough {
            content: content.into(),
        }
    }

    pub fn heading(level: HeadingLevel, content: impl Into<String>) -> Self {
        Segment::Heading {
            content: content.into(),
            level,
        }
    }

    pub fn link(content: impl Into<String>, href: impl Into<String>) -> Self {
        Segment::Link {
            content: content.into(),
            href: href.into(),
        }
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Segment::Image {
            content: url.into(),
            alt: alt.into(),
        }
    }

    /// The text this segment carries, without any markup delimiters.
    /// Line breaks contribute a single `\n`.
    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content }
            | Segment::Bold { content }
            | Segment::Italic { content }
            | Segment::Strikethrough { content }
            | Segment::Heading { content, .. }
            | Segment::Link { content, .. }
            | Segment::Image { content, .. } => content,
            Segment::LineBreak => "\n",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text { .. })
    }
}

/// Heading levels the markup supports (`h1.`, `h2.`, `h3.`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

/// Fixed presentation entry for a heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingStyle {
    pub tag: &'static str,
    pub class: &'static str,
}

const HEADING_STYLES: [HeadingStyle; 3] = [
    HeadingStyle {
        tag: "h1",
        class: "text-2xl font-bold mb-2",
    },
    HeadingStyle {
        tag: "h2",
        class: "text-xl font-bold mb-2",
    },
    HeadingStyle {
        tag: "h3",
        class: "text-lg font-semibold mb-1",
    },
];

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Map the digit following `h` in the markup to a level.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(HeadingLevel::H1),
            '2' => Some(HeadingLevel::H2),
            '3' => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    pub fn style(self) -> &'static HeadingStyle {
        &HEADING_STYLES[usize::from(self.number() - 1)]
    }
}
