use crate::embed::{find_embeds, EmbedKind, EmbedSpan};
use crate::poll::{poll_id, PollDefinition};
use crate::segment::Segment;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};

/// One unit handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderNode {
    /// A run of inline segments.
    Text { segments: Vec<Segment> },
    /// A pet profile card; `pet_id` is passed through opaque.
    PetProfile { pet_id: String },
    /// A well-formed poll.
    Poll {
        poll_id: String,
        question: String,
        options: Vec<String>,
    },
}

impl RenderNode {
    pub fn embed_kind(&self) -> Option<EmbedKind> {
        match self {
            RenderNode::Text { .. } => None,
            RenderNode::PetProfile { .. } => Some(EmbedKind::PetProfile),
            RenderNode::Poll { .. } => Some(EmbedKind::Poll),
        }
    }

    pub fn segments(&self) -> Option<&[Segment]> {
        match self {
            RenderNode::Text { segments } => Some(segments),
            _ => None,
        }
    }
}

/// What to do with an embed that starts inside the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Emit every embed found, as the extractor reports them.
    #[default]
    EmitAll,
    /// Ignore an embed whose start lies before the end of the last emitted one.
    SkipOverlapping,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssembleOptions {
    pub overlap: OverlapPolicy,
}

/// Assemble a post body into render nodes with default options.
pub fn assemble(text: &str) -> Vec<RenderNode> {
    assemble_with(text, &AssembleOptions::default())
}

/// Assemble a post body into render nodes.
///
/// Text between embeds is trimmed and tokenized; whitespace-only gaps are
/// dropped. Malformed polls produce no node at all. Without any embed the
/// whole body becomes a single text node.
pub fn assemble_with(text: &str, options: &AssembleOptions) -> Vec<RenderNode> {
    let spans = find_embeds(text);
    if spans.is_empty() {
        return vec![RenderNode::Text {
            segments: tokenize(text),
        }];
    }

    let mut nodes = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in &spans {
        if options.overlap == OverlapPolicy::SkipOverlapping && span.start < cursor {
            tracing::debug!(kind = %span.kind, start = span.start, "skipping overlapping embed");
            continue;
        }

        if span.start > cursor {
            push_text(&mut nodes, &text[cursor..span.start]);
        }

        if let Some(node) = embed_node(span) {
            nodes.push(node);
        }

        cursor = span.end;
    }

    if cursor < text.len() {
        push_text(&mut nodes, &text[cursor..]);
    }

    nodes
}

fn push_text(nodes: &mut Vec<RenderNode>, gap: &str) {
    let trimmed = gap.trim();
    if !trimmed.is_empty() {
        nodes.push(RenderNode::Text {
            segments: tokenize(trimmed),
        });
    }
}

fn embed_node(span: &EmbedSpan) -> Option<RenderNode> {
    match span.kind {
        EmbedKind::PetProfile => Some(RenderNode::PetProfile {
            pet_id: span.payload.clone(),
        }),
        EmbedKind::Poll => match PollDefinition::parse(&span.payload) {
            Some(poll) => Some(RenderNode::Poll {
                poll_id: poll_id(&span.payload, span.start),
                question: poll.question,
                options: poll.options,
            }),
            None => {
                tracing::debug!(start = span.start, "dropping malformed poll embed");
                None
            }
        },
    }
}
