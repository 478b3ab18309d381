//! # Forum markup
//!
//! Parser and renderer for the rich-text markup used in forum posts and
//! replies on the pet site.
//!
//! ## Features
//! - Inline formatting: bold, italic, strikethrough, headings, images, links
//! - Block embeds: pet profile cards and polls
//! - Link resolution that always navigates in a new browsing context
//! - Safe HTML output with YAML-configurable classes
//!
//! ## Example
//! ```ignore
//! use forum_markup::{assemble, Config, HtmlRenderer};
//!
//! let body = "Meet **Biscuit**! [pet-profile]abc123[/pet-profile]";
//! let nodes = assemble(body);
//! let config = Config::default();
//! let html = HtmlRenderer::new(&config).with_post_id("42").render(&nodes);
//! ```

pub mod config;
pub mod document;
pub mod embed;
pub mod error;
pub mod html;
pub mod link;
pub mod poll;
pub mod segment;
pub mod tokenizer;

pub use config::Config;
pub use document::{AssembleOptions, OverlapPolicy, RenderNode};
pub use embed::{EmbedKind, EmbedSpan};
pub use error::{MarkupError, MarkupResult};
pub use html::HtmlRenderer;
pub use link::Navigator;
pub use poll::PollDefinition;
pub use segment::{HeadingLevel, HeadingStyle, Segment};

/// Split raw post text into inline segments.
pub fn tokenize(text: &str) -> Vec<Segment> {
    tokenizer::tokenize(text)
}

/// Locate pet-profile and poll embeds, sorted by start offset.
pub fn find_embeds(text: &str) -> Vec<EmbedSpan> {
    embed::find_embeds(text)
}

/// Assemble a post body into render nodes.
pub fn assemble(text: &str) -> Vec<RenderNode> {
    document::assemble(text)
}

/// Assemble a post body using the assembly section of `config`.
pub fn assemble_with_config(text: &str, config: &Config) -> Vec<RenderNode> {
    let options = AssembleOptions {
        overlap: config.assembly.overlap,
    };
    document::assemble_with(text, &options)
}

/// Resolve a link target and open it in a new browsing context.
pub fn resolve_and_open<N: Navigator + ?Sized>(href: &str, navigator: &mut N) -> MarkupResult<()> {
    link::resolve_and_open(href, navigator)
}

/// Assemble and render a post body to HTML.
pub fn render_html(text: &str, config: &Config) -> String {
    HtmlRenderer::new(config).render(&assemble_with_config(text, config))
}
