//! Renders assembled post bodies to a safe HTML fragment.
//! All text and attribute values are escaped; links always open in a new tab.

use crate::config::Config;
use crate::document::RenderNode;
use crate::link::{is_blocked_scheme, resolve_href};
use crate::segment::Segment;
use std::fmt::{self, Write};

const TEXT_BLOCK_CLASS: &str = "forum-text";

/// HTML renderer for [`RenderNode`]s.
#[derive(Debug, Clone)]
pub struct HtmlRenderer<'a> {
    config: &'a Config,
    post_id: Option<String>,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            post_id: None,
        }
    }

    /// Post the rendered body belongs to; passed to poll widgets.
    pub fn with_post_id(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    pub fn render(&self, nodes: &[RenderNode]) -> String {
        let mut out = String::new();
        if let Err(e) = self.write_to(nodes, &mut out) {
            tracing::warn!(error = %e, "html rendering stopped early");
        }
        out
    }

    /// Write the HTML for `nodes` into any `fmt::Write` sink.
    pub fn write_to<W: Write>(&self, nodes: &[RenderNode], out: &mut W) -> fmt::Result {
        for node in nodes {
            self.render_node(node, out)?;
        }
        Ok(())
    }

    fn render_node<W: Write>(&self, node: &RenderNode, out: &mut W) -> fmt::Result {
        match node {
            RenderNode::Text { segments } => {
                write!(out, "<div class=\"{}\">", TEXT_BLOCK_CLASS)?;
                for segment in segments {
                    self.render_segment(segment, out)?;
                }
                out.write_str("</div>")?;
            }
            RenderNode::PetProfile { pet_id } => {
                write!(
                    out,
                    "<div class=\"{}\" data-pet-id=\"{}\"></div>",
                    escape_html(&self.config.embeds.pet_profile_class),
                    escape_html(pet_id)
                )?;
            }
            RenderNode::Poll {
                poll_id,
                question,
                options,
            } => {
                write!(
                    out,
                    "<div class=\"{}\" data-poll-id=\"{}\"",
                    escape_html(&self.config.embeds.poll_class),
                    escape_html(poll_id)
                )?;
                if let Some(post_id) = &self.post_id {
                    write!(out, " data-post-id=\"{}\"", escape_html(post_id))?;
                }
                write!(out, "><p>{}</p><ul>", escape_html(question))?;
                for option in options {
                    write!(out, "<li>{}</li>", escape_html(option))?;
                }
                out.write_str("</ul></div>")?;
            }
        }
        Ok(())
    }

    fn render_segment<W: Write>(&self, segment: &Segment, out: &mut W) -> fmt::Result {
        match segment {
            Segment::Text { content } => out.write_str(&escape_html(content))?,
            Segment::Bold { content } => write!(out, "<strong>{}</strong>", escape_html(content))?,
            Segment::Italic { content } => write!(out, "<em>{}</em>", escape_html(content))?,
            Segment::Strikethrough { content } => {
                write!(out, "<del>{}</del>", escape_html(content))?
            }
            Segment::Heading { content, level } => {
                let tag = level.style().tag;
                write!(
                    out,
                    "<{tag} class=\"{}\">{}</{tag}>",
                    escape_html(self.config.headings.class_for(*level)),
                    escape_html(content)
                )?;
            }
            Segment::Link { content, href } => {
                let mut url = resolve_href(href);
                if is_blocked_scheme(&url) {
                    tracing::debug!(href = %href, "neutralising blocked link scheme");
                    url = "#".to_string();
                }
                write!(
                    out,
                    "<a class=\"{}\" href=\"{}\" target=\"_blank\" rel=\"{}\">{}</a>",
                    escape_html(&self.config.links.class),
                    escape_html(&url),
                    escape_html(&self.config.links.rel),
                    escape_html(content)
                )?;
            }
            Segment::Image { content, alt } => {
                write!(
                    out,
                    "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                    escape_html(content),
                    escape_html(alt)
                )?;
            }
            Segment::LineBreak => out.write_str("<br>")?,
        }
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::assemble;
    use crate::segment::HeadingLevel;

    fn render(nodes: &[RenderNode]) -> String {
        HtmlRenderer::new(&Config::default()).render(nodes)
    }

    #[test]
    fn test_inline_segments() {
        let html = render(&assemble("**a** _b_ -c-\nd"));
        assert_eq!(
            html,
            "<div class=\"forum-text\"><strong>a</strong> <em>b</em> <del>c</del><br>d</div>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render(&assemble("<script>alert('x')</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_link_opens_new_tab_with_resolved_href() {
        let html = render(&assemble(r#""click here":example.com"#));
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.contains("rel=\"noopener noreferrer\""));
        assert!(html.contains(">click here</a>"));
    }

    #[test]
    fn test_javascript_link_neutralised() {
        let html = render(&assemble(r#""x":javascript:alert(1)"#));
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_javascript_link_behind_control_character_neutralised() {
        let html = render(&assemble("\"x\":\u{1}javascript:alert(1)"));
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_heading_uses_lookup_table_and_override() {
        let nodes = vec![RenderNode::Text {
            segments: vec![Segment::heading(HeadingLevel::H3, "Care")],
        }];
        let default_html = render(&nodes);
        assert_eq!(
            default_html,
            format!(
                "<div class=\"forum-text\"><h3 class=\"{}\">Care</h3></div>",
                HeadingLevel::H3.style().class
            )
        );

        let config = Config::from_yaml("headings:\n  h3: sub\n").unwrap();
        let custom_html = HtmlRenderer::new(&config).render(&nodes);
        assert!(custom_html.contains("<h3 class=\"sub\">Care</h3>"));
    }

    #[test]
    fn test_image() {
        let html = render(&assemble("!pets/cat.gif!"));
        assert!(html.contains("<img src=\"pets/cat.gif\" alt=\"cat\" loading=\"lazy\">"));
    }

    #[test]
    fn test_embeds() {
        let nodes = assemble("[pet-profile]p\"1[/pet-profile][poll]Q?\n- <A>\n- B[/poll]");
        let html = HtmlRenderer::new(&Config::default())
            .with_post_id("post-7")
            .render(&nodes);
        assert!(html.contains("data-pet-id=\"p&quot;1\""));
        assert!(html.contains("data-post-id=\"post-7\""));
        assert!(html.contains("<p>Q?</p><ul><li>&lt;A&gt;</li><li>B</li></ul>"));
    }
}
