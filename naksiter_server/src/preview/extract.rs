//! Visible text extraction from fetched markup

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Characters of page text handed to the summarizer
pub const MAX_TEXT_CHARS: usize = 1000;

/// Elements whose contents never render as text
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Visible text of an HTML document, whitespace collapsed, capped at `max_chars`
pub fn visible_text(html: &str, max_chars: usize) -> String {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let mut raw = String::new();
    // Byte budget: covers multi-byte text and collapsed whitespace
    let budget = max_chars.saturating_mul(16);
    collect_text(&dom.document, &mut raw, budget);

    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

fn collect_text(node: &Handle, out: &mut String, budget: usize) {
    if out.len() >= budget {
        return;
    }

    match node.data {
        NodeData::Text { ref contents } => {
            out.push_str(&contents.borrow());
            out.push(' ');
        }
        NodeData::Element { ref name, .. } => {
            if HIDDEN_ELEMENTS.contains(&name.local.as_ref()) {
                return;
            }
            for child in node.children.borrow().iter() {
                collect_text(child, out, budget);
            }
        }
        NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => {}
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out, budget);
            }
        }
    }
}
