//! Document-level rewriting driver
//!
//! Walks one parsed document: first every element/attribute pair named by
//! the descriptor table, then every element carrying a style attribute.
//! All classification decisions are delegated to the URL and style
//! rewriters; this module only finds candidates and aggregates counters.

use markup5ever_rcdom::Handle;

use crate::core::SafelinksOptions;
use crate::parsers::css::rewrite_style_urls;
use crate::parsers::url_rewriter::rewrite_node_attr;

use super::dom::{find_elements, find_elements_with_attr, get_node_attr, set_node_attr};

/// One element/attribute pair that may carry a URL reference
pub struct LinkDescriptor {
    pub element: &'static str,
    pub attr: &'static str,
    /// Navigable anchors are the only elements that receive target/rel
    /// attributes when they point at foreign hosts
    pub is_anchor: bool,
}

/// Element/attribute pairs inspected for URL references
///
/// The entries touch disjoint attributes, so their order carries no
/// meaning; extending the table is enough to cover a new element type.
pub const LINK_DESCRIPTORS: &[LinkDescriptor] = &[
    LinkDescriptor { element: "a", attr: "href", is_anchor: true },
    LinkDescriptor { element: "link", attr: "href", is_anchor: false },
    LinkDescriptor { element: "area", attr: "href", is_anchor: false },
    LinkDescriptor { element: "script", attr: "src", is_anchor: false },
    LinkDescriptor { element: "img", attr: "src", is_anchor: false },
    LinkDescriptor { element: "iframe", attr: "src", is_anchor: false },
    LinkDescriptor { element: "source", attr: "src", is_anchor: false },
    LinkDescriptor { element: "embed", attr: "src", is_anchor: false },
    LinkDescriptor { element: "track", attr: "src", is_anchor: false },
    LinkDescriptor { element: "form", attr: "action", is_anchor: false },
    LinkDescriptor { element: "object", attr: "data", is_anchor: false },
    LinkDescriptor { element: "video", attr: "poster", is_anchor: false },
    LinkDescriptor { element: "meta", attr: "content", is_anchor: false },
];

/// Counters collected while rewriting one document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// URL-bearing attributes inspected
    pub link_count: usize,
    /// Attributes and style tokens rewritten to local form
    pub local_count: usize,
    /// Anchors flagged with target/rel for leaving the site
    pub external_count: usize,
    /// Style attributes whose value changed
    pub styles_touched: usize,
}

/// Apply URL rewriting across one parsed document
///
/// # Arguments
///
/// * `document` - Root handle of the parsed document
/// * `options` - Hostnames and base path configuration
///
/// # Returns
///
/// Counters describing what was inspected and rewritten.
pub fn walk(document: &Handle, options: &SafelinksOptions) -> DocumentStats {
    let mut stats = DocumentStats::default();

    for descriptor in LINK_DESCRIPTORS {
        for node in find_elements(document, descriptor.element) {
            if let Some((local, external)) =
                rewrite_node_attr(&node, descriptor.attr, descriptor.is_anchor, options)
            {
                stats.link_count += 1;
                stats.local_count += local;
                stats.external_count += external;
            }
        }
    }

    // The style pass runs after the attribute pass; the two operate on
    // disjoint attribute namespaces
    for node in find_elements_with_attr(document, "style") {
        let style_value = match get_node_attr(&node, "style") {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };

        let rewrite = rewrite_style_urls(&style_value, options);
        stats.local_count += rewrite.local_count;

        if let Some(updated_style) = rewrite.style {
            set_node_attr(&node, "style", Some(updated_style));
            stats.styles_touched += 1;
        }
    }

    stats
}
