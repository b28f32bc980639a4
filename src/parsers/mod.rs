//! # Rewriter modules
//!
//! Everything that inspects and rewrites URL references:
//!
//! - `html` - DOM construction, attribute access, traversal and serialization
//! - `css` - url() token rewriting inside style attribute values
//! - `url_rewriter` - URL classification shared by both rewriters

pub mod css;
pub mod html;
pub mod url_rewriter;

// Re-export commonly used items for convenience
pub use css::{rewrite_style_urls, StyleRewrite};
pub use html::{
    find_elements, find_elements_with_attr, get_charset, get_node_attr, html_to_dom,
    serialize_document, set_node_attr, walk,
};
pub use url_rewriter::{classify_url, rewrite_element_url, UrlClass};
