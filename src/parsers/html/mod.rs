//! HTML parsing and processing
//!
//! - `dom`: DOM construction, element lookup and attribute access
//! - `serializer`: DOM serialization back into bytes
//! - `walker`: document-level rewriting driver

pub mod dom;
pub mod serializer;
pub mod walker;

// Re-export the main public API
pub use dom::{
    find_elements, find_elements_with_attr, get_charset, get_node_attr, html_to_dom, set_node_attr,
};
pub use serializer::serialize_document;
pub use walker::{walk, DocumentStats, LinkDescriptor, LINK_DESCRIPTORS};
