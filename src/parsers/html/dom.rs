use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::parse_content_type;

/// Convert HTML bytes into a DOM
pub fn html_to_dom(data: &[u8], document_encoding: String) -> RcDom {
    let s: String;

    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        s = string.to_string();
    } else {
        s = String::from_utf8_lossy(data).to_string();
    }

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .unwrap()
}

/// Find all elements with the given name
pub fn find_elements(node: &Handle, element_name: &str) -> Vec<Handle> {
    let mut found_elements = Vec::new();

    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == element_name {
            found_elements.push(node.clone());
        }
    }

    for child_node in node.children.borrow().iter() {
        found_elements.append(&mut find_elements(child_node, element_name));
    }

    found_elements
}

/// Find all elements carrying the given attribute
pub fn find_elements_with_attr(node: &Handle, attr_name: &str) -> Vec<Handle> {
    let mut found_elements = Vec::new();

    if get_node_attr(node, attr_name).is_some() {
        found_elements.push(node.clone());
    }

    for child_node in node.children.borrow().iter() {
        found_elements.append(&mut find_elements_with_attr(child_node, attr_name));
    }

    found_elements
}

/// Get node's attribute value
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// Set node's attribute value
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    use html5ever::interface::{Attribute, QualName};
    use html5ever::tendril::format_tendril;
    use html5ever::{namespace_url, ns, LocalName};

    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.clone() {
                    let _ = &attrs_mut[i].value.clear();
                    let _ = &attrs_mut[i].value.push_slice(attr_value.as_str());
                } else {
                    // Remove attr completely if attr_value is not defined
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            // Add new attribute (since originally the target node didn't have it)
            if let Some(attr_value) = attr_value.clone() {
                let name = LocalName::from(attr_name);

                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), name),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// Get the charset the document declares in its markup, if any
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_elements(node, "meta").iter() {
        if let Some(meta_charset_value) = get_node_attr(meta_node, "charset") {
            // Handle the <meta charset="..." /> format
            return Some(meta_charset_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_value) = get_node_attr(meta_node, "content") {
                // Handle the <meta http-equiv="content-type" content="text/html; charset=..." /> format
                let (_media_type, charset) = parse_content_type(&meta_content_value);
                return Some(charset);
            }
        }
    }

    None
}
