//! URL classification and attribute rewriting
//!
//! Decides, for a single URL taken from an HTML attribute or a CSS url()
//! token, whether it points back at the site itself and what its rewritten
//! form must be. Classification is a pure function over strings and
//! configuration; element mutation happens only in [`rewrite_element_url`].

use markup5ever_rcdom::Handle;

use crate::core::SafelinksOptions;
use crate::parsers::html::{get_node_attr, set_node_attr};
use crate::utils::url::{is_root_relative, path_with_query_and_fragment, Url};

/// target attribute value applied to anchors that leave the site
pub const EXTERNAL_TARGET_VALUE: &str = "_blank";

/// rel attribute value applied to anchors that leave the site
pub const EXTERNAL_REL_VALUE: &str = "noopener noreferrer";

/// Outcome of classifying a single URL reference
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlClass {
    /// Fragment, mailto: or tel: reference on an anchor; kept as-is
    Skip,
    /// Root-relative reference that gets the deployment base path prepended
    RootRelative(String),
    /// Absolute reference to a local hostname, reduced to host-relative form
    LocalAbsolute(String),
    /// Absolute reference to a foreign hostname on a navigable anchor
    ExternalAbsolute,
    /// Everything else; left untouched
    Unrecognized,
}

impl UrlClass {
    /// Replacement attribute value, present for the two rewriting classes
    pub fn rewritten_value(&self) -> Option<&str> {
        match self {
            UrlClass::RootRelative(value) | UrlClass::LocalAbsolute(value) => Some(value),
            _ => None,
        }
    }
}

/// Check whether an anchor href is a special link type that never gets rewritten
fn is_special_link(url: &str) -> bool {
    url.starts_with('#') || url.starts_with("mailto:") || url.starts_with("tel:")
}

/// Classify one URL reference
///
/// The branch order is significant: special anchor links win over
/// everything, root-relative prefixing wins over absolute-URL parsing, and
/// any parse failure degrades to [`UrlClass::Unrecognized`] so the original
/// value survives verbatim.
///
/// # Arguments
///
/// * `url` - The raw attribute or url() token value
/// * `is_anchor` - Whether the owning element is a navigable anchor
/// * `options` - Hostnames and base path configuration
pub fn classify_url(url: &str, is_anchor: bool, options: &SafelinksOptions) -> UrlClass {
    if is_anchor && is_special_link(url) {
        return UrlClass::Skip;
    }

    let base_path = options.base_path_segment();

    if is_root_relative(url) && !base_path.is_empty() {
        let prefix = format!("/{}", base_path);

        // A reference that already carries the base path was produced by an
        // earlier run; prefixing it again would corrupt the path
        if url == prefix || url.starts_with(&format!("{}/", prefix)) {
            return UrlClass::Unrecognized;
        }

        return UrlClass::RootRelative(format!("{}{}", prefix, url));
    }

    let parsed_url = match Url::parse(url) {
        Ok(parsed_url) => parsed_url,
        Err(err) => {
            tracing::debug!("leaving unparsable URL \"{}\" as-is: {}", url, err);
            return UrlClass::Unrecognized;
        }
    };

    let hostname = match parsed_url.host_str() {
        Some(hostname) if !hostname.is_empty() => hostname,
        _ => return UrlClass::Unrecognized,
    };

    if options.is_local_hostname(hostname) {
        let stripped = path_with_query_and_fragment(&parsed_url);
        if base_path.is_empty() {
            UrlClass::LocalAbsolute(stripped)
        } else {
            UrlClass::LocalAbsolute(format!("/{}{}", base_path, stripped))
        }
    } else if is_anchor {
        UrlClass::ExternalAbsolute
    } else {
        // target/rel semantics only apply to navigable anchors
        UrlClass::Unrecognized
    }
}

/// Rewrite one URL-bearing attribute on one element
///
/// Local and root-relative references have the attribute replaced with the
/// rewritten value; external anchors keep their href but gain target/rel
/// attributes, overwriting any pre-existing values. Returns the (local,
/// external) counter increments, each 0 or 1.
pub fn rewrite_element_url(
    node: &Handle,
    attr_name: &str,
    url: &str,
    is_anchor: bool,
    options: &SafelinksOptions,
) -> (usize, usize) {
    match classify_url(url, is_anchor, options) {
        UrlClass::RootRelative(new_url) => {
            tracing::debug!("converting relative {} \"{}\" to \"{}\"", attr_name, url, new_url);
            set_node_attr(node, attr_name, Some(new_url));
            (1, 0)
        }
        UrlClass::LocalAbsolute(new_url) => {
            tracing::debug!("converting local {} \"{}\" to \"{}\"", attr_name, url, new_url);
            set_node_attr(node, attr_name, Some(new_url));
            (1, 0)
        }
        UrlClass::ExternalAbsolute => {
            tracing::debug!("adding target and rel to external link \"{}\"", url);
            set_node_attr(node, "target", Some(EXTERNAL_TARGET_VALUE.to_string()));
            set_node_attr(node, "rel", Some(EXTERNAL_REL_VALUE.to_string()));
            (0, 1)
        }
        UrlClass::Skip | UrlClass::Unrecognized => (0, 0),
    }
}

/// Convenience wrapper used by the document driver: fetches the attribute,
/// skips empty values, and reports whether a populated value was seen.
pub(crate) fn rewrite_node_attr(
    node: &Handle,
    attr_name: &str,
    is_anchor: bool,
    options: &SafelinksOptions,
) -> Option<(usize, usize)> {
    match get_node_attr(node, attr_name) {
        Some(url) if !url.is_empty() => {
            Some(rewrite_element_url(node, attr_name, &url, is_anchor, options))
        }
        _ => None,
    }
}
