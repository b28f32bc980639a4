//! url() token rewriting for style attribute values
//!
//! Scans a style string for url() tokens and runs each one through the same
//! URL classification used for element attributes. Every occurrence is
//! reproduced with its original quoting and whitespace, so a style value in
//! which no token changed stays byte-for-byte identical and never causes a
//! spurious attribute write.

use regex::{Captures, Regex};

use crate::core::SafelinksOptions;
use crate::parsers::url_rewriter::{classify_url, UrlClass};

/// Result of rewriting the url() tokens of one style attribute value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleRewrite {
    /// Replacement style value; `None` when no token changed
    pub style: Option<String>,
    /// Number of url() tokens rewritten to local form
    pub local_count: usize,
}

/// Check whether a url() token is a non-network reference
fn is_special_css_url(url: &str) -> bool {
    url.starts_with("data:") || url.starts_with('#')
}

/// Rewrite every url() token of a style attribute value
///
/// Matches `url(value)`, `url('value')` and `url("value")`, keeping the
/// leading whitespace, quote style and trailing whitespace of each
/// occurrence. Style references are never navigable anchors, so foreign
/// hosts are left alone; only local and root-relative tokens are replaced.
pub fn rewrite_style_urls(style_value: &str, options: &SafelinksOptions) -> StyleRewrite {
    let css_url_regex =
        Regex::new(r#"(?i)url\((\s*)(?:"([^'")]+)"|'([^'")]+)'|([^'")]+?))(\s*)\)"#).unwrap();

    let mut local_count = 0;
    let mut changed = false;

    let updated_style = css_url_regex.replace_all(style_value, |caps: &Captures| {
        let leading_space = caps.get(1).map_or("", |m| m.as_str());
        let trailing_space = caps.get(5).map_or("", |m| m.as_str());
        let (quote, url) = if let Some(token) = caps.get(2) {
            ("\"", token.as_str())
        } else if let Some(token) = caps.get(3) {
            ("'", token.as_str())
        } else {
            ("", caps.get(4).map_or("", |m| m.as_str()))
        };

        if is_special_css_url(url) {
            return caps[0].to_string();
        }

        match classify_url(url, false, options) {
            UrlClass::RootRelative(new_url) | UrlClass::LocalAbsolute(new_url) => {
                tracing::debug!("converting style url \"{}\" to \"{}\"", url, new_url);
                local_count += 1;
                changed = true;
                format!("url({leading_space}{quote}{new_url}{quote}{trailing_space})")
            }
            _ => caps[0].to_string(),
        }
    });

    StyleRewrite {
        style: if changed {
            Some(updated_style.into_owned())
        } else {
            None
        },
        local_count,
    }
}
