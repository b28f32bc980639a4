use std::collections::HashMap;
use std::path::Path;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parsers::html::{get_charset, html_to_dom, serialize_document, walk, DocumentStats};

/// Represents errors that can occur while processing a batch of documents
///
/// Per-URL problems are never errors: a reference that cannot be parsed is
/// left untouched. This type only covers failures that abort the whole run.
#[derive(Debug, Error)]
pub enum SafelinksError {
    /// Serializing a rewritten document back into bytes failed
    #[error("failed to serialize document \"{file}\": {message}")]
    Serialization { file: String, message: String },
}

/// Configuration options for link rewriting
///
/// Constructed once per pipeline run and immutable thereafter. An empty
/// `hostnames` list disables the engine entirely: processing becomes a
/// no-op pass-through, not an error.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SafelinksOptions {
    /// Hostnames considered local to the site
    pub hostnames: Vec<String>,
    /// Path prefix for sites deployed in a subdirectory, e.g. "base-path";
    /// empty means the site is served from the root
    #[serde(default)]
    pub base_path: String,
}

impl SafelinksOptions {
    pub fn new(hostnames: Vec<String>, base_path: &str) -> Self {
        SafelinksOptions {
            hostnames,
            base_path: base_path.to_string(),
        }
    }

    /// Base path with surrounding slashes removed; empty when unset
    pub fn base_path_segment(&self) -> &str {
        self.base_path.trim_matches('/')
    }

    /// Check whether a hostname belongs to the site itself
    ///
    /// Comparison is ASCII case-insensitive; parsed URL hosts come out of
    /// the url crate lowercased, configured hostnames may not be.
    pub fn is_local_hostname(&self, hostname: &str) -> bool {
        self.hostnames
            .iter()
            .any(|local| local.eq_ignore_ascii_case(hostname))
    }
}

/// Aggregated counters for one batch run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// HTML files rewritten and stored back
    pub files_processed: usize,
    /// HTML files skipped due to missing contents
    pub files_skipped: usize,
    /// URL-bearing attributes inspected
    pub link_count: usize,
    /// Attributes and style tokens rewritten to local form
    pub local_count: usize,
    /// Anchors flagged with target/rel for leaving the site
    pub external_count: usize,
    /// Style attributes whose value changed
    pub styles_touched: usize,
}

impl BatchStats {
    fn absorb(&mut self, stats: &DocumentStats) {
        self.link_count += stats.link_count;
        self.local_count += stats.local_count;
        self.external_count += stats.external_count;
        self.styles_touched += stats.styles_touched;
    }
}

/// Check if a file path refers to an HTML file
pub fn is_html_file(file_path: &str) -> bool {
    Path::new(file_path).extension().map_or(false, |extension| {
        extension.eq_ignore_ascii_case("html") || extension.eq_ignore_ascii_case("htm")
    })
}

/// Parses a Content-Type value into media type and charset
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut media_type = String::new();
    let mut charset = String::new();

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("charset=") {
            charset = value.trim_matches('"').to_string();
        }
    }

    (media_type, charset)
}

/// Rewrites links across a batch of in-memory files
///
/// Only entries whose path ends in `.html`/`.htm` are touched; everything
/// else passes through unmodified. Rewritten documents are stored back into
/// the map. Files with empty contents are skipped with a diagnostic; any
/// error while rewriting a single document aborts the whole batch.
///
/// # Arguments
///
/// * `files` - Mapping of file path to raw file contents
/// * `options` - Hostnames and base path configuration
///
/// # Returns
///
/// Aggregated counters for the batch, or the error that aborted it.
pub fn process_files(
    files: &mut HashMap<String, Vec<u8>>,
    options: &SafelinksOptions,
) -> Result<BatchStats, SafelinksError> {
    let mut batch_stats = BatchStats::default();

    if options.hostnames.is_empty() {
        tracing::warn!("missing hostnames, no files will be processed");
        return Ok(batch_stats);
    }

    let mut html_files: Vec<String> = files
        .keys()
        .filter(|file| is_html_file(file))
        .cloned()
        .collect();
    // Deterministic processing order keeps diagnostics stable between runs
    html_files.sort();

    if html_files.is_empty() {
        tracing::debug!("no HTML files found to process");
        return Ok(batch_stats);
    }

    tracing::debug!("processing {} HTML files", html_files.len());

    for file in html_files {
        let input_data = match files.get(&file) {
            Some(data) if !data.is_empty() => data,
            _ => {
                tracing::warn!("file \"{}\" has no contents, skipping", file);
                batch_stats.files_skipped += 1;
                continue;
            }
        };

        let (output_data, document_stats) =
            process_html_data(input_data, options).map_err(|err| match err {
                SafelinksError::Serialization { message, .. } => SafelinksError::Serialization {
                    file: file.clone(),
                    message,
                },
            })?;

        tracing::debug!(
            "file \"{}\": processed {} links ({} local, {} external), {} style attributes rewritten",
            file,
            document_stats.link_count,
            document_stats.local_count,
            document_stats.external_count,
            document_stats.styles_touched
        );

        batch_stats.absorb(&document_stats);
        batch_stats.files_processed += 1;
        files.insert(file, output_data);
    }

    Ok(batch_stats)
}

/// Rewrites links within a single HTML document
///
/// Parses the given bytes, applies the attribute and style rewriting
/// passes, and serializes the document back, re-encoding into the charset
/// the document declares when it names a valid one.
pub fn process_html_data(
    input_data: &[u8],
    options: &SafelinksOptions,
) -> Result<(Vec<u8>, DocumentStats), SafelinksError> {
    let mut document_encoding = "utf-8".to_string();
    let mut dom = html_to_dom(input_data, document_encoding.clone());

    // The initial parse assumes UTF-8; if the markup declares a different
    // valid charset, re-parse with it
    if let Some(html_charset) = get_charset(&dom.document) {
        if !html_charset.is_empty() {
            if let Some(charset) = Encoding::for_label_no_replacement(html_charset.as_bytes()) {
                document_encoding = html_charset;
                dom = html_to_dom(input_data, charset.name().to_string());
            }
        }
    }

    let document_stats = walk(&dom.document, options);

    let output_data =
        serialize_document(dom, document_encoding).map_err(|err| SafelinksError::Serialization {
            file: String::new(),
            message: err.to_string(),
        })?;

    Ok((output_data, document_stats))
}
