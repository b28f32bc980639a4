// Shared helpers for integration tests

use safelinks::core::{process_html_data, SafelinksOptions};

#[allow(dead_code)]
pub fn options(hostnames: &[&str], base_path: &str) -> SafelinksOptions {
    SafelinksOptions::new(
        hostnames.iter().map(|hostname| hostname.to_string()).collect(),
        base_path,
    )
}

/// Run one document through the full parse → rewrite → serialize cycle
#[allow(dead_code)]
pub fn rewrite_document(html: &str, options: &SafelinksOptions) -> String {
    let (output_data, _) = process_html_data(html.as_bytes(), options).unwrap();
    String::from_utf8(output_data).unwrap()
}
