mod common;

//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use safelinks::core::process_html_data;

    use crate::common::{options, rewrite_document};

    #[test]
    fn strips_scheme_and_host_from_local_anchors() {
        let html = r#"<a href="https://site.example/page/">x</a>"#;
        let result = rewrite_document(html, &options(&["site.example"], ""));

        assert!(result.contains(r#"<a href="/page/">x</a>"#));
    }

    #[test]
    fn prepends_base_path_to_local_anchors() {
        let html = r#"<a href="https://site.example/page/">x</a>"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r#"<a href="/app/page/">x</a>"#));
    }

    #[test]
    fn keeps_query_and_fragment_of_local_urls() {
        let html = r##"<a href="https://site.example/search?q=rust#results">x</a>"##;
        let result = rewrite_document(html, &options(&["site.example"], ""));

        assert!(result.contains(r##"href="/search?q=rust#results""##));
    }

    #[test]
    fn flags_external_anchors() {
        let html = r#"<a href="https://other.example/p">y</a>"#;
        let result = rewrite_document(html, &options(&["site.example"], ""));

        assert!(result.contains(r#"href="https://other.example/p""#));
        assert!(result.contains(r#"target="_blank""#));
        assert!(result.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn overwrites_existing_target_and_rel_on_external_anchors() {
        let html = r#"<a href="https://other.example/p" target="_self" rel="nofollow">y</a>"#;
        let result = rewrite_document(html, &options(&["site.example"], ""));

        assert!(result.contains(r#"target="_blank""#));
        assert!(result.contains(r#"rel="noopener noreferrer""#));
        assert!(!result.contains("_self"));
        assert!(!result.contains("nofollow"));
    }

    #[test]
    fn prefixes_root_relative_references() {
        let html = r#"<link rel="stylesheet" href="/css/main.css"><img src="/img/logo.png">"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r#"href="/app/css/main.css""#));
        assert!(result.contains(r#"src="/app/img/logo.png""#));
    }

    #[test]
    fn rewrites_the_whole_descriptor_table() {
        let html = concat!(
            r#"<area href="https://site.example/map">"#,
            r#"<script src="https://site.example/js/app.js"></script>"#,
            r#"<iframe src="https://site.example/frame/"></iframe>"#,
            r#"<source src="https://site.example/video.webm">"#,
            r#"<embed src="https://site.example/plugin.swf">"#,
            r#"<track src="https://site.example/subs.vtt">"#,
            r#"<form action="https://site.example/submit"></form>"#,
            r#"<object data="https://site.example/movie.mp4"></object>"#,
            r#"<video poster="https://site.example/poster.jpg"></video>"#,
        );
        let result = rewrite_document(html, &options(&["site.example"], ""));

        assert!(result.contains(r#"href="/map""#));
        assert!(result.contains(r#"src="/js/app.js""#));
        assert!(result.contains(r#"src="/frame/""#));
        assert!(result.contains(r#"src="/video.webm""#));
        assert!(result.contains(r#"src="/plugin.swf""#));
        assert!(result.contains(r#"src="/subs.vtt""#));
        assert!(result.contains(r#"action="/submit""#));
        assert!(result.contains(r#"data="/movie.mp4""#));
        assert!(result.contains(r#"poster="/poster.jpg""#));
    }

    #[test]
    fn rewrites_style_attribute_urls_preserving_quotes() {
        let html = r#"<div style="background:url('https://site.example/bg.png')">x</div>"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains("background:url('/app/bg.png')"));
    }

    #[test]
    fn counts_links_and_rewrites() {
        let html = concat!(
            r#"<html><head><link rel="stylesheet" href="https://site.example/css/main.css"></head><body>"#,
            r#"<a href="https://site.example/about/">About</a>"#,
            r#"<a href="https://other.example/docs">Docs</a>"#,
            r##"<a href="#top">Top</a>"##,
            r#"<img src="https://site.example/img/logo.png">"#,
            r#"<img src="https://cdn.example/banner.jpg">"#,
            r#"<div style="background:url('https://site.example/bg.png')">x</div>"#,
            r#"</body></html>"#,
        );
        let (_, stats) =
            process_html_data(html.as_bytes(), &options(&["site.example"], "")).unwrap();

        assert_eq!(stats.link_count, 6);
        assert_eq!(stats.local_count, 4);
        assert_eq!(stats.external_count, 1);
        assert_eq!(stats.styles_touched, 1);
    }

    #[test]
    fn second_run_is_identical_to_first() {
        let html = concat!(
            r#"<a href="https://site.example/page/">x</a>"#,
            r#"<a href="https://other.example/p">y</a>"#,
            r#"<link rel="stylesheet" href="/css/main.css">"#,
            r#"<div style="background:url('/bg.png')">z</div>"#,
        );
        let opts = options(&["site.example"], "app");

        let first = rewrite_document(html, &opts);
        let second = rewrite_document(&first, &opts);

        assert!(first.contains(r#"href="/app/page/""#));
        assert!(first.contains(r#"href="/app/css/main.css""#));
        assert!(first.contains("url('/app/bg.png')"));
        assert_eq!(first, second);
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use safelinks::core::process_html_data;

    use crate::common::{options, rewrite_document};

    #[test]
    fn leaves_special_anchor_links_alone() {
        let html = concat!(
            r##"<a href="#section">s</a>"##,
            r#"<a href="mailto:hi@site.example">m</a>"#,
            r#"<a href="tel:+1234567890">t</a>"#,
        );
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r##"href="#section""##));
        assert!(result.contains(r#"href="mailto:hi@site.example""#));
        assert!(result.contains(r#"href="tel:+1234567890""#));
        assert!(!result.contains("target="));
    }

    #[test]
    fn leaves_external_non_anchor_references_alone() {
        let html = r#"<img src="https://cdn.example/banner.jpg"><script src="https://cdn.example/lib.js"></script>"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r#"src="https://cdn.example/banner.jpg""#));
        assert!(result.contains(r#"src="https://cdn.example/lib.js""#));
        assert!(!result.contains("target="));
        assert!(!result.contains("rel="));
    }

    #[test]
    fn leaves_document_relative_paths_alone() {
        let html = r#"<img src="./img.jpg"><img src="../x.png"><script src="js/app.js"></script>"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r#"src="./img.jpg""#));
        assert!(result.contains(r#"src="../x.png""#));
        assert!(result.contains(r#"src="js/app.js""#));
    }

    #[test]
    fn leaves_data_and_fragment_style_urls_alone() {
        let html = concat!(
            r#"<div style="background:url(data:image/png;base64,iVBORw0KGgo=)">x</div>"#,
            r##"<div style="mask:url(#clip)">y</div>"##,
        );
        let (output_data, stats) =
            process_html_data(html.as_bytes(), &options(&["site.example"], "app")).unwrap();
        let result = String::from_utf8(output_data).unwrap();

        assert!(result.contains("url(data:image/png;base64,iVBORw0KGgo=)"));
        assert!(result.contains("url(#clip)"));
        assert_eq!(stats.styles_touched, 0);
    }

    #[test]
    fn leaves_non_url_meta_content_alone() {
        let html = r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r#"content="width=device-width, initial-scale=1""#));
    }

    #[test]
    fn skips_empty_attribute_values() {
        let html = r#"<a href="">x</a><img src="">"#;
        let (_, stats) =
            process_html_data(html.as_bytes(), &options(&["site.example"], "app")).unwrap();

        assert_eq!(stats.link_count, 0);
        assert_eq!(stats.local_count, 0);
    }

    #[test]
    fn does_not_prefix_already_prefixed_paths() {
        let html = r#"<a href="/app/page/">x</a>"#;
        let result = rewrite_document(html, &options(&["site.example"], "app"));

        assert!(result.contains(r#"href="/app/page/""#));
        assert!(!result.contains("/app/app/"));
    }
}
