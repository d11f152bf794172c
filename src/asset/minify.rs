//! Minification of generated pages.
//!
//! Inline `<script>` and `<style>` bodies are minified along with the markup.

/// Minifier settings for generated pages.
///
/// Closing tags and the `<html>`/`<head>` start tags stay, so the output
/// still reads as the bundler template did.
fn page_cfg() -> minify_html::Cfg {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    cfg
}

/// Minify a rendered page.
pub fn minify_page(html: &str) -> Vec<u8> {
    minify_html::minify(html.as_bytes(), &page_cfg())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minify(html: &str) -> String {
        String::from_utf8(minify_page(html)).unwrap()
    }

    #[test]
    fn test_strips_comments() {
        let html = "<p>a</p><!-- note --><p>b</p>";
        let min = minify(html);
        assert!(!min.contains("note"));
        assert!(min.contains("<p>a</p>"));
        assert!(min.contains("<p>b</p>"));
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<html>\n  <head>\n    <title>Home</title>\n  </head>\n  <body>\n    <p>one   two\n three</p>\n  </body>\n</html>\n";
        let min = minify(html);
        assert!(min.contains("<title>Home</title>"));
        assert!(min.contains("one two three"));
        assert!(!min.contains("\n    <title>"));
    }

    #[test]
    fn test_keeps_space_between_inline_elements() {
        assert_eq!(minify("<p><b>THE</b> <i>veil</i></p>"), "<p><b>THE</b> <i>veil</i></p>");
        assert!(minify("<p>Hello <b>world</b> !</p>").contains("Hello <b>world</b> !"));
    }

    #[test]
    fn test_pre_verbatim() {
        let html = "<pre>\n  keep   this\n</pre>";
        assert!(minify(html).contains("  keep   this\n</pre>"));
    }

    #[test]
    fn test_inline_style_and_script_minified() {
        let html = "<style>\n  body {\n    margin: 0;\n  }\n</style>\
            <script>\n  const greeting = 'hi';\n  console.log(greeting);\n</script>";
        let min = minify(html);
        assert!(min.contains("margin:0"));
        assert!(min.contains("console.log("));
        assert!(!min.contains('\n'));
    }

    #[test]
    fn test_external_script_kept() {
        let min = minify("<script type=\"module\" src=\"./static/main.abc.js\"></script>");
        assert!(min.contains("./static/main.abc.js"));
        assert!(min.contains("</script>"));
    }

    #[test]
    fn test_non_ascii_text() {
        assert!(minify("<h1>∪  THE∪\n</h1>").contains("∪ THE∪"));
    }

    #[test]
    fn test_deterministic() {
        let html = "<div>\n <!-- x --> <span> a </span>\n</div>";
        assert_eq!(minify(html), minify(html));
    }
}
