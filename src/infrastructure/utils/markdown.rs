use pulldown_cmark::{html, Options, Parser};
use ammonia::{Builder, UrlRelative};

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_markdown_content(&raw_html)
}

/// Sanitizes Markdown content to remove unsafe HTML.
pub fn sanitize_markdown_content(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_code() {
        let html = safe_markdown_to_html("# Getting Started\n\n```rust\nfn main() {}\n```");
        assert!(html.contains("<h1>Getting Started</h1>"));
        assert!(html.contains("<code"));
    }

    #[test]
    fn strips_script_tags() {
        let html = safe_markdown_to_html("hello <script>alert('x')</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn links_get_safe_rel() {
        let html = safe_markdown_to_html("[site](https://example.com)");
        assert!(html.contains("rel=\"nofollow noopener noreferrer\""));
    }
}
