use headless_chrome::{types::PrintToPdfOptions, Browser, LaunchOptions};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::fs;
use std::time::Duration;

use crate::error::{Result, WhisperError};
use crate::models::Summary;

const EXPORT_TITLE: &str = "FileWhisper Summary";

/// Render a summary as the body of the export document. Pure: bullet
/// summaries become a prefixed list, paragraph summaries become rendered
/// text. The caller decides what to do with the HTML.
pub fn summary_to_html(summary: &Summary) -> String {
    match summary {
        Summary::Bullets(items) => {
            let mut html = String::from(r#"<ul class="summary-list">"#);
            for item in items {
                html.push_str(&format!("<li>• {}</li>", html_escape(item)));
            }
            html.push_str("</ul>");
            html
        }
        Summary::Paragraph(text) => markdown_to_html(text),
    }
}

/// Full printable document: the fixed export title above the rendered
/// summary body.
pub fn build_export_document(summary: &Summary) -> String {
    generate_full_html(EXPORT_TITLE, &summary_to_html(summary))
}

/// Print the export document to a PDF at `output_path`. The actual
/// rendering engine is headless Chrome; everything before the print step is
/// the pure build above.
pub fn export_summary_to_pdf(summary: &Summary, output_path: &str) -> Result<()> {
    let full_html = build_export_document(summary);

    // Write HTML to a temporary file (data URLs have size limits)
    let temp_html_path = std::env::temp_dir().join("filewhisper_export.html");
    fs::write(&temp_html_path, &full_html)?;

    let file_url = format!("file://{}", temp_html_path.to_string_lossy());

    let browser = Browser::new(
        LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| WhisperError::Internal(format!("failed to build launch options: {}", e)))?,
    )
    .map_err(|e| WhisperError::Internal(format!("failed to launch browser: {}", e)))?;

    let tab = browser
        .new_tab()
        .map_err(|e| WhisperError::Internal(format!("failed to create tab: {}", e)))?;

    tab.navigate_to(&file_url)
        .map_err(|e| WhisperError::Internal(format!("failed to navigate: {}", e)))?;
    tab.wait_until_navigated()
        .map_err(|e| WhisperError::Internal(format!("failed to wait for navigation: {}", e)))?;

    // Give fonts a moment to settle before printing
    std::thread::sleep(Duration::from_millis(500));

    let pdf_options = PrintToPdfOptions {
        landscape: Some(false),
        display_header_footer: Some(false),
        print_background: Some(true),
        scale: Some(1.0),
        paper_width: Some(8.27),   // A4 width in inches
        paper_height: Some(11.69), // A4 height in inches
        margin_top: Some(0.4),
        margin_bottom: Some(0.6),
        margin_left: Some(0.4),
        margin_right: Some(0.4),
        page_ranges: None,
        ignore_invalid_page_ranges: None,
        header_template: None,
        footer_template: None,
        prefer_css_page_size: Some(true),
        transfer_mode: None,
        generate_tagged_pdf: None,
        generate_document_outline: None,
    };

    let pdf_data = tab
        .print_to_pdf(Some(pdf_options))
        .map_err(|e| WhisperError::Internal(format!("failed to generate PDF: {}", e)))?;

    let _ = fs::remove_file(&temp_html_path);

    fs::write(output_path, pdf_data)?;

    Ok(())
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                html.push_str(&format!("<h{}>", level as u8));
            }
            Event::End(TagEnd::Heading(level)) => {
                html.push_str(&format!("</h{}>", level as u8));
            }
            Event::Start(Tag::Paragraph) => {
                html.push_str("<p>");
            }
            Event::End(TagEnd::Paragraph) => {
                html.push_str("</p>");
            }
            Event::Start(Tag::List(None)) => {
                html.push_str("<ul>");
            }
            Event::End(TagEnd::List(false)) => {
                html.push_str("</ul>");
            }
            Event::Start(Tag::List(Some(_))) => {
                html.push_str("<ol>");
            }
            Event::End(TagEnd::List(true)) => {
                html.push_str("</ol>");
            }
            Event::Start(Tag::Item) => {
                html.push_str("<li>");
            }
            Event::End(TagEnd::Item) => {
                html.push_str("</li>");
            }
            Event::Start(Tag::Strong) => {
                html.push_str("<strong>");
            }
            Event::End(TagEnd::Strong) => {
                html.push_str("</strong>");
            }
            Event::Start(Tag::Emphasis) => {
                html.push_str("<em>");
            }
            Event::End(TagEnd::Emphasis) => {
                html.push_str("</em>");
            }
            Event::Code(text) => {
                html.push_str(&format!("<code>{}</code>", html_escape(&text)));
            }
            Event::Text(text) => {
                html.push_str(&html_escape(&text));
            }
            Event::SoftBreak => {
                html.push(' ');
            }
            Event::HardBreak => {
                html.push_str("<br>");
            }
            Event::Rule => {
                html.push_str("<hr>");
            }
            _ => {}
        }
    }

    html
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn generate_full_html(title: &str, content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        {css}
    </style>
</head>
<body>
    <div class="document">
        <h1 class="export-title">{title}</h1>
        <main class="content">
            {content}
        </main>
    </div>
</body>
</html>"##,
        title = html_escape(title),
        content = content,
        css = EXPORT_CSS
    )
}

const EXPORT_CSS: &str = r##"
*, *::before, *::after {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

@page {
    size: A4;
    margin: 2cm 1.5cm 2.5cm 1.5cm;
}

body {
    font-family: Helvetica, Arial, sans-serif;
    font-size: 12pt;
    line-height: 1.6;
    color: #1e293b;
}

.document {
    max-width: 100%;
    margin: 0 auto;
    padding: 0 1cm;
}

.export-title {
    font-size: 18pt;
    font-weight: 700;
    text-align: center;
    margin-bottom: 1.5em;
}

p {
    margin: 0 0 0.8em 0;
    text-align: justify;
    hyphens: auto;
}

.summary-list {
    list-style: none;
    padding-left: 0;
}

.summary-list li {
    margin: 0.4em 0;
}

ul, ol {
    margin: 1em 0;
    padding-left: 2em;
}
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_summary_renders_one_prefixed_line_per_item() {
        let summary = Summary::Bullets(vec!["a".to_string(), "b".to_string()]);
        let html = summary_to_html(&summary);
        assert_eq!(html.matches("<li>• ").count(), 2);
        assert!(html.contains("<li>• a</li>"));
        assert!(html.contains("<li>• b</li>"));
    }

    #[test]
    fn bullet_items_are_escaped_not_interpreted() {
        let summary = Summary::Bullets(vec!["<script>".to_string()]);
        let html = summary_to_html(&summary);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn paragraph_summary_renders_as_text_blocks() {
        let summary = Summary::Paragraph("First point.\n\nSecond point.".to_string());
        let html = summary_to_html(&summary);
        assert_eq!(html.matches("<p>").count(), 2);
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn export_document_carries_the_fixed_title() {
        let doc = build_export_document(&Summary::Paragraph("body".to_string()));
        assert!(doc.contains("FileWhisper Summary"));
        assert!(doc.contains("<p>body</p>"));
    }
}
