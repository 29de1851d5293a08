//! Newsletter HTML renderer
//!
//! Produces a table-based document with inline styles, which is what email
//! clients reliably support. Text is emitted as authored so users can include
//! inline markup; attribute values are escaped.

use crate::domain::entities::{FooterConfig, HeaderConfig, Layer, Newsletter};

/// Render a complete newsletter document
pub fn generate_html(newsletter: &Newsletter) -> String {
    let mut parts: Vec<String> = vec![
        "<!DOCTYPE html>".to_string(),
        "<html lang=\"en\">".to_string(),
        "<head>".to_string(),
        "<meta charset=\"UTF-8\">".to_string(),
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string(),
        format!("<title>{}</title>", newsletter.subject),
        "</head>".to_string(),
        format!(
            "<body style=\"margin: 0; padding: 0; font-family: {}; background-color: #f4f4f4;\">",
            newsletter.font_family.css()
        ),
        "<table role=\"presentation\" style=\"width: 100%; border-collapse: collapse; background-color: #f4f4f4;\">".to_string(),
        "<tr>".to_string(),
        "<td align=\"center\" style=\"padding: 20px 0;\">".to_string(),
        format!(
            "<table role=\"presentation\" style=\"width: {}px; max-width: 100%; border-collapse: collapse; background-color: {}; margin: 0 auto;\">",
            newsletter.max_width, newsletter.background_color
        ),
    ];

    parts.extend(render_header(&newsletter.subject, &newsletter.header));

    for layer in &newsletter.layers {
        parts.extend(render_layer(layer, newsletter.text_color.as_str()));
    }

    parts.extend(render_footer(&newsletter.footer));

    parts.extend(
        ["</table>", "</td>", "</tr>", "</table>", "</body>", "</html>"]
            .iter()
            .map(|s| s.to_string()),
    );

    parts.join("\n")
}

/// Pre-header, image, spacer, title and text rows
fn render_header(subject: &str, header: &HeaderConfig) -> Vec<String> {
    let mut parts = Vec::new();

    // Hidden inbox preview text, only when provided
    let pre_header = header.pre_header_text.trim();
    if !pre_header.is_empty() {
        parts.push("<tr>".to_string());
        parts.push(
            "<td style=\"padding: 0; font-size: 0; line-height: 0; display: none !important; \
             max-height: 0px; max-width: 0px; opacity: 0; overflow: hidden; mso-hide: all;\">"
                .to_string(),
        );
        parts.push(format!(
            "<span style=\"font-size: 1px; color: #ffffff; line-height: 1px;\">{}</span>",
            pre_header
        ));
        parts.push("</td>".to_string());
        parts.push("</tr>".to_string());
    }

    let title = header.display_title(subject);
    let bg = header.background_color.as_str();

    if let Some(image) = &header.image {
        parts.push("<tr>".to_string());
        parts.push("<td style=\"padding: 0; margin: 0;\">".to_string());
        parts.push(format!(
            "<img src=\"{}\" alt=\"{}\" style=\"width: 100%; max-width: {}px; height: auto; display: block; margin: 0; padding: 0;\">",
            escape_attr(image.src()),
            escape_attr(title),
            header.image_width
        ));
        parts.push("</td>".to_string());
        parts.push("</tr>".to_string());
    }

    // Spacer
    parts.push("<tr>".to_string());
    parts.push(format!(
        "<td style=\"padding: 20px 20px; background-color: {};\">",
        bg
    ));
    parts.push("&nbsp;".to_string());
    parts.push("</td>".to_string());
    parts.push("</tr>".to_string());

    if !title.is_empty() {
        parts.push("<tr>".to_string());
        parts.push(format!(
            "<td style=\"padding: 0 20px 10px 20px; background-color: {};\">",
            bg
        ));
        parts.push(format!(
            "<h1 style=\"color: #333333; font-size: {}px; margin: 0; font-weight: bold; line-height: 1.3;\">{}</h1>",
            header.title_font_size, title
        ));
        parts.push("</td>".to_string());
        parts.push("</tr>".to_string());
    }

    let text = header.text.trim();
    if !text.is_empty() {
        parts.push("<tr>".to_string());
        parts.push(format!(
            "<td style=\"padding: 0 20px 20px 20px; background-color: {};\">",
            bg
        ));
        parts.push(format!(
            "<p style=\"color: #333333; font-size: {}px; margin: 0; line-height: 1.5;\">{}</p>",
            header.text_font_size,
            newlines_to_br(text)
        ));
        parts.push("</td>".to_string());
        parts.push("</tr>".to_string());
    }

    parts
}

/// One content layer followed by a separator row
fn render_layer(layer: &Layer, text_color: &str) -> Vec<String> {
    let mut parts = vec![
        "<tr>".to_string(),
        "<td style=\"padding: 30px 20px;\">".to_string(),
    ];

    if let Some(src) = &layer.image {
        let alt = if layer.title.is_empty() {
            "Newsletter Image"
        } else {
            layer.title.as_str()
        };
        parts.push(format!(
            "<div style=\"{} margin-bottom: 20px;\">",
            layer.image_alignment.text_align()
        ));
        parts.push(format!(
            "<img src=\"{}\" alt=\"{}\" style=\"max-width: 100%; height: auto; border-radius: 8px;\">",
            escape_attr(src),
            escape_attr(alt)
        ));
        parts.push("</div>".to_string());
    }

    if !layer.title.is_empty() {
        parts.push(format!(
            "<h2 style=\"color: {}; margin: 0 0 10px 0; font-size: 26px; font-weight: 700; line-height: 1.2;\">{}</h2>",
            text_color, layer.title
        ));
    }

    if !layer.subtitle.is_empty() {
        parts.push(format!(
            "<h3 style=\"color: {}; margin: 0 0 15px 0; font-size: 18px; font-weight: 500; line-height: 1.4; opacity: 0.8;\">{}</h3>",
            text_color, layer.subtitle
        ));
    }

    if !layer.content.is_empty() {
        parts.push(format!(
            "<p style=\"color: {}; margin: 0 0 20px 0; font-size: 16px; line-height: 1.5;\">{}</p>",
            text_color,
            newlines_to_br(&layer.content)
        ));
    }

    parts.push("</td>".to_string());
    parts.push("</tr>".to_string());

    // Separator
    parts.push("<tr>".to_string());
    parts.push(
        "<td style=\"border-bottom: 1px solid rgba(0,0,0,0.1); padding: 0 20px;\"></td>"
            .to_string(),
    );
    parts.push("</tr>".to_string());

    parts
}

/// Legal footer: rule, disclaimer, copyright, address, links
fn render_footer(footer: &FooterConfig) -> Vec<String> {
    let color = footer.footer_color.as_str();
    let mut parts = vec![
        "<tr>".to_string(),
        "<td style=\"padding: 20px 20px 10px 20px;\">".to_string(),
        "<table role=\"presentation\" style=\"width: 100%; border-collapse: collapse;\">"
            .to_string(),
        "<tr>".to_string(),
        "<td style=\"height: 1px; background-color: #e0e0e0; line-height: 1px; font-size: 1px;\">&nbsp;</td>".to_string(),
        "</tr>".to_string(),
        "</table>".to_string(),
        "</td>".to_string(),
        "</tr>".to_string(),
    ];

    parts.push("<tr>".to_string());
    parts.push(format!(
        "<td align=\"center\" style=\"padding: 10px 20px 30px 20px; font-size: 12px; line-height: 18px; color: {};\">",
        color
    ));

    if !footer.disclaimer_text.is_empty() {
        parts.push(format!("{}<br>", footer.disclaimer_text));
    }

    let copyright = footer.copyright_line();
    if !copyright.is_empty() {
        parts.push(format!("{}<br>", copyright));
    }

    if !footer.address.is_empty() {
        parts.push(format!("{}<br><br>", footer.address));
    }

    parts.push(format!(
        "<a href=\"{}\" target=\"_blank\" style=\"color: {}; text-decoration: underline;\">Unsubscribe</a>",
        escape_attr(&footer.unsubscribe_link),
        color
    ));
    parts.push(format!(
        " &bull; <a href=\"{}\" target=\"_blank\" style=\"color: {}; text-decoration: underline;\">View Online</a>",
        escape_attr(&footer.view_online_link),
        color
    ));
    parts.push("</td>".to_string());
    parts.push("</tr>".to_string());

    parts
}

fn newlines_to_br(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}

/// Escape a value for use inside a double-quoted attribute
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
