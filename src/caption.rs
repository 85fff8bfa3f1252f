// Markup for the caption and error banners. Kept free of web-sys so it can be
// exercised by host tests.

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Room heading plus optional description paragraph.
pub fn caption_html(label: &str, description: Option<&str>) -> String {
    match description.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => format!(
            "<h1>{}</h1><p class='room-description'>{}</p>",
            escape_html(label),
            escape_html(d)
        ),
        None => format!("<h1>{}</h1>", escape_html(label)),
    }
}

pub fn error_html(message: &str) -> String {
    format!(
        "<p class='tour-error' style='color: #ffb4a8; font: 14px system-ui;'>{}</p>",
        escape_html(message)
    )
}
