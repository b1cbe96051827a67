//! Small HTML rendering helpers for the email body.

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
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

/// Escape multi-line text and turn its line breaks into `<br>`.
pub fn escape_multiline(text: &str) -> String {
    escape(&text.replace("\r\n", "\n")).replace('\n', "<br>")
}

/// Render a headed two-column table, or nothing at all for zero rows.
pub fn section_table<'a, I>(heading: &str, columns: (&str, &str), rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let body: String = rows
        .into_iter()
        .map(|(left, right)| {
            format!("<tr><td>{}</td><td>{}</td></tr>", escape(left), escape(&right))
        })
        .collect();

    if body.is_empty() {
        return String::new();
    }

    format!(
        "<h2>{}</h2>\
         <table border=\"1\" cellpadding=\"6\" cellspacing=\"0\" style=\"border-collapse: collapse;\">\
         <thead><tr><th>{}</th><th>{}</th></tr></thead>\
         <tbody>{}</tbody></table>",
        escape(heading),
        escape(columns.0),
        escape(columns.1),
        body
    )
}
