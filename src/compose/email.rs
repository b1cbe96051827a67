//! Email rendering.

use chrono::{DateTime, FixedOffset, Utc};

use crate::compose::html::{escape, escape_multiline, section_table};
use crate::requisition::{Attachment, RequisitionRecord};

pub const SENDER_NAME: &str = "Requisição Almoxarifado";
pub const TITLE: &str = "Nova Requisição de Almoxarifado";
pub const STANDARD_HEADING: &str = "Itens Padrão";
pub const CUSTOM_HEADING: &str = "Itens Personalizados";
pub const NO_NOTE: &str = "Nenhuma anotação.";

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A composed requisition email, ready for the mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Display name shown next to the sender address.
    pub sender_name: String,
    pub from: String,
    pub to: String,
    pub cc: Option<String>,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<Attachment>,
}

/// Subject line for a department.
pub fn subject(department: &str) -> String {
    format!("{} - Setor: {}", TITLE, department)
}

/// Submission date as shown to the warehouse team.
pub fn format_date(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format(DATE_FORMAT).to_string()
}

/// Render the HTML body of a requisition email.
pub fn render_body(record: &RequisitionRecord, submitted: &str) -> String {
    let standard = section_table(
        STANDARD_HEADING,
        ("Item", "Quantidade"),
        record
            .standard_items
            .iter()
            .map(|i| (i.name.as_str(), i.quantity.to_string())),
    );
    let custom = section_table(
        CUSTOM_HEADING,
        ("Item", "Quantidade / Unidade"),
        record
            .custom_items
            .iter()
            .map(|i| (i.name.as_str(), i.quantity_or_unit.clone())),
    );
    let note = match &record.note {
        Some(note) => escape_multiline(note),
        None => escape(NO_NOTE),
    };

    let mut html = format!(
        "<h1>{title}</h1>\
         <p><strong>Solicitante:</strong> {requester}</p>\
         <p><strong>Setor:</strong> {department}</p>\
         <p><strong>Data:</strong> {submitted}</p>\
         {standard}{custom}\
         <h2>Anotações</h2><p>{note}</p>",
        title = escape(TITLE),
        requester = escape(&record.requester),
        department = escape(&record.department),
        submitted = escape(submitted),
    );

    if let Some(cc) = record.cc_recipient() {
        html.push_str(&format!(
            "<hr><p><em>Uma cópia deste e-mail foi enviada para {}.</em></p>",
            escape(cc)
        ));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requisition::{CustomItem, StandardItem};
    use chrono::TimeZone;

    fn record() -> RequisitionRecord {
        RequisitionRecord {
            requester: "Ana".into(),
            department: "TI".into(),
            note: None,
            cc_requested: false,
            cc_email: None,
            standard_items: Vec::new(),
            custom_items: Vec::new(),
            attachment: None,
        }
    }

    #[test]
    fn test_subject_interpolates_department() {
        assert_eq!(subject("TI"), "Nova Requisição de Almoxarifado - Setor: TI");
    }

    #[test]
    fn test_date_uses_offset() {
        let at = Utc.with_ymd_and_hms(2026, 1, 5, 2, 30, 0).unwrap();
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_date(at, brt), "04/01/2026 23:30:00");
    }

    #[test]
    fn test_no_items_no_headings() {
        let html = render_body(&record(), "01/01/2026 10:00:00");
        assert!(!html.contains(STANDARD_HEADING));
        assert!(!html.contains(CUSTOM_HEADING));
        assert!(html.contains(NO_NOTE));
        assert!(!html.contains("Uma cópia"));
    }

    #[test]
    fn test_only_present_sections_render() {
        let mut r = record();
        r.custom_items.push(CustomItem {
            name: "Caneta".into(),
            quantity_or_unit: "1 cx".into(),
        });
        let html = render_body(&r, "now");
        assert!(!html.contains(STANDARD_HEADING));
        assert!(html.contains("<h2>Itens Personalizados</h2>"));
        assert!(html.contains("<tr><td>Caneta</td><td>1 cx</td></tr>"));

        r.standard_items.push(StandardItem { name: "RIBBON".into(), quantity: 2 });
        let html = render_body(&r, "now");
        let standard = html.find("<h2>Itens Padrão</h2>").unwrap();
        let custom = html.find("<h2>Itens Personalizados</h2>").unwrap();
        assert!(standard < custom);
        assert!(html.contains("<tr><td>RIBBON</td><td>2</td></tr>"));
    }

    #[test]
    fn test_note_line_breaks_and_escaping() {
        let mut r = record();
        r.requester = "<script>".into();
        r.note = Some("linha 1\nlinha <2>".into());
        let html = render_body(&r, "now");
        assert!(html.contains("linha 1<br>linha &lt;2&gt;"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_cc_footnote_needs_both_conditions() {
        let mut r = record();
        r.cc_email = Some("ana@maglog.com.br".into());
        assert!(!render_body(&r, "now").contains("Uma cópia"));

        r.cc_requested = true;
        assert!(render_body(&r, "now")
            .contains("Uma cópia deste e-mail foi enviada para ana@maglog.com.br."));
    }
}
