//! Chat webhook payload (Discord-style embed).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use crate::compose::email::{NO_NOTE, TITLE};
use crate::requisition::RequisitionRecord;

pub const EMBED_COLOR: u32 = 0x0891B2;
pub const FOOTER: &str = "Sistema de Requisição Almoxarifado";
pub const ITEMS_FIELD: &str = "Itens Solicitados";
pub const NO_ITEMS: &str = "Nenhum item solicitado.";
pub const STANDARD_HEADER: &str = "**Itens Padrão:**";
pub const CUSTOM_HEADER: &str = "**Itens Personalizados:**";

/// Longest value a chat embed field accepts.
pub const MAX_FIELD_CHARS: usize = 1024;

/// One `name: value` row of the embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.to_string(),
            value: truncate(value.into(), MAX_FIELD_CHARS),
            inline,
        }
    }
}

/// Summary posted to the chat channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookPayload {
    pub content: String,
    pub embed_title: String,
    pub embed_color: u32,
    pub embed_fields: Vec<EmbedField>,
    pub timestamp: DateTime<Utc>,
    pub footer: String,
}

impl WebhookPayload {
    /// Value of the first embed field with the given name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.embed_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    content: &'a str,
    embeds: [WireEmbed<'a>; 1],
}

#[derive(Serialize)]
struct WireEmbed<'a> {
    title: &'a str,
    color: u32,
    fields: &'a [EmbedField],
    timestamp: String,
    footer: WireFooter<'a>,
}

#[derive(Serialize)]
struct WireFooter<'a> {
    text: &'a str,
}

impl Serialize for WebhookPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireMessage {
            content: &self.content,
            embeds: [WireEmbed {
                title: &self.embed_title,
                color: self.embed_color,
                fields: &self.embed_fields,
                timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                footer: WireFooter { text: &self.footer },
            }],
        }
        .serialize(serializer)
    }
}

/// Text digest of the requested items, one line per item.
pub fn item_digest(record: &RequisitionRecord) -> String {
    let mut sections = Vec::with_capacity(2);

    if !record.standard_items.is_empty() {
        let lines: Vec<String> = record
            .standard_items
            .iter()
            .map(|i| format!("- {}: {}", i.name, i.quantity))
            .collect();
        sections.push(format!("{}\n{}", STANDARD_HEADER, lines.join("\n")));
    }

    if !record.custom_items.is_empty() {
        let lines: Vec<String> = record
            .custom_items
            .iter()
            .map(|i| format!("- {}: {}", i.name, i.quantity_or_unit))
            .collect();
        sections.push(format!("{}\n{}", CUSTOM_HEADER, lines.join("\n")));
    }

    if sections.is_empty() {
        NO_ITEMS.to_string()
    } else {
        sections.join("\n\n")
    }
}

/// Build the chat payload for a requisition.
pub fn build_payload(record: &RequisitionRecord, timestamp: DateTime<Utc>) -> WebhookPayload {
    let mut fields = vec![
        EmbedField::new("Solicitante", record.requester.as_str(), true),
        EmbedField::new("Setor", record.department.as_str(), true),
        EmbedField::new(ITEMS_FIELD, item_digest(record), false),
        EmbedField::new(
            "Anotações",
            record.note.as_deref().unwrap_or(NO_NOTE),
            false,
        ),
    ];
    if let Some(cc) = record.cc_recipient() {
        fields.push(EmbedField::new("Cópia para", cc, true));
    }
    if let Some(attachment) = &record.attachment {
        fields.push(EmbedField::new("Foto anexada", attachment.filename.as_str(), true));
    }

    WebhookPayload {
        content: format!(
            "Nova requisição recebida de **{}** ({})",
            record.requester, record.department
        ),
        embed_title: TITLE.to_string(),
        embed_color: EMBED_COLOR,
        embed_fields: fields,
        timestamp,
        footer: FOOTER.to_string(),
    }
}

fn truncate(value: String, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value;
    }
    let mut out: String = value.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
