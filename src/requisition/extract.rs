//! Field extraction: raw form fields → `RequisitionRecord`.
//!
//! # Rules
//! - Every named field is read as a scalar (first value wins)
//! - `item_padrao_<name>` is kept only for quantities > 0; anything that
//!   does not parse counts as zero
//! - Custom items are read for indices `0..item_personalizado_count` and
//!   kept when their name is non-empty; the quantity/unit text is free-form
//! - `foto` becomes an attachment only when it carries at least one byte

use crate::requisition::fields::{FieldValue, FormFields};
use crate::requisition::types::{
    Attachment, CustomItem, RequisitionRecord, StandardItem, ValidationError,
};

pub const FIELD_REQUESTER: &str = "nome";
pub const FIELD_DEPARTMENT: &str = "setor";
pub const FIELD_NOTE: &str = "anotacao";
pub const FIELD_CC_REQUESTED: &str = "enviarCopia";
pub const FIELD_CC_EMAIL: &str = "copiaEmail";
pub const FIELD_PHOTO: &str = "foto";
pub const FIELD_CUSTOM_COUNT: &str = "item_personalizado_count";

pub const STANDARD_ITEM_PREFIX: &str = "item_padrao_";
pub const CUSTOM_NAME_PREFIX: &str = "item_personalizado_nome_";
pub const CUSTOM_QUANTITY_PREFIX: &str = "item_personalizado_qtde_";

const DEFAULT_PHOTO_NAME: &str = "foto";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Build a requisition record from decoded form fields.
pub fn extract_requisition(fields: &FormFields) -> Result<RequisitionRecord, ValidationError> {
    let requester = required(fields, FIELD_REQUESTER)?;
    let department = required(fields, FIELD_DEPARTMENT)?;

    Ok(RequisitionRecord {
        requester,
        department,
        note: optional(fields, FIELD_NOTE),
        cc_requested: fields.text(FIELD_CC_REQUESTED) == Some("on"),
        cc_email: optional(fields, FIELD_CC_EMAIL),
        standard_items: standard_items(fields),
        custom_items: custom_items(fields),
        attachment: attachment(fields),
    })
}

fn required(fields: &FormFields, name: &'static str) -> Result<String, ValidationError> {
    optional(fields, name).ok_or(ValidationError::MissingField(name))
}

fn optional(fields: &FormFields, name: &str) -> Option<String> {
    fields
        .text(name)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Lenient integer parse; `None` for anything that is not a whole number.
fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Standard items in field order, positive quantities only.
pub fn standard_items(fields: &FormFields) -> Vec<StandardItem> {
    fields
        .iter()
        .filter_map(|(key, values)| {
            let name = key.strip_prefix(STANDARD_ITEM_PREFIX)?;
            let quantity = parse_int(values.first().and_then(FieldValue::as_text)).unwrap_or(0);
            (quantity > 0).then(|| StandardItem {
                name: name.to_string(),
                quantity: quantity as u64,
            })
        })
        .collect()
}

/// Custom items for indices below the declared count, in index order.
pub fn custom_items(fields: &FormFields) -> Vec<CustomItem> {
    let count = match parse_int(fields.text(FIELD_CUSTOM_COUNT)) {
        Some(n) if n > 0 => n as u64,
        _ => return Vec::new(),
    };

    // Only indices that actually carry a name field can produce an item, so
    // walk those instead of the whole declared range.
    let mut indices: Vec<u64> = fields
        .names()
        .filter_map(|key| key.strip_prefix(CUSTOM_NAME_PREFIX)?.parse::<u64>().ok())
        .filter(|i| *i < count)
        .collect();
    indices.sort_unstable();
    indices.dedup();

    indices
        .into_iter()
        .filter_map(|i| {
            let name = fields.text(&format!("{}{}", CUSTOM_NAME_PREFIX, i))?.trim();
            if name.is_empty() {
                return None;
            }
            let quantity_or_unit = fields
                .text(&format!("{}{}", CUSTOM_QUANTITY_PREFIX, i))
                .map(str::trim)
                .unwrap_or_default();
            Some(CustomItem {
                name: name.to_string(),
                quantity_or_unit: quantity_or_unit.to_string(),
            })
        })
        .collect()
}

fn attachment(fields: &FormFields) -> Option<Attachment> {
    match fields.first(FIELD_PHOTO)? {
        FieldValue::File {
            filename,
            content_type,
            content,
        } if !content.is_empty() => Some(Attachment {
            filename: if filename.trim().is_empty() {
                DEFAULT_PHOTO_NAME.to_string()
            } else {
                filename.clone()
            },
            content_type: content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            content: content.clone(),
        }),
        _ => None,
    }
}
