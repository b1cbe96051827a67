//! Requisition record types and extraction errors.

use serde::Serialize;
use thiserror::Error;

/// A catalog item requested through its quantity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardItem {
    pub name: String,
    /// Always greater than zero.
    pub quantity: u64,
}

/// A free-text item outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomItem {
    /// Never empty.
    pub name: String,
    /// Quantity or unit as typed by the requester, possibly empty.
    pub quantity_or_unit: String,
}

/// Photo attached to a requisition.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// One parsed warehouse requisition.
///
/// Both item lists keep the order in which the fields arrived; that order
/// is the order of the rendered email tables and the chat digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequisitionRecord {
    pub requester: String,
    pub department: String,
    pub note: Option<String>,
    pub cc_requested: bool,
    pub cc_email: Option<String>,
    pub standard_items: Vec<StandardItem>,
    pub custom_items: Vec<CustomItem>,
    pub attachment: Option<Attachment>,
}

impl RequisitionRecord {
    /// Carbon-copy recipient, present only when the requester both ticked
    /// the checkbox and typed an address.
    pub fn cc_recipient(&self) -> Option<&str> {
        if !self.cc_requested {
            return None;
        }
        self.cc_email.as_deref().filter(|e| !e.is_empty())
    }

    /// Whether neither item list has an entry.
    pub fn has_no_items(&self) -> bool {
        self.standard_items.is_empty() && self.custom_items.is_empty()
    }
}

/// Errors raised while turning form fields into a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required scalar field is absent or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
