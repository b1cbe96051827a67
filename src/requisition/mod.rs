//! Requisition intake.
//!
//! # Data Flow
//! ```text
//! multipart body
//!     → fields.rs (ordered FormFields, scalar or list values)
//!     → extract.rs (coercion, item filtering, attachment)
//!     → RequisitionRecord (types.rs)
//! ```

pub mod catalog;
pub mod extract;
pub mod fields;
pub mod types;

pub use extract::extract_requisition;
pub use fields::{FieldValue, FormFields};
pub use types::{Attachment, CustomItem, RequisitionRecord, StandardItem, ValidationError};
