//! Standard supply catalog offered by the requisition form.

use serde::Serialize;

/// A group of catalog items shown together on the form.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogCategory {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// Fixed catalog, in display order.
pub const CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        name: "Etiquetas e Ribbons",
        items: &["ETIQUETA 100X150", "ETIQUETA 100X170", "RIBBON"],
    },
    CatalogCategory {
        name: "Fitas Adesivas",
        items: &["FITA DUREX CEX100", "FITA FRACIONADA MAGLOG (LARANJA)", "FITA FRÁGIL"],
    },
    CatalogCategory {
        name: "Embalagens e Proteção",
        items: &["STRETCH", "KRAFT", "PLÁSTICO BOLHA"],
    },
    CatalogCategory {
        name: "Escritório",
        items: &["SULFITE A4"],
    },
];

/// Every catalog item name, category by category.
pub fn all_items() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().flat_map(|c| c.items.iter().copied())
}

/// Form field name carrying the quantity of a catalog item.
pub fn quantity_field(item: &str) -> String {
    format!("{}{}", crate::requisition::extract::STANDARD_ITEM_PREFIX, item)
}
