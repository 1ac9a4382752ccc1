use eavsearch_core::catalog::InMemoryCatalog;
use eavsearch_core::{AttributeDescriptor, ResultRow, SearchParams, SearchValue};

/// Parameters that resolve without any prompt
#[allow(dead_code)]
pub fn complete_params() -> SearchParams {
    SearchParams {
        scope: Some("product".to_string()),
        attribute: Some("color".to_string()),
        comparison: Some("LIKE".to_string()),
        value: SearchValue::Text("red".to_string()),
        output_format: Some("text".to_string()),
        output_location: Some("stdout".to_string()),
        automated: false,
    }
}

/// Catalog with three product attributes and two matching rows
#[allow(dead_code)]
pub fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(
        vec![
            AttributeDescriptor {
                id: 73,
                code: "name".to_string(),
                required: true,
            },
            AttributeDescriptor {
                id: 93,
                code: "color".to_string(),
                required: false,
            },
            AttributeDescriptor {
                id: 74,
                code: "sku".to_string(),
                required: true,
            },
        ],
        vec![
            ResultRow::new("SKU1", Some("red")),
            ResultRow::new("SKU2", None),
        ],
    )
}
