//! Catalog access interface
//!
//! The resolver needs the attribute listing for discovery and the runner
//! needs the search itself. Both go through `CatalogSource`, which owns the
//! single database connection of a run.

use crate::errors::Result;
use crate::model::{AttributeDescriptor, ResultRow, Scope, SearchRequest};

pub trait CatalogSource {
    /// Every attribute defined for `scope`, ordered by attribute code
    ///
    /// # Errors
    ///
    /// `SearchError::Query` if the listing query fails.
    fn list_attributes(&mut self, scope: Scope) -> Result<Vec<AttributeDescriptor>>;

    /// Rows whose attribute matches the request's comparison
    ///
    /// # Errors
    ///
    /// `SearchError::Query` if the search query fails.
    fn search(&mut self, request: &SearchRequest) -> Result<Vec<ResultRow>>;

    /// Release the connection. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// `SearchError::Connection` if the driver reports a failure on close.
    fn close(&mut self) -> Result<()>;
}

/// Catalog backed by fixed rows, counting every call
///
/// Used by tests; `search` returns all rows regardless of the request.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    pub attributes: Vec<AttributeDescriptor>,
    pub rows: Vec<ResultRow>,
    pub list_calls: usize,
    pub search_calls: usize,
    pub close_calls: usize,
    pub last_request: Option<SearchRequest>,
}

impl InMemoryCatalog {
    pub fn new(attributes: Vec<AttributeDescriptor>, rows: Vec<ResultRow>) -> Self {
        Self {
            attributes,
            rows,
            ..Self::default()
        }
    }

    pub fn is_closed(&self) -> bool {
        self.close_calls > 0
    }
}

impl CatalogSource for InMemoryCatalog {
    fn list_attributes(&mut self, _scope: Scope) -> Result<Vec<AttributeDescriptor>> {
        self.list_calls += 1;
        let mut attributes = self.attributes.clone();
        attributes.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(attributes)
    }

    fn search(&mut self, request: &SearchRequest) -> Result<Vec<ResultRow>> {
        self.search_calls += 1;
        self.last_request = Some(request.clone());
        Ok(self.rows.clone())
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_catalog_lists_attributes_by_code() {
        let mut catalog = InMemoryCatalog::new(
            vec![
                AttributeDescriptor {
                    id: 73,
                    code: "name".to_string(),
                    required: true,
                },
                AttributeDescriptor {
                    id: 75,
                    code: "color".to_string(),
                    required: false,
                },
            ],
            vec![],
        );

        let listed = catalog.list_attributes(Scope::Product).unwrap();
        let codes: Vec<_> = listed.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, vec!["color", "name"]);
        assert_eq!(catalog.list_calls, 1);
        assert!(!catalog.is_closed());
    }
}
