//! EAV query generation
//!
//! Each scope has a base table `catalog_<scope>_entity` plus one value table
//! per backend type (`catalog_<scope>_entity_varchar`, `_int`, ...). An
//! attribute's value lives in exactly one of them, chosen by
//! `eav_attribute.backend_type`, so every value table is LEFT JOINed with a
//! `backend_type` guard and the value is picked with a CASE.
//!
//! Only `Scope` and `Comparison` are interpolated, and both are closed
//! enums. The search value and attribute code are always bind parameters.

use crate::model::{Comparison, Scope, SearchRequest};

/// Per-type value tables, in join order
pub const BACKEND_TYPES: [&str; 5] = ["varchar", "int", "text", "decimal", "datetime"];

/// SQL text with `?` placeholders and their values, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParametrizedQuery {
    pub sql: String,
    pub binds: Vec<Option<String>>,
}

impl ParametrizedQuery {
    fn new(sql: String, binds: Vec<Option<String>>) -> Self {
        debug_assert_eq!(
            sql.matches('?').count(),
            binds.len(),
            "placeholder count must match bind count"
        );
        Self { sql, binds }
    }
}

/// The six table names a scope touches: base table first, then value tables
pub fn scope_tables(scope: Scope) -> Vec<String> {
    std::iter::once(format!("catalog_{}_entity", scope.as_str()))
        .chain(
            BACKEND_TYPES
                .iter()
                .map(|t| format!("catalog_{}_entity_{}", scope.as_str(), t)),
        )
        .collect()
}

fn eav_from_clause(scope: Scope) -> String {
    let tables = scope_tables(scope);
    let mut sql = format!(
        "FROM {} AS ce\n\
         LEFT JOIN eav_attribute AS ea\n\
         \tON ce.entity_type_id = ea.entity_type_id\n",
        tables[0]
    );
    for (backend, table) in BACKEND_TYPES.iter().zip(&tables[1..]) {
        sql.push_str(&format!(
            "LEFT JOIN {table} AS ce_{backend}\n\
             \tON ce.entity_id = ce_{backend}.entity_id\n\
             \tAND ea.attribute_id = ce_{backend}.attribute_id\n\
             \tAND ea.backend_type = '{backend}'\n"
        ));
    }
    sql
}

fn backend_case(column: &str) -> String {
    let mut sql = String::from("CASE ea.backend_type\n");
    for backend in BACKEND_TYPES {
        sql.push_str(&format!(
            "\t\tWHEN '{backend}' THEN ce_{backend}.{column}\n"
        ));
    }
    sql.push_str("\t\tELSE ea.backend_type\n\tEND");
    sql
}

/// Attributes defined for `scope`, one row per attribute id, ordered by code
pub fn build_attribute_list_query(scope: Scope) -> ParametrizedQuery {
    let sql = format!(
        "SELECT\n\
         \tCAST(tab.attribute_id AS SIGNED) AS attribute_id,\n\
         \tMIN(tab.attribute_code) AS attribute_code,\n\
         \tCAST(MAX(tab.required) AS SIGNED) AS required\n\
         FROM (\n\
         SELECT\n\
         \tea.attribute_id,\n\
         \tea.attribute_code,\n\
         \tea.is_required AS required\n\
         {from}\
         ) AS tab\n\
         GROUP BY tab.attribute_id\n\
         ORDER BY attribute_code",
        from = eav_from_clause(scope)
    );
    ParametrizedQuery::new(sql, Vec::new())
}

/// Rows of `request.scope` whose `request.attribute` value satisfies the
/// comparison
///
/// A NULL value under `IS`/`IS NOT` is written as the `NULL` keyword since
/// MySQL does not accept a placeholder after `IS`. Rows whose resolved value
/// is the empty string are filtered out after the join; NULL rows are kept.
pub fn build_search_query(request: &SearchRequest) -> ParametrizedQuery {
    let mut binds = Vec::with_capacity(2);
    let rhs = match (&request.value, request.comparison) {
        (None, Comparison::Is | Comparison::IsNot) => "NULL",
        (value, _) => {
            binds.push(value.clone());
            "?"
        }
    };
    binds.push(Some(request.attribute.clone()));

    let sql = format!(
        "SELECT\n\
         \ttab.sku,\n\
         \tCAST(tab.attribute_id AS SIGNED) AS attribute_id,\n\
         \ttab.attribute_code,\n\
         \tCAST(tab.value AS CHAR) AS value,\n\
         \tCAST(tab.store_id AS CHAR) AS store_id,\n\
         \tCAST(tab.required AS SIGNED) AS required\n\
         FROM (\n\
         SELECT\n\
         \tce.sku,\n\
         \tea.attribute_id,\n\
         \tea.attribute_code,\n\
         \t{value_case} AS value,\n\
         \t{store_case} AS store_id,\n\
         \tea.is_required AS required\n\
         {from}\
         HAVING `value` {op} {rhs}\n\
         \tAND `attribute_code` = ?\n\
         ) AS tab\n\
         WHERE tab.value IS NULL OR tab.value != ''",
        value_case = backend_case("value"),
        store_case = backend_case("store_id"),
        from = eav_from_clause(request.scope),
        op = request.comparison.as_sql(),
    );
    ParametrizedQuery::new(sql, binds)
}
