use crate::result::{Row, Table};
use serde::Serialize;
use std::path::PathBuf;

/// A loaded table together with the path it was read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularResult {
    pub path: PathBuf,
    pub table: Table,
}

/// Keyed collection of every fetch result. Only ever built after all tasks
/// have completed; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    tabular_results: Vec<TabularResult>,
    api_result: Vec<serde_json::Value>,
    db_result: Vec<Row>,
}

impl Aggregate {
    pub fn new(
        tabular_results: Vec<TabularResult>,
        api_result: Vec<serde_json::Value>,
        db_result: Vec<Row>,
    ) -> Self {
        Self {
            tabular_results,
            api_result,
            db_result,
        }
    }

    pub fn tabular_results(&self) -> &[TabularResult] {
        &self.tabular_results
    }

    pub fn api_result(&self) -> &[serde_json::Value] {
        &self.api_result
    }

    pub fn db_result(&self) -> &[Row] {
        &self.db_result
    }

    /// Row count of each table, in configured file order
    pub fn table_row_counts(&self) -> Vec<usize> {
        self.tabular_results.iter().map(|t| t.table.len()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Cell, ColumnType};
    use serde_json::json;

    #[test]
    fn test_aggregate_serializes_fixed_keys() {
        let table = Table::new(
            vec!["n".to_string()],
            vec![ColumnType::Int],
            vec![vec![Cell::Int(1)]],
        );
        let aggregate = Aggregate::new(
            vec![TabularResult {
                path: PathBuf::from("a.csv"),
                table,
            }],
            vec![json!({"id": 1})],
            vec![vec![Cell::Int(1), Cell::from("ada")]],
        );

        assert_eq!(aggregate.table_row_counts(), vec![1]);

        let value = serde_json::to_value(&aggregate).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("tabular_results").is_some());
        assert!(value.get("api_result").is_some());
        assert_eq!(value["db_result"][0], json!([1, "ada"]));
    }
}
