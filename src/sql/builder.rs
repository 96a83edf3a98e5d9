//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the products table.

use super::params::BindValue;
use chrono::{DateTime, Utc};

pub const TABLE: &str = "products";

const COLUMNS: &[&str] = &["id", "name", "category", "created_at", "updated_at"];

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn select_column_list() -> String {
    COLUMNS.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ")
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<BindValue>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// One of the statement templates a route can produce.
///
/// Read templates go straight to the datastore; write templates go through the
/// persist step, which decides whether the transaction they run in commits.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    SelectAll,
    SelectById {
        id: i64,
    },
    Insert {
        name: String,
        category: String,
        at: DateTime<Utc>,
    },
    Update {
        id: i64,
        name: String,
        category: String,
        at: DateTime<Utc>,
    },
    Delete {
        id: i64,
    },
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::SelectAll => "select_all",
            Statement::SelectById { .. } => "select_by_id",
            Statement::Insert { .. } => "insert",
            Statement::Update { .. } => "update",
            Statement::Delete { .. } => "delete",
        }
    }

    /// Render the statement as SQL text with `$n` placeholders and its bind values in order.
    pub fn build(&self) -> QueryBuf {
        let mut q = QueryBuf::new();
        let table = quoted(TABLE);
        let pk = quoted("id");
        match self {
            Statement::SelectAll => {
                q.sql = format!("SELECT {} FROM {} ORDER BY {}", select_column_list(), table, pk);
            }
            Statement::SelectById { id } => {
                let n = q.push_param(*id);
                q.sql = format!("SELECT {} FROM {} WHERE {} = ${}", select_column_list(), table, pk, n);
            }
            Statement::Insert { name, category, at } => {
                let name_ph = q.push_param(name.as_str());
                let category_ph = q.push_param(category.as_str());
                let at_ph = q.push_param(*at);
                // created_at and updated_at share one placeholder.
                q.sql = format!(
                    "INSERT INTO {} ({}, {}, {}, {}) VALUES (${}, ${}, ${}, ${})",
                    table,
                    quoted("name"),
                    quoted("category"),
                    quoted("created_at"),
                    quoted("updated_at"),
                    name_ph,
                    category_ph,
                    at_ph,
                    at_ph
                );
            }
            Statement::Update {
                id,
                name,
                category,
                at,
            } => {
                let sets = [
                    ("name", q.push_param(name.as_str())),
                    ("category", q.push_param(category.as_str())),
                    ("updated_at", q.push_param(*at)),
                ]
                .iter()
                .map(|(col, n)| format!("{} = ${}", quoted(col), n))
                .collect::<Vec<_>>()
                .join(", ");
                let id_ph = q.push_param(*id);
                q.sql = format!("UPDATE {} SET {} WHERE {} = ${}", table, sets, pk, id_ph);
            }
            Statement::Delete { id } => {
                let n = q.push_param(*id);
                q.sql = format!("DELETE FROM {} WHERE {} = ${}", table, pk, n);
            }
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn select_all_is_ordered_by_id() {
        let q = Statement::SelectAll.build();
        assert_eq!(
            q.sql,
            r#"SELECT "id", "name", "category", "created_at", "updated_at" FROM "products" ORDER BY "id""#
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_binds_one_timestamp_for_both_columns() {
        let q = Statement::Insert {
            name: "Widget".into(),
            category: "Tools".into(),
            at: at(),
        }
        .build();
        assert!(q.sql.ends_with("VALUES ($1, $2, $3, $3)"));
        assert_eq!(
            q.params,
            vec![
                BindValue::Text("Widget".into()),
                BindValue::Text("Tools".into()),
                BindValue::Timestamp(at()),
            ]
        );
    }

    #[test]
    fn update_puts_id_last() {
        let q = Statement::Update {
            id: 7,
            name: "X".into(),
            category: "Y".into(),
            at: at(),
        }
        .build();
        assert_eq!(
            q.sql,
            r#"UPDATE "products" SET "name" = $1, "category" = $2, "updated_at" = $3 WHERE "id" = $4"#
        );
        assert_eq!(q.params.last(), Some(&BindValue::I64(7)));
    }

    #[test]
    fn values_never_reach_sql_text() {
        let hostile = "x'); DROP TABLE products; --";
        let q = Statement::Insert {
            name: hostile.into(),
            category: hostile.into(),
            at: at(),
        }
        .build();
        assert!(!q.sql.contains("DROP"));
        assert_eq!(q.params[0], BindValue::Text(hostile.into()));
    }

    #[test]
    fn delete_by_id() {
        let q = Statement::Delete { id: 3 }.build();
        assert_eq!(q.sql, r#"DELETE FROM "products" WHERE "id" = $1"#);
    }
}
