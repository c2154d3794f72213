//! SQL parsing and classification logic.
//!
//! Uses sqlparser-rs with the SQLite dialect. Anything the parser cannot
//! understand is classified as a write.

use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

use crate::error::{DashError, Result};

use super::{Access, Classification, StatementType};

/// SQL classifier that parses SQL text and decides whether it is read-only.
#[derive(Debug)]
pub struct SqlClassifier {
    dialect: SQLiteDialect,
}

impl Default for SqlClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlClassifier {
    /// Creates a new SQL classifier.
    pub fn new() -> Self {
        Self {
            dialect: SQLiteDialect {},
        }
    }

    /// Classifies a SQL string.
    pub fn classify(&self, sql: &str) -> Classification {
        let statements = match Parser::parse_sql(&self.dialect, sql) {
            Ok(statements) => statements,
            Err(e) => {
                return Classification::rejected(
                    StatementType::Unknown,
                    format!("Could not parse SQL: {e}"),
                )
            }
        };

        match statements.as_slice() {
            [] => Classification::rejected(StatementType::Unknown, "Empty SQL statement"),
            [statement] => {
                let (access, statement_type) = classify_statement(statement);
                Classification::new(access, statement_type)
            }
            _ => Classification::rejected(
                StatementType::Multiple,
                "Only one statement may be executed at a time",
            ),
        }
    }
}

/// Convenience function to classify SQL without creating a classifier instance.
pub fn classify_sql(sql: &str) -> Classification {
    SqlClassifier::new().classify(sql)
}

/// Fails with a store access error unless `sql` is a single read-only statement.
pub fn ensure_read_only(sql: &str) -> Result<()> {
    let classification = classify_sql(sql);
    if classification.is_read_only() {
        return Ok(());
    }

    let detail = classification
        .reason
        .unwrap_or_else(|| format!("{} statements are not allowed", classification.statement_type));
    Err(DashError::store(format!(
        "Refusing to run statement against read-only store: {detail}"
    )))
}

/// Classifies a single parsed statement.
fn classify_statement(statement: &Statement) -> (Access, StatementType) {
    match statement {
        Statement::Query(query) => {
            let statement_type = if query.with.is_some() {
                StatementType::With
            } else {
                StatementType::Select
            };
            (classify_query(query), statement_type)
        }
        Statement::Explain { statement, .. } => {
            let (inner, _) = classify_statement(statement);
            (inner, StatementType::Explain)
        }

        Statement::Insert { .. } => (Access::Write, StatementType::Insert),
        Statement::Update { .. } => (Access::Write, StatementType::Update),
        Statement::Delete { .. } => (Access::Write, StatementType::Delete),
        Statement::Drop { .. } => (Access::Write, StatementType::Drop),
        Statement::AlterTable { .. } => (Access::Write, StatementType::Alter),
        Statement::CreateTable { .. }
        | Statement::CreateIndex { .. }
        | Statement::CreateView { .. }
        | Statement::CreateVirtualTable { .. } => (Access::Write, StatementType::Create),
        Statement::Pragma { .. } => (Access::Write, StatementType::Pragma),

        _ => (Access::Write, StatementType::Unknown),
    }
}

/// Walks a query for embedded data-modifying operations.
fn classify_query(query: &Query) -> Access {
    let ctes_read_only = query
        .with
        .as_ref()
        .map_or(true, |with| {
            with.cte_tables
                .iter()
                .all(|cte| classify_query(&cte.query) == Access::ReadOnly)
        });

    if ctes_read_only {
        classify_set_expr(&query.body)
    } else {
        Access::Write
    }
}

fn classify_set_expr(set_expr: &SetExpr) -> Access {
    match set_expr {
        SetExpr::Query(query) => classify_query(query),
        SetExpr::Select(select) => classify_select(select),
        SetExpr::SetOperation { left, right, .. } => {
            if classify_set_expr(left) == Access::ReadOnly {
                classify_set_expr(right)
            } else {
                Access::Write
            }
        }
        SetExpr::Values(_) | SetExpr::Table(_) => Access::ReadOnly,
        // INSERT/UPDATE/etc. wrapped inside a query body
        _ => Access::Write,
    }
}

fn classify_select(select: &Select) -> Access {
    if select.from.iter().all(|twj| classify_table_with_joins(twj) == Access::ReadOnly) {
        Access::ReadOnly
    } else {
        Access::Write
    }
}

fn classify_table_with_joins(twj: &TableWithJoins) -> Access {
    let relations = std::iter::once(&twj.relation).chain(twj.joins.iter().map(|j| &j.relation));
    for factor in relations {
        if classify_table_factor(factor) == Access::Write {
            return Access::Write;
        }
    }
    Access::ReadOnly
}

fn classify_table_factor(factor: &TableFactor) -> Access {
    match factor {
        TableFactor::Derived { subquery, .. } => classify_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => classify_table_with_joins(table_with_joins),
        _ => Access::ReadOnly,
    }
}
