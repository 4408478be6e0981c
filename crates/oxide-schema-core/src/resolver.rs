//! Turns column snapshots into `CREATE TABLE` / `CREATE INDEX` text.
//!
//! The resolver is pure: it reads snapshots, never the live columns, and
//! either returns every statement for the table or fails without output.

use crate::column::ColumnSnapshot;
use crate::constraints::{Constraints, ForeignKey};
use crate::engine::{AutoIncrement, Engine, Unsigned};
use crate::error::ResolveError;

/// Resolves `columns` into the statements that create `table` on `engine`.
///
/// The first statement is the `CREATE TABLE`; one `CREATE INDEX` follows
/// for every column that requested an index, in column order. `origin`
/// names the caller in error messages.
pub fn resolve(
    columns: &[ColumnSnapshot],
    engine: Engine,
    table: &str,
    origin: &str,
) -> Result<Vec<String>, ResolveError> {
    let mut declarations = Vec::with_capacity(columns.len());
    let mut constraints = Vec::new();
    let mut indexes = Vec::new();

    for column in columns {
        let resolved = resolve_column(column, engine, table, origin)?;
        declarations.push(resolved.declaration);
        constraints.extend(resolved.constraints);
        if column.constraints.index {
            indexes.push(create_index(table, &column.name));
        }
    }

    let mut body = declarations;
    body.extend(constraints);

    let mut statements = Vec::with_capacity(1 + indexes.len());
    statements.push(format!("CREATE TABLE {table} ({});", body.join(", ")));
    statements.extend(indexes);
    Ok(statements)
}

/// Returns `DROP TABLE <table>;`.
#[must_use]
pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE {table};")
}

fn create_index(table: &str, column: &str) -> String {
    format!("CREATE INDEX index_{table}_{column} ON {table}({column});")
}

struct ResolvedColumn {
    declaration: String,
    constraints: Vec<String>,
}

fn resolve_column(
    column: &ColumnSnapshot,
    engine: Engine,
    table: &str,
    origin: &str,
) -> Result<ResolvedColumn, ResolveError> {
    let name = column.name.as_str();
    if name.is_empty() {
        return Err(ResolveError::UndefinedName {
            table: table.to_string(),
            origin: origin.to_string(),
        });
    }
    let Some(sql_type) = column.sql_type.as_deref() else {
        return Err(ResolveError::UndefinedType {
            table: table.to_string(),
            column: name.to_string(),
            origin: origin.to_string(),
        });
    };

    let Constraints {
        unsigned,
        not_null,
        auto_increment,
        default,
        unique,
        primary_key,
        foreign_key,
        checks,
        index: _,
    } = &column.constraints;

    // Emulated checks go after the column's own.
    let mut checks = checks.clone();

    let sql_type = match engine.auto_increment() {
        AutoIncrement::Serial(serial) if *auto_increment => serial,
        _ => sql_type,
    };
    let mut declaration = format!("{name} {sql_type}");

    if *unsigned {
        match engine.unsigned() {
            Unsigned::Keyword(keyword) => {
                declaration.push(' ');
                declaration.push_str(keyword);
            }
            Unsigned::Check if !*auto_increment => checks.push(format!("{name} >= 0")),
            Unsigned::Check => {}
        }
    }

    if *auto_increment {
        if !*primary_key {
            return Err(ResolveError::AutoIncrementWithoutPrimaryKey {
                table: table.to_string(),
                column: name.to_string(),
                origin: origin.to_string(),
            });
        }
        if let AutoIncrement::Keyword(keyword) = engine.auto_increment() {
            declaration.push(' ');
            declaration.push_str(keyword);
        }
    }

    if *not_null {
        declaration.push_str(" NOT NULL");
    }
    if let Some(default) = default {
        declaration.push_str(" DEFAULT ");
        declaration.push_str(default);
    }

    let mut constraints = Vec::new();
    if *primary_key {
        constraints.push(format!(
            "CONSTRAINT pk_{table}_{name} PRIMARY KEY ({name})"
        ));
    }
    if let Some(foreign_key) = foreign_key {
        constraints.push(foreign_key_constraint(foreign_key, table, name, origin)?);
    }
    for (i, condition) in checks.iter().enumerate() {
        constraints.push(format!(
            "CONSTRAINT check_{table}_{name}_{i} CHECK ({condition})"
        ));
    }
    if *unique {
        constraints.push(format!("CONSTRAINT unique_{table}_{name} UNIQUE ({name})"));
    }

    Ok(ResolvedColumn {
        declaration,
        constraints,
    })
}

fn foreign_key_constraint(
    foreign_key: &ForeignKey,
    table: &str,
    name: &str,
    origin: &str,
) -> Result<String, ResolveError> {
    let Some(target) = &foreign_key.references else {
        return Err(ResolveError::UndefinedReference {
            table: table.to_string(),
            column: name.to_string(),
            origin: origin.to_string(),
        });
    };

    let mut sql = format!(
        "CONSTRAINT fk_{table}_{name} FOREIGN KEY ({name}) REFERENCES {}({})",
        target.table, target.column
    );
    if let Some(action) = foreign_key.on_delete {
        sql.push_str(" ON DELETE ");
        sql.push_str(action.as_sql());
    }
    if let Some(action) = foreign_key.on_update {
        sql.push_str(" ON UPDATE ");
        sql.push_str(action.as_sql());
    }
    Ok(sql)
}
