use crate::config::Config;
use crate::error::LoadError;
use crate::schema::{drop_table_sql, quote_ident, TableSchema};
use crate::session::Session;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::result::ConnectionError;
use diesel::sqlite::SqliteConnection;
use diesel::sql_query;
use diesel::sql_types::{Integer, Text};
use log::{debug, info, warn};

#[derive(QueryableByName)]
struct TableName {
    #[sql_type = "Text"]
    name: String,
}

/// A column as the live database reports it.
#[derive(QueryableByName, Debug, Clone, PartialEq, Eq)]
pub struct ReflectedColumn {
    #[sql_type = "Text"]
    pub name: String,
    #[sql_type = "Text"]
    #[column_name = "type"]
    pub kind: String,
    #[sql_type = "Integer"]
    pub notnull: i32,
    #[sql_type = "Integer"]
    pub pk: i32,
}

/// What `delete_if_exists` ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Absent,
    Dropped,
    /// The drop was attempted and failed; the failure has been logged.
    Failed,
}

/// Owns the lifecycle of the news tables behind one connection string.
#[derive(Clone, Debug)]
pub struct NewsManager {
    config: Config,
}

impl NewsManager {
    pub fn new(config: Config) -> Self {
        NewsManager { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Opens a fresh connection. For `sqlite://` every session gets its own
    /// in-memory database.
    pub fn open_session(&self) -> Result<Session, ConnectionError> {
        let path = self.config.sqlite_path();
        let conn = SqliteConnection::establish(path)?;
        Ok(Session::new(conn, path))
    }

    pub fn table_names(&self) -> Result<Vec<String>, LoadError> {
        let session = self.open_session()?;
        Ok(table_names(session.connection())?)
    }

    pub fn reflect_columns(&self, table_name: &str) -> Result<Vec<ReflectedColumn>, LoadError> {
        let session = self.open_session()?;
        Ok(reflect_columns(session.connection(), table_name)?)
    }

    /// Drops `table_name` if the live schema has it.
    ///
    /// Failures are logged and swallowed, so a table that cannot be dropped
    /// survives alongside whatever is created next.
    pub fn delete_if_exists(&self, table_name: &str) -> DropOutcome {
        match self.try_delete(table_name) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Could not delete table {}: {}", table_name, err);
                DropOutcome::Failed
            }
        }
    }

    fn try_delete(&self, table_name: &str) -> Result<DropOutcome, LoadError> {
        let session = self.open_session()?;
        let conn = session.connection();

        if !table_names(conn)?.iter().any(|name| name == table_name) {
            debug!("table {} does not exist, nothing to drop", table_name);
            return Ok(DropOutcome::Absent);
        }

        let columns = reflect_columns(conn, table_name)?;
        debug!(
            "reflected {} with columns {:?}",
            table_name,
            columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );

        info!("Deleting {} table", table_name);
        conn.batch_execute(&drop_table_sql(table_name))?;
        debug!("successfully dropped table {}", table_name);
        Ok(DropOutcome::Dropped)
    }

    /// Creates the table described by `schema` unless it is already there.
    pub fn create_table(&self, schema: &TableSchema) -> Result<(), LoadError> {
        let session = self.open_session()?;
        session.connection().batch_execute(&schema.create_sql())?;
        info!("created table {}", schema.name);
        Ok(())
    }

    /// Best-effort drop followed by a create that must succeed.
    pub fn recreate(&self, schema: &TableSchema) -> Result<DropOutcome, LoadError> {
        let outcome = self.delete_if_exists(schema.name);
        self.create_table(schema)?;
        Ok(outcome)
    }
}

fn table_names(conn: &SqliteConnection) -> QueryResult<Vec<String>> {
    let names = sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .load::<TableName>(conn)?;
    Ok(names.into_iter().map(|table| table.name).collect())
}

fn reflect_columns(conn: &SqliteConnection, table_name: &str) -> QueryResult<Vec<ReflectedColumn>> {
    sql_query(format!("PRAGMA table_info({})", quote_ident(table_name))).load(conn)
}
