use crate::news::NewsRecord;
use crate::schema::news;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use log::debug;

/// An open connection to the news database.
///
/// The connection is released when the session is dropped, so every exit
/// path (including `?` on an error) closes it.
pub struct Session {
    conn: SqliteConnection,
    database: String,
}

impl Session {
    pub(crate) fn new(conn: SqliteConnection, database: &str) -> Self {
        debug!("session opened on {}", database);
        Session {
            conn,
            database: database.to_string(),
        }
    }

    pub fn connection(&self) -> &SqliteConnection {
        &self.conn
    }

    /// Writes one record and commits it before returning.
    ///
    /// A failed insert is rolled back on its own; nothing else is undone.
    pub fn add_news(&self, record: &NewsRecord) -> QueryResult<()> {
        self.conn.transaction::<_, DieselError, _>(|| {
            diesel::insert_into(news::table)
                .values(record)
                .execute(&self.conn)?;
            Ok(())
        })?;

        debug!(
            "'{}' added to db with id {}",
            record.preview(20),
            record.news_id
        );
        Ok(())
    }

    pub fn close(self) {
        drop(self);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("session on {} closed", self.database);
    }
}
