use crate::error::LoadError;
use crate::manager::{DropOutcome, NewsManager};
use crate::news::NewsRecord;
use crate::schema::NEWS;
use csv::{ReaderBuilder, StringRecord};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns of a dataset row, in order: id, headline, body, image, url.
pub const NEWS_FIELDS: usize = 5;

/// Replaces the contents of the news table with a CSV dataset.
pub struct NewsLoader<'a> {
    manager: &'a NewsManager,
    has_headers: bool,
}

impl<'a> NewsLoader<'a> {
    pub fn new(manager: &'a NewsManager) -> Self {
        NewsLoader {
            manager,
            has_headers: true,
        }
    }

    /// Whether the first line of the dataset is a header row to skip.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    pub fn create_db(&self) -> Result<DropOutcome, LoadError> {
        self.manager.recreate(&NEWS)
    }

    /// Writes every row of `reader` in file order, one commit per row.
    ///
    /// Stops at the first bad row or failed insert. Rows written before that
    /// stay in the table. Returns the number of rows written.
    pub fn ingest_news<R: Read>(&self, reader: R) -> Result<usize, LoadError> {
        let mut rows = ReaderBuilder::new()
            .has_headers(self.has_headers)
            .flexible(true)
            .from_reader(reader);

        let session = self.manager.open_session()?;
        let mut written = 0;
        for row in rows.records() {
            let record = parse_row(&row?)?;
            session.add_news(&record)?;
            written += 1;
        }
        session.close();

        Ok(written)
    }

    /// Full replace: rebuild the table, then ingest the file at `path`.
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        // Open the dataset first so a bad path leaves the current table alone.
        let file = File::open(path)?;

        info!("loading news from {}", path.display());
        self.create_db()?;
        let written = self.ingest_news(file)?;
        info!("loaded {} news records from {}", written, path.display());

        Ok(written)
    }
}

fn parse_row(row: &StringRecord) -> Result<NewsRecord, LoadError> {
    let line = row.position().map_or(0, |position| position.line());

    if row.len() != NEWS_FIELDS {
        return Err(LoadError::MalformedRow {
            line,
            expected: NEWS_FIELDS,
            found: row.len(),
        });
    }

    let news_id: i64 = row[0].trim().parse().map_err(|_| LoadError::InvalidId {
        line,
        value: row[0].to_string(),
    })?;

    Ok(NewsRecord::new(news_id, &row[1], &row[2], &row[3], &row[4]))
}
