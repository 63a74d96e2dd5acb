use crate::schema::news;
use serde::Serialize;

#[derive(Queryable, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DBNews {
    pub news_id: i64,
    pub headline: String,
    pub body: String,
    pub news_image: String,
    pub news_url: String,
}

/// One article as read from the dataset, ready to be written.
#[derive(Insertable, Debug, Clone, PartialEq, Eq)]
#[table_name = "news"]
pub struct NewsRecord {
    pub news_id: i64,
    pub headline: String,
    pub body: String,
    pub news_image: String,
    pub news_url: String,
}

impl NewsRecord {
    pub fn new(
        news_id: i64,
        headline: impl Into<String>,
        body: impl Into<String>,
        news_image: impl Into<String>,
        news_url: impl Into<String>,
    ) -> Self {
        NewsRecord {
            news_id,
            headline: headline.into(),
            body: body.into(),
            news_image: news_image.into(),
            news_url: news_url.into(),
        }
    }

    /// First `len` characters of the body, for log lines.
    pub fn preview(&self, len: usize) -> &str {
        match self.body.char_indices().nth(len) {
            Some((end, _)) => &self.body[..end],
            None => &self.body,
        }
    }
}
