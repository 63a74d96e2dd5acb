use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///data/news.db";

/// Settings shared by the loader and the web front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    /// Date shown above the listing, if any.
    pub display_date: Option<String>,
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Self {
        Config {
            database_url: database_url.into(),
            display_date: None,
        }
    }

    pub fn with_display_date(mut self, date: impl Into<String>) -> Self {
        self.display_date = Some(date.into());
        self
    }

    /// Reads `DATABASE_URL` and `NEWS_DATE`, after loading a `.env` file if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let display_date = env::var("NEWS_DATE").ok().filter(|date| !date.is_empty());

        Config {
            database_url,
            display_date,
        }
    }

    /// Turns the connection string into something SQLite can open.
    ///
    /// `sqlite:///relative.db` and `sqlite:////absolute.db` follow the usual
    /// URL convention; `sqlite://` alone means an in-memory database. Anything
    /// without the scheme is passed through untouched.
    pub fn sqlite_path(&self) -> &str {
        let url = self.database_url.as_str();
        match url.strip_prefix("sqlite://") {
            Some("") => ":memory:",
            Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
            None => url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DATABASE_URL)
    }
}
