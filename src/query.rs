use crate::error::QueryError;
use crate::news::DBNews;
use crate::schema::news;
use crate::session::Session;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

/// Every article in the table, lowest id first.
pub fn all_news(session: &Session) -> Result<Vec<DBNews>, QueryError> {
    Ok(news::table
        .order(news::news_id.asc())
        .load::<DBNews>(session.connection())?)
}

pub fn news_by_id(session: &Session, id: i64) -> Result<DBNews, QueryError> {
    news::table
        .filter(news::news_id.eq(id))
        .first::<DBNews>(session.connection())
        .map_err(|err| match err {
            DieselError::NotFound => QueryError::NotFound(id),
            _ => QueryError::from(err),
        })
}
