use crate::error::{APIError, QueryError};
use crate::manager::NewsManager;
use crate::news::DBNews;
use crate::query::{all_news, news_by_id};
use log::{debug, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, State};
use rocket_dyn_templates::{context, Template};
use serde::Serialize;

#[derive(Serialize)]
struct IndexContext<'a> {
    date: Option<&'a str>,
    error: Option<&'a str>,
    news_entities: Vec<DBNews>,
}

#[get("/")]
pub fn index(manager: &State<NewsManager>) -> (Status, Template) {
    let date = manager.config().display_date.as_deref();
    let listing = manager
        .open_session()
        .map_err(QueryError::from)
        .and_then(|session| all_news(&session));

    match listing {
        Ok(news_entities) => {
            debug!("Index page accessed");
            let page = IndexContext {
                date,
                error: None,
                news_entities,
            };
            (Status::Ok, Template::render("index", page))
        }
        Err(err) => {
            warn!("Not able to display news, error page returned: {}", err);
            let status = match err {
                QueryError::Unavailable(_) => Status::ServiceUnavailable,
                QueryError::NotFound(_) | QueryError::Database(_) => Status::InternalServerError,
            };
            let page = IndexContext {
                date,
                error: Some("The news could not be loaded right now."),
                news_entities: Vec::new(),
            };
            (status, Template::render("index", page))
        }
    }
}

#[get("/news/<id>")]
pub fn detail(manager: &State<NewsManager>, id: i64) -> Result<Template, Status> {
    let session = manager.open_session().map_err(|err| {
        warn!("Not able to open a session for news {}: {}", id, err);
        Status::ServiceUnavailable
    })?;

    match news_by_id(&session, id) {
        Ok(item) => Ok(Template::render("detail", context! { news: item })),
        Err(QueryError::NotFound(_)) => Err(Status::NotFound),
        Err(err) => {
            warn!("Not able to display news {}: {}", id, err);
            Err(Status::InternalServerError)
        }
    }
}

#[get("/news")]
pub fn get_news(manager: &State<NewsManager>) -> Result<Json<Vec<DBNews>>, APIError> {
    let session = manager.open_session().map_err(QueryError::from)?;
    Ok(Json(all_news(&session)?))
}

#[get("/news/<id>")]
pub fn get_news_item(manager: &State<NewsManager>, id: i64) -> Result<Json<DBNews>, APIError> {
    let session = manager.open_session().map_err(QueryError::from)?;
    news_by_id(&session, id).map(Json).map_err(APIError::from)
}

#[get("/<_..>", rank = 9999)]
pub fn fallback() -> APIError {
    APIError::new(Status::NotFound, "Invalid endpoint.".into())
}
