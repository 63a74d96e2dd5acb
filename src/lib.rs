#[macro_use]
extern crate diesel;

pub mod config;
pub mod endpoints;
pub mod error;
pub mod ingest;
pub mod manager;
pub mod news;
pub mod query;
pub mod schema;
pub mod session;

use config::Config;
use manager::NewsManager;
use rocket::{routes, Build, Rocket};
use rocket_dyn_templates::Template;

pub fn build(config: Config) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![endpoints::index, endpoints::detail])
        .mount(
            "/api",
            routes![
                endpoints::get_news,
                endpoints::get_news_item,
                endpoints::fallback
            ],
        )
        .attach(Template::fairing())
        .manage(NewsManager::new(config))
}
