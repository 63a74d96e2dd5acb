use news_site::config::Config;
use rocket::launch;

#[launch]
fn rocket() -> _ {
    news_site::build(Config::from_env())
}
