#[macro_use]
extern crate diesel;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;
use news_site::config::Config;
use news_site::error::LoadError;
use news_site::ingest::NewsLoader;
use news_site::manager::{DropOutcome, NewsManager};
use news_site::news::DBNews;
use news_site::query::{all_news, news_by_id};
use news_site::schema::NEWS;
use std::io::Write;
use tempfile::TempDir;

const HEADER: &str = "news_id,headline,news,news_image,news_url\n";

fn temp_manager() -> (TempDir, NewsManager) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:///{}", dir.path().join("news.db").display());
    (dir, NewsManager::new(Config::new(url)))
}

fn stored_ids(manager: &NewsManager) -> Vec<i64> {
    let session = manager.open_session().unwrap();
    all_news(&session)
        .unwrap()
        .into_iter()
        .map(|news| news.news_id)
        .collect()
}

fn load_str(manager: &NewsManager, data: &str) -> Result<usize, LoadError> {
    let loader = NewsLoader::new(manager);
    loader.create_db()?;
    loader.ingest_news(data.as_bytes())
}

#[test]
fn single_row_round_trips() {
    let (_dir, manager) = temp_manager();

    let written = load_str(&manager, &format!("{}1,H,B,I,U\n", HEADER)).unwrap();
    assert_eq!(written, 1);

    let session = manager.open_session().unwrap();
    assert_eq!(
        news_by_id(&session, 1).unwrap(),
        DBNews {
            news_id: 1,
            headline: "H".into(),
            body: "B".into(),
            news_image: "I".into(),
            news_url: "U".into(),
        }
    );
}

#[derive(QueryableByName)]
struct Audited {
    #[sql_type = "BigInt"]
    news_id: i64,
}

#[test]
fn rows_are_committed_in_file_order() {
    let (_dir, manager) = temp_manager();
    let loader = NewsLoader::new(&manager);
    loader.create_db().unwrap();

    {
        let session = manager.open_session().unwrap();
        session
            .connection()
            .batch_execute(
                "CREATE TABLE audit (seq INTEGER PRIMARY KEY AUTOINCREMENT, news_id INTEGER NOT NULL);
                 CREATE TRIGGER news_audit AFTER INSERT ON news
                 BEGIN INSERT INTO audit (news_id) VALUES (NEW.news_id); END;",
            )
            .unwrap();
    }

    let data = format!("{}30,c,c,c,c\n10,a,a,a,a\n20,b,b,b,b\n5,d,d,d,d\n", HEADER);
    assert_eq!(loader.ingest_news(data.as_bytes()).unwrap(), 4);

    let session = manager.open_session().unwrap();
    let order: Vec<i64> = sql_query("SELECT news_id FROM audit ORDER BY seq")
        .load::<Audited>(session.connection())
        .unwrap()
        .into_iter()
        .map(|row| row.news_id)
        .collect();
    assert_eq!(order, [30, 10, 20, 5]);
}

#[test]
fn duplicate_id_aborts_after_first_copy() {
    let (_dir, manager) = temp_manager();

    let data = format!(
        "{}1,a,a,a,a\n2,b,b,b,b\n1,dup,dup,dup,dup\n3,c,c,c,c\n",
        HEADER
    );
    let err = load_str(&manager, &data).unwrap_err();
    assert!(matches!(err, LoadError::Database(_)), "{:?}", err);

    assert_eq!(stored_ids(&manager), [1, 2]);
    let session = manager.open_session().unwrap();
    assert_eq!(news_by_id(&session, 1).unwrap().headline, "a");
}

#[test]
fn malformed_row_aborts_load() {
    let (_dir, manager) = temp_manager();

    let data = format!("{}1,a,a,a,a\n2,b,b,b,b\n3,short,row\n4,d,d,d,d\n", HEADER);
    match load_str(&manager, &data) {
        Err(LoadError::MalformedRow {
            line,
            expected,
            found,
        }) => {
            assert_eq!((line, expected, found), (4, 5, 3));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(stored_ids(&manager), [1, 2]);
}

#[test]
fn invalid_id_aborts_load() {
    let (_dir, manager) = temp_manager();

    let data = format!("{}1,a,a,a,a\nx2,b,b,b,b\n", HEADER);
    assert!(matches!(
        load_str(&manager, &data),
        Err(LoadError::InvalidId { line: 3, .. })
    ));
    assert_eq!(stored_ids(&manager), [1]);
}

#[test]
fn headerless_dataset() {
    let (_dir, manager) = temp_manager();
    let loader = NewsLoader::new(&manager).has_headers(false);
    loader.create_db().unwrap();

    assert_eq!(loader.ingest_news("7,a,a,a,a\n8,b,b,b,b\n".as_bytes()).unwrap(), 2);
    assert_eq!(stored_ids(&manager), [7, 8]);
}

#[test]
fn load_csv_replaces_previous_contents() {
    let (dir, manager) = temp_manager();
    let loader = NewsLoader::new(&manager);

    let first = dir.path().join("first.csv");
    std::fs::write(&first, format!("{}1,a,a,a,a\n2,b,b,b,b\n", HEADER)).unwrap();
    assert_eq!(loader.load_csv(&first).unwrap(), 2);

    let second = dir.path().join("second.csv");
    let mut file = std::fs::File::create(&second).unwrap();
    write!(
        file,
        "{}9,\"Quoted, headline\",\"Line one\nline two\",img,url\n",
        HEADER
    )
    .unwrap();
    drop(file);
    assert_eq!(loader.load_csv(&second).unwrap(), 1);

    assert_eq!(stored_ids(&manager), [9]);
    let session = manager.open_session().unwrap();
    let news = news_by_id(&session, 9).unwrap();
    assert_eq!(news.headline, "Quoted, headline");
    assert_eq!(news.body, "Line one\nline two");
}

#[test]
fn missing_dataset_keeps_current_table() {
    let (dir, manager) = temp_manager();
    load_str(&manager, &format!("{}1,a,a,a,a\n", HEADER)).unwrap();

    let err = NewsLoader::new(&manager)
        .load_csv(dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
    assert_eq!(stored_ids(&manager), [1]);
}

#[test]
fn reload_twice_leaves_no_residue() {
    let (_dir, manager) = temp_manager();

    load_str(&manager, &format!("{}1,a,a,a,a\n2,b,b,b,b\n", HEADER)).unwrap();
    assert_eq!(manager.recreate(&NEWS).unwrap(), DropOutcome::Dropped);
    assert!(stored_ids(&manager).is_empty());
    assert_eq!(manager.recreate(&NEWS).unwrap(), DropOutcome::Dropped);
    assert!(stored_ids(&manager).is_empty());
}
