use std::fmt::{self, Display};

table! {
    news (news_id) {
        news_id -> BigInt,
        headline -> Text,
        #[sql_name = "news"]
        body -> Text,
        news_image -> Text,
        news_url -> Text,
    }
}

/// Declared type of a column, with the length cap where the column has one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Varchar(usize),
    Text(usize),
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "INTEGER"),
            ColumnType::Varchar(len) => write!(f, "VARCHAR({})", len),
            // SQLite ignores the length on TEXT, so it only lives in the descriptor.
            ColumnType::Text(_) => write!(f, "TEXT"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
}

impl Column {
    pub const fn primary_key(name: &'static str, kind: ColumnType) -> Self {
        Column {
            name,
            kind,
            primary_key: true,
            nullable: false,
        }
    }

    pub const fn required(name: &'static str, kind: ColumnType) -> Self {
        Column {
            name,
            kind,
            primary_key: false,
            nullable: false,
        }
    }
}

/// Explicit description of a table, independent of any Diesel binding.
///
/// The table manager creates tables from this rather than from the `table!`
/// declaration above, so the DDL can be generated for any descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let mut definition = format!("{} {}", quote_ident(column.name), column.kind);
                if !column.nullable {
                    definition.push_str(" NOT NULL");
                }
                definition
            })
            .collect();

        let keys: Vec<String> = self
            .columns
            .iter()
            .filter(|column| column.primary_key)
            .map(|column| quote_ident(column.name))
            .collect();
        if !keys.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
        }

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_ident(self.name),
            parts.join(", ")
        )
    }

    pub fn drop_sql(&self) -> String {
        drop_table_sql(self.name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.name)
    }
}

pub const NEWS: TableSchema = TableSchema {
    name: "news",
    columns: &[
        Column::primary_key("news_id", ColumnType::Integer),
        Column::required("headline", ColumnType::Varchar(1000)),
        Column::required("news", ColumnType::Text(10000)),
        Column::required("news_image", ColumnType::Varchar(1000)),
        Column::required("news_url", ColumnType::Varchar(1000)),
    ],
};

pub fn drop_table_sql(table_name: &str) -> String {
    format!("DROP TABLE {}", quote_ident(table_name))
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
