use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    let conn = if db_file == ":memory:" {
        // Every pooled connection to sqlite::memory: gets its own database,
        // so the pool must stay at a single connection.
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1);
        Database::connect(options).await?
    } else {
        if let Some(parent) = std::path::Path::new(db_file).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let absolute_path = if std::path::Path::new(db_file).is_absolute() {
            std::path::PathBuf::from(db_file)
        } else {
            std::env::current_dir()?.join(db_file)
        };
        // Normalize path separators and ensure proper URL form on Windows
        let normalized = absolute_path.to_string_lossy().replace('\\', "/");
        let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
        let prefix = if needs_leading_slash { "/" } else { "" };
        let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
        Database::connect(&db_url).await?
    };

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Create any missing tables. Every statement is idempotent, so startup on an
/// existing database is a no-op.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, create_sql) in TABLES {
        if !table_exists(conn, name).await? {
            tracing::info!("Creating {} table", name);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                create_sql.to_string(),
            ))
            .await?;
        }
    }
    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
        [name.into()],
    );
    Ok(!conn.query_all(check).await?.is_empty())
}

const TABLES: &[(&str, &str)] = &[
    (
        "a001_store",
        r#"
        CREATE TABLE a001_store (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            store_type TEXT NOT NULL DEFAULT '',
            region TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    ),
    (
        "a002_sales_rep",
        r#"
        CREATE TABLE a002_sales_rep (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            full_name TEXT NOT NULL,
            role TEXT,
            email TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    ),
    (
        "a003_daily_revenue_fact",
        r#"
        CREATE TABLE a003_daily_revenue_fact (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            date TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            entity_kind TEXT NOT NULL,
            daily_revenue REAL NOT NULL DEFAULT 0,
            mtd_revenue REAL NOT NULL DEFAULT 0,
            ly_revenue REAL,
            goal_revenue REAL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            UNIQUE(date, entity_id)
        );
    "#,
    ),
    (
        "a004_monthly_goal",
        r#"
        CREATE TABLE a004_monthly_goal (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            month TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            entity_kind TEXT NOT NULL,
            goal_amount REAL NOT NULL DEFAULT 0,
            ly_revenue_reference REAL,
            work_days INTEGER,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            UNIQUE(month, entity_id)
        );
    "#,
    ),
    (
        "a005_rep_activity_fact",
        r#"
        CREATE TABLE a005_rep_activity_fact (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            date TEXT NOT NULL,
            rep_id TEXT NOT NULL,
            calls INTEGER NOT NULL DEFAULT 0,
            emails INTEGER NOT NULL DEFAULT 0,
            meetings INTEGER NOT NULL DEFAULT 0,
            notes INTEGER NOT NULL DEFAULT 0,
            sms INTEGER NOT NULL DEFAULT 0,
            total_activities INTEGER NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            UNIQUE(date, rep_id)
        );
    "#,
    ),
    (
        "a006_owner_mapping",
        r#"
        CREATE TABLE a006_owner_mapping (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            external_owner_id TEXT NOT NULL UNIQUE,
            rep_id TEXT NOT NULL,
            owner_name TEXT,
            owner_email TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    ),
    (
        "a007_entity_group",
        r#"
        CREATE TABLE a007_entity_group (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            entity_id TEXT NOT NULL,
            group_tag TEXT NOT NULL,
            display_name TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0,
            UNIQUE(entity_id, group_tag)
        );
    "#,
    ),
];
