// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (sea-orm over SQLite).

pub mod activities;
pub mod migrator;

pub use activities::{ActivityStore, IngestReport, NewActivity, RecordOutcome};

use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::sqlx::ConnectOptions as _;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr, SqlxSqliteConnector,
};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared database handle.
#[derive(Clone)]
pub struct Db {
    conn: DatabaseConnection,
}

impl Db {
    /// Connect and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let conn = if is_in_memory(database_url) {
            connect_in_memory(database_url).await?
        } else {
            let mut opt = ConnectOptions::new(database_url.to_string());
            opt.max_connections(5)
                .min_connections(1)
                .connect_timeout(CONNECT_TIMEOUT)
                .acquire_timeout(CONNECT_TIMEOUT)
                .sqlx_logging(false);
            Database::connect(opt).await?
        };

        migrator::Migrator::up(&conn, None).await?;

        tracing::info!(
            in_memory = is_in_memory(database_url),
            "Database connected & migrations applied"
        );

        Ok(Self { conn })
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }

    pub fn activities(&self) -> ActivityStore {
        ActivityStore::new(self.conn.clone())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Every SQLite connection to `:memory:` opens its own empty database, so the
/// pool holds exactly one connection and never closes or recycles it.
async fn connect_in_memory(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let options = database_url
        .parse::<SqliteConnectOptions>()
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?
        .disable_statement_logging();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(CONNECT_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|e| DbErr::Conn(RuntimeErr::SqlxError(e)))?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}
