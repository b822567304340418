// src/db.rs
use crate::{config::Config, error::AppResult, models::TABELAS};
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub async fn create_db_pool(config: &Config) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", config.database_url);

    // Criar se não existir, chaves estrangeiras sempre ativas
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Executando migrações da base de dados...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrações concluídas.");

    Ok(pool)
}

/// Número de linhas de uma tabela do esquema.
#[derive(Debug, Clone, Serialize)]
pub struct ContagemTabela {
    pub tabela: &'static str,
    pub registos: i64,
}

/// Conta os registos de todas as tabelas do esquema.
pub async fn contar_registos(db_pool: &SqlitePool) -> AppResult<Vec<ContagemTabela>> {
    let mut contagens = Vec::with_capacity(TABELAS.len());
    for &tabela in TABELAS {
        // Os nomes vêm de constantes internas, nunca de input externo
        let registos: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {tabela}"))
            .fetch_one(db_pool)
            .await?;
        contagens.push(ContagemTabela { tabela, registos });
    }
    tracing::debug!("Contagem de registos: {:?}", contagens);
    Ok(contagens)
}
