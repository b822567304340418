// src/services/plano_service.rs
use crate::{
    error::AppResult,
    models::{decimal, Plano},
    services::repositorio,
};
use sqlx::SqlitePool;
use validator::Validate;

pub async fn criar(db_pool: &SqlitePool, mut plano: Plano) -> AppResult<Plano> {
    plano.validate()?;
    tracing::info!("Criando plano '{}' ({} meses, {})", plano.nome, plano.duracao_meses, plano.valor);

    let id = sqlx::query(
        r#"
        INSERT INTO plano (nome, descricao, valor, duracao_meses, status)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&plano.nome)
    .bind(&plano.descricao)
    .bind(decimal::texto(&plano.valor))
    .bind(plano.duracao_meses)
    .bind(&plano.status)
    .execute(db_pool)
    .await?
    .last_insert_rowid();

    plano.id = Some(id);
    Ok(plano)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Plano>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Plano> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Plano>> {
    repositorio::listar(db_pool).await
}

/// Planos com o estado indicado (comparação sem distinguir maiúsculas).
pub async fn listar_por_status(db_pool: &SqlitePool, status: &str) -> AppResult<Vec<Plano>> {
    let planos = sqlx::query_as::<_, Plano>(
        "SELECT * FROM plano WHERE status = ?1 COLLATE NOCASE ORDER BY id ASC",
    )
    .bind(status)
    .fetch_all(db_pool)
    .await?;
    Ok(planos)
}

pub async fn atualizar(db_pool: &SqlitePool, plano: &Plano) -> AppResult<()> {
    let id = repositorio::exigir_id(plano)?;
    plano.validate()?;
    tracing::info!("Atualizando plano #{}", id);

    let rows_affected = sqlx::query(
        r#"
        UPDATE plano
        SET nome = ?1, descricao = ?2, valor = ?3, duracao_meses = ?4, status = ?5
        WHERE id = ?6
        "#,
    )
    .bind(&plano.nome)
    .bind(&plano.descricao)
    .bind(decimal::texto(&plano.valor))
    .bind(plano.duracao_meses)
    .bind(&plano.status)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    repositorio::confirmar_afetadas::<Plano>(rows_affected, id)
}

pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<Plano, _>(db_pool, id).await
}
