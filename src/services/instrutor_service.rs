// src/services/instrutor_service.rs
use crate::{error::AppResult, models::Instrutor, services::repositorio};
use sqlx::SqlitePool;
use validator::Validate;

pub async fn criar(db_pool: &SqlitePool, mut instrutor: Instrutor) -> AppResult<Instrutor> {
    instrutor.validate()?;
    tracing::info!("Criando instrutor '{}'", instrutor.nome);

    let id = sqlx::query("INSERT INTO instrutor (nome, especialidade) VALUES (?1, ?2)")
        .bind(&instrutor.nome)
        .bind(&instrutor.especialidade)
        .execute(db_pool)
        .await?
        .last_insert_rowid();

    instrutor.id = Some(id);
    Ok(instrutor)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Instrutor>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Instrutor> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Instrutor>> {
    repositorio::listar(db_pool).await
}

pub async fn atualizar(db_pool: &SqlitePool, instrutor: &Instrutor) -> AppResult<()> {
    let id = repositorio::exigir_id(instrutor)?;
    instrutor.validate()?;
    tracing::info!("Atualizando instrutor #{}", id);

    let rows_affected =
        sqlx::query("UPDATE instrutor SET nome = ?1, especialidade = ?2 WHERE id = ?3")
            .bind(&instrutor.nome)
            .bind(&instrutor.especialidade)
            .bind(id)
            .execute(db_pool)
            .await?
            .rows_affected();

    repositorio::confirmar_afetadas::<Instrutor>(rows_affected, id)
}

pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<Instrutor, _>(db_pool, id).await
}
