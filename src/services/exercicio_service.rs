// src/services/exercicio_service.rs
use crate::{error::AppResult, models::Exercicio, services::repositorio};
use sqlx::SqlitePool;
use validator::Validate;

pub async fn criar(db_pool: &SqlitePool, mut exercicio: Exercicio) -> AppResult<Exercicio> {
    if let Err(erros) = exercicio.validate() {
        tracing::warn!("Exercício '{}' rejeitado: {}", exercicio.nome, erros);
        return Err(erros.into());
    }

    let id = sqlx::query("INSERT INTO exercicio (nome, grupo_muscular) VALUES (?1, ?2)")
        .bind(&exercicio.nome)
        .bind(&exercicio.grupo_muscular)
        .execute(db_pool)
        .await?
        .last_insert_rowid();

    exercicio.id = Some(id);
    tracing::info!("✅ Exercício #{} '{}' criado.", id, exercicio.nome);
    Ok(exercicio)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Exercicio>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Exercicio> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Exercicio>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_grupo(db_pool: &SqlitePool, grupo: &str) -> AppResult<Vec<Exercicio>> {
    let exercicios = sqlx::query_as::<_, Exercicio>(
        "SELECT * FROM exercicio WHERE grupo_muscular = ?1 COLLATE NOCASE ORDER BY nome ASC",
    )
    .bind(grupo)
    .fetch_all(db_pool)
    .await?;
    Ok(exercicios)
}

pub async fn atualizar(db_pool: &SqlitePool, exercicio: &Exercicio) -> AppResult<()> {
    let id = repositorio::exigir_id(exercicio)?;
    exercicio.validate()?;
    tracing::info!("Atualizando exercício #{}", id);

    let rows_affected =
        sqlx::query("UPDATE exercicio SET nome = ?1, grupo_muscular = ?2 WHERE id = ?3")
            .bind(&exercicio.nome)
            .bind(&exercicio.grupo_muscular)
            .bind(id)
            .execute(db_pool)
            .await?
            .rows_affected();

    repositorio::confirmar_afetadas::<Exercicio>(rows_affected, id)
}

/// Falha com `Referencia` se algum plano de treino ainda usa o exercício.
pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<Exercicio, _>(db_pool, id).await
}
