// src/services/repositorio.rs
//! Operações por chave comuns a todas as entidades.

use crate::{
    error::{AppError, AppResult},
    models::Entidade,
};
use sqlx::{sqlite::SqliteRow, FromRow, SqliteExecutor, SqlitePool};

pub(crate) async fn buscar_por_id<T>(db_pool: &SqlitePool, id: i64) -> AppResult<Option<T>>
where
    T: Entidade + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    tracing::debug!("Buscando {} por ID: {}", T::NOME, id);
    let registo = sqlx::query_as::<_, T>(&format!("SELECT * FROM {} WHERE id = ?1", T::TABELA))
        .bind(id)
        .fetch_optional(db_pool)
        .await?;

    if registo.is_none() {
        tracing::debug!("{} #{} não encontrado.", T::NOME, id);
    }
    Ok(registo)
}

/// Como `buscar_por_id`, mas a ausência é um erro.
pub(crate) async fn obter<T>(db_pool: &SqlitePool, id: i64) -> AppResult<T>
where
    T: Entidade + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    buscar_por_id::<T>(db_pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado {
            entidade: T::NOME,
            id,
        })
}

pub(crate) async fn listar<T>(db_pool: &SqlitePool) -> AppResult<Vec<T>>
where
    T: Entidade + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let registos = sqlx::query_as::<_, T>(&format!("SELECT * FROM {} ORDER BY id ASC", T::TABELA))
        .fetch_all(db_pool)
        .await?;
    tracing::debug!("Encontrados {} registos em {}.", registos.len(), T::TABELA);
    Ok(registos)
}

/// Registos cuja chave estrangeira `coluna` aponta para `id`.
pub(crate) async fn listar_por<T>(db_pool: &SqlitePool, coluna: &str, id: i64) -> AppResult<Vec<T>>
where
    T: Entidade + for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let registos = sqlx::query_as::<_, T>(&format!(
        "SELECT * FROM {} WHERE {} = ?1 ORDER BY id ASC",
        T::TABELA,
        coluna
    ))
    .bind(id)
    .fetch_all(db_pool)
    .await?;
    Ok(registos)
}

pub(crate) async fn remover<'e, T, E>(executor: E, id: i64) -> AppResult<()>
where
    T: Entidade,
    E: SqliteExecutor<'e>,
{
    let rows_affected = sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", T::TABELA))
        .bind(id)
        .execute(executor)
        .await?
        .rows_affected();
    confirmar_afetadas::<T>(rows_affected, id)?;
    tracing::info!("✅ {} #{} removido.", T::NOME, id);
    Ok(())
}

/// Nenhuma linha afetada num UPDATE/DELETE por chave significa registo inexistente.
pub(crate) fn confirmar_afetadas<T: Entidade>(rows_affected: u64, id: i64) -> AppResult<()> {
    if rows_affected == 0 {
        tracing::warn!("{} #{} não encontrado.", T::NOME, id);
        return Err(AppError::NaoEncontrado {
            entidade: T::NOME,
            id,
        });
    }
    Ok(())
}

/// Chave de um registo que já devia estar persistido.
pub(crate) fn exigir_id<T: Entidade>(registo: &T) -> AppResult<i64> {
    registo.id().ok_or_else(|| AppError::campo_obrigatorio("id"))
}
