// src/services/frequencia_service.rs
use crate::{error::AppResult, models::Frequencia, services::repositorio};
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub async fn criar(db_pool: &SqlitePool, mut frequencia: Frequencia) -> AppResult<Frequencia> {
    tracing::info!(
        "Criando frequência do aluno #{} em {} (presente: {})",
        frequencia.aluno_id,
        frequencia.data,
        frequencia.presenca
    );

    let id = sqlx::query("INSERT INTO frequencia (id_aluno, data, presenca) VALUES (?1, ?2, ?3)")
        .bind(frequencia.aluno_id)
        .bind(frequencia.data)
        .bind(frequencia.presenca)
        .execute(db_pool)
        .await?
        .last_insert_rowid();

    frequencia.id = Some(id);
    Ok(frequencia)
}

/// Marca presença/ausência do aluno num dia.
///
/// Espera-se um registo por (aluno, dia), mas a base não o impõe: se já existir
/// algum para esse dia, o mais antigo é atualizado; senão é criado um novo.
pub async fn registar_presenca(
    db_pool: &SqlitePool,
    aluno_id: i64,
    data: NaiveDate,
    presenca: bool,
) -> AppResult<Frequencia> {
    let mut tx = db_pool.begin().await?;

    let existente = sqlx::query_as::<_, Frequencia>(
        "SELECT * FROM frequencia WHERE id_aluno = ?1 AND data = ?2 ORDER BY id ASC LIMIT 1",
    )
    .bind(aluno_id)
    .bind(data)
    .fetch_optional(&mut *tx)
    .await?;

    let frequencia = match existente {
        Some(mut frequencia) => {
            sqlx::query("UPDATE frequencia SET presenca = ?1 WHERE id = ?2")
                .bind(presenca)
                .bind(frequencia.id)
                .execute(&mut *tx)
                .await?;
            frequencia.presenca = presenca;
            frequencia
        }
        None => {
            let id = sqlx::query(
                "INSERT INTO frequencia (id_aluno, data, presenca) VALUES (?1, ?2, ?3)",
            )
            .bind(aluno_id)
            .bind(data)
            .bind(presenca)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
            Frequencia {
                id: Some(id),
                aluno_id,
                data,
                presenca,
            }
        }
    };

    tx.commit().await?;
    tracing::info!(
        "Frequência do aluno #{} em {}: {}",
        aluno_id,
        data,
        if presenca { "presente" } else { "ausente" }
    );
    Ok(frequencia)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Frequencia>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Frequencia> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Frequencia>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_aluno(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<Vec<Frequencia>> {
    repositorio::listar_por(db_pool, "id_aluno", aluno_id).await
}

pub async fn atualizar(db_pool: &SqlitePool, frequencia: &Frequencia) -> AppResult<()> {
    let id = repositorio::exigir_id(frequencia)?;
    tracing::info!("Atualizando frequência #{}", id);

    let rows_affected =
        sqlx::query("UPDATE frequencia SET id_aluno = ?1, data = ?2, presenca = ?3 WHERE id = ?4")
            .bind(frequencia.aluno_id)
            .bind(frequencia.data)
            .bind(frequencia.presenca)
            .bind(id)
            .execute(db_pool)
            .await?
            .rows_affected();

    repositorio::confirmar_afetadas::<Frequencia>(rows_affected, id)
}

pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<Frequencia, _>(db_pool, id).await
}

pub async fn descrever(db_pool: &SqlitePool, id: i64) -> AppResult<String> {
    let frequencia = obter(db_pool, id).await?;
    let aluno = frequencia.aluno(db_pool).await?;
    Ok(format!(
        "Frequencia #{} {{ aluno: {}, data: {}, {} }}",
        id,
        aluno.nome,
        frequencia.data,
        if frequencia.presenca { "presente" } else { "ausente" }
    ))
}
