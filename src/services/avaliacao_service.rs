// src/services/avaliacao_service.rs
use crate::{
    error::AppResult,
    models::{decimal, AvaliacaoFisica},
    services::repositorio,
};
use sqlx::SqlitePool;
use validator::Validate;

pub async fn criar(db_pool: &SqlitePool, mut avaliacao: AvaliacaoFisica) -> AppResult<AvaliacaoFisica> {
    avaliacao.validate()?;
    tracing::info!(
        "Registando avaliação física do aluno #{} pelo instrutor #{}",
        avaliacao.aluno_id,
        avaliacao.instrutor_id
    );

    let id = sqlx::query(
        r#"
        INSERT INTO avaliacao_fisica
            (id_aluno, id_instrutor, data_avaliacao, peso, altura, percentual_gordura, medidas)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(avaliacao.aluno_id)
    .bind(avaliacao.instrutor_id)
    .bind(avaliacao.data_avaliacao)
    .bind(decimal::texto_opcional(&avaliacao.peso))
    .bind(decimal::texto_opcional(&avaliacao.altura))
    .bind(decimal::texto_opcional(&avaliacao.percentual_gordura))
    .bind(&avaliacao.medidas)
    .execute(db_pool)
    .await?
    .last_insert_rowid();

    avaliacao.id = Some(id);
    Ok(avaliacao)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<AvaliacaoFisica>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<AvaliacaoFisica> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<AvaliacaoFisica>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_aluno(
    db_pool: &SqlitePool,
    aluno_id: i64,
) -> AppResult<Vec<AvaliacaoFisica>> {
    repositorio::listar_por(db_pool, "id_aluno", aluno_id).await
}

pub async fn atualizar(db_pool: &SqlitePool, avaliacao: &AvaliacaoFisica) -> AppResult<()> {
    let id = repositorio::exigir_id(avaliacao)?;
    avaliacao.validate()?;
    tracing::info!("Atualizando avaliação física #{}", id);

    let rows_affected = sqlx::query(
        r#"
        UPDATE avaliacao_fisica
        SET id_aluno = ?1, id_instrutor = ?2, data_avaliacao = ?3,
            peso = ?4, altura = ?5, percentual_gordura = ?6, medidas = ?7
        WHERE id = ?8
        "#,
    )
    .bind(avaliacao.aluno_id)
    .bind(avaliacao.instrutor_id)
    .bind(avaliacao.data_avaliacao)
    .bind(decimal::texto_opcional(&avaliacao.peso))
    .bind(decimal::texto_opcional(&avaliacao.altura))
    .bind(decimal::texto_opcional(&avaliacao.percentual_gordura))
    .bind(&avaliacao.medidas)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    repositorio::confirmar_afetadas::<AvaliacaoFisica>(rows_affected, id)
}

pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<AvaliacaoFisica, _>(db_pool, id).await
}

pub async fn descrever(db_pool: &SqlitePool, id: i64) -> AppResult<String> {
    let avaliacao = obter(db_pool, id).await?;
    let aluno = avaliacao.aluno(db_pool).await?;
    let instrutor = avaliacao.instrutor(db_pool).await?;
    Ok(format!(
        "AvaliacaoFisica #{} {{ aluno: {}, instrutor: {}, data: {} }}",
        id, aluno.nome, instrutor.nome, avaliacao.data_avaliacao
    ))
}
