// src/services/matricula_service.rs
use crate::{
    error::AppResult,
    models::{Matricula, Pagamento},
    services::{pagamento_service, repositorio},
};
use sqlx::{SqliteExecutor, SqlitePool};
use validator::Validate;

fn validar(matricula: &Matricula) -> AppResult<()> {
    matricula.validate()?;
    // Aceite tal como está, mas fica registado
    if !matricula.periodo_coerente() {
        tracing::warn!(
            "Matrícula do aluno #{} termina ({}) antes de começar ({})",
            matricula.aluno_id,
            matricula.data_fim,
            matricula.data_inicio
        );
    }
    Ok(())
}

async fn inserir<'e, E: SqliteExecutor<'e>>(executor: E, matricula: &Matricula) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO matricula (id_aluno, id_plano, data_inicio, data_fim, status)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(matricula.aluno_id)
    .bind(matricula.plano_id)
    .bind(matricula.data_inicio)
    .bind(matricula.data_fim)
    .bind(&matricula.status)
    .execute(executor)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Grava a matrícula. Aluno ou plano inexistentes dão `Referencia`.
pub async fn criar(db_pool: &SqlitePool, mut matricula: Matricula) -> AppResult<Matricula> {
    validar(&matricula)?;
    tracing::info!(
        "Criando matrícula: aluno #{} no plano #{}",
        matricula.aluno_id,
        matricula.plano_id
    );

    let id = inserir(db_pool, &matricula).await?;
    matricula.id = Some(id);
    tracing::info!("✅ Matrícula #{} criada.", id);
    Ok(matricula)
}

/// Cria a matrícula e o primeiro pagamento na mesma transação: ou ficam os dois, ou nenhum.
pub async fn criar_com_pagamento(
    db_pool: &SqlitePool,
    mut matricula: Matricula,
    mut pagamento: Pagamento,
) -> AppResult<(Matricula, Pagamento)> {
    validar(&matricula)?;
    pagamento_service::validar(&pagamento)?;

    let mut tx = db_pool.begin().await?;

    let matricula_id = inserir(&mut *tx, &matricula).await?;
    pagamento.matricula_id = matricula_id;
    let pagamento_id = pagamento_service::inserir(&mut *tx, &pagamento).await?;

    tx.commit().await?;

    matricula.id = Some(matricula_id);
    pagamento.id = Some(pagamento_id);
    tracing::info!(
        "✅ Matrícula #{} criada com pagamento #{} de {}",
        matricula_id,
        pagamento_id,
        pagamento.valor_pago
    );
    Ok((matricula, pagamento))
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Matricula>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Matricula> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Matricula>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_aluno(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<Vec<Matricula>> {
    repositorio::listar_por(db_pool, "id_aluno", aluno_id).await
}

pub async fn listar_por_plano(db_pool: &SqlitePool, plano_id: i64) -> AppResult<Vec<Matricula>> {
    repositorio::listar_por(db_pool, "id_plano", plano_id).await
}

pub async fn atualizar(db_pool: &SqlitePool, matricula: &Matricula) -> AppResult<()> {
    let id = repositorio::exigir_id(matricula)?;
    validar(matricula)?;
    tracing::info!("Atualizando matrícula #{} (status {})", id, matricula.status);

    let rows_affected = sqlx::query(
        r#"
        UPDATE matricula
        SET id_aluno = ?1, id_plano = ?2, data_inicio = ?3, data_fim = ?4, status = ?5
        WHERE id = ?6
        "#,
    )
    .bind(matricula.aluno_id)
    .bind(matricula.plano_id)
    .bind(matricula.data_inicio)
    .bind(matricula.data_fim)
    .bind(&matricula.status)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    repositorio::confirmar_afetadas::<Matricula>(rows_affected, id)
}

/// Os pagamentos não são apagados em cascata: com pagamentos gravados a remoção
/// falha com `Referencia`.
pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<Matricula, _>(db_pool, id).await
}

/// Resumo para logs: nomes do aluno e do plano em vez das chaves.
pub async fn descrever(db_pool: &SqlitePool, id: i64) -> AppResult<String> {
    let matricula = obter(db_pool, id).await?;
    let aluno = matricula.aluno(db_pool).await?;
    let plano = matricula.plano(db_pool).await?;
    Ok(format!(
        "Matricula #{} {{ aluno: {}, plano: {}, {}..{}, status: {} }}",
        id, aluno.nome, plano.nome, matricula.data_inicio, matricula.data_fim, matricula.status
    ))
}
