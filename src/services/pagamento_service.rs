// src/services/pagamento_service.rs
use crate::{
    error::AppResult,
    models::{decimal, Pagamento},
    services::repositorio,
};
use rust_decimal::Decimal;
use sqlx::{SqliteExecutor, SqlitePool};
use validator::Validate;

pub(crate) fn validar(pagamento: &Pagamento) -> AppResult<()> {
    pagamento.validate()?;
    if pagamento.valor_pago <= Decimal::ZERO {
        tracing::warn!(
            "Pagamento da matrícula #{} com valor não positivo: {}",
            pagamento.matricula_id,
            pagamento.valor_pago
        );
    }
    Ok(())
}

pub(crate) async fn inserir<'e, E: SqliteExecutor<'e>>(
    executor: E,
    pagamento: &Pagamento,
) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO pagamento (id_matricula, data_pagamento, valor_pago, forma_pagamento)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(pagamento.matricula_id)
    .bind(pagamento.data_pagamento)
    .bind(decimal::texto(&pagamento.valor_pago))
    .bind(&pagamento.forma_pagamento)
    .execute(executor)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Regista um pagamento de uma matrícula existente.
pub async fn criar(db_pool: &SqlitePool, mut pagamento: Pagamento) -> AppResult<Pagamento> {
    validar(&pagamento)?;
    tracing::info!(
        "Registando pagamento de {} para a matrícula #{}",
        pagamento.valor_pago,
        pagamento.matricula_id
    );

    let id = inserir(db_pool, &pagamento).await?;
    pagamento.id = Some(id);
    Ok(pagamento)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Pagamento>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Pagamento> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Pagamento>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_matricula(
    db_pool: &SqlitePool,
    matricula_id: i64,
) -> AppResult<Vec<Pagamento>> {
    repositorio::listar_por(db_pool, "id_matricula", matricula_id).await
}

/// Soma dos pagamentos de uma matrícula. Feita em `Decimal`, não no SQLite, para
/// não passar por vírgula flutuante.
pub async fn total_pago(db_pool: &SqlitePool, matricula_id: i64) -> AppResult<Decimal> {
    let total = listar_por_matricula(db_pool, matricula_id)
        .await?
        .iter()
        .map(|p| p.valor_pago)
        .sum();
    Ok(total)
}

pub async fn atualizar(db_pool: &SqlitePool, pagamento: &Pagamento) -> AppResult<()> {
    let id = repositorio::exigir_id(pagamento)?;
    validar(pagamento)?;
    tracing::info!("Atualizando pagamento #{}", id);

    let rows_affected = sqlx::query(
        r#"
        UPDATE pagamento
        SET id_matricula = ?1, data_pagamento = ?2, valor_pago = ?3, forma_pagamento = ?4
        WHERE id = ?5
        "#,
    )
    .bind(pagamento.matricula_id)
    .bind(pagamento.data_pagamento)
    .bind(decimal::texto(&pagamento.valor_pago))
    .bind(&pagamento.forma_pagamento)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    repositorio::confirmar_afetadas::<Pagamento>(rows_affected, id)
}

pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<Pagamento, _>(db_pool, id).await
}

pub async fn descrever(db_pool: &SqlitePool, id: i64) -> AppResult<String> {
    let pagamento = obter(db_pool, id).await?;
    let matricula = pagamento.matricula(db_pool).await?;
    let aluno = matricula.aluno(db_pool).await?;
    Ok(format!(
        "Pagamento #{} {{ aluno: {}, matricula: #{}, data: {}, valor: {}, forma: {} }}",
        id,
        aluno.nome,
        pagamento.matricula_id,
        pagamento.data_pagamento,
        pagamento.valor_pago,
        pagamento.forma_pagamento.as_deref().unwrap_or("-")
    ))
}
