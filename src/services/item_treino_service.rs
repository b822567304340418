// src/services/item_treino_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{decimal, ItemTreino},
    services::repositorio,
};
use sqlx::{SqliteExecutor, SqlitePool};
use validator::Validate;

/// Com `id` a `None` a chave é gerada; com `Some` a linha é regravada com a mesma chave.
pub(crate) async fn inserir<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: Option<i64>,
    plano_id: i64,
    item: &ItemTreino,
) -> AppResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO item_treino (id, id_plano, id_exercicio, series, repeticoes, carga, observacoes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(id)
    .bind(plano_id)
    .bind(item.exercicio_id)
    .bind(item.series)
    .bind(item.repeticoes)
    .bind(decimal::texto_opcional(&item.carga))
    .bind(&item.observacoes)
    .execute(executor)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Só altera o item se ele for do plano indicado; um item nunca muda de plano.
pub(crate) async fn gravar_alteracoes<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: i64,
    plano_id: i64,
    item: &ItemTreino,
) -> AppResult<()> {
    let rows_affected = sqlx::query(
        r#"
        UPDATE item_treino
        SET id_exercicio = ?2, series = ?3, repeticoes = ?4,
            carga = ?5, observacoes = ?6
        WHERE id = ?7 AND id_plano = ?1
        "#,
    )
    .bind(plano_id)
    .bind(item.exercicio_id)
    .bind(item.series)
    .bind(item.repeticoes)
    .bind(decimal::texto_opcional(&item.carga))
    .bind(&item.observacoes)
    .bind(id)
    .execute(executor)
    .await?
    .rows_affected();

    repositorio::confirmar_afetadas::<ItemTreino>(rows_affected, id)
}

fn plano_do_item(item: &ItemTreino) -> AppResult<i64> {
    item.plano_treino_id
        .ok_or_else(|| AppError::campo_obrigatorio("plano_treino_id"))
}

/// Acrescenta um item a um plano já gravado. O mesmo exercício no mesmo plano dá
/// `Unicidade(uk_plano_exercicio)`.
pub async fn criar(db_pool: &SqlitePool, mut item: ItemTreino) -> AppResult<ItemTreino> {
    item.validate()?;
    let plano_id = plano_do_item(&item)?;
    tracing::info!(
        "Adicionando exercício #{} ao plano de treino #{}",
        item.exercicio_id,
        plano_id
    );

    let id = inserir(db_pool, None, plano_id, &item).await?;
    item.id = Some(id);
    Ok(item)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<ItemTreino>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<ItemTreino> {
    repositorio::obter(db_pool, id).await
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<ItemTreino>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_plano(db_pool: &SqlitePool, plano_id: i64) -> AppResult<Vec<ItemTreino>> {
    repositorio::listar_por(db_pool, "id_plano", plano_id).await
}

pub async fn listar_por_exercicio(
    db_pool: &SqlitePool,
    exercicio_id: i64,
) -> AppResult<Vec<ItemTreino>> {
    repositorio::listar_por(db_pool, "id_exercicio", exercicio_id).await
}

/// `plano_treino_id` identifica o plano a que o item já pertence: um item de
/// outro plano dá `NaoEncontrado` em vez de ser mudado de plano.
pub async fn atualizar(db_pool: &SqlitePool, item: &ItemTreino) -> AppResult<()> {
    let id = repositorio::exigir_id(item)?;
    item.validate()?;
    let plano_id = plano_do_item(item)?;
    tracing::info!("Atualizando item de treino #{} do plano #{}", id, plano_id);
    gravar_alteracoes(db_pool, id, plano_id, item).await
}

pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    repositorio::remover::<ItemTreino, _>(db_pool, id).await
}

pub async fn descrever(db_pool: &SqlitePool, id: i64) -> AppResult<String> {
    let item = obter(db_pool, id).await?;
    let exercicio = item.exercicio(db_pool).await?;
    let plano = item.plano_treino(db_pool).await?;
    let aluno = plano.aluno(db_pool).await?;
    let carga = item
        .carga
        .map(|c| format!("{c} kg"))
        .unwrap_or_else(|| "-".to_string());
    Ok(format!(
        "ItemTreino #{} {{ exercicio: {}, plano: #{} de {}, {}x{}, carga: {} }}",
        id,
        exercicio.nome,
        plano.id.unwrap_or_default(),
        aluno.nome,
        item.series,
        item.repeticoes,
        carga
    ))
}
