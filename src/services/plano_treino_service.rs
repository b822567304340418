// src/services/plano_treino_service.rs
//! Planos de treino e a coleção de itens que lhes pertence.
//!
//! O plano é a raiz do agregado: gravar um plano sincroniza os itens (os que
//! saíram da coleção são apagados) e apagar um plano apaga primeiro os itens,
//! sempre dentro de uma única transação. Os exercícios referenciados nunca são
//! tocados.

use crate::{
    error::{AppError, AppResult},
    models::{Entidade, ItemTreino, PlanoTreino},
    services::{item_treino_service, repositorio},
};
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};
use validator::Validate;

/// Grava o plano (insere ou atualiza) e deixa na base exatamente os itens da coleção.
///
/// Só depois do commit é que as chaves geradas são escritas em `plano` e nos
/// itens; se algo falhar, nada muda nem na base nem em memória.
pub async fn salvar(db_pool: &SqlitePool, plano: &mut PlanoTreino) -> AppResult<()> {
    plano.validate()?;
    for item in &plano.itens {
        item.validate()?;
    }

    let mut tx = db_pool.begin().await?;

    let plano_id = match plano.id {
        Some(id) => {
            let rows_affected = sqlx::query(
                r#"
                UPDATE plano_treino
                SET id_aluno = ?1, id_instrutor = ?2, data_criacao = ?3,
                    descricao = ?4, duracao_semanas = ?5
                WHERE id = ?6
                "#,
            )
            .bind(plano.aluno_id)
            .bind(plano.instrutor_id)
            .bind(plano.data_criacao)
            .bind(&plano.descricao)
            .bind(plano.duracao_semanas)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
            repositorio::confirmar_afetadas::<PlanoTreino>(rows_affected, id)?;
            id
        }
        None => sqlx::query(
            r#"
            INSERT INTO plano_treino (id_aluno, id_instrutor, data_criacao, descricao, duracao_semanas)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(plano.aluno_id)
        .bind(plano.instrutor_id)
        .bind(plano.data_criacao)
        .bind(&plano.descricao)
        .bind(plano.duracao_semanas)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid(),
    };

    let gravados: HashMap<i64, i64> =
        sqlx::query_as::<_, (i64, i64)>("SELECT id, id_exercicio FROM item_treino WHERE id_plano = ?1")
            .bind(plano_id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .collect();

    // Um item com chave tem de ser deste plano; itens de outro plano não são movidos
    for id in plano.itens.iter().filter_map(|i| i.id) {
        if !gravados.contains_key(&id) {
            tracing::warn!("Item de treino #{} não pertence ao plano #{}", id, plano_id);
            return Err(AppError::NaoEncontrado {
                entidade: ItemTreino::NOME,
                id,
            });
        }
    }

    // 1. Órfãos: itens gravados que já não estão na coleção
    let mantidos: HashSet<i64> = plano.itens.iter().filter_map(|i| i.id).collect();
    let mut orfaos = 0;
    for &id in gravados.keys().filter(|id| !mantidos.contains(*id)) {
        repositorio::remover::<ItemTreino, _>(&mut *tx, id).await?;
        orfaos += 1;
    }

    // 2. Itens que mudaram de exercício saem antes de qualquer escrita e voltam com a
    //    mesma chave, para uma troca de exercícios entre itens não colidir em
    //    uk_plano_exercicio a meio
    let trocados: Vec<&ItemTreino> = plano
        .itens
        .iter()
        .filter(|i| matches!(i.id, Some(id) if gravados.get(&id) != Some(&i.exercicio_id)))
        .collect();
    for item in &trocados {
        sqlx::query("DELETE FROM item_treino WHERE id = ?1")
            .bind(item.id)
            .execute(&mut *tx)
            .await?;
    }
    for item in &plano.itens {
        if let Some(id) = item.id {
            if gravados.get(&id) == Some(&item.exercicio_id) {
                item_treino_service::gravar_alteracoes(&mut *tx, id, plano_id, item).await?;
            }
        }
    }
    for item in &trocados {
        item_treino_service::inserir(&mut *tx, item.id, plano_id, item).await?;
    }

    // 3. Novos
    let mut novos_ids = Vec::new();
    for (posicao, item) in plano.itens.iter().enumerate() {
        if item.id.is_none() {
            let id = item_treino_service::inserir(&mut *tx, None, plano_id, item).await?;
            novos_ids.push((posicao, id));
        }
    }

    tx.commit().await?;

    plano.id = Some(plano_id);
    for (posicao, id) in novos_ids {
        plano.itens[posicao].id = Some(id);
    }
    for item in plano.itens.iter_mut() {
        item.plano_treino_id = Some(plano_id);
    }

    tracing::info!(
        "✅ Plano de treino #{} gravado com {} itens ({} removidos).",
        plano_id,
        plano.itens.len(),
        orfaos
    );
    Ok(())
}

/// Carrega o plano sem os itens; use `PlanoTreino::carregar_itens` para os obter.
pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<PlanoTreino>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<PlanoTreino> {
    repositorio::obter(db_pool, id).await
}

/// Plano com a coleção de itens já carregada.
pub async fn obter_com_itens(db_pool: &SqlitePool, id: i64) -> AppResult<PlanoTreino> {
    let mut plano = obter(db_pool, id).await?;
    plano.carregar_itens(db_pool).await?;
    Ok(plano)
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<PlanoTreino>> {
    repositorio::listar(db_pool).await
}

pub async fn listar_por_aluno(db_pool: &SqlitePool, aluno_id: i64) -> AppResult<Vec<PlanoTreino>> {
    repositorio::listar_por(db_pool, "id_aluno", aluno_id).await
}

pub async fn listar_por_instrutor(
    db_pool: &SqlitePool,
    instrutor_id: i64,
) -> AppResult<Vec<PlanoTreino>> {
    repositorio::listar_por(db_pool, "id_instrutor", instrutor_id).await
}

/// Apaga o plano e todos os seus itens na mesma transação.
pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    tracing::info!("Removendo plano de treino #{} e os seus itens", id);
    let mut tx = db_pool.begin().await?;

    let itens = sqlx::query("DELETE FROM item_treino WHERE id_plano = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    // Se o plano não existir, a transação é descartada (rollback) ao sair
    repositorio::remover::<PlanoTreino, _>(&mut *tx, id).await?;

    tx.commit().await?;
    tracing::info!("✅ Plano de treino #{} removido com {} itens.", id, itens);
    Ok(())
}

pub async fn descrever(db_pool: &SqlitePool, id: i64) -> AppResult<String> {
    let mut plano = obter(db_pool, id).await?;
    let aluno = plano.aluno(db_pool).await?;
    let instrutor = plano.instrutor(db_pool).await?;

    let mut exercicios = Vec::new();
    for item in plano.carregar_itens(db_pool).await? {
        let exercicio = item.exercicio(db_pool).await?;
        exercicios.push(format!("{} {}x{}", exercicio.nome, item.series, item.repeticoes));
    }

    Ok(format!(
        "PlanoTreino #{} {{ aluno: {}, instrutor: {}, criado: {}, itens: [{}] }}",
        id,
        aluno.nome,
        instrutor.nome,
        plano.data_criacao,
        exercicios.join(", ")
    ))
}
