// src/models/plano_treino.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{entidade, ou_traco, Aluno, Chave, Instrutor, ItemTreino};
use crate::{
    error::{AppError, AppResult},
    services::{aluno_service, instrutor_service, item_treino_service},
};

/// Plano de treino montado por um instrutor para um aluno.
///
/// O plano é dono exclusivo dos seus itens: `plano_treino_service::salvar` grava a
/// coleção `itens` tal como está (itens retirados da coleção são apagados) e
/// `plano_treino_service::remover` apaga os itens antes do plano.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, Validate)]
pub struct PlanoTreino {
    pub id: Option<i64>,
    #[sqlx(rename = "id_aluno")]
    pub aluno_id: i64,
    #[sqlx(rename = "id_instrutor")]
    pub instrutor_id: i64,
    pub data_criacao: NaiveDate,
    #[validate(length(max = 1000))]
    pub descricao: Option<String>,
    #[validate(range(min = 1, message = "deve ser pelo menos 1"))]
    pub duracao_semanas: Option<i32>,
    #[sqlx(skip)]
    #[serde(default)]
    pub itens: Vec<ItemTreino>,
}

entidade!(PlanoTreino, "plano_treino", "Plano de treino");

impl PlanoTreino {
    pub fn new(aluno: &Aluno, instrutor: &Instrutor, data_criacao: NaiveDate) -> Self {
        Self {
            aluno_id: aluno.id.unwrap_or_default(),
            instrutor_id: instrutor.id.unwrap_or_default(),
            data_criacao,
            ..Default::default()
        }
    }

    /// Junta um item à coleção. Um exercício só pode aparecer uma vez por plano.
    pub fn adicionar_item(&mut self, mut item: ItemTreino) -> AppResult<()> {
        if self.item_do_exercicio(item.exercicio_id).is_some() {
            tracing::warn!(
                "Exercício #{} já faz parte do plano de treino {}",
                item.exercicio_id,
                Chave(self.id)
            );
            return Err(AppError::Unicidade {
                restricao: "uk_plano_exercicio".to_string(),
            });
        }
        item.plano_treino_id = self.id;
        self.itens.push(item);
        Ok(())
    }

    /// Retira da coleção o item do exercício indicado. Se já estava gravado, é
    /// apagado no próximo `salvar`.
    pub fn remover_item(&mut self, exercicio_id: i64) -> Option<ItemTreino> {
        let posicao = self
            .itens
            .iter()
            .position(|i| i.exercicio_id == exercicio_id)?;
        Some(self.itens.remove(posicao))
    }

    pub fn item_do_exercicio(&self, exercicio_id: i64) -> Option<&ItemTreino> {
        self.itens.iter().find(|i| i.exercicio_id == exercicio_id)
    }

    pub async fn aluno(&self, db_pool: &SqlitePool) -> AppResult<Aluno> {
        aluno_service::obter(db_pool, self.aluno_id).await
    }

    pub async fn instrutor(&self, db_pool: &SqlitePool) -> AppResult<Instrutor> {
        instrutor_service::obter(db_pool, self.instrutor_id).await
    }

    /// Substitui a coleção em memória pelos itens gravados.
    pub async fn carregar_itens(&mut self, db_pool: &SqlitePool) -> AppResult<&[ItemTreino]> {
        self.itens = match self.id {
            Some(id) => item_treino_service::listar_por_plano(db_pool, id).await?,
            None => Vec::new(),
        };
        Ok(self.itens.as_slice())
    }
}

impl fmt::Display for PlanoTreino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlanoTreino {} {{ aluno: #{}, instrutor: #{}, criado: {}, semanas: {}, itens: {} }}",
            Chave(self.id),
            self.aluno_id,
            self.instrutor_id,
            self.data_criacao,
            ou_traco(&self.duracao_semanas),
            self.itens.len()
        )
    }
}
