// src/models/exercicio.rs
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{entidade, ou_traco, validacao::nao_vazio, Chave, ItemTreino};
use crate::{error::AppResult, services::item_treino_service};

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, Validate)]
pub struct Exercicio {
    pub id: Option<i64>,
    #[validate(
        custom(function = "nao_vazio"),
        length(min = 3, max = 100, message = "o nome deve ter entre 3 e 100 caracteres")
    )]
    pub nome: String,
    #[validate(length(max = 50))]
    pub grupo_muscular: Option<String>,
}

entidade!(Exercicio, "exercicio", "Exercício");

impl Exercicio {
    pub fn new(nome: impl Into<String>, grupo_muscular: Option<String>) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            grupo_muscular,
        }
    }

    /// Itens de treino (em qualquer plano) que usam este exercício.
    pub async fn itens(&self, db_pool: &SqlitePool) -> AppResult<Vec<ItemTreino>> {
        match self.id {
            Some(id) => item_treino_service::listar_por_exercicio(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Exercicio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exercicio {} {{ nome: {}, grupo_muscular: {} }}",
            Chave(self.id),
            self.nome,
            ou_traco(&self.grupo_muscular)
        )
    }
}
