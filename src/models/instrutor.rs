// src/models/instrutor.rs
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{entidade, ou_traco, validacao::nao_vazio, Chave, PlanoTreino};
use crate::{error::AppResult, services::plano_treino_service};

#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, Validate)]
pub struct Instrutor {
    pub id: Option<i64>,
    #[validate(custom(function = "nao_vazio"), length(max = 100))]
    pub nome: String,
    #[validate(length(max = 50))]
    pub especialidade: Option<String>,
}

entidade!(Instrutor, "instrutor", "Instrutor");

impl Instrutor {
    pub fn new(nome: impl Into<String>, especialidade: Option<String>) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            especialidade,
        }
    }

    pub async fn planos_treino(&self, db_pool: &SqlitePool) -> AppResult<Vec<PlanoTreino>> {
        match self.id {
            Some(id) => plano_treino_service::listar_por_instrutor(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Instrutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instrutor {} {{ nome: {}, especialidade: {} }}",
            Chave(self.id),
            self.nome,
            ou_traco(&self.especialidade)
        )
    }
}
