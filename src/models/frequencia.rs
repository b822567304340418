// src/models/frequencia.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;

use super::{entidade, Aluno, Chave};
use crate::{error::AppResult, services::aluno_service};

/// Registo de frequência de um aluno num dia. `presenca` começa a `false`.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Frequencia {
    pub id: Option<i64>,
    #[sqlx(rename = "id_aluno")]
    pub aluno_id: i64,
    pub data: NaiveDate,
    #[serde(default)]
    pub presenca: bool,
}

entidade!(Frequencia, "frequencia", "Frequência");

impl Frequencia {
    pub fn new(aluno: &Aluno, data: NaiveDate) -> Self {
        Self {
            id: None,
            aluno_id: aluno.id.unwrap_or_default(),
            data,
            presenca: false,
        }
    }

    pub fn presente(mut self) -> Self {
        self.presenca = true;
        self
    }

    pub async fn aluno(&self, db_pool: &SqlitePool) -> AppResult<Aluno> {
        aluno_service::obter(db_pool, self.aluno_id).await
    }
}

impl fmt::Display for Frequencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let estado = if self.presenca { "presente" } else { "ausente" };
        write!(
            f,
            "Frequencia {} {{ aluno: #{}, data: {}, {} }}",
            Chave(self.id),
            self.aluno_id,
            self.data,
            estado
        )
    }
}
