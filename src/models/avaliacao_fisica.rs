// src/models/avaliacao_fisica.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{
    decimal::{self, medida_5_2},
    entidade, ou_traco, Aluno, Chave, Instrutor,
};
use crate::{
    error::AppResult,
    services::{aluno_service, instrutor_service},
};

/// Avaliação física feita por um instrutor. Medidas com duas casas decimais.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AvaliacaoFisica {
    pub id: Option<i64>,
    pub aluno_id: i64,
    pub instrutor_id: i64,
    pub data_avaliacao: NaiveDate,
    #[validate(custom(function = "medida_5_2"))]
    pub peso: Option<Decimal>,
    #[validate(custom(function = "medida_5_2"))]
    pub altura: Option<Decimal>,
    #[validate(custom(function = "medida_5_2"))]
    pub percentual_gordura: Option<Decimal>,
    /// Medidas corporais em texto livre.
    pub medidas: Option<String>,
}

entidade!(AvaliacaoFisica, "avaliacao_fisica", "Avaliação física");

impl AvaliacaoFisica {
    pub fn new(aluno: &Aluno, instrutor: &Instrutor, data_avaliacao: NaiveDate) -> Self {
        Self {
            aluno_id: aluno.id.unwrap_or_default(),
            instrutor_id: instrutor.id.unwrap_or_default(),
            data_avaliacao,
            ..Default::default()
        }
    }

    pub async fn aluno(&self, db_pool: &SqlitePool) -> AppResult<Aluno> {
        aluno_service::obter(db_pool, self.aluno_id).await
    }

    pub async fn instrutor(&self, db_pool: &SqlitePool) -> AppResult<Instrutor> {
        instrutor_service::obter(db_pool, self.instrutor_id).await
    }
}

impl<'r> FromRow<'r, SqliteRow> for AvaliacaoFisica {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            aluno_id: row.try_get("id_aluno")?,
            instrutor_id: row.try_get("id_instrutor")?,
            data_avaliacao: row.try_get("data_avaliacao")?,
            peso: decimal::ler_opcional(row, "peso")?,
            altura: decimal::ler_opcional(row, "altura")?,
            percentual_gordura: decimal::ler_opcional(row, "percentual_gordura")?,
            medidas: row.try_get("medidas")?,
        })
    }
}

impl fmt::Display for AvaliacaoFisica {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AvaliacaoFisica {} {{ aluno: #{}, instrutor: #{}, data: {}, peso: {}, altura: {}, gordura: {} }}",
            Chave(self.id),
            self.aluno_id,
            self.instrutor_id,
            self.data_avaliacao,
            ou_traco(&self.peso),
            ou_traco(&self.altura),
            ou_traco(&self.percentual_gordura)
        )
    }
}
