// src/models/item_treino.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{
    decimal::{self, medida_5_2},
    entidade, ou_traco, Chave, Exercicio, PlanoTreino,
};
use crate::{
    error::{AppError, AppResult},
    services::{exercicio_service, plano_treino_service},
};

/// Linha de um plano de treino. Cada exercício aparece no máximo uma vez por plano
/// (`uk_plano_exercicio`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ItemTreino {
    pub id: Option<i64>,
    /// Preenchido pelo plano ao sincronizar os itens.
    pub plano_treino_id: Option<i64>,
    pub exercicio_id: i64,
    #[validate(range(min = 1, message = "deve ser pelo menos 1"))]
    pub series: i32,
    #[validate(range(min = 1, message = "deve ser pelo menos 1"))]
    pub repeticoes: i32,
    #[validate(custom(function = "medida_5_2"))]
    pub carga: Option<Decimal>,
    #[validate(length(max = 500))]
    pub observacoes: Option<String>,
}

entidade!(ItemTreino, "item_treino", "Item de treino");

impl ItemTreino {
    pub fn new(exercicio: &Exercicio, series: i32, repeticoes: i32) -> Self {
        Self::new_para(exercicio.id.unwrap_or_default(), series, repeticoes)
    }

    /// Como `new`, quando só se tem a chave do exercício.
    pub fn new_para(exercicio_id: i64, series: i32, repeticoes: i32) -> Self {
        Self {
            exercicio_id,
            series,
            repeticoes,
            ..Default::default()
        }
    }

    pub fn com_carga(mut self, carga: Decimal) -> Self {
        self.carga = Some(carga);
        self
    }

    pub fn com_observacoes(mut self, observacoes: impl Into<String>) -> Self {
        self.observacoes = Some(observacoes.into());
        self
    }

    pub async fn plano_treino(&self, db_pool: &SqlitePool) -> AppResult<PlanoTreino> {
        let id = self
            .plano_treino_id
            .ok_or_else(|| AppError::campo_obrigatorio("plano_treino_id"))?;
        plano_treino_service::obter(db_pool, id).await
    }

    pub async fn exercicio(&self, db_pool: &SqlitePool) -> AppResult<Exercicio> {
        exercicio_service::obter(db_pool, self.exercicio_id).await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ItemTreino {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            plano_treino_id: row.try_get("id_plano")?,
            exercicio_id: row.try_get("id_exercicio")?,
            series: row.try_get("series")?,
            repeticoes: row.try_get("repeticoes")?,
            carga: decimal::ler_opcional(row, "carga")?,
            observacoes: row.try_get("observacoes")?,
        })
    }
}

impl fmt::Display for ItemTreino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ItemTreino {} {{ plano: {}, exercicio: #{}, {}x{}, carga: {} }}",
            Chave(self.id),
            Chave(self.plano_treino_id),
            self.exercicio_id,
            self.series,
            self.repeticoes,
            ou_traco(&self.carga)
        )
    }
}
