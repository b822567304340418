// src/models/plano.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{
    decimal::{self, precisao_10_2},
    entidade,
    validacao::nao_vazio,
    Chave, Matricula,
};
use crate::{error::AppResult, services::matricula_service};

/// Estado com que um plano é criado.
pub const STATUS_ATIVO: &str = "ATIVO";

/// Plano de assinatura (mensalidade). `status` é texto livre.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Plano {
    pub id: Option<i64>,
    #[validate(custom(function = "nao_vazio"), length(max = 50))]
    pub nome: String,
    pub descricao: Option<String>,
    #[validate(custom(function = "precisao_10_2"))]
    pub valor: Decimal,
    pub duracao_meses: i32,
    #[serde(default = "status_padrao")]
    pub status: String,
}

entidade!(Plano, "plano", "Plano");

fn status_padrao() -> String {
    STATUS_ATIVO.to_string()
}

impl Default for Plano {
    fn default() -> Self {
        Self {
            id: None,
            nome: String::new(),
            descricao: None,
            valor: Decimal::ZERO,
            duracao_meses: 0,
            status: status_padrao(),
        }
    }
}

impl Plano {
    pub fn new(nome: impl Into<String>, valor: Decimal, duracao_meses: i32) -> Self {
        Self {
            nome: nome.into(),
            valor,
            duracao_meses,
            ..Default::default()
        }
    }

    pub fn ativo(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_ATIVO)
    }

    pub async fn matriculas(&self, db_pool: &SqlitePool) -> AppResult<Vec<Matricula>> {
        match self.id {
            Some(id) => matricula_service::listar_por_plano(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for Plano {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            nome: row.try_get("nome")?,
            descricao: row.try_get("descricao")?,
            valor: decimal::ler(row, "valor")?,
            duracao_meses: row.try_get("duracao_meses")?,
            status: row.try_get("status")?,
        })
    }
}

impl fmt::Display for Plano {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plano {} {{ nome: {}, valor: {}, duracao_meses: {}, status: {} }}",
            Chave(self.id),
            self.nome,
            self.valor,
            self.duracao_meses,
            self.status
        )
    }
}
