// src/models/pagamento.rs
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{
    decimal::{self, precisao_10_2},
    entidade, ou_traco, Chave, Matricula,
};
use crate::{error::AppResult, services::matricula_service};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Pagamento {
    pub id: Option<i64>,
    pub matricula_id: i64,
    pub data_pagamento: NaiveDate,
    #[validate(custom(function = "precisao_10_2"))]
    pub valor_pago: Decimal,
    #[validate(length(max = 20))]
    pub forma_pagamento: Option<String>,
}

entidade!(Pagamento, "pagamento", "Pagamento");

impl Pagamento {
    pub fn new(
        matricula: &Matricula,
        data_pagamento: NaiveDate,
        valor_pago: Decimal,
        forma_pagamento: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            matricula_id: matricula.id.unwrap_or_default(),
            data_pagamento,
            valor_pago,
            forma_pagamento: Some(forma_pagamento.into()),
        }
    }

    pub async fn matricula(&self, db_pool: &SqlitePool) -> AppResult<Matricula> {
        matricula_service::obter(db_pool, self.matricula_id).await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Pagamento {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            matricula_id: row.try_get("id_matricula")?,
            data_pagamento: row.try_get("data_pagamento")?,
            valor_pago: decimal::ler(row, "valor_pago")?,
            forma_pagamento: row.try_get("forma_pagamento")?,
        })
    }
}

impl fmt::Display for Pagamento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pagamento {} {{ matricula: #{}, data: {}, valor: {}, forma: {} }}",
            Chave(self.id),
            self.matricula_id,
            self.data_pagamento,
            self.valor_pago,
            ou_traco(&self.forma_pagamento)
        )
    }
}
