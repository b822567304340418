// src/models/matricula.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{entidade, validacao::nao_vazio, Aluno, Chave, Pagamento, Plano};
use crate::{
    error::AppResult,
    services::{aluno_service, pagamento_service, plano_service},
};

/// Matrícula de um aluno num plano. É a raiz transacional dos pagamentos.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, Validate)]
pub struct Matricula {
    pub id: Option<i64>,
    #[sqlx(rename = "id_aluno")]
    pub aluno_id: i64,
    #[sqlx(rename = "id_plano")]
    pub plano_id: i64,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    #[validate(custom(function = "nao_vazio"), length(max = 20))]
    pub status: String,
}

entidade!(Matricula, "matricula", "Matrícula");

impl Matricula {
    pub fn new(
        aluno: &Aluno,
        plano: &Plano,
        data_inicio: NaiveDate,
        data_fim: NaiveDate,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            aluno_id: aluno.id.unwrap_or_default(),
            plano_id: plano.id.unwrap_or_default(),
            data_inicio,
            data_fim,
            status: status.into(),
        }
    }

    /// `data_fim >= data_inicio`. Não é imposto na gravação, só sinalizado.
    pub fn periodo_coerente(&self) -> bool {
        self.data_fim >= self.data_inicio
    }

    pub async fn aluno(&self, db_pool: &SqlitePool) -> AppResult<Aluno> {
        aluno_service::obter(db_pool, self.aluno_id).await
    }

    pub async fn plano(&self, db_pool: &SqlitePool) -> AppResult<Plano> {
        plano_service::obter(db_pool, self.plano_id).await
    }

    pub async fn pagamentos(&self, db_pool: &SqlitePool) -> AppResult<Vec<Pagamento>> {
        match self.id {
            Some(id) => pagamento_service::listar_por_matricula(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Matricula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matricula {} {{ aluno: #{}, plano: #{}, {}..{}, status: {} }}",
            Chave(self.id),
            self.aluno_id,
            self.plano_id,
            self.data_inicio,
            self.data_fim,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(a: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(a, m, d).unwrap()
    }

    #[test]
    fn construtor_usa_as_chaves_dos_relacionados() {
        let mut aluno = Aluno::new("Ana Silva", "123.456.789-00");
        aluno.id = Some(4);
        let mut plano = Plano::default();
        plano.id = Some(9);

        let m = Matricula::new(&aluno, &plano, data(2024, 1, 1), data(2024, 12, 31), "ATIVO");
        assert_eq!((m.aluno_id, m.plano_id), (4, 9));
        assert!(m.periodo_coerente());
        assert!(m.validate().is_ok());
    }

    #[test]
    fn periodo_invertido_continua_valido() {
        let m = Matricula {
            data_inicio: data(2024, 12, 31),
            data_fim: data(2024, 1, 1),
            status: "ATIVO".into(),
            ..Default::default()
        };
        assert!(!m.periodo_coerente());
        assert!(m.validate().is_ok());
    }

    #[test]
    fn status_obrigatorio_ate_20_caracteres() {
        let mut m = Matricula::default();
        assert!(m.validate().is_err());
        m.status = "S".repeat(21);
        assert!(m.validate().is_err());
        m.status = "SUSPENSA".into();
        assert!(m.validate().is_ok());
    }
}
