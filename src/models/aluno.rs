// src/models/aluno.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use validator::Validate;

use super::{
    entidade, ou_traco, validacao::nao_vazio, AvaliacaoFisica, Chave, Frequencia, Matricula,
    PlanoTreino,
};
use crate::{
    error::AppResult,
    services::{avaliacao_service, frequencia_service, matricula_service, plano_treino_service},
};

/// Aluno da academia. O CPF é único entre todos os alunos (`uk_aluno_cpf`).
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize, Validate)]
pub struct Aluno {
    pub id: Option<i64>,
    #[validate(custom(function = "nao_vazio"), length(max = 100))]
    pub nome: String,
    #[validate(custom(function = "nao_vazio"), length(max = 14))]
    pub cpf: String,
    pub data_matricula: Option<NaiveDate>,
}

entidade!(Aluno, "aluno", "Aluno");

impl Aluno {
    pub fn new(nome: impl Into<String>, cpf: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            cpf: cpf.into(),
            ..Default::default()
        }
    }

    pub fn com_data_matricula(mut self, data: NaiveDate) -> Self {
        self.data_matricula = Some(data);
        self
    }

    // --- Navegação (consulta à base a cada chamada) ---

    pub async fn matriculas(&self, db_pool: &SqlitePool) -> AppResult<Vec<Matricula>> {
        match self.id {
            Some(id) => matricula_service::listar_por_aluno(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn frequencias(&self, db_pool: &SqlitePool) -> AppResult<Vec<Frequencia>> {
        match self.id {
            Some(id) => frequencia_service::listar_por_aluno(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn avaliacoes(&self, db_pool: &SqlitePool) -> AppResult<Vec<AvaliacaoFisica>> {
        match self.id {
            Some(id) => avaliacao_service::listar_por_aluno(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn planos_treino(&self, db_pool: &SqlitePool) -> AppResult<Vec<PlanoTreino>> {
        match self.id {
            Some(id) => plano_treino_service::listar_por_aluno(db_pool, id).await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Aluno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Aluno {} {{ nome: {}, cpf: {}, data_matricula: {} }}",
            Chave(self.id),
            self.nome,
            self.cpf,
            ou_traco(&self.data_matricula)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn construtor_preenche_campos_obrigatorios() {
        let aluno = Aluno::new("Ana Silva", "123.456.789-00");
        assert_eq!(aluno.id, None);
        assert_eq!(aluno.nome, "Ana Silva");
        assert!(aluno.validate().is_ok());
    }

    #[test]
    fn cpf_com_mais_de_14_caracteres_e_invalido() {
        let aluno = Aluno::new("Ana Silva", "123.456.789-000");
        let erro = AppError::from(aluno.validate().unwrap_err());
        assert!(erro.violou("cpf", "length"));
    }

    #[test]
    fn nome_em_branco_e_invalido() {
        let erro = AppError::from(Aluno::new("  ", "1").validate().unwrap_err());
        assert!(erro.violou("nome", "nao_vazio"));
    }

    #[test]
    fn igualdade_pela_chave() {
        let mut a = Aluno::new("Ana", "1");
        let mut b = Aluno::new("Outra", "2");
        assert_ne!(a, b);
        a.id = Some(3);
        b.id = Some(3);
        assert_eq!(a, b);
        // sem chave, nem a própria instância se confunde com outra
        assert_ne!(Aluno::new("Ana", "1"), Aluno::new("Ana", "1"));
    }
}
