// src/error.rs
use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;
use validator::ValidationErrors;

/// Uma regra de validação violada num campo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violacao {
    pub campo: String,
    pub regra: String,
    pub mensagem: Option<String>,
}

impl fmt::Display for Violacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mensagem {
            Some(m) => write!(f, "{}: {} ({})", self.campo, self.regra, m),
            None => write!(f, "{}: {}", self.campo, self.regra),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de configuração: {0}")]
    Config(#[from] ConfigError),

    #[error("Dados inválidos: {}", juntar(.0))]
    Validacao(Vec<Violacao>),

    #[error("Violação de unicidade: {restricao}")]
    Unicidade { restricao: String },

    #[error("Violação de integridade referencial: {restricao}")]
    Referencia { restricao: String },

    #[error("{entidade} #{id} não encontrado")]
    NaoEncontrado { entidade: &'static str, id: i64 },
}

fn juntar(violacoes: &[Violacao]) -> String {
    violacoes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Erro de validação para um campo obrigatório ausente.
    pub fn campo_obrigatorio(campo: &str) -> Self {
        AppError::Validacao(vec![Violacao {
            campo: campo.to_string(),
            regra: "required".to_string(),
            mensagem: None,
        }])
    }

    /// Violações de validação, se for esse o tipo de erro.
    pub fn violacoes(&self) -> &[Violacao] {
        match self {
            AppError::Validacao(v) => v,
            _ => &[],
        }
    }

    /// Indica se `campo` falhou a regra `regra`.
    pub fn violou(&self, campo: &str, regra: &str) -> bool {
        self.violacoes()
            .iter()
            .any(|v| v.campo == campo && v.regra == regra)
    }
}

// Erros de restrição do SQLite são classificados aqui para que `?` já devolva o tipo certo.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            let mensagem = db_err.message();
            if db_err.is_unique_violation() || mensagem.contains("UNIQUE constraint failed") {
                return AppError::Unicidade {
                    restricao: nome_restricao_unica(mensagem),
                };
            }
            if db_err.is_foreign_key_violation()
                || mensagem.contains("FOREIGN KEY constraint failed")
            {
                return AppError::Referencia {
                    restricao: mensagem.to_string(),
                };
            }
        }
        AppError::SqlxError(e)
    }
}

// O SQLite só reporta as colunas envolvidas, não o nome da restrição.
fn nome_restricao_unica(mensagem: &str) -> String {
    if mensagem.contains("aluno.cpf") {
        "uk_aluno_cpf".to_string()
    } else if mensagem.contains("item_treino.id_plano") {
        "uk_plano_exercicio".to_string()
    } else {
        mensagem.to_string()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(erros: ValidationErrors) -> Self {
        let mut violacoes: Vec<Violacao> = erros
            .field_errors()
            .into_iter()
            .flat_map(|(campo, lista)| {
                let campo = campo.to_string();
                lista.iter().map(move |e| Violacao {
                    campo: campo.clone(),
                    regra: e.code.to_string(),
                    mensagem: e.message.as_ref().map(|m| m.to_string()),
                })
            })
            .collect();
        violacoes.sort_by(|a, b| a.campo.cmp(&b.campo).then_with(|| a.regra.cmp(&b.regra)));
        AppError::Validacao(violacoes)
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
