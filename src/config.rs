// src/config.rs
//! Configuração da aplicação, lida das variáveis de ambiente no arranque.
//!
//! Em desenvolvimento o ficheiro `.env` é carregado com `dotenvy`; nos testes
//! esse passo é ignorado para não contaminar o ambiente.

use std::time::Duration;

/// Falhas ao montar a configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Variável de ambiente {0} não definida")]
    MissingVar(String),
    #[error("Valor inválido para a variável de ambiente {0}: {1}")]
    InvalidValue(String, String),
}

/// Filtro de logging usado quando `RUST_LOG` não está definido.
pub const FILTRO_LOG_PADRAO: &str = "academia=debug,sqlx=warn";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
    pub log_filter: String,
}

impl Config {
    /// Lê a configuração do ambiente (e do `.env`, fora dos testes).
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let max_connections = ler_numero("DB_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DB_MAX_CONNECTIONS".to_string(),
                "deve ser pelo menos 1".to_string(),
            ));
        }

        let busy_timeout = Duration::from_secs(ler_numero("DB_BUSY_TIMEOUT_SECS", 5)?.into());

        let log_filter =
            std::env::var("RUST_LOG").unwrap_or_else(|_| FILTRO_LOG_PADRAO.to_string());

        Ok(Self {
            database_url,
            max_connections,
            busy_timeout,
            log_filter,
        })
    }

    /// Configuração para uma base SQLite em memória (uma única conexão).
    pub fn em_memoria() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
            log_filter: FILTRO_LOG_PADRAO.to_string(),
        }
    }
}

fn ler_numero(nome: &str, padrao: u32) -> Result<u32, ConfigError> {
    match std::env::var(nome) {
        Ok(valor) => valor
            .trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidValue(nome.to_string(), e.to_string())),
        Err(_) => Ok(padrao),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ler_numero_usa_padrao_quando_ausente() {
        assert_eq!(ler_numero("ACADEMIA_TESTE_VARIAVEL_INEXISTENTE", 7).unwrap(), 7);
    }

    #[test]
    fn em_memoria_usa_uma_conexao() {
        let config = Config::em_memoria();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
    }
}
