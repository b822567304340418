// src/models/validacao.rs
//! Regras de validação que o `validator` não traz prontas.

use std::borrow::Cow;
use validator::ValidationError;

/// Texto obrigatório: rejeita vazio ou só espaços.
pub fn nao_vazio(valor: &str) -> Result<(), ValidationError> {
    if valor.trim().is_empty() {
        let mut erro = ValidationError::new("nao_vazio");
        erro.message = Some(Cow::from("não pode estar em branco"));
        return Err(erro);
    }
    Ok(())
}
