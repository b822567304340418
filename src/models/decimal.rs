// src/models/decimal.rs
//! Valores decimais de precisão fixa.
//!
//! O SQLite não tem tipo decimal, por isso os valores são gravados como TEXT na
//! forma canónica do `rust_decimal` e a precisão/escala de cada coluna é
//! verificada na validação, antes de chegar à base de dados.

use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};
use std::borrow::Cow;
use validator::ValidationError;

/// Casas decimais permitidas em todas as colunas monetárias e de medida.
pub const ESCALA: u32 = 2;

pub(crate) fn ler(row: &SqliteRow, coluna: &str) -> Result<Decimal, sqlx::Error> {
    let texto: String = row.try_get(coluna)?;
    converter(coluna, &texto)
}

pub(crate) fn ler_opcional(row: &SqliteRow, coluna: &str) -> Result<Option<Decimal>, sqlx::Error> {
    let texto: Option<String> = row.try_get(coluna)?;
    texto.map(|t| converter(coluna, &t)).transpose()
}

pub(crate) fn texto(valor: &Decimal) -> String {
    valor.to_string()
}

pub(crate) fn texto_opcional(valor: &Option<Decimal>) -> Option<String> {
    valor.as_ref().map(texto)
}

fn converter(coluna: &str, texto: &str) -> Result<Decimal, sqlx::Error> {
    texto
        .parse::<Decimal>()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: coluna.to_string(),
            source: Box::new(e),
        })
}

/// Cabe numa coluna DECIMAL(`precisao`, 2)?
fn cabe(valor: &Decimal, precisao: u32) -> Result<(), ValidationError> {
    let digitos_inteiros = precisao - ESCALA;
    let limite = Decimal::from(10_i64.pow(digitos_inteiros));
    if valor.normalize().scale() > ESCALA || valor.abs().trunc() >= limite {
        let mut erro = ValidationError::new("digits");
        erro.message = Some(Cow::from(format!(
            "no máximo {digitos_inteiros} dígitos inteiros e {ESCALA} casas decimais"
        )));
        return Err(erro);
    }
    Ok(())
}

/// DECIMAL(10,2): valores monetários.
pub fn precisao_10_2(valor: &Decimal) -> Result<(), ValidationError> {
    cabe(valor, 10)
}

/// DECIMAL(5,2): medidas e cargas.
pub fn precisao_5_2(valor: &Decimal) -> Result<(), ValidationError> {
    cabe(valor, 5)
}

/// DECIMAL(5,2) e mínimo zero: pesos, alturas, percentuais, cargas.
pub fn medida_5_2(valor: &Decimal) -> Result<(), ValidationError> {
    nao_negativo(valor)?;
    precisao_5_2(valor)
}

/// Mínimo zero.
pub fn nao_negativo(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_negative() && !valor.is_zero() {
        let mut erro = ValidationError::new("range");
        erro.message = Some(Cow::from("deve ser maior ou igual a 0"));
        return Err(erro);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn aceita_duas_casas_decimais() {
        assert!(precisao_5_2(&dec("999.99")).is_ok());
        assert!(precisao_5_2(&dec("80.50")).is_ok());
        // zeros à direita não contam para a escala
        assert!(precisao_5_2(&dec("1.2000")).is_ok());
    }

    #[test]
    fn rejeita_escala_ou_parte_inteira_excessiva() {
        assert_eq!(precisao_5_2(&dec("1.234")).unwrap_err().code, "digits");
        assert_eq!(precisao_5_2(&dec("1000")).unwrap_err().code, "digits");
        assert!(precisao_10_2(&dec("99999999.99")).is_ok());
        assert!(precisao_10_2(&dec("100000000")).is_err());
    }

    #[test]
    fn medida_verifica_sinal_antes_da_escala() {
        assert_eq!(medida_5_2(&dec("-1.234")).unwrap_err().code, "range");
        assert_eq!(medida_5_2(&dec("72.555")).unwrap_err().code, "digits");
        assert!(medida_5_2(&dec("72.55")).is_ok());
    }

    #[test]
    fn zero_nao_e_negativo() {
        assert!(nao_negativo(&Decimal::ZERO).is_ok());
        assert!(nao_negativo(&dec("-0.00")).is_ok());
        assert!(nao_negativo(&dec("-0.01")).is_err());
    }
}
