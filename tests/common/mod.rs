// tests/common/mod.rs
#![allow(dead_code)]

use academia::{
    config::Config,
    db,
    models::{Aluno, Exercicio, Instrutor, Plano},
    services::{aluno_service, exercicio_service, instrutor_service, plano_service},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::{
    io,
    sync::{Arc, Mutex},
};

/// Base SQLite em memória, já migrada. Cada teste tem a sua.
pub struct TestDatabase {
    pub pool: SqlitePool,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let pool = db::create_db_pool(&Config::em_memoria())
            .await
            .expect("falha ao criar base de teste");
        Self { pool }
    }
}

pub fn data(ano: i32, mes: u32, dia: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(ano, mes, dia).expect("data inválida")
}

/// `Decimal` a partir de texto, ex.: `dec("150.00")`.
pub fn dec(valor: &str) -> Decimal {
    valor.parse().expect("decimal inválido")
}

pub async fn aluno(pool: &SqlitePool, nome: &str, cpf: &str) -> Aluno {
    aluno_service::criar(pool, Aluno::new(nome, cpf)).await.unwrap()
}

pub async fn plano(pool: &SqlitePool, nome: &str, valor: &str, meses: i32) -> Plano {
    plano_service::criar(pool, Plano::new(nome, dec(valor), meses))
        .await
        .unwrap()
}

pub async fn instrutor(pool: &SqlitePool, nome: &str) -> Instrutor {
    instrutor_service::criar(pool, Instrutor::new(nome, Some("Musculação".to_string())))
        .await
        .unwrap()
}

pub async fn exercicio(pool: &SqlitePool, nome: &str, grupo: &str) -> Exercicio {
    exercicio_service::criar(pool, Exercicio::new(nome, Some(grupo.to_string())))
        .await
        .unwrap()
}

/// Guarda o texto dos eventos `tracing` emitidos na thread do teste enquanto o
/// guard devolvido por `LogCapturado::capturar` estiver vivo.
#[derive(Clone, Default)]
pub struct LogCapturado(Arc<Mutex<Vec<u8>>>);

impl LogCapturado {
    pub fn capturar(nivel: tracing::Level) -> (Self, tracing::subscriber::DefaultGuard) {
        let captura = Self::default();
        let escritor = captura.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(nivel)
            .with_ansi(false)
            .with_writer(move || escritor.clone())
            .finish();
        (captura, tracing::subscriber::set_default(subscriber))
    }

    pub fn texto(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapturado {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
