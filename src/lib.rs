// src/lib.rs
//! Modelo de dados de uma academia: alunos, instrutores, planos, matrículas,
//! pagamentos, frequência, avaliações físicas, exercícios e planos de treino,
//! persistidos em SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{AppError, AppResult, Violacao};
