// src/services/mod.rs
pub mod aluno_service;
pub mod avaliacao_service;
pub mod exercicio_service;
pub mod frequencia_service;
pub mod instrutor_service;
pub mod item_treino_service;
pub mod matricula_service;
pub mod pagamento_service;
pub mod plano_service;
pub mod plano_treino_service;
mod repositorio;
