// src/services/aluno_service.rs
use crate::{
    error::{AppError, AppResult},
    models::Aluno,
    services::repositorio,
};
use sqlx::SqlitePool;
use validator::Validate;

/// Grava um novo aluno e devolve-o com a chave gerada.
pub async fn criar(db_pool: &SqlitePool, mut aluno: Aluno) -> AppResult<Aluno> {
    aluno.validate()?;
    tracing::info!("Criando aluno '{}' (CPF {})", aluno.nome, aluno.cpf);

    let resultado = sqlx::query(
        r#"
        INSERT INTO aluno (nome, cpf, data_matricula)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&aluno.nome)
    .bind(&aluno.cpf)
    .bind(aluno.data_matricula)
    .execute(db_pool)
    .await
    .map_err(AppError::from);

    // CPF duplicado chega aqui como Unicidade(uk_aluno_cpf)
    let id = match resultado {
        Ok(r) => r.last_insert_rowid(),
        Err(e) => {
            tracing::warn!("Falha ao criar aluno com CPF '{}': {}", aluno.cpf, e);
            return Err(e);
        }
    };

    aluno.id = Some(id);
    tracing::info!("✅ Aluno #{} criado.", id);
    Ok(aluno)
}

pub async fn buscar_por_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Aluno>> {
    repositorio::buscar_por_id(db_pool, id).await
}

pub async fn obter(db_pool: &SqlitePool, id: i64) -> AppResult<Aluno> {
    repositorio::obter(db_pool, id).await
}

pub async fn buscar_por_cpf(db_pool: &SqlitePool, cpf: &str) -> AppResult<Option<Aluno>> {
    tracing::debug!("Buscando aluno por CPF: {}", cpf);
    let aluno = sqlx::query_as::<_, Aluno>("SELECT * FROM aluno WHERE cpf = ?1")
        .bind(cpf)
        .fetch_optional(db_pool)
        .await?;
    Ok(aluno)
}

pub async fn listar(db_pool: &SqlitePool) -> AppResult<Vec<Aluno>> {
    repositorio::listar(db_pool).await
}

pub async fn atualizar(db_pool: &SqlitePool, aluno: &Aluno) -> AppResult<()> {
    let id = repositorio::exigir_id(aluno)?;
    aluno.validate()?;
    tracing::info!("Atualizando aluno #{}", id);

    let rows_affected = sqlx::query(
        r#"
        UPDATE aluno
        SET nome = ?1, cpf = ?2, data_matricula = ?3
        WHERE id = ?4
        "#,
    )
    .bind(&aluno.nome)
    .bind(&aluno.cpf)
    .bind(aluno.data_matricula)
    .bind(id)
    .execute(db_pool)
    .await?
    .rows_affected();

    repositorio::confirmar_afetadas::<Aluno>(rows_affected, id)
}

/// Falha com `Referencia` enquanto houver matrículas, frequências, avaliações ou
/// planos de treino a apontar para o aluno.
pub async fn remover(db_pool: &SqlitePool, id: i64) -> AppResult<()> {
    tracing::info!("Removendo aluno #{}", id);
    repositorio::remover::<Aluno, _>(db_pool, id).await
}
