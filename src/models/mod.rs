// src/models/mod.rs
pub mod aluno;
pub mod avaliacao_fisica;
pub mod decimal;
pub mod exercicio;
pub mod frequencia;
pub mod instrutor;
pub mod item_treino;
pub mod matricula;
pub mod pagamento;
pub mod plano;
pub mod plano_treino;
pub mod validacao;

pub use aluno::Aluno;
pub use avaliacao_fisica::AvaliacaoFisica;
pub use exercicio::Exercicio;
pub use frequencia::Frequencia;
pub use instrutor::Instrutor;
pub use item_treino::ItemTreino;
pub use matricula::Matricula;
pub use pagamento::Pagamento;
pub use plano::Plano;
pub use plano_treino::PlanoTreino;

use std::fmt;

/// Todas as tabelas do esquema, das folhas para as dependentes.
pub const TABELAS: &[&str] = &[
    Instrutor::TABELA,
    Aluno::TABELA,
    Plano::TABELA,
    Exercicio::TABELA,
    AvaliacaoFisica::TABELA,
    Frequencia::TABELA,
    PlanoTreino::TABELA,
    Matricula::TABELA,
    Pagamento::TABELA,
    ItemTreino::TABELA,
];

/// Registo persistível identificado por uma chave substituta gerada pela base de dados.
pub trait Entidade {
    /// Nome da tabela.
    const TABELA: &'static str;
    /// Nome legível da entidade, usado em mensagens de erro.
    const NOME: &'static str;

    /// `None` enquanto o registo não foi persistido.
    fn id(&self) -> Option<i64>;

    fn persistido(&self) -> bool {
        self.id().is_some()
    }
}

/// Identidade pela chave: duas instâncias com o mesmo `id` são o mesmo registo.
/// Instâncias ainda não persistidas nunca são iguais a nada.
macro_rules! entidade {
    ($tipo:ty, $tabela:literal, $nome:literal) => {
        impl $crate::models::Entidade for $tipo {
            const TABELA: &'static str = $tabela;
            const NOME: &'static str = $nome;

            fn id(&self) -> Option<i64> {
                self.id
            }
        }

        impl PartialEq for $tipo {
            fn eq(&self, other: &Self) -> bool {
                matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
            }
        }

        impl std::hash::Hash for $tipo {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}
pub(crate) use entidade;

/// Mostra a chave de um registo: `#7`, ou `#novo` antes de persistir.
pub(crate) struct Chave(pub Option<i64>);

impl fmt::Display for Chave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "#{id}"),
            None => f.write_str("#novo"),
        }
    }
}

/// Texto opcional para os resumos de diagnóstico.
pub(crate) fn ou_traco(valor: &Option<impl fmt::Display>) -> String {
    valor
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}
