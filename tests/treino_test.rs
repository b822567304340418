// tests/treino_test.rs
mod common;

use academia::{
    models::{ItemTreino, PlanoTreino},
    services::{exercicio_service, item_treino_service, plano_treino_service},
    AppError,
};
use common::{data, dec, TestDatabase};
use sqlx::SqlitePool;

struct Cenario {
    plano: PlanoTreino,
    supino: i64,
    agachamento: i64,
    remada: i64,
}

/// Plano gravado com supino e agachamento; remada existe mas fica de fora.
async fn cenario(pool: &SqlitePool) -> Cenario {
    let ana = common::aluno(pool, "Ana Silva", "123.456.789-00").await;
    let carla = common::instrutor(pool, "Carla Mendes").await;
    let supino = common::exercicio(pool, "Supino reto", "Peito").await;
    let agachamento = common::exercicio(pool, "Agachamento", "Pernas").await;
    let remada = common::exercicio(pool, "Remada curvada", "Costas").await;

    let mut plano = PlanoTreino::new(&ana, &carla, data(2024, 3, 1));
    plano.descricao = Some("Hipertrofia".to_string());
    plano.duracao_semanas = Some(8);
    plano
        .adicionar_item(ItemTreino::new(&supino, 4, 10).com_carga(dec("40.00")))
        .unwrap();
    plano
        .adicionar_item(ItemTreino::new(&agachamento, 3, 12).com_observacoes("Descer até 90°"))
        .unwrap();
    plano_treino_service::salvar(pool, &mut plano).await.unwrap();

    Cenario {
        plano,
        supino: supino.id.unwrap(),
        agachamento: agachamento.id.unwrap(),
        remada: remada.id.unwrap(),
    }
}

#[tokio::test]
async fn salvar_plano_grava_os_itens() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let c = cenario(pool).await;

    let plano_id = c.plano.id.expect("plano com chave");
    assert!(c.plano.itens.iter().all(|i| i.id.is_some()));
    assert!(c.plano.itens.iter().all(|i| i.plano_treino_id == Some(plano_id)));

    let relido = plano_treino_service::obter_com_itens(pool, plano_id).await.unwrap();
    assert_eq!(relido.descricao.as_deref(), Some("Hipertrofia"));
    assert_eq!(relido.duracao_semanas, Some(8));
    assert_eq!(relido.itens.len(), 2);

    let supino = relido.item_do_exercicio(c.supino).unwrap();
    assert_eq!((supino.series, supino.repeticoes), (4, 10));
    assert_eq!(supino.carga, Some(dec("40.00")));
    assert_eq!(supino.exercicio(pool).await.unwrap().nome, "Supino reto");
    assert_eq!(supino.plano_treino(pool).await.unwrap(), c.plano);

    let agachamento = relido.item_do_exercicio(c.agachamento).unwrap();
    assert_eq!(agachamento.carga, None);
    assert_eq!(agachamento.observacoes.as_deref(), Some("Descer até 90°"));
}

#[tokio::test]
async fn mesmo_exercicio_duas_vezes_no_plano_e_recusado() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let c = cenario(pool).await;

    let repetido = ItemTreino {
        plano_treino_id: c.plano.id,
        exercicio_id: c.supino,
        series: 5,
        repeticoes: 5,
        ..Default::default()
    };
    let erro = item_treino_service::criar(pool, repetido).await.unwrap_err();
    assert!(matches!(erro, AppError::Unicidade { ref restricao } if restricao == "uk_plano_exercicio"));

    // Contornando a coleção, a base continua a impedir
    let mut plano = plano_treino_service::obter_com_itens(pool, c.plano.id.unwrap())
        .await
        .unwrap();
    plano.itens.push(ItemTreino {
        exercicio_id: c.agachamento,
        series: 1,
        repeticoes: 1,
        ..Default::default()
    });
    let erro = plano_treino_service::salvar(pool, &mut plano).await.unwrap_err();
    assert!(matches!(erro, AppError::Unicidade { .. }));
    assert_eq!(
        item_treino_service::listar_por_plano(pool, c.plano.id.unwrap())
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn item_retirado_da_colecao_e_apagado_ao_salvar() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let mut c = cenario(pool).await;

    let removido = c.plano.remover_item(c.supino).unwrap();
    c.plano
        .adicionar_item(ItemTreino::new_para(c.remada, 3, 15))
        .unwrap();
    plano_treino_service::salvar(pool, &mut c.plano).await.unwrap();

    assert!(item_treino_service::buscar_por_id(pool, removido.id.unwrap())
        .await
        .unwrap()
        .is_none());

    let itens = item_treino_service::listar_por_plano(pool, c.plano.id.unwrap())
        .await
        .unwrap();
    let exercicios: Vec<i64> = itens.iter().map(|i| i.exercicio_id).collect();
    assert_eq!(exercicios.len(), 2);
    assert!(exercicios.contains(&c.agachamento));
    assert!(exercicios.contains(&c.remada));

    // O exercício continua a existir
    assert!(exercicio_service::buscar_por_id(pool, c.supino).await.unwrap().is_some());
}

#[tokio::test]
async fn trocar_item_do_mesmo_exercicio() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let mut c = cenario(pool).await;

    c.plano.remover_item(c.supino).unwrap();
    c.plano
        .adicionar_item(ItemTreino::new_para(c.supino, 5, 5).com_carga(dec("60.00")))
        .unwrap();
    plano_treino_service::salvar(pool, &mut c.plano).await.unwrap();

    let relido = plano_treino_service::obter_com_itens(pool, c.plano.id.unwrap())
        .await
        .unwrap();
    let supino = relido.item_do_exercicio(c.supino).unwrap();
    assert_eq!((supino.series, supino.carga), (5, Some(dec("60.00"))));
}

#[tokio::test]
async fn trocar_exercicios_entre_dois_itens_gravados() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let mut c = cenario(pool).await;
    let plano_id = c.plano.id.unwrap();

    let id_supino = c.plano.item_do_exercicio(c.supino).unwrap().id;
    let id_agachamento = c.plano.item_do_exercicio(c.agachamento).unwrap().id;
    for item in c.plano.itens.iter_mut() {
        item.exercicio_id = if item.exercicio_id == c.supino {
            c.agachamento
        } else {
            c.supino
        };
    }
    plano_treino_service::salvar(pool, &mut c.plano).await.unwrap();

    let relido = plano_treino_service::obter_com_itens(pool, plano_id).await.unwrap();
    assert_eq!(relido.itens.len(), 2);
    // As chaves ficam; os exercícios trocam, com as séries de cada item
    let agachamento = relido.item_do_exercicio(c.agachamento).unwrap();
    assert_eq!(agachamento.id, id_supino);
    assert_eq!((agachamento.series, agachamento.carga), (4, Some(dec("40.00"))));
    let supino = relido.item_do_exercicio(c.supino).unwrap();
    assert_eq!(supino.id, id_agachamento);
    assert_eq!(supino.observacoes.as_deref(), Some("Descer até 90°"));
}

#[tokio::test]
async fn item_de_outro_plano_nao_muda_de_plano() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let c = cenario(pool).await;
    let plano_a = c.plano.id.unwrap();

    let aluno = c.plano.aluno(pool).await.unwrap();
    let instrutor = c.plano.instrutor(pool).await.unwrap();
    let mut b = PlanoTreino::new(&aluno, &instrutor, data(2024, 4, 1));
    plano_treino_service::salvar(pool, &mut b).await.unwrap();
    let plano_b = b.id.unwrap();

    let alheio = c.plano.item_do_exercicio(c.supino).unwrap().clone();
    b.itens.push(alheio.clone());
    let erro = plano_treino_service::salvar(pool, &mut b).await.unwrap_err();
    assert!(
        matches!(erro, AppError::NaoEncontrado { id, .. } if Some(id) == alheio.id),
        "{erro:?}"
    );

    // Nem pela coleção do plano, nem atualizando o item diretamente
    let mut movido = alheio.clone();
    movido.plano_treino_id = Some(plano_b);
    let erro = item_treino_service::atualizar(pool, &movido).await.unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado { .. }));

    assert_eq!(
        item_treino_service::listar_por_plano(pool, plano_a).await.unwrap().len(),
        2
    );
    assert!(item_treino_service::listar_por_plano(pool, plano_b)
        .await
        .unwrap()
        .is_empty());
    let relido = item_treino_service::obter(pool, alheio.id.unwrap()).await.unwrap();
    assert_eq!(relido.plano_treino_id, Some(plano_a));
}

#[tokio::test]
async fn remover_plano_apaga_itens_mas_nao_exercicios() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let c = cenario(pool).await;
    let plano_id = c.plano.id.unwrap();

    plano_treino_service::remover(pool, plano_id).await.unwrap();

    assert!(plano_treino_service::buscar_por_id(pool, plano_id).await.unwrap().is_none());
    assert!(item_treino_service::listar(pool).await.unwrap().is_empty());
    assert_eq!(exercicio_service::listar(pool).await.unwrap().len(), 3);

    let erro = plano_treino_service::remover(pool, plano_id).await.unwrap_err();
    assert!(matches!(erro, AppError::NaoEncontrado { .. }));
}

#[tokio::test]
async fn exercicio_em_uso_nao_pode_ser_removido() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let c = cenario(pool).await;

    let erro = exercicio_service::remover(pool, c.supino).await.unwrap_err();
    assert!(matches!(erro, AppError::Referencia { .. }));
    exercicio_service::remover(pool, c.remada).await.unwrap();
}

#[tokio::test]
async fn item_invalido_impede_gravar_o_plano() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let mut c = cenario(pool).await;

    c.plano.descricao = Some("Alterada".to_string());
    c.plano
        .adicionar_item(ItemTreino::new_para(c.remada, 0, 10).com_carga(dec("-5")))
        .unwrap();
    let erro = plano_treino_service::salvar(pool, &mut c.plano).await.unwrap_err();

    assert!(erro.violou("series", "range"));
    assert!(erro.violou("carga", "range"));

    let relido = plano_treino_service::obter_com_itens(pool, c.plano.id.unwrap())
        .await
        .unwrap();
    assert_eq!(relido.descricao.as_deref(), Some("Hipertrofia"));
    assert_eq!(relido.itens.len(), 2);
}

#[tokio::test]
async fn navegacao_a_partir_do_exercicio_e_do_instrutor() {
    let test_db = TestDatabase::new().await;
    let pool = &test_db.pool;
    let c = cenario(pool).await;

    let supino = exercicio_service::obter(pool, c.supino).await.unwrap();
    assert_eq!(supino.itens(pool).await.unwrap().len(), 1);

    let instrutor = c.plano.instrutor(pool).await.unwrap();
    assert_eq!(instrutor.planos_treino(pool).await.unwrap(), vec![c.plano.clone()]);
    let aluno = c.plano.aluno(pool).await.unwrap();
    assert_eq!(aluno.planos_treino(pool).await.unwrap().len(), 1);

    let texto = plano_treino_service::descrever(pool, c.plano.id.unwrap()).await.unwrap();
    assert!(texto.contains("Ana Silva"));
    assert!(texto.contains("Carla Mendes"));
    assert!(texto.contains("Supino reto 4x10"));

    let item_id = c.plano.item_do_exercicio(c.agachamento).unwrap().id.unwrap();
    let texto = item_treino_service::descrever(pool, item_id).await.unwrap();
    assert!(texto.contains("Agachamento"));
}
