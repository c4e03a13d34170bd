//! Default question set.
//!
//! The original static quiz shipped these ten questions hardcoded in the
//! view; here they are seed data for an empty store.

use thiserror::Error;

use quiz_core::model::{Category, QuestionDraft, QuestionError};

use crate::repository::{QuestionRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn question(
    prompt: &str,
    options: [&str; 4],
    correct_index: usize,
    category: Category,
    difficulty: u8,
    souls: u32,
) -> QuestionDraft {
    QuestionDraft {
        prompt: prompt.to_string(),
        options: options.map(str::to_string),
        correct_index,
        category,
        difficulty,
        souls,
    }
}

/// The ten financial-literacy questions of the launch quiz, in display
/// order.
#[must_use]
pub fn default_questions() -> Vec<QuestionDraft> {
    vec![
        question(
            "O que é dinheiro na analogia de um jogo Souls-like?",
            [
                "Apenas papel sem valor",
                "Souls/XP que você coleta para evoluir seu personagem",
                "Um item cosmético",
                "Uma arma especial",
            ],
            1,
            Category::Money,
            1,
            100,
        ),
        question(
            "Qual a principal diferença entre dinheiro físico e digital?",
            [
                "Dinheiro digital não tem valor real",
                "Dinheiro físico é mais seguro",
                "Praticidade vs. tangibilidade, ambos têm valor",
                "Não há diferença",
            ],
            2,
            Category::Money,
            2,
            200,
        ),
        question(
            "Na analogia gamer, o que representa o 'farm de gold'?",
            [
                "Gastar dinheiro rapidamente",
                "Diferentes formas de ganhar renda",
                "Economizar dinheiro",
                "Investir em ações",
            ],
            1,
            Category::Income,
            2,
            200,
        ),
        question(
            "Qual destes é um exemplo de 'quest diária' para gerar renda?",
            [
                "Dormir até tarde",
                "Pequenos trabalhos ou responsabilidades regulares",
                "Assistir TV",
                "Jogar videogame",
            ],
            1,
            Category::Income,
            1,
            150,
        ),
        question(
            "Gastos fixos em um RPG seriam como:",
            [
                "Compras de poções ocasionais",
                "Aluguel de um local para guardar itens todo mês",
                "Drops aleatórios",
                "Bônus especiais",
            ],
            1,
            Category::Expenses,
            2,
            200,
        ),
        question(
            "Qual item seria considerado 'essencial' vs 'cosmético'?",
            [
                "Roupas de marca são essenciais",
                "Comida é cosmética, roupas são essenciais",
                "Comida é essencial, roupas de marca são cosméticas",
                "Tudo é cosmético",
            ],
            2,
            Category::Expenses,
            3,
            300,
        ),
        question(
            "Como o PIX se relaciona com a evolução do dinheiro?",
            [
                "É apenas uma moda passageira",
                "Representa a evolução digital do dinheiro, como upgrade de equipamento",
                "É inferior ao dinheiro físico",
                "Não tem relação com dinheiro real",
            ],
            1,
            Category::Money,
            3,
            300,
        ),
        question(
            "Que tipo de 'drop raro' representaria um presente inesperado?",
            [
                "Salário mensal",
                "Mesada regular",
                "Dinheiro de aniversário",
                "Pagamento de trabalho fixo",
            ],
            2,
            Category::Income,
            2,
            250,
        ),
        question(
            "Gastos que 'drenam sua stamina' rapidamente seriam:",
            [
                "Compras planejadas e necessárias",
                "Gastos impulsivos e desnecessários",
                "Investimentos em educação",
                "Poupança mensal",
            ],
            1,
            Category::Expenses,
            3,
            350,
        ),
        question(
            "O que representa uma 'Bonfire' no contexto financeiro?",
            [
                "Local onde você gasta todo seu dinheiro",
                "Ponto de descanso onde você deposita dinheiro para não perder",
                "Lugar para emprestar dinheiro",
                "Local de trabalho",
            ],
            1,
            Category::Money,
            4,
            400,
        ),
    ]
}

/// Insert the default question set when the table is empty. Returns how
/// many questions were inserted (zero when the store already has any).
///
/// # Errors
///
/// Returns `SeedError` if a draft fails validation or a write fails.
pub async fn seed_default_questions(
    questions: &dyn QuestionRepository,
) -> Result<u32, SeedError> {
    if !questions.list_questions().await?.is_empty() {
        return Ok(0);
    }

    let drafts = default_questions();
    let mut inserted = 0_u32;
    for (position, draft) in drafts.into_iter().enumerate() {
        let body = draft.validate()?;
        let order_position = u32::try_from(position)
            .map_err(|_| StorageError::Serialization("order_position overflow".into()))?
            + 1;
        questions.insert_question(&body, order_position).await?;
        inserted += 1;
    }
    log::info!("seeded {inserted} default questions");
    Ok(inserted)
}
