// File: src/quiz/question_words.rs
//! Match Emirati question words to their English meaning.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionWord {
    pub ar: &'static str,
    pub chat: &'static str,
    pub eng: &'static str,
}

pub const QUESTION_WORDS: [QuestionWord; 8] = [
    QuestionWord { ar: "شو", chat: "shu", eng: "what" },
    QuestionWord { ar: "منو", chat: "minu", eng: "who" },
    QuestionWord { ar: "وين", chat: "wain", eng: "where" },
    QuestionWord { ar: "متى", chat: "mita", eng: "when" },
    QuestionWord { ar: "ليش", chat: "laish", eng: "why" },
    QuestionWord { ar: "شلون", chat: "shlon", eng: "how" },
    QuestionWord { ar: "أي", chat: "ay", eng: "which" },
    QuestionWord { ar: "كم", chat: "kam", eng: "how many" },
];

/// One board: English prompts on the left, shuffled Emirati words on the right.
/// Both hold indices into `QUESTION_WORDS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRound {
    pub prompts: Vec<usize>,
    pub answers: Vec<usize>,
}

impl MatchRound {
    /// `pairs[i] = (prompt position, answer position)`; returns how many are right.
    pub fn score(&self, pairs: &[(usize, usize)]) -> usize {
        pairs
            .iter()
            .filter(|&&(p, a)| {
                matches!((self.prompts.get(p), self.answers.get(a)), (Some(x), Some(y)) if x == y)
            })
            .count()
    }

    pub fn is_solved_by(&self, pairs: &[(usize, usize)]) -> bool {
        pairs.len() == self.prompts.len() && self.score(pairs) == self.prompts.len()
    }
}

/// Splits the whole bank into rounds of `pairs_per_round` (the last may be short).
pub fn generate_rounds<R: Rng + ?Sized>(rng: &mut R, pairs_per_round: usize) -> Vec<MatchRound> {
    let size = pairs_per_round.max(1);
    let mut order: Vec<usize> = (0..QUESTION_WORDS.len()).collect();
    order.shuffle(rng);

    order
        .chunks(size)
        .map(|chunk| {
            let prompts = chunk.to_vec();
            let mut answers = prompts.clone();
            answers.shuffle(rng);
            MatchRound { prompts, answers }
        })
        .collect()
}
