// File: src/quiz/vocab.rs
use crate::core::types::{RecordId, VocabularyRecord};
use crate::fuzzy::similarity::is_close_enough;
use rand::seq::SliceRandom;
use rand::Rng;

pub const OPTION_COUNT: usize = 4;
pub const TYPED_THRESHOLD: f64 = 0.8;

/// Which side of the record is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ChatToEnglish,
    ArabicToEnglish,
    EnglishToChat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabQuestion {
    pub record: RecordId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub direction: Direction,
}

impl VocabQuestion {
    pub fn check(&self, choice: usize) -> bool {
        choice == self.correct
    }
}

fn askable(r: &VocabularyRecord) -> bool {
    !r.eng.trim().is_empty() && !r.chat.trim().is_empty()
}

fn answer_side(r: &VocabularyRecord, direction: Direction) -> String {
    match direction {
        Direction::EnglishToChat => r.chat.trim().to_string(),
        _ => r.eng.trim().to_string(),
    }
}

/// A multiple-choice question for a random record. Distractors come from the
/// same part of speech first, then from anything else.
pub fn make_question<R: Rng + ?Sized>(
    items: &[VocabularyRecord],
    direction: Direction,
    rng: &mut R,
) -> Option<VocabQuestion> {
    let pool: Vec<&VocabularyRecord> = items
        .iter()
        .filter(|r| askable(r))
        .filter(|r| direction != Direction::ArabicToEnglish || !r.ar.trim().is_empty())
        .collect();
    let target = *pool.choose(rng)?;
    let answer = answer_side(target, direction);

    let mut same_pos: Vec<String> = Vec::new();
    let mut other: Vec<String> = Vec::new();
    for r in items.iter().filter(|r| askable(r) && r.id != target.id) {
        let text = answer_side(r, direction);
        if text.eq_ignore_ascii_case(&answer) || same_pos.contains(&text) || other.contains(&text) {
            continue;
        }
        if r.pos == target.pos {
            same_pos.push(text);
        } else {
            other.push(text);
        }
    }
    same_pos.shuffle(rng);
    other.shuffle(rng);

    let mut options: Vec<String> = same_pos.into_iter().chain(other).take(OPTION_COUNT - 1).collect();
    if options.is_empty() {
        return None;
    }
    options.push(answer.clone());
    options.shuffle(rng);
    let correct = options.iter().position(|o| *o == answer)?;

    let prompt = match direction {
        Direction::ChatToEnglish => target.chat.trim().to_string(),
        Direction::ArabicToEnglish => target.ar.trim().to_string(),
        Direction::EnglishToChat => target.eng.trim().to_string(),
    };
    Some(VocabQuestion { record: target.id, prompt, options, correct, direction })
}

/// Free-typed answer check. Glosses like "husband / spouse" accept either part.
pub fn check_typed(record: &VocabularyRecord, direction: Direction, answer: &str) -> bool {
    let expected = answer_side(record, direction);
    expected
        .split(|c: char| c == '/' || c == ',' || c == ';')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .any(|alt| is_close_enough(answer, alt, TYPED_THRESHOLD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn items() -> Vec<VocabularyRecord> {
        vec![
            VocabularyRecord::new(1, "بيت", "bait", "house", "noun"),
            VocabularyRecord::new(2, "باب", "baab", "door", "noun"),
            VocabularyRecord::new(3, "كرسي", "kursi", "chair", "noun"),
            VocabularyRecord::new(4, "شنطة", "shantah", "bag", "noun"),
            VocabularyRecord::new(5, "كبير", "kabeer", "big", "adjective"),
        ]
    }

    #[test]
    fn question_has_one_correct_option() {
        let items = items();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let q = make_question(&items, Direction::ChatToEnglish, &mut rng).unwrap();
            assert_eq!(q.options.len(), OPTION_COUNT);
            let target = items.iter().find(|r| r.id == q.record).unwrap();
            assert_eq!(q.prompt, target.chat);
            assert_eq!(q.options[q.correct], target.eng);
            assert!(q.check(q.correct));
            let mut dedup = q.options.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), OPTION_COUNT);
        }
    }

    #[test]
    fn lone_record_cannot_make_a_question() {
        let items = vec![VocabularyRecord::new(1, "بيت", "bait", "house", "noun")];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(make_question(&items, Direction::ChatToEnglish, &mut rng).is_none());
    }

    #[test]
    fn typed_answers_are_lenient() {
        let husband = VocabularyRecord::new(1, "ريل", "rayyal", "husband / spouse", "noun");
        assert!(check_typed(&husband, Direction::ChatToEnglish, "spouse"));
        assert!(check_typed(&husband, Direction::ChatToEnglish, "Husbnd"));
        assert!(!check_typed(&husband, Direction::ChatToEnglish, "wife"));
        assert!(check_typed(&husband, Direction::EnglishToChat, "rayal"));
    }
}
