//! Quiz games over the vocabulary and the fixed question banks.

pub mod question_words;
pub mod vocab;
pub mod whats_where;
