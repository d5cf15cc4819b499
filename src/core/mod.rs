pub mod alternate;
pub mod feminine;
pub mod gender;
pub mod lexicon;
pub mod numerals;
pub mod possessive;
pub mod types;
