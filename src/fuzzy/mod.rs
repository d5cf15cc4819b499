pub mod similarity;
pub mod symspell;
