// File: src/quiz/whats_where.rs
//! "What's where?": pick the preposition that describes the scene.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preposition {
    On,
    Under,
    In,
    NextTo,
    Behind,
    InFrontOf,
}

impl Preposition {
    pub fn ar(&self) -> &'static str {
        match self {
            Preposition::On => "فوق",
            Preposition::Under => "تحت",
            Preposition::In => "داخل",
            Preposition::NextTo => "يم",
            Preposition::Behind => "ورا",
            Preposition::InFrontOf => "جدام",
        }
    }

    pub fn chat(&self) -> &'static str {
        match self {
            Preposition::On => "foog",
            Preposition::Under => "ta7t",
            Preposition::In => "dakhel",
            Preposition::NextTo => "yamm",
            Preposition::Behind => "wara",
            Preposition::InFrontOf => "jiddam",
        }
    }

    pub fn eng(&self) -> &'static str {
        match self {
            Preposition::On => "on",
            Preposition::Under => "under",
            Preposition::In => "in",
            Preposition::NextTo => "next to",
            Preposition::Behind => "behind",
            Preposition::InFrontOf => "in front of",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhereQuestion {
    /// English scene with the preposition blanked out.
    pub scene: &'static str,
    pub options: [Preposition; 4],
    pub answer: Preposition,
}

impl WhereQuestion {
    pub fn check(&self, choice: usize) -> bool {
        self.options.get(choice) == Some(&self.answer)
    }
}

use Preposition::*;

pub const QUESTIONS: &[WhereQuestion] = &[
    WhereQuestion { scene: "The cat is ___ the chair.", options: [On, Under, Behind, In], answer: Under },
    WhereQuestion { scene: "The book is ___ the table.", options: [In, On, NextTo, Under], answer: On },
    WhereQuestion { scene: "The keys are ___ the bag.", options: [Behind, On, In, InFrontOf], answer: In },
    WhereQuestion { scene: "The car is ___ the house.", options: [InFrontOf, Under, In, On], answer: InFrontOf },
    WhereQuestion { scene: "The boy is hiding ___ the door.", options: [On, Behind, In, Under], answer: Behind },
    WhereQuestion { scene: "The cup is ___ the plate.", options: [NextTo, Under, In, Behind], answer: NextTo },
    WhereQuestion { scene: "The ball is ___ the bed.", options: [On, In, Under, InFrontOf], answer: Under },
    WhereQuestion { scene: "The bird is ___ the tree.", options: [Under, NextTo, Behind, On], answer: On },
];

/// The bank in a fresh order.
pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static WhereQuestion> {
    let mut qs: Vec<&'static WhereQuestion> = QUESTIONS.iter().collect();
    qs.shuffle(rng);
    qs
}
