// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned seller-side texts for the Q&A panel and the answer picker.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use weliive_config::model::AnswerSelection;

/// Interim confirmation shown shortly after a question is submitted.
pub const ACKNOWLEDGMENT: &str =
    "Merci ! Votre question a été transmise. Le vendeur vous répondra dans les plus brefs délais.";

/// Candidate automatic answers.
pub const AUTO_ANSWERS: &[&str] = &[
    "C'est une excellente question, je vous montre ça en vidéo dans un instant !",
    "Merci pour votre question. Je vais vous donner plus de détails en direct.",
    "Excellente question ! Laissez-moi vous expliquer cela en détail.",
    "Je comprends votre question. Voici la réponse que je peux vous donner maintenant.",
];

/// Answered questions shown when the panel opens.
pub const SAMPLE_QA: &[(&str, &str)] = &[
    (
        "Quelle est l'exposition de l'appartement ?",
        "L'appartement bénéficie d'une exposition Sud-Ouest, idéale pour profiter du soleil toute la journée.",
    ),
    (
        "Y a-t-il une cave ?",
        "Oui, il y a une cave de 12m² incluse dans le prix.",
    ),
    (
        "Quel est l'état des travaux à prévoir ?",
        "L'appartement est en excellent état, aucun travaux nécessaires. Il a été entièrement rénové en 2020.",
    ),
];

/// Chooses among [`AUTO_ANSWERS`].
#[derive(Debug)]
pub struct AnswerPicker {
    selection: AnswerSelection,
    cursor: AtomicUsize,
}

impl AnswerPicker {
    pub fn new(selection: AnswerSelection) -> Self {
        Self {
            selection,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn selection(&self) -> AnswerSelection {
        self.selection
    }

    pub fn pick(&self) -> &'static str {
        let idx = match self.selection {
            AnswerSelection::RoundRobin => {
                self.cursor.fetch_add(1, Ordering::Relaxed) % AUTO_ANSWERS.len()
            }
            AnswerSelection::Random => rand::thread_rng().gen_range(0..AUTO_ANSWERS.len()),
        };
        AUTO_ANSWERS[idx]
    }
}

impl Default for AnswerPicker {
    fn default() -> Self {
        Self::new(AnswerSelection::default())
    }
}
