// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned conversation data.

use weliive_core::Sender;

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedMessage {
    pub text: String,
    pub sender: Sender,
}

impl ScriptedMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
        }
    }
}

/// Questions a visitor typically asks during a live visit.
const BUYER_QUESTIONS: &[&str] = &[
    "Quel est le prix de cet appartement ?",
    "L'appartement est-il disponible immédiatement ?",
    "Je souhaite visiter cette semaine si possible.",
    "Quel est le montant du loyer mensuel ?",
    "Y a-t-il des charges supplémentaires ?",
    "Je suis prêt à acheter si le prix est correct.",
    "Pouvez-vous me donner plus de détails sur le quartier ?",
    "Quel est le prix final avec toutes les charges ?",
];

/// The default replay script: eight visitor messages, replayed in a loop.
pub fn default_script() -> Vec<ScriptedMessage> {
    BUYER_QUESTIONS
        .iter()
        .map(|text| ScriptedMessage::new(*text, Sender::User))
        .collect()
}

/// Replies sent by the seller side after a visitor message.
pub const AUTO_RESPONSES: &[&str] = &[
    "Merci pour votre message. Je vous répondrai dans les plus brefs délais.",
    "Je prends note de votre demande et vous recontacterai rapidement.",
    "Votre message a bien été reçu. Nous vous répondrons sous peu.",
];

/// First message shown when the live view opens.
pub const GREETING: &str = "Bonjour ! Je suis intéressé par votre appartement.";

/// Posted when the seller handles a hot-lead alert.
pub const HOT_LEAD_HANDLED: &str = "✅ Alerte Hot Lead traitée - Contact prioritaire activé";

/// Posted when the visitor submits an offer.
pub const OFFER_SENT: &str = "Une offre a été envoyée !";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_is_all_user_messages() {
        let script = default_script();
        assert_eq!(script.len(), 8);
        assert!(script.iter().all(|m| m.sender == Sender::User));
        assert!(script[0].text.contains("prix"));
    }
}
