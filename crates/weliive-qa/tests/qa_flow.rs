// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Q&A lifecycle as seen by a panel subscribed to registry events.

use std::sync::Arc;
use std::time::Duration;

use weliive_config::model::{AnswerSelection, QaConfig};
use weliive_core::QaStatus;
use weliive_qa::{QaEvent, QaProgression, QaRegistry, ACKNOWLEDGMENT, AUTO_ANSWERS};

#[tokio::test(start_paused = true)]
async fn submitted_question_emits_three_events() {
    let registry = Arc::new(QaRegistry::new());
    let progression = QaProgression::new(registry.clone(), &QaConfig::default());
    let mut events = registry.subscribe();

    let item = registry.add_question("Les charges sont-elles incluses ?");
    progression.schedule(item.id.clone());
    tokio::time::sleep(Duration::from_millis(3001)).await;

    let mut kinds = Vec::new();
    while let Ok(event) = events.try_recv() {
        assert_eq!(event.item().id, item.id);
        kinds.push(match event {
            QaEvent::Added(_) => "added",
            QaEvent::Acknowledged(i) => {
                assert_eq!(i.acknowledgment.as_deref(), Some(ACKNOWLEDGMENT));
                "acknowledged"
            }
            QaEvent::Answered(i) => {
                assert!(AUTO_ANSWERS.contains(&i.answer.as_deref().unwrap_or_default()));
                "answered"
            }
        });
    }
    assert_eq!(kinds, vec!["added", "acknowledged", "answered"]);
}

#[tokio::test(start_paused = true)]
async fn custom_delays_and_random_answers() {
    let config = QaConfig {
        acknowledgment_delay_ms: 10,
        answer_delay_ms: 20,
        answer_selection: AnswerSelection::Random,
        seed_samples: true,
    };
    let registry = Arc::new(QaRegistry::from_config(&config));
    let progression = QaProgression::new(registry.clone(), &config);

    let ids: Vec<_> = (0..5)
        .map(|i| registry.add_question(&format!("question {i}")).id)
        .collect();
    for id in &ids {
        progression.schedule(id.clone());
    }
    tokio::time::sleep(Duration::from_millis(21)).await;

    let items = registry.all();
    assert_eq!(items.len(), 8);
    assert!(items.iter().all(|i| i.status == QaStatus::Answered));
    for id in &ids {
        let item = registry.get(id).unwrap();
        assert!(AUTO_ANSWERS.contains(&item.answer.as_deref().unwrap_or_default()));
        assert_eq!(item.acknowledgment.as_deref(), Some(ACKNOWLEDGMENT));
    }
}

#[tokio::test(start_paused = true)]
async fn manual_answer_before_acknowledgment_stays_answered() {
    let registry = Arc::new(QaRegistry::new());
    let progression = QaProgression::new(registry.clone(), &QaConfig::default());

    let item = registry.add_question("Q");
    progression.schedule(item.id.clone());
    assert!(registry.add_answer(&item.id, "Réponse du vendeur"));

    tokio::time::sleep(Duration::from_millis(301)).await;
    let after_ack = registry.get(&item.id).unwrap();
    assert_eq!(after_ack.status, QaStatus::Answered);
    assert_eq!(after_ack.answer.as_deref(), Some("Réponse du vendeur"));
    assert_eq!(after_ack.acknowledgment.as_deref(), Some(ACKNOWLEDGMENT));

    tokio::time::sleep(Duration::from_millis(3000)).await;
    let settled = registry.get(&item.id).unwrap();
    assert_eq!(settled.status, QaStatus::Answered);
    assert_eq!(settled.answer.as_deref(), Some("Réponse du vendeur"));
    assert_eq!(progression.pending(), 0);
}
