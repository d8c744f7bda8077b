// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: simulator -> store -> observers, on virtual time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use weliive_chat::script::default_script;
use weliive_chat::{ConversationSimulator, MessageStore, ScriptedMessage, SimulatorState};
use weliive_config::model::SimulationConfig;
use weliive_core::{Message, Sender};
use weliive_lead::KeywordScorer;

fn fast_config() -> SimulationConfig {
    SimulationConfig {
        enabled: true,
        startup_delay_ms: 100,
        interval_ms: 50,
    }
}

#[tokio::test(start_paused = true)]
async fn observer_sees_every_scripted_message_in_order() {
    let store = Arc::new(MessageStore::new(Arc::new(KeywordScorer::new())));
    let seen: Arc<Mutex<Vec<Message>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.on_message(move |m| {
        sink.lock().unwrap().push(m.clone());
        Ok(())
    });

    let sim = ConversationSimulator::new(store.clone(), default_script(), &fast_config());
    sim.start();
    // 100 + 8 * 50
    tokio::time::sleep(Duration::from_millis(501)).await;
    sim.stop();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 8);
    assert_eq!(*seen, store.messages());
    let texts: Vec<&str> = seen.iter().map(|m| m.text.as_str()).collect();
    let script: Vec<String> = default_script().into_iter().map(|s| s.text).collect();
    assert_eq!(texts, script);
}

#[tokio::test(start_paused = true)]
async fn hot_leads_in_default_script() {
    let store = Arc::new(MessageStore::new(Arc::new(KeywordScorer::new())));
    let sim = ConversationSimulator::new(store.clone(), default_script(), &fast_config());
    sim.start();
    tokio::time::sleep(Duration::from_millis(501)).await;
    sim.stop();

    let flags: Vec<bool> = store.messages().iter().map(|m| m.is_hot_lead).collect();
    // Only the two questions about charges and the neighbourhood carry no
    // intent keyword.
    assert_eq!(flags, vec![true, true, true, true, false, true, false, true]);
}

#[tokio::test(start_paused = true)]
async fn scripted_ai_lines_are_never_scored() {
    let store = Arc::new(MessageStore::new(Arc::new(KeywordScorer::new())));
    let script = vec![
        ScriptedMessage::new("Quel est le prix ?", Sender::User),
        ScriptedMessage::new("Le prix est de 250 000 €.", Sender::Ai),
    ];
    let sim = ConversationSimulator::new(store.clone(), script, &fast_config());
    sim.start();
    tokio::time::sleep(Duration::from_millis(201)).await;
    drop(sim);

    let messages = store.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_hot_lead);
    assert!(!messages[1].is_hot_lead);
    assert_eq!(messages[1].sender, Sender::Ai);
}

#[tokio::test(start_paused = true)]
async fn dropping_simulator_stops_replay() {
    let store = Arc::new(MessageStore::new(Arc::new(KeywordScorer::new())));
    let sim = ConversationSimulator::new(store.clone(), default_script(), &fast_config());
    sim.start();
    assert_eq!(sim.state(), SimulatorState::Scheduled);
    drop(sim);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(store.is_empty());
}

#[test]
fn writers_on_other_threads_are_serialized() {
    let store = Arc::new(MessageStore::new(Arc::new(KeywordScorer::new())));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    store
                        .add_message(&format!("thread {t} message {i}"), Sender::User)
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let messages = store.messages();
    assert_eq!(messages.len(), 100);
    let mut ids: Vec<_> = messages.iter().map(|m| m.id.clone()).collect();
    ids.sort_by(|a, b| a.0.cmp(&b.0));
    ids.dedup();
    assert_eq!(ids.len(), 100);
}
