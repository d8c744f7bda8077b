// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weliive demo` command implementation.
//!
//! Runs one live session in the terminal: the scripted visitor talks, the
//! optional `--say` messages and `--ask` questions are injected once the
//! script has begun, and every chat message and Q&A change is printed as it
//! happens. Ctrl+C ends the visit early.

use std::io::IsTerminal;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use weliive_config::WeliiveConfig;
use weliive_core::{Message, QaItem, QaStatus, Sender, WeliiveError};
use weliive_qa::QaEvent;
use weliive_session::LiveSession;

/// Options of the `demo` subcommand.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub seconds: u64,
    pub say: Vec<String>,
    pub ask: Vec<String>,
    pub embedded: bool,
}

pub async fn run_demo(
    mut config: WeliiveConfig,
    options: DemoOptions,
    plain: bool,
) -> Result<(), WeliiveError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    if options.embedded {
        config.simulation.enabled = false;
    }
    let warmup = config.simulation.startup_delay() + config.simulation.interval();
    let deadline = Instant::now() + Duration::from_secs(options.seconds);

    let session = LiveSession::new(config)?;
    session.store().on_message(move |message: &Message| {
        println!("{}", format_message(message, use_color));
        Ok(())
    });

    let cancel = CancellationToken::new();
    let printer = {
        let mut events = session.qa().subscribe();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    event = events.recv() => match event {
                        Ok(event) => println!("{}", format_qa_event(&event, use_color)),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "q&a printer fell behind");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        })
    };

    println!();
    println!("  weliive live visit ({}s)", options.seconds);
    println!("  {}", "-".repeat(50));
    for item in session.qa().all() {
        println!("{}", format_qa_item(&item, use_color));
    }

    if options.embedded {
        info!("embedded mode, live view stays closed");
    } else {
        session.enter_live()?;
    }

    let has_input = !options.say.is_empty() || !options.ask.is_empty();
    let mut interrupted = false;
    if has_input && !options.embedded {
        interrupted = !wait(sleep(warmup)).await;
    }
    if !interrupted {
        for text in &options.say {
            session.send_message(text)?;
        }
        for question in &options.ask {
            session.submit_question(question);
        }
        interrupted = !wait(sleep_until(deadline)).await;
    }
    if interrupted {
        info!("demo interrupted");
    }

    session.shutdown().await;
    cancel.cancel();
    if let Err(e) = printer.await {
        warn!(error = %e, "q&a printer task failed");
    }

    let messages = session.store().messages();
    let hot = messages.iter().filter(|m| m.is_hot_lead).count();
    let answered = session
        .qa()
        .all()
        .iter()
        .filter(|i| i.status == QaStatus::Answered)
        .count();
    println!("  {}", "-".repeat(50));
    println!(
        "  {} messages, {hot} hot leads, {answered}/{} questions answered, lead: {}",
        messages.len(),
        session.qa().len(),
        session.lead_status()
    );
    Ok(())
}

/// Wait for `timer` unless Ctrl+C comes first. Returns `false` on Ctrl+C.
async fn wait(timer: impl std::future::Future<Output = ()>) -> bool {
    tokio::select! {
        _ = timer => true,
        _ = tokio::signal::ctrl_c() => false,
    }
}

pub fn format_message(message: &Message, use_color: bool) -> String {
    let time = message.timestamp.format("%H:%M:%S");
    let who = match message.sender {
        Sender::User => "visiteur",
        Sender::Ai => "vendeur",
        Sender::System => "système",
    };
    if use_color {
        use colored::Colorize;
        let who = match message.sender {
            Sender::User => who.cyan().bold(),
            Sender::Ai => who.green().bold(),
            Sender::System => who.magenta().bold(),
        };
        if message.is_hot_lead {
            format!("  [{time}] {who}: {} {}", message.text, "🔥 HOT LEAD".red().bold())
        } else {
            format!("  [{time}] {who}: {}", message.text)
        }
    } else if message.is_hot_lead {
        format!("  [{time}] {who}: {} [HOT LEAD]", message.text)
    } else {
        format!("  [{time}] {who}: {}", message.text)
    }
}

pub fn format_qa_event(event: &QaEvent, use_color: bool) -> String {
    match event {
        QaEvent::Added(item) => format_qa_item(item, use_color),
        QaEvent::Acknowledged(item) => {
            let text = item.acknowledgment.as_deref().unwrap_or_default();
            if use_color {
                use colored::Colorize;
                format!("  {} {}", "q&a ack".yellow(), text.dimmed())
            } else {
                format!("  q&a ack: {text}")
            }
        }
        QaEvent::Answered(item) => {
            let text = item.answer.as_deref().unwrap_or_default();
            if use_color {
                use colored::Colorize;
                format!("  {} {} -> {}", "q&a ✓".green(), item.question, text)
            } else {
                format!("  q&a answered: {} -> {text}", item.question)
            }
        }
    }
}

pub fn format_qa_item(item: &QaItem, use_color: bool) -> String {
    let line = match &item.answer {
        Some(answer) => format!("{} -> {answer}", item.question),
        None => item.question.clone(),
    };
    if use_color {
        use colored::Colorize;
        format!("  {} {line}", format!("q&a [{}]", item.status).as_str().blue())
    } else {
        format!("  q&a [{}] {line}", item.status)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use weliive_core::{MessageId, QaId};

    fn message(sender: Sender, hot: bool) -> Message {
        Message {
            id: MessageId("msg-test".into()),
            text: "Quel est le prix ?".into(),
            sender,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 14, 5, 9).unwrap(),
            is_hot_lead: hot,
        }
    }

    #[test]
    fn plain_message_marks_hot_leads() {
        assert_eq!(
            format_message(&message(Sender::User, true), false),
            "  [14:05:09] visiteur: Quel est le prix ? [HOT LEAD]"
        );
        assert_eq!(
            format_message(&message(Sender::Ai, false), false),
            "  [14:05:09] vendeur: Quel est le prix ?"
        );
    }

    #[test]
    fn plain_qa_lines() {
        let item = QaItem {
            id: QaId("qa-test".into()),
            question: "Y a-t-il une cave ?".into(),
            answer: Some("Oui".into()),
            acknowledgment: None,
            timestamp: Utc::now(),
            status: QaStatus::Answered,
        };
        assert_eq!(
            format_qa_item(&item, false),
            "  q&a [answered] Y a-t-il une cave ? -> Oui"
        );
        assert_eq!(
            format_qa_event(&QaEvent::Answered(item), false),
            "  q&a answered: Y a-t-il une cave ? -> Oui"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn embedded_demo_runs_to_completion() {
        let mut config = WeliiveConfig::default();
        config.chat.auto_response_delay_ms = 10;
        let options = DemoOptions {
            seconds: 1,
            say: vec!["Je veux visiter".into()],
            ask: vec!["Une cave ?".into()],
            embedded: true,
        };
        run_demo(config, options, true).await.unwrap();
    }
}
