use crate::chat::context::ContextEntry;
use chrono::{DateTime, SecondsFormat, Utc};

/// A rendered generation request: system instruction plus user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Render the context window and the current message into a prompt.
///
/// The system part carries the persona, the recent block as
/// `{other, mine, timestamp}` triples, the relevant block as
/// `{text, timestamp}` pairs, and the behavioral directives. The user
/// part is the current message, verbatim. Rendering is pure: identical
/// input always yields identical text. No truncation happens here; the
/// window was already bounded upstream.
pub fn build_prompt(context: &[ContextEntry], current_message: &str) -> Prompt {
    let recent_block = context
        .iter()
        .filter_map(|entry| match entry {
            ContextEntry::Recent {
                other_text,
                my_text,
                timestamp,
            } => Some(format!(
                "{{{}, {}, {}}}",
                other_text,
                my_text,
                render_timestamp(timestamp)
            )),
            ContextEntry::Relevant { .. } => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    let relevant_block = context
        .iter()
        .filter_map(|entry| match entry {
            ContextEntry::Relevant { text, timestamp } => {
                Some(format!("{{{}, {}}}", text, render_timestamp(timestamp)))
            }
            ContextEntry::Recent { .. } => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "I am an entrepreneur.\n\
         Below is a conversation between me and another person.\n\
         Each exchange is written in the format: {{the other person's message, my message, timestamp}}.\n\
         {}\n\
         And this is chat histories you have to refer.\n\
         Each history is written in the format: {{history, timestamp}}.\n\
         {}\n\
         Role: Think as me (a real human, not an assistant)\n\
         Analyze: Tone, intent, emotion of the latest message\n\
         Use: Only relevant past context\n\
         Consider: Relationship type (casual/professional), emotional flow (trust, humor, tension)\n\
         Goal: Respond naturally to move the conversation forward\n\
         Style: Output only my next message\n\
         Use human, realistic tone (casual, warm, witty, or empathetic)\n\
         Avoid robotic or scripted language\n\
         Reminder: This is real conversation, not chatbot interaction\n\
         Message Type: May be a question or statement - respond accordingly",
        recent_block, relevant_block
    );

    Prompt {
        system,
        user: current_message.to_string(),
    }
}

fn render_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
