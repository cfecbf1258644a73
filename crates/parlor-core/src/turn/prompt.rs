//! System prompt assembly for a chat turn.
//!
//! The whole conversation context rides in a single system-role string:
//! a fixed template naming the user and personality, a JSON dump of their
//! preferences, then every prior message as "sender: content" lines.

use parlor_types::chat::Message;
use parlor_types::user::ChatPersona;

/// Build the system prompt for one chat turn.
pub fn build_system_prompt(persona: &ChatPersona, history: &[Message]) -> String {
    // A string-to-string BTreeMap cannot fail to serialize.
    let preferences_json =
        serde_json::to_string(&persona.preferences).unwrap_or_else(|_| "{}".to_string());

    let mut context = format!("You are an AI assistant chatting with {}.", persona.name);
    context.push_str(&format!(" They have a {} personality.", persona.personality));
    context.push_str(&format!(" Their known preferences: {preferences_json}."));
    context.push_str(" Their previous messages:");
    for message in history {
        context.push_str(&format!("\n{}: {}", message.sender, message.content));
    }

    context
}
