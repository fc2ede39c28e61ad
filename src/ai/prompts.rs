//! System instruction, prompt builders and fallback text for the companion.
//!
//! Every builder returns a ready [`GenerationRequest`]. Every call site pairs
//! it with one of the fallback constants below, so a failed request still
//! produces a sensible line.

use super::GenerationRequest;
use crate::journal_core::{ChatMessage, ChatRole};
use crate::tarot::TarotCard;

/// System instruction shared by the conversational prompts.
pub const SYSTEM_INSTRUCTION: &str = r#"You are Echo, a warm guide inside a lunar journaling app. You use the imagery of the tarot card the user drew to help them sort through their feelings, and when the moment is right you offer comfort or a small piece of advice grounded in the card's meaning.

Conversation rules:

1. Completeness check (feeling vs. event)
   - If the user only named a feeling ("I'm anxious"), gently ask what happened to make them feel that way.
   - If the user only described an event ("my boss yelled at me"), ask what they truly felt in that moment.
   - Only when both the feeling and the event are present, go deeper or offer advice.

2. Measured guidance
   - Do not keep repeating "stay present" or "breathe".
   - When the user is confused or hurting, tie the card's meaning to a concrete comfort or action.
     Example (The Fool): "Try letting yourself be a little foolish, like the Fool. Not everything needs to be perfect."
     Example (The Hermit): "Give yourself ten minutes alone tonight with your phone switched off."

3. Rhythm
   - First turn: anchor on what the user sees in the card.
   - Middle: project the card onto real life using the completeness check.
   - Close: once the user has said enough, offer a warm summary.

4. Adapting
   - If the user avoids a topic, stop asking at once, accept it, and ask whether they want to record something else.
   - If the user changes topic, briefly close the previous thread and open the new one.

Style: warm, empathetic, like a wise old friend. Keep replies short and natural (one to three sentences). No lectures."#;

pub const FALLBACK_REVIEW_COMPLETED: &str = "Well done. The energy is flowing.";
pub const FALLBACK_REVIEW_MISSED: &str = "That's all right. This is only a comma, not a full stop.";
pub const FALLBACK_CARD_OPENING: &str =
    "Close your eyes. When you think of this card, what image comes to mind?";
pub const FALLBACK_CHAT_REPLY: &str = "I'm listening...";
pub const FALLBACK_TITLES: [&str; 3] = ["Quiet reflection", "Today's wisdom", "Whispers of the moon"];
pub const FALLBACK_SEEDS: [&str; 3] = [
    "Sit still for one minute",
    "Tidy a photo album",
    "Write one line of thanks",
];
pub const FALLBACK_SENSORY_TASK: &str = "Quietly notice your breath right now.";

/// Report used when the month has no keywords at all.
pub const QUIET_MONTH_OVERVIEW: &str = "This month is a quiet void, waiting for you to explore it.";
pub const QUIET_MONTH_GUIDANCE: &str =
    "1. Try taking the first step.\n2. Record each breath you notice.\n3. Trust where your intuition leads.";

/// Report used when the service answered but left a field out.
pub const PARTIAL_REPORT_OVERVIEW: &str = "The stars are still aligning. Please try again later.";
pub const PARTIAL_REPORT_GUIDANCE: &str =
    "1. Stay patient.\n2. The answer will show itself.\n3. Trust the process.";

/// Report used when the request or parsing failed.
pub const FAILED_REPORT_OVERVIEW: &str = "Tides rise and fall; all of it is the rhythm of life.";
pub const FAILED_REPORT_GUIDANCE: &str =
    "1. Breathe deeply.\n2. Return to the present.\n3. Accept yourself.";

fn role_label(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "echo",
    }
}

/// Renders a transcript as `role: text` lines.
pub fn format_transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|m| format!("{}: {}", role_label(m.role), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Praise for a completed seed, or comfort for a missed one.
pub fn review_yesterday_request(goal: &str, completed: bool) -> GenerationRequest {
    let prompt = if completed {
        format!(
            r#"The user completed yesterday's goal: "{}".
Write one short, poetic line of praise, such as "the stars crown you" or "energy rushes in like the tide". At most 12 words."#,
            goal
        )
    } else {
        format!(
            r#"The user did not complete yesterday's goal: "{}".
Using the waxing and waning of the moon, write one very gentle line of comfort telling them that rest and stillness are also part of life's cycle. At most 20 words."#,
            goal
        )
    };
    GenerationRequest::new(prompt).with_system_instruction(SYSTEM_INSTRUCTION)
}

pub fn review_yesterday_fallback(completed: bool) -> &'static str {
    if completed {
        FALLBACK_REVIEW_COMPLETED
    } else {
        FALLBACK_REVIEW_MISSED
    }
}

/// Opening question about one visual detail of the drawn card.
pub fn card_opening_request(card: &TarotCard) -> GenerationRequest {
    let prompt = format!(
        r#"The card the user drew is: {name}.
Task:
1. Do not explain the official meaning of this card.
2. Ask one question about a visual detail, guiding the user to find the *one* spot in the image that draws them most.
For example: "In this {name}, which corner or colour caught your eye first?""#,
        name = card.name
    );
    GenerationRequest::new(prompt).with_system_instruction(SYSTEM_INSTRUCTION)
}

/// Next companion turn, given the transcript so far and the newest user message.
pub fn chat_reply_request(
    card: Option<&TarotCard>,
    history: &[ChatMessage],
    message: &str,
) -> GenerationRequest {
    let card_line = card
        .map(|c| format!("Card drawn: {} ({})\n", c.name, c.keywords.join(", ")))
        .unwrap_or_default();
    let prompt = format!(
        r#"{card_line}Conversation so far:
{context}
Latest user reply: "{message}"

Task:
1. Completeness check: decide whether the user just shared a feeling or a concrete event, and ask for whichever is missing so the story becomes whole.
2. Respond:
   - Empathise first ("that sounds really hard").
   - If the user is asking for help or feels lost, offer a small, concrete comfort drawn from the card's meaning.
   - Do not just say "stay present"; give a little direction.

Keep the reply warm and short (two or three sentences)."#,
        card_line = card_line,
        context = format_transcript(history),
        message = message
    );
    GenerationRequest::new(prompt).with_system_instruction(SYSTEM_INSTRUCTION)
}

/// Three `|`-separated diary titles drawn from the conversation.
pub fn titles_request(history: &[ChatMessage]) -> GenerationRequest {
    GenerationRequest::new(format!(
        r#"Based on this conversation:
{}

Task: pick out the real-life events or concrete feelings the user mentioned and write 3 very short diary titles.
Requirements:
1. They must relate to the user's actual experience (not only tarot terms).
2. Poetic but specific.
3. At most five words each.

Return only the titles, separated by a vertical bar "|".
Example: The missed morning bus|Calm in the rain|Making peace with myself"#,
        format_transcript(history)
    ))
}

/// Three `|`-separated five-minute intentions for tomorrow.
pub fn seed_suggestions_request(card: &TarotCard) -> GenerationRequest {
    let prompt = format!(
        r#"Card: {}.
Task: based on this card's energy, give 3 very simple, concrete "energy seeds" for tomorrow that take under five minutes.
Requirements:
1. Minimal, starting with a verb.
2. Like a small everyday spell.
3. At most six words each.

Return only the 3 phrases, separated by a vertical bar "|".
Example: Drink a glass of warm water|Tidy one corner of the desk|Watch the sunset once"#,
        card.name
    );
    GenerationRequest::new(prompt).with_system_instruction(SYSTEM_INSTRUCTION)
}

/// Integer depth score for a finished conversation.
pub fn depth_score_request(history: &[ChatMessage]) -> GenerationRequest {
    GenerationRequest::new(format!(
        r#"Rate how deep and complex this reflection conversation was, from 0 (a single shallow remark) to 100 (a rich, honest exploration of both events and feelings).

Conversation:
{}

Return only the integer."#,
        format_transcript(history)
    ))
}

/// Monthly overview and guidance, answered as JSON.
pub fn monthly_report_request(keywords: &[String]) -> GenerationRequest {
    let prompt = format!(
        r#"The user's core energy keywords this month are: [{}].
Write a short monthly report with two parts:
1. overview: a deep insight into this month's state using the keywords (about 30 words, beautiful, healing, conclusive).
2. guidance: action or spiritual guidance for next month (3 items, each short and concrete, like "spend time in nature" or "clean out your phone's photo album").

Return strictly as JSON:
{{
    "overview": "...",
    "guidance": "1. ...\n2. ...\n3. ..."
}}"#,
        keywords.join(", ")
    );
    GenerationRequest::new(prompt)
        .with_system_instruction(SYSTEM_INSTRUCTION)
        .json()
}
