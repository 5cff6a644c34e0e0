//! Prompt templates for the four AI-assisted features. Length thresholds are
//! the callers' concern; these only do the formatting.

use std::fmt::Write;

use crate::ai::ChatTurn;
use crate::models::Note;

pub fn summarize_notes(text: &str) -> Vec<ChatTurn> {
    vec![ChatTurn::user(format!(
        "Summarize the following study notes concisely, highlighting the key concepts and important points:\n\n{text}"
    ))]
}

pub fn analyze_questions(questions: &str, subject: &str) -> Vec<ChatTurn> {
    vec![ChatTurn::user(format!(
        "Analyze these previous year questions for {subject} exam. For each question:\n\
         1. Identify the topic/concept being tested\n\
         2. Suggest the best approach to solve it\n\
         3. Highlight any common patterns or tricks\n\
         4. Rate difficulty from 1-5\n\n\
         Questions:\n{questions}"
    ))]
}

pub fn resolve_doubt(doubt: &str, subject: &str) -> Vec<ChatTurn> {
    vec![ChatTurn::user(format!(
        "I'm studying {subject} and have the following doubt:\n\n{doubt}\n\n\
         Please explain this concept clearly and thoroughly, with examples if possible."
    ))]
}

/// One line of output per note, in note order; the reply is split back into
/// task titles by the task panel.
pub fn plan_study_tasks(notes: &[Note]) -> Vec<ChatTurn> {
    let mut listing = String::new();
    for note in notes {
        let _ = writeln!(listing, "- \"{}\" ({})", note.title, note.subject);
    }

    vec![ChatTurn::user(format!(
        "I have study notes on the following topics:\n{listing}\n\
         Suggest one concrete, actionable study task for each note, in the same order as the list.\n\
         Respond with plain text only, one task per line, with no numbering, bullets or commentary."
    ))]
}
