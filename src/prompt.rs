use std::{collections::VecDeque, sync::Mutex};

/// Asks the user for a replacement string.
///
/// `None` means the user cancelled.
pub trait TextPrompt: Send + Sync {
    fn request_text(&self, message: &str, default: &str) -> Option<String>;
}

/// Trims user input, rejecting cancelled or blank answers
pub fn normalize_text(input: Option<String>) -> Option<String> {
    let text = input?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Prompt that replays queued answers, then cancels once they run out
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| a.map(Into::into)).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Queues one more answer
    pub fn push(&self, answer: Option<&str>) {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(answer.map(str::to_string));
        }
    }

    /// `(message, default)` pairs seen so far
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl TextPrompt for ScriptedPrompt {
    fn request_text(&self, message: &str, default: &str) -> Option<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push((message.to_string(), default.to_string()));
        }
        self.answers.lock().ok()?.pop_front().flatten()
    }
}
