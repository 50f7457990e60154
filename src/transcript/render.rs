use super::collect::{Speaker, Transcript, TranscriptEntry};

const HUMAN_LABEL: &str = "<span style='color:#57130a;'>Human:</span>";
const ASSISTANT_LABEL: &str = "<span style='color:#0a571f;'>ChatGPT:</span>";
const HUMAN_PREFIX: &str = "Human";
const ASSISTANT_PREFIX: &str = "ChatGPT";

impl TranscriptEntry {
    /// Markdown block for this entry, always ending in a newline
    pub fn to_markdown(&self) -> String {
        match &self.speaker {
            Speaker::Human => format!("{}\n{}\n", HUMAN_LABEL, self.text),
            Speaker::Assistant => format!("{}\n{}\n", ASSISTANT_LABEL, self.text),
            Speaker::Tool(name) => format!("**{}:** {}\n", name, self.text),
            Speaker::Unlabeled => format!("{}\n", self.text),
        }
    }

    /// Single replay-prompt line group for this entry
    pub fn to_prompt_line(&self) -> String {
        match &self.speaker {
            Speaker::Human => format!("{}: {}", HUMAN_PREFIX, self.text.trim()),
            Speaker::Assistant => format!("{}: {}", ASSISTANT_PREFIX, self.text.trim()),
            Speaker::Tool(_) | Speaker::Unlabeled => self.to_markdown().trim().to_string(),
        }
    }
}

/// Markdown transcript: entry blocks separated by blank lines
pub fn render_markdown(transcript: &Transcript) -> String {
    transcript.entries().iter().map(TranscriptEntry::to_markdown).collect::<Vec<_>>().join("\n")
}

/// Plain-text replay prompt with `Human: ...` / `ChatGPT: ...` turns
pub fn render_prompt(transcript: &Transcript) -> String {
    let lines: Vec<String> =
        transcript.entries().iter().map(TranscriptEntry::to_prompt_line).collect();
    lines.join("\n").trim().to_string()
}

/// Recovers the `Human:` / `ChatGPT:` turns from a rendered Markdown transcript
///
/// Each label line starts a turn that runs until the next label line. Tool and
/// unlabeled blocks fold into the preceding turn, or into a leading preamble.
pub fn strip_markup(markdown: &str) -> String {
    let mut preamble = String::new();
    let mut turns: Vec<(&str, String)> = Vec::new();

    for line in markdown.split('\n') {
        let prefix = match line {
            HUMAN_LABEL => Some(HUMAN_PREFIX),
            ASSISTANT_LABEL => Some(ASSISTANT_PREFIX),
            _ => None,
        };

        match (prefix, turns.last_mut()) {
            (Some(prefix), _) => turns.push((prefix, String::new())),
            (None, Some((_, body))) => {
                body.push_str(line);
                body.push('\n');
            }
            (None, None) => {
                preamble.push_str(line);
                preamble.push('\n');
            }
        }
    }

    let mut lines = Vec::with_capacity(turns.len() + 1);
    if !preamble.trim().is_empty() {
        lines.push(preamble.trim().to_string());
    }
    lines.extend(turns.into_iter().map(|(prefix, body)| format!("{}: {}", prefix, body.trim())));
    lines.join("\n").trim().to_string()
}
