//! Wraps the user's text in an instruction chosen by the submitted task.

const QUESTION_PREFIX: &str = "Please answer the following question: ";
const SUMMARIZE_PREFIX: &str = "Please provide a concise summary of the following text: ";
const CREATIVE_PREFIX: &str = "Write a short, creative piece inspired by this topic: ";

/// The operations the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Question,
    Summarize,
    Creative,
}

impl Task {
    /// Match a submitted task value exactly. Anything unrecognised is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "question" => Some(Self::Question),
            "summarize" => Some(Self::Summarize),
            "creative" => Some(Self::Creative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Summarize => "summarize",
            Self::Creative => "creative",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::Question => QUESTION_PREFIX,
            Self::Summarize => SUMMARIZE_PREFIX,
            Self::Creative => CREATIVE_PREFIX,
        }
    }

    pub fn prompt(&self, user_input: &str) -> String {
        format!("{}{}", self.prefix(), user_input)
    }
}

/// Build the prompt sent to the model. Unknown tasks pass the input through untouched.
pub fn build_prompt(task: &str, user_input: &str) -> String {
    match Task::parse(task) {
        Some(task) => task.prompt(user_input),
        None => user_input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt() {
        assert_eq!(
            build_prompt("question", "What is 2+2?"),
            "Please answer the following question: What is 2+2?"
        );
    }

    #[test]
    fn summarize_prompt() {
        assert_eq!(
            build_prompt("summarize", "A long text."),
            "Please provide a concise summary of the following text: A long text."
        );
    }

    #[test]
    fn creative_prompt() {
        assert_eq!(
            build_prompt("creative", "the sea"),
            "Write a short, creative piece inspired by this topic: the sea"
        );
    }

    #[test]
    fn unknown_task_passes_input_through() {
        assert_eq!(build_prompt("translate", "bonjour"), "bonjour");
        assert_eq!(build_prompt("", "bonjour"), "bonjour");
    }

    #[test]
    fn task_match_is_case_sensitive() {
        assert_eq!(Task::parse("Question"), None);
        assert_eq!(build_prompt("QUESTION", "hi"), "hi");
    }

    #[test]
    fn input_is_not_sanitised() {
        let input = "  <script>alert(1)</script>\n{{ response }}  ";
        assert_eq!(
            build_prompt("question", input),
            format!("{QUESTION_PREFIX}{input}")
        );
        assert_eq!(build_prompt("other", input), input);
    }

    #[test]
    fn empty_input_keeps_prefix() {
        assert_eq!(build_prompt("creative", ""), CREATIVE_PREFIX);
    }

    #[test]
    fn parse_round_trips_names() {
        for task in [Task::Question, Task::Summarize, Task::Creative] {
            assert_eq!(Task::parse(task.as_str()), Some(task));
        }
    }
}
