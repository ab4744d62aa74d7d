use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{GenerateError, Generator};

/// A scripted generator for tests. Returns pre-defined replies in order and
/// remembers every prompt it was given.
pub struct MockGenerator {
    replies: Vec<Result<String, String>>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text.
    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Always fail with the given message.
    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        // A single scripted reply repeats forever.
        let reply = match self.replies.len() {
            0 => return Err(GenerateError::Other("MockGenerator: no replies scripted".into())),
            1 => &self.replies[0],
            _ => self.replies.get(i).ok_or_else(|| {
                GenerateError::Other(format!(
                    "MockGenerator: no more replies (called {} times)",
                    i + 1
                ))
            })?,
        };
        reply.clone().map_err(GenerateError::Other)
    }
}
