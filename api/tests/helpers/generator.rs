use async_trait::async_trait;
use followup::{GenerationError, TextGenerator};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub enum Reply {
    Text(&'static str),
    Fail,
    Hang,
}

/// Language-model stand-in that plays back a fixed script and records prompts.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &'static str) -> Self {
        Self::new(vec![Reply::Text(text)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Reply::Text(text)) => Ok(text.to_string()),
            Some(Reply::Fail) => Err(GenerationError::Status {
                status: 503,
                body: "overloaded".into(),
            }),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok("too late".into())
            }
            None => Err(GenerationError::Malformed("script exhausted".into())),
        }
    }
}
