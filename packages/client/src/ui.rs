//! Terminal prompt shared between the readline thread and the session.

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

const ANONYMOUS_PROMPT: &str = "> ";

#[derive(Debug, Clone)]
pub struct Prompt(Arc<Mutex<String>>);

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(ANONYMOUS_PROMPT.to_string())))
    }

    /// Show `name> ` from now on.
    pub fn set_name(&self, name: &str) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = format!("{}> ", name);
    }

    pub fn reset(&self) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = ANONYMOUS_PROMPT.to_string();
    }

    pub fn current(&self) -> String {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Print `output` and redraw the prompt after it.
    pub fn print(&self, output: &str) {
        print!("{}", output);
        self.redisplay();
    }

    /// Redisplay the prompt after receiving a message
    pub fn redisplay(&self) {
        print!("{}", self.current());
        std::io::stdout().flush().ok();
    }
}
