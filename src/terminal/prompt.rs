use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};

/// Line-based interaction with the operator
pub trait Prompter {
    fn prompt(&mut self, prompt: &str) -> Result<String>;

    /// Input was rejected, the operator is asked again
    fn warn(&mut self, message: &str);

    fn info(&mut self, message: &str);
}

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        Ok(Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact()?)
    }

    fn warn(&mut self, message: &str) {
        println!("{}", style(message).red());
    }

    fn info(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Answers prompts from a fixed list of inputs and records everything shown to the operator
#[cfg(test)]
pub struct ScriptedPrompter {
    inputs: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|input| input.to_string()).collect(),
            prompts: vec![],
            warnings: vec![],
            infos: vec![],
        }
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No more scripted input for prompt '{prompt}'"))
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }
}
