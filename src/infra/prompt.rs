use crate::domain::{Prompter, TextValidator};
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, message: &str, validate: TextValidator<'_>) -> Result<String> {
        let value = Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .validate_with(|input: &String| validate(input.trim()))
            .interact_text()
            .with_context(|| format!("lendo resposta para '{message}'"))?;

        Ok(value.trim().to_string())
    }

    fn select(&self, message: &str, options: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact()
            .with_context(|| format!("lendo seleção para '{message}'"))
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .with_context(|| format!("lendo confirmação para '{message}'"))
    }
}
