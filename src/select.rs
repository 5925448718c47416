use inquire::{MultiSelect, Select};

/// Interactive list pickers.
pub trait Picker {
    /// Checklist of `options`, with the items at `checked` ticked.
    /// An empty result means nothing was selected.
    fn pick_many(
        &self,
        message: &str,
        options: Vec<String>,
        checked: &[usize],
    ) -> anyhow::Result<Vec<String>>;

    fn pick_one(&self, message: &str, options: Vec<String>) -> anyhow::Result<Option<String>>;
}

pub struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick_many(
        &self,
        message: &str,
        options: Vec<String>,
        checked: &[usize],
    ) -> anyhow::Result<Vec<String>> {
        // Esc skips the prompt, which counts as selecting nothing.
        let selected = MultiSelect::new(message, options)
            .with_default(checked)
            .prompt_skippable()?;
        Ok(selected.unwrap_or_default())
    }

    fn pick_one(&self, message: &str, options: Vec<String>) -> anyhow::Result<Option<String>> {
        Ok(Select::new(message, options).prompt_skippable()?)
    }
}
