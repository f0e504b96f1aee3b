//! Terminal implementation of the operator input capability.

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use tracing::error;

use crate::application::input::{InputReader, parse_registration};
use crate::error::AppError;

/// Reads operator input from the terminal with `dialoguer` prompts.
pub struct ConsoleInputReader {
    theme: ColorfulTheme,
}

impl ConsoleInputReader {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for ConsoleInputReader {
    fn default() -> Self {
        Self::new()
    }
}

impl InputReader for ConsoleInputReader {
    fn read_selection(&self, prompt: &str) -> i32 {
        println!("{prompt}");

        let line = Input::<String>::with_theme(&self.theme)
            .with_prompt("Selection")
            .allow_empty(true)
            .interact_text();

        match line {
            Ok(line) => line.trim().parse().unwrap_or_else(|_| {
                println!("Error reading input. Please enter valid number for proceeding further");
                -1
            }),
            Err(e) => {
                error!(error = %e, "Error while reading user input from shell");
                -1
            }
        }
    }

    fn read_vehicle_registration_number(&self) -> Result<String, AppError> {
        let line = Input::<String>::with_theme(&self.theme)
            .with_prompt("Please type the vehicle registration number and press enter key")
            .interact_text()?;

        parse_registration(&line)
    }
}
