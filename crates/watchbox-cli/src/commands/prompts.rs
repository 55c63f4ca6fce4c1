use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Input, Password, Select};
use watchbox_models::YearRange;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read secret: {}", e))
}

/// Pick one entry from a list, returning its index
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Parse a year typed by the user, checking it against `bounds`
pub fn parse_year_input(input: &str, bounds: YearRange) -> std::result::Result<i32, String> {
    let year = input
        .trim()
        .parse::<i32>()
        .map_err(|_| "Invalid input. Please enter a year such as 1999.".to_string())?;
    if !bounds.contains(year) {
        return Err(format!("Year must be between {} and {}.", bounds.start(), bounds.end()));
    }
    Ok(year)
}

/// Prompt for a year inside `bounds`, re-asking until the input is valid
pub fn prompt_year(prompt: &str, default: i32, bounds: YearRange, output: &Output) -> Result<i32> {
    loop {
        let input_str = Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match parse_year_input(&input_str, bounds) {
            Ok(year) => return Ok(year),
            Err(msg) => output.error(msg),
        }
    }
}

/// Prompt for both ends of a year range; the end defaults to at least the chosen start
pub fn prompt_year_range(current: YearRange, bounds: YearRange, output: &Output) -> Result<YearRange> {
    let start = prompt_year("From year", current.start(), bounds, output)?;
    let end_bounds = YearRange::new(start, bounds.end()).unwrap_or(bounds);
    let end = prompt_year("To year", current.end().max(start), end_bounds, output)?;
    YearRange::within(start, end, bounds).map_err(|e| color_eyre::eyre::eyre!("{}", e))
}
