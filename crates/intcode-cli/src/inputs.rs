use intcode_core::Word;

/// Parses a comma-separated list of input values.
///
/// Blank input yields an empty list, which makes the first input
/// instruction fault.
///
/// # Errors
///
/// Returns a message naming the first token that is not an integer.
pub fn parse_input_list(list: &str) -> Result<Vec<Word>, String> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    list.split(',')
        .map(str::trim)
        .map(|token| {
            token
                .parse::<Word>()
                .map_err(|_| format!("invalid input value: {token:?}"))
        })
        .collect()
}
