//! Knot format reference and prompt text.
//!
//! # Overview
//!
//! Knot flattens nested data into one `key value` pair per line. Producing
//! it takes far fewer tokens than JSON or YAML, and models that have never
//! been tuned for structured output emit it reliably.
//!
//! ```text
//! user.name "Cansu"
//! user.age 25
//! user.location "Istanbul"
//! conversation.topics ["politics" "sports" "technology"]
//! ```
//!
//! # Keys
//!
//! Segments of letters, digits and `_`, joined by `.`. Each segment names one
//! level of nesting: `user.age` is the field `age` inside `user`.
//!
//! # Values
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | String | double quotes, `\` takes the next character literally | `"say \"hi\""` |
//! | Number | optional `-`, digits, optional fraction and `e` exponent | `-10.5`, `2e-3` |
//! | Boolean | `true` / `false`, any case | `TRUE` |
//! | Collection | scalars in `[]`, separated by spaces or commas | `[1 "a" true]` |
//!
//! Numbers are always read as `f64`. Collections do not nest.
//!
//! # Enums (extended grammar)
//!
//! A `|`-separated list of keys, e.g. `light.sunrise | light.sunset | dark`.
//! Schema tooling uses it to describe allowed values; it is parsed with
//! [`parse_enum`](crate::parse_enum) and never appears in documents.
//!
//! # Rules enforced by default
//!
//! - one datum per line
//! - no empty key segments (`a..b`)
//! - one separator style per collection
//! - a path is either a value or a branch, never both
//!
//! See [`ParseOptions`](crate::ParseOptions) to relax the first three.

/// Returns instructions that teach a language model to answer in Knot.
///
/// Append the text to a prompt; parse the reply with
/// [`from_str`](crate::from_str) or [`parse_node`](crate::parse_node).
///
/// # Examples
///
/// ```rust
/// use serde_knot::format::formatting_instructions;
///
/// let prompt = format!("List three hobbies.\n{}", formatting_instructions());
/// assert!(prompt.contains("Knot"));
/// ```
#[must_use]
pub fn formatting_instructions() -> &'static str {
    INSTRUCTIONS
}

const INSTRUCTIONS: &str = r#"Output Formatting Instructions:
    Format your output with Knot, a lightweight key-value format.
    Knot flattens objects into key-value pairs, one pair per line.

- Keys: dot separated names made of letters, digits and underscores.
    - Examples: user.name user.age user.is_premium_member hobbies settings.theme

- Values:
    - String: enclosed in double quotes. Use a backslash before a quote or backslash inside the string.
        - Examples: "hello" "hello \"world\""
    - Number: integer, decimal or scientific notation, positive or negative.
        - Examples: 1 -10.5 2e-3
    - Boolean:
        - Examples: true false
    - Collection: strings, numbers or booleans in square brackets, separated by spaces. Collections cannot be nested.
        - Examples: [1 2 3] ["a" "b"] [true 1 "a"]

Separate each key from its value with a single space. Put each key-value pair on its own line.
Never use the same key both for a value and as the start of a longer key.

Example Knot output:
    user.name "John Doe"
    user.age 25
    user.is_premium_member true
    hobbies ["coding" "reading" "swimming"]
    topics ["politics" "sports" "technology"]
    settings.theme "dark"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_example_parses() {
        let example = INSTRUCTIONS
            .split("Example Knot output:")
            .nth(1)
            .unwrap_or_default();
        let root = crate::parse_node(example).unwrap();
        assert_eq!(root["user"]["name"].as_str(), Some("John Doe"));
        assert_eq!(root["hobbies"].iter().count(), 3);
    }
}
