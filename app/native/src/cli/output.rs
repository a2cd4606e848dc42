//! CLI output formatting utilities.
//!
//! JSON syntax highlighting and small value formatters shared by the
//! commands.

use colored::{ColoredString, Colorize};

/// Prints JSON with syntax highlighting.
///
/// Colors:
/// - Keys: Cyan
/// - Strings: Green
/// - Numbers: Yellow
/// - Booleans/Null: Magenta
/// - Brackets/Braces: White (bold)
pub fn print_highlighted_json(value: &serde_json::Value) {
    let json_str = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    println!("{}", highlight_json(&json_str));
}

/// Returns `json` with ANSI colors applied to every token.
///
/// Expects pretty-printed JSON as produced by `serde_json`; whitespace is
/// preserved as-is.
#[must_use]
pub fn highlight_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len() * 2);
    let mut chars = json.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        match ch {
            '"' => {
                let mut end = json.len();
                let mut escaped = false;
                for (i, c) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        end = i + 1;
                        break;
                    }
                }

                let literal = &json[start..end];
                let is_key = json[end..].trim_start().starts_with(':');
                push(&mut out, if is_key { literal.cyan() } else { literal.green() });
            }
            '{' | '}' | '[' | ']' => push(&mut out, ch.to_string().white().bold()),
            ':' | ',' => push(&mut out, ch.to_string().white()),
            c if c.is_whitespace() => out.push(c),
            _ => {
                let mut end = start + ch.len_utf8();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || matches!(c, ',' | '}' | ']') {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }

                let scalar = &json[start..end];
                match scalar {
                    "true" | "false" | "null" => push(&mut out, scalar.magenta()),
                    _ if scalar.parse::<f64>().is_ok() => push(&mut out, scalar.yellow()),
                    _ => out.push_str(scalar),
                }
            }
        }
    }

    out
}

fn push(out: &mut String, token: ColoredString) { out.push_str(&token.to_string()); }

/// Formats a boolean as a colored string.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
