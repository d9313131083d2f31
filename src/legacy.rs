//! Maps written by the first, Python, version of the tool are the `str()` of
//! nested lists and dicts: single-quoted strings, ints, `[...]` and `{...}`.
//! This rewrites that subset into JSON so serde_json can read it.

use std::str::Chars;

use crate::errors::{Error, Result};

pub fn python_literal_to_json(text: &str) -> Result<String> {
    let mut json = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => read_string(c, &mut chars, &mut json)?,
            _ => json.push(c),
        }
    }
    Ok(json)
}

fn read_string(quote: char, chars: &mut Chars, json: &mut String) -> Result<()> {
    json.push('"');
    loop {
        let c = chars
            .next()
            .ok_or_else(|| Error::parse("unterminated string in map literal"))?;
        match c {
            c if c == quote => break,
            '"' => json.push_str("\\\""),
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| Error::parse("unterminated escape in map literal"))?;
                match escaped {
                    '\'' => json.push('\''),
                    '"' | '\\' | '/' | 'n' | 't' | 'r' | 'b' | 'f' => {
                        json.push('\\');
                        json.push(escaped);
                    }
                    // Same meaning in both languages, surrogate pairs included.
                    'u' => {
                        let digits = hex_digits(chars, 4)?;
                        json.push_str("\\u");
                        json.push_str(&digits);
                    }
                    'x' => push_code_point(&hex_digits(chars, 2)?, json)?,
                    'U' => push_code_point(&hex_digits(chars, 8)?, json)?,
                    other => {
                        return Err(Error::parse(format!(
                            "unsupported escape \\{} in map literal",
                            other
                        )))
                    }
                }
            }
            c => json.push(c),
        }
    }
    json.push('"');
    Ok(())
}

fn hex_digits(chars: &mut Chars, count: usize) -> Result<String> {
    let digits: String = chars.by_ref().take(count).collect();
    if digits.len() != count || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::parse(format!("bad escape digits {:?} in map literal", digits)));
    }
    Ok(digits)
}

fn push_code_point(digits: &str, json: &mut String) -> Result<()> {
    let code = u32::from_str_radix(digits, 16)?;
    let c = char::from_u32(code).ok_or_else(|| {
        Error::parse(format!("invalid character code {} in map literal", digits))
    })?;
    if c.is_control() {
        json.push_str(&format!("\\u{:04x}", code));
    } else {
        json.push(c);
    }
    Ok(())
}
