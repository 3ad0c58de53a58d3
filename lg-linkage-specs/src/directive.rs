//! Parse option directives (`-` lines).
//!
//! A directive either assigns an option or calls one of a fixed set of
//! operations:
//!
//! ```text
//! -spell_guess=0
//! -display_morphology = False
//! -dialect='irish'
//! -max_null_count(2)
//! -reset()
//! ```
//!
//! Values are `True`/`False` (any case of the first letter), integers,
//! floats, and single- or double-quoted strings without escapes.

use lg_linkage::{OptionError, OptionValue, ParseOptions};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `name=value`
    Assign { name: String, value: OptionValue },
    /// `name(args)`
    Call { name: String, args: Vec<OptionValue> },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectiveError {
    #[error("malformed directive `{text}`: {reason}")]
    Syntax { text: String, reason: String },

    #[error("`{name}()` takes {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Options(#[from] OptionError),
}

impl Directive {
    /// Apply to `options`. `reset()` restores `baseline`, the options the
    /// current file started with.
    pub fn apply(
        &self,
        options: &mut ParseOptions,
        baseline: &ParseOptions,
    ) -> Result<(), DirectiveError> {
        match self {
            Directive::Assign { name, value } => options.set(name, value.clone())?,
            Directive::Call { name, args } if name == "reset" => {
                if !args.is_empty() {
                    return Err(arity(name, 0, args.len()));
                }
                *options = baseline.clone();
            }
            Directive::Call { name, args } => match args.as_slice() {
                [value] => options.set(name, value.clone())?,
                _ => {
                    // report an unknown name before a wrong argument count
                    options.get(name)?;
                    return Err(arity(name, 1, args.len()));
                }
            },
        }
        Ok(())
    }
}

fn arity(name: &str, expected: usize, found: usize) -> DirectiveError {
    DirectiveError::Arity {
        name: name.to_string(),
        expected,
        found,
    }
}

/// Parse the text after the `-` opcode.
pub fn parse_directive(text: &str) -> Result<Directive, DirectiveError> {
    let source = text.trim();
    let syntax = |reason: &str| DirectiveError::Syntax {
        text: source.to_string(),
        reason: reason.to_string(),
    };

    let name_len = source
        .char_indices()
        .find(|&(idx, c)| !(c == '_' || c.is_ascii_alphabetic() || (idx > 0 && c.is_ascii_digit())))
        .map_or(source.len(), |(idx, _)| idx);
    if name_len == 0 {
        return Err(syntax("expected an option name"));
    }
    let name = source[..name_len].to_string();
    let rest = source[name_len..].trim_start();

    if let Some(value) = strip_prefix(rest, '=') {
        let value = parse_value(value.trim()).map_err(|reason| syntax(&reason))?;
        Ok(Directive::Assign { name, value })
    } else if let Some(inner) = strip_prefix(rest, '(').and_then(|r| r.strip_suffix(')')) {
        let args = split_args(inner)
            .map_err(|reason| syntax(&reason))?
            .into_iter()
            .map(|arg| parse_value(arg).map_err(|reason| syntax(&reason)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Directive::Call { name, args })
    } else {
        Err(syntax("expected `=value` or `(args)` after the option name"))
    }
}

fn strip_prefix(text: &str, prefix: char) -> Option<&str> {
    if text.starts_with(prefix) {
        Some(&text[prefix.len_utf8()..])
    } else {
        None
    }
}

/// Split call arguments on commas outside quotes.
fn split_args(inner: &str) -> Result<Vec<&str>, String> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut args = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (idx, c) in inner.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'') | (None, '"') => quote = Some(c),
            (None, ',') => {
                args.push(inner[start..idx].trim());
                start = idx + 1;
            }
            (None, _) => {}
        }
    }
    if quote.is_some() {
        return Err("unterminated string".to_string());
    }
    args.push(inner[start..].trim());
    Ok(args)
}

fn parse_value(text: &str) -> Result<OptionValue, String> {
    match text {
        "" => return Err("missing value".to_string()),
        "True" | "true" => return Ok(OptionValue::Bool(true)),
        "False" | "false" => return Ok(OptionValue::Bool(false)),
        _ => {}
    }

    for &quote in &['\'', '"'] {
        if text.starts_with(quote) {
            let inner = text[1..]
                .strip_suffix(quote)
                .filter(|inner| !inner.contains(quote))
                .ok_or_else(|| format!("bad string literal {}", text))?;
            return Ok(OptionValue::Str(inner.to_string()));
        }
    }

    let numeric = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if numeric && text.chars().any(|c| c.is_ascii_digit()) {
        if let Ok(int) = text.parse::<i64>() {
            return Ok(OptionValue::Int(int));
        }
        if let Ok(float) = text.parse::<f64>() {
            return Ok(OptionValue::Float(float));
        }
    }
    Err(format!("unsupported value `{}`", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(name: &str, value: OptionValue) -> Directive {
        Directive::Assign {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_parse_assignments() {
        assert_eq!(
            parse_directive("spell_guess=0\n").unwrap(),
            assign("spell_guess", OptionValue::Int(0))
        );
        assert_eq!(
            parse_directive("display_morphology = False\r\n").unwrap(),
            assign("display_morphology", OptionValue::Bool(false))
        );
        assert_eq!(
            parse_directive("disjunct_cost=3.5").unwrap(),
            assign("disjunct_cost", OptionValue::Float(3.5))
        );
        assert_eq!(
            parse_directive("max_parse_time=-1").unwrap(),
            assign("max_parse_time", OptionValue::Int(-1))
        );
        assert_eq!(
            parse_directive("dialect='irish'").unwrap(),
            assign("dialect", OptionValue::Str("irish".to_string()))
        );
        assert_eq!(
            parse_directive("test=\"a,b\"").unwrap(),
            assign("test", OptionValue::Str("a,b".to_string()))
        );
    }

    #[test]
    fn test_parse_calls() {
        assert_eq!(
            parse_directive("reset()").unwrap(),
            Directive::Call {
                name: "reset".to_string(),
                args: vec![]
            }
        );
        assert_eq!(
            parse_directive("test('x, y')").unwrap(),
            Directive::Call {
                name: "test".to_string(),
                args: vec![OptionValue::Str("x, y".to_string())]
            }
        );
    }

    #[test]
    fn test_rejects_expressions() {
        for text in &[
            "",
            "=1",
            "spell_guess",
            "spell_guess=",
            "spell_guess=1+1",
            "spell_guess=os.system('x')",
            "verbosity=inf",
            "dialect='open",
            "x.y=1",
            "reset(",
        ] {
            assert!(
                matches!(parse_directive(text), Err(DirectiveError::Syntax { .. })),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_apply() {
        let baseline = ParseOptions::default();
        let mut options = baseline.clone();

        parse_directive("spell_guess=0")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap();
        assert_eq!(options.spell_guess, 0);

        parse_directive("verbosity(2)")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap();
        assert_eq!(options.verbosity, 2);

        parse_directive("reset()")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap();
        assert_eq!(options, baseline);
    }

    #[test]
    fn test_apply_errors() {
        let baseline = ParseOptions::default();
        let mut options = baseline.clone();

        let err = parse_directive("spell_gues=0")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown parse option `spell_gues`");

        let err = parse_directive("islands_ok='yes'")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap_err();
        assert!(matches!(err, DirectiveError::Options(OptionError::TypeMismatch { .. })));

        let err = parse_directive("verbosity(1, 2)")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap_err();
        assert_eq!(err.to_string(), "`verbosity()` takes 1 argument(s), found 2");

        let err = parse_directive("__import__('os')")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap_err();
        assert!(matches!(err, DirectiveError::Options(OptionError::UnknownOption(_))));

        let err = parse_directive("reset(1)")
            .unwrap()
            .apply(&mut options, &baseline)
            .unwrap_err();
        assert!(matches!(err, DirectiveError::Arity { expected: 0, .. }));
    }
}
