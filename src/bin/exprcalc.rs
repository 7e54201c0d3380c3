//! Standalone infix/postfix/prefix expression calculator. Reads one
//! whitespace-tokenized infix expression from stdin (digits, + - *, parens)
//! and prints both conversions with their evaluated results. Not wired into
//! the habit tracker.

use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};

fn precedence(op: &str) -> u8 {
    match op {
        "+" | "-" => 1,
        "*" => 2,
        _ => 0,
    }
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Shunting-yard conversion of a tokenized infix expression to postfix.
pub fn infix_to_postfix(infix: &str) -> Result<Vec<String>> {
    let mut stack: Vec<String> = Vec::new();
    let mut output = Vec::new();

    for token in infix.split_whitespace() {
        if is_number(token) {
            output.push(token.to_string());
        } else if token == "(" {
            stack.push(token.to_string());
        } else if token == ")" {
            loop {
                match stack.pop() {
                    Some(top) if top == "(" => break,
                    Some(top) => output.push(top),
                    None => return Err(anyhow!("Unbalanced ')'")),
                }
            }
        } else if precedence(token) > 0 {
            while let Some(top) = stack.pop() {
                if precedence(&top) >= precedence(token) {
                    output.push(top);
                } else {
                    stack.push(top);
                    break;
                }
            }
            stack.push(token.to_string());
        } else {
            return Err(anyhow!("Unknown token '{}'", token));
        }
    }

    while let Some(top) = stack.pop() {
        if top == "(" {
            return Err(anyhow!("Unbalanced '('"));
        }
        output.push(top);
    }
    Ok(output)
}

/// Prefix via the reversal trick: flip the expression and its parens,
/// convert to postfix, then reverse the result.
pub fn infix_to_prefix(infix: &str) -> Result<Vec<String>> {
    let reversed: Vec<String> = infix
        .split_whitespace()
        .rev()
        .map(|t| match t {
            "(" => ")".to_string(),
            ")" => "(".to_string(),
            other => other.to_string(),
        })
        .collect();

    let mut prefix = infix_to_postfix(&reversed.join(" "))?;
    prefix.reverse();
    Ok(prefix)
}

fn apply(op: &str, a: i64, b: i64) -> Result<i64> {
    match op {
        "+" => Ok(a + b),
        "-" => Ok(a - b),
        "*" => Ok(a * b),
        _ => Err(anyhow!("Unknown operator '{}'", op)),
    }
}

pub fn evaluate_postfix(tokens: &[String]) -> Result<i64> {
    let mut stack: Vec<i64> = Vec::new();

    for token in tokens {
        if is_number(token) {
            stack.push(token.parse()?);
        } else {
            let b = stack.pop().ok_or_else(|| anyhow!("Operator '{}' missing operand", token))?;
            let a = stack.pop().ok_or_else(|| anyhow!("Operator '{}' missing operand", token))?;
            stack.push(apply(token, a, b)?);
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(anyhow!("Malformed expression")),
    }
}

pub fn evaluate_prefix(tokens: &[String]) -> Result<i64> {
    let mut stack: Vec<i64> = Vec::new();

    for token in tokens.iter().rev() {
        if is_number(token) {
            stack.push(token.parse()?);
        } else {
            let a = stack.pop().ok_or_else(|| anyhow!("Operator '{}' missing operand", token))?;
            let b = stack.pop().ok_or_else(|| anyhow!("Operator '{}' missing operand", token))?;
            stack.push(apply(token, a, b)?);
        }
    }

    match stack.as_slice() {
        [result] => Ok(*result),
        _ => Err(anyhow!("Malformed expression")),
    }
}

fn main() -> Result<()> {
    print!("Enter an infix expression (tokens separated by spaces): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let infix = line.trim();

    let postfix = infix_to_postfix(infix)?;
    let prefix = infix_to_prefix(infix)?;

    println!("Postfix: {}", postfix.join(" "));
    println!("Prefix:  {}", prefix.join(" "));
    println!("Postfix evaluates to: {}", evaluate_postfix(&postfix)?);
    println!("Prefix evaluates to:  {}", evaluate_prefix(&prefix)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn postfix_respects_precedence() {
        let postfix = infix_to_postfix("2 + 3 * 4").unwrap();
        assert_eq!(postfix, tokens("2 3 4 * +"));
        assert_eq!(evaluate_postfix(&postfix).unwrap(), 14);
    }

    #[test]
    fn parens_override_precedence() {
        let postfix = infix_to_postfix("( 2 + 3 ) * 4").unwrap();
        assert_eq!(postfix, tokens("2 3 + 4 *"));
        assert_eq!(evaluate_postfix(&postfix).unwrap(), 20);
    }

    #[test]
    fn prefix_round_trips_through_reversal() {
        let prefix = infix_to_prefix("2 + 3 * 4").unwrap();
        assert_eq!(prefix, tokens("+ 2 * 3 4"));
        assert_eq!(evaluate_prefix(&prefix).unwrap(), 14);
    }

    #[test]
    fn subtraction_keeps_operand_order() {
        let postfix = infix_to_postfix("9 - 4 - 2").unwrap();
        assert_eq!(evaluate_postfix(&postfix).unwrap(), 3);

        let prefix = infix_to_prefix("9 - 4").unwrap();
        assert_eq!(evaluate_prefix(&prefix).unwrap(), 5);
    }

    #[test]
    fn unbalanced_parens_are_rejected() {
        assert!(infix_to_postfix("( 1 + 2").is_err());
        assert!(infix_to_postfix("1 + 2 )").is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(infix_to_postfix("1 & 2").is_err());
        assert!(evaluate_postfix(&tokens("1 +")).is_err());
    }
}
