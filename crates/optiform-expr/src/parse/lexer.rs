//! Splits expression text into signed segments.

use crate::parse::term::Sign;

/// One `+`/`-` separated piece of an expression, trimmed.
///
/// `text` is empty only for a dangling trailing sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub sign: Sign,
    pub text: &'a str,
}

pub(crate) fn split_signed(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut sign = Sign::Plus;
    let mut sign_pending = false;
    let mut start = 0;

    for (idx, ch) in input.char_indices() {
        let boundary = match ch {
            '+' => Sign::Plus,
            '-' => Sign::Minus,
            _ => continue,
        };
        let pending = input[start..idx].trim();
        if continues_exponent(&input[start..idx], &input[idx + ch.len_utf8()..]) {
            continue;
        }
        if pending.is_empty() {
            // Unary run such as "- -2*x": fold into one sign.
            sign = sign.combine(boundary);
        } else {
            segments.push(Segment {
                sign,
                text: pending,
            });
            sign = boundary;
        }
        sign_pending = true;
        start = idx + ch.len_utf8();
    }

    let tail = input[start..].trim();
    if !tail.is_empty() {
        segments.push(Segment { sign, text: tail });
    } else if sign_pending {
        segments.push(Segment { sign, text: "" });
    }
    segments
}

/// True when the sign sits inside a literal like `1.5e-3`: `before` ends in
/// a mantissa and `e` with no space, and `after` starts with a digit.
fn continues_exponent(before: &str, after: &str) -> bool {
    if !after.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    let factor = before.rsplit('*').next().unwrap_or_default().trim_start();
    let Some(mantissa) = factor
        .strip_suffix('e')
        .or_else(|| factor.strip_suffix('E'))
    else {
        return false;
    };
    let digits = mantissa.chars().filter(char::is_ascii_digit).count();
    let dots = mantissa.chars().filter(|c| *c == '.').count();
    digits > 0 && dots <= 1 && digits + dots == mantissa.len()
}
