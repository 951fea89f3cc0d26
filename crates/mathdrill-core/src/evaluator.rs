//! Answer evaluation.
//!
//! Classifies raw user input against a problem. Evaluation is pure; the
//! session decides whether a classification gets committed.

use serde::{Deserialize, Serialize};

use crate::model::{Mode, Problem};

/// Classification of a piece of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    /// Not resolved yet; the user may still be typing.
    Pending,
    Correct,
    Wrong,
}

impl AnswerStatus {
    pub fn is_resolved(self) -> bool {
        !matches!(self, AnswerStatus::Pending)
    }
}

/// Parse the numeric prefix of `raw`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so partial
/// input like `"12."` or `"3x"` still yields a value. Returns `None` when no
/// digits are present at all.
pub fn parse_answer(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it is complete.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn matches_answer(problem: &Problem, raw: &str) -> Option<bool> {
    parse_answer(raw).map(|value| value == problem.answer as f64)
}

/// Live classification of input while it is being typed.
///
/// Correct input resolves in every mode. Only fail-fast modes resolve
/// `Wrong` without an explicit submit: once the input is at least as long as
/// the answer's decimal string and still does not match. Equality is checked
/// first, so correct input of the same length is never marked wrong.
pub fn evaluate(problem: &Problem, raw: &str, mode: &Mode) -> AnswerStatus {
    if raw.is_empty() {
        return AnswerStatus::Pending;
    }
    if matches_answer(problem, raw) == Some(true) {
        return AnswerStatus::Correct;
    }
    if mode.fails_fast() && raw.chars().count() >= problem.answer_text().len() {
        return AnswerStatus::Wrong;
    }
    AnswerStatus::Pending
}

/// Classification of an explicit submit.
///
/// Any numeric input resolves; input without a number stays pending.
pub fn evaluate_submission(problem: &Problem, raw: &str) -> AnswerStatus {
    match matches_answer(problem, raw) {
        Some(true) => AnswerStatus::Correct,
        Some(false) => AnswerStatus::Wrong,
        None => AnswerStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::generator::fixed_problem;
    use crate::model::Operator;

    const MARATHON: Mode = Mode::Marathon { count: 10 };
    const SPRINT: Mode = Mode::Sprint {
        duration: Duration::from_secs(60),
    };

    #[test]
    fn parse_numeric_prefix() {
        assert_eq!(parse_answer("42"), Some(42.0));
        assert_eq!(parse_answer(" 7.0"), Some(7.0));
        assert_eq!(parse_answer("12."), Some(12.0));
        assert_eq!(parse_answer(".5"), Some(0.5));
        assert_eq!(parse_answer("3x"), Some(3.0));
        assert_eq!(parse_answer("-4"), Some(-4.0));
        assert_eq!(parse_answer("1e2"), Some(100.0));
        assert_eq!(parse_answer("1e"), Some(1.0));
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("-"), None);
        assert_eq!(parse_answer("."), None);
        assert_eq!(parse_answer("abc"), None);
    }

    #[test]
    fn numeric_not_string_equality() {
        let p = fixed_problem(3, Operator::Add, 4);
        assert_eq!(evaluate(&p, "7.0", &MARATHON), AnswerStatus::Correct);
        assert_eq!(evaluate(&p, "7", &SPRINT), AnswerStatus::Correct);
    }

    #[test]
    fn non_survival_never_resolves_wrong_live() {
        let p = fixed_problem(40, Operator::Add, 2);
        assert_eq!(evaluate(&p, "41", &MARATHON), AnswerStatus::Pending);
        assert_eq!(evaluate(&p, "4199", &SPRINT), AnswerStatus::Pending);
        assert_eq!(evaluate(&p, "", &MARATHON), AnswerStatus::Pending);
    }

    #[test]
    fn survival_resolves_wrong_at_answer_length() {
        let p = fixed_problem(40, Operator::Add, 2);
        assert_eq!(evaluate(&p, "4", &Mode::Survival), AnswerStatus::Pending);
        assert_eq!(evaluate(&p, "41", &Mode::Survival), AnswerStatus::Wrong);
        assert_eq!(evaluate(&p, "42", &Mode::Survival), AnswerStatus::Correct);
        assert_eq!(evaluate(&p, "4.", &Mode::Survival), AnswerStatus::Wrong);
    }

    #[test]
    fn survival_longer_correct_input_still_correct() {
        let p = fixed_problem(40, Operator::Add, 2);
        assert_eq!(evaluate(&p, "42.0", &Mode::Survival), AnswerStatus::Correct);
    }

    #[test]
    fn explicit_submission() {
        let p = fixed_problem(6, Operator::Mul, 7);
        assert_eq!(evaluate_submission(&p, "42"), AnswerStatus::Correct);
        assert_eq!(evaluate_submission(&p, "24"), AnswerStatus::Wrong);
        assert_eq!(evaluate_submission(&p, ""), AnswerStatus::Pending);
        assert_eq!(evaluate_submission(&p, "?"), AnswerStatus::Pending);
        assert!(AnswerStatus::Wrong.is_resolved());
        assert!(!AnswerStatus::Pending.is_resolved());
    }
}
