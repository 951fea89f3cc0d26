//! Problem generation.
//!
//! Operands are drawn so that an n-digit operand always has exactly n
//! significant digits. Subtraction never goes negative and division is
//! always exact; both are guaranteed by construction rather than by retry.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::model::{
    Mode, OperationSetting, Operator, Problem, QuizSettings, MAX_DIGITS, MIN_DIGITS,
};

/// Smallest divisor ever produced, ruling out division by 0 and 1.
pub const MIN_DIVISOR: i64 = 2;

/// Draw an operand with exactly `digits` decimal digits.
pub fn random_operand<R: Rng>(rng: &mut R, digits: u8) -> i64 {
    let digits = u32::from(digits.clamp(MIN_DIGITS, MAX_DIGITS));
    let min = 10i64.pow(digits - 1);
    let max = 10i64.pow(digits) - 1;
    rng.gen_range(min..=max)
}

/// Generate a single problem.
pub fn generate<R: Rng>(
    rng: &mut R,
    operation: OperationSetting,
    first_digits: u8,
    second_digits: u8,
) -> Problem {
    let op = match operation {
        OperationSetting::Single(op) => op,
        OperationSetting::Mixed => Operator::ALL[rng.gen_range(0..Operator::ALL.len())],
    };

    let mut num1 = random_operand(rng, first_digits);
    let mut num2 = random_operand(rng, second_digits);

    match op {
        Operator::Sub if num1 < num2 => std::mem::swap(&mut num1, &mut num2),
        Operator::Div => {
            // The dividend's size is derived from divisor * quotient, so it
            // ends up smaller than the digit settings alone suggest.
            num2 = random_operand(rng, second_digits.min(2)).max(MIN_DIVISOR);
            let quotient = random_operand(rng, first_digits.saturating_sub(1).max(1));
            num1 = num2 * quotient;
        }
        _ => {}
    }

    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();

    Problem {
        num1,
        num2,
        op,
        answer: op.apply(num1, num2),
        id,
    }
}

/// Generate the problem batch a session of `mode` starts with.
///
/// Problems are independent; duplicates are allowed.
pub fn generate_batch<R: Rng>(
    rng: &mut R,
    mode: &Mode,
    settings: &QuizSettings,
) -> Vec<Problem> {
    generate_n(rng, mode.batch_size(), settings)
}

/// Generate `n` independent problems.
pub fn generate_n<R: Rng>(rng: &mut R, n: usize, settings: &QuizSettings) -> Vec<Problem> {
    (0..n)
        .map(|_| {
            generate(
                rng,
                settings.operation,
                settings.first_digits,
                settings.second_digits,
            )
        })
        .collect()
}

/// Owned, seedable random source for problem generation.
///
/// Sessions hold one of these so they can extend their problem sequence
/// without reaching for a global RNG.
#[derive(Debug, Clone)]
pub struct ProblemGenerator {
    rng: StdRng,
}

impl ProblemGenerator {
    /// A deterministic generator; the same seed yields the same problems.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, settings: &QuizSettings) -> Problem {
        generate(
            &mut self.rng,
            settings.operation,
            settings.first_digits,
            settings.second_digits,
        )
    }

    pub fn batch(&mut self, mode: &Mode, settings: &QuizSettings) -> Vec<Problem> {
        generate_batch(&mut self.rng, mode, settings)
    }

    pub fn generate_n(&mut self, n: usize, settings: &QuizSettings) -> Vec<Problem> {
        generate_n(&mut self.rng, n, settings)
    }
}

/// A problem with fixed operands, for callers that already know the numbers.
pub fn fixed_problem(num1: i64, op: Operator, num2: i64) -> Problem {
    Problem {
        num1,
        num2,
        op,
        answer: op.apply(num1, num2),
        id: Uuid::new_v4(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModeKind, UNBOUNDED_BATCH};

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn operand_has_exact_digit_count() {
        let mut rng = seeded(1);
        for digits in 1..=3u8 {
            let low = 10i64.pow(u32::from(digits) - 1);
            let high = 10i64.pow(u32::from(digits));
            for _ in 0..500 {
                let n = random_operand(&mut rng, digits);
                assert!((low..high).contains(&n), "{n} is not {digits}-digit");
            }
        }
    }

    #[test]
    fn addition_operands_respect_digit_settings() {
        let mut rng = seeded(2);
        for _ in 0..500 {
            let p = generate(&mut rng, OperationSetting::Single(Operator::Add), 2, 3);
            assert!((10..100).contains(&p.num1));
            assert!((100..1000).contains(&p.num2));
            assert_eq!(p.answer, p.num1 + p.num2);
        }
    }

    #[test]
    fn subtraction_never_negative() {
        let mut rng = seeded(3);
        for _ in 0..1000 {
            let p = generate(&mut rng, OperationSetting::Single(Operator::Sub), 1, 3);
            assert!(p.num1 >= p.num2, "{p}");
            assert_eq!(p.answer, p.num1 - p.num2);
            assert!(p.answer >= 0);
        }
    }

    #[test]
    fn division_is_exact_with_divisor_at_least_two() {
        let mut rng = seeded(4);
        for first in 1..=3u8 {
            for second in 1..=3u8 {
                for _ in 0..300 {
                    let p = generate(
                        &mut rng,
                        OperationSetting::Single(Operator::Div),
                        first,
                        second,
                    );
                    assert!(p.num2 >= MIN_DIVISOR, "{p}");
                    assert!(p.num2 < 100, "divisor capped at two digits: {p}");
                    assert_eq!(p.num1 % p.num2, 0, "{p}");
                    assert_eq!(p.answer * p.num2, p.num1);
                }
            }
        }
    }

    #[test]
    fn division_quotient_has_one_fewer_digit() {
        let mut rng = seeded(5);
        for _ in 0..300 {
            let p = generate(&mut rng, OperationSetting::Single(Operator::Div), 3, 2);
            assert!((10..100).contains(&p.answer), "{p}");
        }
    }

    #[test]
    fn mixed_draws_every_operator() {
        let mut rng = seeded(6);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(generate(&mut rng, OperationSetting::Mixed, 2, 2).op);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn same_seed_same_sequence() {
        let settings = QuizSettings {
            operation: OperationSetting::Mixed,
            ..Default::default()
        };
        let a = ProblemGenerator::from_seed(42).generate_n(20, &settings);
        let b = ProblemGenerator::from_seed(42).generate_n(20, &settings);
        assert_eq!(a, b);
    }

    #[test]
    fn batch_size_follows_mode() {
        let settings = QuizSettings {
            count: 5,
            ..Default::default()
        };
        let mut generator = ProblemGenerator::from_seed(7);
        let marathon = Mode::from_settings(ModeKind::Marathon, &settings);
        assert_eq!(generator.batch(&marathon, &settings).len(), 5);
        let sprint = Mode::from_settings(ModeKind::Sprint, &settings);
        assert_eq!(generator.batch(&sprint, &settings).len(), UNBOUNDED_BATCH);
    }

    #[test]
    fn fixed_problem_computes_answer() {
        let p = fixed_problem(84, Operator::Div, 7);
        assert_eq!(p.answer, 12);
        assert_eq!(p.to_string(), "84 / 7");
    }
}
