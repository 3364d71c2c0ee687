//! Procedural arithmetic problem generation.
//!
//! Each category interprets the difficulty tier its own way: addition and
//! subtraction scale operand ranges, multiplication treats the tier as a
//! times table selector, and division tier 3+ produces remainder problems.

use mq_world::Category;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::problem::Problem;

/// Generates arithmetic problems from a category and difficulty tier.
///
/// Owns its RNG so a seeded generator replays the exact same problem
/// sequence, which the tests rely on.
pub struct ProblemGenerator {
    rng: StdRng,
}

impl ProblemGenerator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic generator from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a fresh problem.
    pub fn generate(&mut self, category: Category, difficulty: u8) -> Problem {
        match category {
            Category::Addition => self.addition(difficulty),
            Category::Subtraction => self.subtraction(difficulty),
            Category::Multiplication => self.multiplication(difficulty),
            Category::Division => self.division(difficulty),
        }
    }

    /// Pick one line from a flavour-text pool.
    pub(crate) fn line<'a>(&mut self, pool: &'a [&'a str]) -> &'a str {
        pool[self.rng.random_range(0..pool.len())]
    }

    // Tier 1 stays within 5+5, tier 2 within 10+10, tier 3+ adds whole tens.
    fn addition(&mut self, difficulty: u8) -> Problem {
        let (a, b, hint) = match difficulty {
            0 | 1 => (
                self.rng.random_range(1..=5),
                self.rng.random_range(1..=5),
                "Count on your fingers if you need to!",
            ),
            2 => (
                self.rng.random_range(1..=10),
                self.rng.random_range(1..=10),
                "Start from the bigger number and count up!",
            ),
            _ => (
                10 * self.rng.random_range(1..=5),
                10 * self.rng.random_range(1..=4),
                "Think in tens!",
            ),
        };
        Problem {
            question: format!("What is {a} + {b}?"),
            answer: (a + b).to_string(),
            category: Category::Addition,
            difficulty,
            hint: hint.to_string(),
            method: format!("{a} + {b} = {}\nJust count the numbers together!", a + b),
        }
    }

    // Tier 1 stays within 10, tier 2 within 20, tier 3+ subtracts whole tens.
    // The result is always positive.
    fn subtraction(&mut self, difficulty: u8) -> Problem {
        let (a, b, hint) = match difficulty {
            0 | 1 => {
                let a = self.rng.random_range(3..=10);
                let b = self.rng.random_range(1..=a - 1);
                (a, b, "Start at the big number and count backwards!")
            }
            2 => {
                let a = self.rng.random_range(11..=20);
                let b = self.rng.random_range(2..=a - 1);
                (a, b, "Break it into steps if that helps!")
            }
            _ => {
                let a = 10 * self.rng.random_range(5..=10);
                let b = 10 * self.rng.random_range(1..=4);
                let b = if b >= a { a - 10 } else { b };
                (a, b, "Think in tens!")
            }
        };
        Problem {
            question: format!("What is {a} - {b}?"),
            answer: (a - b).to_string(),
            category: Category::Subtraction,
            difficulty,
            hint: hint.to_string(),
            method: format!(
                "{a} - {b} = {}\nStart at {a} and count {b} steps backwards!",
                a - b
            ),
        }
    }

    fn multiplication(&mut self, difficulty: u8) -> Problem {
        // Tiers 0-10 pin the times table; anything else mixes tables 2-10.
        let table = match difficulty {
            0..=10 => u32::from(difficulty),
            _ => self.rng.random_range(2..=10),
        };
        // The zero and one tables may include zero as the other factor.
        let other = if table <= 1 {
            self.rng.random_range(0..=10)
        } else {
            self.rng.random_range(1..=10)
        };
        // Present the factors in either order.
        let (a, b) = if self.rng.random_bool(0.5) {
            (table, other)
        } else {
            (other, table)
        };
        let hint = match table {
            0 => "Anything times zero is... what?".to_string(),
            1 => "Anything times one stays itself!".to_string(),
            _ => format!("Think of the {table} times table!"),
        };
        Problem {
            question: format!("What is {a} × {b}?"),
            answer: (a * b).to_string(),
            category: Category::Multiplication,
            difficulty,
            hint,
            method: format!(
                "{a} × {b} = {}\nThat's {a} added together {b} times!",
                a * b
            ),
        }
    }

    fn division(&mut self, difficulty: u8) -> Problem {
        if difficulty >= 3 {
            return self.division_with_remainder(difficulty);
        }
        // Easy tier sticks to the friendliest tables.
        const EASY_DIVISORS: [u32; 3] = [2, 5, 10];
        let divisor = if difficulty <= 1 {
            EASY_DIVISORS[self.rng.random_range(0..EASY_DIVISORS.len())]
        } else {
            self.rng.random_range(2..=10)
        };
        let quotient = self.rng.random_range(1..=10);
        let dividend = divisor * quotient;
        Problem {
            question: format!("What is {dividend} ÷ {divisor}?"),
            answer: quotient.to_string(),
            category: Category::Division,
            difficulty,
            hint: format!("Think: what times {divisor} makes {dividend}?"),
            method: format!(
                "{dividend} ÷ {divisor} = {quotient}\nBecause {quotient} × {divisor} = {dividend}!"
            ),
        }
    }

    fn division_with_remainder(&mut self, difficulty: u8) -> Problem {
        let divisor = self.rng.random_range(2..=5);
        let quotient = self.rng.random_range(2..=9);
        let remainder = self.rng.random_range(1..=divisor - 1);
        let dividend = divisor * quotient + remainder;
        Problem {
            question: format!(
                "What is {dividend} ÷ {divisor}? (Answer with a remainder, like '5 rest 2')"
            ),
            answer: format!("{quotient} rest {remainder}"),
            category: Category::Division,
            difficulty,
            hint: format!("How many whole times does {divisor} go into {dividend}?"),
            method: format!(
                "{dividend} ÷ {divisor} = {quotient} rest {remainder}\nBecause {quotient} × {divisor} = {} and {} + {remainder} = {dividend}!",
                divisor * quotient,
                divisor * quotient
            ),
        }
    }
}

impl Default for ProblemGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers;

    fn split_terms(question: &str, op: char) -> (u32, u32) {
        let body = question
            .trim_start_matches("What is ")
            .split('?')
            .next()
            .unwrap();
        let mut parts = body.split(op);
        let a = parts.next().unwrap().trim().parse().unwrap();
        let b = parts.next().unwrap().trim().parse().unwrap();
        (a, b)
    }

    #[test]
    fn seeded_generators_replay_the_same_sequence() {
        let mut left = ProblemGenerator::seeded(7);
        let mut right = ProblemGenerator::seeded(7);
        for _ in 0..20 {
            let a = left.generate(Category::Addition, 3);
            let b = right.generate(Category::Addition, 3);
            assert_eq!(a.question, b.question);
            assert_eq!(a.answer, b.answer);
        }
    }

    #[test]
    fn addition_tiers_scale_operands() {
        let mut generator = ProblemGenerator::seeded(1);
        for _ in 0..50 {
            let (a, b) = split_terms(&generator.generate(Category::Addition, 1).question, '+');
            assert!((1..=5).contains(&a));
            assert!((1..=5).contains(&b));
            let (a, b) = split_terms(&generator.generate(Category::Addition, 2).question, '+');
            assert!((1..=10).contains(&a));
            assert!((1..=10).contains(&b));
            let (a, b) = split_terms(&generator.generate(Category::Addition, 3).question, '+');
            assert!((10..=50).contains(&a) && a % 10 == 0);
            assert!((10..=40).contains(&b) && b % 10 == 0);
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let mut generator = ProblemGenerator::seeded(2);
        for tier in [1, 2, 3, 9] {
            for _ in 0..50 {
                let problem = generator.generate(Category::Subtraction, tier);
                let (a, b) = split_terms(&problem.question, '-');
                assert!(a > b, "{} must stay positive", problem.question);
                assert_eq!(problem.answer, (a - b).to_string());
            }
        }
    }

    #[test]
    fn multiplication_tier_pins_the_times_table() {
        let mut generator = ProblemGenerator::seeded(3);
        for _ in 0..50 {
            let problem = generator.generate(Category::Multiplication, 7);
            let (a, b) = split_terms(&problem.question, '×');
            assert!(a == 7 || b == 7, "{} should use the 7 table", problem.question);
            assert_eq!(problem.answer, (a * b).to_string());
        }
    }

    #[test]
    fn multiplication_zero_tier_answers_zero() {
        let mut generator = ProblemGenerator::seeded(4);
        for _ in 0..20 {
            let problem = generator.generate(Category::Multiplication, 0);
            assert_eq!(problem.answer, "0");
        }
    }

    #[test]
    fn multiplication_one_tier_answers_the_other_factor() {
        let mut generator = ProblemGenerator::seeded(10);
        for _ in 0..20 {
            let problem = generator.generate(Category::Multiplication, 1);
            let (a, b) = split_terms(&problem.question, '×');
            assert_eq!(problem.answer, (a * b).to_string());
            assert!(a == 1 || b == 1 || problem.answer == "0");
        }
    }

    #[test]
    fn easy_division_divides_evenly() {
        let mut generator = ProblemGenerator::seeded(5);
        for tier in [1, 2] {
            for _ in 0..50 {
                let problem = generator.generate(Category::Division, tier);
                let (a, b) = split_terms(&problem.question, '÷');
                assert_eq!(a % b, 0, "{} should divide evenly", problem.question);
                assert_eq!(problem.answer, (a / b).to_string());
            }
        }
    }

    #[test]
    fn remainder_division_has_a_nonzero_remainder() {
        let mut generator = ProblemGenerator::seeded(6);
        for _ in 0..50 {
            let problem = generator.generate(Category::Division, 3);
            assert!(problem.answer.contains("rest"));
            let mut parts = problem.answer.split(" rest ");
            let quotient: u32 = parts.next().unwrap().parse().unwrap();
            let remainder: u32 = parts.next().unwrap().parse().unwrap();
            assert!(remainder > 0);
            // The generated answer accepts itself.
            assert!(answers::check(&format!("{quotient} rest {remainder}"), &problem.answer));
        }
    }

    #[test]
    fn line_picks_from_the_pool() {
        let mut generator = ProblemGenerator::seeded(8);
        let pool = ["a", "b", "c"];
        for _ in 0..10 {
            assert!(pool.contains(&generator.line(&pool)));
        }
    }
}
