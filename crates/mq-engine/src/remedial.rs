//! The Math Beast, a remedial tutor dressed up as an ambush.
//!
//! After two wrong answers in a row on one challenge problem, the beast
//! interrupts, demonstrates the worked method for the failed problem, and
//! demands the player solve a fresh problem of the same shape before the
//! original challenge resumes.

use crate::answers;
use crate::generator::ProblemGenerator;
use crate::problem::Problem;

/// Consecutive wrong answers before the beast appears.
pub const APPEAR_AFTER: u32 = 2;

/// Practice attempts before the beast gives up and reveals the answer.
pub const MAX_ATTEMPTS: u32 = 3;

const GREETINGS: &[&str] = &[
    "\"Stuck, are we? How DELIGHTFUL!\"",
    "\"I smell a struggling mathematician!\"",
    "\"Two wrong answers? That rings the dinner bell!\"",
    "\"Oh dear, oh dear. Someone needs a LESSON!\"",
];

const LAUGHS: &[&str] = &["MUAHAHA!", "BWAHAHA!", "Heeheehee!", "MWEHEHE!"];

const SUCCESS_LINES: &[&str] = &[
    "\"WHAT?! You got it RIGHT?!\"",
    "\"Impossible! Nobody escapes my lesson!\"",
    "\"Hmpf. Lucky guess. LUCKY GUESS!\"",
];

const FAILURE_LINES: &[&str] = &[
    "\"Wrong again! Scrumptious!\"",
    "\"Is that your best? Think harder!\"",
    "\"No no NO! Look at the method again!\"",
];

/// One live appearance of the Math Beast.
#[derive(Debug)]
pub struct RemedialEncounter {
    practice: Problem,
    attempts: u32,
}

/// What a practice answer did to the encounter.
#[derive(Debug)]
pub enum RemedialOutcome {
    /// The practice problem was solved; the encounter is over.
    Solved(String),
    /// All attempts were spent; the encounter is over and the answer revealed.
    Exhausted(String),
    /// The answer was wrong but attempts remain.
    Retry(String),
}

impl RemedialEncounter {
    /// Whether an error streak is long enough to summon the beast.
    pub fn should_appear(consecutive_errors: u32) -> bool {
        consecutive_errors >= APPEAR_AFTER
    }

    /// Summon the beast over a failed problem.
    ///
    /// Returns the encounter and its full introduction: the entrance, the
    /// worked method for the failed problem, and the practice question.
    pub fn begin(failed: &Problem, generator: &mut ProblemGenerator) -> (Self, String) {
        let practice = generator.generate(failed.category, failed.difficulty);
        let laugh = generator.line(LAUGHS);
        let greeting = generator.line(GREETINGS);
        let intro = format!(
            "\n*** A shadow falls over you... THE MATH BEAST APPEARS! ***\n\
             {laugh}\n\
             {greeting}\n\
             \"Watch closely, I'll only show you ONCE:\"\n\n\
             {}\n\n\
             \"Got it? GOOD! Now YOU solve one:\"\n\
             {}",
            failed.method, practice.question
        );
        (
            Self {
                practice,
                attempts: 0,
            },
            intro,
        )
    }

    /// The practice question currently on the table.
    pub fn practice_question(&self) -> &str {
        &self.practice.question
    }

    /// Judge one practice answer.
    pub fn check_answer(
        &mut self,
        answer: &str,
        generator: &mut ProblemGenerator,
    ) -> RemedialOutcome {
        self.attempts += 1;
        if answers::check(answer, &self.practice.answer) {
            let line = generator.line(SUCCESS_LINES);
            return RemedialOutcome::Solved(format!(
                "{line}\nThe Math Beast vanishes in a puff of chalk dust!"
            ));
        }
        if self.attempts >= MAX_ATTEMPTS {
            return RemedialOutcome::Exhausted(format!(
                "\"Fine, FINE! The answer was {}. Remember it!\"\n\
                 The Math Beast stomps off, grumbling.",
                self.practice.answer
            ));
        }
        let laugh = generator.line(LAUGHS);
        let line = generator.line(FAILURE_LINES);
        let left = MAX_ATTEMPTS - self.attempts;
        RemedialOutcome::Retry(format!(
            "{laugh} {line}\n\
             Hint: {}\n\
             Try again ({left} attempt{} left): {}",
            self.practice.hint,
            if left == 1 { "" } else { "s" },
            self.practice.question
        ))
    }
}
