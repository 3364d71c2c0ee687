//! Challenge answering: puzzles, battle rounds, the calculator shortcut,
//! and the debt it creates.
//!
//! All three answering modes share the same tolerant validator and the same
//! escape words. The calculator reveals the answer and resolves the whole
//! challenge, but records a debt; the next battle or puzzle attempt is
//! redirected to a debt problem of the same shape, which must be faced
//! without help.

use mq_world::Monster;

use crate::answers;
use crate::combat::battle_seconds;
use crate::remedial::{RemedialEncounter, RemedialOutcome};
use crate::session::{ActiveChallenge, ChallengeSource, Engine, Mode, PendingAction};

/// Words that walk away from a challenge.
const ABANDON_TOKENS: &[&str] = &["give up", "giveup", "abandon", "forfeit"];

/// Words that invoke the calculator on the current problem.
const CALCULATOR_TOKENS: &[&str] = &["calculator", "calc"];

/// Wrong debt answers allowed before the debt is forgiven.
const MAX_DEBT_ATTEMPTS: u32 = 5;

/// XP for paying off a calculator debt.
const DEBT_REWARD_XP: u32 = 10;

/// Fallback rewards when a challenge outlives its room content.
const DEFAULT_REWARD_XP: u32 = 25;
const DEFAULT_REWARD_GOLD: u32 = 10;

impl Engine {
    /// Start the room's puzzle, or collect a debt first.
    pub(crate) fn solve(&mut self) {
        let present = self
            .world
            .room(&self.player.current_room)
            .is_some_and(|room| room.puzzle.is_some());
        if !present {
            self.io.print("There is no puzzle here.");
            return;
        }
        if self.player.has_debt() {
            self.pending = Some(PendingAction::Solve);
            self.start_debt();
            return;
        }
        self.begin_puzzle();
    }

    /// Enter challenge mode on the current room's puzzle. Puzzles are untimed.
    pub(crate) fn begin_puzzle(&mut self) {
        let Some(puzzle) = self
            .world
            .room(&self.player.current_room)
            .and_then(|room| room.puzzle.clone())
        else {
            return;
        };
        self.timer.reset();
        let problem = self.generator.generate(puzzle.category, puzzle.difficulty);
        self.io
            .print(&format!("\n{}\n\n{}", puzzle.description, problem.question));
        self.player.challenge_errors = 0;
        self.mode = Mode::Challenge(ActiveChallenge {
            problem,
            source: ChallengeSource::Puzzle,
        });
    }

    /// Handle one line while a challenge problem is on the table.
    pub(crate) fn challenge_input(&mut self, answer: &str) {
        let Mode::Challenge(active) = std::mem::replace(&mut self.mode, Mode::Free) else {
            return;
        };

        // A passed deadline beats whatever was typed.
        if self.timer.poll_expired() {
            self.timer.reset();
            self.io.print("TIME'S UP! That counts as a miss.");
            self.wrong_answer(active);
            return;
        }

        if answer.is_empty() {
            let mut text = format!("({})", active.problem.question);
            if let Some(seconds) = self.timer.remaining_secs() {
                text.push_str(&format!(" {seconds} seconds left!"));
            }
            self.io.print(&text);
            self.mode = Mode::Challenge(active);
            return;
        }

        if ABANDON_TOKENS.contains(&answer) {
            self.timer.reset();
            self.player.challenge_errors = 0;
            self.io.print(match active.source {
                ChallengeSource::Battle { .. } => {
                    "You back away from the fight. The monster snorts triumphantly."
                }
                ChallengeSource::Puzzle => "You step back from the puzzle. It will wait.",
            });
            return;
        }

        if CALCULATOR_TOKENS.contains(&answer) {
            self.use_calculator(active);
            return;
        }

        if answers::check(answer, &active.problem.answer) {
            self.correct_answer(active);
        } else {
            self.wrong_answer(active);
        }
    }

    fn correct_answer(&mut self, active: ActiveChallenge) {
        match active.source {
            ChallengeSource::Battle { wins } => {
                let monster = self
                    .world
                    .room(&self.player.current_room)
                    .and_then(|room| room.monster.clone());
                let Some(monster) = monster else {
                    self.timer.reset();
                    self.io.print("Your opponent is gone. You win by default!");
                    self.grant_rewards(DEFAULT_REWARD_XP, DEFAULT_REWARD_GOLD);
                    return;
                };
                let wins = wins + 1;
                if wins < monster.required_wins {
                    let problem = self
                        .generator
                        .generate(monster.category, monster.difficulty);
                    let mut text = format!(
                        "Correct! ({wins}/{})\n\n{}",
                        monster.required_wins, problem.question
                    );
                    if let Some(seconds) = self.timer.remaining_secs() {
                        text.push_str(&format!("\n{seconds} seconds left!"));
                    }
                    self.io.print(&text);
                    self.player.challenge_errors = 0;
                    self.mode = Mode::Challenge(ActiveChallenge {
                        problem,
                        source: ChallengeSource::Battle { wins },
                    });
                } else {
                    self.finish_battle(monster);
                }
            }
            ChallengeSource::Puzzle => self.finish_puzzle(),
        }
    }

    fn finish_battle(&mut self, monster: Monster) {
        self.timer.reset();
        self.io.print(&format!(
            "\n*** VICTORY! ***\n{}",
            monster.defeat_message
        ));
        let here = self.player.current_room.clone();
        self.world.remove_monster(&here);
        self.grant_rewards(monster.reward_xp, monster.reward_gold);
    }

    fn finish_puzzle(&mut self) {
        let here = self.player.current_room.clone();
        let puzzle = self.world.room(&here).and_then(|room| room.puzzle.clone());
        let Some(puzzle) = puzzle else {
            self.io.print("Solved!");
            self.grant_rewards(DEFAULT_REWARD_XP, DEFAULT_REWARD_GOLD);
            return;
        };
        self.io.print("\n*** SOLVED! ***");
        self.player.mark_puzzle_solved(&puzzle.id);
        self.world.remove_puzzle(&here);
        self.grant_rewards(puzzle.reward_xp, puzzle.reward_gold);
    }

    fn wrong_answer(&mut self, active: ActiveChallenge) {
        self.player.challenge_errors += 1;
        self.player.wrong_answers += 1;

        if RemedialEncounter::should_appear(self.player.challenge_errors) {
            self.timer.reset();
            let (encounter, intro) =
                RemedialEncounter::begin(&active.problem, &mut self.generator);
            self.io.print(&format!("Wrong!\n{intro}"));
            self.mode = Mode::Remedial {
                encounter,
                suspended: active,
            };
            return;
        }

        let mut text = format!(
            "Wrong! Come on, you've got this!\nHint: {}\n{}",
            active.problem.hint, active.problem.question
        );
        if let Some(seconds) = self.timer.remaining_secs() {
            text.push_str(&format!("\n{seconds} seconds left!"));
        }
        self.io.print(&text);
        self.mode = Mode::Challenge(active);
    }

    fn use_calculator(&mut self, active: ActiveChallenge) {
        if !self.player.use_calculator() {
            self.io.print(&format!(
                "You don't have a calculator!\n{}",
                active.problem.question
            ));
            self.mode = Mode::Challenge(active);
            return;
        }

        self.player
            .add_debt(active.problem.category, active.problem.difficulty);
        self.io.print(&format!(
            "BEEP BOOP! The calculator flashes: the answer is {}!\n\
             Calculators left: {}. Remember, the calculator always collects its debt...",
            active.problem.answer, self.player.calculators
        ));
        self.timer.reset();

        match active.source {
            ChallengeSource::Battle { .. } => {
                let monster = self
                    .world
                    .room(&self.player.current_room)
                    .and_then(|room| room.monster.clone());
                match monster {
                    Some(monster) => self.finish_battle(monster),
                    None => {
                        self.io.print("Your opponent is gone. You win by default!");
                        self.grant_rewards(DEFAULT_REWARD_XP, DEFAULT_REWARD_GOLD);
                    }
                }
            }
            ChallengeSource::Puzzle => self.finish_puzzle(),
        }
    }

    /// Present the oldest debt as a fresh problem and enter debt mode.
    pub(crate) fn start_debt(&mut self) {
        let Some(debt) = self.player.peek_debt().cloned() else {
            return;
        };
        let problem = self.generator.generate(debt.category, debt.difficulty);
        self.io.print(&format!(
            "\n*** THE CALCULATOR WANTS ITS DEBT PAID! ***\n\
             Last time it answered for you. This one is yours alone.\n\n{}",
            problem.question
        ));
        self.player.challenge_errors = 0;
        self.mode = Mode::Debt { problem };
    }

    /// Handle one line while a debt problem is on the table.
    pub(crate) fn debt_input(&mut self, answer: &str) {
        let Mode::Debt { problem } = std::mem::replace(&mut self.mode, Mode::Free) else {
            return;
        };

        if answer.is_empty() {
            self.io.print(&format!(
                "(The calculator will not help you here. Type your answer!)\n{}",
                problem.question
            ));
            self.mode = Mode::Debt { problem };
            return;
        }
        if ABANDON_TOKENS.contains(&answer) {
            self.io.print(&format!(
                "You can't walk away from a debt!\n{}",
                problem.question
            ));
            self.mode = Mode::Debt { problem };
            return;
        }
        if CALCULATOR_TOKENS.contains(&answer) {
            self.io.print(&format!(
                "The calculator stays silent. This one is yours alone!\n{}",
                problem.question
            ));
            self.mode = Mode::Debt { problem };
            return;
        }

        if answers::check(answer, &problem.answer) {
            self.player.pop_debt();
            self.io.print("RIGHT! The debt is paid!");
            self.grant_rewards(DEBT_REWARD_XP, 0);
            self.resume_pending();
            return;
        }

        self.player.challenge_errors += 1;
        self.player.wrong_answers += 1;
        if self.player.challenge_errors >= MAX_DEBT_ATTEMPTS {
            self.io.print(&format!(
                "That was a tough one! The answer was {}.\n\
                 The calculator forgives this debt. You'll get the next one!",
                problem.answer
            ));
            self.player.pop_debt();
            self.player.challenge_errors = 0;
            self.resume_pending();
        } else {
            self.io.print(&format!(
                "Wrong! Try again.\nHint: {}\n{}",
                problem.hint, problem.question
            ));
            self.mode = Mode::Debt { problem };
        }
    }

    /// Handle one line while the Math Beast holds the floor.
    pub(crate) fn remedial_input(&mut self, answer: &str) {
        let Mode::Remedial {
            mut encounter,
            suspended,
        } = std::mem::replace(&mut self.mode, Mode::Free)
        else {
            return;
        };

        if answer.is_empty() {
            self.io.print(&format!(
                "(The Math Beast is waiting...)\n{}",
                encounter.practice_question()
            ));
            self.mode = Mode::Remedial {
                encounter,
                suspended,
            };
            return;
        }

        match encounter.check_answer(answer, &mut self.generator) {
            RemedialOutcome::Retry(text) => {
                self.io.print(&text);
                self.mode = Mode::Remedial {
                    encounter,
                    suspended,
                };
            }
            RemedialOutcome::Solved(text) | RemedialOutcome::Exhausted(text) => {
                let mut back = format!(
                    "{text}\n\nBack to where you were:\n{}",
                    suspended.problem.question
                );
                if matches!(suspended.source, ChallengeSource::Battle { .. }) {
                    let seconds = battle_seconds(self.player.level);
                    self.timer.start(seconds);
                    back.push_str(&format!("\nFresh clock: {seconds} seconds!"));
                }
                self.io.print(&back);
                self.player.challenge_errors = 0;
                self.mode = Mode::Challenge(suspended);
            }
        }
    }

    /// Run the free-mode action that was deferred for a debt, if any.
    fn resume_pending(&mut self) {
        match self.pending.take() {
            Some(PendingAction::Attack) => self.begin_battle(),
            Some(PendingAction::Solve) => self.begin_puzzle(),
            None => {}
        }
    }

    fn grant_rewards(&mut self, xp: u32, gold: u32) {
        let leveled = self.player.add_xp(xp);
        if gold > 0 {
            self.player.add_gold(gold);
            self.io.print(&format!("+{xp} XP, +{gold} gold!"));
        } else {
            self.io.print(&format!("+{xp} XP!"));
        }
        if leveled {
            self.io.print(&format!(
                "*** LEVEL UP! You are now level {}! ***\n\
                 Max HP is now {} and you feel fully restored!",
                self.player.level, self.player.max_hp
            ));
        }
        self.player.challenge_errors = 0;
        self.status_bar();
    }
}
