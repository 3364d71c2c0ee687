//! Battle entry and the countdown policy.
//!
//! A battle is a series of problems against the room's monster; the monster
//! falls after `required_wins` correct answers. One countdown covers the
//! whole encounter. It is not refreshed between rounds, only when the Math
//! Beast hands the challenge back.

use crate::session::{ActiveChallenge, ChallengeSource, Engine, Mode, PendingAction};

/// Seconds on the battle clock for a player of the given level.
pub(crate) fn battle_seconds(level: u32) -> u64 {
    match level {
        0..=2 => 45,
        3..=4 => 40,
        5..=6 => 35,
        7..=8 => 30,
        _ => 25,
    }
}

impl Engine {
    /// Start a battle with the room's monster, or collect a debt first.
    pub(crate) fn attack(&mut self) {
        let guarded = self
            .world
            .room(&self.player.current_room)
            .is_some_and(|room| room.monster.is_some());
        if !guarded {
            self.io
                .print("No monsters here right now. Enjoy the calm!");
            return;
        }
        if self.player.has_debt() {
            self.pending = Some(PendingAction::Attack);
            self.start_debt();
            return;
        }
        self.begin_battle();
    }

    /// Enter battle mode against the current room's monster.
    pub(crate) fn begin_battle(&mut self) {
        let Some(monster) = self
            .world
            .room(&self.player.current_room)
            .and_then(|room| room.monster.clone())
        else {
            return;
        };

        let problem = self.generator.generate(monster.category, monster.difficulty);
        let seconds = battle_seconds(self.player.level);
        let plan = if monster.required_wins > 1 {
            format!("Answer {} problems correctly to win!", monster.required_wins)
        } else {
            "Answer correctly to win!".to_string()
        };
        self.io.print(&format!(
            "\n*** BATTLE! You face {}! ***\n\
             {plan}\n\
             You have {seconds} seconds. Go!\n\n\
             {}",
            monster.name, problem.question
        ));

        self.timer.start(seconds);
        self.player.challenge_errors = 0;
        self.mode = Mode::Challenge(ActiveChallenge {
            problem,
            source: ChallengeSource::Battle { wins: 0 },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battle_clock_shrinks_with_level() {
        assert_eq!(battle_seconds(1), 45);
        assert_eq!(battle_seconds(2), 45);
        assert_eq!(battle_seconds(3), 40);
        assert_eq!(battle_seconds(4), 40);
        assert_eq!(battle_seconds(5), 35);
        assert_eq!(battle_seconds(7), 30);
        assert_eq!(battle_seconds(9), 25);
        assert_eq!(battle_seconds(10), 25);
    }
}
