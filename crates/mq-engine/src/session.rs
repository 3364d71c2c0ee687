//! The session coordinator: mode dispatch and free-mode exploration.
//!
//! The engine is a pure input-to-text machine. The frontend feeds it one line
//! at a time through [`Engine::handle`]; every effect is either a state
//! change or text pushed through the [`GameIo`](crate::GameIo) sink. Which
//! handler sees a line depends only on the current mode, with the remedial
//! encounter taking priority over debt, and debt over an ordinary challenge.

use mq_world::{Direction, WorldMap};

use crate::command::{Command, parse_command};
use crate::error::{EngineError, EngineResult};
use crate::generator::ProblemGenerator;
use crate::hooks::{GameIo, SaveStore};
use crate::player::Player;
use crate::problem::Problem;
use crate::remedial::RemedialEncounter;
use crate::timer::BattleTimer;

/// What a challenge problem was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChallengeSource {
    /// A battle round; `wins` counts correct answers so far.
    Battle {
        /// Correct answers given in this battle so far.
        wins: u32,
    },
    /// The room's puzzle.
    Puzzle,
}

/// A challenge problem currently awaiting an answer.
#[derive(Debug)]
pub(crate) struct ActiveChallenge {
    pub(crate) problem: Problem,
    pub(crate) source: ChallengeSource,
}

/// The free-mode action deferred while a calculator debt is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Attack,
    Solve,
}

/// Which handler the next input line goes to.
#[derive(Debug)]
pub(crate) enum Mode {
    /// Exploring; input is parsed as commands.
    Free,
    /// A battle round or puzzle is awaiting an answer.
    Challenge(ActiveChallenge),
    /// A calculator debt problem is awaiting an answer.
    Debt {
        /// The debt problem on the table.
        problem: Problem,
    },
    /// The Math Beast has interrupted a challenge.
    Remedial {
        /// The live encounter.
        encounter: RemedialEncounter,
        /// The challenge to readmit once the beast leaves.
        suspended: ActiveChallenge,
    },
}

/// The game session.
///
/// Owns the world, the player, the problem generator, the battle timer, and
/// the current mode. Construct with [`Engine::new`] for production defaults
/// or [`Engine::with_parts`] to inject a seeded generator and a test clock.
pub struct Engine {
    pub(crate) world: WorldMap,
    pub(crate) player: Player,
    pub(crate) generator: ProblemGenerator,
    pub(crate) timer: BattleTimer,
    pub(crate) mode: Mode,
    pub(crate) pending: Option<PendingAction>,
    pub(crate) io: Box<dyn GameIo>,
    pub(crate) store: Box<dyn SaveStore>,
    pub(crate) running: bool,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine with an OS-seeded generator and the wall clock.
    pub fn new(
        world: WorldMap,
        player: Player,
        io: Box<dyn GameIo>,
        store: Box<dyn SaveStore>,
    ) -> EngineResult<Self> {
        Self::with_parts(
            world,
            player,
            ProblemGenerator::new(),
            BattleTimer::new(),
            io,
            store,
        )
    }

    /// Create an engine from explicit parts.
    pub fn with_parts(
        world: WorldMap,
        player: Player,
        generator: ProblemGenerator,
        timer: BattleTimer,
        io: Box<dyn GameIo>,
        store: Box<dyn SaveStore>,
    ) -> EngineResult<Self> {
        if !world.contains(&player.current_room) {
            return Err(EngineError::UnknownRoom(player.current_room));
        }
        Ok(Self {
            world,
            player,
            generator,
            timer,
            mode: Mode::Free,
            pending: None,
            io,
            store,
            running: false,
        })
    }

    /// Greet the player and describe the starting room.
    pub fn start(&mut self) {
        self.running = true;
        let name = self.player.name.clone();
        self.io
            .print(&format!("Welcome, {name}! Your math adventure begins."));
        self.show_room();
    }

    /// Whether the session is still going. False after `quit`.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the next input will be read as an answer rather than a command.
    pub fn awaiting_answer(&self) -> bool {
        !matches!(self.mode, Mode::Free)
    }

    /// Whether a battle round or puzzle is awaiting an answer.
    pub fn in_challenge(&self) -> bool {
        matches!(self.mode, Mode::Challenge(_))
    }

    /// Whether a calculator debt problem is awaiting an answer.
    pub fn in_debt(&self) -> bool {
        matches!(self.mode, Mode::Debt { .. })
    }

    /// Whether the Math Beast currently holds the floor.
    pub fn in_remedial(&self) -> bool {
        matches!(self.mode, Mode::Remedial { .. })
    }

    /// The current player state.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Handle one line of input.
    pub fn handle(&mut self, raw: &str) {
        let input = raw.trim().to_string();
        match &self.mode {
            Mode::Remedial { .. } => self.remedial_input(&input.to_lowercase()),
            Mode::Debt { .. } => self.debt_input(&input.to_lowercase()),
            Mode::Challenge(_) => self.challenge_input(&input.to_lowercase()),
            Mode::Free => {
                if !input.is_empty() {
                    self.free_input(&input);
                }
            }
        }
    }

    fn free_input(&mut self, input: &str) {
        match parse_command(input) {
            Command::Move(direction) => self.do_move(direction),
            Command::Look => self.show_room(),
            Command::Take(pattern) => self.do_take(&pattern),
            Command::Inventory => self.show_inventory(),
            Command::Stats => self.show_stats(),
            Command::Attack => self.attack(),
            Command::Use(pattern) => self.do_use(&pattern),
            Command::Solve => self.solve(),
            Command::Calculator => self.io.print(
                "The calculator only helps while a problem is in front of you.\n\
                 Type 'calculator' during a battle or puzzle!",
            ),
            Command::Help => self.show_help(),
            Command::Save => self.save_game(),
            Command::Load => self.load_game(),
            Command::Quit => self.quit(),
            Command::Unknown(text) => self.io.print(&format!(
                "You're not sure how to '{text}'. Type 'help' if you're stuck!"
            )),
        }
    }

    fn do_move(&mut self, direction: Option<Direction>) {
        let Some(direction) = direction else {
            self.io.print("Which direction? (north, south, east, west)");
            return;
        };
        let Some(room) = self.world.room(&self.player.current_room) else {
            return;
        };

        if let Some(monster) = &room.monster {
            self.io.print(&format!(
                "{} blocks your path! (Type 'attack' to face it!)",
                monster.name
            ));
            return;
        }
        if let Some(puzzle) = &room.puzzle {
            if puzzle.required {
                self.io
                    .print("A puzzle bars the way. You must solve it first! (Type 'solve')");
                return;
            }
        }

        let Some(target) = room.exits.get(&direction).cloned() else {
            let exits = room
                .exits
                .keys()
                .map(Direction::name)
                .collect::<Vec<_>>()
                .join(", ");
            if exits.is_empty() {
                self.io.print("There are no exits here.");
            } else {
                self.io
                    .print(&format!("You can't go {direction} from here. Exits: {exits}"));
            }
            return;
        };

        if let Some(next) = self.world.room(&target) {
            if next.locked {
                let message = next
                    .lock_message
                    .clone()
                    .unwrap_or_else(|| format!("The way {direction} is locked."));
                self.io.print(&message);
                return;
            }
        }

        self.player.current_room = target;
        self.show_room();
    }

    pub(crate) fn show_room(&mut self) {
        let id = self.player.current_room.clone();
        let first_visit = !self.world.is_visited(&id);
        let Some(room) = self.world.room(&id) else {
            return;
        };

        let mut text = format!("\n=== {} ===\n{}", room.name, room.description);
        if first_visit {
            if let Some(extra) = &room.first_visit_text {
                text.push('\n');
                text.push_str(extra);
            }
        }
        if let Some(monster) = &room.monster {
            text.push_str(&format!(
                "\n\n{}\n(Type 'attack' to face {}!)",
                monster.description, monster.name
            ));
        }
        if let Some(puzzle) = &room.puzzle {
            text.push_str(&format!(
                "\n\nThere is a puzzle here: {}\n(Type 'solve' to try it!)",
                puzzle.description
            ));
        }
        if !room.items.is_empty() {
            text.push_str(&format!("\nYou see: {}", room.items.join(", ")));
        }
        let exits = room
            .exits
            .keys()
            .map(Direction::name)
            .collect::<Vec<_>>()
            .join(", ");
        if !exits.is_empty() {
            text.push_str(&format!("\nExits: {exits}"));
        }

        self.io.print(&text);
        self.world.mark_visited(&id);
        self.status_bar();
    }

    pub(crate) fn status_bar(&mut self) {
        let p = &self.player;
        let mut line = format!(
            "Lvl {} | XP {}/{} | HP {}/{} | Gold {} | Calculators {}/3",
            p.level,
            p.xp,
            p.xp_target(),
            p.hp,
            p.max_hp,
            p.gold,
            p.calculators
        );
        if p.has_debt() {
            line.push_str(&format!(" | Debts {}", p.debts.len()));
        }
        self.io.print(&line);
    }

    fn do_take(&mut self, pattern: &str) {
        if pattern.is_empty() {
            self.io.print("Take what? (e.g. 'take key')");
            return;
        }
        let room_id = self.player.current_room.clone();
        let found = self
            .world
            .room(&room_id)
            .and_then(|room| room.find_item(pattern))
            .map(str::to_string);
        let Some(name) = found else {
            self.io.print(&format!("There is no '{pattern}' here."));
            return;
        };

        if name.to_lowercase().contains("calculator") {
            if self.player.add_calculator() {
                let _ = self.world.remove_item(&room_id, pattern);
                self.io.print(&format!(
                    "You pick up the {name}! ({}/3)\n\
                     Type 'calculator' during a challenge to let it answer for you.\n\
                     But beware: the calculator always collects its debt...",
                    self.player.calculators
                ));
            } else {
                self.io
                    .print("You already carry the maximum number of calculators (3/3)!");
            }
            return;
        }

        if let Some(taken) = self.world.remove_item(&room_id, pattern) {
            self.player.add_item(taken.clone());
            self.io.print(&format!("You pick up: {taken}"));
        }
    }

    fn do_use(&mut self, pattern: &str) {
        if pattern.is_empty() {
            self.io.print("Use what? (e.g. 'use potion')");
            return;
        }
        let Some(item) = self.player.find_item(pattern).map(str::to_string) else {
            self.io.print(&format!("You don't have a '{pattern}'."));
            return;
        };
        let lower = item.to_lowercase();

        if lower.contains("key") {
            self.use_key(&item);
        } else if lower.contains("elixir") {
            self.drink(&item, 100);
        } else if lower.contains("potion") {
            self.drink(&item, 50);
        } else {
            self.io
                .print(&format!("You're not sure how to use the {item} here."));
        }
    }

    fn use_key(&mut self, item: &str) {
        let locked_exit = self
            .world
            .room(&self.player.current_room)
            .into_iter()
            .flat_map(|room| room.exits.iter())
            .find(|(_, target)| self.world.room(target).is_some_and(|r| r.locked))
            .map(|(direction, target)| (*direction, target.clone()));

        let Some((direction, target)) = locked_exit else {
            self.io.print("There is nothing here to unlock.");
            return;
        };
        self.world.unlock(&target);
        self.player.remove_item(item);
        self.io.print(&format!(
            "You turn the {item} in the lock. The way {direction} is open!"
        ));
    }

    fn drink(&mut self, item: &str, amount: u32) {
        let healed = self.player.heal(amount);
        if healed == 0 {
            self.io.print("You're already at full health!");
            return;
        }
        self.player.remove_item(item);
        self.io.print(&format!(
            "You drink the {item} and recover {healed} HP. ({}/{})",
            self.player.hp, self.player.max_hp
        ));
    }

    fn show_inventory(&mut self) {
        let mut lines = Vec::new();
        if self.player.inventory.is_empty() && self.player.calculators == 0 {
            self.io.print("You aren't carrying anything.");
            return;
        }
        lines.push("You are carrying:".to_string());
        for item in &self.player.inventory {
            lines.push(format!("  - {item}"));
        }
        if self.player.calculators > 0 {
            lines.push(format!("  - Calculator x{}", self.player.calculators));
        }
        self.io.print(&lines.join("\n"));
    }

    fn show_stats(&mut self) {
        let p = &self.player;
        let text = format!(
            "--- {} ---\n\
             Level: {}\n\
             XP: {}/{}\n\
             HP: {}/{}\n\
             Gold: {}\n\
             Calculators: {}/3\n\
             Calculator debts: {}\n\
             Puzzles solved: {}\n\
             Wrong answers (all time): {}",
            p.name,
            p.level,
            p.xp,
            p.xp_target(),
            p.hp,
            p.max_hp,
            p.gold,
            p.calculators,
            p.debts.len(),
            p.solved_puzzles.len(),
            p.wrong_answers
        );
        self.io.print(&text);
    }

    fn show_help(&mut self) {
        self.io.print(
            "Commands:\n\
             \x20 north/south/east/west (or n/s/e/w) - move\n\
             \x20 look - describe the room again\n\
             \x20 take <item> - pick something up\n\
             \x20 use <item> - use a carried item\n\
             \x20 inventory - what you carry\n\
             \x20 stats - your character sheet\n\
             \x20 attack - face the room's monster\n\
             \x20 solve - try the room's puzzle\n\
             \x20 save / load - save or restore your game\n\
             \x20 quit - end the session\n\
             During a challenge: type your answer, 'calculator' for help,\n\
             or 'give up' to walk away.",
        );
    }

    fn save_game(&mut self) {
        let snapshot = self.player.snapshot();
        self.store.save(&snapshot);
        self.io.print("Game saved.");
    }

    fn load_game(&mut self) {
        let Some(snapshot) = self.store.load() else {
            self.io.print("No saved game found.");
            return;
        };
        if !self.world.contains(&snapshot.current_room) {
            self.io
                .print("The saved game points at an unknown room. Keeping the current game.");
            return;
        }
        self.player = Player::from_snapshot(snapshot);
        self.pending = None;
        self.timer.reset();
        let name = self.player.name.clone();
        self.io.print(&format!("Welcome back, {name}!"));
        self.show_room();
    }

    fn quit(&mut self) {
        self.running = false;
        let name = self.player.name.clone();
        self.io
            .print(&format!("Thanks for playing, {name}! Practice makes perfect."));
    }
}
