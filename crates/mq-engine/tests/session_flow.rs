//! End-to-end session tests: scripted input lines in, narration out.

use std::time::Duration;

use mq_engine::{
    BattleTimer, Engine, ManualClock, MemoryIo, MemoryStore, Player, ProblemGenerator,
};
use mq_world::WorldMap;

const WORLD: &str = r#"{
  "rooms": [
    {
      "id": "hall",
      "name": "Great Hall",
      "description": "A vaulted hall of numbers.",
      "first_visit_text": "Chalk dust hangs in the air.",
      "exits": { "north": "arena", "east": "library" },
      "items": ["Calculator", "Healing Potion"]
    },
    {
      "id": "arena",
      "name": "Arena",
      "description": "A sandy fighting pit.",
      "exits": { "south": "hall" },
      "monster": {
        "id": "golem",
        "name": "the Sum Golem",
        "description": "A golem of chalk blocks the pit.",
        "category": "addition",
        "difficulty": 1,
        "reward_xp": 120,
        "reward_gold": 30,
        "defeat_message": "The golem crumbles into neat little tens.",
        "required_wins": 3
      }
    },
    {
      "id": "library",
      "name": "Library",
      "description": "Shelves of dusty workbooks.",
      "exits": { "west": "hall", "east": "garden" },
      "puzzle": {
        "id": "library-riddle",
        "category": "subtraction",
        "difficulty": 2,
        "description": "A ledger shows a sum with a hole in it.",
        "reward_xp": 30,
        "reward_gold": 5,
        "required": true
      }
    },
    {
      "id": "garden",
      "name": "Garden",
      "description": "A quiet garden.",
      "exits": { "west": "library", "north": "vault" },
      "items": ["Brass Key"]
    },
    {
      "id": "vault",
      "name": "Vault",
      "description": "Stacks of gleaming gold.",
      "exits": { "south": "garden" },
      "locked": true,
      "lock_message": "The vault door needs a key."
    }
  ]
}"#;

struct Fixture {
    engine: Engine,
    io: MemoryIo,
    clock: ManualClock,
    store: MemoryStore,
}

fn fixture(seed: u64) -> Fixture {
    let world = WorldMap::from_json(WORLD).unwrap();
    let player = Player::new("Testy", world.start_room().clone());
    let io = MemoryIo::new();
    let store = MemoryStore::new();
    let clock = ManualClock::new();
    let timer = BattleTimer::with_clock(Box::new(clock.clone()));
    let mut engine = Engine::with_parts(
        world,
        player,
        ProblemGenerator::seeded(seed),
        timer,
        Box::new(io.clone()),
        Box::new(store.clone()),
    )
    .unwrap();
    engine.start();
    Fixture {
        engine,
        io,
        clock,
        store,
    }
}

/// Solve the most recently printed question by doing the arithmetic.
fn latest_answer(io: &MemoryIo) -> String {
    let text = io.text();
    let line = text
        .lines()
        .rev()
        .find(|line| line.contains("What is"))
        .expect("no question in output");
    let body = &line[line.find("What is ").unwrap() + "What is ".len()..];
    let body = body.split('?').next().unwrap();
    let parts: Vec<&str> = body.split_whitespace().collect();
    let a: i64 = parts[0].parse().unwrap();
    let b: i64 = parts[2].parse().unwrap();
    match parts[1] {
        "+" => (a + b).to_string(),
        "-" => (a - b).to_string(),
        "×" => (a * b).to_string(),
        "÷" => {
            if line.contains("rest") {
                format!("{} rest {}", a / b, a % b)
            } else {
                (a / b).to_string()
            }
        }
        op => panic!("unexpected operator {op}"),
    }
}

fn answer_correctly(fx: &mut Fixture) {
    let answer = latest_answer(&fx.io);
    fx.engine.handle(&answer);
}

#[test]
fn first_visit_text_shows_once() {
    let mut fx = fixture(1);
    assert!(fx.io.take().contains("Chalk dust hangs in the air."));
    fx.engine.handle("look");
    let out = fx.io.take();
    assert!(out.contains("A vaulted hall of numbers."));
    assert!(!out.contains("Chalk dust"));
}

#[test]
fn monster_blocks_movement_until_defeated() {
    let mut fx = fixture(2);
    fx.engine.handle("north");
    fx.io.take();
    fx.engine.handle("south");
    assert!(fx.io.take().contains("blocks your path"));
}

#[test]
fn battle_takes_three_wins_and_pays_out() {
    let mut fx = fixture(3);
    fx.engine.handle("north");
    fx.engine.handle("attack");
    assert!(fx.io.text().contains("BATTLE"));
    assert!(fx.engine.awaiting_answer());
    assert!(fx.engine.in_challenge());

    answer_correctly(&mut fx);
    assert!(fx.io.text().contains("Correct! (1/3)"));
    answer_correctly(&mut fx);
    assert!(fx.io.text().contains("Correct! (2/3)"));
    answer_correctly(&mut fx);

    let out = fx.io.take();
    assert!(out.contains("VICTORY"));
    assert!(out.contains("The golem crumbles"));
    assert!(out.contains("+120 XP, +30 gold!"));
    assert!(out.contains("LEVEL UP! You are now level 2"));
    assert!(!fx.engine.awaiting_answer());
    assert_eq!(fx.engine.player().gold, 40);
    assert_eq!(fx.engine.player().max_hp, 110);

    // The arena is clear now.
    fx.engine.handle("south");
    assert!(fx.io.take().contains("Great Hall"));
}

#[test]
fn required_puzzle_blocks_movement_until_solved() {
    let mut fx = fixture(4);
    fx.engine.handle("east");
    fx.io.take();

    fx.engine.handle("east");
    assert!(fx.io.take().contains("solve"));

    fx.engine.handle("solve");
    assert!(fx.io.text().contains("A ledger shows a sum"));
    answer_correctly(&mut fx);
    let out = fx.io.take();
    assert!(out.contains("SOLVED"));
    assert!(out.contains("+30 XP, +5 gold!"));
    assert!(fx.engine.player().solved_puzzles.contains(&"library-riddle".to_string()));

    fx.engine.handle("east");
    assert!(fx.io.take().contains("Garden"));
}

#[test]
fn two_wrong_answers_summon_the_math_beast() {
    let mut fx = fixture(5);
    fx.engine.handle("north");
    fx.engine.handle("attack");
    let original = latest_answer(&fx.io);

    fx.engine.handle("999999");
    assert!(!fx.io.text().contains("MATH BEAST"));
    fx.engine.handle("999999");
    let out = fx.io.text();
    assert!(out.contains("MATH BEAST"));
    assert!(out.contains("I'll only show you ONCE"));
    assert!(fx.engine.in_remedial());

    // Solve the beast's practice problem; the battle question comes back
    // with a fresh clock.
    answer_correctly(&mut fx);
    let out = fx.io.take();
    assert!(out.contains("Back to where you were"));
    assert!(out.contains("Fresh clock: 45 seconds!"));

    fx.engine.handle(&original);
    assert!(fx.io.take().contains("Correct! (1/3)"));
}

#[test]
fn exhausted_math_beast_reveals_and_readmits() {
    let mut fx = fixture(6);
    fx.engine.handle("north");
    fx.engine.handle("attack");
    fx.engine.handle("999999");
    fx.engine.handle("999999");
    fx.io.take();

    fx.engine.handle("999999");
    assert!(fx.io.take().contains("2 attempts left"));
    fx.engine.handle("999999");
    assert!(fx.io.take().contains("1 attempt left"));
    fx.engine.handle("999999");
    let out = fx.io.take();
    assert!(out.contains("The answer was"));
    assert!(out.contains("Back to where you were"));
    assert!(fx.engine.awaiting_answer());
}

#[test]
fn expired_clock_turns_the_next_answer_into_a_miss() {
    let mut fx = fixture(7);
    fx.engine.handle("north");
    fx.engine.handle("attack");
    let answer = latest_answer(&fx.io);
    fx.io.take();

    fx.clock.advance(Duration::from_secs(46));
    fx.engine.handle(&answer);
    let out = fx.io.take();
    assert!(out.contains("TIME'S UP"));
    assert!(out.contains("Hint:"));
    assert_eq!(fx.engine.player().wrong_answers, 1);
    assert!(fx.engine.awaiting_answer());

    // The clock is spent; the same answer now lands normally.
    fx.engine.handle(&answer);
    assert!(fx.io.take().contains("Correct! (1/3)"));
}

#[test]
fn abandoning_a_battle_returns_to_free_mode() {
    let mut fx = fixture(8);
    fx.engine.handle("north");
    fx.engine.handle("attack");
    fx.engine.handle("give up");
    assert!(fx.io.take().contains("back away"));
    assert!(!fx.engine.awaiting_answer());
    fx.engine.handle("look");
    assert!(fx.io.take().contains("Arena"));
}

#[test]
fn empty_challenge_input_reprints_the_question() {
    let mut fx = fixture(9);
    fx.engine.handle("north");
    fx.engine.handle("attack");
    fx.io.take();
    fx.engine.handle("");
    let out = fx.io.take();
    assert!(out.contains("What is"));
    assert!(out.contains("seconds left"));
    assert!(fx.engine.awaiting_answer());
}

#[test]
fn calculator_wins_the_battle_and_records_a_debt() {
    let mut fx = fixture(10);
    fx.engine.handle("take calculator");
    assert!(fx.io.take().contains("(1/3)"));

    fx.engine.handle("north");
    fx.engine.handle("attack");
    fx.engine.handle("calculator");
    let out = fx.io.take();
    assert!(out.contains("BEEP BOOP"));
    assert!(out.contains("VICTORY"));
    assert!(out.contains("Debts 1"));
    assert_eq!(fx.engine.player().calculators, 0);
    assert!(fx.engine.player().has_debt());
    assert!(!fx.engine.awaiting_answer());
}

#[test]
fn debt_redirects_the_next_challenge_and_resumes_it() {
    let mut fx = fixture(11);
    fx.engine.handle("take calculator");
    fx.engine.handle("north");
    fx.engine.handle("attack");
    fx.engine.handle("calculator");
    fx.engine.handle("south");
    fx.engine.handle("east");
    fx.io.take();

    // The puzzle attempt is intercepted by the debt.
    fx.engine.handle("solve");
    let out = fx.io.text();
    assert!(out.contains("DEBT"));
    assert!(!out.contains("A ledger shows a sum"));
    assert!(fx.engine.in_debt());

    // The calculator refuses to help with its own debt.
    fx.engine.handle("calc");
    assert!(fx.io.text().contains("stays silent"));
    fx.engine.handle("give up");
    assert!(fx.io.text().contains("can't walk away"));

    let xp_before = fx.engine.player().xp;
    answer_correctly(&mut fx);
    let out = fx.io.take();
    assert!(out.contains("The debt is paid"));
    assert!(out.contains("+10 XP!"));
    assert_eq!(fx.engine.player().xp, xp_before + 10);
    assert!(!fx.engine.player().has_debt());

    // The original puzzle starts right after.
    assert!(out.contains("A ledger shows a sum"));
    assert!(fx.engine.awaiting_answer());
}

#[test]
fn debt_is_forgiven_after_five_misses() {
    let mut fx = fixture(12);
    fx.engine.handle("take calculator");
    fx.engine.handle("north");
    fx.engine.handle("attack");
    fx.engine.handle("calculator");
    fx.io.take();
    assert!(fx.engine.player().has_debt());

    fx.engine.handle("south");
    fx.engine.handle("east");
    fx.engine.handle("solve");
    fx.io.take();

    for _ in 0..4 {
        fx.engine.handle("999999");
        assert!(fx.io.take().contains("Try again"));
    }
    fx.engine.handle("999999");
    let out = fx.io.take();
    assert!(out.contains("The answer was"));
    assert!(out.contains("forgives"));
    assert!(!fx.engine.player().has_debt());

    // The puzzle still starts afterwards.
    assert!(out.contains("A ledger shows a sum"));
}

#[test]
fn key_unlocks_the_vault() {
    let mut fx = fixture(13);
    fx.engine.handle("east");
    fx.engine.handle("solve");
    answer_correctly(&mut fx);
    fx.engine.handle("east");
    fx.engine.handle("take key");
    assert!(fx.io.take().contains("Brass Key"));

    fx.engine.handle("north");
    assert!(fx.io.take().contains("The vault door needs a key."));
    fx.engine.handle("use key");
    assert!(fx.io.take().contains("open"));
    fx.engine.handle("north");
    assert!(fx.io.take().contains("Vault"));
    assert!(!fx.engine.player().inventory.contains(&"Brass Key".to_string()));
}

#[test]
fn potion_is_not_wasted_at_full_health() {
    let mut fx = fixture(14);
    fx.engine.handle("take potion");
    fx.engine.handle("use potion");
    assert!(fx.io.take().contains("already at full health"));
    assert!(fx.engine.player().inventory.contains(&"Healing Potion".to_string()));
}

#[test]
fn save_and_load_round_trip() {
    let mut fx = fixture(15);
    fx.engine.handle("take potion");
    fx.engine.handle("save");
    assert!(fx.io.take().contains("Game saved."));
    let saved = fx.store.snapshot().unwrap();
    assert!(saved.inventory.contains(&"Healing Potion".to_string()));

    fx.engine.handle("east");
    fx.engine.handle("load");
    let out = fx.io.take();
    assert!(out.contains("Welcome back, Testy!"));
    assert!(out.contains("Great Hall"));
    assert_eq!(fx.engine.player().current_room.as_str(), "hall");
}

#[test]
fn load_without_a_save_is_gentle() {
    let mut fx = fixture(16);
    fx.engine.handle("load");
    assert!(fx.io.take().contains("No saved game found."));
}

#[test]
fn quit_ends_the_session() {
    let mut fx = fixture(17);
    assert!(fx.engine.is_running());
    fx.engine.handle("quit");
    assert!(!fx.engine.is_running());
    assert!(fx.io.take().contains("Thanks for playing"));
}

#[test]
fn unknown_commands_get_a_nudge() {
    let mut fx = fixture(18);
    fx.engine.handle("dance");
    assert!(fx.io.take().contains("help"));
}
