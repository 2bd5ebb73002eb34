//! Abacus Tutor - CLI Entry Point
//!
//! Commands:
//! - `abacus-tutor play` - the full app, from the welcome screen
//! - `abacus-tutor learn` - jump straight to the guided lessons
//! - `abacus-tutor practice` - jump straight to a practice drill
//! - `abacus-tutor game` - jump straight to the timed game
//! - `abacus-tutor quiz` - print generated questions to stdout
//! - `abacus-tutor test` - run the built-in self-test

use clap::{Parser, Subcommand, ValueEnum};

use abacus::{GameConfig, PracticeConfig, PracticeMode, StartScreen};

#[derive(Parser)]
#[command(name = "abacus-tutor")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "An interactive soroban-style abacus tutor for learning arithmetic")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// The full app, starting from the welcome screen
    Play,
    /// The guided lesson walkthrough
    Learn,
    /// A practice drill
    Practice {
        /// How to solve: on fingers, on the abacus, or in your head
        #[arg(short, long, value_enum, default_value = "abacus")]
        mode: ModeArg,
        /// Problems per run
        #[arg(short, long, default_value = "50")]
        problems: u32,
        /// Seconds allowed per problem
        #[arg(short, long, default_value = "30")]
        seconds: u32,
    },
    /// The timed multiple-choice game
    Game {
        /// Round length in seconds
        #[arg(short, long, default_value = "60")]
        seconds: u32,
        /// Questions per round
        #[arg(short, long, default_value = "20")]
        questions: u32,
    },
    /// Print generated questions with their options and answers
    Quiz {
        /// How many questions
        #[arg(short, long, default_value = "10")]
        count: u32,
        /// Seed for a reproducible paper quiz
        #[arg(short, long)]
        seed: Option<u64>,
        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Run the built-in self-test
    Test,
}

/// Practice mode from the command line.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Fingers,
    Abacus,
    Imagination,
}

impl From<ModeArg> for PracticeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fingers => PracticeMode::Fingers,
            ModeArg::Abacus => PracticeMode::Abacus,
            ModeArg::Imagination => PracticeMode::Imagination,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play) => {
            launch(
                StartScreen::Welcome,
                PracticeMode::Abacus,
                PracticeConfig::default(),
                GameConfig::default(),
            );
        }
        Some(Commands::Learn) => {
            launch(
                StartScreen::Learn,
                PracticeMode::Abacus,
                PracticeConfig::default(),
                GameConfig::default(),
            );
        }
        Some(Commands::Practice {
            mode,
            problems,
            seconds,
        }) => {
            launch(
                StartScreen::Practice,
                mode.into(),
                PracticeConfig {
                    problems,
                    seconds_per_problem: seconds,
                },
                GameConfig::default(),
            );
        }
        Some(Commands::Game { seconds, questions }) => {
            launch(
                StartScreen::Game,
                PracticeMode::Abacus,
                PracticeConfig::default(),
                GameConfig {
                    duration_secs: seconds,
                    max_questions: questions,
                },
            );
        }
        Some(Commands::Quiz { count, seed, json }) => {
            print_quiz(count, seed, json);
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("Abacus Tutor v0.1.0");
            println!("Learn arithmetic on a soroban-style abacus");
            println!();
            println!("Use --help for available commands");
            println!();
            demo_abacus_primitives();
        }
    }
}

fn launch(
    start: StartScreen,
    mode: PracticeMode,
    practice: PracticeConfig,
    game: GameConfig,
) {
    if let Err(e) = abacus::run_app(start, mode, practice, game) {
        eprintln!("❌ Terminal error: {}", e);
        std::process::exit(1);
    }
}

fn print_quiz(count: u32, seed: Option<u64>, json: bool) {
    use abacus::QuestionGenerator;
    use serde::Serialize;

    #[derive(Serialize)]
    struct QuizItem {
        question: String,
        answer: u8,
        options: [u8; abacus::OPTION_COUNT],
    }

    let mut generator = match seed {
        Some(seed) => QuestionGenerator::seeded(seed),
        None => QuestionGenerator::from_entropy(),
    };

    for number in 1..=count {
        let question = generator.next_question();
        let options = match generator.options(question.answer()) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("❌ Question generation failed: {}", e);
                std::process::exit(1);
            }
        };

        if json {
            let item = QuizItem {
                question: question.prompt(),
                answer: question.answer(),
                options,
            };
            match serde_json::to_string(&item) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("❌ JSON error: {}", e);
                    std::process::exit(1);
                }
            }
        } else {
            println!(
                "{:3}. {} = ?    options: {:?}    (answer: {})",
                number,
                question,
                options,
                question.answer()
            );
        }
    }
}

fn demo_abacus_primitives() {
    use abacus::{Abacus, QuestionGenerator};

    println!("━━━ Abacus Demo ━━━");
    println!();

    println!("Each column: one red bead worth 5 above the bar,");
    println!("four blue beads worth 1 below it.");
    println!();

    let mut rack = Abacus::new(4);
    println!("A fresh 4-column rack shows: {} (= {})", rack, rack.value());

    rack.set_value(1234).unwrap();
    println!("Showing 1234:              {} (= {})", rack, rack.value());

    rack.reset();
    rack.toggle_upper(0).unwrap();
    rack.toggle_lower(0, 2).unwrap();
    println!(
        "Five-bead + three one-beads on column 0: {} (= {})",
        rack,
        rack.value()
    );
    println!();

    println!("Sample questions:");
    let mut generator = QuestionGenerator::seeded(2024);
    for _ in 0..3 {
        let question = generator.next_question();
        println!("  {} = {}", question, question.answer());
    }
    println!();

    println!("✓ Try `abacus-tutor play` for the full experience!");
}

fn run_self_test() {
    use abacus::{Abacus, Column, GameConfig, GameSession, Op, QuestionGenerator};

    println!("━━━ Abacus Tutor Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Column digit roundtrip
    print!("Column digit roundtrip... ");
    let mut ok = true;
    for digit in 0..=9 {
        if Column::from_digit(digit).digit() != digit {
            ok = false;
            break;
        }
    }
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: Contiguous bead sliding
    print!("Contiguous bead sliding... ");
    let mut col = Column::zero();
    col.toggle_upper();
    col.toggle_lower(0);
    col.toggle_lower(1);
    col.toggle_lower(2);
    ok = col.digit() == 8;
    col.toggle_lower(1);
    ok = ok && col.digit() == 6;
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 3: Place values
    print!("Rack place values... ");
    let mut rack = Abacus::new(2);
    rack.set_value(37).unwrap();
    ok = rack.column_value(0).unwrap() == 7
        && rack.column_value(1).unwrap() == 3
        && rack.value() == 37;
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 4: Reset
    print!("Reset clears the rack... ");
    rack.reset();
    if rack.value() == 0 { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 5: Subtraction stays non-negative
    print!("Subtraction stays non-negative... ");
    let mut generator = QuestionGenerator::seeded(99);
    ok = true;
    for _ in 0..100 {
        let q = generator.next_question();
        if q.op == Op::Sub && q.lhs < q.rhs {
            ok = false;
            break;
        }
    }
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 6: Option sets
    print!("Option sets are 4 distinct with the answer... ");
    ok = true;
    for answer in 0..=20 {
        let options = match generator.options(answer) {
            Ok(options) => options,
            Err(_) => {
                ok = false;
                break;
            }
        };
        let mut sorted = options;
        sorted.sort_unstable();
        if !options.contains(&answer) || sorted.windows(2).any(|w| w[0] == w[1]) {
            ok = false;
            break;
        }
    }
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 7: Game streak scoring
    print!("Game streak scoring... ");
    let mut game = GameSession::new(GameConfig::default(), QuestionGenerator::seeded(7)).unwrap();
    game.start().unwrap();
    let first = game.question().answer();
    game.answer(first).unwrap();
    let second = game.question().answer();
    game.answer(second).unwrap();
    if game.score() == 22 && game.streak() == 2 {
        println!("✓");
        passed += 1;
    } else {
        println!("✗ (got score {}, streak {})", game.score(), game.streak());
        failed += 1;
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}
