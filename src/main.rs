use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};

use std::thread;
use std::time::Duration;

use alphabeta::connect_four::{ConnectFour, WIDTH};
use alphabeta::driver::Agent;
use alphabeta::eval::{ExactScore, WindowHeuristic};
use alphabeta::report::{Sampling, TraceReport};
use alphabeta::tic_tac_toe::{TicTacToe, CELLS};
use alphabeta::{Difficulty, Player, Position, SearchConfig};

mod display;
mod prompt;

/// Tic-tac-toe and Connect 4 against an alpha-beta search
#[derive(Parser)]
#[command(name = "alphabeta", version)]
struct Cli {
    /// Log search diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand)]
enum Game {
    /// 3×3 tic-tac-toe against a full-depth search
    TicTacToe(TicTacToeArgs),
    /// Connect 4 against a depth-limited heuristic search
    ConnectFour(ConnectFourArgs),
}

#[derive(Args)]
struct TicTacToeArgs {
    /// Maximum search depth (1-9, higher = stronger AI but slower)
    #[arg(short, long, default_value_t = 9)]
    depth: usize,

    /// Walk through the AI's search node by node after each of its moves
    #[arg(long)]
    step: bool,

    /// Don't report which cell the AI chose and how many nodes it searched
    #[arg(long)]
    no_hints: bool,

    /// Don't record the search tree
    #[arg(long)]
    no_trace: bool,

    /// Seed for sampling the decision tree
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct ConnectFourArgs {
    /// AI strength: easy, medium or hard
    #[arg(short = 'l', long, default_value = "hard")]
    difficulty: Difficulty,

    /// Search depth of the hard AI
    #[arg(short, long, default_value_t = 5)]
    depth: usize,

    /// Two human players instead of a human against the AI
    #[arg(long)]
    two_players: bool,

    /// Search the AI's candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Seed for the easy and medium AI
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    match cli.game {
        Game::TicTacToe(args) => play_tic_tac_toe(args),
        Game::ConnectFour(args) => play_connect_four(args),
    }
}

fn thinking() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.yellow} {msg}"));
    spinner.set_message("AI is thinking...");
    spinner.enable_steady_tick(100);
    spinner
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn play_tic_tac_toe(args: TicTacToeArgs) -> Result<()> {
    let human = Player::One;
    let ai = Player::Two;
    let config = SearchConfig::tic_tac_toe()
        .with_max_depth(args.depth)
        .with_trace(!args.no_trace || args.step);
    let mut rng = rng(args.seed);

    loop {
        let mut board = TicTacToe::new();
        let mut agent = Agent::new(ExactScore::new(ai), ai, config);

        display::clear()?;
        display::title("TIC-TAC-TOE with Alpha-Beta Pruning")?;
        println!("Search depth: {}", agent.searcher().config().max_depth);
        let mut current = if prompt::yes_no("Would you like to go first?")? {
            human
        } else {
            ai
        };

        loop {
            display::clear()?;
            display::title("TIC-TAC-TOE with Alpha-Beta Pruning")?;
            display::message("You: X  |  AI: O\n", Color::Yellow)?;
            display::draw_tic_tac_toe(&board, true)?;

            if current == human {
                loop {
                    let cell = prompt::number("Enter your move (1-9): ", 1, CELLS)?;
                    match board.apply(cell - 1, human) {
                        Ok(next) => {
                            board = next;
                            break;
                        }
                        Err(_) => println!("That position is already taken!"),
                    }
                }
            } else {
                let spinner = thinking();
                let cell = agent.choose_move(&mut board)?;
                spinner.finish_and_clear();

                if args.step {
                    if let Some(trace) = agent.trace() {
                        for (id, _) in trace.iter() {
                            display::clear()?;
                            display::title("Alpha-Beta Pruning Step Visualization")?;
                            display::draw_node(trace, id)?;
                            prompt::pause()?;
                        }
                    }
                }
                if !args.no_hints {
                    let stats = agent.stats();
                    display::message(&format!("AI chose position {}", cell + 1), Color::Yellow)?;
                    println!(
                        "Evaluated {} nodes, pruned {} nodes",
                        stats.nodes, stats.pruned
                    );
                    thread::sleep(Duration::from_millis(1500));
                }
            }

            let outcome = match board.winner() {
                Some(player) if player == human => Some(("Congratulations! You win!", Color::Green)),
                Some(_) => Some(("AI wins! Better luck next time.", Color::Red)),
                None if board.is_full() => Some(("It's a draw!", Color::Blue)),
                None => None,
            };
            if let Some((text, color)) = outcome {
                display::clear()?;
                display::draw_tic_tac_toe(&board, false)?;
                display::message(text, color)?;
                break;
            }
            current = current.other();
        }

        if let Some(trace) = agent.trace() {
            if !trace.is_empty() && prompt::yes_no("\nWould you like to see the decision tree?")? {
                let report = TraceReport::new(trace);
                display::clear()?;
                display::title("Decision Tree Visualization")?;
                println!("{}", report.summary());

                let shown = report.sample(Sampling::Random(&mut rng));
                if shown.len() < trace.len() {
                    println!(
                        "\nShowing {} of {} nodes (focus on important decision points)",
                        shown.len(),
                        trace.len()
                    );
                }
                for id in shown {
                    display::draw_node(trace, id)?;
                }
                prompt::pause()?;
            }
        }

        if !prompt::yes_no("\nPlay again?")? {
            return Ok(());
        }
    }
}

fn play_connect_four(args: ConnectFourArgs) -> Result<()> {
    let ai = Player::Two;
    let config = SearchConfig::connect_four()
        .with_max_depth(args.depth)
        .with_parallel(args.parallel);

    loop {
        let mut board = ConnectFour::new();
        let mut agent = Agent::new(WindowHeuristic::new(ai), ai, config)
            .with_difficulty(args.difficulty);
        if let Some(seed) = args.seed {
            agent = agent.with_seed(seed);
        }
        let mut current = Player::One;

        loop {
            display::clear()?;
            display::title("Connect 4")?;
            if args.two_players {
                println!("Player 1: X (red), Player 2: O (yellow)\n");
            } else {
                println!("You: X (red), AI: O (yellow), difficulty {}\n", agent.difficulty());
            }
            display::draw_connect_four(&board)?;

            if current == ai && !args.two_players {
                let spinner = thinking();
                let column = agent.choose_move(&mut board)?;
                spinner.finish_and_clear();
                println!("AI plays column {}", column + 1);
                thread::sleep(Duration::from_millis(700));
            } else {
                let name = match (args.two_players, current) {
                    (true, Player::One) => "Player 1",
                    (true, Player::Two) => "Player 2",
                    (false, _) => "Your",
                };
                loop {
                    let question = format!(
                        "{} turn ({}). Choose column (1-{}): ",
                        name,
                        current.symbol(),
                        WIDTH
                    );
                    let column = prompt::number(&question, 1, WIDTH)?;
                    match board.apply(column - 1, current) {
                        Ok(next) => {
                            board = next;
                            break;
                        }
                        Err(err) => println!("{}", err),
                    }
                }
            }

            let outcome = match board.winner() {
                Some(Player::One) if args.two_players => Some("Game over! Player 1 (X) wins!"),
                Some(Player::Two) if args.two_players => Some("Game over! Player 2 (O) wins!"),
                Some(player) if player == ai => Some("Game over! AI (O) wins!"),
                Some(_) => Some("Game over! You (X) win!"),
                None if board.is_full() => Some("Game over! It's a draw!"),
                None => None,
            };
            if let Some(text) = outcome {
                display::clear()?;
                display::draw_connect_four(&board)?;
                display::message(text, Color::Cyan)?;
                break;
            }
            current = current.other();
        }

        if !prompt::yes_no("\nPlay again?")? {
            return Ok(());
        }
    }
}
