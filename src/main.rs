use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connectk_ai::board::Piece;
use connectk_ai::config::Config;
use connectk_ai::search::SearchLimits;
use connectk_ai::session::GameSession;
use connectk_ai::*;

mod render;

#[derive(Parser)]
struct Args {
    /// Number of rows on the board
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,

    /// Number of pieces in a row needed to win
    #[arg(long, default_value_t = DEFAULT_CONNECT_LENGTH)]
    connect: usize,

    /// Number of plies the AI searches
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u32,

    /// Let the AI make the first move
    #[arg(long, default_value_t = false)]
    ai_first: bool,

    /// Start from a position given as comma separated 1-indexed columns, e.g. "4,4,3"
    ///
    /// The first column is played by whoever opens the game (see --ai-first)
    #[arg(short, long)]
    position: Option<String>,

    /// Give up on an AI search after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}

// whose turn it is, alternating from whoever started
fn ai_to_move(session: &GameSession, ai_first: bool) -> bool {
    match session.history().last() {
        Some(last) => last.piece == Piece::Human,
        None => ai_first,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = Config::new(args.rows, args.columns, args.connect, args.depth)?;
    let mut session = GameSession::new(config);
    if let Some(timeout_ms) = args.timeout_ms {
        session.set_search_limits(SearchLimits::with_timeout(Duration::from_millis(timeout_ms)));
    }
    // positions are replayed from whoever opens this game
    let first = if args.ai_first { Piece::Ai } else { Piece::Human };
    if let Some(moves) = &args.position {
        session.try_set_pos_starting_with(moves, first)?;
    }

    let stdin = stdin();

    println!("Welcome to Connect {}\n", config.connect_length());
    info!(
        rows = config.rows(),
        columns = config.columns(),
        depth = config.search_depth(),
        "starting game"
    );

    // game loop
    loop {
        render::display(&session.display_board())?;

        match session.winner() {
            Some(Piece::Human) => {
                println!("You win!");
                break;
            }
            Some(_) => {
                println!("AI wins!");
                break;
            }
            None if session.is_full() => {
                println!("Draw!");
                break;
            }
            None => {}
        }

        if ai_to_move(&session, args.ai_first) {
            println!("AI is thinking...");
            stdout().flush().expect("Failed to flush to stdout!");

            let played = match session.try_play_ai(None, None) {
                Ok(played) => played,
                // fall back to the first open column if the search ran out of time
                Err(err) => {
                    println!("{}", err);
                    let column = *session
                        .valid_columns()
                        .first()
                        .ok_or_else(|| anyhow!("no column left to play"))?;
                    session.try_play_ai(Some(column), None)?
                }
            };
            println!("AI plays: {}", played.column + 1);
            continue;
        }

        // human player
        print!("Move input (q to quit) > ");
        stdout().flush().expect("Failed to flush to stdout!");
        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            break;
        }

        let input = input_str.trim();
        if input.eq_ignore_ascii_case("q") {
            let resume = if args.ai_first { " --ai-first" } else { "" };
            println!("Resume with:{} --position \"{}\"", resume, session.get_pos());
            break;
        }

        let column = match input.parse::<usize>() {
            Ok(column) if column >= 1 => column - 1,
            _ => {
                println!("Invalid number: {}", input);
                continue;
            }
        };

        if let Err(err) = session.try_play_human(column) {
            println!("{}", err);
            // try the move again
            continue;
        }
    }
    Ok(())
}
