use clap::Parser;
use reversi::{Color, Game, SearchConfig};

/// Computer-vs-computer Othello using the parallel negamax engine.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Lookahead in plies.
    #[clap(short, long, default_value_t = reversi::config::DEFAULT_DEPTH)]
    depth: u8,

    /// Worker threads. Omit to use one per CPU.
    #[clap(short, long)]
    threads: Option<usize>,

    /// Print only the final result as JSON.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = SearchConfig {
        depth: args.depth,
        threads: args.threads,
    };
    let mut game = Game::new(config)?;

    if !args.json {
        println!("{}", game.board());
    }
    let result = game.play_out_with(|game, played| {
        if args.json {
            return;
        }
        let color = game.current_player.opponent();
        println!(
            "{color:?} plays ({},{}), flips {}",
            played.mv.row,
            played.mv.col,
            played.flipped.count_ones()
        );
        println!("{}", game.board());
    });

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }

    println!(
        "Game over: X (black) {} - O (white) {}",
        result.black_count, result.white_count
    );
    match result.winner {
        Some(Color::Black) => println!("X wins"),
        Some(Color::White) => println!("O wins"),
        None => println!("Tie"),
    }
    Ok(())
}
