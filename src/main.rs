use clap::arg;
use clap::command;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

use caissa::board::{Board, Coordinate, INITIAL_POSITION};
use caissa::perft::perft;
use caissa::selfplay::{random_playout, Outcome};

fn main() {
    let matches = command!()
        .propagate_version(true)
        .subcommand(
            Command::new("legal")
                .about("List the legal moves of the piece on a square")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(arg!(
                    -s --square <square> "Origin square, e.g. e2"
                )),
        )
        .subcommand(
            Command::new("status")
                .about("Render a position and report check, mate and stalemate")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                ),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("selfplay")
                .about("Play random legal moves until mate, stalemate or the ply limit")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(
                    arg!(
                    -p --plies <plies> "Maximum number of plies"
                            )
                    .default_value("200")
                    .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    arg!(
                    -s --seed <seed> "Random seed"
                            )
                    .default_value("0")
                    .value_parser(clap::value_parser!(u64)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("legal", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            let square = arg_matches.get_one::<String>("square").expect("square is required");
            legal(fen, square);
        }
        Some(("status", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            status(fen);
        }
        Some(("perft", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            let depth = arg_matches.get_one::<usize>("depth").unwrap();
            let moves = arg_matches
                .get_many::<String>("moves")
                .unwrap_or_default()
                .filter(|&v| !v.is_empty())
                .collect::<Vec<_>>();
            run_perft(fen, moves, (*depth) as u8);
        }
        Some(("selfplay", arg_matches)) => {
            let fen = arg_matches.get_one::<String>("fen").unwrap();
            let plies = arg_matches.get_one::<u32>("plies").unwrap();
            let seed = arg_matches.get_one::<u64>("seed").unwrap();
            selfplay(fen, *plies, *seed);
        }
        None => {
            status(INITIAL_POSITION);
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn legal(fen: &str, square: &str) {
    let board = Board::from_fen(fen).expect("Invalid FEN string");
    let at = Coordinate::from_algebraic(square).expect("Invalid square");
    let mut moves: Vec<_> = board.legal_moves_from(at).iter().map(|m| m.as_algebraic()).collect();
    moves.sort();
    if moves.is_empty() {
        println!("No legal moves from {}", square);
    } else {
        println!("{}", moves.join(" "));
    }
}

fn status(fen: &str) {
    let board = Board::from_fen(fen).expect("Invalid FEN string");
    println!("{}", board.render_to_string());
    let mover = board.side_to_move;
    println!("{:?} to move", mover);
    if board.checkmated(mover) {
        println!("{:?} is checkmated", mover);
    } else if board.stalemated(mover) {
        println!("{:?} is stalemated", mover);
    } else if board.in_check(mover) {
        println!("{:?} is in check", mover);
    }
}

#[derive(Tabled)]
struct PerftRow {
    mv: String,
    nodes: u64,
}

fn run_perft(fen: &str, moves: Vec<&String>, depth: u8) {
    println!("Perft test for {} moves {:?} with depth {}", fen, moves, depth);
    let mut board = Board::from_fen(fen).expect("Invalid FEN string");
    for m in moves {
        match board.parse_move(m) {
            Ok(mv) => board.apply(mv),
            Err(e) => panic!("Invalid move {}: {}", m, e),
        }
    }

    let mut result_moves = Vec::<(String, u64)>::new();
    for mv in board.legal_moves(board.side_to_move) {
        let mut new_board = board.clone();
        new_board.apply(mv);
        result_moves.push((mv.as_algebraic(), perft(&new_board, depth.saturating_sub(1))));
    }
    result_moves.sort();

    let num_nodes: u64 = result_moves.iter().map(|(_, c)| c).sum();
    let table_rows: Vec<_> = result_moves
        .into_iter()
        .map(|(mv, nodes)| PerftRow { mv, nodes })
        .collect();
    println!("{}", Table::new(table_rows).with(Style::modern()));
    println!("\nNodes searched: {}", num_nodes);
}

fn selfplay(fen: &str, plies: u32, seed: u64) {
    let report = random_playout(fen, plies, seed).expect("Invalid FEN string");
    let moves: Vec<_> = report.moves.iter().map(|m| m.as_algebraic()).collect();
    println!("{}", moves.join(" "));
    match report.outcome {
        Outcome::Checkmate(color) => println!("{:?} is checkmated after {} plies", color, report.plies),
        Outcome::Stalemate(color) => println!("{:?} is stalemated after {} plies", color, report.plies),
        Outcome::PlyLimit => println!("Ply limit of {} reached", report.plies),
    }
}
