#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use std::collections::HashSet;

    use crate::connect_four::{ConnectFour, NUM_WINDOWS, WINDOWS};
    use crate::driver::Agent;
    use crate::eval::{Evaluator, ExactScore, WindowHeuristic};
    use crate::report::{Sampling, TraceReport, DISPLAY_LIMIT};
    use crate::search::{minimax, Searcher};
    use crate::tic_tac_toe::{TicTacToe, WINNING_LINES};
    use crate::{Cell, Difficulty, Error, Player, Position, SearchConfig, MAX_SCORE, MIN_SCORE};

    // a full board with no alignment for either player
    const DRAWN_BOARD: &str = "XXOOXXO/OOXXOOX/XXOOXXO/OOXXOOX/XXOOXXO/OOXXOOX";

    fn connect_four(rows: &[&str]) -> ConnectFour {
        rows.join("/").parse().expect("valid test board")
    }

    /// Every non-terminal 3×3 position with at most `plies` pieces, with
    /// the player to move
    fn tic_tac_toe_positions(plies: usize) -> Vec<(TicTacToe, Player)> {
        let mut frontier = vec![(TicTacToe::new(), Player::One)];
        let mut positions = Vec::new();
        for _ in 0..=plies {
            let mut next = Vec::new();
            for (board, to_move) in frontier {
                if board.is_terminal() {
                    continue;
                }
                for cell in board.legal_moves() {
                    next.push((board.play(cell, to_move), to_move.other()));
                }
                positions.push((board, to_move));
            }
            frontier = next;
        }
        positions
    }

    /// Non-terminal Connect 4 positions taken from random games
    fn connect_four_positions(seed: u64, count: usize) -> Vec<(ConnectFour, Player)> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut positions = Vec::new();
        while positions.len() < count {
            let mut board = ConnectFour::new();
            let mut to_move = Player::One;
            let length = rng.gen_range(0..24);
            for _ in 0..length {
                let moves = board.legal_moves();
                let column = moves[rng.gen_range(0..moves.len())];
                board = board.play(column, to_move);
                to_move = to_move.other();
                if board.is_terminal() {
                    break;
                }
            }
            if !board.is_terminal() {
                positions.push((board, to_move));
            }
        }
        positions
    }

    #[test]
    pub fn tic_tac_toe_parsing() -> Result<()> {
        let board: TicTacToe = "XO./.X./..O".parse()?;
        assert_eq!(board.cell(0), Cell::PlayerOne);
        assert_eq!(board.cell(1), Cell::PlayerTwo);
        assert_eq!(board.cell(4), Cell::PlayerOne);
        assert_eq!(board.num_moves(), 4);
        assert_eq!(board.to_string(), "XO./.X./..O");

        assert!(matches!(
            "XO./.X.".parse::<TicTacToe>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "XO./.X./..O.".parse::<TicTacToe>(),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            "XQ./.X./..O".parse::<TicTacToe>(),
            Err(Error::InvalidBoard { .. })
        ));
        Ok(())
    }

    #[test]
    pub fn connect_four_parsing() -> Result<()> {
        let board = ConnectFour::from_moves("4453")?;
        assert_eq!(board.num_moves(), 4);
        assert_eq!(board.height(3), 2);
        assert_eq!(board.cell(3, 0), Cell::PlayerOne);
        assert_eq!(board.cell(3, 1), Cell::PlayerTwo);
        assert_eq!(board.cell(4, 0), Cell::PlayerOne);
        assert_eq!(board.cell(2, 0), Cell::PlayerTwo);
        assert_eq!(board.last_move(), Some((2, 0)));

        let parsed: ConnectFour = board.to_string().parse()?;
        assert_eq!(parsed.cells(), board.cells());
        assert_eq!(parsed.num_moves(), 4);
        assert_eq!(parsed.height(3), 2);

        assert!(matches!(
            ConnectFour::from_moves("8"),
            Err(Error::InvalidBoard { .. })
        ));
        assert!(matches!(
            ConnectFour::from_moves("1111111"),
            Err(Error::IllegalMove { target: 0, .. })
        ));
        // player one connects four vertically with the seventh move
        assert!(ConnectFour::from_moves("1212121")?.is_win(Player::One));
        assert!(matches!(
            ConnectFour::from_moves("12121212"),
            Err(Error::InvalidBoard { .. })
        ));

        let floating = ".......|.......|.......|.......|...X...|.......".replace('|', "/");
        assert!(matches!(
            floating.parse::<ConnectFour>(),
            Err(Error::InvalidBoard { .. })
        ));
        Ok(())
    }

    #[test]
    pub fn illegal_moves_are_rejected() -> Result<()> {
        let board: TicTacToe = "X../.../...".parse()?;
        assert!(matches!(
            board.apply(0, Player::Two),
            Err(Error::IllegalMove { target: 0, .. })
        ));
        assert!(matches!(
            board.apply(9, Player::Two),
            Err(Error::IllegalMove { target: 9, .. })
        ));
        // the input board is untouched
        assert_eq!(board.num_moves(), 1);

        let full_column = ConnectFour::from_moves("111111")?;
        assert!(!full_column.is_legal(0));
        assert!(matches!(
            full_column.apply(0, Player::One),
            Err(Error::IllegalMove { target: 0, .. })
        ));
        assert!(matches!(
            full_column.apply(7, Player::One),
            Err(Error::IllegalMove { target: 7, .. })
        ));
        assert_eq!(full_column.legal_moves(), vec![1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    pub fn legal_moves_are_ascending() -> Result<()> {
        let board: TicTacToe = "X.O/.X./O..".parse()?;
        assert_eq!(board.legal_moves(), vec![1, 3, 5, 7, 8]);
        assert_eq!(ConnectFour::new().legal_moves(), (0..7).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    pub fn play_does_not_mutate() {
        let board = TicTacToe::new();
        let next = board.play(4, Player::One);
        assert_eq!(board.num_moves(), 0);
        assert_eq!(next.cell(4), Cell::PlayerOne);

        let board = ConnectFour::new();
        let next = board.play(3, Player::Two).play(3, Player::One);
        assert_eq!(board.num_moves(), 0);
        assert_eq!(next.cell(3, 0), Cell::PlayerTwo);
        assert_eq!(next.cell(3, 1), Cell::PlayerOne);
        assert_eq!(next.last_move(), Some((3, 1)));
    }

    #[test]
    pub fn tic_tac_toe_wins() {
        for line in WINNING_LINES.iter() {
            let board = line
                .iter()
                .fold(TicTacToe::new(), |board, &cell| board.play(cell, Player::Two));
            assert!(board.is_win(Player::Two));
            assert!(!board.is_win(Player::One));
            assert_eq!(board.winner(), Some(Player::Two));
        }

        let board: TicTacToe = "XOX/XOO/OXX".parse().expect("valid board");
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert!(board.is_terminal());
    }

    #[test]
    pub fn connect_four_windows() {
        assert_eq!(NUM_WINDOWS, 69);
        let distinct: HashSet<[usize; 4]> = WINDOWS.iter().copied().collect();
        assert_eq!(distinct.len(), NUM_WINDOWS);
        assert!(WINDOWS.iter().flatten().all(|&i| i < 42));
    }

    #[test]
    pub fn win_detection_agrees_on_edges() {
        let cases = [
            // horizontal, bottom right corner
            connect_four(&[
                ".......", ".......", ".......", ".......", ".......", "OOO.XXX",
            ]),
            // vertical, top left corner
            connect_four(&[
                "X......", "X......", "X......", "X......", "O......", "O......",
            ]),
            // diagonal / ending in the top right corner
            connect_four(&[
                "......X", ".....XO", "....XOO", "...XOOO", "...OOOO", "...OOOO",
            ]),
            // diagonal \ starting in the top left corner
            connect_four(&[
                "X......", "OX.....", "OOX....", "OOOX...", "OOOO...", "OOOO...",
            ]),
        ];
        let anchors = [(6, 0), (0, 5), (6, 5), (0, 5)];
        let expected = [false, true, true, true];

        for ((board, &(column, row)), &win) in cases.iter().zip(anchors.iter()).zip(expected.iter())
        {
            assert_eq!(board.is_win(Player::One), win, "{}", board);
            assert_eq!(board.is_win_at(column, row), win, "{}", board);
        }

        let horizontal = connect_four(&[
            ".......", ".......", ".......", ".......", ".......", "...XXXX",
        ]);
        assert!(horizontal.is_win(Player::One));
        assert!((3..7).all(|column| horizontal.is_win_at(column, 0)));

        let gap = connect_four(&[
            ".......", ".......", ".......", ".......", ".......", "XXX.X..",
        ]);
        assert!(!gap.is_win(Player::One));
        assert!([0, 1, 2, 4].iter().all(|&column| !gap.is_win_at(column, 0)));
        assert!(!gap.is_win_at(3, 0));
    }

    #[test]
    pub fn win_detection_agrees_in_random_games() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let mut board = ConnectFour::new();
            let mut to_move = Player::One;
            while !board.is_terminal() {
                let moves = board.legal_moves();
                let column = moves[rng.gen_range(0..moves.len())];
                board = board.play(column, to_move);

                assert_eq!(board.is_win(to_move), board.last_move_wins(), "{}", board);
                assert!(!board.is_win(to_move.other()));
                to_move = to_move.other();
            }
        }
    }

    #[test]
    pub fn exact_scores() -> Result<()> {
        let evaluator = ExactScore::new(Player::Two);
        let won: TicTacToe = "OOO/XX./X..".parse()?;
        let lost: TicTacToe = "XXX/OO./O..".parse()?;
        let drawn: TicTacToe = "XOX/XOO/OXX".parse()?;
        let running: TicTacToe = "XO./.../...".parse()?;

        assert_eq!(evaluator.terminal(&won, 3), Some(7));
        assert_eq!(evaluator.terminal(&lost, 4), Some(-6));
        assert_eq!(evaluator.terminal(&drawn, 9), Some(0));
        assert_eq!(evaluator.terminal(&running, 2), None);
        assert_eq!(evaluator.evaluate(&running, 2), 0);
        Ok(())
    }

    #[test]
    pub fn window_scores() {
        let evaluator = WindowHeuristic::new(Player::Two);
        let (o, x, e) = (Cell::PlayerTwo, Cell::PlayerOne, Cell::Empty);

        assert_eq!(evaluator.score_window(&[o, o, o, e]), 10);
        assert_eq!(evaluator.score_window(&[e, o, o, e]), 3);
        assert_eq!(evaluator.score_window(&[o, e, e, e]), 0);
        assert_eq!(evaluator.score_window(&[x, x, e, x]), -15);
        assert_eq!(evaluator.score_window(&[x, e, x, e]), -3);
        assert_eq!(evaluator.score_window(&[o, o, x, e]), 0);
        assert_eq!(evaluator.score_window(&[o, x, x, x]), 0);
        assert_eq!(evaluator.score_window(&[e, e, e, e]), 0);
    }

    #[test]
    pub fn window_heuristic_boards() {
        let evaluator = WindowHeuristic::new(Player::Two);
        let score = |bottom: &str| {
            let board = connect_four(&[
                ".......", ".......", ".......", ".......", ".......", bottom,
            ]);
            assert_eq!(evaluator.terminal(&board, 5), None);
            evaluator.heuristic(&board)
        };

        assert_eq!(score("......."), 0);
        // a lone piece fills no window enough to count
        assert_eq!(score("O......"), 0);
        assert_eq!(score("OO....."), 3);
        // mixed windows are worth nothing
        assert_eq!(score("OX....."), 0);
        assert_eq!(score("...O..."), 2);
        assert_eq!(score("...X..."), -2);
        assert_eq!(score("OOO...."), 13);
        assert_eq!(score("XXX...."), -18);
    }

    #[test]
    pub fn window_heuristic_terminals() {
        let evaluator = WindowHeuristic::new(Player::Two);
        let won = connect_four(&[
            ".......", ".......", ".......", ".......", "XXX....", "OOOO...",
        ]);
        let lost = connect_four(&[
            ".......", ".......", ".......", ".......", "OOO....", "XXXX...",
        ]);
        let drawn: ConnectFour = DRAWN_BOARD.parse().expect("valid board");

        assert_eq!(evaluator.evaluate(&won, 3), 1000);
        assert_eq!(evaluator.evaluate(&lost, 3), -1000);
        assert!(drawn.is_full());
        assert_eq!(drawn.winner(), None);
        assert_eq!(evaluator.evaluate(&drawn, 0), 0);
    }

    #[test]
    pub fn alpha_beta_matches_minimax_tic_tac_toe() {
        for (board, to_move) in tic_tac_toe_positions(3) {
            let evaluator = ExactScore::new(to_move);
            let mut searcher =
                Searcher::new(evaluator, to_move, SearchConfig::tic_tac_toe().with_trace(false));
            let result = searcher.search_root(&board);
            let (value, best_move) = minimax(&evaluator, to_move, &board, 0, 9, true);

            assert_eq!(result.value, value, "{}", board);
            assert_eq!(result.best_move, best_move, "{}", board);
        }
    }

    #[test]
    pub fn alpha_beta_matches_minimax_at_every_depth() {
        let positions = tic_tac_toe_positions(1);
        for max_depth in 1..=9 {
            for (board, to_move) in positions.iter() {
                let evaluator = ExactScore::new(*to_move);
                let config = SearchConfig::tic_tac_toe().with_max_depth(max_depth);
                let mut searcher = Searcher::new(evaluator, *to_move, config);
                let result = searcher.search_root(board);
                let (value, best_move) = minimax(&evaluator, *to_move, board, 0, max_depth, true);

                assert_eq!(result.value, value);
                assert_eq!(result.best_move, best_move);
            }
        }
    }

    #[test]
    pub fn alpha_beta_matches_minimax_connect_four() {
        for (board, to_move) in connect_four_positions(42, 40) {
            let evaluator = WindowHeuristic::new(to_move);
            let config = SearchConfig::connect_four().with_max_depth(4);
            let mut searcher = Searcher::new(evaluator, to_move, config);
            let result = searcher.search_root(&board);
            let (value, best_move) = minimax(&evaluator, to_move, &board, 0, 4, true);

            assert_eq!(result.value, value, "{}", board);
            assert_eq!(result.best_move, best_move, "{}", board);
        }
    }

    #[test]
    pub fn minimizing_search_matches_minimax() {
        for (board, to_move) in connect_four_positions(7, 20) {
            // search from the opponent's point of view: the AI waits
            let ai = to_move.other();
            let evaluator = WindowHeuristic::new(ai);
            let mut searcher =
                Searcher::new(evaluator, ai, SearchConfig::connect_four().with_max_depth(3));
            let result = searcher.search(&board, 0, MIN_SCORE, MAX_SCORE, false);
            let (value, best_move) = minimax(&evaluator, ai, &board, 0, 3, false);

            assert_eq!(result.value, value, "{}", board);
            assert_eq!(result.best_move, best_move, "{}", board);
        }
    }

    #[test]
    pub fn parallel_search_matches_sequential() {
        for (board, to_move) in connect_four_positions(1234, 20) {
            let evaluator = WindowHeuristic::new(to_move);
            let config = SearchConfig::connect_four().with_max_depth(4);
            let mut sequential = Searcher::new(evaluator, to_move, config);
            let mut parallel = Searcher::new(evaluator, to_move, config.with_parallel(true));

            let expected = sequential.search_root(&board);
            let result = parallel.decide(&board);
            assert_eq!(result.value, expected.value, "{}", board);
            assert_eq!(result.best_move, expected.best_move, "{}", board);
            assert!(parallel.stats.nodes > 0);
        }
    }

    #[test]
    pub fn search_is_deterministic() {
        for (board, to_move) in connect_four_positions(99, 10) {
            let evaluator = WindowHeuristic::new(to_move);
            let mut searcher = Searcher::new(evaluator, to_move, SearchConfig::connect_four());
            let first = searcher.search_root(&board);
            searcher.reset();
            let second = searcher.search_root(&board);
            assert_eq!(first, second);
        }

        let mut searcher =
            Searcher::new(ExactScore::new(Player::One), Player::One, SearchConfig::tic_tac_toe());
        let first = searcher.search_root(&TicTacToe::new());
        let nodes = searcher.stats.nodes;
        searcher.reset();
        let second = searcher.search_root(&TicTacToe::new());
        assert_eq!(first.value, second.value);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(searcher.stats.nodes, nodes);
        // every first move draws, so the leftmost cell is chosen
        assert_eq!(first.value, 0);
        assert_eq!(first.best_move, Some(0));
    }

    #[test]
    pub fn optimal_play_is_a_draw() -> Result<()> {
        for &first in [Player::One, Player::Two].iter() {
            let mut board = TicTacToe::new();
            let mut agent_one =
                Agent::new(ExactScore::new(Player::One), Player::One, SearchConfig::tic_tac_toe());
            let mut agent_two =
                Agent::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());

            let mut to_move = first;
            while !board.is_terminal() {
                match to_move {
                    Player::One => agent_one.choose_move(&mut board)?,
                    Player::Two => agent_two.choose_move(&mut board)?,
                };
                to_move = to_move.other();
            }
            assert_eq!(board.winner(), None, "{}", board);
            assert!(board.is_full());
        }
        Ok(())
    }

    #[test]
    pub fn takes_forced_wins() -> Result<()> {
        let cases = [("OO./XX./X..", 2), ("O.X/.OX/X..", 8), ("O../OX./.XX", 6)];
        for &(text, cell) in cases.iter() {
            let mut board: TicTacToe = text.parse()?;
            let mut agent =
                Agent::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
            assert_eq!(agent.choose_move(&mut board)?, cell, "{}", text);
            assert!(board.is_win(Player::Two));
            assert_eq!(agent.last_result().map(|result| result.value), Some(9));
        }
        Ok(())
    }

    #[test]
    pub fn blocks_immediate_losses() -> Result<()> {
        let mut board: TicTacToe = "XX./.O./...".parse()?;
        let mut agent =
            Agent::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        assert_eq!(agent.choose_move(&mut board)?, 2);

        for &difficulty in [Difficulty::Medium, Difficulty::Hard].iter() {
            let mut board = connect_four(&[
                ".......", ".......", ".......", ".......", ".......", "XXX.O..",
            ]);
            let mut agent =
                Agent::new(WindowHeuristic::new(Player::Two), Player::Two, SearchConfig::connect_four())
                    .with_difficulty(difficulty)
                    .with_seed(3);
            assert_eq!(agent.choose_move(&mut board)?, 3, "{}", difficulty);
            assert_eq!(board.cell(3, 0), Cell::PlayerTwo);
        }
        Ok(())
    }

    #[test]
    pub fn connect_four_takes_wins() -> Result<()> {
        for &difficulty in [Difficulty::Medium, Difficulty::Hard].iter() {
            let mut board = connect_four(&[
                ".......", ".......", ".......", ".......", ".......", "OOO.XXX",
            ]);
            let mut agent =
                Agent::new(WindowHeuristic::new(Player::Two), Player::Two, SearchConfig::connect_four())
                    .with_difficulty(difficulty);
            assert_eq!(agent.choose_move(&mut board)?, 3, "{}", difficulty);
            assert!(board.is_win(Player::Two));
        }
        Ok(())
    }

    #[test]
    pub fn easy_and_medium_moves_are_legal() -> Result<()> {
        for &difficulty in [Difficulty::Easy, Difficulty::Medium].iter() {
            let mut board = ConnectFour::from_moves("444444")?;
            let mut agent =
                Agent::new(WindowHeuristic::new(Player::One), Player::One, SearchConfig::connect_four())
                    .with_difficulty(difficulty)
                    .with_seed(11);
            let column = agent.choose_move(&mut board)?;
            assert_ne!(column, 3);
            assert_eq!(board.num_moves(), 7);
            assert!(agent.last_result().is_none());
        }
        Ok(())
    }

    #[test]
    pub fn no_legal_moves_is_an_error() -> Result<()> {
        let mut board: TicTacToe = "XOX/XOO/OXX".parse()?;
        let mut agent =
            Agent::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        assert_eq!(agent.choose_move(&mut board), Err(Error::NoLegalMoves));

        let mut board: ConnectFour = DRAWN_BOARD.parse()?;
        let before = board;
        let mut agent =
            Agent::new(WindowHeuristic::new(Player::Two), Player::Two, SearchConfig::connect_four());
        assert!(board.legal_moves().is_empty());
        assert_eq!(agent.choose_move(&mut board), Err(Error::NoLegalMoves));
        assert_eq!(board, before);
        Ok(())
    }

    #[test]
    pub fn node_accounting() {
        let mut searcher =
            Searcher::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        let result = searcher.search_root(&TicTacToe::new());
        let trace = searcher.trace().expect("tracing enabled");

        assert_eq!(trace.len(), trace.internal() + trace.leaves() + trace.skipped());
        assert_eq!(trace.evaluated(), searcher.stats.nodes);
        assert_eq!(trace.skipped(), searcher.stats.pruned);
        assert!(trace.skipped() > 0);
        assert!(trace.skipped() < trace.len());
        assert!(searcher.stats.cutoffs > 0);

        let root = trace.root().expect("root recorded");
        assert_eq!(result.node, Some(root));
        assert_eq!(trace.label(root), "0");
        let root_node = trace.get(root).expect("root recorded");
        assert_eq!(root_node.parent, None);
        assert_eq!(root_node.value(), Some(result.value));
        assert_eq!(root_node.best_move(), result.best_move);
        assert_eq!((root_node.alpha, root_node.beta), (MIN_SCORE, MAX_SCORE));
    }

    #[test]
    pub fn trace_links_are_consistent() -> Result<()> {
        let board: TicTacToe = "X../.O./..X".parse()?;
        let mut searcher =
            Searcher::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        searcher.search_root(&board);
        let trace = searcher.trace().expect("tracing enabled");

        for (id, node) in trace.iter() {
            for (ordinal, &child) in node.children.iter().enumerate() {
                let child_node = trace.get(child).expect("child recorded");
                assert_eq!(child_node.parent, Some(id));
                assert_eq!(child_node.ordinal, ordinal);
                assert_eq!(child_node.depth, node.depth + 1);
                assert_eq!(child_node.board.num_moves(), node.board.num_moves() + 1);
                assert_eq!(
                    trace.label(child),
                    format!("{}-{}", trace.label(id), ordinal)
                );
            }
            if node.is_skipped() {
                assert!(node.children.is_empty());
                assert_eq!(node.value(), None);
                assert_eq!(node.best_move(), None);
                assert!(node.beta <= node.alpha);
            }
            match node.parent {
                Some(parent) => assert!(parent > id),
                None => assert_eq!(Some(id), trace.root()),
            }
        }
        Ok(())
    }

    #[test]
    pub fn shallow_search_prunes_nothing() {
        let config = SearchConfig::tic_tac_toe().with_max_depth(1);
        let mut searcher = Searcher::new(ExactScore::new(Player::Two), Player::Two, config);
        let result = searcher.search_root(&TicTacToe::new());
        let trace = searcher.trace().expect("tracing enabled");

        assert_eq!(result.value, 0);
        assert_eq!(result.best_move, Some(0));
        assert_eq!(trace.len(), 10);
        assert_eq!(trace.skipped(), 0);
        assert_eq!(trace.leaves(), 9);
        assert_eq!(searcher.stats.pruned, 0);
        assert_eq!(searcher.stats.cutoffs, 0);
    }

    #[test]
    pub fn trace_is_cleared_between_moves() -> Result<()> {
        let mut board = TicTacToe::new();
        let mut agent =
            Agent::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        agent.choose_move(&mut board)?;
        board = board.apply(8, Player::One)?;
        agent.choose_move(&mut board)?;

        let trace = agent.trace().expect("tracing enabled");
        let root = trace.root().expect("root recorded");
        assert_eq!(trace.get(root).map(|node| node.board.num_moves()), Some(2));
        assert_eq!(trace.len(), agent.stats().total());
        Ok(())
    }

    #[test]
    pub fn untraced_search_records_nothing() {
        let config = SearchConfig::tic_tac_toe().with_trace(false);
        let mut searcher = Searcher::new(ExactScore::new(Player::Two), Player::Two, config);
        let result = searcher.search_root(&TicTacToe::new());
        assert!(searcher.trace().is_none());
        assert_eq!(result.node, None);
        assert!(searcher.stats.nodes > 0);
    }

    #[test]
    pub fn depth_is_clamped() {
        let deep: Searcher<TicTacToe, _> = Searcher::new(
            ExactScore::new(Player::Two),
            Player::Two,
            SearchConfig::tic_tac_toe().with_max_depth(20),
        );
        assert_eq!(deep.config().max_depth, 9);

        let shallow: Searcher<TicTacToe, _> = Searcher::new(
            ExactScore::new(Player::Two),
            Player::Two,
            SearchConfig::tic_tac_toe().with_max_depth(0),
        );
        assert_eq!(shallow.config().max_depth, 1);

        // tracing wins over parallel search
        let traced: Searcher<TicTacToe, _> = Searcher::new(
            ExactScore::new(Player::Two),
            Player::Two,
            SearchConfig::tic_tac_toe().with_parallel(true),
        );
        assert!(!traced.config().parallel);
    }

    #[test]
    pub fn difficulty_parsing() {
        assert_eq!("EASY".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("2".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "brutal".parse::<Difficulty>(),
            Err(Error::UnknownDifficulty("brutal".to_string()))
        );
        assert_eq!(Difficulty::default(), Difficulty::Hard);
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    pub fn report_summary_and_sampling() {
        let mut searcher =
            Searcher::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        searcher.search_root(&TicTacToe::new());
        let trace = searcher.trace().expect("tracing enabled");
        let report = TraceReport::new(trace);

        let summary = report.summary();
        assert_eq!(summary.total, trace.len());
        assert_eq!(summary.pruned, searcher.stats.pruned);
        assert_eq!(summary.evaluated, searcher.stats.nodes);
        assert!(summary.cutoffs > 0 && summary.cutoffs <= searcher.stats.cutoffs);
        assert!(summary.efficiency > 0.0 && summary.efficiency < 1.0);

        let ordered = report.ordered();
        assert_eq!(ordered.len(), trace.len());
        assert_eq!(Some(ordered[0]), trace.root());

        let leading = report.sample(Sampling::Leading);
        assert_eq!(leading.len(), DISPLAY_LIMIT);
        assert_eq!(Some(leading[0]), trace.root());
        assert_eq!(report.sample(Sampling::Leading), leading);

        let mut rng = StdRng::seed_from_u64(17);
        let random = report.sample(Sampling::Random(&mut rng));
        assert!(random.len() <= DISPLAY_LIMIT);
        assert_eq!(Some(random[0]), trace.root());
        let unique: HashSet<_> = random.iter().collect();
        assert_eq!(unique.len(), random.len());
    }

    #[test]
    pub fn small_traces_are_shown_in_full() -> Result<()> {
        let board: TicTacToe = "XOX/XOO/OX.".parse()?;
        let mut searcher =
            Searcher::new(ExactScore::new(Player::Two), Player::Two, SearchConfig::tic_tac_toe());
        let result = searcher.search_root(&board);
        assert_eq!(result.best_move, Some(8));

        let trace = searcher.trace().expect("tracing enabled");
        let report = TraceReport::new(trace);
        let shown = report.sample(Sampling::Leading);
        assert_eq!(shown.len(), 2);
        assert_eq!(Some(shown[0]), trace.root());
        assert_eq!(report.summary().pruned, 0);
        assert_eq!(report.summary().efficiency, 0.0);
        Ok(())
    }
}
