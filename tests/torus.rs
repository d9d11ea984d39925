use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use rand::SeedableRng;
use torus_life::{LifeError, TorusLife, TorusLifeConfig};

fn board(width: usize, height: usize, cells: &[(usize, usize)]) -> TorusLife {
    TorusLife::new(width, height, cells.iter().copied(), TorusLifeConfig::default())
        .expect("valid board")
}

fn collect_live(engine: &TorusLife) -> HashSet<(usize, usize)> {
    let mut out = HashSet::new();
    engine.for_each_live(|row, col| {
        out.insert((row, col));
    });
    out
}

fn assert_alive(engine: &TorusLife, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        assert!(engine.get_cell(row, col).expect("in range"), "expected alive at ({row},{col})");
    }
}

fn assert_dead(engine: &TorusLife, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        assert!(!engine.get_cell(row, col).expect("in range"), "expected dead at ({row},{col})");
    }
}

fn temp_board_file(contents: impl AsRef<[u8]>) -> std::path::PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "torus_life_test_{}_{n}.txt",
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("write temp board");
    path
}

#[test]
fn empty_board_stays_empty() {
    for (w, h) in [(1, 1), (2, 2), (3, 3), (7, 4), (16, 9)] {
        let mut engine = board(w, h, &[]);
        engine.next_n_gen(5);
        assert_eq!(engine.population(), 0, "{w}x{h}");
        assert_eq!(engine.generation(), 5);
    }
}

#[test]
fn isolated_cell_dies() {
    let mut engine = board(3, 3, &[(1, 1)]);
    engine.next_gen();
    assert_eq!(engine.population(), 0);
    assert_eq!(engine.generation(), 1);
}

#[test]
fn full_two_by_two_is_still_life() {
    let engine = board(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    assert!(engine.is_still_life());
    let next = engine.advanced_by(1);
    assert_eq!(next.cells(), engine.cells());
}

#[test]
fn block_is_still_life_and_blinker_is_not() {
    let block = board(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
    assert!(block.is_still_life());
    assert_eq!(block.generation(), 0);
    assert_eq!(block.rollback_limit(), 0);

    let blinker = board(5, 5, &[(2, 1), (2, 2), (2, 3)]);
    assert!(!blinker.is_still_life());
}

#[test]
fn blinker_oscillates() {
    let mut engine = board(5, 5, &[(2, 1), (2, 2), (2, 3)]);

    engine.next_gen();
    assert_alive(&engine, &[(1, 2), (2, 2), (3, 2)]);
    assert_dead(&engine, &[(2, 1), (2, 3)]);

    engine.next_gen();
    assert_alive(&engine, &[(2, 1), (2, 2), (2, 3)]);
    assert_dead(&engine, &[(1, 2), (3, 2)]);
}

#[test]
fn blinker_across_the_seam_oscillates() {
    // Horizontal blinker straddling the left/right edge of a 6x5 board.
    let mut engine = board(6, 5, &[(2, 5), (2, 0), (2, 1)]);
    engine.next_gen();
    assert_eq!(collect_live(&engine), HashSet::from([(1, 0), (2, 0), (3, 0)]));
}

#[test]
fn glider_wraps_back_to_start() {
    let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    let mut engine = board(8, 8, &glider);
    let start = collect_live(&engine);

    engine.next_n_gen(4);
    let shifted: HashSet<(usize, usize)> = glider.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(collect_live(&engine), shifted);

    engine.next_n_gen(28);
    assert_eq!(collect_live(&engine), start);
    assert_eq!(engine.generation(), 32);
}

#[test]
fn non_square_corner_pattern_uses_true_diagonals() {
    // An L-tromino around the bottom-right corner of a 5x3 board. The corner
    // cell (0, 0) sees all three through the wrap and is born.
    let mut engine = board(5, 3, &[(2, 4), (2, 0), (0, 4)]);
    assert_eq!(engine.live_neighbors(0).expect("in range"), 3);
    engine.next_gen();
    assert!(engine.get_cell(0, 0).expect("in range"));
}

#[test]
fn toggle_is_self_inverse_and_keeps_generation() {
    let mut engine = board(4, 4, &[(1, 1)]);
    engine.next_gen();
    let before = engine.cells().to_vec();

    engine.toggle_cell(5).expect("in range");
    assert_ne!(engine.cells(), before.as_slice());
    engine.toggle_cell(5).expect("in range");
    assert_eq!(engine.cells(), before.as_slice());

    engine.toggle_cell_at(3, 2).expect("in range");
    engine.toggle_cell_at(3, 2).expect("in range");
    assert_eq!(engine.cells(), before.as_slice());
    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.rollback_limit(), 1);
}

#[test]
fn toggle_out_of_range_fails_without_change() {
    let mut engine = board(3, 2, &[(0, 0)]);
    let err = engine.toggle_cell(6).unwrap_err();
    assert!(matches!(err, LifeError::IndexOutOfRange { index: 6, len: 6 }), "{err}");
    let err = engine.toggle_cell_at(2, 0).unwrap_err();
    assert!(matches!(err, LifeError::CellOutOfRange { row: 2, col: 0, .. }), "{err}");
    let err = engine.toggle_cell_at(0, 3).unwrap_err();
    assert!(matches!(err, LifeError::CellOutOfRange { .. }), "{err}");
    assert_eq!(collect_live(&engine), HashSet::from([(0, 0)]));
}

#[test]
fn construction_rejects_out_of_range_cells() {
    let err = TorusLife::new(3, 3, [(3, 0)], TorusLifeConfig::default()).unwrap_err();
    assert!(matches!(err, LifeError::CellOutOfRange { row: 3, .. }), "{err}");
    let err = TorusLife::from_cells(3, 3, vec![false; 8], TorusLifeConfig::default()).unwrap_err();
    assert!(matches!(err, LifeError::Configuration(_)), "{err}");
}

#[test]
fn symbols_must_stay_distinct() {
    let mut engine = board(3, 3, &[]);
    let err = engine.set_live_symbol('-').unwrap_err();
    assert!(matches!(err, LifeError::Configuration(_)), "{err}");
    assert_eq!(engine.live_symbol(), '*');

    let err = engine.set_dead_symbol('*').unwrap_err();
    assert!(matches!(err, LifeError::Configuration(_)), "{err}");
    assert_eq!(engine.dead_symbol(), '-');

    engine.set_live_symbol('L').expect("distinct");
    engine.set_dead_symbol('*').expect("distinct now");
    assert_eq!((engine.live_symbol(), engine.dead_symbol()), ('L', '*'));
}

#[test]
fn display_uses_configured_symbols() {
    let mut engine = TorusLife::new(
        3,
        2,
        [(0, 1), (1, 2)],
        TorusLifeConfig::default().live_symbol('#').dead_symbol('.'),
    )
    .expect("board");
    assert_eq!(engine.to_string(), "Generation: 0\n.#.\n..#\n");

    engine.set_live_symbol('o').expect("distinct");
    let rows: Vec<String> = engine.render_rows().collect();
    assert_eq!(rows, vec![".o.".to_string(), "..o".to_string()]);
}

#[test]
fn live_fraction_and_density_comparison() {
    let sparse = board(10, 10, &[(0, 0)]);
    let same = board(10, 10, &[(0, 0)]);
    let shifted = board(10, 10, &[(5, 5)]);
    let dense = board(10, 10, &[(0, 0), (1, 1), (2, 2), (3, 3)]);

    assert_eq!(sparse.live_fraction(), 0.01);
    assert!(sparse.density_eq(&same));
    assert!(sparse.density_eq(&shifted));
    assert!(sparse.density_lt(&dense));
    assert!(sparse.density_le(&dense));
    assert!(sparse.density_le(&same));
    assert!(dense.density_gt(&sparse));
    assert!(dense.density_ge(&sparse));
    assert!(!sparse.density_gt(&same));
    assert_eq!(sparse.density_cmp(&dense), std::cmp::Ordering::Less);
}

#[test]
fn live_fraction_stays_in_unit_interval() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xF4AC_7104);
    for _ in 0..20 {
        let w = rng.random_range(1..20usize);
        let h = rng.random_range(1..20usize);
        let density = rng.random::<f64>();
        let cells: Vec<bool> = (0..w * h).map(|_| rng.random::<f64>() < density).collect();
        let engine = TorusLife::from_cells(w, h, cells, TorusLifeConfig::default()).expect("board");
        let fraction = engine.live_fraction();
        assert!((0.0..=1.0).contains(&fraction), "{fraction}");
    }
}

#[test]
fn negate_flips_cells_and_resets_history() {
    let mut engine = board(4, 3, &[(0, 0), (2, 3)]);
    engine.next_n_gen(2);
    engine.set_live_symbol('L').expect("distinct");

    let negated = engine.negate();
    assert_eq!(negated.generation(), 0);
    assert_eq!(negated.rollback_limit(), 0);
    assert_eq!(negated.history_capacity(), engine.history_capacity());
    assert_eq!(negated.live_symbol(), 'L');
    assert_eq!(negated.population(), 12 - engine.population());
    for (a, b) in engine.cells().iter().zip(negated.cells()) {
        assert_ne!(a, b);
    }
    assert_eq!(engine.generation(), 2);
}

#[test]
fn loads_board_file() {
    let path = temp_board_file("5 4\n-----\n--*--\n--*--\n--*--\n");
    let mut engine = TorusLife::load(&path, TorusLifeConfig::default()).expect("load");
    assert_eq!((engine.width(), engine.height()), (5, 4));
    assert_eq!(collect_live(&engine), HashSet::from([(1, 2), (2, 2), (3, 2)]));

    engine.next_gen();
    assert_eq!(collect_live(&engine), HashSet::from([(2, 1), (2, 2), (2, 3)]));

    let advanced =
        TorusLife::load(&path, TorusLifeConfig::default().generations(3)).expect("load");
    assert_eq!(advanced.generation(), 3);
    assert_eq!(advanced.rollback_limit(), 3);
    assert_eq!(collect_live(&advanced), HashSet::from([(2, 1), (2, 2), (2, 3)]));

    std::fs::remove_file(&path).expect("cleanup");
}

#[test]
fn load_reports_missing_file_and_bad_format() {
    let missing = std::env::temp_dir().join("torus_life_no_such_board.txt");
    let err = TorusLife::load(&missing, TorusLifeConfig::default()).unwrap_err();
    assert!(matches!(err, LifeError::FileNotFound { .. }), "{err}");

    let path = temp_board_file("five four\n");
    let err = TorusLife::load(&path, TorusLifeConfig::default()).unwrap_err();
    assert!(matches!(err, LifeError::Format { .. }), "{err}");
    std::fs::remove_file(&path).expect("cleanup");
}

#[test]
fn loads_board_file_with_non_text_rows() {
    let path = temp_board_file(b"3 1\n*\xE9*\n");
    let engine = TorusLife::load(&path, TorusLifeConfig::default()).expect("load");
    assert_eq!(engine.population(), 2);
    assert_eq!(collect_live(&engine), HashSet::from([(0, 0), (0, 2)]));
    std::fs::remove_file(&path).expect("cleanup");
}

#[test]
fn load_checks_symbols_before_reading() {
    let missing = std::env::temp_dir().join("torus_life_no_such_board.txt");
    let config = TorusLifeConfig::default().live_symbol('x').dead_symbol('x');
    let err = TorusLife::load(&missing, config).unwrap_err();
    assert!(matches!(err, LifeError::Configuration(_)), "{err}");
}
