use std::collections::HashSet;

use amazing::{
    Coord, Direction, Generator, Grid, Maze, MazeError,
    config::MazeConfig,
    output,
    solvers::{solve_bfs, trace_path},
};

fn build(
    width: usize,
    height: usize,
    seed: u64,
    generator: Generator,
    perfect: bool,
) -> (Maze, String) {
    let mut maze = Maze::new(width, height, Some(seed)).unwrap();
    maze.carve_pattern();
    maze.generate(generator, (0, 0), None).unwrap();
    maze.reset_visited();
    if !perfect {
        maze.inject_imperfection(0.3).unwrap();
    }
    let path = maze.solve((0, 0), (width - 1, height - 1), None).unwrap();
    (maze, path)
}

/// Follows `path` through open walls only.
fn walk(grid: &Grid, entry: Coord, path: &str) -> Coord {
    path.chars().fold(entry, |at, letter| {
        let direction = Direction::from_letter(letter).unwrap();
        assert!(!grid.has_wall(at, direction), "path crosses a wall at {at:?}");
        grid.neighbor(at, direction).unwrap()
    })
}

#[test]
fn test_end_to_end_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("maze.txt");

    for generator in [Generator::RecurBacktrack, Generator::Prim] {
        let (maze, path) = build(20, 15, 42, generator, false);
        maze.write_output(&file, (0, 0), (19, 14), &path).unwrap();

        let parsed = output::read(&file).unwrap();
        assert_eq!(parsed.entry, (0, 0));
        assert_eq!(parsed.exit, (19, 14));
        assert_eq!(parsed.path, path);
        for coord in maze.grid().coords() {
            assert_eq!(parsed.grid[coord].mask(), maze.grid()[coord].mask());
        }

        assert_eq!(walk(&parsed.grid, parsed.entry, &parsed.path), parsed.exit);
        // The file alone is enough to find a path of the same length
        let resolved = solve_bfs(&parsed.grid, parsed.entry, parsed.exit, None).unwrap();
        assert_eq!(resolved.len(), path.len());
    }
}

#[test]
fn test_seeded_builds_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let (a, b) = (dir.path().join("a.txt"), dir.path().join("b.txt"));

    let (maze, path) = build(17, 11, 1234, Generator::Prim, false);
    maze.write_output(&a, (0, 0), (16, 10), &path).unwrap();
    let (maze, path) = build(17, 11, 1234, Generator::Prim, false);
    maze.write_output(&b, (0, 0), (16, 10), &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(a).unwrap(),
        std::fs::read_to_string(b).unwrap()
    );

    let (other, _) = build(17, 11, 1235, Generator::Prim, false);
    assert_ne!(other.grid(), maze.grid());
}

#[test]
fn test_perfect_maze_has_tree_shape() {
    let (maze, path) = build(25, 18, 3, Generator::RecurBacktrack, true);
    let grid = maze.grid();
    let free = grid.coords().filter(|&c| !grid.is_pattern(c)).count();
    assert_eq!(grid.open_passages(), free - 1);
    assert!(grid.pattern_cells().all(|c| grid[c].is_sealed()));

    let cells = trace_path((0, 0), &path).unwrap();
    let unique = cells.iter().collect::<HashSet<_>>();
    assert_eq!(unique.len(), cells.len(), "shortest path revisits a cell");
    assert!(cells.iter().all(|&c| !grid.is_pattern(c)));
}

#[test]
fn test_small_maze_skips_pattern() {
    let (maze, path) = build(6, 4, 9, Generator::Prim, true);
    assert_eq!(maze.grid().pattern_cells().count(), 0);
    assert_eq!(maze.grid().open_passages(), 6 * 4 - 1);
    assert_eq!(walk(maze.grid(), (0, 0), &path), (5, 3));
}

#[test]
fn test_entry_on_pattern_is_rejected() {
    let mut maze = Maze::new(9, 7, Some(0)).unwrap();
    maze.try_carve_pattern().unwrap();
    // The glyph fills the maze exactly, leaving a one-cell margin
    assert!(maze.grid().is_pattern((1, 1)));
    assert_eq!(
        maze.generate(Generator::RecurBacktrack, (1, 1), None),
        Err(MazeError::BlockedCell { coord: (1, 1) })
    );
    assert!(maze.generate(Generator::RecurBacktrack, (0, 0), None).is_ok());
}

#[test]
fn test_config_file_drives_a_build() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.txt");
    let output_path = dir.path().join("out.txt");
    std::fs::write(
        &config_path,
        format!(
            "WIDTH=12\nHEIGHT=9\nENTRY=0,8\nEXIT=11,0\nOUTPUT_FILE={}\nPERFECT=True\nSEED=5\n",
            output_path.display()
        ),
    )
    .unwrap();

    let config = MazeConfig::load(&config_path).unwrap();
    let mut maze = Maze::new(config.width, config.height, config.seed).unwrap();
    maze.carve_pattern();
    maze.generate(Generator::Prim, config.entry, None).unwrap();
    let path = maze.solve(config.entry, config.exit, None).unwrap();
    maze.write_output(&config.output_file, config.entry, config.exit, &path)
        .unwrap();

    let parsed = output::read(&output_path).unwrap();
    assert_eq!(walk(&parsed.grid, (0, 8), &parsed.path), (11, 0));
}

#[test]
fn test_exit_on_pattern_gives_empty_path() {
    let mut maze = Maze::new(20, 15, Some(1)).unwrap();
    maze.try_carve_pattern().unwrap();
    maze.generate(Generator::RecurBacktrack, (0, 0), None).unwrap();
    let exit = maze.grid().pattern_cells().next().unwrap();
    assert_eq!(exit, (6, 5));
    assert_eq!(maze.solve((0, 0), exit, None), Ok(String::new()));
}
