use glam::IVec2;
use mazechase::constants::{MapTile, RAW_BOARD};
use mazechase::error::{GameError, ParseError};
use mazechase::map::parser::LevelParser;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_parse_default_board() {
    let level = LevelParser::parse_rows(&RAW_BOARD).unwrap();

    assert_that(&level.width).is_equal_to(28);
    assert_that(&level.height).is_equal_to(31);
    assert_that(&level.player_spawn).is_equal_to(IVec2::new(13, 23));
    assert_that(&level.power_pellets.len()).is_equal_to(4);
    assert_that(&level.tunnel_rows.contains(&14)).is_true();
    assert_that(&level.tiles.len()).is_equal_to(28 * 31);
}

#[test]
fn test_parse_small_level() {
    let level = LevelParser::parse("#####\n#P.o#\n#T  #\n#####").unwrap();

    assert_eq!(level.width, 5);
    assert_eq!(level.height, 4);
    assert_eq!(level.player_spawn, IVec2::new(1, 1));
    assert!(level.pellets.contains(&IVec2::new(2, 1)));
    assert!(level.power_pellets.contains(&IVec2::new(3, 1)));
    assert_eq!(level.tunnel_rows.iter().copied().collect::<Vec<_>>(), vec![2]);
    assert_eq!(level.tiles[0], MapTile::Wall);
    assert_eq!(level.tiles[5 + 1], MapTile::Open);
}

#[test]
fn test_parse_pads_short_rows_and_skips_blank_lines() {
    let level = LevelParser::parse("\n#####\r\n#P\n\n#####\n").unwrap();

    assert_eq!(level.width, 5);
    assert_eq!(level.height, 3);
    // Padding is open space.
    assert_eq!(level.tiles[5 + 4], MapTile::Open);
}

#[test]
fn test_parse_empty_level() {
    assert_that(&LevelParser::parse("")).is_err_containing(ParseError::EmptyLevel);
    assert_that(&LevelParser::parse("\n\n\r\n")).is_err_containing(ParseError::EmptyLevel);
}

#[test]
fn test_parse_missing_spawn() {
    assert_that(&LevelParser::parse("#####\n#...#\n#####")).is_err_containing(ParseError::MissingPlayerSpawn);
}

#[test]
fn test_parse_multiple_spawns() {
    assert_eq!(
        LevelParser::parse("#####\n#P.P#\n#####").unwrap_err(),
        ParseError::MultiplePlayerSpawns {
            first: IVec2::new(1, 1),
            second: IVec2::new(3, 1),
        }
    );
}

#[test]
fn test_parse_unknown_character() {
    let mut board = RAW_BOARD;
    board[5] = "#......X...................#";

    assert_eq!(
        LevelParser::parse_rows(&board).unwrap_err(),
        ParseError::UnknownCharacter {
            character: 'X',
            row: 5,
            col: 7,
        }
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = LevelParser::load("definitely/not/a/level.txt");
    assert!(matches!(result, Err(GameError::Io(_))));
}
