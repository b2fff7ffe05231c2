//! Level parsing functionality for converting text layouts into structured data.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use glam::IVec2;
use tracing::debug;

use crate::constants::MapTile;
use crate::error::{GameResult, ParseError};

/// A single character of the level description, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Open,
    Pellet,
    PowerPellet,
    Tunnel,
    PlayerSpawn,
}

impl Glyph {
    /// The static tile this glyph leaves behind once its marker is extracted.
    pub fn tile(self) -> MapTile {
        match self {
            Glyph::Wall => MapTile::Wall,
            _ => MapTile::Open,
        }
    }
}

/// Structured representation of a parsed level with its markers extracted.
#[derive(Debug, Clone)]
pub struct ParsedLevel {
    pub width: usize,
    pub height: usize,
    /// Row-major static tiles, `width * height` long.
    pub tiles: Vec<MapTile>,
    pub pellets: HashSet<IVec2>,
    pub power_pellets: HashSet<IVec2>,
    /// Rows in which at least one `T` marker appears; horizontal wraparound is legal there.
    pub tunnel_rows: BTreeSet<i32>,
    pub player_spawn: IVec2,
}

/// Parser for converting text layouts into structured level data.
pub struct LevelParser;

impl LevelParser {
    /// Classifies a single character of the level layout.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownCharacter` for any character outside the level vocabulary.
    pub fn parse_character(c: char, row: usize, col: usize) -> Result<Glyph, ParseError> {
        match c {
            '#' => Ok(Glyph::Wall),
            ' ' => Ok(Glyph::Open),
            '.' => Ok(Glyph::Pellet),
            'o' => Ok(Glyph::PowerPellet),
            'T' => Ok(Glyph::Tunnel),
            'P' => Ok(Glyph::PlayerSpawn),
            _ => Err(ParseError::UnknownCharacter { character: c, row, col }),
        }
    }

    /// Parses a text layout into structured level data.
    ///
    /// Empty lines are skipped and shorter rows are padded with open cells to the widest row.
    ///
    /// # Errors
    ///
    /// Fails if the layout is empty, contains an unknown character, or does not contain
    /// exactly one player spawn.
    pub fn parse(text: &str) -> Result<ParsedLevel, ParseError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();

        let height = lines.len();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(ParseError::EmptyLevel);
        }

        let mut tiles = vec![MapTile::Open; width * height];
        let mut pellets = HashSet::new();
        let mut power_pellets = HashSet::new();
        let mut tunnel_rows = BTreeSet::new();
        let mut player_spawn: Option<IVec2> = None;

        for (row, line) in lines.iter().enumerate() {
            for (col, character) in line.chars().enumerate() {
                let glyph = Self::parse_character(character, row, col)?;
                let cell = IVec2::new(col as i32, row as i32);

                match glyph {
                    Glyph::Pellet => {
                        pellets.insert(cell);
                    }
                    Glyph::PowerPellet => {
                        power_pellets.insert(cell);
                    }
                    Glyph::Tunnel => {
                        tunnel_rows.insert(row as i32);
                    }
                    Glyph::PlayerSpawn => {
                        if let Some(first) = player_spawn {
                            return Err(ParseError::MultiplePlayerSpawns { first, second: cell });
                        }
                        player_spawn = Some(cell);
                    }
                    Glyph::Wall | Glyph::Open => {}
                }

                tiles[row * width + col] = glyph.tile();
            }
        }

        let player_spawn = player_spawn.ok_or(ParseError::MissingPlayerSpawn)?;

        debug!(
            width,
            height,
            pellets = pellets.len(),
            power_pellets = power_pellets.len(),
            tunnel_rows = tunnel_rows.len(),
            "Level parsed"
        );

        Ok(ParsedLevel {
            width,
            height,
            tiles,
            pellets,
            power_pellets,
            tunnel_rows,
            player_spawn,
        })
    }

    /// Parses a layout given as separate rows, such as [`crate::constants::RAW_BOARD`].
    pub fn parse_rows(rows: &[&str]) -> Result<ParsedLevel, ParseError> {
        Self::parse(&rows.join("\n"))
    }

    /// Reads and parses a level file.
    pub fn load(path: impl AsRef<Path>) -> GameResult<ParsedLevel> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&text)?)
    }
}
