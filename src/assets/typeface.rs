//! Typeface JSON fonts.
//!
//! The format stores each glyph as an advance width (`ha`) and an outline
//! string of single-letter commands in font units:
//!
//! - `m x y` move to
//! - `l x y` line to
//! - `q x y cx cy` quadratic curve ending at (x, y)
//! - `b x y c1x c1y c2x c2y` cubic curve ending at (x, y)
//! - `z` close the current contour

use std::collections::HashMap;
use std::str::SplitWhitespace;

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::TimelineError;

/// One drawing command from a glyph outline, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlineCommand {
    /// Start a new contour.
    MoveTo(Vec2),
    /// Straight segment.
    LineTo(Vec2),
    /// Quadratic Bézier segment.
    QuadTo {
        /// Control point.
        ctrl: Vec2,
        /// End point.
        to: Vec2,
    },
    /// Cubic Bézier segment.
    CubicTo {
        /// First control point.
        ctrl1: Vec2,
        /// Second control point.
        ctrl2: Vec2,
        /// End point.
        to: Vec2,
    },
    /// Close the current contour.
    Close,
}

/// A single glyph's metrics and outline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Glyph {
    /// Horizontal advance in font units.
    pub advance: f32,
    /// Outline commands (empty for whitespace).
    pub outline: Vec<OutlineCommand>,
}

/// A parsed typeface.
#[derive(Debug, Clone, PartialEq)]
pub struct Typeface {
    /// Family name the registry keys the font by.
    pub family_name: String,
    /// Font units per em.
    pub resolution: f32,
    /// Ascender height in font units.
    pub ascender: f32,
    /// Descender depth in font units (usually negative).
    pub descender: f32,
    glyphs: FxHashMap<char, Glyph>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypefaceFile {
    family_name: String,
    resolution: f32,
    #[serde(default)]
    ascender: f32,
    #[serde(default)]
    descender: f32,
    glyphs: HashMap<String, GlyphFile>,
}

#[derive(Deserialize)]
struct GlyphFile {
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

impl Typeface {
    /// A font with no glyphs.
    #[must_use]
    pub fn empty(family_name: &str) -> Self {
        Self {
            family_name: family_name.to_owned(),
            resolution: 1000.0,
            ascender: 0.0,
            descender: 0.0,
            glyphs: FxHashMap::default(),
        }
    }

    /// Parse a typeface JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::FontParse`] if the JSON is malformed or an
    /// outline contains an unknown command or missing coordinates.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TimelineError> {
        let file: TypefaceFile = serde_json::from_slice(bytes)
            .map_err(|e| TimelineError::FontParse(e.to_string()))?;
        if file.resolution <= 0.0 {
            return Err(TimelineError::FontParse(format!(
                "{}: resolution must be positive",
                file.family_name
            )));
        }

        let mut glyphs = FxHashMap::default();
        for (key, glyph) in file.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                log::debug!("skipping multi-character glyph key {key:?}");
                continue;
            };
            let outline = match glyph.o.as_deref() {
                Some(o) => parse_outline(o).map_err(|e| {
                    TimelineError::FontParse(format!(
                        "{} glyph {ch:?}: {e}",
                        file.family_name
                    ))
                })?,
                None => Vec::new(),
            };
            let _ = glyphs.insert(
                ch,
                Glyph {
                    advance: glyph.ha,
                    outline,
                },
            );
        }

        Ok(Self {
            family_name: file.family_name,
            resolution: file.resolution,
            ascender: file.ascender,
            descender: file.descender,
            glyphs,
        })
    }

    /// Glyph for `ch`, falling back to `?` when the font lacks it.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch).or_else(|| self.glyphs.get(&'?'))
    }

    /// Add or replace a glyph.
    pub fn insert_glyph(&mut self, ch: char, glyph: Glyph) {
        let _ = self.glyphs.insert(ch, glyph);
    }

    /// Number of glyphs.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

fn parse_outline(outline: &str) -> Result<Vec<OutlineCommand>, String> {
    let mut tokens = outline.split_whitespace();
    let mut commands = Vec::new();

    while let Some(op) = tokens.next() {
        let command = match op {
            "m" => OutlineCommand::MoveTo(next_point(&mut tokens)?),
            "l" => OutlineCommand::LineTo(next_point(&mut tokens)?),
            "q" => {
                let to = next_point(&mut tokens)?;
                let ctrl = next_point(&mut tokens)?;
                OutlineCommand::QuadTo { ctrl, to }
            }
            "b" => {
                let to = next_point(&mut tokens)?;
                let ctrl1 = next_point(&mut tokens)?;
                let ctrl2 = next_point(&mut tokens)?;
                OutlineCommand::CubicTo { ctrl1, ctrl2, to }
            }
            "z" => OutlineCommand::Close,
            other => return Err(format!("unknown outline command {other:?}")),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn next_point(tokens: &mut SplitWhitespace<'_>) -> Result<Vec2, String> {
    let x = next_coord(tokens)?;
    let y = next_coord(tokens)?;
    Ok(Vec2::new(x, y))
}

fn next_coord(tokens: &mut SplitWhitespace<'_>) -> Result<f32, String> {
    tokens
        .next()
        .ok_or_else(|| "truncated outline".to_owned())?
        .parse::<f32>()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &str = r#"{
        "familyName": "Schnyder L",
        "resolution": 1000,
        "ascender": 800,
        "descender": -200,
        "glyphs": {
            "I": { "ha": 300, "x_min": 0, "x_max": 300,
                   "o": "m 0 0 l 300 0 l 300 700 l 0 700 z" },
            "O": { "ha": 600,
                   "o": "m 0 0 q 600 0 300 -100 b 600 700 700 200 700 500 l 0 700" },
            " ": { "ha": 250 },
            "?": { "ha": 400, "o": "m 0 0 l 10 0 l 10 10" }
        }
    }"#;

    #[test]
    fn parses_family_and_metrics() {
        let font = Typeface::from_json(FONT.as_bytes()).unwrap();
        assert_eq!(font.family_name, "Schnyder L");
        assert_eq!(font.resolution, 1000.0);
        assert_eq!(font.descender, -200.0);
        assert_eq!(font.glyph_count(), 4);
    }

    #[test]
    fn curve_commands_put_end_point_first() {
        let font = Typeface::from_json(FONT.as_bytes()).unwrap();
        let o = font.glyph('O').unwrap();
        assert_eq!(
            o.outline[1],
            OutlineCommand::QuadTo {
                ctrl: Vec2::new(300.0, -100.0),
                to: Vec2::new(600.0, 0.0),
            }
        );
        assert_eq!(
            o.outline[2],
            OutlineCommand::CubicTo {
                ctrl1: Vec2::new(700.0, 200.0),
                ctrl2: Vec2::new(700.0, 500.0),
                to: Vec2::new(600.0, 700.0),
            }
        );
    }

    #[test]
    fn whitespace_glyph_has_advance_only() {
        let font = Typeface::from_json(FONT.as_bytes()).unwrap();
        let space = font.glyph(' ').unwrap();
        assert_eq!(space.advance, 250.0);
        assert!(space.outline.is_empty());
    }

    #[test]
    fn missing_glyph_falls_back_to_question_mark() {
        let font = Typeface::from_json(FONT.as_bytes()).unwrap();
        assert_eq!(font.glyph('Z').map(|g| g.advance), Some(400.0));
    }

    #[test]
    fn rejects_bad_outlines() {
        let truncated = r#"{"familyName":"X","resolution":1000,
            "glyphs":{"A":{"ha":1,"o":"m 0"}}}"#;
        assert!(matches!(
            Typeface::from_json(truncated.as_bytes()),
            Err(TimelineError::FontParse(_))
        ));
        let unknown = r#"{"familyName":"X","resolution":1000,
            "glyphs":{"A":{"ha":1,"o":"m 0 0 k 1 1"}}}"#;
        assert!(Typeface::from_json(unknown.as_bytes()).is_err());
        assert!(Typeface::from_json(b"{").is_err());
    }
}
