//! SVG path-data parsing and formatting.
//!
//! Supported commands: `M`, `L`, `H`, `V`, `Q`, `T`, `Z` and their relative
//! lower-case forms. Cubic (`C`, `S`) and arc (`A`) commands are recognised
//! but rejected, since a path only holds quadratic curves.

use crate::error::PolyError;
use crate::path::{Path, PathSegment};
use crate::primitives::Point2;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

/// Parses SVG path data into a [`Path`].
///
/// `Z` closes the subpath with a line back to its start unless the current
/// point is already there. Empty or whitespace-only input yields an empty
/// path.
///
/// # Example
///
/// ```
/// use pathpoly::io::parse_path_data;
///
/// let path = parse_path_data("M 0 0 h 10 v 10 Q 5 15 0 10 z").unwrap();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path.subpath_count(), 1);
/// ```
pub fn parse_path_data(data: &str) -> Result<Path, PolyError> {
    PathDataParser::new(data).parse()
}

/// Formats a path as SVG path data with absolute commands.
///
/// Curves are written as `Q control end`.
pub fn format_path_data(path: &Path) -> String {
    let mut out = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // writing to a String cannot fail
        let _ = match *segment {
            PathSegment::MoveTo(p) => write!(out, "M{} {}", p.x, p.y),
            PathSegment::LineTo(p) => write!(out, "L{} {}", p.x, p.y),
            PathSegment::CurveTo { to, control } => {
                write!(out, "Q{} {} {} {}", control.x, control.y, to.x, to.y)
            }
        };
    }
    out
}

impl FromStr for Path {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path_data(s)
    }
}

struct PathDataParser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    path: Path,
    current: Point2<f64>,
    subpath_start: Point2<f64>,
    /// Control point of the previous quadratic segment, for `T`.
    last_control: Option<Point2<f64>>,
}

impl<'a> PathDataParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            path: Path::new(),
            current: Point2::origin(),
            subpath_start: Point2::origin(),
            last_control: None,
        }
    }

    fn parse(mut self) -> Result<Path, PolyError> {
        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_whitespace() || c == ',' {
                self.chars.next();
                continue;
            }
            if !c.is_ascii_alphabetic() {
                return Err(PolyError::UnexpectedChar(c, pos));
            }
            self.chars.next();
            self.command(c, pos)?;
        }
        Ok(self.path)
    }

    fn command(&mut self, letter: char, pos: usize) -> Result<(), PolyError> {
        let relative = letter.is_ascii_lowercase();
        match letter.to_ascii_uppercase() {
            'M' => {
                let p = self.point(relative)?;
                self.push(PathSegment::MoveTo(p));
                self.subpath_start = p;
                // further pairs are implicit lines
                while self.has_number() {
                    let p = self.point(relative)?;
                    self.push(PathSegment::LineTo(p));
                }
            }
            'L' => loop {
                let p = self.point(relative)?;
                self.push(PathSegment::LineTo(p));
                if !self.has_number() {
                    break;
                }
            },
            'H' => loop {
                let x = self.number()?;
                let x = if relative { self.current.x + x } else { x };
                self.push(PathSegment::LineTo(Point2::new(x, self.current.y)));
                if !self.has_number() {
                    break;
                }
            },
            'V' => loop {
                let y = self.number()?;
                let y = if relative { self.current.y + y } else { y };
                self.push(PathSegment::LineTo(Point2::new(self.current.x, y)));
                if !self.has_number() {
                    break;
                }
            },
            'Q' => loop {
                let control = self.point(relative)?;
                let to = self.point(relative)?;
                self.push(PathSegment::CurveTo { to, control });
                if !self.has_number() {
                    break;
                }
            },
            'T' => loop {
                let control = match self.last_control {
                    Some(c) => self.current + (self.current - c),
                    None => self.current,
                };
                let to = self.point(relative)?;
                self.push(PathSegment::CurveTo { to, control });
                if !self.has_number() {
                    break;
                }
            },
            'Z' => {
                if self.current != self.subpath_start {
                    self.push(PathSegment::LineTo(self.subpath_start));
                }
                self.last_control = None;
            }
            'C' | 'S' | 'A' => return Err(PolyError::UnsupportedCommand(letter, pos)),
            _ => return Err(PolyError::UnknownCommand(letter, pos)),
        }
        Ok(())
    }

    fn push(&mut self, segment: PathSegment) {
        self.last_control = match segment {
            PathSegment::CurveTo { control, .. } => Some(control),
            _ => None,
        };
        self.current = segment.end_point();
        self.path.push(segment);
    }

    fn point(&mut self, relative: bool) -> Result<Point2<f64>, PolyError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(if relative {
            Point2::new(self.current.x + x, self.current.y + y)
        } else {
            Point2::new(x, y)
        })
    }

    fn skip_separators(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_whitespace() || c == ',' {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    fn has_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.chars.peek(), Some(&(_, c)) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
    }

    fn number(&mut self) -> Result<f64, PolyError> {
        self.skip_separators();

        let start = match self.chars.peek() {
            Some(&(i, _)) => i,
            None => return Err(PolyError::ExpectedNumber(self.input.len())),
        };
        let mut end = start;

        if let Some(&(i, c)) = self.chars.peek() {
            if c == '-' || c == '+' {
                end = i + 1;
                self.chars.next();
            }
        }
        let digits_from = end;
        end = self.digits(end);
        if let Some(&(i, '.')) = self.chars.peek() {
            self.chars.next();
            end = self.digits(i + 1);
        }
        if end == digits_from {
            return Err(PolyError::ExpectedNumber(start));
        }
        if let Some(&(i, 'e' | 'E')) = self.chars.peek() {
            self.chars.next();
            end = i + 1;
            if let Some(&(i, '-' | '+')) = self.chars.peek() {
                self.chars.next();
                end = i + 1;
            }
            end = self.digits(end);
        }

        let token = &self.input[start..end];
        token
            .parse()
            .map_err(|_| PolyError::InvalidNumber(token.to_string(), start))
    }

    /// Consumes ASCII digits, returning the byte offset after the last one
    /// (or `end` if there were none).
    fn digits(&mut self, mut end: usize) -> usize {
        while let Some(&(i, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            end = i + 1;
            self.chars.next();
        }
        end
    }
}
