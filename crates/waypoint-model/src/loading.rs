// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Instance loader for planar TSP instances.
//!
//! Two input layouts are understood. TSPLIB files with a `KEY : VALUE` header
//! (`DIMENSION` is required, `NAME` is kept, `EDGE_WEIGHT_TYPE` must be a
//! planar coordinate metric when present) followed by a `NODE_COORD_SECTION`
//! of `id x y` lines and an optional `EOF` marker. Plain files start with the
//! number of cities followed by one `x y` pair per city.
//!
//! The parser accepts any `BufRead`, file path, raw reader, or string slice.
//! Lines may contain comments introduced by `#`, which are ignored during
//! tokenization. With strict node ids enabled (the default) every id in a
//! coordinate section must lie in `1..=n` and appear exactly once; otherwise
//! ids are ignored and coordinates are taken in file order.

use crate::cost::{
    Coordinates, EdgeWeightType, EuclideanDistance, RoundedEuclideanDistance, TsplibDistance,
};
use fixedbitset::FixedBitSet;
use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended unexpectedly (e.g., missing tokens).
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The number of cities is missing or zero.
    InvalidDimensions,
    /// A required header key is absent.
    MissingHeader(&'static str),
    /// The header names an edge weight type that is not a planar metric.
    UnsupportedEdgeWeightType(String),
    /// A coordinate line names a node outside `1..=n`.
    NodeOutOfRange { node: usize, num_cities: usize },
    /// A coordinate line repeats a node id.
    DuplicateNode { node: usize },
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidDimensions => {
                write!(f, "The number of cities must be a positive integer")
            }
            Self::MissingHeader(key) => write!(f, "Missing required header entry {}", key),
            Self::UnsupportedEdgeWeightType(kind) => {
                write!(f, "Unsupported edge weight type {}", kind)
            }
            Self::NodeOutOfRange { node, num_cities } => write!(
                f,
                "Node {} is out of range for an instance with {} cities",
                node, num_cities
            ),
            Self::DuplicateNode { node } => write!(f, "Node {} is listed more than once", node),
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for InstanceLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

/// A loaded planar instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    name: Option<String>,
    edge_weight_type: EdgeWeightType,
    coordinates: Coordinates,
}

impl Instance {
    /// Returns the `NAME` header entry, if the file had one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the metric named by `EDGE_WEIGHT_TYPE`. Files without the entry,
    /// and plain files, use `EUC_2D`.
    #[inline]
    pub fn edge_weight_type(&self) -> EdgeWeightType {
        self.edge_weight_type
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.coordinates.num_cities()
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Returns an exact Euclidean cost oracle over the instance.
    #[inline]
    pub fn euclidean(&self) -> EuclideanDistance {
        EuclideanDistance::new(self.coordinates.clone())
    }

    /// Returns a TSPLIB `EUC_2D` (rounded) cost oracle over the instance,
    /// whatever metric the file names.
    #[inline]
    pub fn rounded(&self) -> RoundedEuclideanDistance {
        RoundedEuclideanDistance::new(self.coordinates.clone())
    }

    /// Returns the integer cost oracle of the metric the file names.
    #[inline]
    pub fn tsplib(&self) -> TsplibDistance {
        TsplibDistance::new(self.coordinates.clone(), self.edge_weight_type)
    }
}

/// A configurable loader for planar TSP instances.
///
/// # Configuration
/// * `strict_node_ids`: If true (the default), node ids in a TSPLIB coordinate
///   section must be a permutation of `1..=n` and coordinates are stored by id.
///   If false, ids are ignored and coordinates are assigned in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader {
    strict_node_ids: bool,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self {
            strict_node_ids: true,
        }
    }
}

impl InstanceLoader {
    /// Creates a new `InstanceLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether node ids in a coordinate section are validated.
    #[inline]
    pub fn strict_node_ids(mut self, yes: bool) -> Self {
        self.strict_node_ids = yes;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Instance, InstanceLoaderError> {
        let mut sc = Scanner::new(rdr);

        let first = loop {
            match sc.next_line()? {
                None => return Err(InstanceLoaderError::UnexpectedEof),
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
            }
        };

        if let Ok(n) = first.parse::<usize>() {
            return self.read_plain(&mut sc, n);
        }

        let mut name = None;
        let mut dimension = None;
        let mut edge_weight_type = EdgeWeightType::default();
        let mut pending = Some(first);
        loop {
            let line = match pending.take() {
                Some(line) => line,
                None => sc.next_line()?.ok_or(InstanceLoaderError::UnexpectedEof)?,
            };
            if line.is_empty() {
                continue;
            }
            if line == "NODE_COORD_SECTION" {
                break;
            }

            let (key, value) = match line.split_once(':') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => match line.split_once(char::is_whitespace) {
                    Some((key, value)) => (key.trim(), value.trim()),
                    None => (line.as_str(), ""),
                },
            };

            match key {
                "NAME" => name = Some(value.to_owned()),
                "DIMENSION" => dimension = Some(parse_token::<usize>(value)?),
                "EDGE_WEIGHT_TYPE" => {
                    edge_weight_type = EdgeWeightType::from_keyword(value).ok_or_else(|| {
                        InstanceLoaderError::UnsupportedEdgeWeightType(value.to_owned())
                    })?;
                }
                _ => {}
            }
        }

        let n = dimension.ok_or(InstanceLoaderError::MissingHeader("DIMENSION"))?;
        if n == 0 {
            return Err(InstanceLoaderError::InvalidDimensions);
        }

        let mut points = vec![(0.0, 0.0); n];
        let mut seen = FixedBitSet::with_capacity(n);
        for k in 0..n {
            let node: usize = sc.next()?;
            let x: f64 = sc.next()?;
            let y: f64 = sc.next()?;

            let slot = if self.strict_node_ids {
                if node == 0 || node > n {
                    return Err(InstanceLoaderError::NodeOutOfRange {
                        node,
                        num_cities: n,
                    });
                }
                if seen.put(node - 1) {
                    return Err(InstanceLoaderError::DuplicateNode { node });
                }
                node - 1
            } else {
                k
            };
            points[slot] = (x, y);
        }

        Ok(Instance {
            name,
            edge_weight_type,
            coordinates: Coordinates::new(points),
        })
    }

    fn read_plain<R: BufRead>(
        &self,
        sc: &mut Scanner<R>,
        n: usize,
    ) -> Result<Instance, InstanceLoaderError> {
        if n == 0 {
            return Err(InstanceLoaderError::InvalidDimensions);
        }
        let mut points = Vec::with_capacity(n);
        for _ in 0..n {
            let x: f64 = sc.next()?;
            let y: f64 = sc.next()?;
            points.push((x, y));
        }
        Ok(Instance {
            name: None,
            edge_weight_type: EdgeWeightType::default(),
            coordinates: Coordinates::new(points),
        })
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Instance, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Instance, InstanceLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn parse_token<T: FromStr>(token: &str) -> Result<T, InstanceLoaderError> {
    token.parse::<T>().map_err(|_| {
        InstanceLoaderError::Parse(ParseTokenError {
            token: token.to_owned(),
            type_name: std::any::type_name::<T>(),
        })
    })
}

/// Reads comment-stripped lines and whitespace-delimited tokens from a reader.
struct Scanner<R> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Refills the internal line buffer with any comment stripped.
    /// Returns `Ok(true)` if data was read, `Ok(false)` on EOF.
    fn fill_line(&mut self) -> Result<bool, InstanceLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self.rdr.read_line(&mut self.buf)?;
        if let Some(comment) = self.buf.find('#') {
            self.buf.truncate(comment);
        }
        Ok(n > 0)
    }

    /// Returns the unread rest of the current line, or the next line, trimmed.
    fn next_line(&mut self) -> Result<Option<String>, InstanceLoaderError> {
        if self.pos >= self.buf.len() && !self.fill_line()? {
            return Ok(None);
        }
        let line = self.buf[self.pos..].trim().to_owned();
        self.pos = self.buf.len();
        Ok(Some(line))
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, InstanceLoaderError>
    where
        T: FromStr,
    {
        loop {
            if self.pos >= self.buf.len() && !self.fill_line()? {
                return Err(InstanceLoaderError::UnexpectedEof);
            }

            let rest = &self.buf[self.pos..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                self.pos = self.buf.len();
                continue;
            }

            let skipped = rest.len() - trimmed.len();
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            let token = &trimmed[..end];

            // The end-of-file marker may only follow a complete section.
            if token == "EOF" {
                return Err(InstanceLoaderError::UnexpectedEof);
            }

            let parsed = parse_token(token);
            self.pos += skipped + end;
            return parsed;
        }
    }
}
