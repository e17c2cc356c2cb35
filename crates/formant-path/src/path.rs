#![forbid(unsafe_code)]

//! Path parsing and value-tree addressing.
//!
//! # Design
//!
//! A path string is a single forward scan: dotted keys, each optionally
//! followed by bracketed base-10 array indices (`user.addresses[0].street`,
//! `matrix[1][2]`, `[0].name` for an array root). The parsed form is a flat
//! list of [`Segment`]s; [`std::fmt::Display`] renders the canonical string,
//! and parsing that string yields the same segments back.
//!
//! # Invariants
//!
//! 1. Parse/Display round-trip: `parse(p.to_string()) == p`.
//! 2. [`FieldPath::resolve`] never errors — absent or kind-mismatched
//!    locations are `None`.
//! 3. [`FieldPath::write`] either writes exactly one slot or fails without
//!    modifying the tree's shape along the unresolved prefix.

use serde_json::Value;

use crate::error::PathError;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A parsed field path: the sole addressing mechanism into a form's value
/// tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a path string.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut chars = input.char_indices().peekable();
        let mut first = true;

        loop {
            let key_start = chars.peek().map_or(input.len(), |&(i, _)| i);

            let mut key = String::new();
            while let Some(&(i, c)) = chars.peek() {
                if c == '.' || c == '[' {
                    break;
                }
                if c == ']' {
                    return Err(PathError::UnexpectedChar { found: ']', at: i });
                }
                key.push(c);
                chars.next();
            }

            let at_bracket = matches!(chars.peek(), Some(&(_, '[')));
            if key.is_empty() {
                // A bare bracket segment is only legal at the very start
                // (array-rooted data).
                if !(first && at_bracket) {
                    return Err(PathError::EmptySegment { at: key_start });
                }
            } else {
                segments.push(Segment::Key(key));
            }

            while let Some(&(open, '[')) = chars.peek() {
                chars.next();
                let mut digits = String::new();
                let mut closed = false;
                while let Some(&(_, c)) = chars.peek() {
                    if c == ']' {
                        chars.next();
                        closed = true;
                        break;
                    }
                    digits.push(c);
                    chars.next();
                }
                if !closed {
                    return Err(PathError::UnclosedBracket { at: open });
                }
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(PathError::InvalidIndex {
                        text: digits,
                        at: open,
                    });
                }
                let index: usize = digits.parse().map_err(|_| PathError::InvalidIndex {
                    text: digits.clone(),
                    at: open,
                })?;
                segments.push(Segment::Index(index));
            }

            match chars.next() {
                None => break,
                Some((i, '.')) => {
                    if chars.peek().is_none() {
                        return Err(PathError::EmptySegment { at: i + 1 });
                    }
                    first = false;
                }
                Some((i, found)) => return Err(PathError::UnexpectedChar { found, at: i }),
            }
        }

        Ok(Self { segments })
    }

    /// The parsed segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolve the path against a value tree.
    ///
    /// Absent keys, out-of-range indices, and kind mismatches along the way
    /// all read as absence.
    #[must_use]
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                Segment::Key(key) => current.as_object()?.get(key)?,
                Segment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Write `value` at this path, in place.
    ///
    /// Every intermediate segment must already resolve to a container of
    /// the right kind. The final segment may insert a new key into an
    /// existing object (map-shaped fields) or append at exactly the end of
    /// an array; any other out-of-range index fails.
    pub fn write(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        let (last, init) = self.segments.split_last().ok_or(PathError::Empty)?;

        let mut current = root;
        for segment in init {
            current = match segment {
                Segment::Key(key) => {
                    let kind = kind_of(current);
                    current
                        .as_object_mut()
                        .ok_or(PathError::Unresolvable {
                            segment: segment.to_string(),
                            kind,
                        })?
                        .get_mut(key)
                        .ok_or(PathError::Unresolvable {
                            segment: segment.to_string(),
                            kind: "nothing",
                        })?
                }
                Segment::Index(index) => {
                    let kind = kind_of(current);
                    let array = current.as_array_mut().ok_or(PathError::Unresolvable {
                        segment: segment.to_string(),
                        kind,
                    })?;
                    let len = array.len();
                    array.get_mut(*index).ok_or(PathError::IndexOutOfBounds {
                        index: *index,
                        len,
                    })?
                }
            };
        }

        match last {
            Segment::Key(key) => {
                let kind = kind_of(current);
                current
                    .as_object_mut()
                    .ok_or(PathError::Unresolvable {
                        segment: last.to_string(),
                        kind,
                    })?
                    .insert(key.clone(), value);
            }
            Segment::Index(index) => {
                let kind = kind_of(current);
                let array = current.as_array_mut().ok_or(PathError::Unresolvable {
                    segment: last.to_string(),
                    kind,
                })?;
                let len = array.len();
                if *index < len {
                    array[*index] = value;
                } else if *index == len {
                    array.push(value);
                } else {
                    return Err(PathError::IndexOutOfBounds { index: *index, len });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, Segment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
