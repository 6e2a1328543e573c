//! # Sort Resolution
//!
//! Pairs the `sortby` list with the `order` list:
//! 1. equal lengths pair element-wise
//! 2. a single order applies to every sort field
//! 3. no order at all sorts every field ascending
//! 4. anything else is a size mismatch
//!
//! An order list with no sort fields is rejected.

use std::fmt;
use std::str::FromStr;

use super::errors::SyntaxError;
use super::filter::FieldPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = SyntaxError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(SyntaxError::InvalidOrder(other.to_string())),
        }
    }
}

/// One ordering key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: FieldPath,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(field: &str, direction: Direction) -> Self {
        Self {
            field: FieldPath::from_dotted(field),
            direction,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == Direction::Desc
    }
}

/// Renders as an ORM order term: `-field` for descending
impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "{}", self.field),
            Direction::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Combine sort fields and direction tokens into ordering keys
pub fn resolve(sortby: &[String], order: &[String]) -> Result<Vec<SortKey>, SyntaxError> {
    if sortby.is_empty() {
        if !order.is_empty() {
            return Err(SyntaxError::UnusedOrder);
        }
        return Ok(Vec::new());
    }

    if sortby.len() == order.len() {
        sortby
            .iter()
            .zip(order)
            .map(|(field, token)| token.parse().map(|direction| SortKey::new(field, direction)))
            .collect()
    } else if order.len() == 1 {
        let direction: Direction = order[0].parse()?;
        Ok(sortby
            .iter()
            .map(|field| SortKey::new(field, direction))
            .collect())
    } else if order.is_empty() {
        Ok(sortby
            .iter()
            .map(|field| SortKey::new(field, Direction::Asc))
            .collect())
    } else {
        Err(SyntaxError::SizeMismatch {
            sortby: sortby.len(),
            order: order.len(),
        })
    }
}
