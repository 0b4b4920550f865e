use super::types::{DeathReason, Direction, Position};

/// A snake body, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    pub segments: Vec<Position>,
    pub heading: Direction,
    pub death_reason: Option<DeathReason>,
}

impl Snake {
    /// Builds `length` contiguous segments trailing behind `head`, opposite to `heading`.
    pub fn new(head: Position, length: usize, heading: Direction) -> Self {
        if length == 0 {
            panic!("Snake must have at least one segment");
        }

        let count = match i32::try_from(length) {
            Ok(count) => count,
            Err(_) => panic!("Snake length {} does not fit the grid coordinates", length),
        };
        let (dx, dy) = heading.opposite().delta();
        let segments = (0..count)
            .map(|i| head.offset(dx * i, dy * i))
            .collect();

        Self {
            segments,
            heading,
            death_reason: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.death_reason.is_none()
    }

    pub fn head(&self) -> Position {
        *self.segments.first().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Position {
        *self.segments.last().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments behind the head.
    pub fn body(&self) -> &[Position] {
        &self.segments[1..]
    }

    pub fn occupies(&self, position: Position) -> bool {
        self.segments.contains(&position)
    }

    /// Segment count is the only score the game keeps.
    pub fn score(&self) -> usize {
        self.len()
    }

    pub(crate) fn extrude(&mut self) {
        let head = self.head();
        self.segments.insert(0, head);
        self.segments[0] = head.moved(self.heading);
    }

    pub(crate) fn contract(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop();
        }
    }

    pub(crate) fn kill(&mut self, reason: DeathReason) {
        if self.is_alive() {
            self.death_reason = Some(reason);
        }
    }
}

/// Heading, length and segment order decide equality; liveness does not.
impl PartialEq for Snake {
    fn eq(&self, other: &Self) -> bool {
        self.heading == other.heading && self.segments == other.segments
    }
}

impl Eq for Snake {}
