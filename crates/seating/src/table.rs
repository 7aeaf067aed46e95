//! Table - one seat of capacity, holding at most one visit.

use crate::guest::Visit;

#[derive(Debug)]
pub struct Table {
    number: usize,
    occupant: Option<Visit>,
}

impl Table {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            occupant: None,
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn occupant(&self) -> Option<&Visit> {
        self.occupant.as_ref()
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Put a visit at this table.
    ///
    /// The table must be free; the caller checks with `is_free()` first.
    pub(crate) fn seat(&mut self, visit: Visit) {
        debug_assert!(self.is_free(), "table {} already occupied", self.number);
        self.occupant = Some(visit);
    }

    /// Remove the current visit, if any.
    pub(crate) fn clear(&mut self) -> Option<Visit> {
        self.occupant.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guest::Guest;
    use std::time::Duration;

    #[test]
    fn new_table_is_free() {
        let table = Table::new(3);
        assert_eq!(table.number(), 3);
        assert!(table.is_free());
        assert!(table.occupant().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn seat_and_clear() {
        let mut table = Table::new(1);
        table.seat(Guest::with_duration("Arman", Duration::from_secs(3)).seat());
        assert!(!table.is_free());
        assert_eq!(table.occupant().map(|v| v.name()), Some("Arman"));

        let visit = table.clear().expect("table should have an occupant");
        assert_eq!(visit.name(), "Arman");
        assert!(table.is_free());
        assert!(table.clear().is_none());
    }
}
