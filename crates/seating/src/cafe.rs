//! Cafe - owns the tables and the wait queue.
//!
//! Flow:
//! 1. `arrive()`: seat each guest at the lowest-numbered free table, queue the rest
//! 2. `drain()`: poll tables, clear finished visits, promote the queue head into freed tables
//! 3. `settle()`: keep clearing finished visits until every table is free
//!
//! The cafe is the only mutator of tables and queue. Visit timers run as
//! independent tokio tasks and only flip their own finished flag; the cafe
//! notices a departure solely by polling `Visit::is_finished()`.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::CafeConfig;
use crate::event::{EventSink, SeatingEvent};
use crate::guest::{Guest, Visit};
use crate::table::Table;

/// Delay between two reclamation passes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Counters over the cafe's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceSummary {
    /// Guests seated straight away on arrival.
    pub seated: usize,
    /// Guests that had to wait in the queue.
    pub queued: usize,
    /// Guests moved from the queue to a table.
    pub promoted: usize,
    /// Visits that finished and freed their table.
    pub departed: usize,
    /// Guests still in the queue.
    pub waiting: usize,
    /// Wall time spent in `serve()`.
    pub elapsed: Duration,
}

/// Fixed set of numbered tables plus the FIFO queue of guests waiting for one.
pub struct Cafe {
    tables: Vec<Table>,
    queue: VecDeque<Guest>,
    sink: Box<dyn EventSink>,
    poll_interval: Duration,
    summary: ServiceSummary,
}

impl Cafe {
    /// Create a cafe with tables numbered `1..=num_tables`.
    ///
    /// Zero tables is allowed: every arrival then waits in the queue.
    pub fn new(num_tables: usize, sink: impl EventSink + 'static) -> Self {
        Self {
            tables: (1..=num_tables).map(Table::new).collect(),
            queue: VecDeque::new(),
            sink: Box::new(sink),
            poll_interval: DEFAULT_POLL_INTERVAL,
            summary: ServiceSummary::default(),
        }
    }

    pub fn from_config(config: &CafeConfig, sink: impl EventSink + 'static) -> Self {
        Self::new(config.tables, sink).with_poll_interval(config.poll_interval)
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.tables.iter().filter(|t| !t.is_free()).count()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn summary(&self) -> ServiceSummary {
        ServiceSummary {
            waiting: self.queue.len(),
            ..self.summary
        }
    }

    /// Index of the lowest-numbered free table.
    pub fn find_free_table(&self) -> Option<usize> {
        self.tables.iter().position(Table::is_free)
    }

    /// Every table holds a visit (finished or not).
    pub fn all_tables_occupied(&self) -> bool {
        self.tables.iter().all(|t| !t.is_free())
    }

    /// No table holds a visit.
    pub fn all_tables_free(&self) -> bool {
        self.tables.iter().all(Table::is_free)
    }

    /// Seat or queue each guest, in order.
    ///
    /// Must run inside a tokio runtime: seating starts the visit timer.
    pub fn arrive(&mut self, guests: impl IntoIterator<Item = Guest>) {
        for guest in guests {
            match self.find_free_table() {
                Some(index) => {
                    let name = guest.name().to_string();
                    let table = &mut self.tables[index];
                    table.seat(guest.seat());
                    let number = table.number();
                    self.summary.seated += 1;
                    self.publish(SeatingEvent::Seated {
                        name,
                        table: number,
                    });
                }
                None => {
                    let name = guest.name().to_string();
                    self.queue.push_back(guest);
                    self.summary.queued += 1;
                    self.publish(SeatingEvent::Queued { name });
                }
            }
        }
    }

    /// Reclaim finished tables and promote queued guests while anyone waits.
    ///
    /// Returns once the queue is empty, without waiting for the guests still
    /// seated; use `settle()` for that.
    pub async fn drain(&mut self) {
        // Guard is "queue not empty AND not all tables free", not a plain
        // "queue not empty". If every table is free while guests still wait,
        // the loop stops without seating them. Only zero tables reach that
        // state: each pass fills every freed table from the queue before the
        // guard runs again. Whether the early stop is wanted is still open;
        // settle() keeps promoting as long as there is a table to promote into.
        while !self.queue.is_empty() && !self.all_tables_free() {
            self.reclaim_pass();
            tokio::time::sleep(self.poll_interval).await;
        }
        tracing::debug!(
            waiting = self.queue.len(),
            occupied = self.occupied_count(),
            "Drain finished"
        );
    }

    /// Keep reclaiming until every table is free.
    ///
    /// Queued guests are still promoted, so `settle()` alone empties the cafe
    /// when there is at least one table.
    pub async fn settle(&mut self) {
        loop {
            self.reclaim_pass();
            if self.all_tables_free() {
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        if !self.queue.is_empty() {
            tracing::warn!(
                waiting = self.queue.len(),
                tables = self.tables.len(),
                "Guests left waiting with no table to take"
            );
        }
    }

    /// Arrive, drain, then settle.
    pub async fn serve(&mut self, guests: impl IntoIterator<Item = Guest>) -> ServiceSummary {
        let started = Instant::now();

        self.arrive(guests);
        tracing::info!(
            tables = self.tables.len(),
            seated = self.occupied_count(),
            waiting = self.queue.len(),
            "Guests arrived"
        );

        self.drain().await;
        self.settle().await;

        self.summary.elapsed += started.elapsed();
        self.summary()
    }

    /// One sweep over the tables in number order.
    fn reclaim_pass(&mut self) {
        for index in 0..self.tables.len() {
            let finished = self.tables[index]
                .occupant()
                .is_some_and(Visit::is_finished);

            if finished && let Some(visit) = self.tables[index].clear() {
                let number = self.tables[index].number();
                tracing::trace!(
                    guest = visit.name(),
                    table = number,
                    stayed = ?visit.elapsed(),
                    "Visit finished"
                );
                self.summary.departed += 1;
                self.publish(SeatingEvent::Departed {
                    name: visit.name().to_string(),
                    table: number,
                });
            }

            if self.tables[index].is_free()
                && let Some(guest) = self.queue.pop_front()
            {
                let name = guest.name().to_string();
                let table = &mut self.tables[index];
                table.seat(guest.seat());
                let number = table.number();
                self.summary.promoted += 1;
                self.publish(SeatingEvent::Promoted {
                    name,
                    table: number,
                });
            }
        }
    }

    fn publish(&self, event: SeatingEvent) {
        tracing::debug!(
            kind = event.kind().as_str(),
            guest = event.name(),
            table = ?event.table(),
            "Seating event"
        );
        self.sink.publish(event);
    }
}
