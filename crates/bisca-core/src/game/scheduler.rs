//! Deferred actions. The game never owns a timer: it hands [`Task`]s to a
//! [`Scheduler`] and a driver feeds them back through `Game::run_task` once
//! their delay has elapsed.

use crate::model::player::PlayerId;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    BotDeclare(PlayerId),
    BotPlay(PlayerId),
    /// Clears the display of the `trick`-th trick resolved in `round`.
    ClearTable { round: u32, trick: u8 },
    NextRound,
}

/// A scheduled action, stamped with the game epoch it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub epoch: u64,
    pub kind: TaskKind,
}

pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration, task: Task);

    /// Drops a queued task. Returns false if it already fired or never existed.
    fn cancel(&mut self, id: TaskId) -> bool;
}

/// Virtual-clock scheduler. Nothing runs on its own; the driver pops due tasks.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    sequence: u64,
    queue: BTreeMap<(Duration, u64), Task>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.queue.values()
    }

    /// Time left until the earliest task is due.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Jumps the clock to the earliest task and removes it.
    pub fn pop_next(&mut self) -> Option<Task> {
        let ((due, _), task) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        Some(task)
    }

    /// Moves the clock forward and returns every task that became due, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<Task> {
        self.now += by;
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_after(&mut self, delay: Duration, task: Task) {
        self.sequence += 1;
        self.queue.insert((self.now + delay, self.sequence), task);
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let key = self
            .queue
            .iter()
            .find(|(_, task)| task.id == id)
            .map(|(key, _)| *key);
        match key {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }
}
