// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Last-wins delivery gate for search results.
//!
//! Searches are not preempted. Each one runs to completion; the gate only
//! decides whether its answer is still wanted. The slot holds the identity of
//! the newest accepted search, and a finishing search emits only if the slot
//! still holds *its* ticket.
//!
//! The epoch matters when a caller reuses an id: two searches both called
//! `"q"` are still two different tickets, and only the second one delivers.

use parking_lot::Mutex;

/// Proof that a search was accepted at a particular moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: String,
    epoch: u64,
}

impl Ticket {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

#[derive(Debug, Default)]
struct Slot {
    active: Option<Ticket>,
    next_epoch: u64,
}

/// Single-slot compare-and-discard gate.
#[derive(Debug, Default)]
pub struct SessionGate {
    slot: Mutex<Slot>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as the newest search, superseding whatever was active.
    pub fn accept(&self, id: impl Into<String>) -> Ticket {
        let mut slot = self.slot.lock();
        slot.next_epoch += 1;
        let ticket = Ticket {
            id: id.into(),
            epoch: slot.next_epoch,
        };
        slot.active = Some(ticket.clone());
        ticket
    }

    /// Should this ticket's result be delivered? Clears the slot if so.
    pub fn complete(&self, ticket: &Ticket) -> bool {
        let mut slot = self.slot.lock();
        if slot.active.as_ref() == Some(ticket) {
            slot.active = None;
            true
        } else {
            false
        }
    }

    /// Is this ticket still the active one? Does not clear anything.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.slot.lock().active.as_ref() == Some(ticket)
    }

    /// Clear the slot if it belongs to `id`. Returns whether it did.
    pub fn cancel(&self, id: &str) -> bool {
        let mut slot = self.slot.lock();
        if slot.active.as_ref().is_some_and(|t| t.id == id) {
            slot.active = None;
            true
        } else {
            false
        }
    }

    /// Id of the active search, if any.
    pub fn active(&self) -> Option<String> {
        self.slot.lock().active.as_ref().map(|t| t.id.clone())
    }
}
