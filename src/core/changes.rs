//! Change notification for persisted tables, and a summary cache that is
//! dropped when the data it was computed from changes.
//!
//! Writers publish a `ChangeEvent` after each committed write; readers that
//! memoize calculator output subscribe and invalidate, then recompute from
//! scratch on the next read. The calculator itself stays pure.

use crate::models::duration_result::DurationResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    EmployeeProfiles,
    TimeEntries,
    TimeRequests,
    PlannerRequests,
    Holidays,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::EmployeeProfiles => "employee_profiles",
            Table::TimeEntries => "time_entries",
            Table::TimeRequests => "time_requests",
            Table::PlannerRequests => "planner_requests",
            Table::Holidays => "holidays",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: Table,
    /// `None` when the change is not tied to one employee (e.g. a holiday).
    pub employee_id: Option<String>,
}

impl ChangeEvent {
    pub fn new(table: Table, employee_id: Option<&str>) -> Self {
        Self {
            table,
            employee_id: employee_id.map(str::to_string),
        }
    }
}

pub trait ChangeListener {
    fn on_change(&self, event: &ChangeEvent);
}

/// Fan-out of change events to subscribed listeners, in subscription order.
#[derive(Default)]
pub struct ChangeFeed {
    listeners: Vec<Rc<dyn ChangeListener>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Rc<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn publish(&self, event: &ChangeEvent) {
        for l in &self.listeners {
            l.on_change(event);
        }
    }
}

/// Memoized bucket results keyed by (employee id, bucket label), held in
/// memory for as long as the owner keeps it. Labels must capture every input
/// the result depends on besides the entries themselves.
#[derive(Default)]
pub struct SummaryCache {
    entries: RefCell<HashMap<(String, String), DurationResult>>,
}

impl SummaryCache {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn get(&self, employee_id: &str, bucket: &str) -> Option<DurationResult> {
        self.entries
            .borrow()
            .get(&(employee_id.to_string(), bucket.to_string()))
            .copied()
    }

    pub fn put(&self, employee_id: &str, bucket: &str, result: DurationResult) {
        self.entries
            .borrow_mut()
            .insert((employee_id.to_string(), bucket.to_string()), result);
    }

    /// Return the cached value or compute and remember it.
    pub fn get_or_compute<F>(&self, employee_id: &str, bucket: &str, compute: F) -> DurationResult
    where
        F: FnOnce() -> DurationResult,
    {
        if let Some(hit) = self.get(employee_id, bucket) {
            return hit;
        }
        let result = compute();
        self.put(employee_id, bucket, result);
        result
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn invalidate_employee(&self, employee_id: &str) {
        self.entries
            .borrow_mut()
            .retain(|(emp, _), _| emp != employee_id);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl ChangeListener for SummaryCache {
    fn on_change(&self, event: &ChangeEvent) {
        match event.table {
            Table::TimeEntries | Table::EmployeeProfiles => match &event.employee_id {
                Some(id) => self.invalidate_employee(id),
                None => self.clear(),
            },
            // no effect on worked time
            Table::TimeRequests | Table::PlannerRequests | Table::Holidays => {}
        }
    }
}
