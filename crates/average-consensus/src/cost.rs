//! Cost accounting: what a run spent on storage, rounds, arithmetic and messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters accumulated across every round of a run. Monotonic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLedger {
    messages: u64,
    arithmetic_ops: u64,
    iterations: u32,
}

impl CostLedger {
    /// A zeroed ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count messages put on the wire during a broadcast phase.
    pub fn record_messages(&mut self, count: u64) {
        self.messages += count;
    }

    /// Count arithmetic operations performed during aggregation.
    pub fn record_arithmetic(&mut self, ops: u64) {
        self.arithmetic_ops += ops;
    }

    /// Mark one round as completed.
    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Total messages sent.
    pub fn messages(&self) -> u64 {
        self.messages
    }

    /// Total arithmetic operations.
    pub fn arithmetic_ops(&self) -> u64 {
        self.arithmetic_ops
    }

    /// Rounds completed.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Unit prices for each cost line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Storing one node's value
    pub per_node: f64,
    pub per_iteration: f64,
    pub per_arithmetic_op: f64,
    pub per_message: f64,
    /// Flat charge for delivering the final result
    pub final_report: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            per_node: 1.0,
            per_iteration: 1.0,
            per_arithmetic_op: 0.01,
            per_message: 0.1,
            final_report: 1000.0,
        }
    }
}

/// What a cost line charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostItem {
    Memory,
    Iterations,
    Arithmetic,
    Messages,
    FinalReport,
}

impl CostItem {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CostItem::Memory => "stored values",
            CostItem::Iterations => "iterations",
            CostItem::Arithmetic => "arithmetic operations",
            CostItem::Messages => "messages",
            CostItem::FinalReport => "final report",
        }
    }
}

/// One itemized charge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub item: CostItem,
    pub quantity: u64,
    pub unit_cost: f64,
    pub amount: f64,
}

impl CostLine {
    fn new(item: CostItem, quantity: u64, unit_cost: f64) -> Self {
        Self {
            item,
            quantity,
            unit_cost,
            amount: quantity as f64 * unit_cost,
        }
    }
}

/// Itemized cost of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub lines: Vec<CostLine>,
    pub total: f64,
}

impl CostReport {
    /// The line for `item`.
    pub fn line(&self, item: CostItem) -> Option<&CostLine> {
        self.lines.iter().find(|l| l.item == item)
    }
}

impl CostModel {
    /// Price a ledger. Linear in node count, iterations, ops and messages,
    /// plus the flat final-report charge.
    pub fn report(&self, node_count: usize, ledger: &CostLedger) -> CostReport {
        let lines = vec![
            CostLine::new(CostItem::Memory, node_count as u64, self.per_node),
            CostLine::new(CostItem::Iterations, ledger.iterations() as u64, self.per_iteration),
            CostLine::new(CostItem::Arithmetic, ledger.arithmetic_ops(), self.per_arithmetic_op),
            CostLine::new(CostItem::Messages, ledger.messages(), self.per_message),
            CostLine::new(CostItem::FinalReport, 1, self.final_report),
        ];
        let total = lines.iter().map(|l| l.amount).sum();
        CostReport { lines, total }
    }
}

impl fmt::Display for CostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "{:<24} {:>8} x {:>8.2} = {:>10.2}",
                line.item.label(),
                line.quantity,
                line.unit_cost,
                line.amount
            )?;
        }
        writeln!(f, "{}", "-".repeat(56))?;
        write!(f, "{:<45} {:>10.2}", "total", self.total)
    }
}
