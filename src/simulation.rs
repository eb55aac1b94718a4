//! Runs an allocator for a number of rounds and summarizes what happened.
//!
//! This is the logic behind the `demo` binary: allocate a fixed number of times, then
//! show the final pool, the scan distance of every call and the chosen slots.
use crate::allocator::{AllocError, DisposalAllocator};
use crate::random::RandomSource;
use crate::types::SlotState;
use log::debug;
use std::fmt;

#[cfg(test)]
mod tests;

/// The outcome of [run].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// The state of every slot after the last round.
    pub pool: Vec<SlotState>,

    /// The scan distance of every successful call, in call order.
    pub scan_distances: Vec<u64>,

    /// The slot chosen by every successful call, in call order.
    pub results: Vec<u64>,

    /// The number of successful calls that fell back to a forward scan.
    pub collisions: u64,

    /// The number of calls that failed because the pool was exhausted.
    pub failures: u64,
}

/// The order in which [Report::display] lists scan distances.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ReadOrder {
    #[default]
    CallOrder,
    Descending,
}

/// Calls [DisposalAllocator::allocate] `rounds` times and records the results.
///
/// Calls that fail are counted in [Report::failures] rather than aborting the run.
pub fn run<R: RandomSource>(allocator: &mut DisposalAllocator<R>, rounds: u64) -> Report {
    let mut report = Report::default();

    for round in 0..rounds {
        match allocator.allocate() {
            Ok(allocation) => {
                report.scan_distances.push(allocation.scan_distance);
                report.results.push(allocation.index);
                if allocation.collision {
                    report.collisions += 1;
                }
            }
            Err(AllocError::Exhausted { cursor }) => {
                debug!("round {round}: pool exhausted at cursor {cursor}");
                report.failures += 1;
            }
        }
    }

    report.pool = allocator.pool_snapshot();
    report
}

impl Report {
    /// The number of successful calls.
    pub fn allocations(&self) -> u64 {
        self.results.len() as u64
    }

    /// The total number of slots read across all calls.
    pub fn total_reads(&self) -> u64 {
        self.scan_distances.iter().sum()
    }

    pub fn max_scan_distance(&self) -> Option<u64> {
        self.scan_distances.iter().copied().max()
    }

    /// The scan distances sorted from longest to shortest.
    pub fn scan_distances_desc(&self) -> Vec<u64> {
        let mut distances = self.scan_distances.clone();
        distances.sort_unstable_by(|a, b| b.cmp(a));
        distances
    }

    /// Formats the report, listing scan distances in the given order.
    pub fn display(&self, order: ReadOrder) -> ReportDisplay<'_> {
        ReportDisplay {
            report: self,
            order,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(ReadOrder::CallOrder), f)
    }
}

/// Helper returned by [Report::display].
#[derive(Debug)]
pub struct ReportDisplay<'a> {
    report: &'a Report,
    order: ReadOrder,
}

impl fmt::Display for ReportDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        // The pool is listed as 0 (available) and 1 (disposed).
        writeln!(f, "assets")?;
        write_list(f, report.pool.iter().map(|s| u8::from(s.is_disposed())))?;

        writeln!(f, "read count")?;
        match self.order {
            ReadOrder::CallOrder => write_list(f, report.scan_distances.iter())?,
            ReadOrder::Descending => write_list(f, report.scan_distances_desc().iter())?,
        }

        writeln!(f, "results")?;
        write_list(f, report.results.iter())?;

        write!(
            f,
            "{} allocations, {} collisions, {} reads",
            report.allocations(),
            report.collisions,
            report.total_reads()
        )?;
        if let Some(max) = report.max_scan_distance() {
            write!(f, " (longest scan {max})")?;
        }
        if report.failures > 0 {
            write!(f, ", {} failed (pool exhausted)", report.failures)?;
        }
        Ok(())
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    writeln!(f, "]")
}
