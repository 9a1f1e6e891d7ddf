//! Dispatch table

use grid_core::{GridError, GridResult};

use crate::behavior::Behavior;

/// Slots in the reference table
pub const NUM_SLOTS: usize = 4;

/// Cycles per slot in the reference table
pub const NUM_CYCLES: usize = 5;

/// Fixed grid of behaviours, walked row by row
///
/// The table has no mutating methods: a scheduler built from it dispatches
/// exactly these cells for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTable<const SLOTS: usize, const CYCLES: usize> {
    cells: [[Behavior; CYCLES]; SLOTS],
}

/// Table shape used by the reference firmware
pub type ReferenceTable = DispatchTable<NUM_SLOTS, NUM_CYCLES>;

/// Reference layout: three task slots that each end in a burn, and a slot
/// that does nothing but burn
pub const REFERENCE_TABLE: ReferenceTable = {
    use Behavior::*;
    DispatchTable::new([
        [TaskOne, TaskTwo, Overrun, Overrun, Overrun],
        [TaskOne, TaskThree, Overrun, Overrun, Overrun],
        [TaskOne, TaskFour, Overrun, Overrun, Overrun],
        [Overrun, Overrun, Overrun, Overrun, Overrun],
    ])
};

impl<const SLOTS: usize, const CYCLES: usize> DispatchTable<SLOTS, CYCLES> {
    pub const fn new(cells: [[Behavior; CYCLES]; SLOTS]) -> Self {
        Self { cells }
    }

    /// Table with every cell set to `behavior`
    pub const fn filled(behavior: Behavior) -> Self {
        Self::new([[behavior; CYCLES]; SLOTS])
    }

    pub const fn slots(&self) -> usize {
        SLOTS
    }

    pub const fn cycles(&self) -> usize {
        CYCLES
    }

    /// Dispatches in one sweep when no overrun cuts a slot short
    pub const fn len(&self) -> usize {
        SLOTS * CYCLES
    }

    pub const fn is_empty(&self) -> bool {
        SLOTS == 0 || CYCLES == 0
    }

    /// Reject degenerate shapes
    pub fn validate(&self) -> GridResult<()> {
        if self.is_empty() {
            Err(GridError::InvalidTable)
        } else {
            Ok(())
        }
    }

    /// Behaviour at `slot`, `cycle`
    ///
    /// Panics when either index is out of range.
    #[inline]
    pub fn get(&self, slot: usize, cycle: usize) -> Behavior {
        self.cells[slot][cycle]
    }

    pub fn row(&self, slot: usize) -> Option<&[Behavior; CYCLES]> {
        self.cells.get(slot)
    }

    /// Cells in row-major order as `(slot, cycle, behavior)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Behavior)> + '_ {
        self.cells.iter().enumerate().flat_map(|(slot, row)| {
            row.iter()
                .enumerate()
                .map(move |(cycle, behavior)| (slot, cycle, *behavior))
        })
    }

    /// Cells holding `behavior`
    pub fn count(&self, behavior: Behavior) -> usize {
        self.iter().filter(|(_, _, b)| *b == behavior).count()
    }

    /// First cycle of `slot` mapped to the overrun handler
    pub fn first_overrun(&self, slot: usize) -> Option<usize> {
        self.row(slot)?.iter().position(|b| b.is_overrun())
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        REFERENCE_TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_shape() {
        assert_eq!(REFERENCE_TABLE.slots(), 4);
        assert_eq!(REFERENCE_TABLE.cycles(), 5);
        assert_eq!(REFERENCE_TABLE.len(), 20);
        assert_eq!(REFERENCE_TABLE.count(Behavior::Overrun), 14);
        assert_eq!(REFERENCE_TABLE.count(Behavior::TaskOne), 3);
    }

    #[test]
    fn test_first_overrun() {
        assert_eq!(REFERENCE_TABLE.first_overrun(0), Some(2));
        assert_eq!(REFERENCE_TABLE.first_overrun(3), Some(0));
        assert_eq!(REFERENCE_TABLE.first_overrun(4), None);
        let tasks = DispatchTable::<1, 2>::filled(Behavior::TaskTwo);
        assert_eq!(tasks.first_overrun(0), None);
    }

    #[test]
    fn test_iter_row_major() {
        let table = DispatchTable::new([
            [Behavior::TaskOne, Behavior::TaskTwo],
            [Behavior::TaskThree, Behavior::TaskFour],
        ]);
        let cells: Vec<_> = table.iter().collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, Behavior::TaskOne),
                (0, 1, Behavior::TaskTwo),
                (1, 0, Behavior::TaskThree),
                (1, 1, Behavior::TaskFour),
            ]
        );
    }

    #[test]
    fn test_empty_rejected() {
        let table = DispatchTable::<0, 5>::new([]);
        assert_eq!(table.validate(), Err(GridError::InvalidTable));
        assert!(REFERENCE_TABLE.validate().is_ok());
    }
}
