/// Clock ticks (T-cycles) per machine cycle (M-cycle).
pub const TICKS_PER_MCYCLE: u32 = 4;

/// Cost of one operation, expressed in both units the rest of the machine
/// synchronises against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cost {
    pub mcycles: u32,
    pub ticks: u32,
}

impl Cost {
    pub const ZERO: Cost = Cost::from_mcycles(0);

    #[inline]
    pub const fn from_mcycles(mcycles: u32) -> Self {
        Self {
            mcycles,
            ticks: mcycles * TICKS_PER_MCYCLE,
        }
    }
}

impl std::ops::Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost {
            mcycles: self.mcycles + rhs.mcycles,
            ticks: self.ticks + rhs.ticks,
        }
    }
}

impl std::ops::AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        *self = *self + rhs;
    }
}

/// Per-step and running clock totals.
///
/// `last` is rewritten at the end of every step; the totals only ever grow
/// and are never reset after construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    last: Cost,
    total_mcycles: u64,
    total_ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the cost of a finished step.
    pub(crate) fn advance(&mut self, cost: Cost) {
        self.last = cost;
        self.total_mcycles = self.total_mcycles.wrapping_add(cost.mcycles as u64);
        self.total_ticks = self.total_ticks.wrapping_add(cost.ticks as u64);
    }

    /// Cost of the most recent step (instruction plus any interrupt entry).
    #[inline]
    pub fn last(&self) -> Cost {
        self.last
    }

    #[inline]
    pub fn total_mcycles(&self) -> u64 {
        self.total_mcycles
    }

    /// Clock ticks elapsed since power-on.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}
