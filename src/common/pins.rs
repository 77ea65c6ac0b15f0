use core::fmt::Display;

/// One of the three GPIOs wired to the unknown target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicalLine(pub u32);

impl PhysicalLine {
    pub const fn gpio(self) -> u32 {
        self.0
    }
}

impl Display for PhysicalLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusRole {
    Clock,
    Command,
    Data0,
}

impl BusRole {
    pub const ALL: [BusRole; 3] = [BusRole::Clock, BusRole::Command, BusRole::Data0];

    pub fn name(self) -> &'static str {
        match self {
            BusRole::Clock => "CLK",
            BusRole::Command => "CMD",
            BusRole::Data0 => "D0",
        }
    }
}

/// A bijection from the three probe lines onto CLK / CMD / D0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleAssignment {
    pub clk: PhysicalLine,
    pub cmd: PhysicalLine,
    pub d0: PhysicalLine,
}

impl RoleAssignment {
    pub fn line_for(&self, role: BusRole) -> PhysicalLine {
        match role {
            BusRole::Clock => self.clk,
            BusRole::Command => self.cmd,
            BusRole::Data0 => self.d0,
        }
    }

    pub fn role_of(&self, line: PhysicalLine) -> Option<BusRole> {
        BusRole::ALL.into_iter().find(|role| self.line_for(*role) == line)
    }

    /// Lines in (CLK, CMD, D0) order.
    pub fn lines(&self) -> [PhysicalLine; 3] {
        [self.clk, self.cmd, self.d0]
    }
}

impl Display for RoleAssignment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CLK={} CMD={} D0={}", self.clk, self.cmd, self.d0)
    }
}

pub const CANDIDATE_COUNT: usize = 6;

/// Indices into the declared line order, read as (CLK, CMD, D0).
pub const CANDIDATE_ORDER: [[usize; 3]; CANDIDATE_COUNT] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// All six role assignments of `lines`, in probe order.
pub fn candidate_set(lines: [PhysicalLine; 3]) -> [RoleAssignment; CANDIDATE_COUNT] {
    CANDIDATE_ORDER.map(|[clk, cmd, d0]| RoleAssignment {
        clk: lines[clk],
        cmd: lines[cmd],
        d0: lines[d0],
    })
}
