use core::fmt::Display;

use embedded_hal::delay::DelayNs;
use log::{debug, error};
use thiserror::Error;

use crate::{
    common::pins::{CANDIDATE_COUNT, RoleAssignment, candidate_set},
    config::{ConfigError, ProbeConfig},
    host::MmcProbeHost,
    indicator::Indicator,
    probe::{
        driver::{ProbeOutcome, probe_once},
        report::StatusReporter,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Probing(usize),
    Found,
    Exhausted,
}

impl SearchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchPhase::Found | SearchPhase::Exhausted)
    }
}

impl Display for SearchPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SearchPhase::Idle => write!(f, "idle"),
            SearchPhase::Probing(i) => write!(f, "probing #{}", i),
            SearchPhase::Found => write!(f, "found"),
            SearchPhase::Exhausted => write!(f, "exhausted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search already finished ({0})")]
    AlreadyFinished(SearchPhase),
    #[error("illegal search transition {from} -> {to}")]
    IllegalTransition { from: SearchPhase, to: SearchPhase },
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// Progress of one search pass.
///
/// `Idle -> Probing(0) -> .. -> Probing(5)`, leaving through `Found` or
/// `Exhausted`. Both terminal phases are final.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    phase: SearchPhase,
    attempts: usize,
    winner: Option<RoleAssignment>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Candidates probed so far, including the current one.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn winner(&self) -> Option<&RoleAssignment> {
        self.winner.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn begin(&mut self) -> Result<(), SearchError> {
        match self.phase {
            SearchPhase::Idle => {
                self.phase = SearchPhase::Probing(0);
                self.attempts = 1;
                Ok(())
            }
            from => Err(SearchError::IllegalTransition {
                from,
                to: SearchPhase::Probing(0),
            }),
        }
    }

    /// Reject the current candidate and move on.
    pub fn advance(&mut self) -> Result<SearchPhase, SearchError> {
        match self.phase {
            SearchPhase::Probing(i) if i + 1 < CANDIDATE_COUNT => {
                self.phase = SearchPhase::Probing(i + 1);
                self.attempts += 1;
            }
            SearchPhase::Probing(_) => self.phase = SearchPhase::Exhausted,
            from => {
                return Err(SearchError::IllegalTransition {
                    from,
                    to: SearchPhase::Exhausted,
                });
            }
        }
        Ok(self.phase)
    }

    pub fn found(&mut self, assignment: RoleAssignment) -> Result<(), SearchError> {
        match self.phase {
            SearchPhase::Probing(_) => {
                self.phase = SearchPhase::Found;
                self.winner = Some(assignment);
                Ok(())
            }
            from => Err(SearchError::IllegalTransition {
                from,
                to: SearchPhase::Found,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found {
        assignment: RoleAssignment,
        attempts: usize,
    },
    Exhausted {
        attempts: usize,
    },
}

impl SearchOutcome {
    pub fn attempts(&self) -> usize {
        match self {
            SearchOutcome::Found { attempts, .. } | SearchOutcome::Exhausted { attempts } => {
                *attempts
            }
        }
    }

    pub fn assignment(&self) -> Option<&RoleAssignment> {
        match self {
            SearchOutcome::Found { assignment, .. } => Some(assignment),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

/// One sequential pass over every role assignment of the probe lines.
pub struct PinSearch<H, I, D>
where
    H: MmcProbeHost,
    I: Indicator,
    D: DelayNs,
{
    host: H,
    reporter: StatusReporter<I>,
    delay: D,
    config: ProbeConfig,
    state: SearchState,
}

impl<H, I, D> PinSearch<H, I, D>
where
    H: MmcProbeHost,
    I: Indicator,
    D: DelayNs,
{
    pub fn new(host: H, indicator: I, delay: D, config: ProbeConfig) -> Self {
        PinSearch {
            host,
            reporter: StatusReporter::new(indicator, config.pulse_ms),
            delay,
            config,
            state: SearchState::new(),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn indicator(&self) -> &I {
        self.reporter.indicator()
    }

    pub fn into_parts(self) -> (H, I, D) {
        (self.host, self.reporter.into_indicator(), self.delay)
    }

    /// Try candidates in order until one enumerates as eMMC.
    ///
    /// On `Found` the host stays initialized on the winning mapping. A
    /// finished search never probes again.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        if self.state.is_terminal() {
            return Err(SearchError::AlreadyFinished(self.state.phase()));
        }

        self.reporter.on_start();
        if let Err(e) = self.config.validate() {
            self.reporter.on_config_error(&e);
            return Err(e.into());
        }

        self.state.begin()?;
        for (index, assignment) in candidate_set(self.config.lines).into_iter().enumerate() {
            self.reporter.on_attempt(index, &assignment);

            match probe_once(
                &mut self.host,
                &assignment,
                self.config.slot,
                self.config.probe_clk_khz,
            ) {
                ProbeOutcome::Success(card) => {
                    self.state.found(assignment)?;
                    self.reporter.on_found(&assignment, &card);
                    return Ok(SearchOutcome::Found {
                        assignment,
                        attempts: self.state.attempts(),
                    });
                }
                rejected => {
                    self.reporter
                        .on_rejected(index, &assignment, &rejected, &mut self.delay);
                }
            }

            if self.state.advance()?.is_terminal() {
                break;
            }
            self.delay.delay_ms(self.config.settle_delay_ms);
        }

        self.reporter.on_exhausted(self.state.attempts());
        Ok(SearchOutcome::Exhausted {
            attempts: self.state.attempts(),
        })
    }

    /// [`run`](Self::run), logging any error instead of returning it.
    pub fn run_logged(&mut self) -> Option<SearchOutcome> {
        match self.run() {
            Ok(outcome) => {
                debug!("search finished after {} attempts", outcome.attempts());
                Some(outcome)
            }
            // already reported and shown as failure
            Err(SearchError::InvalidConfig(_)) => None,
            Err(e) => {
                error!("search aborted: {}", e);
                None
            }
        }
    }

    /// Hold the terminal indication until reset.
    pub fn park(&mut self) -> ! {
        let period = self.config.park_delay_ms.max(1);
        loop {
            self.delay.delay_ms(period);
        }
    }
}

/// Boot entry: run one search and park in whatever state it ends in.
pub fn run_and_park<H, I, D>(host: H, indicator: I, delay: D, config: ProbeConfig) -> !
where
    H: MmcProbeHost,
    I: Indicator,
    D: DelayNs,
{
    let mut search = PinSearch::new(host, indicator, delay, config);
    search.run_logged();
    search.park()
}
