use crate::core::engine;
use crate::core::gate;
use crate::core::roster::Roster;
use crate::domain::model::Assignment;
use crate::domain::ports::PreferenceStore;
use crate::utils::error::{PlannerError, Result};
use rand::Rng;
use std::time::Duration;

/// Preference key for the drumroll toggle.
pub const DRUMROLL_KEY: &str = "enable_drumroll";

pub const DEFAULT_DRUMROLL_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Deciding,
    ShowingResults,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Editing => "editing",
            Phase::Deciding => "deciding",
            Phase::ShowingResults => "showing results",
        }
    }
}

/// Handed out when a decision is held back for the drumroll. Only a ticket
/// from the current generation can reveal the result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RevealTicket {
    generation: u64,
    delay: Duration,
}

impl RevealTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the drumroll, then hands the ticket back for
    /// [`Session::reveal`].
    pub async fn wait(self) -> Self {
        tokio::time::sleep(self.delay).await;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Shown,
    Pending(RevealTicket),
}

/// Reads the drumroll flag: on unless stored as the literal `"false"`.
pub fn drumroll_preference<S: PreferenceStore + ?Sized>(store: &S) -> Result<bool> {
    Ok(store.get(DRUMROLL_KEY)?.as_deref() != Some("false"))
}

pub fn save_drumroll_preference<S: PreferenceStore + ?Sized>(
    store: &mut S,
    enabled: bool,
) -> Result<()> {
    store.set(DRUMROLL_KEY, if enabled { "true" } else { "false" })
}

/// One user's form session: the roster, the drumroll setting and the
/// editing → deciding → results cycle.
pub struct Session<S: PreferenceStore> {
    roster: Roster,
    assignment: Option<Assignment>,
    phase: Phase,
    generation: u64,
    drumroll: bool,
    drumroll_delay: Duration,
    preferences: S,
}

impl<S: PreferenceStore> Session<S> {
    pub fn new(preferences: S) -> Result<Self> {
        let drumroll = drumroll_preference(&preferences)?;
        tracing::debug!("Drumroll preference loaded: {}", drumroll);

        Ok(Self {
            roster: Roster::new(),
            assignment: None,
            phase: Phase::Editing,
            generation: 0,
            drumroll,
            drumroll_delay: DEFAULT_DRUMROLL_DELAY,
            preferences,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable access to the rows, only while editing.
    pub fn edit(&mut self) -> Result<&mut Roster> {
        self.expect_phase(Phase::Editing)?;
        Ok(&mut self.roster)
    }

    pub fn drumroll_enabled(&self) -> bool {
        self.drumroll
    }

    pub fn drumroll_delay(&self) -> Duration {
        self.drumroll_delay
    }

    pub fn set_drumroll_delay(&mut self, delay: Duration) {
        self.drumroll_delay = delay;
    }

    /// Changes the drumroll flag and persists it.
    pub fn set_drumroll_enabled(&mut self, enabled: bool) -> Result<()> {
        save_drumroll_preference(&mut self.preferences, enabled)?;
        self.drumroll = enabled;
        tracing::info!("🥁 Drumroll {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Changes the drumroll flag for this session only.
    pub fn override_drumroll(&mut self, enabled: bool) {
        self.drumroll = enabled;
    }

    pub fn preferences(&self) -> &S {
        &self.preferences
    }

    pub fn error_message(&self) -> Option<String> {
        gate::error_message(&self.roster)
    }

    pub fn can_decide(&self) -> bool {
        self.phase == Phase::Editing && self.error_message().is_none()
    }

    /// Runs the gate and the engine. With the drumroll on, the result stays
    /// hidden until the returned ticket is revealed.
    pub fn decide<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Decision> {
        self.expect_phase(Phase::Editing)?;
        let validated = gate::check(&self.roster)?;
        let assignment = engine::assign(validated, rng);

        tracing::info!(
            "🎲 Assigned {} people to {} beds",
            assignment.total_people(),
            assignment.beds.len()
        );
        self.assignment = Some(assignment);

        if self.drumroll {
            self.phase = Phase::Deciding;
            Ok(Decision::Pending(RevealTicket {
                generation: self.generation,
                delay: self.drumroll_delay,
            }))
        } else {
            self.phase = Phase::ShowingResults;
            Ok(Decision::Shown)
        }
    }

    /// Applies a drumroll ticket. Tickets from before the last reset, or
    /// arriving outside the deciding phase, are ignored.
    pub fn reveal(&mut self, ticket: RevealTicket) -> bool {
        if ticket.generation != self.generation || self.phase != Phase::Deciding {
            tracing::warn!(
                "Ignoring stale reveal (ticket generation {}, session generation {}, {})",
                ticket.generation,
                self.generation,
                self.phase.as_str()
            );
            return false;
        }

        self.phase = Phase::ShowingResults;
        tracing::info!("🎉 Results revealed");
        true
    }

    /// Decides and, if needed, waits out the drumroll before revealing.
    pub async fn decide_and_reveal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Assignment> {
        if let Decision::Pending(ticket) = self.decide(rng)? {
            tracing::info!("🥁 Drumroll for {:?}...", ticket.delay());
            let ticket = ticket.wait().await;
            self.reveal(ticket);
        }

        self.results().ok_or(PlannerError::InvalidSessionState {
            state: self.phase.as_str(),
            expected: Phase::ShowingResults.as_str(),
        })
    }

    /// The assignment, once revealed.
    pub fn results(&self) -> Option<&Assignment> {
        match self.phase {
            Phase::ShowingResults => self.assignment.as_ref(),
            _ => None,
        }
    }

    /// Clears both lists and the assignment from any phase.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.assignment = None;
        self.phase = Phase::Editing;
        self.generation += 1;
        tracing::info!("🔄 Session reset (generation {})", self.generation);
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(PlannerError::InvalidSessionState {
                state: self.phase.as_str(),
                expected: expected.as_str(),
            });
        }
        Ok(())
    }
}
