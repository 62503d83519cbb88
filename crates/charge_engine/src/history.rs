use charge_core::ChargeType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Estimate, EstimateRequest};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("There is no charge to save, the estimated duration is zero")]
    NothingToSave,
    #[error("Session {session_id} not found")]
    SessionNotFound { session_id: uuid::Uuid },
}

/// A saved estimate, as shown in the charge history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSession {
    pub id: uuid::Uuid,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub charge_type: ChargeType,
    pub start_percent: u8,
    pub end_percent: u8,
    #[serde(rename = "energyAddedKWh")]
    pub energy_added_kwh: f64,
    pub duration_minutes: u32,
    pub cost: f64,
    pub saved_at: DateTime<Utc>,
}

impl ChargeSession {
    pub fn from_estimate(
        estimate: &Estimate,
        request: &EstimateRequest,
        saved_at: DateTime<Utc>,
    ) -> Self {
        ChargeSession {
            id: uuid::Uuid::new_v4(),
            vehicle_id: estimate.vehicle.id.clone(),
            vehicle_name: estimate.vehicle.name.clone(),
            charge_type: request.session.charge_mode.charge_type(),
            start_percent: request.session.current_percent,
            end_percent: request.session.target_percent,
            energy_added_kwh: estimate.result.energy_needed_kwh,
            duration_minutes: estimate.result.duration_minutes,
            cost: estimate.result.cost_currency,
            saved_at,
        }
    }
}

/// Number of sessions kept when no other limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// In-memory charge history, newest session first.
///
/// Holds at most `limit` sessions, saving past the limit drops the oldest.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    sessions: Vec<ChargeSession>,
    limit: usize,
}

impl Default for SessionHistory {
    fn default() -> Self {
        SessionHistory::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl SessionHistory {
    pub fn new() -> Self {
        SessionHistory::default()
    }

    /// History keeping at most `limit` sessions, never less than one.
    pub fn with_limit(limit: usize) -> Self {
        SessionHistory {
            sessions: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn list(&self) -> &[ChargeSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Save a session at the top of the history.
    ///
    /// Sessions that charge nothing are refused.
    pub fn save(&mut self, session: ChargeSession) -> Result<ChargeSession, HistoryError> {
        if session.duration_minutes == 0 {
            return Err(HistoryError::NothingToSave);
        }
        tracing::info!("Saving session {} for {}", session.id, session.vehicle_id);
        self.sessions.insert(0, session.clone());
        if self.sessions.len() > self.limit {
            let dropped = self.sessions.split_off(self.limit);
            tracing::debug!("History is full, dropped {} oldest sessions", dropped.len());
        }
        Ok(session)
    }

    pub fn delete(&mut self, session_id: uuid::Uuid) -> Result<ChargeSession, HistoryError> {
        let Some(idx) = self.sessions.iter().position(|s| s.id == session_id) else {
            return Err(HistoryError::SessionNotFound { session_id });
        };
        tracing::info!("Deleting session {}", session_id);
        Ok(self.sessions.remove(idx))
    }

    pub fn clear(&mut self) {
        tracing::info!("Clearing {} saved sessions", self.sessions.len());
        self.sessions.clear();
    }
}
