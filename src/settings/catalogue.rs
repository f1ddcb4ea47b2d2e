//! Editing of the ticket-type and priority catalogues.

use serde::Deserialize;

use super::{PriorityLevel, TicketType};
use crate::error::{AppError, AppResult};

const MISSING_FIELDS: &str = "Veuillez remplir tous les champs";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeDraft {
    #[serde(rename = "type")]
    pub label: String,
    pub description: String,
    pub color: String,
}

impl TicketTypeDraft {
    fn validate(&self) -> AppResult<()> {
        if self.label.trim().is_empty() || self.description.trim().is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityDraft {
    #[serde(rename = "priority")]
    pub label: String,
    pub level: u32,
    pub color: String,
    pub max_time_value: u32,
    pub max_time_unit: String,
}

impl PriorityDraft {
    fn validate(&self) -> AppResult<()> {
        if self.label.trim().is_empty() {
            return Err(AppError::Validation(MISSING_FIELDS.to_string()));
        }
        Ok(())
    }

    fn max_time(&self) -> String {
        format!("{} {}", self.max_time_value, self.max_time_unit)
    }
}

fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().map_or(1, |max| max + 1)
}

// ─── Ticket types ────────────────────────────────────────────────────────────

/// Appends a new type and returns its id.
pub fn add_ticket_type(types: &mut Vec<TicketType>, draft: TicketTypeDraft) -> AppResult<u32> {
    draft.validate()?;
    let id = next_id(types.iter().map(|t| t.id));
    types.push(TicketType {
        id,
        label: draft.label,
        description: draft.description,
        color: draft.color,
    });
    Ok(id)
}

pub fn update_ticket_type(types: &mut [TicketType], id: u32, draft: TicketTypeDraft) -> AppResult<()> {
    draft.validate()?;
    let entry = types
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::Validation(format!("Type de ticket {} introuvable", id)))?;
    entry.label = draft.label;
    entry.description = draft.description;
    entry.color = draft.color;
    Ok(())
}

/// Returns `false` when no type had that id.
pub fn delete_ticket_type(types: &mut Vec<TicketType>, id: u32) -> bool {
    let before = types.len();
    types.retain(|t| t.id != id);
    types.len() != before
}

// ─── Priorities ──────────────────────────────────────────────────────────────

pub fn add_priority(priorities: &mut Vec<PriorityLevel>, draft: PriorityDraft) -> AppResult<u32> {
    draft.validate()?;
    let id = next_id(priorities.iter().map(|p| p.id));
    priorities.push(PriorityLevel {
        id,
        max_time: draft.max_time(),
        label: draft.label,
        level: draft.level,
        color: draft.color,
        max_time_value: draft.max_time_value,
        max_time_unit: draft.max_time_unit,
    });
    Ok(id)
}

pub fn update_priority(
    priorities: &mut [PriorityLevel],
    id: u32,
    draft: PriorityDraft,
) -> AppResult<()> {
    draft.validate()?;
    let entry = priorities
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::Validation(format!("Priorité {} introuvable", id)))?;
    entry.max_time = draft.max_time();
    entry.label = draft.label;
    entry.level = draft.level;
    entry.color = draft.color;
    entry.max_time_value = draft.max_time_value;
    entry.max_time_unit = draft.max_time_unit;
    Ok(())
}

pub fn delete_priority(priorities: &mut Vec<PriorityLevel>, id: u32) -> bool {
    let before = priorities.len();
    priorities.retain(|p| p.id != id);
    priorities.len() != before
}
