use super::result::APIResult;
use crate::{extensions::Handles, model::Member, status::Status};
use axum::{extract::Extension, http::HeaderMap};
use serde::Serialize;
use std::collections::BTreeMap;

/// Password-gated roster with per-bloco statistics.
pub async fn roster(Extension(handles): Extension<Handles>, headers: HeaderMap) -> APIResult {
    super::authorize(&handles, &headers)?;
    let members = handles.storage.members().await?;
    let stats = RosterStats::from_members(&members);
    Ok(Status::ok_payload(Roster {
        membros: members,
        stats,
    }))
}

#[derive(Serialize)]
struct Roster {
    membros: Vec<Member>,
    stats: RosterStats,
}

#[derive(Serialize)]
struct RosterStats {
    total: usize,
    com_foto: usize,
    por_bloco: BTreeMap<String, usize>,
}

impl RosterStats {
    fn from_members(members: &[Member]) -> Self {
        let mut por_bloco: BTreeMap<String, usize> = BTreeMap::new();
        for member in members {
            *por_bloco.entry(member.bloco.clone()).or_default() += 1;
        }
        Self {
            total: members.len(),
            com_foto: members.iter().filter(|m| m.foto.is_some()).count(),
            por_bloco,
        }
    }
}
