use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// A registered reveler. Field names match the persisted representation,
/// so existing stored collections deserialize as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub nome: String,
    pub bloco: String,
    pub categoria: String,
    pub unidade: String,
    pub telefone: String,
    /// Normalized selfie as a `data:image/jpeg;base64,` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// One picture on the mural. `url` is either a data URI or a remote URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPhoto {
    pub id: String,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

pub fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Random ids are the only uniqueness guarantee the collections rely on.
pub fn random_id() -> String {
    Uuid::new_v4().to_string()
}

impl EventPhoto {
    pub fn new(url: String) -> Self {
        Self {
            id: random_id(),
            url,
            created_at: epoch_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_wire_names_survive_round_trip() {
        let member = Member {
            id: "m-1".to_owned(),
            nome: "Ana".to_owned(),
            bloco: "BLOCO 3".to_owned(),
            categoria: "moradora".to_owned(),
            unidade: "302-B".to_owned(),
            telefone: "(11) 99999-0000".to_owned(),
            foto: None,
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert!(json.get("foto").is_none());
        let back: Member = serde_json::from_value(json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn photo_ids_are_unique() {
        let a = EventPhoto::new("data:image/jpeg;base64,AAAA".to_owned());
        let b = EventPhoto::new("data:image/jpeg;base64,AAAA".to_owned());
        assert_ne!(a.id, b.id);
    }
}
