use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

use super::{giveaway::Giveaway, user::CachedUser};

pub const MANIFEST_FILENAME: &str = "giveaway_summary.json";

/// Audit record of a finished giveaway. Uploaded once when the giveaway ends
/// and read back for rerolls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub giveaway: ManifestGiveaway,
    pub winners: Vec<ManifestUser>,
    pub entries: Vec<ManifestUser>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestGiveaway {
    pub id: String,
    pub prize: String,
    #[serde(rename = "desc")]
    pub description: Option<String>,
    pub num_winners: i32,
    pub host: ManifestUser,
    pub end: i64,
}

// Snowflakes are kept as strings so that JSON consumers without 64-bit
// integers read them intact. Profile fields are only present for users the
// bot has cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "discrim", default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ManifestUser {
    pub fn new(id: i64, known: &HashMap<i64, CachedUser>) -> Self {
        let profile = known.get(&id);
        ManifestUser {
            id: id.to_string(),
            username: profile.map(|user| user.username.clone()),
            discriminator: profile.and_then(|user| user.discriminator.clone()),
            avatar: profile.and_then(|user| user.avatar.clone()),
        }
    }
}

impl Manifest {
    pub fn new(
        giveaway: &Giveaway,
        entries: &[i64],
        winners: &[i64],
        known: &HashMap<i64, CachedUser>,
    ) -> Self {
        let user = |id: i64| ManifestUser::new(id, known);
        Manifest {
            giveaway: ManifestGiveaway {
                id: giveaway.message_id.to_string(),
                prize: giveaway.draft.prize.clone(),
                description: giveaway.draft.description.clone(),
                num_winners: giveaway.draft.winners,
                host: user(giveaway.draft.host_id),
                end: giveaway.end_time().unix_timestamp(),
            },
            winners: winners.iter().copied().map(user).collect(),
            entries: entries.iter().copied().map(user).collect(),
        }
    }

    /// Entrant ids that parse as snowflakes; anything else is skipped.
    pub fn entrant_ids(&self) -> Vec<i64> {
        self.entries
            .iter()
            .filter_map(|user| user.id.parse().ok())
            .collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::models::giveaway::GiveawayDraft;

    #[test]
    fn serialises_snowflakes_as_strings_and_reads_them_back() {
        let giveaway = GiveawayDraft {
            host_id: 7,
            end_time: datetime!(2024-06-01 12:00 UTC),
            winners: 2,
            prize: "Nitro".to_string(),
            description: None,
        }
        .into_giveaway(1_180_000_000_000_000_000, 2, 3);

        let manifest = Manifest::new(&giveaway, &[11, 12, 13], &[12], &HashMap::new());
        let json: serde_json::Value =
            serde_json::from_slice(&manifest.to_bytes().unwrap()).unwrap();

        assert_eq!(json["giveaway"]["id"], "1180000000000000000");
        assert_eq!(json["giveaway"]["desc"], serde_json::Value::Null);
        assert_eq!(json["winners"][0]["id"], "12");
        assert_eq!(json["entries"].as_array().unwrap().len(), 3);
        assert!(json["winners"][0].get("username").is_none());
    }

    #[test]
    fn cached_profiles_are_written_for_known_users() {
        let giveaway = GiveawayDraft {
            host_id: 7,
            end_time: datetime!(2024-06-01 12:00 UTC),
            winners: 1,
            prize: "Nitro".to_string(),
            description: None,
        }
        .into_giveaway(100, 2, 3);
        let known = HashMap::from([
            (
                7,
                CachedUser {
                    user_id: 7,
                    username: "host".to_string(),
                    discriminator: None,
                    avatar: None,
                },
            ),
            (
                12,
                CachedUser {
                    user_id: 12,
                    username: "lucky".to_string(),
                    discriminator: Some("0420".to_string()),
                    avatar: Some("a_cafe".to_string()),
                },
            ),
        ]);

        let manifest = Manifest::new(&giveaway, &[11, 12], &[12], &known);
        let json: serde_json::Value =
            serde_json::from_slice(&manifest.to_bytes().unwrap()).unwrap();

        assert_eq!(json["giveaway"]["host"]["username"], "host");
        assert!(json["giveaway"]["host"].get("avatar").is_none());
        assert_eq!(json["winners"][0]["username"], "lucky");
        assert_eq!(json["winners"][0]["discrim"], "0420");
        assert_eq!(json["winners"][0]["avatar"], "a_cafe");
        assert!(json["entries"][0].get("username").is_none());
        assert_eq!(Manifest::from_bytes(&manifest.to_bytes().unwrap()).unwrap(), manifest);
    }

    #[test]
    fn skips_entries_that_are_not_snowflakes() {
        let raw = br#"{
            "giveaway": {"id": "1", "prize": "p", "desc": "d", "num_winners": 1,
                         "host": {"id": "5"}, "end": 0},
            "winners": [],
            "entries": [{"id": "10"}, {"id": "nope"}, {"id": "20"}]
        }"#;

        let manifest = Manifest::from_bytes(raw).unwrap();
        assert_eq!(manifest.entrant_ids(), vec![10, 20]);
        assert_eq!(manifest.giveaway.description.as_deref(), Some("d"));
    }
}
