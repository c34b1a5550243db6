use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;

/// Common wrapper every endpoint answers with. The `data` payload is kept raw until the
/// envelope says the call succeeded, since failed calls may carry anything there.
#[derive(Debug, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// The rejection text, or "Unknown error" when the API did not send one.
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => UNKNOWN_ERROR.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Decodes the payload into the endpoint specific shape.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.unwrap_or(Value::Null))
    }
}

// Request bodies

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientSeed {
    pub client_seed: String,
}

#[derive(Debug, Serialize)]
pub struct OpenDailyCase {
    pub demo: bool,
}

#[derive(Debug, Serialize)]
pub struct TransactionsQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for TransactionsQuery {
    fn default() -> Self {
        Self {
            page: TRANSACTIONS_PAGE,
            limit: TRANSACTIONS_LIMIT,
        }
    }
}

// Response payloads

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub telegram: Telegram,
    #[serde(default)]
    pub referred_by: Option<Referral>,
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub username: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Referral {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl Profile {
    pub fn referral_code(&self) -> &str {
        self.referred_by
            .as_ref()
            .and_then(|r| r.code.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn referral_owner(&self) -> &str {
        self.referred_by
            .as_ref()
            .and_then(|r| r.owner.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// The slice of the profile payload that carries the active client seed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedInfo {
    #[serde(default)]
    pub client_seed: Option<String>,
}

impl SeedInfo {
    pub fn current(&self) -> &str {
        self.client_seed.as_deref().unwrap_or(UNKNOWN_SEED)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCase {
    #[serde(default)]
    pub target_block: BlockRef,
}

/// Block identifier of an opened case. Only ever displayed, so any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BlockRef {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl Default for BlockRef {
    fn default() -> Self {
        BlockRef::Other(Value::Null)
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRef::Number(n) => write!(f, "{}", n),
            BlockRef::Text(s) => f.write_str(s),
            BlockRef::Other(Value::Null) => f.write_str(NOT_AVAILABLE),
            BlockRef::Other(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionHistory {
    pub transactions: TransactionPage,
}

/// Rows stay raw so one oddly shaped entry cannot spoil the whole page.
#[derive(Debug, Deserialize)]
pub struct TransactionPage {
    pub data: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub action: Option<TransactionAction>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionAction {
    #[serde(default)]
    pub name: Option<String>,
}

impl Transaction {
    /// A successful withdrawal booked by the daily reward action.
    pub fn is_daily_reward(&self) -> bool {
        self.kind.as_deref() == Some(TX_TYPE_WITHDRAWAL)
            && self.status.as_deref() == Some(TX_STATUS_SUCCESS)
            && self.action.as_ref().and_then(|a| a.name.as_deref()) == Some(TX_ACTION_DAILY_REWARD)
    }
}

impl TransactionHistory {
    /// Most recent daily reward on the page; the API lists newest first. Rows that do not
    /// decode as a transaction are skipped.
    pub fn last_daily_reward(&self) -> Option<Transaction> {
        self.transactions
            .data
            .iter()
            .filter_map(|row| Transaction::deserialize(row).ok())
            .find(Transaction::is_daily_reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_error_message() {
        let env: Envelope = serde_json::from_value(json!({"success": false, "error": "nope"})).unwrap();
        assert!(!env.success);
        assert_eq!(env.error_message(), "nope");

        let env: Envelope = serde_json::from_value(json!({})).unwrap();
        assert!(!env.success);
        assert_eq!(env.error_message(), UNKNOWN_ERROR);
    }

    #[test]
    fn test_profile_referral_defaults() {
        let env: Envelope = serde_json::from_value(json!({
            "success": true,
            "data": { "telegram": { "username": "alice" } }
        }))
        .unwrap();
        let profile: Profile = env.into_data().unwrap();

        assert_eq!(profile.telegram.username, "alice");
        assert_eq!(profile.referral_code(), NOT_AVAILABLE);
        assert_eq!(profile.referral_owner(), NOT_AVAILABLE);
    }

    #[test]
    fn test_profile_missing_telegram_is_rejected() {
        let env: Envelope = serde_json::from_value(json!({"success": true, "data": {}})).unwrap();
        assert!(env.into_data::<Profile>().is_err());
    }

    #[test]
    fn test_block_ref_display() {
        let case: DailyCase = serde_json::from_value(json!({"targetBlock": 12345})).unwrap();
        assert_eq!(case.target_block.to_string(), "12345");

        let case: DailyCase = serde_json::from_value(json!({"targetBlock": "0xabc"})).unwrap();
        assert_eq!(case.target_block.to_string(), "0xabc");
    }

    #[test]
    fn test_block_ref_accepts_odd_values() {
        let case: DailyCase = serde_json::from_value(json!({"targetBlock": -5})).unwrap();
        assert_eq!(case.target_block.to_string(), "-5");

        let case: DailyCase = serde_json::from_value(json!({"targetBlock": 1.5})).unwrap();
        assert_eq!(case.target_block.to_string(), "1.5");

        let case: DailyCase = serde_json::from_value(json!({"targetBlock": null})).unwrap();
        assert_eq!(case.target_block.to_string(), NOT_AVAILABLE);

        let case: DailyCase = serde_json::from_value(json!({})).unwrap();
        assert_eq!(case.target_block.to_string(), NOT_AVAILABLE);
    }

    #[test]
    fn test_last_daily_reward_skips_malformed_rows() {
        let history: TransactionHistory = serde_json::from_value(json!({
            "transactions": { "data": [
                { "type": 7, "status": "SUCCESS" },
                "not even an object",
                { "type": "WITHDRAWAL", "status": "SUCCESS", "action": { "name": "daily-reward" }, "date": "2024-01-01T00:00:00Z" }
            ]}
        }))
        .unwrap();

        let tx = history.last_daily_reward().unwrap();
        assert_eq!(tx.date.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_last_daily_reward_picks_first_match() {
        let history: TransactionHistory = serde_json::from_value(json!({
            "transactions": { "data": [
                { "type": "DEPOSIT", "status": "SUCCESS", "action": { "name": "daily-reward" }, "date": "2024-01-03T00:00:00Z" },
                { "type": "WITHDRAWAL", "status": "PENDING", "action": { "name": "daily-reward" }, "date": "2024-01-02T12:00:00Z" },
                { "type": "WITHDRAWAL", "status": "SUCCESS", "action": { "name": "daily-reward" }, "date": "2024-01-02T00:00:00Z" },
                { "type": "WITHDRAWAL", "status": "SUCCESS", "action": { "name": "daily-reward" }, "date": "2024-01-01T00:00:00Z" }
            ]}
        }))
        .unwrap();

        let tx = history.last_daily_reward().unwrap();
        assert_eq!(tx.date.as_deref(), Some("2024-01-02T00:00:00Z"));
    }

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_value(UpdateClientSeed { client_seed: "ab".into() }).unwrap();
        assert_eq!(body, json!({"clientSeed": "ab"}));

        let body = serde_json::to_value(TransactionsQuery::default()).unwrap();
        assert_eq!(body, json!({"page": 1, "limit": 10}));
    }
}
