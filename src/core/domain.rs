use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts config options for the scheduling engine. Ambient
// toggles live here and travel with AppState into every handler; there are no
// module-level mutable globals.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub salon_id: String,
    // slot grid used when a request does not pass an explicit step
    pub slot_step_minutes: i64,
    // how long a hold protects a slot before it silently expires
    pub hold_ttl_minutes: i64,
    // ledger calls inside a hold/finalize critical section fail closed
    // once this deadline passes
    pub ledger_timeout_millis: u64,
    // cadence of the expiry sweep in the booking binary
    pub sweep_interval_secs: u64,
}

impl Configuration {
    pub fn new(salon_id: &str) -> Self {
        Configuration {
            salon_id: salon_id.to_string(),
            slot_step_minutes: 15,
            hold_ttl_minutes: 10,
            ledger_timeout_millis: 2_000,
            sweep_interval_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!(15, config.slot_step_minutes);
        assert_eq!(10, config.hold_ttl_minutes);
        assert_eq!(2_000, config.ledger_timeout_millis);
        assert_eq!(60, config.sweep_interval_secs);
    }
}
