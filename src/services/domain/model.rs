use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// ServiceEntity is one row of the salon service catalog. The engine consults
// it for the duration a requested service occupies; bundles resolve to the
// longest duration across the set.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ServiceEntity {
    pub service_id: String,
    pub version: i64,
    pub salon_id: String,
    // "name" is a DynamoDB reserved word; the item attribute is service_name
    #[serde(rename = "service_name")]
    pub name: String,
    pub duration_minutes: i64,
    pub price_cents: i64,
    pub active: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ServiceEntity {
    pub fn new(salon_id: &str, name: &str, duration_minutes: i64, price_cents: i64) -> Self {
        Self {
            service_id: Uuid::new_v4().to_string(),
            version: 0,
            salon_id: salon_id.to_string(),
            name: name.to_string(),
            duration_minutes,
            price_cents,
            active: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for ServiceEntity {
    fn id(&self) -> String {
        self.service_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::services::domain::model::ServiceEntity;

    #[tokio::test]
    async fn test_should_build_service() {
        let service = ServiceEntity::new("salon1", "classic lashes", 90, 6500);
        assert_eq!("classic lashes", service.name.as_str());
        assert_eq!(90, service.duration_minutes);
        assert!(service.active);
    }
}
