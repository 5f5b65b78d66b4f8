use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// MasterEntity mirrors the staff directory record: a master is a staff member
// who performs services and carries an individual working calendar. The
// directory itself is owned by the admin back-office; the engine reads it to
// resolve identity and to enumerate masters for batch availability.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MasterEntity {
    pub master_id: String,
    pub version: i64,
    pub salon_id: String,
    pub display_name: String,
    pub specialty: String,
    pub active: bool,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MasterEntity {
    pub fn new(salon_id: &str, display_name: &str, specialty: &str) -> Self {
        Self {
            master_id: Uuid::new_v4().to_string(),
            version: 0,
            salon_id: salon_id.to_string(),
            display_name: display_name.to_string(),
            specialty: specialty.to_string(),
            active: true,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for MasterEntity {
    fn id(&self) -> String {
        self.master_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::masters::domain::model::MasterEntity;

    #[tokio::test]
    async fn test_should_build_master() {
        let master = MasterEntity::new("salon1", "Irina", "lashes");
        assert_eq!("salon1", master.salon_id.as_str());
        assert_eq!("Irina", master.display_name.as_str());
        assert!(master.active);
        assert_eq!(0, master.version);
    }
}
