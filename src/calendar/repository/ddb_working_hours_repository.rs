use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::calendar::domain::model::WorkingHoursEntity;
use crate::calendar::repository::WorkingHoursRepository;
use crate::core::library::{SalonError, SalonResult};
use crate::utils::ddb::{parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, parse_time_attribute};

#[derive(Debug)]
pub(crate) struct DDBWorkingHoursRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBWorkingHoursRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl WorkingHoursRepository for DDBWorkingHoursRepository {
    // unconditioned put: the rule key is (master, weekday), so writing the
    // same key replaces the window instead of stacking a second rule
    async fn put(&self, entity: &WorkingHoursEntity) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn get(&self, master_id: &str, day_of_week: u8) -> SalonResult<WorkingHoursEntity> {
        let table_name: &str = self.table_name.as_ref();
        let rule_id = WorkingHoursEntity::rule_key(master_id, day_of_week);
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("rule_id = :rule_id")
            .expression_attribute_values(":rule_id", AttributeValue::S(rule_id.clone()))
            .send()
            .await.map_err(SalonError::from).and_then(|req| {
            if let Some(items) = req.items {
                if let Some(map) = items.first() {
                    return Ok(WorkingHoursEntity::from(map));
                }
            }
            Err(SalonError::not_found(format!("working hours not found for {}", rule_id).as_str()))
        })
    }

    async fn find_by_master(&self, master_id: &str) -> SalonResult<Vec<WorkingHoursEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("master_id = :master_id")
            .expression_attribute_values(":master_id", AttributeValue::S(master_id.to_string()))
            .send()
            .await.map_err(SalonError::from).map(|req| {
            let mut rules: Vec<WorkingHoursEntity> = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(WorkingHoursEntity::from).collect();
            rules.sort_by_key(|r| r.day_of_week);
            rules
        })
    }

    async fn delete(&self, master_id: &str, day_of_week: u8) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let rule_id = WorkingHoursEntity::rule_key(master_id, day_of_week);
        self.client.delete_item()
            .table_name(table_name)
            .key("rule_id", AttributeValue::S(rule_id))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }
}

impl From<&HashMap<String, AttributeValue>> for WorkingHoursEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        WorkingHoursEntity {
            rule_id: parse_string_attribute("rule_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            master_id: parse_string_attribute("master_id", map).unwrap_or(String::from("")),
            day_of_week: parse_number_attribute("day_of_week", map) as u8,
            start_time: parse_time_attribute("start_time", map).unwrap_or_default(),
            end_time: parse_time_attribute("end_time", map).unwrap_or_default(),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
