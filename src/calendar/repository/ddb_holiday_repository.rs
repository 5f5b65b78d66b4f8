use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{NaiveDate, Utc};

use crate::calendar::domain::model::HolidayEntity;
use crate::calendar::repository::HolidayRepository;
use crate::core::library::{SalonError, SalonResult};
use crate::utils::ddb::{parse_bool_attribute, parse_date_attribute, parse_day_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_day};

#[derive(Debug)]
pub(crate) struct DDBHolidayRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBHolidayRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl HolidayRepository for DDBHolidayRepository {
    // date is the table key, so re-declaring a holiday replaces it
    async fn put(&self, entity: &HolidayEntity) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn get(&self, date: NaiveDate) -> SalonResult<HolidayEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("holiday_date = :holiday_date")
            .expression_attribute_values(":holiday_date", string_day(date))
            .send()
            .await.map_err(SalonError::from).and_then(|req| {
            if let Some(items) = req.items {
                if let Some(map) = items.first() {
                    return Ok(HolidayEntity::from(map));
                }
            }
            Err(SalonError::not_found(format!("holiday not found for {}", date).as_str()))
        })
    }

    async fn find_between(&self, salon_id: &str,
                          from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<HolidayEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("salon_id = :salon_id AND holiday_date BETWEEN :from AND :to")
            .expression_attribute_values(":salon_id", AttributeValue::S(salon_id.to_string()))
            .expression_attribute_values(":from", string_day(from))
            .expression_attribute_values(":to", string_day(to))
            .send()
            .await.map_err(SalonError::from).map(|req| {
            let mut records: Vec<HolidayEntity> = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(HolidayEntity::from).collect();
            records.sort_by_key(|r| r.holiday_date);
            records
        })
    }

    async fn delete(&self, date: NaiveDate) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("holiday_date", string_day(date))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }
}

impl From<&HashMap<String, AttributeValue>> for HolidayEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        let exceptions = if let Some(AttributeValue::L(values)) = map.get("master_exceptions") {
            values.iter().filter_map(|v| {
                if let AttributeValue::S(s) = v {
                    Some(s.to_string())
                } else {
                    None
                }
            }).collect()
        } else {
            vec![]
        };
        HolidayEntity {
            holiday_date: parse_day_attribute("holiday_date", map).unwrap_or(Utc::now().naive_utc().date()),
            version: parse_number_attribute("version", map),
            salon_id: parse_string_attribute("salon_id", map).unwrap_or(String::from("")),
            holiday_name: parse_string_attribute("holiday_name", map).unwrap_or(String::from("")),
            closed: parse_bool_attribute("closed", map),
            master_exceptions: exceptions,
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
