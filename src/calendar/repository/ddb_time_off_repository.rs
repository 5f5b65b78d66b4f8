use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{NaiveDateTime, Utc};

use crate::calendar::domain::model::TimeOffEntity;
use crate::calendar::repository::TimeOffRepository;
use crate::core::library::{SalonError, SalonResult, PaginatedResult, TimeOffKind};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBTimeOffRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBTimeOffRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<TimeOffEntity> for DDBTimeOffRepository {
    async fn create(&self, entity: &TimeOffEntity) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(time_off_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn update(&self, entity: &TimeOffEntity) -> SalonResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("time_off_id", AttributeValue::S(entity.time_off_id.clone()))
            .update_expression("SET version = :version, start_at = :start_at, end_at = :end_at, kind = :kind, reason = :reason, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":start_at", string_date(entity.start_at))
            .expression_attribute_values(":end_at", string_date(entity.end_at))
            .expression_attribute_values(":kind", AttributeValue::S(entity.kind.to_string()))
            .expression_attribute_values(":reason", AttributeValue::S(entity.reason.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn get(&self, id: &str) -> SalonResult<TimeOffEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("time_off_id = :time_off_id")
            .expression_attribute_values(":time_off_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(SalonError::from).and_then(|req| {
            if let Some(items) = req.items {
                if let Some(map) = items.first() {
                    return Ok(TimeOffEntity::from(map));
                }
            }
            Err(SalonError::not_found(format!("time off not found for {}", id).as_str()))
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("time_off_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<TimeOffEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .expression_attribute_values(":master_id", AttributeValue::S(
                predicate.get("master_id").unwrap_or(&"".to_string()).to_string()
            ));
        let mut key_cond = String::new();
        key_cond.push_str("master_id = :master_id");
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != "master_id" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }
        request
            .send()
            .await.map_err(SalonError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(TimeOffEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl TimeOffRepository for DDBTimeOffRepository {
    async fn find_by_master_between(&self, master_id: &str,
                                    from: NaiveDateTime, to: NaiveDateTime) -> SalonResult<Vec<TimeOffEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        // intersecting entries start before the window ends and end after it
        // starts; the sort key carries the start, the end goes to a filter
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("master_id = :master_id AND start_at < :to")
            .expression_attribute_values(":master_id", AttributeValue::S(master_id.to_string()))
            .expression_attribute_values(":to", string_date(to))
            .filter_expression("end_at > :from")
            .expression_attribute_values(":from", string_date(from))
            .send()
            .await.map_err(SalonError::from).map(|req| {
            let mut records: Vec<TimeOffEntity> = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(TimeOffEntity::from).collect();
            records.sort_by_key(|r| r.start_at);
            records
        })
    }
}

impl From<&HashMap<String, AttributeValue>> for TimeOffEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        TimeOffEntity {
            time_off_id: parse_string_attribute("time_off_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            master_id: parse_string_attribute("master_id", map).unwrap_or(String::from("")),
            start_at: parse_date_attribute("start_at", map).unwrap_or(Utc::now().naive_utc()),
            end_at: parse_date_attribute("end_at", map).unwrap_or(Utc::now().naive_utc()),
            kind: TimeOffKind::from(parse_string_attribute("kind", map).unwrap_or(TimeOffKind::Other.to_string())),
            reason: parse_string_attribute("reason", map).unwrap_or(String::from("")),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
