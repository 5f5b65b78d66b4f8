use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::masters::domain::model::MasterEntity;
use crate::masters::repository::MasterRepository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBMasterRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBMasterRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<MasterEntity> for DDBMasterRepository {
    async fn create(&self, entity: &MasterEntity) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(master_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn update(&self, entity: &MasterEntity) -> SalonResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("master_id", AttributeValue::S(entity.master_id.clone()))
            .update_expression("SET version = :version, display_name = :display_name, specialty = :specialty, active = :active, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":display_name", AttributeValue::S(entity.display_name.to_string()))
            .expression_attribute_values(":specialty", AttributeValue::S(entity.specialty.to_string()))
            .expression_attribute_values(":active", AttributeValue::Bool(entity.active))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn get(&self, id: &str) -> SalonResult<MasterEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "master_id = :master_id",
            )
            .expression_attribute_values(
                ":master_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(SalonError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(SalonError::database(format!("too many masters for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(MasterEntity::from(map));
                    }
                }
                Err(SalonError::not_found(format!("master not found for {}", id).as_str()))
            } else {
                Err(SalonError::not_found(format!("master not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("master_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<MasterEntity>> {
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
            .expression_attribute_values(":salon_id", AttributeValue::S(
                predicate.get("salon_id").unwrap_or(&"".to_string()).to_string()
            ));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("salon_id = :salon_id");

        if let Some(display_name) = predicate.get("display_name") {
            key_cond.push_str(" AND display_name = :display_name");
            request = request.expression_attribute_values(":display_name", AttributeValue::S(display_name.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "salon_id" && k != "display_name" {
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
                .map(MasterEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl MasterRepository for DDBMasterRepository {
    async fn find_active(&self, salon_id: &str) -> SalonResult<Vec<MasterEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("salon_id = :salon_id")
            .expression_attribute_values(":salon_id", AttributeValue::S(salon_id.to_string()))
            .filter_expression("active = :active")
            .expression_attribute_values(":active", AttributeValue::Bool(true))
            .send()
            .await.map_err(SalonError::from).map(|req| {
            req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(MasterEntity::from).collect()
        })
    }
}

impl From<&HashMap<String, AttributeValue>> for MasterEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        MasterEntity {
            master_id: parse_string_attribute("master_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            salon_id: parse_string_attribute("salon_id", map).unwrap_or(String::from("")),
            display_name: parse_string_attribute("display_name", map).unwrap_or(String::from("")),
            specialty: parse_string_attribute("specialty", map).unwrap_or(String::from("")),
            active: parse_bool_attribute("active", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
