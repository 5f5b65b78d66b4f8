use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::services::domain::model::ServiceEntity;
use crate::services::repository::ServiceRepository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBServiceRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBServiceRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<ServiceEntity> for DDBServiceRepository {
    async fn create(&self, entity: &ServiceEntity) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(service_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn update(&self, entity: &ServiceEntity) -> SalonResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("service_id", AttributeValue::S(entity.service_id.clone()))
            .update_expression("SET version = :version, service_name = :service_name, duration_minutes = :duration_minutes, price_cents = :price_cents, active = :active, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":service_name", AttributeValue::S(entity.name.to_string()))
            .expression_attribute_values(":duration_minutes", AttributeValue::N(entity.duration_minutes.to_string()))
            .expression_attribute_values(":price_cents", AttributeValue::N(entity.price_cents.to_string()))
            .expression_attribute_values(":active", AttributeValue::Bool(entity.active))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn get(&self, id: &str) -> SalonResult<ServiceEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "service_id = :service_id",
            )
            .expression_attribute_values(
                ":service_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(SalonError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(SalonError::database(format!("too many services for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(ServiceEntity::from(map));
                    }
                }
                Err(SalonError::not_found(format!("service not found for {}", id).as_str()))
            } else {
                Err(SalonError::not_found(format!("service not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("service_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<ServiceEntity>> {
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

        if let Some(name) = predicate.get("service_name") {
            key_cond.push_str(" AND service_name = :service_name");
            request = request.expression_attribute_values(":service_name", AttributeValue::S(name.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "salon_id" && k != "service_name" {
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
                .map(ServiceEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl ServiceRepository for DDBServiceRepository {
    async fn find_active(&self, salon_id: &str) -> SalonResult<Vec<ServiceEntity>> {
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
                .map(ServiceEntity::from).collect()
        })
    }
}

impl From<&HashMap<String, AttributeValue>> for ServiceEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        ServiceEntity {
            service_id: parse_string_attribute("service_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            salon_id: parse_string_attribute("salon_id", map).unwrap_or(String::from("")),
            name: parse_string_attribute("service_name", map).unwrap_or(String::from("")),
            duration_minutes: parse_number_attribute("duration_minutes", map),
            price_cents: parse_number_attribute("price_cents", map),
            active: parse_bool_attribute("active", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
