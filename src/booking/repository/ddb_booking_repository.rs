use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::{NaiveDate, Utc};

use crate::booking::domain::model::BookingEntity;
use crate::booking::repository::BookingRepository;
use crate::core::library::{BookingStatus, SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_date_attribute, parse_day_attribute, parse_item, parse_number_attribute, parse_string_attribute, parse_time_attribute, string_date, string_day, string_time, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBBookingRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookingRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    async fn find_occupying(&self, master_id: &str,
                            from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<BookingEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .consistent_read(false)
            .key_condition_expression("master_id = :master_id AND booking_date BETWEEN :from AND :to")
            .expression_attribute_values(":master_id", AttributeValue::S(master_id.to_string()))
            .expression_attribute_values(":from", string_day(from))
            .expression_attribute_values(":to", string_day(to))
            .filter_expression("booking_status = :held OR booking_status = :confirmed")
            .expression_attribute_values(":held", AttributeValue::S(BookingStatus::Held.to_string()))
            .expression_attribute_values(":confirmed", AttributeValue::S(BookingStatus::Confirmed.to_string()))
            .send()
            .await.map_err(SalonError::from).map(|req| {
            let mut records: Vec<BookingEntity> = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(BookingEntity::from).collect();
            records.sort_by_key(|b| (b.booking_date, b.start_time));
            records
        })
    }
}

#[async_trait]
impl Repository<BookingEntity> for DDBBookingRepository {
    async fn create(&self, entity: &BookingEntity) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(booking_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn update(&self, entity: &BookingEntity) -> SalonResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("booking_id", AttributeValue::S(entity.booking_id.clone()))
            .update_expression("SET version = :version, booking_status = :booking_status, start_time = :start_time, end_time = :end_time, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":booking_status", AttributeValue::S(entity.booking_status.to_string()))
            .expression_attribute_values(":start_time", string_time(entity.start_time))
            .expression_attribute_values(":end_time", string_time(entity.end_time))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    async fn get(&self, id: &str) -> SalonResult<BookingEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression("booking_id = :booking_id")
            .expression_attribute_values(":booking_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(SalonError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(SalonError::database(format!("too many bookings for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(BookingEntity::from(map));
                    }
                }
                Err(SalonError::not_found(format!("booking not found for {}", id).as_str()))
            } else {
                Err(SalonError::not_found(format!("booking not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("booking_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SalonError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<BookingEntity>> {
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
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("master_id = :master_id");

        if let Some(date) = predicate.get("booking_date") {
            key_cond.push_str(" AND booking_date = :booking_date");
            request = request.expression_attribute_values(":booking_date", AttributeValue::S(date.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "master_id" && k != "booking_date" {
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
                .map(BookingEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl BookingRepository for DDBBookingRepository {
    // The overlap read plus conditional insert runs inside the hold manager's
    // per-(master, date) critical section, which is what serializes writers
    // for one slot key; the put condition still rejects duplicate ids.
    async fn create_if_free(&self, entity: &BookingEntity) -> SalonResult<usize> {
        let occupying = self.find_occupying(entity.master_id.as_str(),
                                            entity.booking_date, entity.booking_date).await?;
        if occupying.iter().any(|b| b.overlaps(entity.start_time, entity.end_time)) {
            return Err(SalonError::conflict(
                format!("slot {} {} already taken for master {}",
                        entity.booking_date, entity.start_time, entity.master_id).as_str()));
        }
        self.create(entity).await
    }

    async fn find_active_by_master_date(&self, master_id: &str,
                                        date: NaiveDate) -> SalonResult<Vec<BookingEntity>> {
        self.find_occupying(master_id, date, date).await
    }

    async fn find_active_by_master_between(&self, master_id: &str,
                                           from: NaiveDate, to: NaiveDate) -> SalonResult<Vec<BookingEntity>> {
        self.find_occupying(master_id, from, to).await
    }

    async fn update_status(&self, booking_id: &str, expected_version: i64,
                           status: BookingStatus) -> SalonResult<BookingEntity> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("booking_id", AttributeValue::S(booking_id.to_string()))
            .update_expression("SET version = :version, booking_status = :booking_status, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(expected_version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((expected_version + 1).to_string()))
            .expression_attribute_values(":booking_status", AttributeValue::S(status.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .return_values(ReturnValue::AllNew)
            .send()
            .await.map_err(SalonError::from).and_then(|res| {
            if let Some(map) = res.attributes() {
                Ok(BookingEntity::from(map))
            } else {
                Err(SalonError::not_found(format!("booking not found for {}", booking_id).as_str()))
            }
        })
    }
}

impl From<&HashMap<String, AttributeValue>> for BookingEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        BookingEntity {
            booking_id: parse_string_attribute("booking_id", map).unwrap_or(String::from("")),
            version: parse_number_attribute("version", map),
            salon_id: parse_string_attribute("salon_id", map).unwrap_or(String::from("")),
            master_id: parse_string_attribute("master_id", map).unwrap_or(String::from("")),
            service_id: parse_string_attribute("service_id", map).unwrap_or(String::from("")),
            client_id: parse_string_attribute("client_id", map).unwrap_or(String::from("")),
            booking_date: parse_day_attribute("booking_date", map).unwrap_or(Utc::now().naive_utc().date()),
            start_time: parse_time_attribute("start_time", map).unwrap_or_default(),
            end_time: parse_time_attribute("end_time", map).unwrap_or_default(),
            booking_status: BookingStatus::from(parse_string_attribute("booking_status", map).unwrap_or(BookingStatus::Unknown.to_string())),
            created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
        }
    }
}
