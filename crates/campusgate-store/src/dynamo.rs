//! DynamoDB-backed store.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, ReturnValue, WriteRequest};
use serde_json::{Number, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::collection::Collection;
use crate::document::{Document, Key, KeyValue};
use crate::error::{StoreError, StoreResult};
use crate::expr::{Condition, Direction, Filter, FilterOp, SortCondition, UpdateSet};
use crate::store::{BatchPutOutcome, DocumentStore};

type Item = HashMap<String, AttributeValue>;

/// DynamoDB caps a single `BatchWriteItem` call at 25 requests.
const BATCH_WRITE_LIMIT: usize = 25;

#[derive(Debug, Clone, Default)]
pub struct DynamoStoreOptions {
    /// Overrides the region resolved by the SDK.
    pub region: Option<String>,
    /// Custom endpoint, e.g. DynamoDB Local.
    pub endpoint: Option<String>,
    /// Prepended to every table name.
    pub table_prefix: Option<String>,
}

#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_prefix: String,
}

impl std::fmt::Debug for DynamoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoStore")
            .field("table_prefix", &self.table_prefix)
            .finish()
    }
}

impl DynamoStore {
    /// Builds a client from the shared SDK config, then applies overrides.
    pub fn new(sdk_config: &aws_config::SdkConfig, options: DynamoStoreOptions) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region) = options.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region));
        }
        if let Some(endpoint) = options.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
            table_prefix: options.table_prefix.unwrap_or_default(),
        }
    }

    pub fn from_client(client: Client, table_prefix: impl Into<String>) -> Self {
        Self {
            client,
            table_prefix: table_prefix.into(),
        }
    }

    fn table(&self, collection: Collection) -> String {
        format!("{}{}", self.table_prefix, collection.table_name())
    }

    fn key_item(collection: Collection, key: &Key) -> StoreResult<Item> {
        let key = key.normalize(collection)?;
        Ok(key
            .attributes(collection)
            .into_iter()
            .map(|(name, value)| (name.to_string(), to_attribute(&value)))
            .collect())
    }
}

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), to_attribute(v)))
                .collect(),
        ),
    }
}

fn parse_number(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(i.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

pub fn from_attribute(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(items) => Value::Array(items.iter().map(from_attribute).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_attribute(v)))
                .collect(),
        ),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(items) => Value::Array(items.iter().map(|n| parse_number(n)).collect()),
        _ => Value::Null,
    }
}

fn to_document(item: &Item) -> Document {
    item.iter()
        .map(|(k, v)| (k.clone(), from_attribute(v)))
        .collect()
}

fn to_item(document: &Document) -> Item {
    document
        .iter()
        .map(|(k, v)| (k.clone(), to_attribute(v)))
        .collect()
}

/// Collects placeholder names and values while rendering an expression.
#[derive(Default)]
struct Placeholders {
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl Placeholders {
    fn name(&mut self, attribute: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, a)| a.as_str() == attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), attribute.to_string());
        placeholder
    }

    fn value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    fn names(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

fn render_condition(collection: Collection, condition: &Condition, p: &mut Placeholders) -> String {
    let partition = collection.key_schema().partition.name;
    match condition {
        Condition::ItemNotExists => format!("attribute_not_exists({})", p.name(partition)),
        Condition::ItemExists => format!("attribute_exists({})", p.name(partition)),
        Condition::AttributeEquals(name, value) => {
            let n = p.name(name);
            let v = p.value(to_attribute(value));
            format!("{n} = {v}")
        }
        Condition::VersionEquals { attribute, version } => {
            let n = p.name(attribute);
            let v = p.value(AttributeValue::N(version.to_string()));
            if *version == 0 {
                let pk = p.name(partition);
                format!("attribute_exists({pk}) AND (attribute_not_exists({n}) OR {n} = {v})")
            } else {
                format!("{n} = {v}")
            }
        }
    }
}

/// Renders the `SET` expression and optional condition of an `UpdateItem`
/// call, sharing one placeholder set.
fn render_update(
    collection: Collection,
    update: &UpdateSet,
    condition: Option<&Condition>,
) -> (Option<String>, Option<String>, Placeholders) {
    let mut p = Placeholders::default();
    let assignments: Vec<String> = update
        .assignments()
        .iter()
        .map(|(name, value)| {
            let n = p.name(name);
            let v = p.value(to_attribute(value));
            format!("{n} = {v}")
        })
        .collect();
    let update_expression =
        (!assignments.is_empty()).then(|| format!("SET {}", assignments.join(", ")));
    let condition_expression = condition.map(|c| render_condition(collection, c, &mut p));
    (update_expression, condition_expression, p)
}

/// Renders the equality clauses of a filter. Clauses DynamoDB cannot express
/// are checked client-side after the page arrives.
fn render_filter(filter: &Filter, p: &mut Placeholders) -> Option<String> {
    let parts: Vec<String> = filter
        .clauses()
        .iter()
        .filter_map(|clause| match &clause.op {
            FilterOp::Eq(value) => {
                let n = p.name(&clause.attribute);
                let v = p.value(to_attribute(value));
                Some(format!("{n} = {v}"))
            }
            FilterOp::EqText(_) | FilterOp::EqIgnoreCase(_) => None,
        })
        .collect();
    (!parts.is_empty()).then(|| parts.join(" AND "))
}

fn is_put_condition_failed(err: &SdkError<PutItemError>) -> bool {
    match err {
        SdkError::ServiceError(service_err) => matches!(
            service_err.err(),
            PutItemError::ConditionalCheckFailedException(_)
        ),
        _ => false,
    }
}

fn is_update_condition_failed(err: &SdkError<UpdateItemError>) -> bool {
    match err {
        SdkError::ServiceError(service_err) => matches!(
            service_err.err(),
            UpdateItemError::ConditionalCheckFailedException(_)
        ),
        _ => false,
    }
}

#[async_trait]
impl DocumentStore for DynamoStore {
    async fn get(&self, collection: Collection, key: &Key) -> StoreResult<Option<Document>> {
        let response = self
            .client
            .get_item()
            .table_name(self.table(collection))
            .set_key(Some(Self::key_item(collection, key)?))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("GetItem on {collection} failed: {e}")))?;

        Ok(response.item().map(to_document))
    }

    async fn query(
        &self,
        collection: Collection,
        partition: &KeyValue,
        sort: Option<&SortCondition>,
        direction: Direction,
    ) -> StoreResult<Vec<Document>> {
        let schema = collection.key_schema();
        let partition = Key {
            partition: partition.clone(),
            sort: None,
        }
        .normalize_partition(collection)?;

        let mut p = Placeholders::default();
        let pk = p.name(schema.partition.name);
        let pv = p.value(to_attribute(&partition.to_json()));
        let mut expression = format!("{pk} = {pv}");

        if let (Some(cond), Some(attr)) = (sort, schema.sort) {
            let sk = p.name(attr.name);
            match cond {
                SortCondition::BeginsWith(prefix) => {
                    let sv = p.value(AttributeValue::S(prefix.clone()));
                    expression.push_str(&format!(" AND begins_with({sk}, {sv})"));
                }
                SortCondition::Equals(value) => {
                    let sv = p.value(to_attribute(&value.to_json()));
                    expression.push_str(&format!(" AND {sk} = {sv}"));
                }
            }
        }

        let mut documents = Vec::new();
        let mut last_evaluated_key = None;
        loop {
            let mut request = self
                .client
                .query()
                .table_name(self.table(collection))
                .key_condition_expression(&expression)
                .set_expression_attribute_names(p.names())
                .set_expression_attribute_values(p.values())
                .scan_index_forward(direction == Direction::Forward);

            if let Some(key) = last_evaluated_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Backend(format!("Query on {collection} failed: {e}")))?;

            documents.extend(response.items().iter().map(to_document));

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => last_evaluated_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(collection = %collection, count = documents.len(), "query complete");
        Ok(documents)
    }

    async fn scan(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> StoreResult<Vec<Document>> {
        let mut p = Placeholders::default();
        let expression = filter.and_then(|f| render_filter(f, &mut p));

        let mut documents = Vec::new();
        let mut last_evaluated_key = None;
        loop {
            let mut request = self
                .client
                .scan()
                .table_name(self.table(collection))
                .set_filter_expression(expression.clone())
                .set_expression_attribute_names(p.names())
                .set_expression_attribute_values(p.values());

            if let Some(key) = last_evaluated_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let response = request
                .send()
                .await
                .map_err(|e| StoreError::Backend(format!("Scan on {collection} failed: {e}")))?;

            documents.extend(
                response
                    .items()
                    .iter()
                    .map(to_document)
                    .filter(|doc| filter.is_none_or(|f| f.matches(doc))),
            );

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => last_evaluated_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(collection = %collection, count = documents.len(), "scan complete");
        Ok(documents)
    }

    async fn put(
        &self,
        collection: Collection,
        mut document: Document,
        condition: Option<&Condition>,
    ) -> StoreResult<()> {
        let key = Key::from_document(collection, &document)?;
        for (name, value) in key.attributes(collection) {
            document.insert(name.to_string(), value);
        }

        let mut p = Placeholders::default();
        let expression = condition.map(|c| render_condition(collection, c, &mut p));

        let result = self
            .client
            .put_item()
            .table_name(self.table(collection))
            .set_item(Some(to_item(&document)))
            .set_condition_expression(expression)
            .set_expression_attribute_names(p.names())
            .set_expression_attribute_values(p.values())
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_put_condition_failed(&e) => Err(StoreError::ConditionFailed {
                collection: collection.table_name(),
            }),
            Err(e) => Err(StoreError::Backend(format!(
                "PutItem on {collection} failed: {e}"
            ))),
        }
    }

    async fn update(
        &self,
        collection: Collection,
        key: &Key,
        update: &UpdateSet,
        condition: Option<&Condition>,
    ) -> StoreResult<Document> {
        let schema = collection.key_schema();
        if let Some((name, _)) = update
            .assignments()
            .iter()
            .find(|(name, _)| schema.attribute_names().any(|k| k == name))
        {
            return Err(StoreError::invalid_key(
                collection.table_name(),
                format!("cannot update key attribute {name}"),
            ));
        }
        let key_item = Self::key_item(collection, key)?;

        let (update_expression, condition_expression, p) =
            render_update(collection, update, condition);

        let result = self
            .client
            .update_item()
            .table_name(self.table(collection))
            .set_key(Some(key_item))
            .set_update_expression(update_expression)
            .set_condition_expression(condition_expression)
            .set_expression_attribute_names(p.names())
            .set_expression_attribute_values(p.values())
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(response) => Ok(response.attributes().map(to_document).unwrap_or_default()),
            Err(e) if is_update_condition_failed(&e) => Err(StoreError::ConditionFailed {
                collection: collection.table_name(),
            }),
            Err(e) => Err(StoreError::Backend(format!(
                "UpdateItem on {collection} failed: {e}"
            ))),
        }
    }

    async fn delete(&self, collection: Collection, key: &Key) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(self.table(collection))
            .set_key(Some(Self::key_item(collection, key)?))
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("DeleteItem on {collection} failed: {e}")))?;
        Ok(())
    }

    async fn batch_put(
        &self,
        collection: Collection,
        documents: Vec<Document>,
    ) -> StoreResult<BatchPutOutcome> {
        for doc in &documents {
            Key::from_document(collection, doc)?;
        }

        let table = self.table(collection);
        let mut outcome = BatchPutOutcome::default();

        for chunk in documents.chunks(BATCH_WRITE_LIMIT) {
            let requests = chunk
                .iter()
                .map(|doc| {
                    let put = PutRequest::builder()
                        .set_item(Some(to_item(doc)))
                        .build()
                        .map_err(|e| StoreError::Backend(e.to_string()))?;
                    Ok(WriteRequest::builder().put_request(put).build())
                })
                .collect::<StoreResult<Vec<_>>>()?;

            let response = self
                .client
                .batch_write_item()
                .request_items(table.clone(), requests)
                .send()
                .await
                .map_err(|e| {
                    StoreError::Backend(format!("BatchWriteItem on {collection} failed: {e}"))
                })?;

            let unprocessed: Vec<Document> = response
                .unprocessed_items()
                .and_then(|items| items.get(&table))
                .map(|requests| {
                    requests
                        .iter()
                        .filter_map(|r| r.put_request())
                        .map(|put| to_document(put.item()))
                        .collect()
                })
                .unwrap_or_default();

            outcome.written += chunk.len() - unprocessed.len();
            outcome.unprocessed.extend(unprocessed);
        }

        if !outcome.is_complete() {
            warn!(
                collection = %collection,
                unprocessed = outcome.unprocessed.len(),
                "batch write left unprocessed items"
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_conversion_preserves_nested_values() {
        let value = json!({
            "Fees": [{"Item": "Mess", "Status": "Unpaid", "Amount": 1200.5}],
            "Version": 3,
            "Active": true,
            "Note": null
        });
        assert_eq!(from_attribute(&to_attribute(&value)), value);
    }

    #[test]
    fn test_version_zero_condition_allows_missing_attribute() {
        let mut p = Placeholders::default();
        let rendered = render_condition(
            Collection::HostelFee,
            &Condition::version_equals("Version", 0),
            &mut p,
        );
        assert_eq!(
            rendered,
            "attribute_exists(#n1) AND (attribute_not_exists(#n0) OR #n0 = :v0)"
        );
        assert_eq!(p.names.get("#n1").map(String::as_str), Some("StudentID"));
    }

    fn unused_names(expressions: &[Option<String>], p: &Placeholders) -> Vec<String> {
        let combined = expressions.iter().flatten().cloned().collect::<Vec<_>>().join(" ");
        let mut unused: Vec<String> = p
            .names
            .keys()
            .filter(|placeholder| {
                !combined
                    .split(|c: char| !(c.is_alphanumeric() || c == '#'))
                    .any(|token| token == placeholder.as_str())
            })
            .cloned()
            .collect();
        unused.sort();
        unused
    }

    #[test]
    fn test_update_expressions_use_every_name_placeholder() {
        let fees = UpdateSet::new()
            .set("Fees", json!([{"Item": "Mess", "Status": "Paid"}]))
            .set("Version", 2);
        let conditions = [
            Condition::version_equals("Version", 0),
            Condition::version_equals("Version", 1),
            Condition::version_equals("Version", 7),
            Condition::attribute_equals("Status", "Open"),
            Condition::ItemExists,
            Condition::ItemNotExists,
        ];

        for condition in &conditions {
            let (update, cond, p) = render_update(Collection::HostelFee, &fees, Some(condition));
            assert!(
                unused_names(&[update, cond], &p).is_empty(),
                "unused placeholder for {condition:?}"
            );
        }

        let counter = UpdateSet::new().set("LastRoomNo", 4).set("Version", 3);
        let (update, cond, p) = render_update(
            Collection::HostelRoomCounter,
            &counter,
            Some(&Condition::version_equals("Version", 2)),
        );
        assert_eq!(cond.as_deref(), Some("#n1 = :v2"));
        assert!(unused_names(&[update, cond], &p).is_empty());
        assert!(!p.names.values().any(|name| name == "HostelID"));
    }

    #[test]
    fn test_filter_renders_only_equality_clauses() {
        let mut p = Placeholders::default();
        let filter = Filter::new()
            .eq("HostelID", "H001")
            .eq_ignore_case("Branch", "cse");
        assert_eq!(render_filter(&filter, &mut p).as_deref(), Some("#n0 = :v0"));
        assert_eq!(p.values.len(), 1);
    }
}
