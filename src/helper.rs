//! Builders for keys, values, filters and queries
//!
//! The protocol types are plain structs; these helpers cover the shapes that
//! come up in almost every request.

use crate::proto::datastore::{
    composite_filter, filter, key, mutation, property_filter, property_order, read_options,
    value::ValueType, ArrayValue, CompositeFilter, Entity, Filter, Key, KindExpression, Mutation,
    PartitionId, PropertyFilter, PropertyOrder, PropertyReference, Query, ReadOptions, Value,
};
use crate::proto::protobuf::Int32Value;

/// Builds a [`Key`] from the root ancestor down to the entity itself
///
/// # Example
///
/// ```rust
/// use datastore::helper::KeyBuilder;
///
/// let key = KeyBuilder::new()
///     .project("my-project")
///     .name("User", "alice")
///     .id("Order", 42)
///     .build();
/// assert_eq!(key.path.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyBuilder {
    partition_id: Option<PartitionId>,
    path: Vec<key::PathElement>,
}

impl KeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project of the key's partition
    pub fn project(mut self, project_id: impl Into<String>) -> Self {
        self.partition_id.get_or_insert_with(Default::default).project_id = project_id.into();
        self
    }

    /// Set the namespace of the key's partition
    pub fn namespace(mut self, namespace_id: impl Into<String>) -> Self {
        self.partition_id.get_or_insert_with(Default::default).namespace_id = namespace_id.into();
        self
    }

    /// Append a path element identified by a numeric id
    pub fn id(self, kind: impl Into<String>, id: i64) -> Self {
        self.push(kind, Some(key::path_element::IdType::Id(id)))
    }

    /// Append a path element identified by a name
    pub fn name(self, kind: impl Into<String>, name: impl Into<String>) -> Self {
        self.push(kind, Some(key::path_element::IdType::Name(name.into())))
    }

    /// Append a path element with neither id nor name
    ///
    /// Only meaningful as the last element; such a key is incomplete and
    /// can be passed to `allocate_ids`.
    pub fn incomplete(self, kind: impl Into<String>) -> Self {
        self.push(kind, None)
    }

    pub fn build(self) -> Key {
        Key {
            partition_id: self.partition_id,
            path: self.path,
        }
    }

    fn push(mut self, kind: impl Into<String>, id_type: Option<key::path_element::IdType>) -> Self {
        self.path.push(key::PathElement {
            kind: kind.into(),
            id_type,
        });
        self
    }
}

/// True if the last path element has neither an id nor a name
pub fn is_incomplete(key: &Key) -> bool {
    key.path
        .last()
        .map(|element| element.id_type.is_none())
        .unwrap_or(true)
}

fn value_of(value_type: ValueType) -> Value {
    Value {
        value_type: Some(value_type),
        ..Default::default()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        value_of(ValueType::BooleanValue(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        value_of(ValueType::IntegerValue(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        value_of(ValueType::DoubleValue(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        value_of(ValueType::StringValue(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        value_of(ValueType::StringValue(value))
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        value_of(ValueType::BlobValue(value))
    }
}

impl From<Key> for Value {
    fn from(value: Key) -> Self {
        value_of(ValueType::KeyValue(value))
    }
}

impl From<Entity> for Value {
    fn from(value: Entity) -> Self {
        value_of(ValueType::EntityValue(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        value_of(ValueType::ArrayValue(ArrayValue { values }))
    }
}

/// Build an entity from a key and its properties
pub fn make_entity<I, K>(key: Key, properties: I) -> Entity
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    Entity {
        key: Some(key),
        properties: properties
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect(),
    }
}

/// A filter comparing one property against a value
pub fn property_filter(
    property: impl Into<String>,
    op: property_filter::Operator,
    value: impl Into<Value>,
) -> Filter {
    Filter {
        filter_type: Some(filter::FilterType::PropertyFilter(PropertyFilter {
            property: Some(property_reference(property)),
            op: op as i32,
            value: Some(value.into()),
        })),
    }
}

/// Combine filters with `AND`
pub fn and_filter(filters: impl IntoIterator<Item = Filter>) -> Filter {
    Filter {
        filter_type: Some(filter::FilterType::CompositeFilter(CompositeFilter {
            op: composite_filter::Operator::And as i32,
            filters: filters.into_iter().collect(),
        })),
    }
}

pub fn property_reference(name: impl Into<String>) -> PropertyReference {
    PropertyReference { name: name.into() }
}

pub fn property_order(
    property: impl Into<String>,
    direction: property_order::Direction,
) -> PropertyOrder {
    PropertyOrder {
        property: Some(property_reference(property)),
        direction: direction as i32,
    }
}

/// A query over every entity of `kind`
pub fn kind_query(kind: impl Into<String>) -> Query {
    Query {
        kind: vec![KindExpression { name: kind.into() }],
        ..Default::default()
    }
}

/// Cap the number of results a query returns
pub fn with_limit(mut query: Query, limit: i32) -> Query {
    query.limit = Some(Int32Value { value: limit });
    query
}

/// Read options that read inside an open transaction
pub fn read_options_in_transaction(transaction: impl Into<Vec<u8>>) -> ReadOptions {
    ReadOptions {
        consistency_type: Some(read_options::ConsistencyType::Transaction(
            transaction.into(),
        )),
    }
}

/// Read options with an explicit consistency level
pub fn read_options_with_consistency(consistency: read_options::ReadConsistency) -> ReadOptions {
    ReadOptions {
        consistency_type: Some(read_options::ConsistencyType::ReadConsistency(
            consistency as i32,
        )),
    }
}

pub fn upsert(entity: Entity) -> Mutation {
    Mutation {
        operation: Some(mutation::Operation::Upsert(entity)),
    }
}

pub fn insert(entity: Entity) -> Mutation {
    Mutation {
        operation: Some(mutation::Operation::Insert(entity)),
    }
}

pub fn delete(key: Key) -> Mutation {
    Mutation {
        operation: Some(mutation::Operation::Delete(key)),
    }
}
