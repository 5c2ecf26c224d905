use crate::{
    error::CollectionError,
    result::ResultSet,
    sort::{Direction, SortSpec},
};
use rinse_core::{
    diag::Diagnostics,
    path::resolve,
    query::{self, compile},
    value::Value,
};
use std::cmp::Ordering;
use ulid::Ulid;

const DEFAULT_ID_KEY: &str = "id";

///
/// Collection
///
/// An ordered, in-memory set of object records addressed by a string
/// identity field. All queries scan in insertion order; the chaining
/// surfaces (`query`, `sort`, `select`) build a new collection and leave
/// the receiver untouched.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    data: Vec<Value>,
    id_key: String,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            id_key: DEFAULT_ID_KEY.to_string(),
        }
    }

    /// Build a collection from existing records.
    ///
    /// # Errors
    ///
    /// Fails if any record is not an object, or carries a non-string
    /// identity field. Records without an identity field are accepted
    /// as-is; ids are only generated on [`Self::insert`].
    pub fn from_records(records: Vec<Value>) -> Result<Self, CollectionError> {
        let mut collection = Self::new();
        for record in &records {
            collection.check_record(record)?;
        }
        collection.data = records;

        Ok(collection)
    }

    /// Use a different identity field than `"id"`.
    #[must_use]
    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = id_key.into();
        self
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.data
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Value> {
        self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.data.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.data.last()
    }

    #[must_use]
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    ///
    /// MUTATION
    ///

    /// Append a record, generating a ULID identity when the record has
    /// none. Returns the record's id.
    ///
    /// # Errors
    ///
    /// Fails if the record is not an object or its identity field is not
    /// a string.
    pub fn insert(&mut self, mut record: Value) -> Result<String, CollectionError> {
        self.check_record(&record)?;

        // check_record already rejected non-text identities
        let id = if let Some(id) = record.get(&self.id_key).and_then(Value::as_text) {
            id.to_string()
        } else {
            let id = Ulid::new().to_string();
            if let Value::Map(entries) = &mut record {
                entries.push((self.id_key.clone(), Value::Text(id.clone())));
            }
            id
        };

        self.data.push(record);

        Ok(id)
    }

    /// Append several records; ids are assigned per record as in
    /// [`Self::insert`]. Nothing is inserted if any record is invalid.
    pub fn insert_many(&mut self, records: Vec<Value>) -> Result<Vec<String>, CollectionError> {
        for record in &records {
            self.check_record(record)?;
        }

        records.into_iter().map(|r| self.insert(r)).collect()
    }

    /// Replace the stored record carrying the same identity. Records whose
    /// identity is absent or unknown are left alone; returns whether a
    /// replacement happened.
    ///
    /// # Errors
    ///
    /// Fails on non-object records and non-string identity fields.
    pub fn update(&mut self, record: Value) -> Result<bool, CollectionError> {
        self.check_record(&record)?;

        let Some(Value::Text(id)) = record.get(&self.id_key) else {
            return Ok(false);
        };
        let id = id.clone();

        let id_key = &self.id_key;
        let slot = self.data.iter_mut().find(|existing| {
            existing.get(id_key).and_then(Value::as_text) == Some(id.as_str())
        });

        match slot {
            Some(existing) => {
                *existing = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace every record with a stored identity match; returns how many
    /// were replaced.
    pub fn update_many(&mut self, records: Vec<Value>) -> Result<usize, CollectionError> {
        let mut replaced = 0;
        for record in records {
            if self.update(record)? {
                replaced += 1;
            }
        }

        Ok(replaced)
    }

    /// Remove the record with this id; returns whether one was removed.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        self.remove_by_ids(&[id]) == 1
    }

    /// Remove every record whose id is listed, keeping the rest in order.
    /// Returns the number removed.
    pub fn remove_by_ids(&mut self, ids: &[&str]) -> usize {
        let before = self.data.len();
        let id_key = &self.id_key;
        self.data.retain(|record| {
            !record
                .get(id_key)
                .and_then(Value::as_text)
                .is_some_and(|rid| ids.contains(&rid))
        });

        before - self.data.len()
    }

    /// Remove records by the identity fields of the given records.
    /// Records without a string identity are ignored.
    pub fn remove_records(&mut self, records: &[Value]) -> usize {
        let ids: Vec<&str> = records
            .iter()
            .filter_map(|r| r.get(&self.id_key).and_then(Value::as_text))
            .collect();

        self.remove_by_ids(&ids)
    }

    /// Remove every record matching the query; returns the number removed.
    ///
    /// # Errors
    ///
    /// Fails if the query document does not compile.
    pub fn remove_where(&mut self, query: &Value) -> Result<usize, CollectionError> {
        let predicates = compile(query)?;
        let mut diag = Diagnostics::new();

        let before = self.data.len();
        self.data
            .retain(|record| !query::matches(record, &predicates, &mut diag));

        Ok(before - self.data.len())
    }

    ///
    /// QUERIES
    ///

    /// All records matching the query, with the warnings evaluation raised.
    ///
    /// # Errors
    ///
    /// Fails if the query document does not compile.
    pub fn find(&self, query: &Value) -> Result<ResultSet, CollectionError> {
        let predicates = compile(query)?;
        let mut diag = Diagnostics::new();

        let records = query::find(&self.data, &predicates, &mut diag)
            .into_iter()
            .cloned()
            .collect();

        Ok(ResultSet::new(records, diag.take()))
    }

    /// First record matching the query.
    ///
    /// # Errors
    ///
    /// Fails if the query document does not compile.
    pub fn find_one(&self, query: &Value) -> Result<Option<Value>, CollectionError> {
        let predicates = compile(query)?;
        let mut diag = Diagnostics::new();

        Ok(query::find_one(&self.data, &predicates, &mut diag).cloned())
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Value> {
        query::find_by_id(&self.data, &self.id_key, id)
    }

    #[must_use]
    pub fn find_by_ids(&self, ids: &[&str]) -> Vec<&Value> {
        query::find_by_ids(&self.data, &self.id_key, ids)
    }

    ///
    /// CHAINING
    ///

    /// New collection holding only the records that match the query.
    ///
    /// # Errors
    ///
    /// Fails if the query document does not compile.
    pub fn query(&self, query: &Value) -> Result<Self, CollectionError> {
        let matched = self.find(query)?;

        Ok(Self {
            data: matched.into_vec(),
            id_key: self.id_key.clone(),
        })
    }

    /// New collection sorted by a key. The sort is stable; records missing
    /// the key group before everything else in ascending order.
    #[must_use]
    pub fn sort(&self, spec: &SortSpec) -> Self {
        self.sort_by(|a, b| {
            let left = resolve(a, &spec.key).value();
            let right = resolve(b, &spec.key).value();
            let ord = match (left, right) {
                (Some(l), Some(r)) => Value::canonical_cmp(l, r),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match spec.direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        })
    }

    /// New collection sorted by an arbitrary comparator.
    #[must_use]
    pub fn sort_by(&self, mut compare: impl FnMut(&Value, &Value) -> Ordering) -> Self {
        let mut data = self.data.clone();
        data.sort_by(|a, b| compare(a, b));

        Self {
            data,
            id_key: self.id_key.clone(),
        }
    }

    /// New collection with each record projected to the given top-level
    /// keys, in the order requested. Missing keys are simply absent from
    /// the projection.
    #[must_use]
    pub fn select(&self, keys: &[&str]) -> Self {
        let data = self
            .data
            .iter()
            .map(|record| {
                let entries = keys
                    .iter()
                    .filter_map(|key| {
                        record.get(key).map(|v| ((*key).to_string(), v.clone()))
                    })
                    .collect();
                Value::Map(entries)
            })
            .collect();

        Self {
            data,
            id_key: self.id_key.clone(),
        }
    }

    // Shape checks shared by every mutation path.
    fn check_record(&self, record: &Value) -> Result<(), CollectionError> {
        if record.as_entries().is_none() {
            return Err(CollectionError::RecordNotObject {
                found: record.variant_name(),
            });
        }

        match record.get(&self.id_key) {
            None | Some(Value::Text(_)) => Ok(()),
            Some(other) => Err(CollectionError::NonTextIdentity {
                id_key: self.id_key.clone(),
                found: other.variant_name(),
            }),
        }
    }
}

impl FromIterator<Value> for Collection {
    /// Collects records without shape checks; prefer
    /// [`Collection::from_records`] for untrusted input.
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
            id_key: DEFAULT_ID_KEY.to_string(),
        }
    }
}
