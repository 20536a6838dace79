use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;

/// A named equality query: "all records where `attribute == value`".
///
/// Hosts with a query engine translate this into their own filter; hosts
/// without one can use [`ScopeQuery::filter`] over loaded records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeQuery {
    pub name: String,
    pub attribute: String,
    pub value: Value,
}

impl ScopeQuery {
    pub fn new(name: impl Into<String>, attribute: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
            value,
        }
    }

    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        record.has_field(&self.attribute) && record.get(&self.attribute) == self.value
    }

    pub fn filter<'a, R, I>(&'a self, records: I) -> impl Iterator<Item = &'a R> + 'a
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |record| self.matches(*record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MemoryRecord;

    #[test]
    fn filter_keeps_equal_values() {
        let records = vec![
            MemoryRecord::new(["power"]).with("power", "on"),
            MemoryRecord::new(["power"]).with("power", "off"),
            MemoryRecord::new(["other"]),
        ];
        let scope = ScopeQuery::new("power_on", "power", Value::from("on"));
        let hits: Vec<_> = scope.filter(&records).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].get("power"), Value::from("on"));
    }
}
