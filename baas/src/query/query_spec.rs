use itertools::Itertools;
use std::collections::BTreeMap;

use crate::collection::Document;
use crate::common::{FLAG_ON, LIMIT_DEFAULT};
use crate::query::ReadPreference;

/// Search conditions and options for an object bucket query.
///
/// `Query` is a consuming builder: each method takes `self` and returns the
/// updated query, so calls chain. See the condition methods
/// ([Query::equal_to], [Query::not], [Query::or], ...) and the option
/// methods below.
///
/// # Examples
///
/// ```rust,ignore
/// use baas::query::Query;
///
/// let query = Query::new()
///     .equal_to("status", "active")
///     .skip(20)
///     .limit(10)
///     .delete_mark(true);
///
/// assert_eq!(query.conditions_string(), r#"{"status":"active"}"#);
/// assert_eq!(query.skip_string(), "20");
/// assert_eq!(query.delete_mark_string(), "1");
/// ```
///
/// A query is plain data and is not synchronized.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub(crate) conditions: Document,
    pub(crate) order: Vec<String>,
    pub(crate) skip: i32,
    pub(crate) limit: i32,
    pub(crate) delete_mark: bool,
    pub(crate) projection: BTreeMap<String, bool>,
    pub(crate) read_preference: ReadPreference,
    pub(crate) timeout: i32,
}

impl Default for Query {
    fn default() -> Self {
        Query::new()
    }
}

impl Query {
    /// Creates a query with no conditions and every option unset.
    pub fn new() -> Query {
        Query {
            conditions: Document::new(),
            order: Vec::new(),
            skip: 0,
            limit: LIMIT_DEFAULT,
            delete_mark: false,
            projection: BTreeMap::new(),
            read_preference: ReadPreference::Primary,
            timeout: 0,
        }
    }

    /// Sets the sort order. A leading `-` sorts that field descending.
    ///
    /// The whole list is ignored if it is empty or if any entry is empty; the
    /// previous order is kept in that case.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let query = Query::new().order_by(&["name", "-age"]);
    /// assert_eq!(query.order_string(), "name,-age");
    ///
    /// let query = query.order_by(&["x", ""]);
    /// assert_eq!(query.order_string(), "name,-age");
    /// ```
    pub fn order_by<S: AsRef<str>>(mut self, fields: &[S]) -> Query {
        if fields.is_empty() || fields.iter().any(|f| f.as_ref().is_empty()) {
            log::warn!("Ignoring sort order with an empty field list or field name");
            return self;
        }
        self.order = fields.iter().map(|f| f.as_ref().to_string()).collect();
        self
    }

    /// Number of results to skip. Only positive values are sent.
    pub fn skip(mut self, skip: i32) -> Query {
        self.skip = skip;
        self
    }

    /// Maximum number of results, from `-1` (no limit) to `99`.
    ///
    /// Any other value, including the default `100`, leaves the limit to the
    /// server.
    pub fn limit(mut self, limit: i32) -> Query {
        self.limit = limit;
        self
    }

    /// Includes delete-marked objects in the results.
    pub fn delete_mark(mut self, delete_mark: bool) -> Query {
        self.delete_mark = delete_mark;
        self
    }

    /// Restricts the returned fields: `true` includes a field, `false`
    /// excludes it.
    ///
    /// The whole map is ignored if it is empty or contains an empty field
    /// name.
    pub fn projection<K, I>(mut self, fields: I) -> Query
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, bool)>,
    {
        let fields: Vec<(K, bool)> = fields.into_iter().collect();
        if fields.is_empty() || fields.iter().any(|(k, _)| k.as_ref().is_empty()) {
            log::warn!("Ignoring projection with no fields or an empty field name");
            return self;
        }
        self.projection = fields
            .into_iter()
            .map(|(k, include)| (k.as_ref().to_string(), include))
            .collect();
        self
    }

    pub fn read_preference(mut self, read_preference: ReadPreference) -> Query {
        self.read_preference = read_preference;
        self
    }

    /// Server-side timeout in milliseconds. Values `<= 0` are not sent.
    pub fn timeout(mut self, timeout: i32) -> Query {
        self.timeout = timeout;
        self
    }

    /// The accumulated condition document.
    pub fn conditions(&self) -> &Document {
        &self.conditions
    }

    /// Conditions as compact JSON, or empty when there are none.
    pub fn conditions_string(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }
        self.conditions.to_json_string()
    }

    pub fn order_string(&self) -> String {
        self.order.iter().join(",")
    }

    pub fn skip_string(&self) -> String {
        if self.skip > 0 {
            return self.skip.to_string();
        }
        String::new()
    }

    pub fn limit_string(&self) -> String {
        if (-1..LIMIT_DEFAULT).contains(&self.limit) {
            return self.limit.to_string();
        }
        String::new()
    }

    pub fn delete_mark_string(&self) -> String {
        if self.delete_mark {
            return FLAG_ON.to_string();
        }
        String::new()
    }

    /// Projection as a JSON object of `1`/`0` flags, fields sorted by name.
    pub fn projection_string(&self) -> String {
        if self.projection.is_empty() {
            return String::new();
        }
        let mut doc = Document::new();
        for (field, include) in &self.projection {
            doc.set(field, if *include { 1 } else { 0 });
        }
        doc.to_json_string()
    }

    pub fn read_preference_string(&self) -> String {
        self.read_preference.as_param().to_string()
    }

    pub fn timeout_string(&self) -> String {
        if self.timeout > 0 {
            return self.timeout.to_string();
        }
        String::new()
    }
}
