use crate::collection::{Array, Document};
use crate::common::{
    Value, OP_ALL, OP_AND, OP_EQ, OP_EXISTS, OP_GT, OP_GTE, OP_IN, OP_LT, OP_LTE, OP_NE, OP_NOT,
    OP_OPTIONS, OP_OR, OP_REGEX,
};
use crate::query::Query;

fn wrap(op: &str, value: Value) -> Value {
    let mut doc = Document::new();
    doc.insert_value(op, value);
    Value::Document(doc)
}

impl Query {
    /// Stores `value` under `key`, wrapped as `{op: value}` unless `op` is empty.
    /// A later condition on the same key replaces the earlier one.
    fn add_simple_op(mut self, op: &str, key: &str, value: Value) -> Query {
        if key.is_empty() {
            log::warn!("Ignoring condition with an empty key");
            return self;
        }
        let condition = if op.is_empty() { value } else { wrap(op, value) };
        self.conditions.insert_value(key, condition);
        self
    }

    /// Matches objects whose `key` equals `value`.
    ///
    /// Scalars and arrays are stored as they are (`{"key": value}`). A nested
    /// document is stored as `{"key": {"$eq": value}}` so the server does
    /// not read it as an operator object.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let query = Query::new().equal_to("k", 5);
    /// assert_eq!(query.conditions_string(), r#"{"k":5}"#);
    ///
    /// let inner = Document::from_json(r#"{"a":1}"#);
    /// let query = Query::new().equal_to("k", &inner);
    /// assert_eq!(query.conditions_string(), r#"{"k":{"$eq":{"a":1}}}"#);
    /// ```
    pub fn equal_to<T: Into<Value>>(self, key: &str, value: T) -> Query {
        let value = value.into();
        if value.is_document() {
            self.add_simple_op(OP_EQ, key, value)
        } else {
            self.add_simple_op("", key, value)
        }
    }

    pub fn not_equals<T: Into<Value>>(self, key: &str, value: T) -> Query {
        self.add_simple_op(OP_NE, key, value.into())
    }

    pub fn less_than<T: Into<Value>>(self, key: &str, value: T) -> Query {
        self.add_simple_op(OP_LT, key, value.into())
    }

    pub fn less_than_or_equal<T: Into<Value>>(self, key: &str, value: T) -> Query {
        self.add_simple_op(OP_LTE, key, value.into())
    }

    pub fn greater_than<T: Into<Value>>(self, key: &str, value: T) -> Query {
        self.add_simple_op(OP_GT, key, value.into())
    }

    pub fn greater_than_or_equal<T: Into<Value>>(self, key: &str, value: T) -> Query {
        self.add_simple_op(OP_GTE, key, value.into())
    }

    /// Matches objects whose `key` equals any element of `values`.
    pub fn in_array(self, key: &str, values: &Array) -> Query {
        self.add_simple_op(OP_IN, key, Value::Array(values.clone()))
    }

    /// Matches objects whose array `key` contains every element of `values`.
    pub fn all(self, key: &str, values: &Array) -> Query {
        self.add_simple_op(OP_ALL, key, Value::Array(values.clone()))
    }

    /// Matches `key` against a regular expression.
    ///
    /// No-op unless both `key` and `pattern` are non-empty. `options` is sent
    /// as `$options` when present and non-empty.
    pub fn regex(mut self, key: &str, pattern: &str, options: Option<&str>) -> Query {
        if key.is_empty() || pattern.is_empty() {
            log::warn!("Ignoring regex condition with an empty key or pattern");
            return self;
        }
        let mut condition = Document::new();
        condition.set(OP_REGEX, pattern);
        if let Some(options) = options.filter(|o| !o.is_empty()) {
            condition.set(OP_OPTIONS, options);
        }
        self.conditions
            .insert_value(key, Value::Document(condition));
        self
    }

    pub fn exists(self, key: &str) -> Query {
        self.add_simple_op(OP_EXISTS, key, Value::Bool(true))
    }

    pub fn not_exists(self, key: &str) -> Query {
        self.add_simple_op(OP_EXISTS, key, Value::Bool(false))
    }

    /// Negates the condition already registered for `key`.
    ///
    /// A condition that is not an object (a bare equality value, including
    /// arrays) is first promoted to `{"$eq": value}`. No-op when `key` has
    /// no condition yet.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let query = Query::new().equal_to("k", 5).not("k");
    /// assert_eq!(query.conditions_string(), r#"{"k":{"$not":{"$eq":5}}}"#);
    ///
    /// let query = Query::new().greater_than("k", 5).not("k");
    /// assert_eq!(query.conditions_string(), r#"{"k":{"$not":{"$gt":5}}}"#);
    /// ```
    pub fn not(mut self, key: &str) -> Query {
        if key.is_empty() {
            return self;
        }
        match self.conditions.get_mut(key) {
            Some(condition) => {
                let current = std::mem::take(condition);
                let inner = if current.is_document() {
                    current
                } else {
                    wrap(OP_EQ, current)
                };
                *condition = wrap(OP_NOT, inner);
            }
            None => log::debug!("No condition registered for {}, nothing to negate", key),
        }
        self
    }

    /// Combines this query and `queries` with a logical OR.
    ///
    /// The current conditions (when non-empty) come first, followed by the
    /// conditions of each argument, as a positional array under `$or`. The
    /// result replaces every condition of this query. No-op for an empty
    /// list.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let query = Query::new()
    ///     .equal_to("a", 1)
    ///     .or(&[Query::new().equal_to("b", 2), Query::new().exists("c")]);
    /// assert_eq!(
    ///     query.conditions_string(),
    ///     r#"{"$or":[{"a":1},{"b":2},{"c":{"$exists":true}}]}"#
    /// );
    /// ```
    pub fn or(self, queries: &[Query]) -> Query {
        self.concat_queries(OP_OR, queries)
    }

    /// Combines this query and `queries` with a logical AND. See [Query::or].
    pub fn and(self, queries: &[Query]) -> Query {
        self.concat_queries(OP_AND, queries)
    }

    fn concat_queries(mut self, op: &str, queries: &[Query]) -> Query {
        if queries.is_empty() {
            log::warn!("Ignoring {} with no queries", op);
            return self;
        }
        let mut list = Array::new();
        if !self.conditions.is_empty() {
            list.append_document(&self.conditions);
        }
        for query in queries {
            list.append_document(&query.conditions);
        }
        self.conditions.clear();
        self.conditions.insert_value(op, Value::Array(list));
        self
    }
}
