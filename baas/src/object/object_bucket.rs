use crate::collection::Document;
use crate::common::{
    DEFAULT_REST_TIMEOUT, FLAG_ON, KEY_COUNT, KEY_DELETE_MARK, KEY_LIMIT, KEY_ORDER,
    KEY_PROJECTION, KEY_READ_PREFERENCE, KEY_RESULTS, KEY_SKIP, KEY_TIMEOUT, KEY_WHERE,
    OBJECTS_PATH,
};
use crate::errors::{BaasError, BaasResult, ErrorKind};
use crate::object::RemoteDocument;
use crate::query::Query;
use crate::service::Service;

/// Objects returned by [ObjectBucket::query].
#[derive(Clone, Debug)]
pub struct QueryResult {
    objects: Vec<RemoteDocument>,
    count: Option<i32>,
}

impl QueryResult {
    pub fn objects(&self) -> &[RemoteDocument] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<RemoteDocument> {
        self.objects
    }

    /// Total number of matching objects, present only when it was requested.
    pub fn count(&self) -> Option<i32> {
        self.count
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// A named collection of objects on the server.
///
/// # Examples
///
/// ```rust,ignore
/// let bucket = service.object_bucket("todos");
///
/// let query = Query::new().equal_to("done", false).order_by(&["-createdAt"]).limit(10);
/// let result = bucket.query(&query, true)?;
/// for todo in result.objects() {
///     println!("{} {}", todo.object_id(), todo.get_string("title", ""));
/// }
///
/// let todo = bucket.get_object("5f1c", false)?;
/// ```
#[derive(Clone, Debug)]
pub struct ObjectBucket {
    service: Service,
    bucket_name: String,
    timeout: i32,
}

impl ObjectBucket {
    pub fn new(service: Service, bucket_name: &str) -> Self {
        let timeout = service.config().default_timeout();
        ObjectBucket {
            service,
            bucket_name: bucket_name.to_string(),
            timeout,
        }
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn timeout(&self) -> i32 {
        self.timeout
    }

    /// Values `<= 0` restore the 60 second default.
    pub fn set_timeout(&mut self, timeout: i32) {
        self.timeout = if timeout > 0 {
            timeout
        } else {
            DEFAULT_REST_TIMEOUT
        };
    }

    /// An unbound, empty object of this bucket.
    pub fn new_object(&self) -> RemoteDocument {
        let mut object = RemoteDocument::new(self.service.clone(), &self.bucket_name);
        object.set_timeout(self.timeout);
        object
    }

    /// Fetches the object `object_id`. With `delete_mark`, a delete-marked
    /// object is returned too.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::InvalidArgument] if `object_id` is empty.
    /// * [ErrorKind::BucketNameError] if the bucket name is empty.
    /// * Any error of [Service::execute_request].
    pub fn get_object(&self, object_id: &str, delete_mark: bool) -> BaasResult<RemoteDocument> {
        if object_id.is_empty() {
            log::error!("Object ID is empty.");
            return Err(BaasError::new(
                "Object ID is empty.",
                ErrorKind::InvalidArgument,
            ));
        }
        self.check_bucket_name()?;

        let path = format!("/{}/{}", self.bucket_name, object_id);
        let delete_mark = if delete_mark { FLAG_ON } else { "" };
        let response = self.service.execute_request(
            |factory| {
                factory
                    .get(OBJECTS_PATH)
                    .append_path(&path)
                    .append_param(KEY_DELETE_MARK, delete_mark)
            },
            self.timeout,
        )?;

        let mut object = self.new_object();
        object.set_current_param(Document::from_slice(response.body()));
        Ok(object)
    }

    /// Runs `query` against this bucket. With `with_count`, the server also
    /// reports the total number of matches.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::BucketNameError] if the bucket name is empty.
    /// * Any error of [Service::execute_request].
    pub fn query(&self, query: &Query, with_count: bool) -> BaasResult<QueryResult> {
        self.check_bucket_name()?;

        let path = format!("/{}", self.bucket_name);
        let params = self.query_params(query, with_count);
        let response = self.service.execute_request(
            |factory| factory.get(OBJECTS_PATH).append_path(&path).params(params),
            self.timeout,
        )?;

        let json = Document::from_slice(response.body());
        let objects = json
            .get_array(KEY_RESULTS)
            .iter()
            .filter_map(|value| {
                let doc = value.as_document();
                if doc.is_none() {
                    log::warn!(
                        "Skipping {} entry in query results of {}",
                        value.json_type(),
                        self.bucket_name
                    );
                }
                doc
            })
            .map(|doc| {
                let mut object = self.new_object();
                object.set_current_param(doc.clone());
                object
            })
            .collect::<Vec<_>>();
        let count = with_count.then(|| json.get_i32(KEY_COUNT, 0));

        log::debug!(
            "Query on {} returned {} objects",
            self.bucket_name,
            objects.len()
        );
        Ok(QueryResult { objects, count })
    }

    /// The request parameters [ObjectBucket::query] sends for `query`.
    ///
    /// Parts that render empty are left out.
    pub fn query_params(&self, query: &Query, with_count: bool) -> Vec<(String, String)> {
        let count = if with_count { FLAG_ON } else { "" };
        let candidates = [
            (KEY_WHERE, query.conditions_string()),
            (KEY_ORDER, query.order_string()),
            (KEY_SKIP, query.skip_string()),
            (KEY_LIMIT, query.limit_string()),
            (KEY_DELETE_MARK, query.delete_mark_string()),
            (KEY_PROJECTION, query.projection_string()),
            (KEY_READ_PREFERENCE, query.read_preference_string()),
            (KEY_TIMEOUT, query.timeout_string()),
            (KEY_COUNT, count.to_string()),
        ];
        candidates
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    fn check_bucket_name(&self) -> BaasResult<()> {
        if self.bucket_name.is_empty() {
            log::error!("Bucket name is empty.");
            return Err(BaasError::new(
                "Bucket name is empty.",
                ErrorKind::BucketNameError,
            ));
        }
        Ok(())
    }
}
