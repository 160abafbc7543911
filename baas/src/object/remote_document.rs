use chrono::{DateTime, Utc};
use std::ops::{Deref, DerefMut};

use crate::acl::Acl;
use crate::collection::Document;
use crate::common::{
    format_date_string, parse_date_string, Value, DEFAULT_REST_TIMEOUT, FLAG_ON, FULL_UPDATE,
    HEADER_CONTENT_TYPE, HEADER_CONTENT_TYPE_JSON, KEY_ACL, KEY_CREATED_AT, KEY_DELETED,
    KEY_DELETE_MARK, KEY_ETAG, KEY_ID, KEY_UPDATED_AT, OBJECTS_PATH, RESERVED_FIELDS,
};
use crate::errors::{BaasError, BaasResult, ErrorKind};
use crate::service::Service;

// reserved keys a patch body may not carry
const PATCH_STRIPPED_FIELDS: [&str; 3] = [KEY_ID, KEY_UPDATED_AT, KEY_ETAG];

fn take_string(doc: &mut Document, key: &str) -> String {
    match doc.remove(key) {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

fn without_fields(doc: &Document, fields: &[&str]) -> Document {
    let mut stripped = doc.clone();
    for field in fields {
        stripped.remove(field);
    }
    stripped
}

/// A document stored in an object bucket.
///
/// `RemoteDocument` dereferences to its [Document] body, so every document
/// operation is available on it. Server metadata lives in typed fields next
/// to the body: object id, creation and update times, ETag, [Acl] and the
/// delete mark. The reserved keys `_id`, `createdAt`, `updatedAt`, `ACL`,
/// `etag` and `_deleted` never stay in the body after a successful call.
///
/// A document without an id is unbound. [RemoteDocument::save] creates it
/// on the server and binds it to the returned id; later saves overwrite it.
///
/// Every operation validates its arguments before touching the network, and
/// local state changes only when the server call succeeds.
///
/// # Examples
///
/// ```rust,ignore
/// let bucket = service.object_bucket("todos");
///
/// let mut todo = bucket.new_object();
/// todo.set("title", "write docs");
/// todo.set("done", false);
/// todo.save(true)?;
/// assert!(!todo.object_id().is_empty());
///
/// let mut patch = Document::new();
/// patch.set("done", true);
/// todo.part_update(&patch)?;
///
/// todo.delete(true)?;
/// assert!(todo.delete_mark());
/// ```
///
/// A `RemoteDocument` is not synchronized. Use one instance per thread, or
/// guard it externally.
#[derive(Clone, Debug)]
pub struct RemoteDocument {
    service: Service,
    body: Document,
    bucket_name: String,
    object_id: String,
    created_time: String,
    updated_time: String,
    etag: String,
    acl: Acl,
    delete_mark: bool,
    timeout: i32,
    no_acl: bool,
}

impl RemoteDocument {
    /// Creates an unbound, empty document for `bucket_name`.
    pub fn new(service: Service, bucket_name: &str) -> Self {
        let timeout = service.config().default_timeout();
        RemoteDocument {
            service,
            body: Document::new(),
            bucket_name: bucket_name.to_string(),
            object_id: String::new(),
            created_time: String::new(),
            updated_time: String::new(),
            etag: String::new(),
            acl: Acl::default(),
            delete_mark: false,
            timeout,
            no_acl: false,
        }
    }

    /// Creates or overwrites the object on the server.
    ///
    /// Without an object id, the body is posted as a new object. The ACL is
    /// attached only when `apply_acl` is set.
    ///
    /// With an object id, the object is replaced as a whole. The ACL is
    /// always attached and `apply_acl` is ignored. A known creation time is
    /// sent along, and a held ETag is sent as a precondition.
    ///
    /// No-ACL mode suppresses the ACL in both cases. On success the body and
    /// metadata are replaced from the response.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::BucketNameError] if the bucket name is empty.
    /// * Any error of [Service::execute_request].
    pub fn save(&mut self, apply_acl: bool) -> BaasResult<&mut RemoteDocument> {
        self.check_bucket_name()?;

        let mut payload = without_fields(&self.body, &RESERVED_FIELDS);
        let response = if self.object_id.is_empty() {
            if apply_acl && !self.no_acl {
                payload.put_document(KEY_ACL, &self.acl.to_document());
            }
            let path = format!("/{}", self.bucket_name);
            let body = payload.to_json_string();
            self.service.execute_request(
                |factory| {
                    factory
                        .post(OBJECTS_PATH)
                        .append_path(&path)
                        .append_header(HEADER_CONTENT_TYPE, HEADER_CONTENT_TYPE_JSON)
                        .body(&body)
                },
                self.timeout,
            )?
        } else {
            if !self.no_acl {
                payload.put_document(KEY_ACL, &self.acl.to_document());
            }
            if !self.created_time.is_empty() {
                payload.set(KEY_CREATED_AT, self.created_time.as_str());
            }
            let mut wrapped = Document::new();
            wrapped.put_document(FULL_UPDATE, &payload);
            let body = wrapped.to_json_string();
            let path = self.object_path();
            self.service.execute_request(
                |factory| {
                    factory
                        .put(OBJECTS_PATH)
                        .append_path(&path)
                        .append_param(KEY_ETAG, &self.etag)
                        .append_header(HEADER_CONTENT_TYPE, HEADER_CONTENT_TYPE_JSON)
                        .body(&body)
                },
                self.timeout,
            )?
        };

        self.set_current_param(Document::from_slice(response.body()));
        Ok(self)
    }

    /// Updates the given fields of the object, leaving the others as they
    /// are on the server.
    ///
    /// Equivalent to `part_update_with_acl(patch, false)`.
    pub fn part_update(&mut self, patch: &Document) -> BaasResult<&mut RemoteDocument> {
        self.part_update_with_acl(patch, false)
    }

    /// Updates the given fields of the object.
    ///
    /// `_id`, `updatedAt` and `etag` are removed from the patch. `ACL`,
    /// `createdAt` and `_deleted` are sent as given. With `apply_acl` set,
    /// outside no-ACL mode, the ACL of this document replaces any `ACL` key
    /// of the patch.
    ///
    /// # Errors
    ///
    /// Checked in this order, before any request:
    ///
    /// 1. [ErrorKind::InvalidArgument] if `patch` is empty.
    /// 2. [ErrorKind::BucketNameError] if the bucket name is empty.
    /// 3. [ErrorKind::ObjectIdError] if the object id is empty.
    ///
    /// Then any error of [Service::execute_request].
    pub fn part_update_with_acl(
        &mut self,
        patch: &Document,
        apply_acl: bool,
    ) -> BaasResult<&mut RemoteDocument> {
        if patch.is_empty() {
            log::error!("Patch document is empty.");
            return Err(BaasError::new(
                "Patch document is empty.",
                ErrorKind::InvalidArgument,
            ));
        }
        self.check_bucket_name()?;
        self.check_object_id()?;

        let mut payload = without_fields(patch, &PATCH_STRIPPED_FIELDS);
        if apply_acl && !self.no_acl {
            payload.put_document(KEY_ACL, &self.acl.to_document());
        }
        let body = payload.to_json_string();
        let path = self.object_path();
        let response = self.service.execute_request(
            |factory| {
                factory
                    .put(OBJECTS_PATH)
                    .append_path(&path)
                    .append_param(KEY_ETAG, &self.etag)
                    .append_header(HEADER_CONTENT_TYPE, HEADER_CONTENT_TYPE_JSON)
                    .body(&body)
            },
            self.timeout,
        )?;

        self.set_current_param(Document::from_slice(response.body()));
        Ok(self)
    }

    /// Deletes the object, or only marks it deleted.
    ///
    /// With `delete_mark_only`, the object is kept on the server with its
    /// delete mark set. This document takes the response and a clone of it
    /// is returned.
    ///
    /// Otherwise the object is removed. This document is left unchanged and
    /// a new document of the same bucket is returned whose body is the
    /// response, reserved keys included.
    ///
    /// A held ETag is sent as a precondition.
    ///
    /// # Errors
    ///
    /// * [ErrorKind::BucketNameError] if the bucket name is empty.
    /// * [ErrorKind::ObjectIdError] if the object id is empty.
    /// * Any error of [Service::execute_request].
    pub fn delete(&mut self, delete_mark_only: bool) -> BaasResult<RemoteDocument> {
        self.check_bucket_name()?;
        self.check_object_id()?;

        let path = self.object_path();
        let delete_mark = if delete_mark_only { FLAG_ON } else { "" };
        let response = self.service.execute_request(
            |factory| {
                factory
                    .delete(OBJECTS_PATH)
                    .append_path(&path)
                    .append_param(KEY_ETAG, &self.etag)
                    .append_param(KEY_DELETE_MARK, delete_mark)
            },
            self.timeout,
        )?;

        let body = Document::from_slice(response.body());
        if delete_mark_only {
            self.set_current_param(body);
            return Ok(self.clone());
        }

        let mut removed = RemoteDocument::new(self.service.clone(), &self.bucket_name);
        removed.set_object_data(body);
        Ok(removed)
    }

    /// Replaces body and metadata with a server response.
    ///
    /// Each reserved key found in `response` is moved into its metadata
    /// field. Each reserved key missing from it resets its field, so nothing
    /// is carried over from an earlier response.
    pub fn set_current_param(&mut self, mut response: Document) {
        self.object_id = take_string(&mut response, KEY_ID);
        self.created_time = take_string(&mut response, KEY_CREATED_AT);
        self.updated_time = take_string(&mut response, KEY_UPDATED_AT);
        self.acl = match response.remove(KEY_ACL) {
            Some(Value::Document(doc)) => Acl::from_document(&doc),
            _ => Acl::default(),
        };
        self.etag = take_string(&mut response, KEY_ETAG);
        self.delete_mark = response
            .remove(KEY_DELETED)
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        self.body = response;
    }

    /// Replaces the body. Metadata is left as it is.
    pub fn set_object_data(&mut self, data: Document) {
        self.body = data;
    }

    /// The user-visible body.
    pub fn object_data(&self) -> &Document {
        &self.body
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn set_bucket_name(&mut self, bucket_name: &str) {
        self.bucket_name = bucket_name.to_string();
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    /// Binds this document to an existing object. An empty id unbinds it, so
    /// the next save creates a new object.
    pub fn set_object_id(&mut self, object_id: &str) {
        self.object_id = object_id.to_string();
    }

    /// Creation time reported by the server, `None` when unknown.
    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        parse_date_string(&self.created_time)
    }

    /// Creation time as stored, empty when unknown.
    pub fn created_time_string(&self) -> &str {
        &self.created_time
    }

    /// Sets the creation time sent with the next overwrite. `None` clears it.
    pub fn set_created_time(&mut self, created_time: Option<DateTime<Utc>>) {
        self.created_time = format_date_string(created_time.as_ref());
    }

    pub fn updated_time(&self) -> Option<DateTime<Utc>> {
        parse_date_string(&self.updated_time)
    }

    pub fn updated_time_string(&self) -> &str {
        &self.updated_time
    }

    pub fn etag(&self) -> &str {
        &self.etag
    }

    /// Sets the ETag sent as precondition. An empty ETag sends none.
    pub fn set_etag(&mut self, etag: &str) {
        self.etag = etag.to_string();
    }

    pub fn acl(&self) -> &Acl {
        &self.acl
    }

    pub fn set_acl(&mut self, acl: Acl) {
        self.acl = acl;
    }

    /// Whether the server holds this object as delete-marked.
    pub fn delete_mark(&self) -> bool {
        self.delete_mark
    }

    /// Request timeout in seconds.
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

    /// Whether ACLs are left out of every payload, for buckets without ACL
    /// support.
    pub fn is_no_acl(&self) -> bool {
        self.no_acl
    }

    pub fn set_no_acl(&mut self, no_acl: bool) {
        self.no_acl = no_acl;
    }

    fn object_path(&self) -> String {
        format!("/{}/{}", self.bucket_name, self.object_id)
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

    fn check_object_id(&self) -> BaasResult<()> {
        if self.object_id.is_empty() {
            log::error!("Object ID is empty.");
            return Err(BaasError::new(
                "Object ID is empty.",
                ErrorKind::ObjectIdError,
            ));
        }
        Ok(())
    }
}

impl Deref for RemoteDocument {
    type Target = Document;

    fn deref(&self) -> &Self::Target {
        &self.body
    }
}

impl DerefMut for RemoteDocument {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.body
    }
}
