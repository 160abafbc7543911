// reserved document keys
pub const KEY_ID: &str = "_id";
pub const KEY_CREATED_AT: &str = "createdAt";
pub const KEY_UPDATED_AT: &str = "updatedAt";
pub const KEY_ACL: &str = "ACL";
pub const KEY_ETAG: &str = "etag";
pub const KEY_DELETED: &str = "_deleted";
pub const RESERVED_FIELDS: [&str; 6] = [
    KEY_ID,
    KEY_CREATED_AT,
    KEY_UPDATED_AT,
    KEY_ACL,
    KEY_ETAG,
    KEY_DELETED,
];

// Compile-time assertion for reserved fields count
const _: () = {
    const RESERVED_FIELDS_COUNT: usize = 6;
    const ACTUAL_COUNT: usize = RESERVED_FIELDS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == RESERVED_FIELDS_COUNT) as usize];
};

// request parameter keys
pub const KEY_DELETE_MARK: &str = "deleteMark";
pub const KEY_WHERE: &str = "where";
pub const KEY_ORDER: &str = "order";
pub const KEY_SKIP: &str = "skip";
pub const KEY_LIMIT: &str = "limit";
pub const KEY_COUNT: &str = "count";
pub const KEY_PROJECTION: &str = "projection";
pub const KEY_READ_PREFERENCE: &str = "readPreference";
pub const KEY_TIMEOUT: &str = "timeout";
pub const KEY_RESULTS: &str = "results";
pub const FLAG_ON: &str = "1";

// query operators
pub const OP_EQ: &str = "$eq";
pub const OP_NE: &str = "$ne";
pub const OP_LT: &str = "$lt";
pub const OP_LTE: &str = "$lte";
pub const OP_GT: &str = "$gt";
pub const OP_GTE: &str = "$gte";
pub const OP_IN: &str = "$in";
pub const OP_ALL: &str = "$all";
pub const OP_EXISTS: &str = "$exists";
pub const OP_REGEX: &str = "$regex";
pub const OP_OPTIONS: &str = "$options";
pub const OP_NOT: &str = "$not";
pub const OP_OR: &str = "$or";
pub const OP_AND: &str = "$and";
pub const FULL_UPDATE: &str = "$full_update";
pub const READ_PREFERENCE_SECONDARY_PREFERRED: &str = "secondaryPreferred";

// acl keys
pub const KEY_ACL_READ: &str = "r";
pub const KEY_ACL_WRITE: &str = "w";
pub const KEY_ACL_CREATE: &str = "c";
pub const KEY_ACL_UPDATE: &str = "u";
pub const KEY_ACL_DELETE: &str = "d";
pub const KEY_ACL_OWNER: &str = "owner";
pub const KEY_ACL_ADMIN: &str = "admin";
pub const GROUP_ANONYMOUS: &str = "g:anonymous";
pub const GROUP_AUTHENTICATED: &str = "g:authenticated";

// rest api
pub const API_VERSION: &str = "1";
pub const OBJECTS_PATH: &str = "/objects";
pub const HEADER_APP_ID: &str = "X-Application-Id";
pub const HEADER_APP_KEY: &str = "X-Application-Key";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_CONTENT_TYPE_JSON: &str = "application/json";
pub const HEADER_USER_AGENT: &str = "User-Agent";
pub const HEADER_USER_AGENT_DEFAULT: &str = "baas embedded sdk";

// defaults
pub const DEFAULT_REST_TIMEOUT: i32 = 60;
pub const HTTP_CONNECTION_MAX: usize = 20;
pub const LIMIT_DEFAULT: i32 = 100;

pub const BAAS_VERSION: &str = env!("CARGO_PKG_VERSION");
