use crate::collection::{Array, Document};
use crate::common::{
    GROUP_ANONYMOUS, GROUP_AUTHENTICATED, KEY_ACL_ADMIN, KEY_ACL_CREATE, KEY_ACL_DELETE,
    KEY_ACL_OWNER, KEY_ACL_READ, KEY_ACL_UPDATE, KEY_ACL_WRITE,
};

/// Permission lists of an [Acl].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AclPermission {
    Read,
    Write,
    Create,
    Update,
    Delete,
    Admin,
}

/// Access control list attached to an object.
///
/// Each permission holds a sorted list of unique entries: user ids or group
/// names such as `g:anonymous`. The owner is a single user id.
///
/// `Acl::default()` grants nothing to anyone.
///
/// # Examples
///
/// ```rust,ignore
/// use baas::acl::{Acl, AclPermission};
///
/// let mut acl = Acl::for_anonymous();
/// acl.add_entry(AclPermission::Update, "user1");
/// assert_eq!(
///     acl.to_document().to_json_string(),
///     r#"{"r":["g:anonymous"],"w":["g:anonymous"],"c":[],"u":["user1"],"d":[],"owner":"","admin":["g:anonymous"]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acl {
    read: Vec<String>,
    write: Vec<String>,
    create: Vec<String>,
    update: Vec<String>,
    delete: Vec<String>,
    admin: Vec<String>,
    owner: String,
}

fn sort_unique(list: &mut Vec<String>) {
    list.sort();
    list.dedup();
}

fn sanitized(entries: &[String]) -> Vec<String> {
    let mut list: Vec<String> = entries.iter().filter(|e| !e.is_empty()).cloned().collect();
    sort_unique(&mut list);
    list
}

// non-string entries read as "" and are dropped with the empty ones
fn read_list(doc: &Document, key: &str) -> Vec<String> {
    sanitized(&doc.get_array(key).get_all_string(""))
}

fn to_array(list: &[String]) -> Array {
    let mut array = Array::new();
    array.put_all_list(list);
    array
}

impl Acl {
    pub fn new() -> Acl {
        Acl::default()
    }

    /// Read, write and admin rights for everyone.
    pub fn for_anonymous() -> Acl {
        Acl::for_entry(GROUP_ANONYMOUS)
    }

    /// Read, write and admin rights for every logged-in user.
    pub fn for_authenticated() -> Acl {
        Acl::for_entry(GROUP_AUTHENTICATED)
    }

    /// Read, write and admin rights for `user_id`, who also becomes owner.
    pub fn for_owner(user_id: &str) -> Acl {
        let mut acl = Acl::for_entry(user_id);
        acl.owner = user_id.to_string();
        acl
    }

    /// Read, write and admin rights for a single entry.
    pub fn for_entry(entry: &str) -> Acl {
        let mut acl = Acl::default();
        acl.add_entry(AclPermission::Read, entry);
        acl.add_entry(AclPermission::Write, entry);
        acl.add_entry(AclPermission::Admin, entry);
        acl
    }

    /// Read, write and admin rights for each of `entries`.
    pub fn for_entries(entries: &[String]) -> Acl {
        let mut acl = Acl::default();
        acl.set_read(entries);
        acl.set_write(entries);
        acl.set_admin(entries);
        acl
    }

    /// Builds an ACL from its document form. Missing lists are empty.
    pub fn from_document(doc: &Document) -> Acl {
        Acl {
            read: read_list(doc, KEY_ACL_READ),
            write: read_list(doc, KEY_ACL_WRITE),
            create: read_list(doc, KEY_ACL_CREATE),
            update: read_list(doc, KEY_ACL_UPDATE),
            delete: read_list(doc, KEY_ACL_DELETE),
            admin: read_list(doc, KEY_ACL_ADMIN),
            owner: doc.get_string(KEY_ACL_OWNER, ""),
        }
    }

    /// Document form, keys in the order `r, w, c, u, d, owner, admin`.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.put_array(KEY_ACL_READ, &to_array(&self.read));
        doc.put_array(KEY_ACL_WRITE, &to_array(&self.write));
        doc.put_array(KEY_ACL_CREATE, &to_array(&self.create));
        doc.put_array(KEY_ACL_UPDATE, &to_array(&self.update));
        doc.put_array(KEY_ACL_DELETE, &to_array(&self.delete));
        doc.set(KEY_ACL_OWNER, self.owner.as_str());
        doc.put_array(KEY_ACL_ADMIN, &to_array(&self.admin));
        doc
    }

    fn list_mut(&mut self, permission: AclPermission) -> &mut Vec<String> {
        match permission {
            AclPermission::Read => &mut self.read,
            AclPermission::Write => &mut self.write,
            AclPermission::Create => &mut self.create,
            AclPermission::Update => &mut self.update,
            AclPermission::Delete => &mut self.delete,
            AclPermission::Admin => &mut self.admin,
        }
    }

    /// Entries holding `permission`, sorted.
    pub fn entries(&self, permission: AclPermission) -> &[String] {
        match permission {
            AclPermission::Read => &self.read,
            AclPermission::Write => &self.write,
            AclPermission::Create => &self.create,
            AclPermission::Update => &self.update,
            AclPermission::Delete => &self.delete,
            AclPermission::Admin => &self.admin,
        }
    }

    /// Grants `permission` to `entry`. Empty entries are ignored.
    pub fn add_entry(&mut self, permission: AclPermission, entry: &str) {
        if entry.is_empty() {
            return;
        }
        let list = self.list_mut(permission);
        list.push(entry.to_string());
        sort_unique(list);
    }

    /// Revokes `permission` from `entry`.
    pub fn remove_entry(&mut self, permission: AclPermission, entry: &str) {
        if entry.is_empty() {
            return;
        }
        self.list_mut(permission).retain(|e| e != entry);
    }

    /// Replaces the entries of `permission`, dropping empty ones.
    pub fn set_entries(&mut self, permission: AclPermission, entries: &[String]) {
        *self.list_mut(permission) = sanitized(entries);
    }

    pub fn read(&self) -> &[String] {
        &self.read
    }

    pub fn write(&self) -> &[String] {
        &self.write
    }

    pub fn create(&self) -> &[String] {
        &self.create
    }

    pub fn update(&self) -> &[String] {
        &self.update
    }

    pub fn delete(&self) -> &[String] {
        &self.delete
    }

    pub fn admin(&self) -> &[String] {
        &self.admin
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_read(&mut self, entries: &[String]) {
        self.set_entries(AclPermission::Read, entries);
    }

    pub fn set_write(&mut self, entries: &[String]) {
        self.set_entries(AclPermission::Write, entries);
    }

    pub fn set_create(&mut self, entries: &[String]) {
        self.set_entries(AclPermission::Create, entries);
    }

    pub fn set_update(&mut self, entries: &[String]) {
        self.set_entries(AclPermission::Update, entries);
    }

    pub fn set_delete(&mut self, entries: &[String]) {
        self.set_entries(AclPermission::Delete, entries);
    }

    pub fn set_admin(&mut self, entries: &[String]) {
        self.set_entries(AclPermission::Admin, entries);
    }

    pub fn set_owner(&mut self, owner: &str) {
        self.owner = owner.to_string();
    }
}
