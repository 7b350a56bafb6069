use serde::{Deserialize, Serialize};
use std::fmt;

use super::GroupId;

/// A shared task list. Every member may read and edit its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberRef>,
}

/// Group members are either serialized as primary keys or as usernames,
/// depending on the serializer the backend uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberRef {
    Id(i64),
    Username(String),
    Member(Member),
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRef::Id(id) => write!(f, "#{}", id),
            MemberRef::Username(name) => f.write_str(name),
            MemberRef::Member(member) => f.write_str(&member.username),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupName<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipChange<'a> {
    pub username: &'a str,
}
