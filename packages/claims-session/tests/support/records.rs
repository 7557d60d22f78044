//! Destination records shared by the integration tests

use claims_session::claims_record;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: i64,
}

claims_record!(User { id, name, age });

/// `User` after growing a field that older tokens don't carry.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct UserV2 {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub email: String,
}

claims_record!(UserV2 {
    id,
    name,
    age,
    email
});

/// Reads the same wire fields under different identifiers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Account {
    pub account_id: String,
    pub display_name: String,
    pub age: u8,
}

claims_record!(Account {
    account_id => "id",
    display_name => "name",
    age,
});

pub fn ann() -> User {
    User {
        id: "u1".to_string(),
        name: "Ann".to_string(),
        age: 30,
    }
}
