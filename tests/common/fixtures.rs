//! Contact fixtures shared by the integration tests

use serde_json::{json, Value};

/// The sample address book used to demonstrate merging
///
/// Twelve contacts: two people split across phone/email variants, two
/// empty records, one name-only record, one record whose `"email "` key
/// carries a trailing space (and so is not an email), and a chain
/// phone -> phone+email -> email.
pub fn sample_address_book() -> Vec<Value> {
    vec![
        json!({"Name": "Mr. X",  "phone": "123-456-7890", "email": "x@yieldmo.com"}),
        json!({"Name": "Ms. Y",  "phone": "456-789-1234", "email": "y@yieldmo.com"}),
        json!({"Name": "Mr. X1", "phone": "123-456-7890", "email": "x@gmail.com"}),
        json!({"Name": "Ms. Y1", "phone": "456-789-9999", "email": "y@yieldmo.com"}),
        json!({}),
        json!({}),
        json!({"Name": "Ken"}),
        json!({"email ": "some1@some.com"}),
        json!({"email": "some2@some.com"}),
        json!({"Name": "Alan K", "phone": "123"}),
        json!({"Name": "Alan Krauss", "phone": "123", "email": "k@gmail.com"}),
        json!({"Name": "AK", "email": "k@gmail.com"}),
    ]
}

/// Build a record tagged with `id`, keeping only the identifiers given
pub fn tagged(id: usize, phone: Option<&str>, email: Option<&str>) -> Value {
    let mut record = json!({ "id": id });
    if let Some(phone) = phone {
        record["phone"] = json!(phone);
    }
    if let Some(email) = email {
        record["email"] = json!(email);
    }
    record
}
