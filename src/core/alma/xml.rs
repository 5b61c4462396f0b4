//! serde models of the Alma XML documents the driver reads.
//!
//! Only the elements the driver maps are declared; everything else in the
//! payload is ignored. Missing elements fall back to empty values.

use serde::Deserialize;

/// An element carrying a code as text and a human readable `desc` attribute,
/// e.g. `<base_status desc="Item in place">1</base_status>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Described {
    #[serde(rename = "@desc", default)]
    pub desc: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Holdings {
    #[serde(rename = "holding", default)]
    pub holdings: Vec<HoldingRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HoldingRecord {
    #[serde(default)]
    pub holding_id: String,
    #[serde(default)]
    pub library: Described,
}

#[derive(Debug, Default, Deserialize)]
pub struct Items {
    #[serde(rename = "item", default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub holding_data: HoldingData,
    #[serde(default)]
    pub item_data: ItemData,
}

#[derive(Debug, Default, Deserialize)]
pub struct HoldingData {
    #[serde(default)]
    pub call_number: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemData {
    #[serde(default)]
    pub pid: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub base_status: Described,
}

#[derive(Debug, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_group: Described,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub addresses: Option<Addresses>,
    #[serde(default)]
    pub phones: Option<Phones>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Addresses {
    #[serde(rename = "address", default)]
    pub addresses: Vec<Address>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub line3: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: Described,
}

#[derive(Debug, Default, Deserialize)]
pub struct Phones {
    #[serde(rename = "phone", default)]
    pub phones: Vec<Phone>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Phone {
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Fees {
    #[serde(rename = "fee", default)]
    pub fees: Vec<Fee>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Fee {
    #[serde(rename = "type", default)]
    pub fee_type: Described,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub original_amount: String,
    #[serde(default)]
    pub creation_time: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserRequests {
    #[serde(rename = "user_request", default)]
    pub requests: Vec<UserRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub mms_id: String,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub request_status: String,
    #[serde(default)]
    pub request_date: String,
    #[serde(default)]
    pub last_interest_date: String,
    #[serde(default)]
    pub item_policy: Option<Described>,
}

impl UserRequest {
    pub fn item_policy(&self) -> Option<&str> {
        self.item_policy.as_ref().map(|p| p.value.trim())
    }
}

pub fn parse<T: serde::de::DeserializeOwned>(body: &str) -> crate::utils::error::Result<T> {
    Ok(quick_xml::de::from_str(body)?)
}
