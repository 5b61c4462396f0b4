use serde::{Deserialize, Serialize};

/// 單一館藏複本（每個 item 一筆）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: String,
    pub source: String,
    pub availability: bool,
    pub status: String,
    pub location: String,
    pub reserve: String,
    pub callnumber: String,
    pub duedate: Option<String>,
    #[serde(rename = "returnDate")]
    pub return_date: bool,
    pub number: u32,
    pub barcode: String,
    pub item_id: String,
}

/// Credentials handed back by a successful login and passed to every patron call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronCredentials {
    pub cat_username: String,
    pub cat_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub firstname: String,
    pub lastname: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Amounts are in minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    pub amount: i64,
    pub balance: i64,
    pub checkout: Option<String>,
    pub fine: String,
}

/// Shared shape of holds, storage retrieval requests and ILL requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatronRequest {
    pub create: Option<String>,
    pub expire: Option<String>,
    pub id: String,
    pub in_transit: bool,
    pub item_id: String,
    pub location: String,
    pub processed: bool,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Hold,
    Move,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Hold => "HOLD",
            RequestType::Move => "MOVE",
        }
    }
}
