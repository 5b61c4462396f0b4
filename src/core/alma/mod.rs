pub mod xml;

use crate::config::{AppConfig, CatalogConfig};
use crate::domain::model::{
    Fine, Holding, PatronCredentials, PatronRequest, Profile, RequestType,
};
use crate::domain::ports::IlsDriver;
use crate::utils::dates::convert_to_display_date;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use self::xml::{Fees, Holdings, Item, Items, User, UserRequest, UserRequests};

const ITEM_POLICY_ARCHIVE: &str = "Archive";
const ITEM_POLICY_ILL: &str = "InterlibraryLoan";

/// ILS driver backed by the Alma REST API.
pub struct AlmaDriver {
    client: Client,
    base_url: String,
    api_key: String,
    display_date_format: String,
}

impl AlmaDriver {
    pub fn new(config: &CatalogConfig, client: Client) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            display_date_format: config.display_date_format().to_string(),
        })
    }

    /// 驗證配置並建立 driver
    pub fn init(config: &AppConfig, client: Client) -> Result<Self> {
        let catalog = config.catalog()?;
        let driver = Self::new(catalog, client)?;
        tracing::debug!("Alma driver initialized for {}", driver.base_url);
        Ok(driver)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` against Alma and decode the XML body.
    ///
    /// The API key is sent as the `apiKey` query parameter unless `params`
    /// already carries one.
    pub async fn make_request<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        if !params.iter().any(|(key, _)| *key == "apiKey") {
            query.push(("apiKey", self.api_key.as_str()));
        }
        query.extend_from_slice(params);

        tracing::debug!("📡 GET {} ({} extra params)", url, params.len());
        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("❌ Alma request failed: {} -> HTTP {}", url, status.as_u16());
            tracing::error!("{}", body);
            return Err(CatalogError::ApiStatusError {
                status: status.as_u16(),
                url,
                body,
            });
        }

        xml::parse(&body)
    }

    pub fn get_availability_from_item(item: &Item) -> bool {
        item.item_data.base_status.value.trim() == "1"
    }

    fn display_date(&self, raw: &str) -> Option<String> {
        convert_to_display_date(raw, &self.display_date_format)
    }

    async fn fetch_requests(
        &self,
        patron: &PatronCredentials,
        request_type: RequestType,
    ) -> Result<Vec<UserRequest>> {
        let path = format!("/users/{}/requests", encode_segment(&patron.cat_username));
        let requests: UserRequests = self
            .make_request(&path, &[("request_type", request_type.as_str())])
            .await?;
        tracing::debug!(
            "Fetched {} {} requests for {}",
            requests.requests.len(),
            request_type.as_str(),
            patron.cat_username
        );
        Ok(requests.requests)
    }

    fn to_patron_request(&self, request: &UserRequest) -> PatronRequest {
        let item_policy = request.item_policy();
        let status = request.request_status.trim();

        PatronRequest {
            create: self.display_date(&request.request_date),
            expire: self.display_date(&request.last_interest_date),
            id: request.request_id.clone(),
            in_transit: status != "IN_PROCESS",
            item_id: request.mms_id.clone(),
            location: request.pickup_location.clone(),
            processed: item_policy == Some(ITEM_POLICY_ILL) && status != "NOT_STARTED",
            title: request.title.clone(),
        }
    }

    async fn move_requests_with_policy(
        &self,
        patron: &PatronCredentials,
        policy: &str,
    ) -> Result<Vec<PatronRequest>> {
        let requests = self.fetch_requests(patron, RequestType::Move).await?;
        Ok(requests
            .iter()
            .filter(|request| request.item_policy() == Some(policy))
            .map(|request| self.to_patron_request(request))
            .collect())
    }
}

#[async_trait]
impl IlsDriver for AlmaDriver {
    async fn get_holding(
        &self,
        id: &str,
        _patron: Option<&PatronCredentials>,
    ) -> Result<Vec<Holding>> {
        let mut results = Vec::new();
        let mut copy_count = 0u32;
        let bib_path = format!("/bibs/{}/holdings", encode_segment(id));

        let holdings: Holdings = self.make_request(&bib_path, &[]).await?;
        for holding in &holdings.holdings {
            let item_path = format!("{}/{}/items", bib_path, encode_segment(&holding.holding_id));
            let items: Items = self.make_request(&item_path, &[]).await?;

            for item in &items.items {
                copy_count += 1;
                let barcode = item.item_data.barcode.trim();
                results.push(Holding {
                    id: id.to_string(),
                    source: "Solr".to_string(),
                    availability: Self::get_availability_from_item(item),
                    status: item.item_data.base_status.desc.clone(),
                    location: holding.library.desc.clone(),
                    reserve: "N".to_string(),
                    callnumber: item.holding_data.call_number.clone(),
                    duedate: None,
                    return_date: false,
                    number: copy_count,
                    barcode: if barcode.is_empty() {
                        "n/a".to_string()
                    } else {
                        barcode.to_string()
                    },
                    item_id: item.item_data.pid.clone(),
                });
            }
        }

        tracing::info!(
            "📚 Bib {}: {} holdings, {} items",
            id,
            holdings.holdings.len(),
            results.len()
        );
        Ok(results)
    }

    async fn patron_login(
        &self,
        barcode: &str,
        password: &str,
    ) -> Result<Option<PatronCredentials>> {
        let barcode = barcode.trim();
        let password = password.trim();
        let url = format!("{}/users/{}", self.base_url, encode_segment(barcode));

        let response = self
            .client
            .post(&url)
            .query(&[("apiKey", self.api_key.as_str())])
            .form(&[("op", "auth"), ("password", password)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("✅ Patron {} authenticated", barcode);
            return Ok(Some(PatronCredentials {
                cat_username: barcode.to_string(),
                cat_password: password.to_string(),
            }));
        }

        match status {
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND => {
                tracing::warn!("Login rejected for patron {} (HTTP {})", barcode, status.as_u16());
                Ok(None)
            }
            _ => {
                let body = match response.text().await {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!("Could not read login error body from {}: {}", url, e);
                        String::new()
                    }
                };
                tracing::error!("❌ Alma login failed: {} -> HTTP {}", url, status.as_u16());
                Err(CatalogError::ApiStatusError {
                    status: status.as_u16(),
                    url,
                    body,
                })
            }
        }
    }

    async fn get_my_profile(&self, patron: &PatronCredentials) -> Result<Profile> {
        let path = format!("/users/{}", encode_segment(&patron.cat_username));
        let user: User = self.make_request(&path, &[]).await?;

        let mut profile = Profile {
            firstname: user.first_name,
            lastname: user.last_name,
            group: user.user_group.desc,
            ..Profile::default()
        };

        if let Some(contact) = user.contact_info {
            if let Some(address) = contact.addresses.and_then(|a| a.addresses.into_iter().next()) {
                profile.address1 = Some(address.line1);
                profile.address2 = Some(address.line2);
                profile.address3 = Some(address.line3);
                profile.zip = Some(address.postal_code);
                profile.city = Some(address.city);
                profile.country = Some(address.country.value);
            }
            if let Some(phone) = contact.phones.and_then(|p| p.phones.into_iter().next()) {
                profile.phone = Some(phone.phone_number);
            }
        }

        Ok(profile)
    }

    async fn get_my_fines(&self, patron: &PatronCredentials) -> Result<Vec<Fine>> {
        let path = format!("/users/{}/fees", encode_segment(&patron.cat_username));
        let fees: Fees = self.make_request(&path, &[]).await?;

        Ok(fees
            .fees
            .iter()
            .map(|fee| Fine {
                amount: to_cents(&fee.original_amount),
                balance: to_cents(&fee.balance),
                checkout: self.display_date(&fee.creation_time),
                fine: fee.fee_type.desc.clone(),
            })
            .collect())
    }

    async fn get_my_holds(&self, patron: &PatronCredentials) -> Result<Vec<PatronRequest>> {
        let requests = self.fetch_requests(patron, RequestType::Hold).await?;
        Ok(requests
            .iter()
            .map(|request| self.to_patron_request(request))
            .collect())
    }

    async fn get_my_storage_retrieval_requests(
        &self,
        patron: &PatronCredentials,
    ) -> Result<Vec<PatronRequest>> {
        self.move_requests_with_policy(patron, ITEM_POLICY_ARCHIVE).await
    }

    async fn get_my_ill_requests(
        &self,
        patron: &PatronCredentials,
    ) -> Result<Vec<PatronRequest>> {
        self.move_requests_with_policy(patron, ITEM_POLICY_ILL).await
    }
}

fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

fn to_cents(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<f64>() {
        Ok(value) => (value * 100.0).round() as i64,
        Err(_) => {
            tracing::warn!("Unparseable fee amount '{}'", raw);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alma::xml::{Described, ItemData};

    fn catalog_config(base_url: &str) -> CatalogConfig {
        CatalogConfig {
            driver: None,
            api_base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            display_date_format: None,
            timeout_seconds: None,
        }
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let driver =
            AlmaDriver::new(&catalog_config("https://alma.example.org/almaws/v1/"), Client::new())
                .unwrap();
        assert_eq!(driver.base_url(), "https://alma.example.org/almaws/v1");
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let mut config = catalog_config("https://alma.example.org/almaws/v1");
        config.api_key = String::new();
        assert!(AlmaDriver::new(&config, Client::new()).is_err());
    }

    #[test]
    fn test_new_rejects_invalid_date_format() {
        let mut config = catalog_config("https://alma.example.org/almaws/v1");
        config.display_date_format = Some("%m-%d-%".to_string());
        assert!(matches!(
            AlmaDriver::new(&config, Client::new()),
            Err(CatalogError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_init_requires_catalog_section() {
        let result = AlmaDriver::init(&AppConfig::default(), Client::new());
        assert!(matches!(result, Err(CatalogError::MissingConfigError { .. })));
    }

    #[test]
    fn test_availability_from_item() {
        let mut item = Item {
            item_data: ItemData {
                base_status: Described {
                    desc: "Item in place".to_string(),
                    value: "1".to_string(),
                },
                ..ItemData::default()
            },
            ..Item::default()
        };
        assert!(AlmaDriver::get_availability_from_item(&item));

        item.item_data.base_status.value = "0".to_string();
        assert!(!AlmaDriver::get_availability_from_item(&item));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("991234"), "991234");
        assert_eq!(encode_segment("a b/c"), "a+b%2Fc");
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents("25.0"), 2500);
        assert_eq!(to_cents("0.1"), 10);
        assert_eq!(to_cents(""), 0);
        assert_eq!(to_cents("n/a"), 0);
    }
}
