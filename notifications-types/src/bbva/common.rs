//! Payload shapes shared by consumer and business notifications.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaContact {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "phone_number")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaAddress {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "postal_code")]
    pub zip_code: Option<String>,
    #[serde(default, alias = "country")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaDocument {
    #[serde(default, rename = "type")]
    pub document_type: String,
    #[serde(default, alias = "id_number")]
    pub number: String,
    #[serde(default)]
    pub issuing_country: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaLegalDocument {
    #[serde(default, rename = "type")]
    pub document_type: String,
    #[serde(default, alias = "id")]
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BbvaKyc {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "identity_documents")]
    pub documents: Vec<BbvaDocument>,
    #[serde(default)]
    pub legal_documents: Vec<BbvaLegalDocument>,
}
