//! Zoho Books contact payload.
//!
//! See https://www.zoho.com/books/api/v3/contacts/#create-a-contact

use serde::Serialize;

use crate::config::SignupSettings;
use crate::model::EnrichedContact;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPayload {
    pub contact_name: String,
    pub company_name: String,
    pub payment_terms: u32,
    pub billing_address: BillingAddress,
    pub contact_persons: Vec<ContactPerson>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingAddress {
    pub address: String,
}

/// A person on the contact. The primary person carries the e-mail; the
/// emergency contact only a name, phone and relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPerson {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary_contact: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

impl ContactPayload {
    pub fn from_contact(contact: &EnrichedContact, settings: &SignupSettings) -> Self {
        let c = &contact.contact;
        Self {
            contact_name: c.full_name(),
            company_name: settings.company_name.clone(),
            payment_terms: settings.payment_terms,
            billing_address: BillingAddress {
                address: c.address.clone(),
            },
            contact_persons: vec![
                ContactPerson {
                    first_name: c.first_name.clone(),
                    last_name: Some(c.last_name.clone()),
                    email: Some(c.email.clone()),
                    phone: c.phone.clone(),
                    is_primary_contact: Some(true),
                    designation: None,
                },
                ContactPerson {
                    first_name: c.emergency_name.clone(),
                    last_name: None,
                    email: None,
                    phone: c.emergency_phone.clone(),
                    is_primary_contact: None,
                    designation: Some(c.designation.clone()),
                },
            ],
            notes: contact.notes.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
