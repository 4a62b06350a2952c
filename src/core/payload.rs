use crate::core::normalizer::{normalize, present};
use crate::domain::model::{
    AddressPayload, BusinessContact, BusinessPayload, CustomData, CustomerPayload, Row,
};
use crate::utils::error::{ImportError, Result};

pub mod columns {
    pub const CUSTOMER_EMAIL: &str = "customer_email";
    pub const CUSTOMER_FULL_NAME: &str = "customer_full_name";
    pub const CUSTOMER_EXTERNAL_ID: &str = "customer_external_id";
    pub const ADDRESS_COUNTRY_CODE: &str = "address_country_code";
    pub const ADDRESS_STREET_LINE1: &str = "address_street_line1";
    pub const ADDRESS_STREET_LINE2: &str = "address_street_line2";
    pub const ADDRESS_CITY: &str = "address_city";
    pub const ADDRESS_REGION: &str = "address_region";
    pub const ADDRESS_POSTAL_CODE: &str = "address_postal_code";
    pub const ADDRESS_EXTERNAL_ID: &str = "address_external_id";
    pub const BUSINESS_NAME: &str = "business_name";
    pub const BUSINESS_COMPANY_NUMBER: &str = "business_company_number";
    pub const BUSINESS_TAX_IDENTIFIER: &str = "business_tax_identifier";
    pub const BUSINESS_EXTERNAL_ID: &str = "business_external_id";

    pub const ALL: [&str; 14] = [
        CUSTOMER_EMAIL,
        CUSTOMER_FULL_NAME,
        CUSTOMER_EXTERNAL_ID,
        ADDRESS_COUNTRY_CODE,
        ADDRESS_STREET_LINE1,
        ADDRESS_STREET_LINE2,
        ADDRESS_CITY,
        ADDRESS_REGION,
        ADDRESS_POSTAL_CODE,
        ADDRESS_EXTERNAL_ID,
        BUSINESS_NAME,
        BUSINESS_COMPANY_NUMBER,
        BUSINESS_TAX_IDENTIFIER,
        BUSINESS_EXTERNAL_ID,
    ];
}

use columns::*;

pub const DEFAULT_LOCALE: &str = "en";

/// Normalized value of a column the row must carry (it may still be empty).
pub fn required(row: &Row, column: &str) -> Result<Option<String>> {
    if !row.has_column(column) {
        return Err(ImportError::MissingColumn {
            column: column.to_string(),
        });
    }
    Ok(normalize(row.get(column)))
}

pub fn optional(row: &Row, column: &str) -> Option<String> {
    present(normalize(row.get(column)))
}

fn custom_data(row: &Row, column: &str) -> Option<CustomData> {
    optional(row, column).map(|external_id| CustomData { external_id })
}

pub fn customer_payload(row: &Row) -> Result<CustomerPayload> {
    Ok(CustomerPayload {
        email: required(row, CUSTOMER_EMAIL)?,
        name: required(row, CUSTOMER_FULL_NAME)?,
        custom_data: custom_data(row, CUSTOMER_EXTERNAL_ID),
        locale: DEFAULT_LOCALE.to_string(),
    })
}

/// `None` unless the row carries a country code.
pub fn address_payload(row: &Row, customer: &CustomerPayload) -> Option<AddressPayload> {
    let country_code = optional(row, ADDRESS_COUNTRY_CODE)?;

    Some(AddressPayload {
        country_code,
        first_line: optional(row, ADDRESS_STREET_LINE1),
        second_line: optional(row, ADDRESS_STREET_LINE2),
        city: optional(row, ADDRESS_CITY),
        region: optional(row, ADDRESS_REGION),
        postal_code: optional(row, ADDRESS_POSTAL_CODE),
        description: customer
            .email
            .as_ref()
            .map(|email| format!("Address for {}", email)),
        custom_data: custom_data(row, ADDRESS_EXTERNAL_ID),
    })
}

/// `None` unless the row carries a business name. The customer becomes the
/// business contact.
pub fn business_payload(row: &Row, customer: &CustomerPayload) -> Option<BusinessPayload> {
    let name = optional(row, BUSINESS_NAME)?;

    Some(BusinessPayload {
        name,
        company_number: optional(row, BUSINESS_COMPANY_NUMBER),
        tax_identifier: optional(row, BUSINESS_TAX_IDENTIFIER),
        custom_data: custom_data(row, BUSINESS_EXTERNAL_ID),
        contacts: Some(vec![BusinessContact {
            name: customer.name.clone(),
            email: customer.email.clone(),
        }]),
    })
}

const TEMPLATE_EXAMPLE: [&str; 14] = [
    "john@example.com",
    "John Doe",
    "CUST001",
    "US",
    "123 Main St",
    "Apt 4B",
    "New York",
    "NY",
    "10001",
    "ADDR001",
    "Acme Corp",
    "123456789",
    "GB123456789",
    "BIZ001",
];

/// Header plus one example row, for users preparing an import file.
pub fn csv_template() -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns::ALL)?;
    writer.write_record(TEMPLATE_EXAMPLE)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::ValidationError {
        message: format!("template is not UTF-8: {}", e),
    })
}
