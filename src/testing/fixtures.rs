//! Pre-built export datasets.

use crate::record::Record;
use serde::Serialize;

/// A customer row as a store query would hand it to an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleCustomer {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "First name")]
    pub first_name: String,
    #[serde(rename = "Last name")]
    pub last_name: String,
}

/// An order row with non-text fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOrder {
    pub id: u64,
    pub email: String,
    pub total: f64,
    pub paid: bool,
    pub note: Option<String>,
}

/// Three customers.
#[must_use]
pub fn sample_customers() -> Vec<SampleCustomer> {
    vec![
        SampleCustomer {
            email: "hello@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        },
        SampleCustomer {
            email: "bob@example.com".to_string(),
            first_name: "Bob".to_string(),
            last_name: "O\"Neil".to_string(),
        },
        SampleCustomer {
            email: "carol@example.com".to_string(),
            first_name: "Carol".to_string(),
            last_name: "Smith; Jr.".to_string(),
        },
    ]
}

/// [`sample_customers`] as records, with a null entry after the first one.
#[must_use]
pub fn sample_customer_records() -> Vec<Option<Record>> {
    let mut out: Vec<Option<Record>> = sample_customers()
        .into_iter()
        .map(|c| {
            Some(
                Record::new()
                    .with("Email", c.email)
                    .with("First name", c.first_name)
                    .with("Last name", c.last_name),
            )
        })
        .collect();
    out.insert(1, None);
    out
}

/// Two orders, one without a note.
#[must_use]
pub fn sample_orders() -> Vec<SampleOrder> {
    vec![
        SampleOrder {
            id: 1001,
            email: "hello@example.com".to_string(),
            total: 49.5,
            paid: true,
            note: Some("gift wrap".to_string()),
        },
        SampleOrder {
            id: 1002,
            email: "bob@example.com".to_string(),
            total: 12.0,
            paid: false,
            note: None,
        },
    ]
}
