//! Job data model — the root record a quote is computed over.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Vehicle;

/// Customer category for a job. Selects the pricing formula branch.
///
/// Serialized as a snake_case string (e.g. `"retail"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Walk-in / insurance customer. The default for new jobs.
    #[default]
    Retail,
    /// Car dealership account; flat labor, no processing surcharge.
    Dealer,
    /// Fleet account; priced like retail.
    Fleet,
    /// Another glass shop subcontracting the install; labor and fees only.
    Subcontractor,
}

/// A glass job: one customer, one or more vehicles, aggregated money totals.
///
/// `subtotal`, `total_due`, and `balance_due` are aggregator outputs and are
/// recomputed after every edit; `amount_paid`, `deductible`, and `rebate`
/// are operator inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique identifier for this job.
    pub id: Uuid,
    /// Shop-assigned job number; free text, no pricing role.
    pub job_number: String,
    /// Customer category the whole job is priced under.
    pub customer_type: CustomerType,
    /// Vehicles on the job, in display order.
    pub vehicles: Vec<Vehicle>,
    /// Sum of parts subtotals across all vehicles (derived).
    pub subtotal: f64,
    /// Sum of part totals across all vehicles (derived).
    pub total_due: f64,
    /// Insurance deductible recorded for the job (operator input).
    pub deductible: f64,
    /// Rebate recorded for the job (operator input).
    pub rebate: f64,
    /// Amount the customer has paid so far (operator input).
    pub amount_paid: f64,
    /// `max(0, total_due - amount_paid)` (derived).
    pub balance_due: f64,
    /// ISO-8601 creation timestamp (UTC).
    pub created_at: String,
    /// ISO-8601 last-modified timestamp (UTC).
    pub modified_at: String,
}

impl Job {
    /// Create an empty retail job with a fresh id and creation timestamp.
    pub fn new() -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4(),
            job_number: String::new(),
            customer_type: CustomerType::default(),
            vehicles: Vec::new(),
            subtotal: 0.0,
            total_due: 0.0,
            deductible: 0.0,
            rebate: 0.0,
            amount_paid: 0.0,
            balance_due: 0.0,
            created_at: now.clone(),
            modified_at: now,
        }
    }

    /// Refresh `modified_at` to the current UTC time.
    pub fn touch(&mut self) {
        self.modified_at = now_rfc3339();
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

/// Current UTC time as an RFC 3339 string with seconds precision.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_is_empty_retail() {
        let job = Job::new();
        assert_eq!(job.customer_type, CustomerType::Retail);
        assert!(job.vehicles.is_empty());
        assert!(job.job_number.is_empty());
        assert_eq!(job.subtotal, 0.0);
        assert_eq!(job.total_due, 0.0);
        assert_eq!(job.balance_due, 0.0);
        assert_eq!(job.created_at, job.modified_at);
        assert!(!job.created_at.is_empty());
    }

    #[test]
    fn touch_updates_modified_at_format() {
        let mut job = Job::new();
        job.touch();
        // RFC 3339 with seconds precision, UTC: 2025-03-14T09:26:53Z
        assert!(job.modified_at.ends_with('Z'));
        assert_eq!(job.modified_at.len(), 20);
        assert!(chrono::DateTime::parse_from_rfc3339(&job.modified_at).is_ok());
    }

    #[test]
    fn customer_type_serializes_as_snake_case() {
        let value = serde_json::to_value(CustomerType::Subcontractor).expect("to_value");
        assert_eq!(value, "subcontractor");
        let recovered: CustomerType =
            serde_json::from_str("\"dealer\"").expect("deserialize CustomerType");
        assert_eq!(recovered, CustomerType::Dealer);
    }

    #[test]
    fn job_serde_round_trip() {
        let mut job = Job::new();
        job.job_number = "25-0147".to_string();
        job.customer_type = CustomerType::Fleet;
        job.vehicles.push(Vehicle::new());
        job.amount_paid = 100.0;

        let json = serde_json::to_string(&job).expect("serialize Job");
        let recovered: Job = serde_json::from_str(&json).expect("deserialize Job");
        assert_eq!(job, recovered);
    }

    #[test]
    fn job_fields_are_camel_case() {
        let job = Job::new();
        let value = serde_json::to_value(&job).expect("to_value");
        assert!(value.get("jobNumber").is_some());
        assert!(value.get("customerType").is_some());
        assert!(value.get("totalDue").is_some());
        assert!(value.get("balanceDue").is_some());
        assert!(value.get("amountPaid").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("modifiedAt").is_some());
        assert!(value.get("total_due").is_none());
    }
}
