use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized {what} token `{token}`")]
pub struct UnknownToken {
    pub what: &'static str,
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestKind {
    Material,
    Service,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = UnknownToken;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "material" => Ok(Self::Material),
            "service" => Ok(Self::Service),
            other => Err(UnknownToken { what: "request kind", token: other.to_string() }),
        }
    }
}

/// Procurement workflow status. ManagerApproval and DirectorApproval are the
/// two internal approval routes; only they carry a purchase-order number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    Pending,
    InQuotation,
    ManagerApproval,
    DirectorApproval,
    InProgress,
    AwaitingSupplier,
    Delayed,
    Cancelled,
    Completed,
}

impl RequestStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn is_approval(self) -> bool {
        matches!(self, Self::ManagerApproval | Self::DirectorApproval)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InQuotation => "in-quotation",
            Self::ManagerApproval => "manager-approval",
            Self::DirectorApproval => "director-approval",
            Self::InProgress => "in-progress",
            Self::AwaitingSupplier => "awaiting-supplier",
            Self::Delayed => "delayed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownToken;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in-quotation" => Ok(Self::InQuotation),
            "manager-approval" => Ok(Self::ManagerApproval),
            "director-approval" => Ok(Self::DirectorApproval),
            "in-progress" => Ok(Self::InProgress),
            "awaiting-supplier" => Ok(Self::AwaitingSupplier),
            "delayed" => Ok(Self::Delayed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownToken { what: "request status", token: other.to_string() }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownToken;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(UnknownToken { what: "priority", token: other.to_string() }),
        }
    }
}

/// One emergency purchase/service ticket.
///
/// `requested_at` is stamped at creation and never rewritten afterwards. It is
/// optional only because rows imported from older files may carry an
/// unparseable date, which the store decodes as absent rather than failing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub requester_name: String,
    pub registration_number: String,
    pub work_order_number: String,
    pub request_code: String,
    pub equipment_tag: String,
    pub description: String,
    pub kind: RequestKind,
    pub requested_at: Option<NaiveDate>,
    pub status: RequestStatus,
    pub expected_delivery: Option<NaiveDate>,
    pub delay_reason: String,
    pub purchase_order_number: Option<String>,
    pub priority: Priority,
    pub notes: String,
    pub lead_time_days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::{Priority, RequestKind, RequestStatus};

    #[test]
    fn status_tokens_round_trip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::InQuotation,
            RequestStatus::ManagerApproval,
            RequestStatus::DirectorApproval,
            RequestStatus::InProgress,
            RequestStatus::AwaitingSupplier,
            RequestStatus::Delayed,
            RequestStatus::Cancelled,
            RequestStatus::Completed,
        ] {
            let parsed: RequestStatus = status.as_str().parse().expect("token parses back");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn parsing_ignores_case_and_surrounding_whitespace() {
        assert_eq!("  Awaiting-Supplier ".parse::<RequestStatus>(), Ok(RequestStatus::AwaitingSupplier));
        assert_eq!("SERVICE".parse::<RequestKind>(), Ok(RequestKind::Service));
        assert_eq!("Critical".parse::<Priority>(), Ok(Priority::Critical));
    }

    #[test]
    fn unknown_status_token_is_rejected() {
        let error = "archived".parse::<RequestStatus>().expect_err("should not parse");
        assert!(error.to_string().contains("archived"));
    }

    #[test]
    fn only_the_two_approval_routes_carry_purchase_orders() {
        assert!(RequestStatus::ManagerApproval.is_approval());
        assert!(RequestStatus::DirectorApproval.is_approval());
        assert!(!RequestStatus::InProgress.is_approval());
        assert!(!RequestStatus::Delayed.is_approval());
    }

    #[test]
    fn completed_and_cancelled_are_terminal() {
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }
}
