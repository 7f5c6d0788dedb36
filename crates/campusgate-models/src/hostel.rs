//! Hostel assignment, hostel metadata, fee ledger and complaints.

use campusgate_core::serde::deserialize_optional_string_or_number;
use campusgate_store::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Rendered for hostel-view fields with no value in either source.
pub const MISSING: &str = "-";

/// Stored `HostelAssigned` document. Empty strings read as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HostelAssignment {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(
        rename = "HostelID",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub hostel_id: Option<String>,
    #[serde(
        rename = "RoomNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub room_no: Option<String>,
    #[serde(
        rename = "Floor",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub floor: Option<String>,
    #[serde(
        rename = "RoomType",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub room_type: Option<String>,
    #[serde(
        rename = "CheckInDate",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_in_date: Option<String>,
    #[serde(
        rename = "StudentPhoneNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub student_phone_no: Option<String>,
}

/// Stored `Hostel` metadata document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Hostel {
    #[serde(rename = "HostelID")]
    pub hostel_id: String,
    #[serde(
        rename = "HostelName",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub hostel_name: Option<String>,
    #[serde(
        rename = "MonthlyFee",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub monthly_fee: Option<String>,
    #[serde(
        rename = "WardenName",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub warden_name: Option<String>,
    #[serde(
        rename = "WardenPhone",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub warden_phone: Option<String>,
    #[serde(
        rename = "Floor",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub floor: Option<String>,
    #[serde(
        rename = "RoomType",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub room_type: Option<String>,
    #[serde(
        rename = "Capacity",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub capacity: Option<String>,
}

/// Merged assignment + hostel view. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct HostelView {
    pub hostel_name: String,
    pub room_number: String,
    pub monthly_fee: String,
    pub check_in_date: String,
    pub warden_name: String,
    pub warden_phone: String,
    pub floor: String,
    pub room_type: String,
}

impl HostelView {
    /// Joins an assignment with its hostel's metadata.
    ///
    /// Floor and room type on the assignment override the hostel defaults.
    /// A missing hostel behaves like one with no fields set.
    pub fn merge(assignment: &HostelAssignment, hostel: Option<&Hostel>) -> Self {
        let meta = |f: fn(&Hostel) -> &Option<String>| hostel.and_then(|h| f(h).clone());
        let or = |value: Option<String>, fallback: &str| value.unwrap_or_else(|| fallback.to_string());

        Self {
            hostel_name: or(
                meta(|h| &h.hostel_name).or_else(|| assignment.hostel_id.clone()),
                MISSING,
            ),
            room_number: or(assignment.room_no.clone(), MISSING),
            monthly_fee: or(meta(|h| &h.monthly_fee), MISSING),
            check_in_date: or(assignment.check_in_date.clone(), MISSING),
            warden_name: or(meta(|h| &h.warden_name), ""),
            warden_phone: or(meta(|h| &h.warden_phone), ""),
            floor: or(assignment.floor.clone().or_else(|| meta(|h| &h.floor)), ""),
            room_type: or(
                assignment.room_type.clone().or_else(|| meta(|h| &h.room_type)),
                "",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FeeStatus {
    Unpaid,
    Paid,
}

/// One line of a student's hostel fee ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Status")]
    pub status: FeeStatus,
    #[serde(flatten)]
    pub extra: Document,
}

/// Stored `HostelFee` document: one per student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostelFee {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "Fees", default)]
    pub fees: Vec<FeeLine>,
    /// Optimistic-concurrency counter; absent on documents never written
    /// through the payment path.
    #[serde(rename = "Version", default)]
    pub version: u64,
    #[serde(flatten)]
    pub extra: Document,
}

/// Outcome of marking a fee line paid in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum FeeMark {
    /// The line moved from Unpaid to Paid; carries the new ledger.
    Marked(Vec<FeeLine>),
    /// The line was already Paid.
    AlreadyPaid,
    /// No line has that item name.
    UnknownItem,
}

impl HostelFee {
    /// Returns the ledger with the named line set to Paid, leaving every
    /// other line untouched. Status never moves back to Unpaid.
    pub fn mark_paid(&self, item: &str) -> FeeMark {
        match self.fees.iter().find(|line| line.item == item) {
            None => FeeMark::UnknownItem,
            Some(line) if line.status == FeeStatus::Paid => FeeMark::AlreadyPaid,
            Some(_) => FeeMark::Marked(
                self.fees
                    .iter()
                    .cloned()
                    .map(|mut line| {
                        if line.item == item {
                            line.status = FeeStatus::Paid;
                        }
                        line
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PayFeeRequest {
    #[serde(rename = "studentId")]
    #[validate(length(min = 1, message = "studentId is required"))]
    pub student_id: String,
    #[validate(length(min = 1, message = "item is required"))]
    pub item: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateHostelComplaintDto {
    #[serde(rename = "StudentID")]
    #[validate(length(min = 1, message = "StudentID is required"))]
    pub student_id: String,
    /// Generated as `C<millis>` when omitted.
    #[serde(rename = "ComplaintID", default)]
    pub complaint_id: Option<String>,
    #[serde(rename = "Category", default)]
    pub category: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(rename = "RoomNo", default)]
    pub room_no: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HostelComplaint {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "ComplaintID")]
    pub complaint_id: String,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "RoomNo", skip_serializing_if = "Option::is_none")]
    pub room_no: Option<String>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "RaisedOn")]
    pub raised_on: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HostelComplaintCreated {
    pub success: bool,
    pub complaint: HostelComplaint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assignment(value: serde_json::Value) -> HostelAssignment {
        serde_json::from_value(value).unwrap()
    }

    fn hostel(value: serde_json::Value) -> Hostel {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_assignment_floor_overrides_hostel() {
        let a = assignment(json!({"StudentID": "S1", "HostelID": "H1", "RoomNo": 4, "Floor": "2"}));
        let h = hostel(json!({"HostelID": "H1", "HostelName": "Ganga", "Floor": "1"}));
        let view = HostelView::merge(&a, Some(&h));
        assert_eq!(view.floor, "2");
        assert_eq!(view.hostel_name, "Ganga");
        assert_eq!(view.room_number, "4");
    }

    #[test]
    fn test_hostel_floor_used_when_assignment_has_none() {
        let a = assignment(json!({"StudentID": "S1", "HostelID": "H1", "Floor": ""}));
        let h = hostel(json!({"HostelID": "H1", "Floor": "1", "RoomType": "Double"}));
        let view = HostelView::merge(&a, Some(&h));
        assert_eq!(view.floor, "1");
        assert_eq!(view.room_type, "Double");
    }

    #[test]
    fn test_missing_hostel_renders_placeholders() {
        let a = assignment(json!({"StudentID": "S1", "HostelID": "H9"}));
        let view = HostelView::merge(&a, None);
        assert_eq!(
            view,
            HostelView {
                hostel_name: "H9".into(),
                room_number: "-".into(),
                monthly_fee: "-".into(),
                check_in_date: "-".into(),
                warden_name: "".into(),
                warden_phone: "".into(),
                floor: "".into(),
                room_type: "".into(),
            }
        );
    }

    #[test]
    fn test_view_serializes_pascal_case() {
        let view = HostelView::merge(&assignment(json!({"StudentID": "S1"})), None);
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["HostelName"], "-");
        assert_eq!(value["RoomNumber"], "-");
        assert_eq!(value["WardenPhone"], "");
    }

    fn ledger() -> HostelFee {
        serde_json::from_value(json!({
            "StudentID": "S1",
            "Fees": [
                {"Item": "Mess", "Status": "Unpaid", "Amount": 1200},
                {"Item": "Room", "Status": "Unpaid", "Amount": 3000},
                {"Item": "Laundry", "Status": "Paid", "Amount": 200}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_mark_paid_changes_only_named_line() {
        let fee = ledger();
        assert_eq!(fee.version, 0);
        let FeeMark::Marked(lines) = fee.mark_paid("Mess") else {
            panic!("expected Marked");
        };
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].status, FeeStatus::Paid);
        assert_eq!(lines[0].extra["Amount"], json!(1200));
        assert_eq!(lines[1], fee.fees[1]);
        assert_eq!(lines[2], fee.fees[2]);
    }

    #[test]
    fn test_mark_paid_already_paid_and_unknown() {
        let fee = ledger();
        assert_eq!(fee.mark_paid("Laundry"), FeeMark::AlreadyPaid);
        assert_eq!(fee.mark_paid("Gym"), FeeMark::UnknownItem);
    }

    #[test]
    fn test_pay_request_rejects_unknown_fields() {
        let result = serde_json::from_value::<PayFeeRequest>(
            json!({"studentId": "S1", "item": "Mess", "amount": 5}),
        );
        assert!(result.is_err());
    }
}
