pub use campusgate_models::hostel::{
    CreateHostelComplaintDto, FeeLine, FeeMark, FeeStatus, Hostel, HostelAssignment,
    HostelComplaint, HostelComplaintCreated, HostelFee, HostelView, PayFeeRequest,
};

/// Hostel used when a new student's request does not name one.
pub const DEFAULT_HOSTEL_ID: &str = "H001";

pub const COMPLAINT_INITIAL_STATUS: &str = "Open";

/// Result of [`HostelService::mark_fee_item_paid`](super::HostelService::mark_fee_item_paid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePayment {
    Marked,
    AlreadyPaid,
}
