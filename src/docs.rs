use utoipa::OpenApi;

use campusgate_core::ErrorResponse;
use campusgate_models::academics::{
    AdmitCardDownloadedRequest, AttendanceBatch, AttendanceOverallResponse, AttendanceRecord,
    FacultyRosterEntry, ResultsView,
};
use campusgate_models::grievances::{
    CreateGrievanceDto, FeedbackDto, Grievance, GrievanceCreated,
};
use campusgate_models::hostel::{
    CreateHostelComplaintDto, HostelAssignment, HostelComplaint, HostelComplaintCreated,
    HostelView, PayFeeRequest,
};
use campusgate_models::people::{
    CreateStudentDto, FacultyProfileUpdate, FacultyProfileUpdated, LoginRequest, LoginResponse,
    LoginUser, Student, StudentProfileDto,
};
use campusgate_models::placement::{ApplyRequest, PlacementApplication};
use campusgate_models::{SuccessResponse, UploadResponse};

use crate::modules::students::model::StudentCreated;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::admin::controller::get_admin,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::replace_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::filter_students,
        crate::modules::students::controller::get_section_roster,
        crate::modules::students::controller::upload_photo,
        crate::modules::faculty::controller::get_faculty,
        crate::modules::faculty::controller::update_faculty_profile,
        crate::modules::faculty::controller::get_faculty_feedback,
        crate::modules::faculty::controller::get_faculty_assignment,
        crate::modules::courses::controller::list_course_details,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course_details,
        crate::modules::courses::controller::get_course_sections,
        crate::modules::fees::controller::get_fee_structure,
        crate::modules::fees::controller::get_fees_paid,
        crate::modules::academics::controller::get_subjects,
        crate::modules::academics::controller::get_subject_by_code,
        crate::modules::academics::controller::get_circulars,
        crate::modules::academics::controller::get_resources,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::record_attendance,
        crate::modules::attendance::controller::get_attendance_overall,
        crate::modules::exams::controller::get_upcoming_exams,
        crate::modules::exams::controller::get_admit_cards,
        crate::modules::exams::controller::mark_admit_card_downloaded,
        crate::modules::exams::controller::get_results,
        crate::modules::hostel::controller::get_hostel_view,
        crate::modules::hostel::controller::get_hostel_fee,
        crate::modules::hostel::controller::pay_hostel_fee,
        crate::modules::hostel::controller::get_hostel_complaints,
        crate::modules::hostel::controller::create_hostel_complaint,
        crate::modules::placement::controller::get_placement_stats,
        crate::modules::placement::controller::get_placement_drives,
        crate::modules::placement::controller::get_placement_profile,
        crate::modules::placement::controller::apply_for_placement,
        crate::modules::placement::controller::get_placement_applications,
        crate::modules::grievances::controller::get_grievances,
        crate::modules::grievances::controller::create_grievance,
        crate::modules::feedback::controller::get_faculty_roster,
        crate::modules::feedback::controller::get_student_feedback,
        crate::modules::feedback::controller::submit_feedback,
    ),
    components(
        schemas(
            ErrorResponse,
            SuccessResponse,
            UploadResponse,
            LoginRequest,
            LoginResponse,
            LoginUser,
            Student,
            CreateStudentDto,
            StudentProfileDto,
            StudentCreated,
            FacultyProfileUpdate,
            FacultyProfileUpdated,
            FacultyRosterEntry,
            AttendanceRecord,
            AttendanceBatch,
            AttendanceOverallResponse,
            AdmitCardDownloadedRequest,
            ResultsView,
            HostelAssignment,
            HostelView,
            PayFeeRequest,
            HostelComplaint,
            CreateHostelComplaintDto,
            HostelComplaintCreated,
            ApplyRequest,
            PlacementApplication,
            CreateGrievanceDto,
            Grievance,
            GrievanceCreated,
            FeedbackDto,
        )
    ),
    tags(
        (name = "Authentication", description = "Student lookup login"),
        (name = "Admin", description = "Administrator records"),
        (name = "Students", description = "Student records, rosters and photos"),
        (name = "Faculty", description = "Faculty profiles, assignments and feedback"),
        (name = "Courses", description = "Course details and sections"),
        (name = "Fees", description = "Fee structure and payments"),
        (name = "Academics", description = "Subjects, circulars and resources"),
        (name = "Attendance", description = "Attendance rows and overall percentage"),
        (name = "Exams", description = "Exam schedule, admit cards and results"),
        (name = "Hostel", description = "Hostel view, fee ledger and complaints"),
        (name = "Placement", description = "Placement drives and applications"),
        (name = "Grievances", description = "Student grievances"),
        (name = "Feedback", description = "Course feedback")
    ),
    info(
        title = "Campusgate API",
        version = "0.1.0",
        description = "Gateway over the institution's student, faculty, hostel and academic collections.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
