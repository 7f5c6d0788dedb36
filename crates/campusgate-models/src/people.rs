//! Student, faculty and admin records, plus the login shape.

use campusgate_core::serde::{deserialize_optional_string_or_number, deserialize_i64_lenient};
use campusgate_store::{Document, UpdatableField, UpdateSet};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Stored `Student` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct Student {
    #[serde(rename = "StudentID")]
    pub student_id: String,
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "CourseID", skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(rename = "Branch", skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(rename = "Specialization", skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(rename = "CurrentSem", skip_serializing_if = "Option::is_none")]
    pub current_sem: Option<i64>,
    #[serde(rename = "Section", skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "ClassRollNo", skip_serializing_if = "Option::is_none")]
    pub class_roll_no: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "PhoneNo", skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(rename = "Gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "DOB", skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "PhotoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Student fields a client may send on create or replace.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct StudentProfileDto {
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(rename = "CourseID")]
    pub course_id: Option<String>,
    #[serde(rename = "Branch")]
    pub branch: Option<String>,
    #[serde(rename = "Specialization")]
    pub specialization: Option<String>,
    #[serde(
        rename = "CurrentSem",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[validate(range(min = 1, max = 12))]
    #[schema(value_type = Option<i64>)]
    pub current_sem: Option<i64>,
    #[serde(rename = "Section")]
    pub section: Option<String>,
    #[serde(
        rename = "ClassRollNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub class_roll_no: Option<String>,
    #[serde(rename = "Email")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(
        rename = "PhoneNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub phone_no: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "DOB")]
    pub dob: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "PhotoURL")]
    pub photo_url: Option<String>,
}

impl StudentProfileDto {
    pub fn into_student(self, student_id: String) -> Student {
        Student {
            student_id,
            name: self.name,
            course_id: self.course_id,
            branch: self.branch,
            specialization: self.specialization,
            current_sem: self.current_sem,
            section: self.section,
            class_roll_no: self.class_roll_no,
            email: self.email,
            phone_no: self.phone_no,
            gender: self.gender,
            dob: self.dob,
            address: self.address,
            photo_url: self.photo_url,
        }
    }
}

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_i64_lenient")] i64);

    Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(v)| v))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateStudentDto {
    #[serde(rename = "StudentID")]
    #[validate(length(min = 1, message = "StudentID is required"))]
    pub student_id: String,
    /// Hostel to allocate a room in. Not stored on the student.
    #[serde(rename = "HostelID", default)]
    pub hostel_id: Option<String>,
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(rename = "CourseID")]
    pub course_id: Option<String>,
    #[serde(rename = "Branch")]
    pub branch: Option<String>,
    #[serde(rename = "Specialization")]
    pub specialization: Option<String>,
    #[serde(
        rename = "CurrentSem",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    #[validate(range(min = 1, max = 12))]
    #[schema(value_type = Option<i64>)]
    pub current_sem: Option<i64>,
    #[serde(rename = "Section")]
    pub section: Option<String>,
    #[serde(
        rename = "ClassRollNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub class_roll_no: Option<String>,
    #[serde(rename = "Email")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(
        rename = "PhoneNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub phone_no: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "DOB")]
    pub dob: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "PhotoURL")]
    pub photo_url: Option<String>,
}

impl CreateStudentDto {
    /// Splits the request into the stored student and the requested hostel.
    pub fn into_parts(self) -> (Student, Option<String>) {
        let student = Student {
            student_id: self.student_id,
            name: self.name,
            course_id: self.course_id,
            branch: self.branch,
            specialization: self.specialization,
            current_sem: self.current_sem,
            section: self.section,
            class_roll_no: self.class_roll_no,
            email: self.email,
            phone_no: self.phone_no,
            gender: self.gender,
            dob: self.dob,
            address: self.address,
            photo_url: self.photo_url,
        };
        (student, self.hostel_id)
    }
}

/// Query for `GET /api/students`. `"all"` matches every value.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StudentFilterParams {
    pub course_id: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    pub section: Option<String>,
}

pub const MATCH_ALL: &str = "all";

impl StudentFilterParams {
    /// The value to filter on, or `None` when absent, blank, or the wildcard.
    pub fn selective(value: Option<&str>) -> Option<&str> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(MATCH_ALL))
    }
}

/// Query for the section roster; all three are required.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RosterParams {
    pub course_id: Option<String>,
    pub semester: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub user_type: &'static str,
    pub id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: LoginUser,
    #[serde(rename = "studentData")]
    #[schema(value_type = Object)]
    pub student_data: Document,
    pub success: bool,
}

/// Faculty profile attributes that may be changed through the profile
/// endpoint. Key attributes are deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacultyField {
    Name,
    OfficialEmail,
    PersonalEmail,
    PhoneNo,
    Designation,
    Qualification,
    Specialization,
    JoiningDate,
    Dob,
    Gender,
    Address,
    PhotoUrl,
}

impl UpdatableField for FacultyField {
    fn attribute(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::OfficialEmail => "OfficialEmail",
            Self::PersonalEmail => "PersonalEmail",
            Self::PhoneNo => "PhoneNo",
            Self::Designation => "Designation",
            Self::Qualification => "Qualification",
            Self::Specialization => "Specialization",
            Self::JoiningDate => "JoiningDate",
            Self::Dob => "DOB",
            Self::Gender => "Gender",
            Self::Address => "Address",
            Self::PhotoUrl => "PhotoURL",
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct FacultyProfileUpdate {
    #[serde(rename = "Name")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(rename = "OfficialEmail")]
    #[validate(email)]
    pub official_email: Option<String>,
    #[serde(rename = "PersonalEmail")]
    #[validate(email)]
    pub personal_email: Option<String>,
    #[serde(
        rename = "PhoneNo",
        default,
        deserialize_with = "deserialize_optional_string_or_number"
    )]
    pub phone_no: Option<String>,
    #[serde(rename = "Designation")]
    pub designation: Option<String>,
    #[serde(rename = "Qualification")]
    pub qualification: Option<String>,
    #[serde(rename = "Specialization")]
    pub specialization: Option<String>,
    #[serde(rename = "JoiningDate")]
    pub joining_date: Option<String>,
    #[serde(rename = "DOB")]
    pub dob: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "PhotoURL")]
    pub photo_url: Option<String>,
}

impl FacultyProfileUpdate {
    /// Builds the update from the fields that were supplied.
    pub fn into_update_set(self) -> UpdateSet {
        let fields = [
            (FacultyField::Name, self.name),
            (FacultyField::OfficialEmail, self.official_email),
            (FacultyField::PersonalEmail, self.personal_email),
            (FacultyField::PhoneNo, self.phone_no),
            (FacultyField::Designation, self.designation),
            (FacultyField::Qualification, self.qualification),
            (FacultyField::Specialization, self.specialization),
            (FacultyField::JoiningDate, self.joining_date),
            (FacultyField::Dob, self.dob),
            (FacultyField::Gender, self.gender),
            (FacultyField::Address, self.address),
            (FacultyField::PhotoUrl, self.photo_url),
        ];

        fields
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .fold(UpdateSet::new(), |set, (field, value)| {
                set.set_field(field, value)
            })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyProfileUpdated {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: Document,
}
