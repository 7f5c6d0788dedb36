use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAttr {
    pub name: &'static str,
    pub kind: KeyKind,
}

impl KeyAttr {
    const fn s(name: &'static str) -> Self {
        Self {
            name,
            kind: KeyKind::String,
        }
    }

    const fn n(name: &'static str) -> Self {
        Self {
            name,
            kind: KeyKind::Number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    pub partition: KeyAttr,
    pub sort: Option<KeyAttr>,
}

impl KeySchema {
    const fn simple(partition: KeyAttr) -> Self {
        Self {
            partition,
            sort: None,
        }
    }

    const fn composite(partition: KeyAttr, sort: KeyAttr) -> Self {
        Self {
            partition,
            sort: Some(sort),
        }
    }

    /// Names of the key attributes, which may never be rewritten by an update.
    pub fn attribute_names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.partition.name).chain(self.sort.map(|s| s.name))
    }
}

/// Every collection the gateway reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Student,
    Faculty,
    Admin,
    CourseDetails,
    CourseSections,
    FeesStructure,
    FeesPaid,
    Attendance,
    Subjects,
    HostelAssigned,
    Hostel,
    HostelFee,
    HostelComplaint,
    HostelRoomCounter,
    Circulars,
    ExamSchedule,
    AdmitCards,
    Results,
    SemesterSummary,
    PlacementStats,
    PlacementDrives,
    StudentPlacementProfile,
    PlacementApplications,
    Grievances,
    Feedback,
    FacultyAssignments,
    Resources,
}

impl Collection {
    pub const ALL: [Collection; 27] = [
        Self::Student,
        Self::Faculty,
        Self::Admin,
        Self::CourseDetails,
        Self::CourseSections,
        Self::FeesStructure,
        Self::FeesPaid,
        Self::Attendance,
        Self::Subjects,
        Self::HostelAssigned,
        Self::Hostel,
        Self::HostelFee,
        Self::HostelComplaint,
        Self::HostelRoomCounter,
        Self::Circulars,
        Self::ExamSchedule,
        Self::AdmitCards,
        Self::Results,
        Self::SemesterSummary,
        Self::PlacementStats,
        Self::PlacementDrives,
        Self::StudentPlacementProfile,
        Self::PlacementApplications,
        Self::Grievances,
        Self::Feedback,
        Self::FacultyAssignments,
        Self::Resources,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Faculty => "Faculty",
            Self::Admin => "Admin",
            Self::CourseDetails => "CourseDetails",
            Self::CourseSections => "CourseSections",
            Self::FeesStructure => "FeesStructure",
            Self::FeesPaid => "FeesPaid",
            Self::Attendance => "Attendance",
            Self::Subjects => "Subjects",
            Self::HostelAssigned => "HostelAssigned",
            Self::Hostel => "Hostel",
            Self::HostelFee => "HostelFee",
            Self::HostelComplaint => "HostelComplaint",
            Self::HostelRoomCounter => "HostelRoomCounter",
            Self::Circulars => "Circulars",
            Self::ExamSchedule => "ExamSchedule",
            Self::AdmitCards => "AdmitCards",
            Self::Results => "Results",
            Self::SemesterSummary => "SemesterSummary",
            Self::PlacementStats => "PlacementStats",
            Self::PlacementDrives => "PlacementDrives",
            Self::StudentPlacementProfile => "StudentPlacementProfile",
            Self::PlacementApplications => "PlacementApplications",
            Self::Grievances => "Grievances",
            Self::Feedback => "Feedback",
            Self::FacultyAssignments => "FacultyAssignments",
            Self::Resources => "Resources",
        }
    }

    pub fn key_schema(self) -> KeySchema {
        use KeyAttr as A;
        match self {
            Self::Student => KeySchema::simple(A::s("StudentID")),
            Self::Faculty => KeySchema::composite(A::s("FacultyID"), A::s("Department")),
            Self::Admin => KeySchema::simple(A::s("AdminID")),
            Self::CourseDetails => KeySchema::simple(A::s("CourseID")),
            Self::CourseSections => KeySchema::composite(A::s("CourseID"), A::n("Semester")),
            Self::FeesStructure => KeySchema::composite(A::s("CourseID"), A::n("Sem")),
            Self::FeesPaid => KeySchema::composite(A::s("StudentID"), A::n("Sem")),
            Self::Attendance => {
                KeySchema::composite(A::s("StudentID"), A::s("Date#SubjectCode"))
            }
            Self::Subjects => KeySchema::composite(A::s("CourseID"), A::s("SubjectCode")),
            Self::HostelAssigned => KeySchema::simple(A::s("StudentID")),
            Self::Hostel => KeySchema::simple(A::s("HostelID")),
            Self::HostelFee => KeySchema::simple(A::s("StudentID")),
            Self::HostelComplaint => {
                KeySchema::composite(A::s("StudentID"), A::s("ComplaintID"))
            }
            Self::HostelRoomCounter => KeySchema::simple(A::s("HostelID")),
            Self::Circulars => KeySchema::composite(A::s("CourseID"), A::s("PostedAt")),
            Self::ExamSchedule => {
                KeySchema::composite(A::s("CourseID"), A::s("Semester#ExamDateTime"))
            }
            Self::AdmitCards => KeySchema::composite(A::s("StudentID"), A::n("Semester")),
            Self::Results => {
                KeySchema::composite(A::s("StudentID"), A::s("Semester#SubjectCode"))
            }
            Self::SemesterSummary => KeySchema::composite(A::s("StudentID"), A::n("Semester")),
            Self::PlacementStats => KeySchema::simple(A::s("CourseID")),
            Self::PlacementDrives => KeySchema::composite(A::s("CourseID"), A::s("CompanyID")),
            Self::StudentPlacementProfile => KeySchema::simple(A::s("StudentID")),
            Self::PlacementApplications => {
                KeySchema::composite(A::s("StudentID"), A::s("CompanyID"))
            }
            Self::Grievances => KeySchema::composite(A::s("StudentID"), A::s("GrievanceID")),
            Self::Feedback => KeySchema::composite(A::s("StudentID"), A::s("SubjectCode")),
            Self::FacultyAssignments => {
                KeySchema::composite(A::s("CourseSemester"), A::s("SubjectCode#Section"))
            }
            Self::Resources => KeySchema::composite(A::s("CourseID"), A::s("ResourceID")),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.table_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "hostelassigned".parse::<Collection>().unwrap(),
            Collection::HostelAssigned
        );
        assert!("Nope".parse::<Collection>().is_err());
    }

    #[test]
    fn test_table_names_round_trip() {
        for c in Collection::ALL {
            assert_eq!(c.table_name().parse::<Collection>().unwrap(), c);
        }
    }

    #[test]
    fn test_numeric_sort_keys() {
        let schema = Collection::FeesPaid.key_schema();
        assert_eq!(schema.sort.unwrap().kind, KeyKind::Number);
        let names: Vec<_> = schema.attribute_names().collect();
        assert_eq!(names, vec!["StudentID", "Sem"]);
    }
}
