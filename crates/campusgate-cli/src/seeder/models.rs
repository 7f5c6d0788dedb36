/// How much demo data to generate.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub students: usize,
    pub hostels: usize,
    pub course_id: String,
    pub branches: Vec<String>,
    pub sections: Vec<String>,
    pub semesters: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            students: 100,
            hostels: 2,
            course_id: "BTECH".to_string(),
            branches: vec!["CSE".to_string(), "ECE".to_string()],
            sections: vec!["A".to_string(), "B".to_string()],
            semesters: 8,
        }
    }
}

impl SeedConfig {
    pub fn new(students: usize, hostels: usize) -> Self {
        Self {
            students,
            hostels: hostels.max(1),
            ..Self::default()
        }
    }
}

/// Documents written per collection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub hostels: usize,
    pub students: usize,
    pub assignments: usize,
    pub fee_ledgers: usize,
    pub unprocessed: usize,
}
