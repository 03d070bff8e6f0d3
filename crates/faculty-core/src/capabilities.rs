//! Capability codes for teaching staff.
//!
//! These are the stable permission codes stored in the permission table. Rank
//! entitlements are expressed in terms of these constants, never string
//! literals.
//!
//! # Example
//!
//! ```ignore
//! use faculty_core::capabilities;
//!
//! if granted.contains(&capabilities::EDIT_STUDENT_GRADES) {
//!     // Edit grades
//! }
//! ```

// =============================================================================
// Student records
// =============================================================================

/// Permission to view every student, not only those in one's own courses
pub const VIEW_ALL_STUDENTS: &str = "can_view_all_students";
/// Permission to edit student grades
pub const EDIT_STUDENT_GRADES: &str = "can_edit_student_grades";

// =============================================================================
// Reporting
// =============================================================================

/// Permission to generate reports
pub const GENERATE_REPORTS: &str = "can_generate_reports";

// =============================================================================
// Department administration
// =============================================================================

/// Permission to manage a department
pub const MANAGE_DEPARTMENT: &str = "can_manage_department";
/// Permission to view teacher salaries
pub const VIEW_TEACHER_SALARIES: &str = "can_view_teacher_salaries";

/// Every capability code with its human-readable name, in seniority order of
/// the rank that first receives it.
pub const ALL: [(&str, &str); 5] = [
    (VIEW_ALL_STUDENTS, "يمكن عرض جميع الطلاب"),
    (EDIT_STUDENT_GRADES, "يمكن تعديل درجات الطلاب"),
    (GENERATE_REPORTS, "يمكن إنشاء التقارير"),
    (MANAGE_DEPARTMENT, "يمكن إدارة القسم"),
    (VIEW_TEACHER_SALARIES, "يمكن عرض رواتب المعلمين"),
];

/// Human-readable name for a capability code.
pub fn display_name(code: &str) -> Option<&'static str> {
    ALL.iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}
