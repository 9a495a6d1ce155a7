//! Score to letter-grade mapping shared by the overall score and every
//! module score.

/// Grade bands in descending order. A score belongs to the first band whose
/// floor it reaches; anything below 60 is an F.
const GRADE_BANDS: &[(i64, &str)] = &[
    (97, "A+"),
    (93, "A"),
    (90, "A-"),
    (87, "B+"),
    (83, "B"),
    (80, "B-"),
    (77, "C+"),
    (73, "C"),
    (70, "C-"),
    (67, "D+"),
    (63, "D"),
    (60, "D-"),
];

pub fn letter_grade(score: i64) -> &'static str {
    for (floor, grade) in GRADE_BANDS {
        if score >= *floor {
            return grade;
        }
    }

    "F"
}
