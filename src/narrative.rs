use crate::record::SeasonGrade;
use crate::roles::Role;

const NO_DATA_SENTENCE: &str =
    "Not enough comparable players in this role to produce a season grade yet.";

const GK_INTRO: &str = "A goalkeeper season, judged on shot-stopping, \
command of the box and distribution against positional peers.";

/// Qualitative band for a 0-100 sub-grade. Thresholds are inclusive
/// lower bounds shared by every sub-grade sentence.
pub fn band(score: i64) -> &'static str {
    if score >= 75 {
        "excellent"
    } else if score >= 60 {
        "good"
    } else if score >= 45 {
        "average"
    } else if score >= 30 {
        "below average"
    } else {
        "poor"
    }
}

/// Deterministic plain-text explanation of a finished grade. No
/// randomness, no external calls: the same grade always renders the same
/// paragraph. Sub-grade sentences are skipped for categories the grade
/// does not carry.
pub fn explain(grade: &SeasonGrade) -> String {
    let Some(overall10) = grade.overall10 else {
        return NO_DATA_SENTENCE.to_string();
    };

    let mut sentences: Vec<String> = Vec::new();
    if Role::from_label(&grade.role).is_goalkeeper() {
        sentences.push(GK_INTRO.to_string());
        push_banded(&mut sentences, grade, "shotStopping", "Shot-stopping was");
        push_banded(&mut sentences, grade, "command", "Command of the box was");
        push_banded(&mut sentences, grade, "distribution", "Distribution was");
    } else {
        push_banded(&mut sentences, grade, "buildup", "Build-up play was");
        push_banded(&mut sentences, grade, "contribution", "Attacking contribution was");
        push_banded(&mut sentences, grade, "defending", "Defensive work was");
        push_banded(&mut sentences, grade, "discipline", "Discipline was");
    }

    sentences.push(format!("Overall season grade: {overall10:.1}/10."));
    sentences.push(confidence_sentence(grade.confidence).to_string());
    sentences.join(" ")
}

fn push_banded(out: &mut Vec<String>, grade: &SeasonGrade, category: &str, lead: &str) {
    if let Some(score) = grade.sub_grades.get(category) {
        out.push(format!("{lead} {} ({score}/100).", band(*score)));
    }
}

fn confidence_sentence(confidence: f64) -> &'static str {
    if confidence >= 0.85 {
        "The minutes behind this grade make it highly reliable."
    } else if confidence >= 0.5 {
        "The minutes behind this grade make it moderately reliable."
    } else {
        "This is a small sample of minutes, so treat the grade with caution."
    }
}
