//! Field Extractor — reads a loosely formatted analysis completion into an `AnalysisResult`.
//!
//! The model is asked for five labeled sections but nothing guarantees it complies.
//! Extraction is a single pass over the non-blank lines with a section cursor:
//!
//! - a line containing a marker (anywhere, any case) opens that section and its
//!   text after the marker replaces the section's value;
//! - any other line continues the open section, joined with a single space;
//! - lines before the first marker are dropped.
//!
//! Empty sections fall back to fixed defaults afterwards, so extraction never fails.

use crate::maintenance::models::{AnalysisResult, Urgency};

pub const FALLBACK_ESTIMATED_COST: &str = "Contact contractor for estimate";
pub const FALLBACK_CONTRACTOR_TYPE: &str = "General contractor";
pub const FALLBACK_NEXT_STEPS: &str = "Contact a professional for assessment";
/// Used only when the completion itself has no visible text to fall back on.
pub const FALLBACK_DIAGNOSIS: &str = "Unable to determine diagnosis from the analysis";

/// Number of characters of the raw completion used as a diagnosis fallback.
const DIAGNOSIS_FALLBACK_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Diagnosis,
    Urgency,
    EstimatedCost,
    ContractorType,
    NextSteps,
}

/// Tested in this order; the first marker found in a line wins.
const MARKERS: [(Section, &str); 5] = [
    (Section::Diagnosis, "DIAGNOSIS:"),
    (Section::Urgency, "URGENCY:"),
    (Section::EstimatedCost, "ESTIMATED COST:"),
    (Section::ContractorType, "CONTRACTOR TYPE:"),
    (Section::NextSteps, "NEXT STEPS:"),
];

#[derive(Debug, Default)]
struct Accumulator {
    diagnosis: String,
    urgency: Urgency,
    estimated_cost: String,
    contractor_type: String,
    next_steps: String,
}

impl Accumulator {
    /// Text slot for a section. Urgency has none: it is classified once per marker line.
    fn slot(&mut self, section: Section) -> Option<&mut String> {
        match section {
            Section::Diagnosis => Some(&mut self.diagnosis),
            Section::Urgency => None,
            Section::EstimatedCost => Some(&mut self.estimated_cost),
            Section::ContractorType => Some(&mut self.contractor_type),
            Section::NextSteps => Some(&mut self.next_steps),
        }
    }

    fn open(&mut self, section: Section, value: &str) {
        match self.slot(section) {
            Some(slot) => *slot = value.to_string(),
            None => self.urgency = Urgency::classify(value),
        }
    }

    fn continue_with(&mut self, section: Section, line: &str) {
        if let Some(slot) = self.slot(section) {
            slot.push(' ');
            slot.push_str(line);
        }
    }
}

/// Parses a raw completion into a fully populated `AnalysisResult`.
pub fn extract(raw_text: &str) -> AnalysisResult {
    let mut acc = Accumulator::default();
    let mut cursor: Option<Section> = None;

    for line in raw_text.split('\n').filter(|l| !l.trim().is_empty()) {
        match find_marker(line) {
            Some((section, rest)) => {
                cursor = Some(section);
                acc.open(section, rest.trim());
            }
            None => {
                if let Some(section) = cursor {
                    acc.continue_with(section, line.trim());
                }
            }
        }
    }

    let mut diagnosis = or_fallback(acc.diagnosis, || {
        raw_text.chars().take(DIAGNOSIS_FALLBACK_CHARS).collect()
    });
    if diagnosis.is_empty() {
        diagnosis = FALLBACK_DIAGNOSIS.to_string();
    }

    AnalysisResult {
        diagnosis,
        urgency: acc.urgency,
        estimated_cost: or_fallback(acc.estimated_cost, || FALLBACK_ESTIMATED_COST.to_string()),
        contractor_type: or_fallback(acc.contractor_type, || {
            FALLBACK_CONTRACTOR_TYPE.to_string()
        }),
        next_steps: or_fallback(acc.next_steps, || FALLBACK_NEXT_STEPS.to_string()),
    }
}

/// Trims `value`, substituting the (trimmed) fallback when nothing is left.
fn or_fallback(value: String, fallback: impl FnOnce() -> String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback().trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns the first section whose marker occurs in `line`, with the text
/// following that marker's first occurrence.
fn find_marker(line: &str) -> Option<(Section, &str)> {
    MARKERS.iter().find_map(|&(section, marker)| {
        find_ignore_ascii_case(line, marker).map(|at| (section, &line[at + marker.len()..]))
    })
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
///
/// `needle` must be ASCII. A match can then only start and end on char
/// boundaries, so the returned offset is safe to slice with.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len()).find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER_HEATER: &str = "DIAGNOSIS: The water heater pilot light is out.
URGENCY: MEDIUM
ESTIMATED COST: $100-$250
CONTRACTOR TYPE: Plumber
NEXT STEPS: 1. Relight pilot 2. Call plumber if it won't stay lit";

    fn assert_populated(result: &AnalysisResult) {
        assert!(!result.diagnosis.is_empty());
        assert!(!result.estimated_cost.is_empty());
        assert!(!result.contractor_type.is_empty());
        assert!(!result.next_steps.is_empty());
    }

    #[test]
    fn test_well_formed_completion() {
        let result = extract(WATER_HEATER);
        assert_eq!(
            result,
            AnalysisResult {
                diagnosis: "The water heater pilot light is out.".to_string(),
                urgency: Urgency::Medium,
                estimated_cost: "$100-$250".to_string(),
                contractor_type: "Plumber".to_string(),
                next_steps: "1. Relight pilot 2. Call plumber if it won't stay lit".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_input_is_fully_populated() {
        let result = extract("");
        assert_populated(&result);
        assert_eq!(result.diagnosis, FALLBACK_DIAGNOSIS);
        assert_eq!(result.urgency, Urgency::Medium);
        assert_eq!(result.estimated_cost, FALLBACK_ESTIMATED_COST);
        assert_eq!(result.contractor_type, FALLBACK_CONTRACTOR_TYPE);
        assert_eq!(result.next_steps, FALLBACK_NEXT_STEPS);
    }

    #[test]
    fn test_whitespace_only_inputs_are_fully_populated() {
        for input in ["\n", "   ", "\r\n\t\r\n", "\n\n\n"] {
            let result = extract(input);
            assert_populated(&result);
            assert_eq!(result.diagnosis, FALLBACK_DIAGNOSIS);
        }
    }

    #[test]
    fn test_garbage_input_is_fully_populated() {
        let garbage = "\u{0}\u{1}\u{fffd}\u{7f}ÿþ\u{200b}::::\n\u{0}";
        let result = extract(garbage);
        assert_populated(&result);
        assert_eq!(result.urgency, Urgency::Medium);
    }

    #[test]
    fn test_urgency_high_checked_before_low() {
        let result = extract("URGENCY: this is HIGH priority and not low");
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_urgency_low() {
        assert_eq!(extract("URGENCY: LOW").urgency, Urgency::Low);
    }

    #[test]
    fn test_missing_urgency_defaults_to_medium() {
        let result = extract("DIAGNOSIS: Cracked tile\nCONTRACTOR TYPE: Tiler");
        assert_eq!(result.urgency, Urgency::Medium);
    }

    #[test]
    fn test_urgency_continuation_lines_do_not_reclassify() {
        let result = extract("URGENCY: LOW\nbut could become high if ignored");
        assert_eq!(result.urgency, Urgency::Low);
    }

    #[test]
    fn test_later_urgency_line_reclassifies() {
        let result = extract("URGENCY: LOW\nURGENCY: HIGH");
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_continuation_lines_accumulate() {
        let result = extract("DIAGNOSIS: Leaking pipe\nunder the sink\nURGENCY: HIGH");
        assert_eq!(result.diagnosis, "Leaking pipe under the sink");
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_continuation_lines_are_trimmed_and_blank_lines_skipped() {
        let result = extract("NEXT STEPS:\n   1. Shut off water   \n\n   2. Call a plumber\n");
        assert_eq!(result.next_steps, "1. Shut off water 2. Call a plumber");
    }

    #[test]
    fn test_lines_before_first_marker_are_dropped() {
        let result = extract("Here is my analysis.\nDIAGNOSIS: Blocked drain");
        assert_eq!(result.diagnosis, "Blocked drain");
    }

    #[test]
    fn test_marker_value_overwrites_previous_section_value() {
        let result = extract("DIAGNOSIS: first\nmore\nDIAGNOSIS: second");
        assert_eq!(result.diagnosis, "second");
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        for label in ["urgency:", "Urgency:", "URGENCY:", "uRgEnCy:"] {
            let result = extract(&format!("{label} high"));
            assert_eq!(result.urgency, Urgency::High, "label {label}");
        }
        let result = extract("estimated cost: $50\ncontractor type: Electrician\nnext steps: Call");
        assert_eq!(result.estimated_cost, "$50");
        assert_eq!(result.contractor_type, "Electrician");
        assert_eq!(result.next_steps, "Call");
    }

    #[test]
    fn test_marker_inside_line_triggers() {
        let result = extract("Note: DIAGNOSIS: leak");
        assert_eq!(result.diagnosis, "leak");
    }

    #[test]
    fn test_markdown_decorated_markers() {
        let result = extract("1. **DIAGNOSIS:** Loose wiring\n2. **URGENCY:** High");
        assert_eq!(result.diagnosis, "** Loose wiring");
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_only_first_marker_occurrence_is_stripped() {
        let result = extract("DIAGNOSIS: see DIAGNOSIS: above");
        assert_eq!(result.diagnosis, "see DIAGNOSIS: above");
    }

    #[test]
    fn test_first_matching_marker_wins_within_a_line() {
        let result = extract("URGENCY: high; ESTIMATED COST: $90");
        assert_eq!(result.urgency, Urgency::High);
        assert_eq!(result.estimated_cost, FALLBACK_ESTIMATED_COST);
    }

    #[test]
    fn test_bare_marker_takes_continuation() {
        let result = extract("CONTRACTOR TYPE:\nLicensed electrician");
        assert_eq!(result.contractor_type, "Licensed electrician");
    }

    #[test]
    fn test_bare_marker_without_continuation_falls_back() {
        let result = extract("ESTIMATED COST:\nCONTRACTOR TYPE: Roofer");
        assert_eq!(result.estimated_cost, FALLBACK_ESTIMATED_COST);
        assert_eq!(result.contractor_type, "Roofer");
    }

    #[test]
    fn test_diagnosis_fallback_uses_raw_prefix() {
        let raw = "  The model ignored the format.\nIt just talked.";
        let result = extract(raw);
        assert_eq!(result.diagnosis, "The model ignored the format.\nIt just talked.");
    }

    #[test]
    fn test_diagnosis_fallback_truncates_at_200_chars() {
        let raw = "a".repeat(250);
        assert_eq!(extract(&raw).diagnosis, "a".repeat(200));

        let exact = "b".repeat(200);
        assert_eq!(extract(&exact).diagnosis, exact);
    }

    #[test]
    fn test_diagnosis_fallback_truncates_on_char_boundary() {
        // 'é' is two bytes; truncation counts characters, not bytes
        let raw = "é".repeat(300);
        let diagnosis = extract(&raw).diagnosis;
        assert_eq!(diagnosis.chars().count(), 200);
        assert_eq!(diagnosis, "é".repeat(200));
    }

    #[test]
    fn test_empty_diagnosis_marker_falls_back_to_raw_text() {
        let raw = "DIAGNOSIS:\nURGENCY: low";
        assert_eq!(extract(raw).diagnosis, raw);
    }

    #[test]
    fn test_non_ascii_around_marker() {
        let result = extract("Résumé → DIAGNOSIS: Fuite d'eau sous l'évier");
        assert_eq!(result.diagnosis, "Fuite d'eau sous l'évier");
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = extract("DIAGNOSIS: Mold\r\nspreading\r\nURGENCY: HIGH\r\n");
        assert_eq!(result.diagnosis, "Mold spreading");
        assert_eq!(result.urgency, Urgency::High);
    }

    #[test]
    fn test_trimming_is_idempotent() {
        let first = extract("DIAGNOSIS:   Leaking pipe  \n   under the sink   ");
        let again = extract(&format!("DIAGNOSIS: {}", first.diagnosis));
        assert_eq!(again.diagnosis, first.diagnosis);
        assert_eq!(first.diagnosis, "Leaking pipe under the sink");
    }

    #[test]
    fn test_find_ignore_ascii_case() {
        assert_eq!(find_ignore_ascii_case("abc", "B"), Some(1));
        assert_eq!(find_ignore_ascii_case("ab", "abc"), None);
        assert_eq!(find_ignore_ascii_case("", "a"), None);
        assert_eq!(find_ignore_ascii_case("ééX", "x"), Some(4));
    }
}
