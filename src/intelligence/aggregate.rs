use crate::models::{ClassifiedField, LabStats, LabStatus, PipelineResult};

pub fn stats(fields: &[ClassifiedField]) -> LabStats {
    let count = |pred: fn(LabStatus) -> bool| fields.iter().filter(|f| pred(f.status)).count();
    LabStats {
        total: fields.len(),
        normal: count(|s| s == LabStatus::Normal),
        abnormal: count(|s| s.is_abnormal()),
        critical: count(|s| s == LabStatus::Critical),
    }
}

/// Order fields most severe first. The sort is stable, so fields of equal
/// rank keep their document order. Critical names follow the sorted order.
pub fn aggregate(mut fields: Vec<ClassifiedField>) -> PipelineResult {
    fields.sort_by(|a, b| b.severity_rank.cmp(&a.severity_rank));

    let critical_flags = fields
        .iter()
        .filter(|f| f.status == LabStatus::Critical)
        .map(|f| f.name().to_string())
        .collect();
    let stats = stats(&fields);

    PipelineResult {
        fields,
        stats,
        critical_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NormalizedField, RawField};

    fn field(name: &str, status: LabStatus) -> ClassifiedField {
        ClassifiedField::new(
            NormalizedField {
                raw: RawField::new(name, "1"),
                numeric_value: Some(1.0),
            },
            status,
            None,
            None,
        )
    }

    fn names(result: &PipelineResult) -> Vec<&str> {
        result.fields.iter().map(|f| f.name()).collect()
    }

    #[test]
    fn sorted_by_severity() {
        let result = aggregate(vec![
            field("A", LabStatus::Normal),
            field("B", LabStatus::Critical),
            field("C", LabStatus::Low),
            field("D", LabStatus::High),
        ]);
        assert_eq!(names(&result), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn equal_rank_keeps_input_order() {
        let result = aggregate(vec![
            field("Normal1", LabStatus::Normal),
            field("Unknown1", LabStatus::Unknown),
            field("Normal2", LabStatus::Normal),
            field("High1", LabStatus::High),
            field("Unknown2", LabStatus::Unknown),
        ]);
        assert_eq!(names(&result), vec!["High1", "Normal1", "Unknown1", "Normal2", "Unknown2"]);
    }

    #[test]
    fn stats_and_flags() {
        let result = aggregate(vec![
            field("Hemoglobin", LabStatus::Critical),
            field("TSH", LabStatus::High),
            field("WBC", LabStatus::Normal),
            field("ESR", LabStatus::Unknown),
            field("Platelets", LabStatus::Critical),
        ]);
        assert_eq!(
            result.stats,
            LabStats {
                total: 5,
                normal: 1,
                abnormal: 1,
                critical: 2,
            }
        );
        assert_eq!(result.critical_flags, vec!["Hemoglobin", "Platelets"]);
        assert!(result.has_critical());
    }

    #[test]
    fn unknown_counts_toward_total_only() {
        let result = aggregate(vec![field("ESR", LabStatus::Unknown)]);
        assert_eq!(
            result.stats,
            LabStats {
                total: 1,
                ..LabStats::default()
            }
        );
    }

    #[test]
    fn empty_input() {
        let result = aggregate(vec![]);
        assert!(result.is_empty());
        assert_eq!(result.stats, LabStats::default());
        assert!(result.critical_flags.is_empty());
    }
}
