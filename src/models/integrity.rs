use serde::Serialize;

/// A document whose reference field points at nothing.
#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedReference {
    pub collection: String,
    /// Domain key of the offending document
    pub key: String,
    pub field: String,
    pub missing_value: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityCheckResult {
    pub name: String,
    pub orphaned: u64,
    /// Capped sample of the orphaned references
    pub samples: Vec<OrphanedReference>,
}

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub passed: bool,
    pub total_orphaned: u64,
    pub checks: Vec<IntegrityCheckResult>,
}

impl IntegrityReport {
    pub fn from_checks(checks: Vec<IntegrityCheckResult>) -> Self {
        let total_orphaned = checks.iter().map(|c| c.orphaned).sum();
        Self {
            passed: total_orphaned == 0,
            total_orphaned,
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, orphaned: u64) -> IntegrityCheckResult {
        IntegrityCheckResult {
            name: name.into(),
            orphaned,
            samples: vec![],
        }
    }

    #[test]
    fn test_report_totals() {
        let report = IntegrityReport::from_checks(vec![check("a", 0), check("b", 3), check("c", 1)]);
        assert_eq!(report.total_orphaned, 4);
        assert!(!report.passed);

        let clean = IntegrityReport::from_checks(vec![check("a", 0)]);
        assert!(clean.passed);
    }
}
