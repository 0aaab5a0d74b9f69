//! YAML formatter.

use crate::analyzer::analyze::AnalysisResult;
use crate::analyzer::formatter::report::Report;

/// Format an analysis result as YAML.
pub fn format(result: &AnalysisResult) -> String {
    serde_yaml::to_string(&Report::from(result)).unwrap_or_else(|_| "{}\n".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let output = format(&AnalysisResult::new());
        let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(value["messages"].as_sequence().map(Vec::len), Some(0));
        assert_eq!(value["summary"]["passed"].as_bool(), Some(true));
    }
}
