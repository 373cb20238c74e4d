use std::io::{self, Write};

use thiserror::Error;

use crate::domain::throughput::ResolvedInterval;

#[derive(Error, Debug)]
pub enum ThroughputYamlError {
    #[error("failed to read throughput yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse throughput yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub fn serialize_throughput_to_yaml<W: Write>(
    writer: &mut W,
    data: &[ResolvedInterval],
) -> Result<(), ThroughputYamlError> {
    let yaml = serde_yaml::to_string(data)?;
    writer.write_all(yaml.as_bytes())?;
    Ok(())
}

pub fn deserialize_throughput_from_yaml_str(
    contents: &str,
) -> Result<Vec<ResolvedInterval>, ThroughputYamlError> {
    Ok(serde_yaml::from_str(contents)?)
}

pub fn load_throughput_from_yaml_file(path: &str) -> Result<Vec<ResolvedInterval>, ThroughputYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_throughput_from_yaml_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_throughput_to_yaml_lists_intervals() {
        let data = vec![
            ResolvedInterval::new(1, 2, vec!["ABC-1".into(), "ABC-2".into()]),
            ResolvedInterval::new(2, 0, vec![]),
        ];
        let mut buf = Vec::new();
        serialize_throughput_to_yaml(&mut buf, &data).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("interval: 1"));
        assert!(output.contains("resolved: 2"));
        assert!(output.contains("- ABC-1"));
        assert!(output.contains("interval: 2"));
        assert!(output.contains("resolved: 0"));
    }

    #[test]
    fn deserialize_throughput_allows_missing_issue_keys() {
        let yaml = "- interval: 1\n  resolved: 4\n- interval: 2\n  resolved: 6\n  issues: [ABC-7]\n";
        let data = deserialize_throughput_from_yaml_str(yaml).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0], ResolvedInterval::new(1, 4, vec![]));
        assert_eq!(data[1].issues, vec!["ABC-7"]);
    }

    #[test]
    fn deserialize_throughput_rejects_negative_counts() {
        let yaml = "- interval: 1\n  resolved: -4\n";
        assert!(matches!(
            deserialize_throughput_from_yaml_str(yaml),
            Err(ThroughputYamlError::Parse(_))
        ));
    }
}
