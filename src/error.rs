use std::fmt;
use std::path::PathBuf;

/// Error types for the SOPS decryption pipeline.
///
/// Each variant corresponds to one stage of the pipeline: spawning the
/// external tool, waiting for it to exit, and parsing its output.
#[derive(Debug)]
pub enum SopsError {
    /// The sops binary could not be spawned (not installed or not in PATH)
    ToolNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The sops binary ran but exited non-zero (wrong key, corrupted file, ...)
    DecryptionFailed {
        path: PathBuf,
        exit_code: Option<i32>,
    },

    /// The sops binary exited zero but its output was not valid YAML
    DecryptedContentNotYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl fmt::Display for SopsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SopsError::ToolNotFound { path, .. } => {
                write!(
                    f,
                    "Failed to call sops to decrypt file at {}, ensure sops is installed in PATH",
                    path.display()
                )
            }
            SopsError::DecryptionFailed { path, .. } => {
                write!(f, "Failed to decrypt SOPS file at {}", path.display())
            }
            SopsError::DecryptedContentNotYaml { path, .. } => {
                write!(
                    f,
                    "Failed to parse YAML from decrypted SOPS file at {}, confirm file is YAML format",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SopsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SopsError::ToolNotFound { source, .. } => Some(source),
            SopsError::DecryptionFailed { .. } => None,
            SopsError::DecryptedContentNotYaml { source, .. } => Some(source),
        }
    }
}

/// Result type for SOPS operations
pub type SopsResult<T> = Result<T, SopsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_every_kind_names_the_failing_path() {
        let path = Path::new("/vars/prod.sops.yml");

        let errors = [
            SopsError::ToolNotFound {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            SopsError::DecryptionFailed {
                path: path.to_path_buf(),
                exit_code: Some(1),
            },
            SopsError::DecryptedContentNotYaml {
                path: path.to_path_buf(),
                source: serde_yaml::from_str::<serde_yaml::Value>("foo: [1, 2").unwrap_err(),
            },
        ];

        for error in errors {
            assert!(error.to_string().contains("/vars/prod.sops.yml"));
        }
    }

    #[test]
    fn test_tool_not_found_advises_installing_sops() {
        let error = SopsError::ToolNotFound {
            path: Path::new("vars.yml").to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert!(error.to_string().contains("ensure sops is installed in PATH"));
    }

    #[test]
    fn test_not_yaml_advises_confirming_format() {
        let error = SopsError::DecryptedContentNotYaml {
            path: Path::new("vars.yml").to_path_buf(),
            source: serde_yaml::from_str::<serde_yaml::Value>("foo: [1, 2").unwrap_err(),
        };

        assert!(error.to_string().contains("confirm file is YAML format"));
    }
}
