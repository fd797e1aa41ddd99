use std::fs;
use std::io::{IsTerminal, Read};

use crate::input::invalid_input_error;
use crate::{ClientError, ClientResult};

pub(crate) const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum SourceKind {
    File,
    Stdin,
    Omitted,
}

impl SourceKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
            Self::Omitted => "none",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_ref: Option<String>,
    pub(crate) content: String,
}

impl ResolvedSource {
    fn omitted() -> Self {
        Self {
            source_kind: SourceKind::Omitted,
            source_ref: None,
            content: String::new(),
        }
    }
}

/// Rejects invocations where more than one source asks for stdin.
pub(crate) fn ensure_single_stdin(paths: &[Option<&str>]) -> ClientResult<()> {
    let stdin_sources = paths
        .iter()
        .filter(|path| **path == Some(STDIN_PATH))
        .count();
    if stdin_sources > 1 {
        return Err(invalid_input_error(
            "Only one source can read from stdin. Pass a file path for the other source.",
        ));
    }
    Ok(())
}

pub(crate) fn resolve_source(
    source: &str,
    path: Option<&str>,
    stdin_override: Option<String>,
) -> ClientResult<ResolvedSource> {
    let Some(path_value) = path else {
        return Ok(ResolvedSource::omitted());
    };

    if path_value == STDIN_PATH {
        let Some(stdin_value) = read_stdin(stdin_override)? else {
            return Err(invalid_input_error(&format!(
                "Path `-` for {source} means stdin input, but stdin was empty. Pipe JSON/CSV input or pass a file path."
            )));
        };
        return Ok(ResolvedSource {
            source_kind: SourceKind::Stdin,
            source_ref: None,
            content: stdin_value,
        });
    }

    let file_body = fs::read_to_string(path_value).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read {source} file `{path_value}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                format!("Or pass `-` to read {source} from stdin."),
            ],
        )
    })?;

    if file_body.trim().is_empty() {
        return Err(invalid_input_error(&format!(
            "The {source} file `{path_value}` is empty. Use `[]` for a source without records."
        )));
    }

    Ok(ResolvedSource {
        source_kind: SourceKind::File,
        source_ref: Some(path_value.to_string()),
        content: file_body,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        if value.trim().is_empty() {
            return Ok(None);
        }
        return Ok(Some(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path argument.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    if buffer.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(buffer))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{SourceKind, ensure_single_stdin, resolve_source};

    #[test]
    fn missing_path_resolves_to_an_omitted_source() {
        let resolved = resolve_source("sales", None, None);
        assert!(resolved.is_ok());
        if let Ok(value) = resolved {
            assert_eq!(value.source_kind, SourceKind::Omitted);
            assert!(value.content.is_empty());
        }
    }

    #[test]
    fn dash_reads_the_stdin_override() {
        let resolved = resolve_source("expenses", Some("-"), Some("[]".to_string()));
        assert!(resolved.is_ok());
        if let Ok(value) = resolved {
            assert_eq!(value.source_kind, SourceKind::Stdin);
            assert_eq!(value.content, "[]");
        }

        let empty = resolve_source("expenses", Some("-"), Some("  \n".to_string()));
        assert!(empty.is_err());
    }

    #[test]
    fn files_are_read_and_empty_files_rejected() {
        let temp = tempfile::tempdir();
        assert!(temp.is_ok());
        let Ok(temp) = temp else {
            return;
        };

        let sales_path = temp.path().join("sales.json");
        let empty_path = temp.path().join("empty.csv");
        assert!(fs::write(&sales_path, "[]").is_ok());
        assert!(fs::write(&empty_path, "").is_ok());

        let sales_ref = sales_path.to_string_lossy().to_string();
        let resolved = resolve_source("sales", Some(&sales_ref), None);
        assert!(resolved.is_ok());
        if let Ok(value) = resolved {
            assert_eq!(value.source_kind, SourceKind::File);
            assert_eq!(value.source_ref.as_deref(), Some(sales_ref.as_str()));
        }

        let empty_ref = empty_path.to_string_lossy().to_string();
        let empty = resolve_source("sales", Some(&empty_ref), None);
        assert!(empty.is_err());
        if let Err(error) = empty {
            assert_eq!(error.code, "invalid_argument");
        }

        let missing = resolve_source("sales", Some("/definitely/not/here.json"), None);
        assert!(missing.is_err());
    }

    #[test]
    fn only_one_source_may_use_stdin() {
        assert!(ensure_single_stdin(&[Some("-"), Some("expenses.csv")]).is_ok());
        assert!(ensure_single_stdin(&[Some("-"), None]).is_ok());
        assert!(ensure_single_stdin(&[Some("-"), Some("-")]).is_err());
    }
}
