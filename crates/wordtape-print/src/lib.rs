//! Printable word list rendering.

mod template;

pub use template::PrintTemplate;

use std::fs;
use std::path::{Path, PathBuf};

use wordtape_types::EnrichedRecord;

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {0} has no line with {{english}}, {{spell}} or {{russian}}")]
    NoRowLine(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render `records` with the template at `template_path` into `output`
pub fn render_to_file(
    records: &[EnrichedRecord],
    template_path: &Path,
    output: &Path,
) -> Result<usize, PrintError> {
    let template = PrintTemplate::load(template_path)?;
    write_document(&template, records, output)
}

pub fn write_document(
    template: &PrintTemplate,
    records: &[EnrichedRecord],
    output: &Path,
) -> Result<usize, PrintError> {
    let write_err = |source: std::io::Error| PrintError::OutputWrite {
        path: output.to_path_buf(),
        source,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(output, template.render(records)).map_err(write_err)?;

    tracing::info!("Wrote {} rows to {}", records.len(), output.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_to_file() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("template.txt");
        let output = dir.path().join("out").join("toPrint.txt");
        fs::write(&template_path, "WORDS\n{english} [{spell}] {russian}\n").unwrap();

        let rows = render_to_file(
            &[EnrichedRecord::new("cat", "kæt", "кот")],
            &template_path,
            &output,
        )
        .unwrap();

        assert_eq!(rows, 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "WORDS\ncat [kæt] кот\n");
    }

    #[test]
    fn test_missing_template() {
        let dir = tempdir().unwrap();
        let result = render_to_file(&[], &dir.path().join("none.txt"), &dir.path().join("out.txt"));
        assert!(matches!(result, Err(PrintError::TemplateRead { .. })));
        assert!(!dir.path().join("out.txt").exists());
    }

    #[test]
    fn test_template_without_row_line() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("template.txt");
        fs::write(&template_path, "no placeholders here\n").unwrap();

        let result = render_to_file(&[], &template_path, &dir.path().join("out.txt"));
        assert!(matches!(result, Err(PrintError::NoRowLine(_))));
    }
}
