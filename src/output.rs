use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::models::ReleaseRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `title - label - quality - link`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Writes records as they are extracted, flushing after each one
pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    pub fn write(&mut self, record: &ReleaseRecord) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", record),
            OutputFormat::Json => {
                let line = serde_json::to_string(record).context("Failed to serialize record")?;
                writeln!(self.out, "{}", line)
            }
        }
        .context("Failed to write record")?;

        self.out.flush().context("Failed to flush output")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn record() -> ReleaseRecord {
        ReleaseRecord {
            anime: "Dandadan".to_string(),
            category: Category::Batch,
            label: "01 ~ 12".to_string(),
            quality: "1080p".to_string(),
            link: "magnet:?xt=abc".to_string(),
        }
    }

    #[test]
    fn test_text_output() {
        let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Text);
        writer.write(&record()).unwrap();
        writer.write(&record()).unwrap();

        assert_eq!(writer.written(), 2);
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "Dandadan - 01 ~ 12 - 1080p - magnet:?xt=abc\nDandadan - 01 ~ 12 - 1080p - magnet:?xt=abc\n"
        );
    }

    #[test]
    fn test_json_output() {
        let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Json);
        writer.write(&record()).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();

        assert_eq!(value["anime"], "Dandadan");
        assert_eq!(value["category"], "batch");
        assert_eq!(value["label"], "01 ~ 12");
        assert_eq!(value["quality"], "1080p");
        assert_eq!(value["link"], "magnet:?xt=abc");
    }
}
