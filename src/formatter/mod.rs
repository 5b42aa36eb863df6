use crate::plugin::types::{ScorerDescriptor, ScorerKind};
use crate::scoring::FeatureVector;
use serde::Serialize;
use std::io::Write;

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Cli,
    Json,
    Csv,
}

/// One scored row
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRow {
    pub id: Option<String>,
    pub vector: FeatureVector,
}

impl Format {
    /// Create format from string
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "ndjson" => Self::Json,
            "csv" => Self::Csv,
            _ => Self::Cli,
        }
    }

    /// Write the header list
    pub fn write_headers(&self, out: &mut impl Write, headers: &[String]) -> Result<(), anyhow::Error> {
        match self {
            Self::Cli => {
                for header in headers {
                    writeln!(out, "{}", header)?;
                }
            }
            Self::Json => writeln!(out, "{}", serde_json::to_string(headers)?)?,
            Self::Csv => writeln!(out, "{}", csv_line(headers.iter().map(String::as_str)))?,
        }
        Ok(())
    }

    /// Write scored rows under their headers
    pub fn write_vectors(
        &self,
        out: &mut impl Write,
        headers: &[String],
        rows: &[ScoredRow],
    ) -> Result<(), anyhow::Error> {
        match self {
            Self::Cli => self.write_cli(out, headers, rows),
            Self::Json => self.write_json(out, headers, rows),
            Self::Csv => self.write_csv(out, headers, rows),
        }
    }

    fn write_cli(&self, out: &mut impl Write, headers: &[String], rows: &[ScoredRow]) -> Result<(), anyhow::Error> {
        let width = headers.iter().map(String::len).max().unwrap_or(0).max(8);
        let mut line = format!("{:<6}", "Row");
        for header in headers {
            line.push_str(&format!(" {:>width$}", header, width = width));
        }
        writeln!(out, "{}", line)?;
        writeln!(out, "{}", "-".repeat(line.len()))?;

        for (i, row) in rows.iter().enumerate() {
            let label = row.id.clone().unwrap_or_else(|| (i + 1).to_string());
            let mut line = format!("{:<6}", label);
            for value in row.vector.iter() {
                let cell = if value.is_nan() {
                    "-".to_string()
                } else {
                    format!("{:.4}", value)
                };
                line.push_str(&format!(" {:>width$}", cell, width = width));
            }
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn write_json(&self, out: &mut impl Write, headers: &[String], rows: &[ScoredRow]) -> Result<(), anyhow::Error> {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            headers: &'a [String],
            total: usize,
            rows: &'a [ScoredRow],
        }

        let output = JsonOutput {
            headers,
            total: rows.len(),
            rows,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        Ok(())
    }

    fn write_csv(&self, out: &mut impl Write, headers: &[String], rows: &[ScoredRow]) -> Result<(), anyhow::Error> {
        self.write_headers(out, headers)?;
        for row in rows {
            let cells: Vec<String> = row
                .vector
                .iter()
                .map(|v| if v.is_nan() { String::new() } else { v.to_string() })
                .collect();
            writeln!(out, "{}", csv_line(cells.iter().map(String::as_str)))?;
        }
        Ok(())
    }

    /// Write the loaded scorers, one per line
    pub fn write_scorers(
        &self,
        out: &mut impl Write,
        scorers: &[(ScorerKind, ScorerDescriptor)],
    ) -> Result<(), anyhow::Error> {
        match self {
            Self::Cli => {
                writeln!(out, "{:<16} {:<12} {:<28} Description", "Kind", "Column", "Name")?;
                writeln!(out, "{}", "-".repeat(80))?;
                for (kind, d) in scorers {
                    writeln!(
                        out,
                        "{:<16} {:<12} {:<28} {}",
                        kind,
                        d.short_name(),
                        d.name(),
                        d.description()
                    )?;
                }
            }
            Self::Json => {
                #[derive(Serialize)]
                struct JsonScorer<'a> {
                    kind: ScorerKind,
                    #[serde(flatten)]
                    descriptor: &'a ScorerDescriptor,
                }

                let items: Vec<JsonScorer> = scorers
                    .iter()
                    .map(|(kind, descriptor)| JsonScorer {
                        kind: *kind,
                        descriptor,
                    })
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&items)?)?;
            }
            Self::Csv => {
                writeln!(out, "kind,short_name,name,description")?;
                for (kind, d) in scorers {
                    writeln!(
                        out,
                        "{}",
                        csv_line([kind.as_str(), d.short_name(), d.name(), d.description()])
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Join cells into a CSV line, quoting where needed
fn csv_line<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(escape_csv)
        .collect::<Vec<_>>()
        .join(",")
}

/// Escape a CSV cell
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
