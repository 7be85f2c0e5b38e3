//! Human and JSON rendering of listings, selections, and run summaries.

use scdatapack::{ArchiveEntry, ExtractResult, ExtractionSkipped, RunSummary, Selection};

use crate::Format;

/// Formats a byte count with a binary-unit suffix.
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn print_listing(entries: &[ArchiveEntry], total_size: u64, format: Format) {
    match format {
        Format::Human => {
            for entry in entries {
                let kind = if entry.is_directory { "d" } else { "-" };
                println!("{} {:>12}  {}", kind, entry.size, entry.path);
            }
            println!(
                "{} entries, {}",
                entries.len(),
                human_bytes(total_size)
            );
        }
        Format::Json => {
            let doc = serde_json::json!({
                "entries": entries.iter().map(entry_json).collect::<Vec<_>>(),
                "count": entries.len(),
                "total_size": total_size,
            });
            println!("{}", doc);
        }
    }
}

pub fn print_selection(selection: &Selection, prefixes: &[String], format: Format) {
    match format {
        Format::Human => {
            for entry in &selection.entries {
                println!("{:>12}  {}", entry.size, entry.path);
            }
            println!(
                "{} of the archive matched {} prefix(es), {}",
                selection.count(),
                prefixes.len(),
                human_bytes(selection.total_size())
            );
        }
        Format::Json => {
            let doc = serde_json::json!({
                "prefixes": prefixes,
                "entries": selection.entries.iter().map(entry_json).collect::<Vec<_>>(),
                "count": selection.count(),
                "total_size": selection.total_size(),
            });
            println!("{}", doc);
        }
    }
}

pub fn print_extract_summary(result: &ExtractResult, format: Format) {
    match format {
        Format::Human => {
            let status = if result.is_ok() {
                console::style("done").green().to_string()
            } else {
                console::style("completed with failures").yellow().to_string()
            };
            println!(
                "{}: {} extracted ({}), {} skipped, {} failed",
                status,
                result.entries_extracted,
                human_bytes(result.bytes_extracted),
                result.entries_skipped,
                result.entries_failed
            );
            for (path, reason) in &result.failures {
                eprintln!("  {} {}: {}", console::style("failed").red(), path, reason);
            }
        }
        Format::Json => {
            println!("{}", extract_json(result));
        }
    }
}

pub fn print_run_summary(summary: &RunSummary, format: Format) {
    match format {
        Format::Human => {
            println!("build version: {}", summary.version);
            match &summary.extraction {
                Ok(result) => print_extract_summary(result, Format::Human),
                Err(ExtractionSkipped::Requested) => println!("extraction skipped (requested)"),
                Err(ExtractionSkipped::AlreadyCurrent) => {
                    println!("extraction skipped (already current)");
                }
            }
            for step in &summary.steps {
                println!("step {}: {:.1?}", step.name, step.elapsed);
            }
        }
        Format::Json => {
            let extraction = match &summary.extraction {
                Ok(result) => extract_json(result),
                Err(ExtractionSkipped::Requested) => {
                    serde_json::json!({"skipped": "requested"})
                }
                Err(ExtractionSkipped::AlreadyCurrent) => {
                    serde_json::json!({"skipped": "already_current"})
                }
            };
            let doc = serde_json::json!({
                "version": summary.version,
                "extraction": extraction,
                "steps": summary.steps.iter().map(|s| serde_json::json!({
                    "name": s.name,
                    "elapsed_ms": s.elapsed.as_millis() as u64,
                })).collect::<Vec<_>>(),
            });
            println!("{}", doc);
        }
    }
}

fn entry_json(entry: &ArchiveEntry) -> serde_json::Value {
    serde_json::json!({
        "path": entry.path.as_str(),
        "size": entry.size,
        "directory": entry.is_directory,
        "mtime": entry.modification_time,
    })
}

fn extract_json(result: &ExtractResult) -> serde_json::Value {
    serde_json::json!({
        "extracted": result.entries_extracted,
        "skipped": result.entries_skipped,
        "failed": result.entries_failed,
        "bytes": result.bytes_extracted,
        "failures": result.failures.iter().map(|(path, reason)| {
            serde_json::json!({"path": path, "reason": reason})
        }).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_bytes() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(1023), "1023 B");
        assert_eq!(human_bytes(1536), "1.5 KiB");
        assert_eq!(human_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
