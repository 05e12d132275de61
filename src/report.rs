//! Plain-text rendering of list and detail views.
//!
//! Every [`ViewState`] branch gets its own output so that loading, empty,
//! failed and populated lists can never be confused on screen.

use crate::errors::Error;
use crate::pipeline::detail::DetailState;
use crate::pipeline::page::ViewState;
use crate::pipeline::paginator::{PageButton, Paginator};
use crate::views::rencana::ProcurementSummary;
use std::fmt::Write;

/// A display row that can be laid out as a table line.
pub trait TableRow {
    /// Column titles, one per cell.
    fn headers() -> &'static [&'static str];

    /// Cell text in header order.
    fn cells(&self) -> Vec<String>;
}

/// Shown while a fetch is in flight.
pub const LOADING_TEXT: &str = "Memuat data...";
/// Shown when a list has no active records.
pub const EMPTY_TEXT: &str = "Belum ada data.";
/// Shown when a filtered list cannot be scoped yet.
pub const UNAVAILABLE_TEXT: &str = "Data belum tersedia untuk akun ini.";
/// Retry affordance after a failed fetch.
pub const RETRY_TEXT: &str = "[Coba Lagi]";
/// Affordance on a missing or deleted detail record.
pub const BACK_TEXT: &str = "[Kembali ke daftar]";

fn failure_text(error: &Error) -> String {
    format!("Gagal memuat data: {error}\n{RETRY_TEXT}")
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn table_line(values: &[&str], widths: &[usize]) -> String {
    values
        .iter()
        .zip(widths)
        .map(|(value, w)| format!("{value}{}", " ".repeat(w.saturating_sub(width(value)))))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Lays out `rows` as an aligned text table with a header rule.
#[must_use]
pub fn format_table<V: TableRow>(rows: &[V]) -> String {
    let headers = V::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width(cell));
            }
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", table_line(headers, &widths));
    let _ = writeln!(
        output,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in &cells {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(output, "{}", table_line(&values, &widths));
    }
    output
}

/// Page-number control, e.g. `1 … 4 [5] 6 … 10`.
#[must_use]
pub fn format_page_buttons(paginator: &Paginator) -> String {
    paginator
        .page_buttons()
        .into_iter()
        .map(|button| match button {
            PageButton::Page(page) if page == paginator.current_page() => format!("[{page}]"),
            PageButton::Page(page) => page.to_string(),
            PageButton::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one list view under `title`.
#[must_use]
pub fn render_page<V: TableRow>(title: &str, state: &ViewState<V>, paginator: &Paginator) -> String {
    let mut output = format!("== {title} ==\n");

    match state {
        ViewState::Loading => output.push_str(LOADING_TEXT),
        ViewState::Unavailable => output.push_str(UNAVAILABLE_TEXT),
        ViewState::Failed(error) => output.push_str(&failure_text(error)),
        ViewState::Empty => output.push_str(EMPTY_TEXT),
        ViewState::Populated { rows } => {
            output.push_str(&format_table(rows));
            let _ = write!(
                output,
                "Halaman {} dari {} ({} data)",
                paginator.current_page(),
                paginator.total_pages(),
                paginator.total_items()
            );
            if paginator.total_pages() > 1 {
                let _ = write!(output, "\n{}", format_page_buttons(paginator));
            }
        }
    }

    output.push('\n');
    output
}

/// Renders a single-record view as label/value lines.
#[must_use]
pub fn render_detail<V: TableRow>(title: &str, state: &DetailState<V>) -> String {
    let mut output = format!("== {title} ==\n");

    match state {
        DetailState::Loading => output.push_str(LOADING_TEXT),
        DetailState::Failed(error) => output.push_str(&failure_text(error)),
        DetailState::NotFound => {
            let _ = write!(output, "Data tidak ditemukan.\n{BACK_TEXT}");
        }
        DetailState::Found(row) => {
            let headers = V::headers();
            let label_width = headers.iter().map(|h| width(h)).max().unwrap_or(0);
            let lines: Vec<String> = headers
                .iter()
                .zip(row.cells())
                .map(|(header, value)| {
                    format!("{header}{} : {value}", " ".repeat(label_width - width(header)))
                })
                .collect();
            output.push_str(&lines.join("\n"));
        }
    }

    output.push('\n');
    output
}

/// Title of the procurement summary block for one station.
#[must_use]
pub fn summary_title(spbu_id: i64) -> String {
    format!("Ringkasan Pengadaan SPBU #{spbu_id}")
}

/// Renders a block whose data could not be read.
#[must_use]
pub fn render_failure(title: &str, error: &Error) -> String {
    format!("== {title} ==\n{}\n", failure_text(error))
}

/// Renders plan counts per workflow stage.
#[must_use]
pub fn render_summary(summary: &ProcurementSummary) -> String {
    let mut output = format!("== {} ==\n", summary_title(summary.spbu_id));
    for (status, count) in &summary.counts {
        let _ = writeln!(output, "{:<12}{count}", status.label());
    }
    let _ = writeln!(output, "{:<12}{}", "Total", summary.total());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ProcurementStatus;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Station {
        id: i64,
        nama: &'static str,
    }

    impl TableRow for Station {
        fn headers() -> &'static [&'static str] {
            &["ID", "Nama"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.id.to_string(), self.nama.to_string()]
        }
    }

    fn paginator(total: u64, page: u64) -> Paginator {
        let mut paginator = Paginator::new(10);
        paginator.set_total(total);
        paginator.go_to(page);
        paginator
    }

    #[test]
    fn test_table_columns_are_aligned() {
        let table = format_table(&[
            Station {
                id: 1,
                nama: "SPBU Cikini",
            },
            Station {
                id: 12,
                nama: "SPBU A",
            },
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID | Nama");
        assert_eq!(lines[1], "---+------------");
        assert_eq!(lines[2], "1  | SPBU Cikini");
        assert_eq!(lines[3], "12 | SPBU A");
    }

    #[test]
    fn test_each_state_renders_distinctly() {
        let paginator = paginator(0, 1);
        let loading = render_page::<Station>("SPBU", &ViewState::Loading, &paginator);
        let empty = render_page::<Station>("SPBU", &ViewState::Empty, &paginator);
        let unavailable = render_page::<Station>("SPBU", &ViewState::Unavailable, &paginator);
        let failed = render_page::<Station>(
            "SPBU",
            &ViewState::Failed(Arc::new(Error::not_found("SPBU", 3))),
            &paginator,
        );

        assert!(loading.contains(LOADING_TEXT));
        assert!(empty.contains(EMPTY_TEXT));
        assert!(unavailable.contains(UNAVAILABLE_TEXT));
        assert!(failed.contains("SPBU with id 3 not found"));
        assert!(failed.contains(RETRY_TEXT));
        assert!(!loading.contains(EMPTY_TEXT));
    }

    #[test]
    fn test_populated_page_has_footer() {
        let paginator = paginator(23, 3);
        let rendered = render_page(
            "SPBU",
            &ViewState::Populated {
                rows: vec![Station {
                    id: 21,
                    nama: "SPBU 21",
                }],
            },
            &paginator,
        );

        assert!(rendered.starts_with("== SPBU ==\n"));
        assert!(rendered.contains("Halaman 3 dari 3 (23 data)"));
        assert!(rendered.contains("1 2 [3]"));
    }

    #[test]
    fn test_page_buttons_mark_current_page() {
        let paginator = paginator(100, 5);
        assert_eq!(format_page_buttons(&paginator), "1 … 4 [5] 6 … 10");
    }

    #[test]
    fn test_detail_not_found_offers_way_back() {
        let rendered = render_detail::<Station>("SPBU", &DetailState::NotFound);
        assert!(rendered.contains(BACK_TEXT));

        let found = render_detail(
            "SPBU",
            &DetailState::Found(Station {
                id: 4,
                nama: "SPBU D",
            }),
        );
        assert!(found.contains("ID   : 4"));
        assert!(found.contains("Nama : SPBU D"));
    }

    #[test]
    fn test_summary_lists_every_stage() {
        let summary = ProcurementSummary {
            spbu_id: 1,
            counts: ProcurementStatus::ALL.iter().map(|s| (*s, 2)).collect(),
        };
        let rendered = render_summary(&summary);
        assert!(rendered.contains("MS2         2"));
        assert!(rendered.contains("Total       10"));
    }

    #[test]
    fn test_failed_summary_renders_as_failure_block() {
        let rendered = render_failure(&summary_title(3), &Error::not_found("SPBU", 3));
        assert!(rendered.starts_with("== Ringkasan Pengadaan SPBU #3 ==\n"));
        assert!(rendered.contains("Gagal memuat data: SPBU with id 3 not found"));
        assert!(rendered.contains(RETRY_TEXT));
    }
}
