//! Human-readable result report, in the same Indonesian the tool prompts in.
//!
//! Formatting returns `String`s; the binary decides where they go.

use std::time::Duration;

use crate::extraction::ClinicalEntity;

/// Placeholder for fields the model left empty.
const MISSING: &str = "N/A";

/// Format one retained entity block, 1-indexed.
pub fn format_entity(index: usize, entity: &ClinicalEntity) -> String {
    let mut out = String::new();
    out.push_str(&format!("Entitas {index}:\n"));
    out.push_str(&format!("  Teks Asli:        {}\n", entity.text));
    out.push_str(&format!(
        "  Istilah Pilihan:  {}\n",
        entity.preferred_term.as_deref().unwrap_or(MISSING)
    ));
    out.push_str(&format!(
        "  Kategori Semantik: {}\n",
        entity.semantic_category.as_str()
    ));
    out.push_str(&format!(
        "  Skor Kepercayaan: {}\n",
        entity.confidence_score.as_str()
    ));
    out.push_str(&format!("  Konteks:          {}\n", entity.context.as_str()));
    out.push_str(&format!(
        "  Lateralitas:      {}\n",
        entity.laterality.map_or(MISSING, |l| l.as_str())
    ));
    out.push_str(&format!(
        "  Tingkat Keparahan: {}\n",
        entity.severity.map_or(MISSING, |s| s.as_str())
    ));
    out.push_str(&format!(
        "  Kode SNOMED CT:   {}\n",
        entity.snomed_code.as_deref().unwrap_or(MISSING)
    ));
    out
}

/// Full report: header, entity blocks (or the zero-result message), summary
/// count and the elapsed analyze-and-filter time in milliseconds.
pub fn format_report(entities: &[ClinicalEntity], elapsed: Duration) -> String {
    let mut out = String::new();
    out.push_str("\n--- Hasil Ekstraksi dan Pemetaan ---\n");

    if entities.is_empty() {
        out.push_str("Tidak ada entitas yang diekstrak atau dipetakan dengan sukses.\n");
    } else {
        for (i, entity) in entities.iter().enumerate() {
            out.push('\n');
            out.push_str(&format_entity(i + 1, entity));
        }
    }

    out.push_str(&format!(
        "\n--- Pemrosesan Selesai. Ditemukan {} entitas klinis akhir. ---\n",
        entities.len()
    ));
    out.push_str(&format!(
        "Waktu proses total: {:.2} ms\n",
        elapsed.as_secs_f64() * 1000.0
    ));
    out
}
